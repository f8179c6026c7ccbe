//! Scripted brain - replies with canned text.

use std::collections::VecDeque;
use std::sync::Mutex;

use brain_core::{async_trait, Brain, BrainError, InboundMessage, OutboundMessage};

/// A brain that answers from a script and records every message it receives.
///
/// Replies are consumed in order; once the script runs out the last reply
/// repeats, so a single-reply script answers every call the same way.
#[derive(Debug, Default)]
pub struct ScriptedBrain {
    replies: Mutex<VecDeque<String>>,
    last: Mutex<String>,
    received: Mutex<Vec<InboundMessage>>,
}

impl ScriptedBrain {
    /// Create a brain that always answers with `reply`.
    pub fn replying(reply: impl Into<String>) -> Self {
        Self::with_script([reply.into()])
    }

    /// Create a brain that answers with each reply in turn.
    pub fn with_script<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Number of messages processed so far.
    pub fn call_count(&self) -> usize {
        self.received.lock().map(|r| r.len()).unwrap_or(0)
    }

    /// Copies of every message processed so far.
    pub fn received(&self) -> Vec<InboundMessage> {
        self.received.lock().map(|r| r.clone()).unwrap_or_default()
    }

    fn next_reply(&self) -> String {
        let mut replies = self.replies.lock().unwrap_or_else(|e| e.into_inner());
        let mut last = self.last.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(reply) = replies.pop_front() {
            *last = reply;
        }
        last.clone()
    }
}

#[async_trait]
impl Brain for ScriptedBrain {
    async fn process(&self, message: InboundMessage) -> Result<OutboundMessage, BrainError> {
        let reply = self.next_reply();
        if let Ok(mut received) = self.received.lock() {
            received.push(message.clone());
        }
        Ok(OutboundMessage::reply_to(&message, reply))
    }

    fn name(&self) -> &str {
        "ScriptedBrain"
    }
}
