//! Message types passed into and out of a brain.

/// A piece of text handed to a brain for processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    /// Which component sent the message (e.g. "classifier", "summarizer").
    pub sender: String,
    /// The message body.
    pub text: String,
    /// Per-message instructions that replace the brain's configured system prompt.
    pub instructions: Option<String>,
}

impl InboundMessage {
    /// Create a plain message from `sender`.
    pub fn direct(sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            text: text.into(),
            instructions: None,
        }
    }

    /// Attach instructions that override the brain's system prompt for this message only.
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }
}

/// A brain's reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    /// The component the reply is addressed to.
    pub recipient: String,
    /// The reply text.
    pub text: String,
}

impl OutboundMessage {
    /// Build a reply addressed to the sender of `message`.
    pub fn reply_to(message: &InboundMessage, text: impl Into<String>) -> Self {
        Self {
            recipient: message.sender.clone(),
            text: text.into(),
        }
    }
}
