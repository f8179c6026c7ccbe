//! Interactive line-oriented session.

use std::borrow::Cow;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::router::Router;

/// Printed once when the session starts.
pub const BANNER: &str = "Search Agent System Initialized. Type 'exit' to quit.";

const USER_PROMPT: &str = "User: ";
const ASSISTANT_PREFIX: &str = "Assistant: ";

/// Whether `line` ends the session (`exit` / `quit`, any case).
pub fn is_exit_command(line: &str) -> bool {
    let line = line.trim();
    line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit")
}

/// Read queries from `input` and write answers to `output` until an exit
/// command or end of input.
///
/// Each query is fully answered before the next line is read. Blank lines
/// are skipped. Bytes that are not valid UTF-8 are replaced, not fatal.
pub async fn run_session<R, W>(router: &Router, mut input: R, mut output: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    output.write_all(format!("{}\n", BANNER).as_bytes()).await?;

    let mut buf = Vec::new();
    let mut turns = 0usize;

    loop {
        output.write_all(format!("\n{}", USER_PROMPT).as_bytes()).await?;
        output.flush().await?;

        buf.clear();
        if input.read_until(b'\n', &mut buf).await? == 0 {
            debug!("End of input");
            output.write_all(b"\n").await?;
            break;
        }

        let line = String::from_utf8_lossy(&buf);
        if matches!(line, Cow::Owned(_)) {
            warn!("Input line was not valid UTF-8; invalid bytes replaced");
        }

        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        if is_exit_command(query) {
            break;
        }

        let answer = router.route(query).await;
        output
            .write_all(format!("{}{}\n", ASSISTANT_PREFIX, answer).as_bytes())
            .await?;
        turns += 1;
    }

    output.flush().await?;
    info!("Session ended after {} queries", turns);
    Ok(())
}
