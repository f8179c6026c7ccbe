//! Prompt fingerprints, so logs show which prompt version produced a decision.

use sha2::{Digest, Sha256};

/// Length of the hex fingerprint returned by [`prompt_fingerprint`].
const FINGERPRINT_LEN: usize = 16;

/// Short, stable SHA-256 fingerprint of a prompt.
///
/// Whitespace at either end is ignored so a prompt loaded from a file with a
/// trailing newline matches the embedded copy.
pub fn prompt_fingerprint(prompt: &str) -> String {
    let digest = Sha256::digest(prompt.trim().as_bytes());
    digest
        .iter()
        .map(|byte| format!("{:02x}", byte))
        .collect::<String>()
        .chars()
        .take(FINGERPRINT_LEN)
        .collect()
}
