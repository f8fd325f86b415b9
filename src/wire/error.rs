use thiserror::Error;

/// Errors that can occur while decoding a wire payload
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireError {
    /// Reader ran past the end of the payload
    #[error("Payload exhausted: read wanted {needed} byte(s) but only {remaining} remain. The payload is truncated or was encoded with a different schema")]
    BufferExhausted {
        needed: usize,
        remaining: usize,
    },
}
