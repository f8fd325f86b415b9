use thiserror::Error;

/// Errors that can occur while binding the cue schema to the transport
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SynthesisError {
    /// No networking capability is bound
    #[error("Cannot build the cue schema: no peer subsystem is bound. Probe the environment before starting a networked session")]
    NetworkingUnavailable,

    /// The encode/decode self-check did not reproduce the input
    #[error("Cue schema self-check failed: {reason}. The wire layout and the decoder disagree")]
    SelfCheckFailed {
        reason: String,
    },

    /// The binding has no receive-register entry point
    #[error("Subsystem binding has no receive-register entry point; inbound cues cannot be heard")]
    ReceiveUnbound,

    /// Receiver installation was rejected by the subsystem
    #[error("Receiver installation failed at entry point {entry:?}: {reason}")]
    ReceiverInstallFailed {
        entry: String,
        reason: String,
    },

    /// The binding has no broadcast-send entry point
    #[error("Subsystem binding has no broadcast-send entry point; cues cannot be broadcast")]
    SendUnbound,
}

/// Errors that can occur when broadcasting a cue
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendError {
    /// No send operation is resolved for this session
    #[error("No send operation is resolved for this session. The binding is missing its send entry point or session setup did not run")]
    SenderUnresolved,

    /// The subsystem rejected the send call
    #[error("Broadcast failed at entry point {entry:?}: {reason}")]
    Rejected {
        entry: String,
        reason: String,
    },
}
