use thiserror::Error;

/// Errors that can occur when invoking a bound subsystem entry point
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubsystemError {
    /// Entry point name was not recognized by the subsystem
    #[error("Subsystem {subsystem:?} has no entry point named {entry:?}. The binder and the subsystem disagree about the advertised surface")]
    UnknownEntryPoint {
        subsystem: String,
        entry: String,
    },

    /// Entry point was invoked but the call failed inside the subsystem
    #[error("Entry point {entry:?} failed: {reason}")]
    CallFailed {
        entry: String,
        reason: String,
    },

    /// A receive handler for the wire type is already installed
    #[error("A receive handler for wire type {wire_name:?} is already installed")]
    HandlerAlreadyInstalled {
        wire_name: String,
    },
}
