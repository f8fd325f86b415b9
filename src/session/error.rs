use thiserror::Error;

/// Errors that can occur when triggering a strike by hand
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TriggerError {
    /// Only the authoritative role may run strikes
    #[error("Manual strike refused: this session is not authoritative. Only the host schedules and fires strikes")]
    NotAuthoritative,

    /// A warning or barrage sequence is already running
    #[error("Manual strike refused: a strike sequence is already in flight")]
    SequenceInFlight,

    /// No session is active
    #[error("Manual strike refused: no session is active")]
    NoActiveSession,

    /// Nobody is present to target
    #[error("Manual strike refused: no participants are present to target")]
    NoTargets,
}
