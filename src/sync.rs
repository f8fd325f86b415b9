use std::sync::{Mutex, MutexGuard};

use log::{info, warn};
use once_cell::sync::OnceCell;

use crate::capability::{CapabilityBinder, CapabilityStatus, SubsystemDirectory};
use crate::schema::{
    install_receiver, resolve_sender, send_cue, SchemaHandle, SendError, SenderHandle, StrikeCue,
    SynthesisError,
};

/// Per-session networking state, cleared when a session ends.
struct SessionBinding {
    /// Whether receiver registration has been attempted this session. A
    /// failed attempt is not retried until the next session.
    registration_attempted: bool,
    registration_ok: bool,
    sender: Option<SenderHandle>,
}

impl SessionBinding {
    fn fresh() -> Self {
        Self {
            registration_attempted: false,
            registration_ok: false,
            sender: None,
        }
    }
}

/// Shared facade over the capability binder and the cue schema.
///
/// One `PeerSync` lives for the whole process, shared between the host
/// glue and each session in turn. The schema is built at most once per
/// process, success or failure; receiver registration and sender
/// resolution happen once per session.
pub struct PeerSync {
    binder: CapabilityBinder,
    schema: OnceCell<Result<SchemaHandle, SynthesisError>>,
    session: Mutex<SessionBinding>,
}

impl PeerSync {
    pub fn new() -> Self {
        Self {
            binder: CapabilityBinder::new(),
            schema: OnceCell::new(),
            session: Mutex::new(SessionBinding::fresh()),
        }
    }

    /// Probes the environment, or returns the cached outcome.
    pub fn probe(&self, directory: &dyn SubsystemDirectory) -> &CapabilityStatus {
        self.binder.probe(directory)
    }

    pub fn status(&self) -> &CapabilityStatus {
        self.binder.status()
    }

    /// Defaults to authoritative whenever the environment cannot say
    /// otherwise.
    pub fn is_authoritative(&self) -> bool {
        self.binder.is_authoritative()
    }

    /// The process-wide schema, building it on first use. The first
    /// failure is cached and returned to later callers unchanged.
    ///
    /// Requires a binding with at least one transport entry point; a
    /// binding that only answers the role query has no use for a schema.
    pub fn schema(&self) -> Result<&SchemaHandle, SynthesisError> {
        let transport_bound = match self.status().handle() {
            Some(handle) => {
                handle.receive_register().is_some() || handle.broadcast_send().is_some()
            }
            None => false,
        };
        if !transport_bound {
            return Err(SynthesisError::NetworkingUnavailable);
        }
        match self.schema.get_or_init(SchemaHandle::build) {
            Ok(schema) => Ok(schema),
            Err(error) => Err(error.clone()),
        }
    }

    /// Runs the once-per-session networking setup: ensures the schema,
    /// installs the receive handler, and resolves the send operation.
    ///
    /// Safe to call repeatedly; after the first call in a session, success
    /// or failure, it does nothing until [`PeerSync::reset_session`].
    pub fn ready_for_session(&self, on_receive: impl Fn(StrikeCue) + Send + Sync + 'static) {
        let Some(handle) = self.status().handle() else {
            // Solo mode: nothing to set up.
            return;
        };

        let mut session = lock_session(&self.session);
        if session.registration_attempted {
            return;
        }
        session.registration_attempted = true;

        let schema = match self.schema() {
            Ok(schema) => schema,
            Err(error) => {
                warn!("Networked session setup skipped: {error}");
                return;
            }
        };

        match install_receiver(schema, handle, on_receive) {
            Ok(()) => {
                session.registration_ok = true;
                info!("Cue receiver registered for this session");
            }
            Err(error) => {
                warn!("Cue receiver registration failed, inbound cues will be missed: {error}");
            }
        }

        match resolve_sender(handle) {
            Ok(sender) => {
                session.sender = Some(sender);
            }
            Err(error) => {
                info!("Cue broadcast disabled: {error}");
            }
        }
    }

    /// True when this session's receive handler is installed.
    pub fn receiver_registered(&self) -> bool {
        lock_session(&self.session).registration_ok
    }

    /// Broadcasts a strike cue to every peer. Requires a completed session
    /// setup with a resolved sender.
    pub fn broadcast_cue(&self, x: f32, y: f32, z: f32) -> Result<(), SendError> {
        let Some(handle) = self.status().handle() else {
            return Err(SendError::SenderUnresolved);
        };
        let sender = {
            let session = lock_session(&self.session);
            match &session.sender {
                Some(sender) => sender.clone(),
                None => return Err(SendError::SenderUnresolved),
            }
        };
        let schema = self.schema().map_err(|_| SendError::SenderUnresolved)?;
        send_cue(schema, handle, &sender, &StrikeCue::new(x, y, z))
    }

    /// Clears the per-session state so the next session re-runs setup. The
    /// process-wide schema cache is left alone.
    pub fn reset_session(&self) {
        *lock_session(&self.session) = SessionBinding::fresh();
    }
}

/// A poisoned lock only means a handler panicked mid-update; the flags it
/// guards stay usable.
fn lock_session(mutex: &Mutex<SessionBinding>) -> MutexGuard<'_, SessionBinding> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
