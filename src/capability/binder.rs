use std::sync::Arc;

use log::{info, warn};
use once_cell::sync::OnceCell;

use crate::capability::{
    descriptor::{builtin_descriptors, Capability},
    subsystem::{PeerSubsystem, SubsystemDirectory},
};

/// The resolved binding to a peer-networking subsystem: which entry point
/// answers each capability, if any. Immutable once resolved.
#[derive(Clone)]
pub struct CapabilityHandle {
    subsystem: Arc<dyn PeerSubsystem>,
    role_query: Option<String>,
    receive_register: Option<String>,
    broadcast_send: Option<String>,
}

impl CapabilityHandle {
    pub fn subsystem(&self) -> &Arc<dyn PeerSubsystem> {
        &self.subsystem
    }

    pub fn role_query(&self) -> Option<&str> {
        self.role_query.as_deref()
    }

    pub fn receive_register(&self) -> Option<&str> {
        self.receive_register.as_deref()
    }

    pub fn broadcast_send(&self) -> Option<&str> {
        self.broadcast_send.as_deref()
    }

    /// The capabilities the probe could not resolve.
    pub fn missing(&self) -> Vec<Capability> {
        let mut missing = Vec::new();
        if self.role_query.is_none() {
            missing.push(Capability::RoleQuery);
        }
        if self.receive_register.is_none() {
            missing.push(Capability::ReceiveRegister);
        }
        if self.broadcast_send.is_none() {
            missing.push(Capability::BroadcastSend);
        }
        missing
    }
}

/// Outcome of the one-time capability probe.
#[derive(Clone)]
pub enum CapabilityStatus {
    /// No peer-networking subsystem was detected; the process runs solo
    /// and treats itself as authoritative.
    Unavailable,
    /// Every capability resolved.
    Bound(CapabilityHandle),
    /// A subsystem was detected but some capabilities did not resolve;
    /// the dependent features stay disabled.
    Partial(CapabilityHandle),
}

impl CapabilityStatus {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, CapabilityStatus::Unavailable)
    }

    pub fn is_bound(&self) -> bool {
        matches!(self, CapabilityStatus::Bound(_))
    }

    pub fn is_partial(&self) -> bool {
        matches!(self, CapabilityStatus::Partial(_))
    }

    /// The resolved handle, for complete and partial bindings alike.
    pub fn handle(&self) -> Option<&CapabilityHandle> {
        match self {
            CapabilityStatus::Unavailable => None,
            CapabilityStatus::Bound(handle) | CapabilityStatus::Partial(handle) => Some(handle),
        }
    }
}

/// Probes the host environment once per process for an optional
/// peer-networking subsystem and caches the outcome.
///
/// Probing never fails: anything short of a complete binding degrades to
/// `Partial` or `Unavailable`, and the role query fails open to
/// authoritative so a broken environment still gets local strikes instead
/// of a mute client waiting for a host that does not exist.
pub struct CapabilityBinder {
    status: OnceCell<CapabilityStatus>,
}

impl CapabilityBinder {
    pub fn new() -> Self {
        Self {
            status: OnceCell::new(),
        }
    }

    /// Runs the probe, or returns the cached outcome of a previous run.
    pub fn probe(&self, directory: &dyn SubsystemDirectory) -> &CapabilityStatus {
        self.status.get_or_init(|| Self::run_probe(directory))
    }

    /// The cached probe outcome. `Unavailable` before any probe ran.
    pub fn status(&self) -> &CapabilityStatus {
        static UNPROBED: CapabilityStatus = CapabilityStatus::Unavailable;
        self.status.get().unwrap_or(&UNPROBED)
    }

    /// Answers the role query through the binding. Defaults to
    /// authoritative when unprobed, unbound, or when the query itself
    /// fails.
    pub fn is_authoritative(&self) -> bool {
        let Some(handle) = self.status().handle() else {
            return true;
        };
        let Some(entry) = handle.role_query() else {
            return true;
        };
        match handle.subsystem().query_role(entry) {
            Ok(is_host) => is_host,
            Err(error) => {
                warn!("Role query failed, defaulting to authoritative: {error}");
                true
            }
        }
    }

    /// Scans the directory. The first subsystem matching at least one
    /// capability descriptor is selected; within a subsystem, the first
    /// declared entry point matching a descriptor wins that capability.
    fn run_probe(directory: &dyn SubsystemDirectory) -> CapabilityStatus {
        let descriptors = builtin_descriptors();
        let subsystems = directory.subsystems();

        if subsystems.is_empty() {
            info!("No peer subsystems present, running solo");
            return CapabilityStatus::Unavailable;
        }

        for subsystem in subsystems {
            let declarations = subsystem.entry_points();

            let mut role_query = None;
            let mut receive_register = None;
            let mut broadcast_send = None;

            for decl in &declarations {
                for descriptor in &descriptors {
                    if !descriptor.matches(decl) {
                        continue;
                    }
                    let slot = match descriptor.capability {
                        Capability::RoleQuery => &mut role_query,
                        Capability::ReceiveRegister => &mut receive_register,
                        Capability::BroadcastSend => &mut broadcast_send,
                    };
                    if slot.is_none() {
                        info!(
                            "Resolved {} to entry point {:?} on subsystem {:?}",
                            descriptor.capability.name(),
                            decl.name,
                            subsystem.name()
                        );
                        *slot = Some(decl.name.clone());
                    }
                }
            }

            if role_query.is_none() && receive_register.is_none() && broadcast_send.is_none() {
                continue;
            }

            let handle = CapabilityHandle {
                subsystem,
                role_query,
                receive_register,
                broadcast_send,
            };

            let missing = handle.missing();
            if missing.is_empty() {
                info!(
                    "Bound peer subsystem {:?}: all capabilities resolved",
                    handle.subsystem().name()
                );
                return CapabilityStatus::Bound(handle);
            }

            let missing_names: Vec<&str> =
                missing.iter().map(|capability| capability.name()).collect();
            warn!(
                "Partially bound peer subsystem {:?}: missing {:?}",
                handle.subsystem().name(),
                missing_names
            );
            return CapabilityStatus::Partial(handle);
        }

        info!("No peer subsystem matched any capability, running solo");
        CapabilityStatus::Unavailable
    }
}
