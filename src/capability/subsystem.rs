use std::sync::Arc;

use crate::capability::error::SubsystemError;

/// The declared shape of one value parameter of an entry point.
///
/// Subsystems advertise shapes instead of concrete types so the binder can
/// match entry points without a compile-time contract to the transport.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamShape {
    /// The message payload slot.
    Payload,
    /// A callable the subsystem invokes on delivery.
    Callback,
    /// An enum-like delivery selector, advertised by variant name.
    Mode { variants: Vec<String> },
    /// A boolean knob.
    Flag,
    /// A numeric knob.
    Scalar,
    /// Anything the binder has no rule for, named for diagnostics.
    Opaque(String),
}

/// One entry point a subsystem advertises: a name, a generic arity, and the
/// declared shapes of its value parameters in call order.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryPointDecl {
    pub name: String,
    pub type_params: u8,
    pub params: Vec<ParamShape>,
}

impl EntryPointDecl {
    pub fn new(name: &str, type_params: u8, params: Vec<ParamShape>) -> Self {
        Self {
            name: name.to_string(),
            type_params,
            params,
        }
    }
}

/// A concrete argument for one non-payload parameter slot of a send call.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// Index into the slot's declared `Mode` variants.
    Mode(usize),
    /// Value for a `Flag` slot.
    Flag(bool),
    /// Value for a `Scalar` slot.
    Scalar(f64),
    /// No usable default; the subsystem applies its own.
    Absent,
}

/// Callback installed at a receive-register entry point. Receives the raw
/// payload bytes of one inbound message of the registered wire type.
pub type ReceiveHandler = Box<dyn Fn(&[u8]) + Send + Sync>;

/// An optional peer-networking layer the host environment may embed.
///
/// Implementations advertise their entry points as declarations; the binder
/// matches those against its descriptors and never calls an entry point it
/// did not resolve. Every method takes an entry-point name previously
/// returned from `entry_points`.
pub trait PeerSubsystem: Send + Sync {
    /// Identifies the subsystem in logs.
    fn name(&self) -> &str;

    /// Every entry point this subsystem exposes.
    fn entry_points(&self) -> Vec<EntryPointDecl>;

    /// Asks whether this peer holds the authoritative role.
    fn query_role(&self, entry: &str) -> Result<bool, SubsystemError>;

    /// Installs a byte-level receive handler for the named wire type.
    fn install_receiver(
        &self,
        entry: &str,
        wire_name: &str,
        handler: ReceiveHandler,
    ) -> Result<(), SubsystemError>;

    /// Sends an encoded payload of the named wire type to all peers, with
    /// one argument per non-payload parameter slot of the entry point.
    fn send(
        &self,
        entry: &str,
        wire_name: &str,
        payload: &[u8],
        args: &[Arg],
    ) -> Result<(), SubsystemError>;
}

/// Enumerates whatever peer subsystems the host environment embeds. An
/// empty directory is the solo case.
pub trait SubsystemDirectory {
    fn subsystems(&self) -> Vec<Arc<dyn PeerSubsystem>>;
}
