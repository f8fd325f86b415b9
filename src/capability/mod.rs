//! Runtime discovery of the host environment's optional peer-networking
//! layer. Subsystems advertise entry points as name/shape declarations;
//! the binder matches them against its descriptors, once per process, and
//! degrades to solo mode when nothing fits.

mod binder;
mod descriptor;
mod error;
mod subsystem;

pub use binder::{CapabilityBinder, CapabilityHandle, CapabilityStatus};
pub use descriptor::{builtin_descriptors, ArityRule, Capability, EntryPointDescriptor, NameRule};
pub use error::SubsystemError;
pub use subsystem::{
    Arg, EntryPointDecl, ParamShape, PeerSubsystem, ReceiveHandler, SubsystemDirectory,
};
