//! # Strikefall
//! Timed, randomized strike events for multiplayer sessions: probe the
//! host environment for optional peer networking, bind a fixed cue schema
//! to whatever transport is present, and run an interruptible
//! warning/barrage lifecycle whose cues observers replay from broadcasts.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

mod capability;
mod gateway;
mod schema;
mod session;
mod sync;
mod types;
mod wire;
mod world;

pub use capability::{
    builtin_descriptors, Arg, ArityRule, Capability, CapabilityBinder, CapabilityHandle,
    CapabilityStatus, EntryPointDecl, EntryPointDescriptor, NameRule, ParamShape, PeerSubsystem,
    ReceiveHandler, SubsystemDirectory, SubsystemError,
};
pub use gateway::{CueOutcome, EffectError, EffectGateway};
pub use schema::{
    install_receiver, resolve_sender, send_cue, SchemaHandle, SendError, SenderHandle, StrikeCue,
    SynthesisError, CUE_WIRE_BYTES, CUE_WIRE_NAME,
};
pub use session::{
    pick_strike_center, pick_target, spread_point, StrikeConfig, StrikePhase, StrikeSession,
    TriggerError, SETTLE_DELAY,
};
pub use sync::PeerSync;
pub use types::{Role, Vec3};
pub use wire::{PacketReader, PacketWriter, WireError, WireSerde};
pub use world::{Participant, WorldView};
