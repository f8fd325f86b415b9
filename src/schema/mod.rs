//! The cue schema: one fixed message type bound to the transport's
//! byte-level contract, selected and self-checked once per process, plus
//! the receive adapter and the send-operation resolution built on top of a
//! capability binding.

mod cue;
mod error;
mod synth;

pub use cue::{StrikeCue, CUE_WIRE_BYTES, CUE_WIRE_NAME};
pub use error::{SendError, SynthesisError};
pub use synth::{install_receiver, resolve_sender, send_cue, SchemaHandle, SenderHandle};
