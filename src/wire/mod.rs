//! Byte-level wire contract shared by every message that crosses the
//! transport seam. Scalars are little-endian; decoding never panics.

mod error;
mod reader;
mod serde;
mod writer;

pub use error::WireError;
pub use reader::PacketReader;
pub use serde::WireSerde;
pub use writer::PacketWriter;
