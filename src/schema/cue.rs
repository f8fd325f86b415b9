use crate::wire::{PacketReader, PacketWriter, WireError, WireSerde};

/// Wire name under which the cue is registered with the transport.
pub const CUE_WIRE_NAME: &str = "StrikeCue";

/// Size of an encoded cue.
pub const CUE_WIRE_BYTES: usize = 12;

/// The one message this crate puts on the wire: the world position of an
/// incoming strike. Three little-endian `f32`s, written x, then y, then z.
/// The field order is the wire contract; changing it breaks every peer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrikeCue {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl StrikeCue {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl WireSerde for StrikeCue {
    fn ser(&self, writer: &mut PacketWriter) {
        self.x.ser(writer);
        self.y.ser(writer);
        self.z.ser(writer);
    }

    fn de(reader: &mut PacketReader) -> Result<Self, WireError> {
        let x = f32::de(reader)?;
        let y = f32::de(reader)?;
        let z = f32::de(reader)?;
        Ok(Self { x, y, z })
    }
}
