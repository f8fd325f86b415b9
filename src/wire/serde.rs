use crate::wire::{error::WireError, reader::PacketReader, writer::PacketWriter};

/// A type that can write itself to an outgoing payload and read itself back
/// from an incoming one. Implementations must consume exactly the bytes
/// they produce so values can be concatenated in a single payload.
pub trait WireSerde: Sized {
    /// Appends this value to the payload.
    fn ser(&self, writer: &mut PacketWriter);
    /// Reads a value of this type from the payload.
    fn de(reader: &mut PacketReader) -> Result<Self, WireError>;
}

impl WireSerde for u8 {
    fn ser(&self, writer: &mut PacketWriter) {
        writer.write_byte(*self);
    }

    fn de(reader: &mut PacketReader) -> Result<Self, WireError> {
        reader.read_byte()
    }
}

impl WireSerde for bool {
    fn ser(&self, writer: &mut PacketWriter) {
        writer.write_byte(u8::from(*self));
    }

    fn de(reader: &mut PacketReader) -> Result<Self, WireError> {
        Ok(reader.read_byte()? != 0)
    }
}

impl WireSerde for u32 {
    fn ser(&self, writer: &mut PacketWriter) {
        writer.write_bytes(&self.to_le_bytes());
    }

    fn de(reader: &mut PacketReader) -> Result<Self, WireError> {
        Ok(u32::from_le_bytes(reader.read_bytes::<4>()?))
    }
}

impl WireSerde for f32 {
    fn ser(&self, writer: &mut PacketWriter) {
        writer.write_bytes(&self.to_le_bytes());
    }

    fn de(reader: &mut PacketReader) -> Result<Self, WireError> {
        Ok(f32::from_le_bytes(reader.read_bytes::<4>()?))
    }
}
