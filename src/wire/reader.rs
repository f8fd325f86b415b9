use crate::wire::error::WireError;

/// Walks an incoming payload byte by byte, erroring instead of panicking
/// when the payload is shorter than the schema expects.
pub struct PacketReader<'b> {
    buffer: &'b [u8],
    cursor: usize,
}

impl<'b> PacketReader<'b> {
    pub fn new(buffer: &'b [u8]) -> Self {
        Self { buffer, cursor: 0 }
    }

    pub fn read_byte(&mut self) -> Result<u8, WireError> {
        let [byte] = self.read_bytes::<1>()?;
        Ok(byte)
    }

    pub fn read_bytes<const N: usize>(&mut self) -> Result<[u8; N], WireError> {
        let remaining = self.remaining();
        if remaining < N {
            return Err(WireError::BufferExhausted {
                needed: N,
                remaining,
            });
        }
        let mut out = [0u8; N];
        out.copy_from_slice(&self.buffer[self.cursor..self.cursor + N]);
        self.cursor += N;
        Ok(out)
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.cursor
    }
}
