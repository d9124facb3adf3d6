use crate::foundation::error::{CelstreamError, CelstreamResult};

/// Little-endian read cursor over an immutable byte buffer.
///
/// The reader knows nothing about the container format. Every read is bounds
/// checked and fails with [`CelstreamError::TruncatedInput`] instead of
/// yielding garbage past the end of the buffer.
#[derive(Clone, Debug)]
pub struct FieldReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> FieldReader<'a> {
    /// Cursor at offset 0 of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current byte position.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Total length of the underlying buffer.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the underlying buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes between the cursor and the end of the buffer.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Move to an absolute position. Positions past the end are allowed;
    /// the next read reports the truncation.
    pub fn seek(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// Move `delta` bytes forward.
    pub fn skip(&mut self, delta: usize) -> CelstreamResult<()> {
        self.ensure(delta)?;
        self.pos += delta;
        Ok(())
    }

    /// A reader at the same position that treats `end` as the end of input.
    ///
    /// Offsets stay absolute; only reads past `end` are affected.
    pub fn limited_to(&self, end: usize) -> CelstreamResult<FieldReader<'a>> {
        let data = self.slice(0, end)?;
        Ok(FieldReader {
            data,
            pos: self.pos,
        })
    }

    /// Raw view of `[start, end)` without moving the cursor.
    pub fn slice(&self, start: usize, end: usize) -> CelstreamResult<&'a [u8]> {
        if start > end || end > self.data.len() {
            return Err(CelstreamError::truncated(
                start,
                end.saturating_sub(start),
                self.data.len().saturating_sub(start),
            ));
        }
        Ok(&self.data[start..end])
    }

    /// Read `n` bytes and advance past them.
    pub fn read_bytes(&mut self, n: usize) -> CelstreamResult<&'a [u8]> {
        self.ensure(n)?;
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// Read `N` bytes into an array.
    pub fn read_array<const N: usize>(&mut self) -> CelstreamResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// Read an unsigned byte.
    pub fn read_u8(&mut self) -> CelstreamResult<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    /// Read a little-endian `u16`.
    pub fn read_u16(&mut self) -> CelstreamResult<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    /// Read a little-endian `u32`.
    pub fn read_u32(&mut self) -> CelstreamResult<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    /// Read a little-endian two's-complement `i16`.
    pub fn read_i16(&mut self) -> CelstreamResult<i16> {
        Ok(i16::from_le_bytes(self.read_array()?))
    }

    /// Read a little-endian two's-complement `i32`.
    pub fn read_i32(&mut self) -> CelstreamResult<i32> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    /// Read a `u16` length prefix followed by that many bytes of text.
    ///
    /// Invalid UTF-8 is replaced rather than rejected; names are display-only.
    pub fn read_string(&mut self) -> CelstreamResult<String> {
        let len = usize::from(self.read_u16()?);
        let bytes = self.read_bytes(len)?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    fn ensure(&self, n: usize) -> CelstreamResult<()> {
        match self.pos.checked_add(n) {
            Some(end) if end <= self.data.len() => Ok(()),
            _ => Err(CelstreamError::truncated(self.pos, n, self.remaining())),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/format/reader.rs"]
mod tests;
