//! Bounds-checked cursor over payload bytes.

use crate::errors::{CodecError, Result};

/// Forward-only reader. Every read either consumes exactly the requested
/// bytes or fails with `TruncatedData` and consumes nothing.
#[derive(Debug)]
pub struct PayloadReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> PayloadReader<'a> {
    /// Reader positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// True once every byte has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Reads `len` bytes. `field` names the structure in the error.
    pub fn read_slice(&mut self, len: usize, field: &'static str) -> Result<&'a [u8]> {
        let available = self.remaining();
        if available < len {
            return Err(CodecError::TruncatedData {
                field,
                needed: len,
                available,
            });
        }
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    /// Reads exactly `N` bytes into an array.
    pub fn read_array<const N: usize>(&mut self, field: &'static str) -> Result<[u8; N]> {
        let slice = self.read_slice(N, field)?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Ok(out)
    }

    /// Reads one byte.
    pub fn read_u8(&mut self, field: &'static str) -> Result<u8> {
        self.read_array::<1>(field).map(|b| b[0])
    }

    /// Reads a big-endian u16.
    pub fn read_u16(&mut self, field: &'static str) -> Result<u16> {
        self.read_array(field).map(u16::from_be_bytes)
    }

    /// Reads a big-endian u32.
    pub fn read_u32(&mut self, field: &'static str) -> Result<u32> {
        self.read_array(field).map(u32::from_be_bytes)
    }

    /// Reads a big-endian u64.
    pub fn read_u64(&mut self, field: &'static str) -> Result<u64> {
        self.read_array(field).map(u64::from_be_bytes)
    }
}
