//! Byte-level reading shared by both container variants.

use crate::error::{ContainerError, ContainerResult};

pub struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Consume `magic`, or fail with `InvalidMagic` without reading further.
    pub fn expect_magic(&mut self, magic: &'static [u8], label: &'static str) -> ContainerResult<()> {
        if !self.bytes[self.pos..].starts_with(magic) {
            return Err(ContainerError::InvalidMagic { expected: label });
        }
        self.pos += magic.len();
        Ok(())
    }

    pub fn take(&mut self, len: usize, what: &'static str) -> ContainerResult<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.bytes.len())
            .ok_or(ContainerError::Truncated(what))?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    pub fn u32_be(&mut self, what: &'static str) -> ContainerResult<u32> {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(self.take(4, what)?);
        Ok(u32::from_be_bytes(buf))
    }

    pub fn version(&mut self, expected: u32) -> ContainerResult<u32> {
        let found = self.u32_be("version")?;
        if found != expected {
            return Err(ContainerError::UnsupportedVersion { found, expected });
        }
        Ok(found)
    }

    pub fn rest(&mut self) -> &'a [u8] {
        let rest = &self.bytes[self.pos..];
        self.pos = self.bytes.len();
        rest
    }
}
