//! Little-endian reader over an in-memory archive.
//!
//! Every read either consumes exactly the bytes it decodes or fails with
//! [`Error::TruncatedData`]; nothing panics on short input. [`ByteCursor::seek`] is the one
//! operation that does not validate, so a cursor may sit past the end until the next read.

use crate::{Error, Result, TextPolicy, cp1251};
use byteorder::{ByteOrder, LittleEndian};

/// Byte that ends a string field.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Terminator {
    Nul,
    LineFeed,
}

impl Terminator {
    pub fn byte(self) -> u8 {
        match self {
            Self::Nul => 0x00,
            Self::LineFeed => 0x0A,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ByteCursor<'a> {
    bytes: &'a [u8],
    cursor: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, cursor: 0 }
    }

    /// Cursor positioned at `offset`, e.g. a catalogued record start.
    pub fn at(bytes: &'a [u8], offset: u64) -> Self {
        let mut cursor = Self::new(bytes);
        cursor.seek(offset);
        cursor
    }

    /// Length of the whole underlying buffer.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.cursor)
    }

    pub fn tell(&self) -> u64 {
        self.cursor as u64
    }

    pub fn seek(&mut self, offset: u64) {
        self.cursor = usize::try_from(offset).unwrap_or(usize::MAX);
    }

    fn truncated(&self, needed: usize) -> Error {
        Error::TruncatedData {
            offset: self.tell(),
            needed: needed as u64,
            available: self.remaining() as u64,
        }
    }

    fn take(&mut self, count: usize) -> Result<&'a [u8]> {
        let bytes: &'a [u8] = self.bytes;
        let start = self.cursor;
        let Some(span) = start.checked_add(count).and_then(|end| bytes.get(start..end)) else {
            return Err(self.truncated(count));
        };
        self.cursor += count;
        Ok(span)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(LittleEndian::read_u16(self.take(2)?))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(LittleEndian::read_u32(self.take(4)?))
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(LittleEndian::read_f32(self.take(4)?))
    }

    /// Borrows `count` bytes straight out of the archive.
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        self.take(count)
    }

    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.take(count).map(|_| ())
    }

    /// Returns the raw string span (terminator excluded) and moves past the terminator.
    ///
    /// Callers that want their own fallback for undecodable names start here.
    pub fn read_cstring_bytes(&mut self, terminator: Terminator) -> Result<&'a [u8]> {
        let bytes: &'a [u8] = self.bytes;
        let rest = bytes.get(self.cursor..).unwrap_or_default();
        let Some(len) = rest.iter().position(|&b| b == terminator.byte()) else {
            return Err(self.truncated(rest.len() + 1));
        };
        let span = &rest[..len];
        self.cursor += len + 1;
        Ok(span)
    }

    pub fn skip_cstring(&mut self, terminator: Terminator) -> Result<()> {
        self.read_cstring_bytes(terminator).map(|_| ())
    }

    /// Reads a windows-1251 string.
    ///
    /// The cursor is past the terminator even when decoding fails under
    /// [`TextPolicy::Strict`], so the next field can still be read.
    pub fn read_cstring(&mut self, terminator: Terminator, policy: TextPolicy) -> Result<String> {
        let start = self.cursor;
        let raw = self.read_cstring_bytes(terminator)?;
        match policy {
            TextPolicy::Strict => cp1251::decode(raw).map_err(|i| Error::TextDecode {
                offset: (start + i) as u64,
                byte: raw[i],
            }),
            TextPolicy::Lossy => {
                let (text, replaced) = cp1251::decode_lossy(raw);
                if replaced > 0 {
                    log::warn!(
                        "replaced {replaced} undecodable byte(s) in string at offset {start}: {text:?}"
                    );
                }
                Ok(text)
            }
        }
    }
}
