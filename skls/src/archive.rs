//! Name → offset catalogue over a whole `.skls` archive.
//!
//! Layout: a `u32` animation count, then for each animation a NUL-terminated name followed by
//! its record. Building the catalogue walks every record once with
//! [`skip_animation`](crate::skip_animation); [`ArchiveIndex::get`] later decodes a single
//! record on demand from its cached offset.

use crate::{
    Animation, ByteCursor, Error, Mark, ReadOptions, Result, Terminator, decode_animation,
    decode_marks, skip_animation,
};
use std::collections::HashMap;
use std::path::Path;

#[derive(Clone, Debug)]
struct Entry {
    name: String,
    /// First byte after the name.
    offset: u64,
}

/// An archive held in memory together with its catalogue.
///
/// Immutable once built: every lookup uses its own cursor over the shared bytes, so an
/// `ArchiveIndex` can be read from several threads at once.
#[derive(Clone, Debug)]
pub struct ArchiveIndex {
    bytes: Vec<u8>,
    entries: Vec<Entry>,
    lookup: HashMap<String, usize>,
    options: ReadOptions,
}

impl ArchiveIndex {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_options(path, ReadOptions::default())
    }

    pub fn open_with_options(path: impl AsRef<Path>, options: ReadOptions) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes_with_options(bytes, options)
    }

    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        Self::from_bytes_with_options(bytes, ReadOptions::default())
    }

    /// Scans the archive and builds the catalogue. Any failure discards the whole index.
    pub fn from_bytes_with_options(
        bytes: impl Into<Vec<u8>>,
        options: ReadOptions,
    ) -> Result<Self> {
        let bytes = bytes.into();
        let mut input = ByteCursor::new(&bytes);

        let count = input.read_u32()?;
        log::debug!(
            "indexing {count} animation(s) in {} byte archive",
            bytes.len()
        );

        let mut entries: Vec<Entry> = Vec::new();
        let mut lookup: HashMap<String, usize> = HashMap::new();
        for _ in 0..count {
            let name = input.read_cstring(Terminator::Nul, options.text)?;
            let offset = input.tell();
            log::trace!("animation {name:?} at offset {offset}");

            match lookup.get(&name).copied() {
                Some(index) => {
                    let entry = &mut entries[index];
                    log::warn!(
                        "duplicate animation {name:?}: offset {} replaced by {offset}",
                        entry.offset
                    );
                    entry.offset = offset;
                }
                None => {
                    lookup.insert(name.clone(), entries.len());
                    entries.push(Entry { name, offset });
                }
            }

            skip_animation(&mut input)?;
        }

        if input.remaining() > 0 {
            log::debug!(
                "{} trailing byte(s) after the last animation",
                input.remaining()
            );
        }

        Ok(Self {
            bytes,
            entries,
            lookup,
            options,
        })
    }

    /// Number of distinct animation names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Catalogue names in first-seen order.
    pub fn names(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, u64)> + '_ {
        self.entries.iter().map(|e| (e.name.as_str(), e.offset))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup.contains_key(name)
    }

    /// Offset of the record for `name`, i.e. the first byte after the name.
    pub fn offset(&self, name: &str) -> Option<u64> {
        self.lookup.get(name).map(|&i| self.entries[i].offset)
    }

    pub fn options(&self) -> ReadOptions {
        self.options
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn record(&self, name: &str) -> Result<ByteCursor<'_>> {
        let offset = self.offset(name).ok_or_else(|| Error::NotFound {
            name: name.to_string(),
        })?;
        Ok(ByteCursor::at(&self.bytes, offset))
    }

    pub fn get(&self, name: &str) -> Result<Animation> {
        let mut input = self.record(name)?;
        decode_animation(&mut input, name, self.options)
    }

    /// Marks of the named animation; empty for records older than version 7.
    pub fn marks(&self, name: &str) -> Result<Vec<Mark>> {
        let mut input = self.record(name)?;
        decode_marks(&mut input, self.options)
    }
}
