use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unsupported animation format version {version} (minimum is 6)")]
    UnsupportedVersion { version: u16 },

    #[error("truncated data: need {needed} byte(s) at offset {offset}, {available} available")]
    TruncatedData {
        offset: u64,
        needed: u64,
        available: u64,
    },

    #[error("invalid windows-1251 byte 0x{byte:02x} in string at offset {offset}")]
    TextDecode { offset: u64, byte: u8 },

    #[error("unknown animation: {name}")]
    NotFound { name: String },

    #[error("failed to read archive '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
