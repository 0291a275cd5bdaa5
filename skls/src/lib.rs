//! Reader for X-Ray engine `.skls` skeletal animation archives.
//!
//! The whole archive is loaded into memory and indexed once; individual animations are
//! decoded on demand.
//!
//! ```no_run
//! let archive = skls::ArchiveIndex::open("stalker_animation.skls")?;
//! for name in archive.names() {
//!     let animation = archive.get(name)?;
//!     println!("{name}: {} bones", animation.bones.len());
//! }
//! # Ok::<(), skls::Error>(())
//! ```

#![forbid(unsafe_code)]

mod archive;
mod codec;
mod cp1251;
mod cursor;
mod error;
mod model;
mod options;

pub use archive::*;
pub use codec::*;
pub use cursor::*;
pub use error::*;
pub use model::*;
pub use options::*;

#[cfg(test)]
mod test_support;
