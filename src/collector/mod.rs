//! Access to capture files on disk.
//!
//! - `traits` — [`FileSystem`] seam and the real implementation
//! - `discovery` — finds capture files by name under a data directory

mod discovery;
mod traits;

#[cfg(test)]
pub mod mock;

pub use discovery::{CaptureKind, discover};
pub use traits::{FileSystem, RealFs};
