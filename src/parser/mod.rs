//! Line-oriented parsers for the two capture kinds.
//!
//! These are pure functions over file content, so they are tested with
//! string inputs; reading files is left to [`crate::merge`].

mod threaddump;
pub mod timestamp;
mod top;

pub use threaddump::parse_threaddump;
pub use timestamp::{DEFAULT_DATETIME_FORMAT, DEFAULT_DATETIME_REGEX, TimestampMatcher};
pub use top::parse_top;
