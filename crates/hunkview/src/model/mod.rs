//! Data models for diff representation.

mod diff;
mod token;

pub use diff::{DiffChunk, DiffFile, DiffLine, ExpandDirection, LineKind};
pub use token::{DiffToken, TokenKind};
