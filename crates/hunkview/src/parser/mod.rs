//! Diff text parsers.

mod unified;

pub use unified::parse_unified_diff;
