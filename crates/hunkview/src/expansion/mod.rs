//! Incremental context expansion around diff chunks.
//!
//! Expanded lines live in a caller-owned [`ExpansionState`] keyed by file
//! path; the parsed [`DiffFile`](crate::model::DiffFile) is never mutated.
//! Fetching file content is the only fallible, asynchronous step and its
//! failures are swallowed here.

mod context;
mod state;

pub use context::{
    apply_expansion, expand, expand_from_provider, expand_lines, fetch_expansion,
    hidden_lines_after, hidden_lines_before, FetchedContent,
};
pub use state::{ExpandedRange, ExpansionState, ExpansionTicket};
