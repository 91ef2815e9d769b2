//! Line pairing strategies for the unified and split views.

mod split;
mod unified;

pub use split::{build_side_by_side_lines, SideBySideLine};
pub use unified::{pair_chunk_lines, PairedLine};
