//! # hunkview
//!
//! Diff model and rendering core for a git client: parses unified diff text
//! from `git diff`/`git show`, pairs removed and added lines for unified and
//! split views, highlights changed words within replaced lines, and expands
//! hidden context around chunks on demand.
//!
//! ## Design Principles
//!
//! The crate performs no I/O of its own. Parsing, pairing and word diff are
//! pure functions; the only external capability is a
//! [`FileContentProvider`] used by context expansion, whose failures are
//! swallowed because expansion is a cosmetic affordance.
//!
//! Expansion state is kept out of band in an [`ExpansionState`] owned by the
//! caller, so a parsed [`DiffFile`] stays an immutable snapshot.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use hunkview::{parse_unified_diff, unified_rows, ExpansionState, RenderOptions};
//!
//! let files = parse_unified_diff(&git_diff_stdout);
//! let mut expansion = ExpansionState::new();
//!
//! // Reveal 20 more lines above the first chunk
//! hunkview::expansion::expand_from_provider(
//!     &provider, "HEAD", &files[0], 0, ExpandDirection::Up, 20, &mut expansion,
//! ).await;
//!
//! for row in unified_rows(&files[0], &expansion, None, &RenderOptions::default()) {
//!     // draw the row
//! }
//! ```

pub mod expansion;
pub mod highlight;
pub mod model;
pub mod pairing;
pub mod parser;
pub mod render;
pub mod traits;
pub mod word_diff;

// Re-export commonly used types
pub use expansion::{ExpandedRange, ExpansionState, ExpansionTicket};
pub use highlight::{
    combine_spans, CombinedSpan, DiffHighlighter, HighlightedSpan, HighlighterService,
};
pub use model::{DiffChunk, DiffFile, DiffLine, DiffToken, ExpandDirection, LineKind, TokenKind};
pub use pairing::{build_side_by_side_lines, pair_chunk_lines, PairedLine, SideBySideLine};
pub use parser::parse_unified_diff;
pub use render::{split_rows, unified_rows, RenderOptions, SideCell, SplitRow, UnifiedRow};
pub use traits::{ContentError, FileContentProvider, NoOpContentProvider};
pub use word_diff::{compute_word_diff, WordDiff};
