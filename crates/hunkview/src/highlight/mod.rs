//! Syntax highlighting and its combination with word-diff tokens.

mod combine;
mod highlighter;
mod service;

pub use combine::{combine_spans, CombinedSpan};
pub use highlighter::{DiffHighlighter, HighlightedSpan, DEFAULT_THEME};
pub use service::{HighlighterService, HighlighterState};
