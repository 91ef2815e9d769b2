//! Per-line render instructions for the unified and split views.
//!
//! Both views share one layout: for every chunk a hidden-lines marker,
//! lines expanded above it, the chunk header, the chunk body and lines
//! expanded below it, followed by a trailing marker after the last chunk.

mod split;
mod unified;

pub use split::{split_rows, SideCell, SplitRow};
pub use unified::{unified_rows, UnifiedRow};

use crate::expansion::{hidden_lines_after, hidden_lines_before, ExpansionState};
use crate::model::{DiffFile, DiffLine, DiffToken, ExpandDirection};
use crate::word_diff::{compute_word_diff_bounded, WordDiff};

/// Default upper bound for the word-diff LCS table of one line pair.
pub const DEFAULT_MAX_WORD_DIFF_CELLS: usize = 250_000;

/// Options shared by both views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Compute word-level tokens for replaced line pairs.
    pub word_diff: bool,
    /// Skip word diff for pairs whose LCS table would be larger.
    pub max_word_diff_cells: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            word_diff: true,
            max_word_diff_cells: DEFAULT_MAX_WORD_DIFF_CELLS,
        }
    }
}

impl RenderOptions {
    fn word_diff(&self, old: &str, new: &str) -> Option<WordDiff> {
        if !self.word_diff {
            return None;
        }
        compute_word_diff_bounded(old, new, self.max_word_diff_cells)
    }

    /// Tokens of the old side of a replaced pair.
    pub(crate) fn removed_tokens(&self, old: &str, new: &str) -> Option<Vec<DiffToken>> {
        self.word_diff(old, new).map(|d| d.removed)
    }

    /// Tokens of the new side of a replaced pair.
    pub(crate) fn added_tokens(&self, old: &str, new: &str) -> Option<Vec<DiffToken>> {
        self.word_diff(old, new).map(|d| d.added)
    }
}

/// Layout element shared by both views.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Segment<'a> {
    Hidden {
        chunk_index: usize,
        direction: ExpandDirection,
        lines: Option<u32>,
    },
    Expanded(&'a DiffLine),
    Header(usize),
    Body(usize),
}

pub(crate) fn layout<'a>(
    file: &'a DiffFile,
    state: &'a ExpansionState,
    file_len: Option<usize>,
) -> Vec<Segment<'a>> {
    let mut segments = Vec::new();

    for chunk_index in 0..file.chunks.len() {
        let hidden = hidden_lines_before(file, chunk_index, state);
        if hidden > 0 {
            segments.push(Segment::Hidden {
                chunk_index,
                direction: ExpandDirection::Up,
                lines: Some(hidden),
            });
        }

        // Later Up expansions sit above earlier ones.
        let up: Vec<_> = state
            .ranges_for(&file.path, chunk_index, ExpandDirection::Up)
            .collect();
        for range in up.into_iter().rev() {
            segments.extend(range.lines.iter().map(Segment::Expanded));
        }

        segments.push(Segment::Header(chunk_index));
        segments.push(Segment::Body(chunk_index));

        for range in state.ranges_for(&file.path, chunk_index, ExpandDirection::Down) {
            segments.extend(range.lines.iter().map(Segment::Expanded));
        }
    }

    if let Some(last) = file.chunks.len().checked_sub(1) {
        match hidden_lines_after(file, last, state, file_len) {
            Some(0) => {}
            lines => segments.push(Segment::Hidden {
                chunk_index: last,
                direction: ExpandDirection::Down,
                lines,
            }),
        }
    }

    segments
}
