//! Left/right pairing for the split view.

use crate::model::{DiffChunk, DiffLine, LineKind};
use std::collections::VecDeque;

/// One row of the split view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SideBySideLine<'a> {
    /// Old side (removed or context line).
    pub left: Option<&'a DiffLine>,
    /// New side (added or context line).
    pub right: Option<&'a DiffLine>,
}

/// Build split-view rows for `chunk`.
///
/// Removes and adds are buffered and flushed pairwise before every context
/// line and at the end of the chunk, so a replace group is fully resolved
/// before the next unchanged line.
pub fn build_side_by_side_lines(chunk: &DiffChunk) -> Vec<SideBySideLine<'_>> {
    let mut rows = Vec::with_capacity(chunk.lines.len());
    let mut removes: VecDeque<&DiffLine> = VecDeque::new();
    let mut adds: VecDeque<&DiffLine> = VecDeque::new();

    for line in &chunk.lines {
        match line.kind {
            LineKind::Remove => removes.push_back(line),
            LineKind::Add => adds.push_back(line),
            LineKind::Context => {
                flush(&mut rows, &mut removes, &mut adds);
                rows.push(SideBySideLine {
                    left: Some(line),
                    right: Some(line),
                });
            }
        }
    }
    flush(&mut rows, &mut removes, &mut adds);

    rows
}

fn flush<'a>(
    rows: &mut Vec<SideBySideLine<'a>>,
    removes: &mut VecDeque<&'a DiffLine>,
    adds: &mut VecDeque<&'a DiffLine>,
) {
    while !removes.is_empty() || !adds.is_empty() {
        rows.push(SideBySideLine {
            left: removes.pop_front(),
            right: adds.pop_front(),
        });
    }
}
