//! Pairing of removed and added lines for the unified view.

use crate::model::{DiffChunk, DiffLine, LineKind};

/// A chunk line with the content of its positional counterpart, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairedLine<'a> {
    pub line: &'a DiffLine,
    /// Content of the paired opposite-side line in a replace group.
    pub paired_content: Option<&'a str>,
}

impl<'a> PairedLine<'a> {
    fn unpaired(line: &'a DiffLine) -> Self {
        Self {
            line,
            paired_content: None,
        }
    }
}

/// Pair the lines of `chunk` for the unified view.
///
/// A run of removes followed directly by a run of adds forms a replace
/// group. Its lines are emitted interleaved (`remove[0]`, `add[0]`,
/// `remove[1]`, ...) and paired by position; lines past the shorter run stay
/// unpaired. Context lines and lone add runs pass through unpaired.
pub fn pair_chunk_lines(chunk: &DiffChunk) -> Vec<PairedLine<'_>> {
    let lines = &chunk.lines;
    let mut out = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        if lines[i].kind != LineKind::Remove {
            out.push(PairedLine::unpaired(&lines[i]));
            i += 1;
            continue;
        }

        let removes_end = run_end(lines, i, LineKind::Remove);
        let adds_end = run_end(lines, removes_end, LineKind::Add);
        let removes = &lines[i..removes_end];
        let adds = &lines[removes_end..adds_end];

        for idx in 0..removes.len().max(adds.len()) {
            let remove = removes.get(idx);
            let add = adds.get(idx);
            if let Some(remove) = remove {
                out.push(PairedLine {
                    line: remove,
                    paired_content: add.map(|a| a.content.as_str()),
                });
            }
            if let Some(add) = add {
                out.push(PairedLine {
                    line: add,
                    paired_content: remove.map(|r| r.content.as_str()),
                });
            }
        }

        i = adds_end;
    }

    out
}

fn run_end(lines: &[DiffLine], start: usize, kind: LineKind) -> usize {
    lines[start..]
        .iter()
        .position(|l| l.kind != kind)
        .map_or(lines.len(), |offset| start + offset)
}
