//! Split (side-by-side) view rows.

use super::{layout, RenderOptions, Segment};
use crate::expansion::ExpansionState;
use crate::model::{DiffFile, DiffLine, DiffToken, ExpandDirection, LineKind};
use crate::pairing::build_side_by_side_lines;

/// One side of a split row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideCell<'a> {
    pub line: &'a DiffLine,
    pub tokens: Option<Vec<DiffToken>>,
    pub expanded: bool,
}

impl<'a> SideCell<'a> {
    fn plain(line: &'a DiffLine, expanded: bool) -> Self {
        Self {
            line,
            tokens: None,
            expanded,
        }
    }
}

/// One row of the split view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitRow<'a> {
    Hidden {
        chunk_index: usize,
        direction: ExpandDirection,
        lines: Option<u32>,
    },
    ChunkHeader {
        chunk_index: usize,
        header: String,
    },
    Pair {
        left: Option<SideCell<'a>>,
        right: Option<SideCell<'a>>,
    },
}

/// Build the split view of `file` with its expanded context merged in.
pub fn split_rows<'a>(
    file: &'a DiffFile,
    state: &'a ExpansionState,
    file_len: Option<usize>,
    options: &RenderOptions,
) -> Vec<SplitRow<'a>> {
    let mut rows = Vec::new();

    for segment in layout(file, state, file_len) {
        match segment {
            Segment::Hidden {
                chunk_index,
                direction,
                lines,
            } => rows.push(SplitRow::Hidden {
                chunk_index,
                direction,
                lines,
            }),
            Segment::Expanded(line) => rows.push(SplitRow::Pair {
                left: Some(SideCell::plain(line, true)),
                right: Some(SideCell::plain(line, true)),
            }),
            Segment::Header(chunk_index) => rows.push(SplitRow::ChunkHeader {
                chunk_index,
                header: file.chunks[chunk_index].header(),
            }),
            Segment::Body(chunk_index) => {
                for pair in build_side_by_side_lines(&file.chunks[chunk_index]) {
                    let mut left = pair.left.map(|l| SideCell::plain(l, false));
                    let mut right = pair.right.map(|r| SideCell::plain(r, false));

                    if let (Some(l), Some(r)) = (left.as_mut(), right.as_mut()) {
                        if l.line.kind == LineKind::Remove && r.line.kind == LineKind::Add {
                            l.tokens = options.removed_tokens(&l.line.content, &r.line.content);
                            r.tokens = options.added_tokens(&l.line.content, &r.line.content);
                        }
                    }

                    rows.push(SplitRow::Pair { left, right });
                }
            }
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expansion::expand;
    use crate::model::TokenKind;
    use crate::parser::parse_unified_diff;

    #[test]
    fn test_split_rows_with_tokens_and_expansion() {
        let raw = "diff --git a/f.rs b/f.rs\n@@ -2,2 +2,3 @@\n-foo(a)\n+foo(b)\n+bar()\n x\n";
        let file = &parse_unified_diff(raw)[0];
        let content: Vec<String> = vec!["head".into(), "foo(b)".into(), "bar()".into(), "x".into()];
        let mut state = ExpansionState::new();
        expand(file, 0, ExpandDirection::Up, 5, &content, &mut state);

        let rows = split_rows(file, &state, None, &RenderOptions::default());
        assert_eq!(rows.len(), 5);

        let SplitRow::Pair { left, right } = &rows[0] else {
            panic!("expected expanded pair");
        };
        assert_eq!(left.as_ref().unwrap().line.content, "head");
        assert!(right.as_ref().unwrap().expanded);

        assert!(matches!(rows[1], SplitRow::ChunkHeader { chunk_index: 0, .. }));

        let SplitRow::Pair { left, right } = &rows[2] else {
            panic!("expected replace pair");
        };
        let removed = left.as_ref().unwrap().tokens.as_ref().unwrap();
        let added = right.as_ref().unwrap().tokens.as_ref().unwrap();
        assert!(removed
            .iter()
            .any(|t| t.kind == TokenKind::Removed && t.text == "a"));
        assert!(added
            .iter()
            .any(|t| t.kind == TokenKind::Added && t.text == "b"));

        let SplitRow::Pair { left, right } = &rows[3] else {
            panic!("expected right-only row");
        };
        assert!(left.is_none());
        assert!(right.as_ref().unwrap().tokens.is_none());

        assert!(matches!(&rows[4], SplitRow::Pair { left: Some(l), right: Some(_) } if l.line.content == "x"));
    }
}
