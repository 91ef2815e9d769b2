//! Unified view rows.

use super::{layout, RenderOptions, Segment};
use crate::expansion::ExpansionState;
use crate::model::{DiffFile, DiffLine, DiffToken, ExpandDirection, LineKind};
use crate::pairing::pair_chunk_lines;

/// One row of the unified view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnifiedRow<'a> {
    /// Collapsed lines that can be expanded; `None` when the count is unknown.
    Hidden {
        chunk_index: usize,
        direction: ExpandDirection,
        lines: Option<u32>,
    },
    /// The `@@` header of a chunk.
    ChunkHeader { chunk_index: usize, header: String },
    /// A diff line; `tokens` is set for lines of a replaced pair.
    Line {
        line: &'a DiffLine,
        tokens: Option<Vec<DiffToken>>,
        expanded: bool,
    },
}

/// Build the unified view of `file` with its expanded context merged in.
pub fn unified_rows<'a>(
    file: &'a DiffFile,
    state: &'a ExpansionState,
    file_len: Option<usize>,
    options: &RenderOptions,
) -> Vec<UnifiedRow<'a>> {
    let mut rows = Vec::new();

    for segment in layout(file, state, file_len) {
        match segment {
            Segment::Hidden {
                chunk_index,
                direction,
                lines,
            } => rows.push(UnifiedRow::Hidden {
                chunk_index,
                direction,
                lines,
            }),
            Segment::Expanded(line) => rows.push(UnifiedRow::Line {
                line,
                tokens: None,
                expanded: true,
            }),
            Segment::Header(chunk_index) => rows.push(UnifiedRow::ChunkHeader {
                chunk_index,
                header: file.chunks[chunk_index].header(),
            }),
            Segment::Body(chunk_index) => {
                for paired in pair_chunk_lines(&file.chunks[chunk_index]) {
                    let line = paired.line;
                    let tokens = paired.paired_content.and_then(|other| match line.kind {
                        LineKind::Remove => options.removed_tokens(&line.content, other),
                        LineKind::Add => options.added_tokens(other, &line.content),
                        LineKind::Context => None,
                    });
                    rows.push(UnifiedRow::Line {
                        line,
                        tokens,
                        expanded: false,
                    });
                }
            }
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TokenKind;
    use crate::parser::parse_unified_diff;

    const DIFF: &str = "diff --git a/x.txt b/x.txt\n\
                        --- a/x.txt\n\
                        +++ b/x.txt\n\
                        @@ -3,3 +3,3 @@\n \
                        keep\n\
                        -let a = 1;\n\
                        +let b = 1;\n \
                        tail\n";

    #[test]
    fn test_rows_with_word_tokens() {
        let file = &parse_unified_diff(DIFF)[0];
        let state = ExpansionState::new();
        let rows = unified_rows(file, &state, Some(5), &RenderOptions::default());

        assert_eq!(rows.len(), 6);
        assert_eq!(
            rows[0],
            UnifiedRow::Hidden {
                chunk_index: 0,
                direction: ExpandDirection::Up,
                lines: Some(2),
            }
        );
        assert!(matches!(&rows[1], UnifiedRow::ChunkHeader { header, .. } if header == "@@ -3,3 +3,3 @@"));

        let UnifiedRow::Line { line, tokens, .. } = &rows[3] else {
            panic!("expected a line row");
        };
        assert_eq!(line.kind, LineKind::Remove);
        let changed: Vec<_> = tokens
            .as_ref()
            .unwrap()
            .iter()
            .filter(|t| t.kind == TokenKind::Removed)
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(changed, vec!["a"]);

        let UnifiedRow::Line { tokens, .. } = &rows[2] else {
            panic!("expected a line row");
        };
        assert!(tokens.is_none());
    }

    #[test]
    fn test_word_diff_disabled() {
        let file = &parse_unified_diff(DIFF)[0];
        let state = ExpansionState::new();
        let options = RenderOptions {
            word_diff: false,
            ..RenderOptions::default()
        };
        let rows = unified_rows(file, &state, Some(5), &options);
        assert!(rows
            .iter()
            .all(|r| !matches!(r, UnifiedRow::Line { tokens: Some(_), .. })));
    }
}
