//! Overlay word-diff classes on syntax-highlighted spans.

use super::highlighter::HighlightedSpan;
use crate::model::{DiffToken, TokenKind};
use ratatui::style::Color;

/// A span with exactly one syntax style and one word-diff class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinedSpan {
    pub text: String,
    pub fg: Option<Color>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub change: TokenKind,
}

impl CombinedSpan {
    fn same_style(&self, span: &HighlightedSpan, change: TokenKind) -> bool {
        self.fg == span.fg
            && self.bold == span.bold
            && self.italic == span.italic
            && self.underline == span.underline
            && self.change == change
    }
}

/// Combine syntax spans with word-diff tokens of the same line.
///
/// The two tokenizers segment the line independently, so spans are sliced
/// at every boundary of either segmentation. Adjacent pieces with the same
/// style and class are merged. Without `diff` tokens every piece is
/// `Unchanged`; if the two inputs disagree on the text, the rest of the line
/// is treated as unchanged.
pub fn combine_spans(syntax: &[HighlightedSpan], diff: &[DiffToken]) -> Vec<CombinedSpan> {
    let mut out: Vec<CombinedSpan> = Vec::with_capacity(syntax.len().max(diff.len()));
    let mut tokens = diff.iter();
    let mut token: Option<(&str, TokenKind)> = tokens.next().map(|t| (t.text.as_str(), t.kind));
    let mut diverged = false;

    for span in syntax {
        let mut rest = span.text.as_str();
        while !rest.is_empty() {
            while matches!(token, Some((text, _)) if text.is_empty()) {
                token = tokens.next().map(|t| (t.text.as_str(), t.kind));
            }

            let (take, change) = match token {
                Some((text, kind)) if !diverged => {
                    let len = rest.len().min(text.len());
                    if rest.as_bytes()[..len] == text.as_bytes()[..len] {
                        token = Some((&text[len..], kind));
                        (len, kind)
                    } else {
                        diverged = true;
                        (rest.len(), TokenKind::Unchanged)
                    }
                }
                _ => (rest.len(), TokenKind::Unchanged),
            };

            push_piece(&mut out, span, &rest[..take], change);
            rest = &rest[take..];
        }
    }

    out
}

fn push_piece(out: &mut Vec<CombinedSpan>, span: &HighlightedSpan, text: &str, change: TokenKind) {
    if let Some(last) = out.last_mut() {
        if last.same_style(span, change) {
            last.text.push_str(text);
            return;
        }
    }
    out.push(CombinedSpan {
        text: text.to_string(),
        fg: span.fg,
        bold: span.bold,
        italic: span.italic,
        underline: span.underline,
        change,
    });
}
