//! Word-level diff tokens.

/// Classification of a word-diff token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Present on both sides.
    Unchanged,
    /// Only in the old line.
    Removed,
    /// Only in the new line.
    Added,
}

/// A classified token of a replaced line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffToken {
    pub text: String,
    pub kind: TokenKind,
}

impl DiffToken {
    pub fn new(text: impl Into<String>, kind: TokenKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    pub fn is_changed(&self) -> bool {
        self.kind != TokenKind::Unchanged
    }
}
