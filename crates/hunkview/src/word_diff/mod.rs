//! Word-level diff between a removed line and its paired added line.
//!
//! Both lines are tokenized with [`tokenize`], aligned with a longest common
//! subsequence, and every token is classified as unchanged, removed or added.

mod tokenizer;

pub use tokenizer::tokenize;

use crate::model::{DiffToken, TokenKind};

/// Classified tokens for both sides of a replaced line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordDiff {
    /// Tokens of the old line (`Unchanged` or `Removed`).
    pub removed: Vec<DiffToken>,
    /// Tokens of the new line (`Unchanged` or `Added`).
    pub added: Vec<DiffToken>,
}

/// Compute the word diff of `old_text` against `new_text`.
pub fn compute_word_diff(old_text: &str, new_text: &str) -> WordDiff {
    diff_tokens(&tokenize(old_text), &tokenize(new_text))
}

/// Like [`compute_word_diff`], but gives up when the LCS table would exceed
/// `max_cells` entries.
pub fn compute_word_diff_bounded(
    old_text: &str,
    new_text: &str,
    max_cells: usize,
) -> Option<WordDiff> {
    let old_tokens = tokenize(old_text);
    let new_tokens = tokenize(new_text);
    let cells = old_tokens.len().saturating_mul(new_tokens.len());
    if cells > max_cells {
        log::trace!(
            "Skipping word diff: {} x {} tokens exceeds {} cells",
            old_tokens.len(),
            new_tokens.len(),
            max_cells
        );
        return None;
    }

    Some(diff_tokens(&old_tokens, &new_tokens))
}

fn diff_tokens(old_tokens: &[&str], new_tokens: &[&str]) -> WordDiff {
    let common = longest_common_subsequence(old_tokens, new_tokens);
    WordDiff {
        removed: classify(old_tokens, &common, TokenKind::Removed),
        added: classify(new_tokens, &common, TokenKind::Added),
    }
}

/// Walk `tokens` against the common subsequence; non-matches get `changed`.
fn classify(tokens: &[&str], common: &[&str], changed: TokenKind) -> Vec<DiffToken> {
    let mut cursor = 0;
    tokens
        .iter()
        .map(|&token| {
            if common.get(cursor) == Some(&token) {
                cursor += 1;
                DiffToken::new(token, TokenKind::Unchanged)
            } else {
                DiffToken::new(token, changed)
            }
        })
        .collect()
}

/// Build the LCS length table and backtrack it into the common tokens.
fn longest_common_subsequence<'a>(old: &[&'a str], new: &[&'a str]) -> Vec<&'a str> {
    let m = old.len();
    let n = new.len();
    if m == 0 || n == 0 {
        return Vec::new();
    }

    let mut table = vec![vec![0usize; n + 1]; m + 1];
    for i in 1..=m {
        for j in 1..=n {
            table[i][j] = if old[i - 1] == new[j - 1] {
                table[i - 1][j - 1] + 1
            } else {
                table[i - 1][j].max(table[i][j - 1])
            };
        }
    }

    let mut common = Vec::with_capacity(table[m][n]);
    let (mut i, mut j) = (m, n);
    while i > 0 && j > 0 {
        if old[i - 1] == new[j - 1] {
            common.push(old[i - 1]);
            i -= 1;
            j -= 1;
        } else if table[i - 1][j] >= table[i][j - 1] {
            i -= 1;
        } else {
            j -= 1;
        }
    }

    common.reverse();
    common
}
