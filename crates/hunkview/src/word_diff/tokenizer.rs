//! Split a line into word-diff tokens.

#[derive(Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Word,
    Space,
    Other,
}

fn classify(c: char) -> CharClass {
    if c.is_alphanumeric() || c == '_' {
        CharClass::Word
    } else if c.is_whitespace() {
        CharClass::Space
    } else {
        CharClass::Other
    }
}

/// Tokenize `text` into word runs, whitespace runs and single other chars.
///
/// Word runs are Unicode letters, digits and `_` (`char::is_alphanumeric`),
/// so `größe` is one token rather than splitting at each non-ASCII letter.
/// Tokens borrow from `text` and concatenate back to it.
pub fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut prev: Option<CharClass> = None;

    for (idx, c) in text.char_indices() {
        let class = classify(c);
        let boundary = match prev {
            None => false,
            Some(CharClass::Other) => true,
            Some(p) => p != class,
        };
        if boundary {
            tokens.push(&text[start..idx]);
            start = idx;
        }
        prev = Some(class);
    }

    if start < text.len() {
        tokens.push(&text[start..]);
    }
    tokens
}
