//! Syntax highlighter using syntect.

use ratatui::style::Color;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, Style, Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};

/// Theme used when none (or an unknown one) is configured.
pub const DEFAULT_THEME: &str = "base16-ocean.dark";

const DEFAULT_MAX_CACHE: usize = 5000;

/// A syntax-highlighted span of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightedSpan {
    pub text: String,
    pub fg: Option<Color>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl HighlightedSpan {
    /// A span with no styling.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            fg: None,
            bold: false,
            italic: false,
            underline: false,
        }
    }

    /// A span with a foreground color.
    pub fn colored(text: impl Into<String>, fg: Color) -> Self {
        Self {
            fg: Some(fg),
            ..Self::plain(text)
        }
    }
}

/// Highlights single diff lines, caching results per (path, content).
pub struct DiffHighlighter {
    syntax_set: SyntaxSet,
    theme: Theme,
    cache: HashMap<u64, Vec<HighlightedSpan>>,
    max_cache_size: usize,
    /// Syntax index per lowercase file extension.
    syntax_by_extension: HashMap<String, usize>,
}

impl std::fmt::Debug for DiffHighlighter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiffHighlighter")
            .field("theme", &self.theme.name)
            .field("cache_size", &self.cache.len())
            .field("max_cache_size", &self.max_cache_size)
            .finish()
    }
}

impl Default for DiffHighlighter {
    fn default() -> Self {
        Self::new(DEFAULT_THEME)
    }
}

impl DiffHighlighter {
    /// Load the bundled syntaxes and the named theme.
    ///
    /// Unknown theme names fall back to [`DEFAULT_THEME`].
    pub fn new(theme_name: &str) -> Self {
        let mut themes = ThemeSet::load_defaults().themes;
        let theme = match themes.remove(theme_name) {
            Some(theme) => theme,
            None => {
                log::warn!("Unknown theme {:?}, using {}", theme_name, DEFAULT_THEME);
                themes.remove(DEFAULT_THEME).unwrap_or_default()
            }
        };

        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme,
            cache: HashMap::new(),
            max_cache_size: DEFAULT_MAX_CACHE,
            syntax_by_extension: HashMap::new(),
        }
    }

    /// Set the maximum cache size.
    pub fn with_max_cache(mut self, size: usize) -> Self {
        self.max_cache_size = size.max(1);
        self
    }

    /// Names of the bundled themes.
    pub fn theme_names() -> Vec<String> {
        let mut names: Vec<String> = ThemeSet::load_defaults().themes.into_keys().collect();
        names.sort();
        names
    }

    /// Highlight one line of `path`, returning styled spans that
    /// concatenate back to `content`.
    pub fn highlight_line(&mut self, path: &str, content: &str) -> Vec<HighlightedSpan> {
        let key = cache_key(path, content);
        if let Some(spans) = self.cache.get(&key) {
            return spans.clone();
        }

        let syntax_idx = self.syntax_index(path);
        let syntax = self
            .syntax_set
            .syntaxes()
            .get(syntax_idx)
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());
        let spans = self.highlight_with_syntax(syntax, content);

        if self.cache.len() >= self.max_cache_size {
            let to_remove = (self.max_cache_size / 5).max(1);
            let keys: Vec<_> = self.cache.keys().take(to_remove).copied().collect();
            for key in keys {
                self.cache.remove(&key);
            }
        }
        self.cache.insert(key, spans.clone());

        spans
    }

    fn syntax_index(&mut self, path: &str) -> usize {
        let ext = std::path::Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        if let Some(&idx) = self.syntax_by_extension.get(&ext) {
            return idx;
        }

        let syntax = self
            .syntax_set
            .find_syntax_by_extension(&ext)
            .or_else(|| self.syntax_set.find_syntax_for_file(path).ok().flatten())
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());
        let idx = self
            .syntax_set
            .syntaxes()
            .iter()
            .position(|s| s.name == syntax.name)
            .unwrap_or(0);

        self.syntax_by_extension.insert(ext, idx);
        idx
    }

    fn highlight_with_syntax(&self, syntax: &SyntaxReference, content: &str) -> Vec<HighlightedSpan> {
        let mut lines = HighlightLines::new(syntax, &self.theme);
        match lines.highlight_line(content, &self.syntax_set) {
            Ok(ranges) => ranges
                .into_iter()
                .filter(|(_, text)| !text.is_empty())
                .map(|(style, text)| to_span(style, text))
                .collect(),
            Err(err) => {
                log::trace!("Highlighting failed, using plain text: {}", err);
                vec![HighlightedSpan::plain(content)]
            }
        }
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

fn cache_key(path: &str, content: &str) -> u64 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    path.hash(&mut hasher);
    content.hash(&mut hasher);
    hasher.finish()
}

fn to_span(style: Style, text: &str) -> HighlightedSpan {
    HighlightedSpan {
        text: text.to_string(),
        fg: Some(Color::Rgb(
            style.foreground.r,
            style.foreground.g,
            style.foreground.b,
        )),
        bold: style.font_style.contains(FontStyle::BOLD),
        italic: style.font_style.contains(FontStyle::ITALIC),
        underline: style.font_style.contains(FontStyle::UNDERLINE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined(spans: &[HighlightedSpan]) -> String {
        spans.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn test_highlight_rust_code() {
        let mut highlighter = DiffHighlighter::default();
        let spans = highlighter.highlight_line("test.rs", "fn main() {}");

        assert!(spans.len() > 1);
        assert_eq!(joined(&spans), "fn main() {}");
    }

    #[test]
    fn test_cache() {
        let mut highlighter = DiffHighlighter::default();

        let _ = highlighter.highlight_line("test.rs", "let x = 1;");
        assert_eq!(highlighter.cache_size(), 1);

        let _ = highlighter.highlight_line("test.rs", "let x = 1;");
        assert_eq!(highlighter.cache_size(), 1);

        let _ = highlighter.highlight_line("test.rs", "let y = 2;");
        assert_eq!(highlighter.cache_size(), 2);
    }

    #[test]
    fn test_cache_eviction() {
        let mut highlighter = DiffHighlighter::default().with_max_cache(10);
        for i in 0..15 {
            highlighter.highlight_line("test.rs", &format!("line {}", i));
        }
        assert!(highlighter.cache_size() <= 10);
    }

    #[test]
    fn test_plain_text_fallback() {
        let mut highlighter = DiffHighlighter::default();
        let spans = highlighter.highlight_line("unknown.xyz", "some content");
        assert_eq!(joined(&spans), "some content");
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        let highlighter = DiffHighlighter::new("no-such-theme");
        let expected = ThemeSet::load_defaults().themes[DEFAULT_THEME].name.clone();
        assert_eq!(highlighter.theme.name, expected);
        assert!(DiffHighlighter::theme_names().contains(&DEFAULT_THEME.to_string()));
    }
}
