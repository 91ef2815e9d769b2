//! Terminal output of unified and split rows.
//!
//! With colors on, lines are syntax highlighted and changed words get a
//! stronger background than their line. Without colors, changed words are
//! wrapped in `[-...-]` and `{+...+}`.

use hunkview::{
    combine_spans, CombinedSpan, DiffFile, DiffLine, DiffToken, ExpandDirection, HighlightedSpan,
    HighlighterService, LineKind, SideCell, SplitRow, TokenKind, UnifiedRow,
};
use ratatui::crossterm::style::{
    Attribute, Color as TermColor, ContentStyle, StyledContent, Stylize,
};
use ratatui::style::Color;
use std::fmt::{Display, Write};

const REMOVED_LINE_BG: Color = Color::Rgb(60, 30, 30);
const ADDED_LINE_BG: Color = Color::Rgb(30, 60, 30);
const REMOVED_WORD_BG: Color = Color::Rgb(130, 40, 40);
const ADDED_WORD_BG: Color = Color::Rgb(40, 110, 40);
const EXPANDED_FG: Color = Color::DarkGray;
const HEADER_FG: Color = Color::Cyan;

/// Writes rows of one file to a string buffer.
pub struct Printer<'a> {
    highlighter: Option<&'a HighlighterService>,
    color: bool,
    gutter: usize,
}

impl<'a> Printer<'a> {
    pub fn new(highlighter: Option<&'a HighlighterService>, color: bool, file: &DiffFile) -> Self {
        Self {
            highlighter,
            color,
            gutter: file.line_number_width(),
        }
    }

    /// Header line naming the file and its change counts.
    pub fn file_header(&self, out: &mut String, file: &DiffFile) {
        let text = format!("── {} (+{} -{}) ──", file.path, file.additions, file.deletions);
        if self.color {
            let _ = writeln!(out, "{}", paint(text, None, None).attribute(Attribute::Bold));
        } else {
            let _ = writeln!(out, "{}", text);
        }
    }

    pub fn unified(&self, out: &mut String, path: &str, rows: &[UnifiedRow<'_>]) {
        for row in rows {
            match row {
                UnifiedRow::Hidden {
                    direction, lines, ..
                } => self.marker(out, *direction, *lines),
                UnifiedRow::ChunkHeader { header, .. } => self.chunk_header(out, header),
                UnifiedRow::Line {
                    line,
                    tokens,
                    expanded,
                } => {
                    let gutter = format!(
                        "{} {} {} ",
                        number_str(line.old_line_number, self.gutter),
                        number_str(line.new_line_number, self.gutter),
                        line.kind.prefix()
                    );
                    let body = self.line_body(path, line, tokens.as_deref(), *expanded, None);
                    let gutter = self.paint_gutter(&gutter, line, *expanded);
                    let _ = writeln!(out, "{}{}", gutter, body);
                }
            }
        }
    }

    /// Print split rows, each side `width / 2` columns wide.
    pub fn split(&self, out: &mut String, path: &str, rows: &[SplitRow<'_>], width: usize) {
        let column = (width / 2).saturating_sub(self.gutter + 4).max(8);

        for row in rows {
            match row {
                SplitRow::Hidden {
                    direction, lines, ..
                } => self.marker(out, *direction, *lines),
                SplitRow::ChunkHeader { header, .. } => self.chunk_header(out, header),
                SplitRow::Pair { left, right } => {
                    let left = self.side(path, left.as_ref(), Side::Old, Some(column));
                    let right = self.side(path, right.as_ref(), Side::New, None);
                    let _ = writeln!(out, "{} │ {}", left, right);
                }
            }
        }
    }

    fn side(
        &self,
        path: &str,
        cell: Option<&SideCell<'_>>,
        side: Side,
        width: Option<usize>,
    ) -> String {
        let Some(cell) = cell else {
            return " ".repeat(self.gutter + 3 + width.unwrap_or(0));
        };
        let number = match side {
            Side::Old => cell.line.old_line_number,
            Side::New => cell.line.new_line_number,
        };
        let gutter = format!("{} {} ", number_str(number, self.gutter), cell.line.kind.prefix());
        let body = self.line_body(path, cell.line, cell.tokens.as_deref(), cell.expanded, width);
        format!("{}{}", self.paint_gutter(&gutter, cell.line, cell.expanded), body)
    }

    fn marker(&self, out: &mut String, direction: ExpandDirection, lines: Option<u32>) {
        let arrow = match direction {
            ExpandDirection::Up => '↑',
            ExpandDirection::Down => '↓',
        };
        let text = match lines {
            Some(1) => format!("{arrow} ... 1 hidden line ..."),
            Some(n) => format!("{arrow} ... {n} hidden lines ..."),
            None => format!("{arrow} ... more lines ..."),
        };
        if self.color {
            let _ = writeln!(out, "{}", paint(text, Some(EXPANDED_FG), None));
        } else {
            let _ = writeln!(out, "{}", text);
        }
    }

    fn chunk_header(&self, out: &mut String, header: &str) {
        if self.color {
            let _ = writeln!(out, "{}", paint(header, Some(HEADER_FG), None));
        } else {
            let _ = writeln!(out, "{}", header);
        }
    }

    fn paint_gutter(&self, gutter: &str, line: &DiffLine, expanded: bool) -> String {
        if !self.color {
            return gutter.to_string();
        }
        let color = match (expanded, line.kind) {
            (true, _) | (false, LineKind::Context) => EXPANDED_FG,
            (false, LineKind::Add) => Color::Green,
            (false, LineKind::Remove) => Color::Red,
        };
        paint(gutter, Some(color), None).to_string()
    }

    fn line_body(
        &self,
        path: &str,
        line: &DiffLine,
        tokens: Option<&[DiffToken]>,
        expanded: bool,
        width: Option<usize>,
    ) -> String {
        let whole;
        let tokens = match tokens {
            Some(tokens) => tokens,
            None => {
                whole = [DiffToken::new(line.content.as_str(), TokenKind::Unchanged)];
                &whole[..]
            }
        };

        if !self.color {
            return plain_body(tokens, width);
        }

        let syntax = self
            .highlighter
            .and_then(|h| h.with_highlighter(|h| h.highlight_line(path, &line.content)))
            .unwrap_or_else(|| vec![HighlightedSpan::plain(line.content.as_str())]);
        let spans = combine_spans(&syntax, tokens);
        colored_body(&spans, line.kind, expanded, width)
    }
}

#[derive(Debug, Clone, Copy)]
enum Side {
    Old,
    New,
}

fn number_str(n: Option<u32>, width: usize) -> String {
    match n {
        Some(n) => format!("{:>width$}", n, width = width),
        None => " ".repeat(width),
    }
}

/// Text with change markers, truncated and padded to `width` characters.
pub fn plain_body(tokens: &[DiffToken], width: Option<usize>) -> String {
    let mut text = String::new();
    for token in tokens {
        match token.kind {
            TokenKind::Unchanged => text.push_str(&token.text),
            TokenKind::Removed => {
                let _ = write!(text, "[-{}-]", token.text);
            }
            TokenKind::Added => {
                let _ = write!(text, "{{+{}+}}", token.text);
            }
        }
    }
    fit(&text, width)
}

fn fit(text: &str, width: Option<usize>) -> String {
    let Some(width) = width else {
        return text.to_string();
    };
    let mut fitted: String = text.chars().take(width).collect();
    let used = fitted.chars().count();
    fitted.extend(std::iter::repeat(' ').take(width - used));
    fitted
}

fn colored_body(
    spans: &[CombinedSpan],
    kind: LineKind,
    expanded: bool,
    width: Option<usize>,
) -> String {
    let line_bg = match (expanded, kind) {
        (false, LineKind::Remove) => Some(REMOVED_LINE_BG),
        (false, LineKind::Add) => Some(ADDED_LINE_BG),
        _ => None,
    };

    let mut out = String::new();
    let mut remaining = width.unwrap_or(usize::MAX);

    for span in spans {
        if remaining == 0 {
            break;
        }
        let text: String = span.text.chars().take(remaining).collect();
        remaining -= text.chars().count();

        let bg_color = match span.change {
            TokenKind::Removed => Some(REMOVED_WORD_BG),
            TokenKind::Added => Some(ADDED_WORD_BG),
            TokenKind::Unchanged => line_bg,
        };
        let fg_color = if expanded { Some(EXPANDED_FG) } else { span.fg };

        let mut styled = paint(text, fg_color, bg_color);
        if span.bold {
            styled = styled.attribute(Attribute::Bold);
        }
        if span.italic {
            styled = styled.attribute(Attribute::Italic);
        }
        if span.underline {
            styled = styled.attribute(Attribute::Underlined);
        }
        let _ = write!(out, "{}", styled);
    }

    if width.is_some() && remaining > 0 {
        let _ = write!(out, "{}", paint(" ".repeat(remaining), None, line_bg));
    }
    out
}

/// Style `content` with optional ratatui colors for the terminal.
fn paint<D: Display>(content: D, fg: Option<Color>, bg: Option<Color>) -> StyledContent<D> {
    let mut styled = StyledContent::new(ContentStyle::new(), content);
    if let Some(color) = fg {
        styled = styled.with(TermColor::from(color));
    }
    if let Some(color) = bg {
        styled = styled.on(TermColor::from(color));
    }
    styled
}

#[cfg(test)]
mod tests {
    use super::*;
    use hunkview::{parse_unified_diff, unified_rows, ExpansionState, RenderOptions};

    const DIFF: &str = "diff --git a/x.txt b/x.txt\n\
                        @@ -1,2 +1,2 @@\n\
                        -let a = 1;\n\
                        +let a = 2;\n \
                        tail\n";

    #[test]
    fn test_plain_body_markers() {
        let tokens = vec![
            DiffToken::new("a = ", TokenKind::Unchanged),
            DiffToken::new("1", TokenKind::Removed),
            DiffToken::new("2", TokenKind::Added),
        ];
        assert_eq!(plain_body(&tokens, None), "a = [-1-]{+2+}");
        assert_eq!(plain_body(&tokens, Some(3)), "a =");
        assert_eq!(plain_body(&tokens[..1], Some(6)), "a =   ");
    }

    #[test]
    fn test_paint_maps_ratatui_colors() {
        let out = paint("x", Some(Color::Rgb(1, 2, 3)), Some(Color::Indexed(7))).to_string();
        assert!(out.contains("38;2;1;2;3"));
        assert!(out.contains("48;5;7"));
        assert!(out.contains('x'));

        assert_eq!(paint("x", None, None).to_string(), "x");
    }

    #[test]
    fn test_unified_plain_output() {
        let files = parse_unified_diff(DIFF);
        let file = &files[0];
        let state = ExpansionState::new();
        let rows = unified_rows(file, &state, Some(2), &RenderOptions::default());

        let printer = Printer::new(None, false, file);
        let mut out = String::new();
        printer.unified(&mut out, &file.path, &rows);

        assert_eq!(
            out,
            concat!(
                "@@ -1,2 +1,2 @@\n",
                "   1      - let a = [-1-];\n",
                "        1 + let a = {+2+};\n",
                "   2    2   tail\n",
            )
        );
    }

    #[test]
    fn test_colored_body_marks_changed_words() {
        let spans = combine_spans(
            &[HighlightedSpan::plain("ab")],
            &[
                DiffToken::new("a", TokenKind::Unchanged),
                DiffToken::new("b", TokenKind::Added),
            ],
        );
        let out = colored_body(&spans, LineKind::Add, false, None);
        assert!(out.contains("48;2;40;110;40"));
        assert!(out.contains("48;2;30;60;30"));
        assert!(out.find('a') < out.find('b'));
    }

    #[test]
    fn test_colored_body_pads_to_width() {
        let spans = vec![CombinedSpan {
            text: "abcdef".to_string(),
            fg: None,
            bold: true,
            italic: false,
            underline: false,
            change: TokenKind::Unchanged,
        }];
        let out = colored_body(&spans, LineKind::Context, true, Some(4));
        assert!(out.contains("abcd"));
        assert!(!out.contains('e'));

        let out = colored_body(&spans, LineKind::Remove, false, Some(8));
        assert!(out.contains("abcdef"));
        assert!(out.contains("48;2;60;30;30"));
    }
}
