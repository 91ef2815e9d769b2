//! Diff data structures produced by the unified diff parser.

/// All changes to one file in one diff invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffFile {
    /// File path taken from the new (`b/`) side of the header.
    pub path: String,
    /// Number of added lines across all chunks.
    pub additions: usize,
    /// Number of removed lines across all chunks.
    pub deletions: usize,
    /// Change chunks, ordered by ascending `new_start`.
    pub chunks: Vec<DiffChunk>,
}

impl DiffFile {
    /// Create an empty file diff.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            additions: 0,
            deletions: 0,
            chunks: Vec::new(),
        }
    }

    /// Recalculate line statistics from chunks.
    pub fn recalculate_stats(&mut self) {
        self.additions = self.lines_of(LineKind::Add);
        self.deletions = self.lines_of(LineKind::Remove);
    }

    fn lines_of(&self, kind: LineKind) -> usize {
        self.chunks
            .iter()
            .flat_map(|c| &c.lines)
            .filter(|l| l.kind == kind)
            .count()
    }

    /// Highest line number shown anywhere in the file's chunks.
    pub fn max_line_number(&self) -> u32 {
        self.chunks
            .iter()
            .flat_map(|c| c.lines.iter())
            .filter_map(|l| l.new_line_number.max(l.old_line_number))
            .max()
            .unwrap_or(1)
    }

    /// Width of the line number gutter.
    pub fn line_number_width(&self) -> usize {
        self.max_line_number().to_string().len().max(4)
    }
}

/// A contiguous region of changes bounded by an `@@` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffChunk {
    /// Old file starting line (1-based).
    pub old_start: u32,
    /// Number of lines spanned in the old version.
    pub old_lines: u32,
    /// New file starting line (1-based).
    pub new_start: u32,
    /// Number of lines spanned in the new version.
    pub new_lines: u32,
    /// Function context git prints after the closing `@@`, if any.
    pub section: Option<String>,
    /// Lines in this chunk.
    pub lines: Vec<DiffLine>,
}

impl DiffChunk {
    /// Create an empty chunk with the given header ranges.
    pub fn new(old_start: u32, old_lines: u32, new_start: u32, new_lines: u32) -> Self {
        Self {
            old_start,
            old_lines,
            new_start,
            new_lines,
            section: None,
            lines: Vec::new(),
        }
    }

    /// Canonical header text, e.g. `@@ -10,5 +10,7 @@ fn example()`.
    pub fn header(&self) -> String {
        match &self.section {
            Some(section) => format!(
                "@@ -{},{} +{},{} @@ {}",
                self.old_start, self.old_lines, self.new_start, self.new_lines, section
            ),
            None => format!(
                "@@ -{},{} +{},{} @@",
                self.old_start, self.old_lines, self.new_start, self.new_lines
            ),
        }
    }

    /// First new-side line number after this chunk.
    pub fn new_end(&self) -> u32 {
        self.new_start.saturating_add(self.new_lines)
    }

    /// Number of lines of the given kind.
    pub fn count(&self, kind: LineKind) -> usize {
        self.lines.iter().filter(|l| l.kind == kind).count()
    }
}

/// A single line in the diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    /// Line type.
    pub kind: LineKind,
    /// Line content (without the leading `+`/`-`/` `).
    pub content: String,
    /// Line number in the old file (Context and Remove).
    pub old_line_number: Option<u32>,
    /// Line number in the new file (Context and Add).
    pub new_line_number: Option<u32>,
}

impl DiffLine {
    /// Create a context line.
    pub fn context(content: impl Into<String>, old_line: u32, new_line: u32) -> Self {
        Self {
            kind: LineKind::Context,
            content: content.into(),
            old_line_number: Some(old_line),
            new_line_number: Some(new_line),
        }
    }

    /// Create an added line.
    pub fn add(content: impl Into<String>, new_line: u32) -> Self {
        Self {
            kind: LineKind::Add,
            content: content.into(),
            old_line_number: None,
            new_line_number: Some(new_line),
        }
    }

    /// Create a removed line.
    pub fn remove(content: impl Into<String>, old_line: u32) -> Self {
        Self {
            kind: LineKind::Remove,
            content: content.into(),
            old_line_number: Some(old_line),
            new_line_number: None,
        }
    }

    /// Line number to display (prefers the new side).
    pub fn display_line_number(&self) -> Option<u32> {
        self.new_line_number.or(self.old_line_number)
    }
}

/// Line type in the diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// Unchanged line.
    Context,
    /// Added line (`+`).
    Add,
    /// Removed line (`-`).
    Remove,
}

impl LineKind {
    /// Prefix character used in unified diff text.
    pub fn prefix(&self) -> char {
        match self {
            LineKind::Context => ' ',
            LineKind::Add => '+',
            LineKind::Remove => '-',
        }
    }
}

/// Direction of a context expansion relative to a chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpandDirection {
    /// Reveal lines above the chunk.
    Up,
    /// Reveal lines below the chunk.
    Down,
}
