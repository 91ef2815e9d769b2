//! Parse unified diff format (as printed by `git diff` / `git show`).

use crate::model::{DiffChunk, DiffFile, DiffLine, LineKind};
use regex::Regex;
use std::sync::OnceLock;

fn file_header_regex() -> &'static Regex {
    static FILE_HEADER: OnceLock<Regex> = OnceLock::new();
    FILE_HEADER.get_or_init(|| Regex::new(r"(?m)^diff --git ").unwrap())
}

fn path_pair_regex() -> &'static Regex {
    static PATH_PAIR: OnceLock<Regex> = OnceLock::new();
    PATH_PAIR.get_or_init(|| Regex::new(r"a/(.+?) b/(.+)$").unwrap())
}

fn chunk_header_regex() -> &'static Regex {
    static CHUNK_HEADER: OnceLock<Regex> = OnceLock::new();
    CHUNK_HEADER.get_or_init(|| {
        Regex::new(r"^@@ -(\d+)(?:,(\d+))? \+(\d+)(?:,(\d+))? @@ ?(.*)$").unwrap()
    })
}

/// Parse the output of a unified-diff producing git command.
///
/// Never fails: blocks that cannot be understood are skipped and malformed
/// lines are ignored, so a single broken block never blanks the whole diff.
///
/// # Example
/// ```
/// let files = hunkview::parse_unified_diff("diff --git a/x b/x\n@@ -1 +1 @@\n-a\n+b\n");
/// assert_eq!(files[0].path, "x");
/// assert_eq!(files[0].additions, 1);
/// ```
pub fn parse_unified_diff(raw: &str) -> Vec<DiffFile> {
    if raw.trim().is_empty() {
        return Vec::new();
    }

    let starts: Vec<usize> = file_header_regex()
        .find_iter(raw)
        .map(|m| m.start())
        .collect();

    let mut files = Vec::with_capacity(starts.len());
    for (i, &start) in starts.iter().enumerate() {
        let end = starts.get(i + 1).copied().unwrap_or(raw.len());
        match parse_file_block(&raw[start..end]) {
            Some(file) => files.push(file),
            None => log::debug!(
                "Skipping diff block without path pair: {:?}",
                raw[start..end].lines().next().unwrap_or_default()
            ),
        }
    }

    files
}

fn parse_file_block(block: &str) -> Option<DiffFile> {
    let mut lines = block.lines().map(|l| l.strip_suffix('\r').unwrap_or(l));
    let header = lines.next()?;
    let captures = path_pair_regex().captures(header)?;
    let path = captures.get(2)?.as_str();

    let mut file = DiffFile::new(path);
    let mut current: Option<ChunkBuilder> = None;

    for line in lines {
        if line.starts_with("@@") {
            if let Some(done) = current.take() {
                file.chunks.push(done.chunk);
            }
            current = parse_chunk_header(line).map(ChunkBuilder::new);
            if current.is_none() {
                log::debug!("Skipping chunk with unusable header: {:?}", line);
            }
            continue;
        }

        let Some(builder) = current.as_mut() else {
            continue;
        };

        if let Some(content) = line.strip_prefix('+') {
            if !line.starts_with("+++") {
                builder.push(LineKind::Add, content);
                file.additions += 1;
            }
        } else if let Some(content) = line.strip_prefix('-') {
            if !line.starts_with("---") {
                builder.push(LineKind::Remove, content);
                file.deletions += 1;
            }
        } else if let Some(content) = line.strip_prefix(' ') {
            builder.push(LineKind::Context, content);
        }
    }

    if let Some(done) = current {
        file.chunks.push(done.chunk);
    }

    Some(file)
}

/// Parse a `@@ -O,o +N,n @@ section` line. Omitted counts default to 1.
///
/// Ranges whose end does not fit a `u32` are rejected.
fn parse_chunk_header(line: &str) -> Option<DiffChunk> {
    let captures = chunk_header_regex().captures(line)?;
    let number = |idx: usize| -> Option<u32> {
        match captures.get(idx) {
            Some(m) => m.as_str().parse().ok(),
            None => Some(1),
        }
    };

    let (old_start, old_lines) = (number(1)?, number(2)?);
    let (new_start, new_lines) = (number(3)?, number(4)?);
    old_start.checked_add(old_lines)?;
    new_start.checked_add(new_lines)?;

    let mut chunk = DiffChunk::new(old_start, old_lines, new_start, new_lines);
    chunk.section = captures
        .get(5)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .map(String::from);
    Some(chunk)
}

/// Open chunk with its running old/new line cursors.
struct ChunkBuilder {
    chunk: DiffChunk,
    old_cursor: u32,
    new_cursor: u32,
}

impl ChunkBuilder {
    fn new(chunk: DiffChunk) -> Self {
        Self {
            old_cursor: chunk.old_start,
            new_cursor: chunk.new_start,
            chunk,
        }
    }

    fn push(&mut self, kind: LineKind, content: &str) {
        let line = match kind {
            LineKind::Add => {
                let line = DiffLine::add(content, self.new_cursor);
                self.new_cursor = self.new_cursor.saturating_add(1);
                line
            }
            LineKind::Remove => {
                let line = DiffLine::remove(content, self.old_cursor);
                self.old_cursor = self.old_cursor.saturating_add(1);
                line
            }
            LineKind::Context => {
                let line = DiffLine::context(content, self.old_cursor, self.new_cursor);
                self.old_cursor = self.old_cursor.saturating_add(1);
                self.new_cursor = self.new_cursor.saturating_add(1);
                line
            }
        };
        self.chunk.lines.push(line);
    }
}
