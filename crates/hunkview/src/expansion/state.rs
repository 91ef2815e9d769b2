//! Out-of-band expansion state, keyed by file path.

use crate::model::{DiffLine, ExpandDirection};
use std::collections::HashMap;

/// Context lines revealed next to a chunk by one expand action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandedRange {
    pub chunk_index: usize,
    pub direction: ExpandDirection,
    pub lines: Vec<DiffLine>,
}

/// Tag for an in-flight expansion request.
///
/// A ticket goes stale once the file's expansion state is cleared, so
/// results arriving after a file switch or a diff reload are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionTicket {
    pub path: String,
    pub chunk_index: usize,
    pub direction: ExpandDirection,
    pub count: u32,
    epoch: u64,
    generation: u64,
}

#[derive(Debug, Clone, Default)]
struct FileExpansion {
    ranges: Vec<ExpandedRange>,
    file_len: Option<usize>,
}

/// Expansion state owned by the caller, never stored in the parsed model.
#[derive(Debug, Clone, Default)]
pub struct ExpansionState {
    files: HashMap<String, FileExpansion>,
    generations: HashMap<String, u64>,
    epoch: u64,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// All ranges recorded for `path`, in insertion order.
    pub fn ranges(&self, path: &str) -> &[ExpandedRange] {
        self.files
            .get(path)
            .map(|f| f.ranges.as_slice())
            .unwrap_or_default()
    }

    /// Ranges for one chunk side, in insertion order.
    pub fn ranges_for<'a>(
        &'a self,
        path: &str,
        chunk_index: usize,
        direction: ExpandDirection,
    ) -> impl Iterator<Item = &'a ExpandedRange> + 'a {
        self.ranges(path)
            .iter()
            .filter(move |r| r.chunk_index == chunk_index && r.direction == direction)
    }

    /// Number of lines already revealed for one chunk side.
    pub fn expanded_count(&self, path: &str, chunk_index: usize, direction: ExpandDirection) -> u32 {
        self.ranges_for(path, chunk_index, direction)
            .map(|r| r.lines.len() as u32)
            .sum()
    }

    /// Append a range for `path`.
    pub fn push(&mut self, path: &str, range: ExpandedRange) {
        self.files
            .entry(path.to_string())
            .or_default()
            .ranges
            .push(range);
    }

    /// Line count of the file at the expansion revision, once known.
    pub fn file_len(&self, path: &str) -> Option<usize> {
        self.files.get(path).and_then(|f| f.file_len)
    }

    pub fn set_file_len(&mut self, path: &str, len: usize) {
        self.files.entry(path.to_string()).or_default().file_len = Some(len);
    }

    /// Whether anything was expanded for `path`.
    pub fn is_expanded(&self, path: &str) -> bool {
        !self.ranges(path).is_empty()
    }

    /// Drop all expansion state of `path` and invalidate its in-flight tickets.
    pub fn clear_file(&mut self, path: &str) {
        self.files.remove(path);
        *self.generations.entry(path.to_string()).or_default() += 1;
    }

    /// Drop everything, e.g. when the diff is recomputed from scratch.
    pub fn clear(&mut self) {
        self.files.clear();
        self.epoch += 1;
    }

    /// Issue a ticket for an expansion request about to be fetched.
    pub fn begin(
        &self,
        path: &str,
        chunk_index: usize,
        direction: ExpandDirection,
        count: u32,
    ) -> ExpansionTicket {
        ExpansionTicket {
            path: path.to_string(),
            chunk_index,
            direction,
            count,
            epoch: self.epoch,
            generation: self.generation(path),
        }
    }

    /// Whether results for `ticket` may still be applied.
    pub fn is_current(&self, ticket: &ExpansionTicket) -> bool {
        ticket.epoch == self.epoch && ticket.generation == self.generation(&ticket.path)
    }

    fn generation(&self, path: &str) -> u64 {
        self.generations.get(path).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(chunk_index: usize, direction: ExpandDirection, n: u32) -> ExpandedRange {
        ExpandedRange {
            chunk_index,
            direction,
            lines: (1..=n).map(|i| DiffLine::context("x", i, i)).collect(),
        }
    }

    #[test]
    fn test_accumulates_in_insertion_order() {
        let mut state = ExpansionState::new();
        state.push("a.rs", range(1, ExpandDirection::Up, 3));
        state.push("a.rs", range(0, ExpandDirection::Down, 2));
        state.push("a.rs", range(1, ExpandDirection::Up, 5));

        assert_eq!(state.ranges("a.rs").len(), 3);
        assert_eq!(state.expanded_count("a.rs", 1, ExpandDirection::Up), 8);
        assert_eq!(state.expanded_count("a.rs", 0, ExpandDirection::Down), 2);
        assert_eq!(state.expanded_count("b.rs", 1, ExpandDirection::Up), 0);

        let sizes: Vec<_> = state
            .ranges_for("a.rs", 1, ExpandDirection::Up)
            .map(|r| r.lines.len())
            .collect();
        assert_eq!(sizes, vec![3, 5]);
    }

    #[test]
    fn test_clear_file_invalidates_tickets() {
        let mut state = ExpansionState::new();
        let ticket = state.begin("a.rs", 0, ExpandDirection::Up, 10);
        let other = state.begin("b.rs", 0, ExpandDirection::Up, 10);
        assert!(state.is_current(&ticket));

        state.push("a.rs", range(0, ExpandDirection::Up, 1));
        state.clear_file("a.rs");

        assert!(!state.is_expanded("a.rs"));
        assert!(!state.is_current(&ticket));
        assert!(state.is_current(&other));
        assert!(state.is_current(&state.begin("a.rs", 0, ExpandDirection::Up, 10)));
    }

    #[test]
    fn test_clear_invalidates_everything() {
        let mut state = ExpansionState::new();
        let ticket = state.begin("b.rs", 2, ExpandDirection::Down, 10);
        state.set_file_len("b.rs", 40);
        state.clear();

        assert_eq!(state.file_len("b.rs"), None);
        assert!(!state.is_current(&ticket));
    }
}
