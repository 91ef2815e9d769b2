//! Hidden-line bookkeeping and materialisation of expanded context.

use super::state::{ExpandedRange, ExpansionState, ExpansionTicket};
use crate::model::{DiffFile, DiffLine, ExpandDirection};
use crate::traits::FileContentProvider;

/// Lines still hidden between chunk `chunk_index` and whatever precedes it.
///
/// The gap to the previous chunk (or the file start) minus the lines already
/// revealed by Down expansions of the previous chunk and Up expansions of
/// this one.
pub fn hidden_lines_before(file: &DiffFile, chunk_index: usize, state: &ExpansionState) -> u32 {
    let Some(chunk) = file.chunks.get(chunk_index) else {
        return 0;
    };

    let (gap, revealed_below_prev) = match chunk_index.checked_sub(1) {
        None => (chunk.new_start.saturating_sub(1), 0),
        Some(prev_idx) => {
            let prev = &file.chunks[prev_idx];
            (
                chunk.new_start.saturating_sub(prev.new_end()),
                state.expanded_count(&file.path, prev_idx, ExpandDirection::Down),
            )
        }
    };

    let revealed_above = state.expanded_count(&file.path, chunk_index, ExpandDirection::Up);
    gap.saturating_sub(revealed_above.saturating_add(revealed_below_prev))
}

/// Lines still hidden below chunk `chunk_index`.
///
/// Between chunks this is the hidden gap before the next chunk. After the
/// last chunk it needs the file length (`file_len`, or the one recorded in
/// `state` by an earlier expansion); `None` when that is unknown.
pub fn hidden_lines_after(
    file: &DiffFile,
    chunk_index: usize,
    state: &ExpansionState,
    file_len: Option<usize>,
) -> Option<u32> {
    let chunk = file.chunks.get(chunk_index)?;
    if chunk_index + 1 < file.chunks.len() {
        return Some(hidden_lines_before(file, chunk_index + 1, state));
    }

    let total = file_len.or_else(|| state.file_len(&file.path))? as u32;
    let shown_until = chunk.new_end().saturating_sub(1);
    let revealed = state.expanded_count(&file.path, chunk_index, ExpandDirection::Down);
    Some(total.saturating_sub(shown_until).saturating_sub(revealed))
}

/// Materialise up to `count` context lines next to a chunk from `content`.
///
/// Lines are tagged as context with `old = new = index + 1`: the revealed
/// region lies outside every chunk and is therefore unchanged.
pub fn expand_lines(
    file: &DiffFile,
    chunk_index: usize,
    direction: ExpandDirection,
    count: u32,
    content: &[String],
    state: &ExpansionState,
) -> Vec<DiffLine> {
    let Some(chunk) = file.chunks.get(chunk_index) else {
        return Vec::new();
    };
    let len = content.len();

    let (start, end) = match direction {
        ExpandDirection::Up => {
            let revealed = state.expanded_count(&file.path, chunk_index, ExpandDirection::Up);
            let take = count.min(hidden_lines_before(file, chunk_index, state)) as usize;
            let top = (chunk.new_start.saturating_sub(1).saturating_sub(revealed) as usize).min(len);
            (top.saturating_sub(take), top)
        }
        ExpandDirection::Down => {
            let revealed = state.expanded_count(&file.path, chunk_index, ExpandDirection::Down);
            // For `-U0` deletions `new_start` is the line before the removed
            // block, so the first line revealed below is `new_start` itself.
            let start = chunk.new_end().saturating_sub(1) as usize + revealed as usize;
            let limit = if chunk_index + 1 < file.chunks.len() {
                hidden_lines_before(file, chunk_index + 1, state) as usize
            } else {
                len.saturating_sub(start)
            };
            let take = (count as usize).min(limit);
            (start.min(len), (start + take).min(len))
        }
    };

    content[start..end]
        .iter()
        .enumerate()
        .map(|(offset, text)| {
            let number = (start + offset + 1) as u32;
            DiffLine::context(text.as_str(), number, number)
        })
        .collect()
}

/// Expand a chunk from already fetched `content` and record the range.
///
/// Returns the number of lines revealed; nothing is recorded when that is
/// zero.
pub fn expand(
    file: &DiffFile,
    chunk_index: usize,
    direction: ExpandDirection,
    count: u32,
    content: &[String],
    state: &mut ExpansionState,
) -> usize {
    state.set_file_len(&file.path, content.len());

    let lines = expand_lines(file, chunk_index, direction, count, content, state);
    let revealed = lines.len();
    if revealed > 0 {
        state.push(
            &file.path,
            ExpandedRange {
                chunk_index,
                direction,
                lines,
            },
        );
    }
    revealed
}

/// Content fetched for an expansion ticket.
#[derive(Debug, Clone)]
pub struct FetchedContent {
    pub ticket: ExpansionTicket,
    pub lines: Vec<String>,
}

/// Fetch the content an expansion ticket needs.
///
/// Failures are logged and yield `None`: expansion is a cosmetic affordance
/// and the hidden-lines marker simply stays available for a retry.
pub async fn fetch_expansion<P>(
    provider: &P,
    revision: &str,
    ticket: ExpansionTicket,
) -> Option<FetchedContent>
where
    P: FileContentProvider + ?Sized,
{
    match provider.file_lines(revision, &ticket.path).await {
        Ok(lines) => Some(FetchedContent { ticket, lines }),
        Err(err) => {
            log::debug!(
                "Context expansion for {} at {} skipped: {}",
                ticket.path,
                revision,
                err
            );
            None
        }
    }
}

/// Apply fetched content if its ticket is still current for `file`.
pub fn apply_expansion(
    file: &DiffFile,
    state: &mut ExpansionState,
    fetched: FetchedContent,
) -> usize {
    let ticket = &fetched.ticket;
    if ticket.path != file.path || !state.is_current(ticket) {
        log::debug!(
            "Discarding stale expansion for {} chunk {}",
            ticket.path,
            ticket.chunk_index
        );
        return 0;
    }

    expand(
        file,
        ticket.chunk_index,
        ticket.direction,
        ticket.count,
        &fetched.lines,
        state,
    )
}

/// Fetch `file` at `revision` and expand one chunk side by `count` lines.
pub async fn expand_from_provider<P>(
    provider: &P,
    revision: &str,
    file: &DiffFile,
    chunk_index: usize,
    direction: ExpandDirection,
    count: u32,
    state: &mut ExpansionState,
) -> usize
where
    P: FileContentProvider + ?Sized,
{
    let ticket = state.begin(&file.path, chunk_index, direction, count);
    match fetch_expansion(provider, revision, ticket).await {
        Some(fetched) => apply_expansion(file, state, fetched),
        None => 0,
    }
}
