//! Search state machine (C7).
//!
//! The *mode* (idle vs. composing) lives on [`crate::editor::EditorState::input_mode`]; this
//! module only owns the transitions over [`crate::buffer::SearchState`] and the literal-text
//! match search itself. Search queries are literal substrings, not regular expressions — that is
//! what makes running a search backward as cheap as running it forward: reverse the document and
//! the query by *character*, not by raw byte (so multi-byte UTF-8 scalars stay intact), and a
//! backward search becomes a forward search over the mirror image.

use crate::buffer::{BufferState, CursorState};
use crate::direction::Direction;

/// Begins composing a new query in `dir`, remembering the previously-completed query/direction
/// so [`abort`] can restore them.
pub fn start(buf: &mut BufferState, dir: Direction) {
    buf.search.prev_query = buf.search.query.clone();
    buf.search.prev_direction = buf.search.direction;
    buf.search.direction = dir;
    buf.search.query.clear();
    buf.search.r#match = None;
}

/// Appends `c` to the composing query and recomputes the live match.
pub fn append_query(buf: &mut BufferState, c: char) {
    buf.search.query.push(c);
    recompute_live_match(buf);
}

/// Removes the last character of the composing query and recomputes the live match.
pub fn delete_query(buf: &mut BufferState) {
    buf.search.query.pop();
    recompute_live_match(buf);
}

fn recompute_live_match(buf: &mut BufferState) {
    let query = buf.search.query.clone();
    buf.search.r#match = find_match(buf, &query, buf.cursor.position, buf.search.direction, true);
}

/// Finalizes the composing search: returns the cursor to move to if there's a live match, or
/// `None` if the query had no match (in which case the cursor does not move).
pub fn complete(buf: &BufferState) -> Option<CursorState> {
    buf.search.r#match.map(|(start, _end)| CursorState {
        position: start,
        logical_offset: 0,
    })
}

/// Aborts composing, restoring the previously-completed query/direction.
pub fn abort(buf: &mut BufferState) {
    buf.search.query = buf.search.prev_query.clone();
    buf.search.direction = buf.search.prev_direction;
    buf.search.r#match = None;
}

/// Repeats the last completed search in `dir`, starting strictly past the cursor so repeated
/// `FindNextMatch` calls advance rather than re-finding the same match.
pub fn find_next_match(buf: &BufferState, dir: Direction) -> Option<(u64, u64)> {
    if buf.search.query.is_empty() {
        return None;
    }
    let from = match dir {
        Direction::Forward => buf.cursor.position + 1,
        Direction::Backward => buf.cursor.position,
    };
    find_match(buf, &buf.search.query, from, dir, false)
}

/// Finds the nearest match for `query` at or after (forward) / before `from` (backward), wrapping
/// around the document if no match is found in that direction.
///
/// `straddle_cursor` selects the backward anchor used while composing an incremental search:
/// the match is allowed to straddle or start exactly at `from` (the live cursor), per the
/// "scan from `cursor + runes_in_query - 1` backward, clamped to `num_chars - 1`" rule — a match
/// qualifies when its *last* char position is at or before that clamped anchor. `FindNextMatch`
/// doesn't straddle: it looks strictly before `from` so repeated calls advance instead of
/// re-finding the match the cursor already sits in.
pub fn find_match(
    buf: &BufferState,
    query: &str,
    from: u64,
    dir: Direction,
    straddle_cursor: bool,
) -> Option<(u64, u64)> {
    if query.is_empty() {
        return None;
    }
    let text_chars: Vec<char> = buf.text_tree.to_string().chars().collect();
    let query_chars: Vec<char> = query.chars().collect();
    let qlen = query_chars.len();
    if qlen == 0 || qlen > text_chars.len() {
        return None;
    }
    let last_start = text_chars.len() - qlen;
    let positions: Vec<u64> = (0..=last_start)
        .filter(|&i| text_chars[i..i + qlen] == query_chars[..])
        .map(|i| i as u64)
        .collect();
    if positions.is_empty() {
        return None;
    }
    let found = match dir {
        Direction::Forward => positions
            .iter()
            .find(|&&p| p >= from)
            .or_else(|| positions.first()),
        Direction::Backward if straddle_cursor => {
            let scan_start = (from + qlen as u64)
                .saturating_sub(1)
                .min(text_chars.len() as u64 - 1);
            positions
                .iter()
                .rev()
                .find(|&&p| p + qlen as u64 - 1 <= scan_start)
                .or_else(|| positions.last())
        }
        Direction::Backward => positions
            .iter()
            .rev()
            .find(|&&p| p < from)
            .or_else(|| positions.last()),
    };
    found.map(|&p| (p, p + qlen as u64))
}
