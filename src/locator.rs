//! Locator algebra (C4): pure, composable cursor-position computation.
//!
//! A [`Locator`] never mutates a [`BufferState`]; `locate` only ever reads it and returns the
//! [`CursorState`] the cursor would move to. This is the piece mutators delegate all position
//! math to — `CursorAt(locator)` is the only mutator that needs to know any of this exists.

use crate::buffer::{BufferState, CursorState};
use crate::direction::Direction;
use crate::metrics::{cell_offset_from_line_start, cluster_at, cluster_before, line_clusters};

/// A pure cursor-position computation over a [`BufferState`].
///
/// Variants that take a `count: u64` panic if constructed with `count == 0` — per the error
/// table, an out-of-domain locator argument is a programming error, not a runtime condition a
/// caller recovers from.
#[derive(Debug, Clone)]
pub enum Locator {
    /// The cursor's current position, unchanged.
    Current,
    /// An absolute document position, clamped to `[0, num_chars]` (end-of-file is a valid
    /// landing spot here, unlike most other locators).
    Absolute(u64),
    /// The position with the smallest `.position` among the given locators' results; ties keep
    /// the earliest one in the list.
    MinPosition(Vec<Locator>),
    /// Moves up to `count` grapheme clusters within the current line.
    CharInLine {
        /// Which way to move.
        dir: Direction,
        /// How many clusters to move, at most.
        count: u64,
        /// Whether the newline bounding the line may be crossed.
        include_end_of_line_or_file: bool,
    },
    /// Moves backward `count` grapheme clusters, crossing line boundaries freely.
    PrevChar(u64),
    /// Moves to the later of: the previous tab stop on the current line, or the end of the
    /// line's leading whitespace run — whichever is closer to the cursor. A no-op unless
    /// `auto_indent` is set.
    PrevAutoIndent,
    /// Clamps onto a valid document position: `[0, num_chars.saturating_sub(1)]`.
    OntoDocument,
    /// Clamps off of a newline cluster and off of the position past the end of the text.
    OntoLine,
    /// The start of the line `count` lines away.
    RelativeLineStart(Direction, u64),
    /// Moves `count` lines away, preserving visual column via `logical_offset`.
    RelativeLine(Direction, u64),
    /// Walks to the line boundary in `dir`. Forward with `include_end_of_line_or_file` crosses
    /// the newline (landing at the start of the next line, or at `num_chars` if there is none);
    /// without it, stops just before the newline. Backward always lands at the current line's
    /// start.
    LineBoundary(Direction, bool),
    /// Evaluates `child`, then advances past any run of whitespace that is not itself a newline.
    NonWhitespaceOrNewlineAfter(Box<Locator>),
    /// The start of line `n`, clamped to `[0, last_line]`.
    LineNum(u64),
    /// The start of the last line.
    LastLine,
    /// The start of the next word-or-punctuation run after the cursor.
    NextWordStart,
    /// The start of the word-or-punctuation run before the cursor.
    PrevWordStart,
    /// The end of the next word-or-punctuation run after the cursor.
    NextWordEnd,
    /// The start of the word the cursor is inside of, or (on whitespace) the end of the
    /// previous word.
    CurrentWordStart,
    /// The end of the word the cursor is inside of, or (on whitespace) the start of the next
    /// word.
    CurrentWordEnd,
    /// The next empty-line paragraph boundary.
    NextParagraph,
    /// The previous empty-line paragraph boundary.
    PrevParagraph,
}

impl Locator {
    /// Computes the cursor this locator resolves to against `buf`.
    pub fn locate(&self, buf: &BufferState) -> CursorState {
        match self {
            Locator::Current => buf.cursor,
            Locator::Absolute(p) => CursorState {
                position: (*p).min(buf.num_chars()),
                logical_offset: 0,
            },
            Locator::MinPosition(children) => {
                let mut best: Option<CursorState> = None;
                for child in children {
                    let c = child.locate(buf);
                    best = Some(match best {
                        None => c,
                        Some(b) if c.position < b.position => c,
                        Some(b) => b,
                    });
                }
                best.unwrap_or(buf.cursor)
            }
            Locator::CharInLine {
                dir,
                count,
                include_end_of_line_or_file,
            } => {
                assert!(*count > 0, "CharInLine requires count >= 1");
                let new_pos = char_in_line(buf, buf.cursor.position, *dir, *count, *include_end_of_line_or_file);
                settle(buf.cursor, new_pos)
            }
            Locator::PrevChar(n) => {
                assert!(*n > 0, "PrevChar requires n >= 1");
                let new_pos = prev_char(buf, buf.cursor.position, *n);
                settle(buf.cursor, new_pos)
            }
            Locator::PrevAutoIndent => {
                if !buf.auto_indent {
                    return buf.cursor;
                }
                let pos = buf.cursor.position;
                let line = buf.text_tree.line_num_for_position(pos);
                let line_start = buf.text_tree.line_start_position(line);
                let a = prev_tab_stop(buf, line, pos);
                let w = whitespace_run_start(buf, line_start, pos);
                CursorState {
                    position: a.max(w),
                    logical_offset: 0,
                }
            }
            Locator::OntoDocument => {
                let n = buf.num_chars();
                let position = if n == 0 { 0 } else { buf.cursor.position.min(n - 1) };
                CursorState {
                    position,
                    logical_offset: 0,
                }
            }
            Locator::OntoLine => {
                let n = buf.num_chars();
                let pos = buf.cursor.position;
                let position = if pos >= n {
                    match cluster_before(buf, n) {
                        Some(seg) => n - seg.num_runes,
                        None => 0,
                    }
                } else {
                    match cluster_at(buf, pos) {
                        Some(seg) if seg.has_newline => {
                            let line = buf.text_tree.line_num_for_position(pos);
                            let line_start = buf.text_tree.line_start_position(line);
                            if pos == line_start {
                                pos
                            } else {
                                match cluster_before(buf, pos) {
                                    Some(prev) => pos - prev.num_runes,
                                    None => pos,
                                }
                            }
                        }
                        _ => pos,
                    }
                };
                CursorState {
                    position,
                    logical_offset: 0,
                }
            }
            Locator::RelativeLineStart(dir, n) => {
                let target = target_line(buf, *dir, *n);
                CursorState {
                    position: buf.text_tree.line_start_position(target),
                    logical_offset: 0,
                }
            }
            Locator::RelativeLine(dir, n) => relative_line(buf, *dir, *n),
            Locator::LineBoundary(dir, include) => {
                let new_pos = line_boundary(buf, buf.cursor.position, *dir, *include);
                settle(buf.cursor, new_pos)
            }
            Locator::NonWhitespaceOrNewlineAfter(child) => {
                let c = child.locate(buf);
                let n = buf.num_chars();
                let mut pos = c.position;
                loop {
                    match cluster_at(buf, pos) {
                        Some(seg) if seg.is_whitespace && !seg.has_newline => pos += seg.num_runes,
                        _ => break,
                    }
                }
                // Running off the end of the document without hitting a newline or a
                // non-whitespace cluster still has to land on a valid position, not past it.
                pos = pos.min(n.saturating_sub(1));
                if pos == c.position {
                    c
                } else {
                    CursorState {
                        position: pos,
                        logical_offset: 0,
                    }
                }
            }
            Locator::LineNum(n) => CursorState {
                position: buf.text_tree.line_start_position((*n).min(buf.last_line())),
                logical_offset: 0,
            },
            Locator::LastLine => CursorState {
                position: buf.text_tree.line_start_position(buf.last_line()),
                logical_offset: 0,
            },
            Locator::NextWordStart => CursorState {
                position: next_word_start(buf, buf.cursor.position),
                logical_offset: 0,
            },
            Locator::PrevWordStart => CursorState {
                position: prev_word_start(buf, buf.cursor.position),
                logical_offset: 0,
            },
            Locator::NextWordEnd => CursorState {
                position: next_position_where(buf, buf.cursor.position, is_word_end_boundary),
                logical_offset: 0,
            },
            Locator::CurrentWordStart => {
                let pos = buf.cursor.position;
                let position = match cluster_at(buf, pos) {
                    Some(seg) if seg.is_whitespace => {
                        if is_word_end_boundary(buf, pos) {
                            pos
                        } else {
                            prev_position_where(buf, pos, is_word_end_boundary)
                        }
                    }
                    _ if is_word_start_boundary(buf, pos) => pos,
                    _ => prev_position_where(buf, pos, is_word_start_boundary),
                };
                CursorState {
                    position,
                    logical_offset: 0,
                }
            }
            Locator::CurrentWordEnd => {
                let pos = buf.cursor.position;
                let position = match cluster_at(buf, pos) {
                    Some(seg) if seg.is_whitespace => {
                        let next_start = next_word_start(buf, pos);
                        let boundary = line_boundary(buf, pos, Direction::Forward, true);
                        next_start.min(boundary)
                    }
                    _ if is_word_end_boundary(buf, pos) => pos,
                    _ => next_position_where(buf, pos, is_word_end_boundary),
                };
                CursorState {
                    position,
                    logical_offset: 0,
                }
            }
            Locator::NextParagraph => CursorState {
                position: next_position_where(buf, buf.cursor.position, is_paragraph_boundary),
                logical_offset: 0,
            },
            Locator::PrevParagraph => CursorState {
                position: prev_position_where(buf, buf.cursor.position, is_paragraph_boundary),
                logical_offset: 0,
            },
        }
    }
}

/// Builds the cursor result for a motion that may or may not actually move: `logical_offset` is
/// preserved on a no-op, reset to 0 otherwise (see the invariant documented on [`CursorState`]).
fn settle(prev: CursorState, new_pos: u64) -> CursorState {
    if new_pos == prev.position {
        prev
    } else {
        CursorState {
            position: new_pos,
            logical_offset: 0,
        }
    }
}

fn target_line(buf: &BufferState, dir: Direction, n: u64) -> u64 {
    let line = buf.text_tree.line_num_for_position(buf.cursor.position);
    match dir {
        Direction::Forward => (line + n).min(buf.last_line()),
        Direction::Backward => line.saturating_sub(n),
    }
}

fn char_in_line(buf: &BufferState, start: u64, dir: Direction, count: u64, include: bool) -> u64 {
    let mut pos = start;
    match dir {
        Direction::Forward => {
            for _ in 0..count {
                let Some(seg) = cluster_at(buf, pos) else { break };
                if seg.has_newline {
                    if include {
                        pos += seg.num_runes;
                    }
                    break;
                }
                pos += seg.num_runes;
            }
        }
        Direction::Backward => {
            for _ in 0..count {
                let Some(seg) = cluster_before(buf, pos) else { break };
                if seg.has_newline {
                    if include {
                        pos -= seg.num_runes;
                    }
                    break;
                }
                pos -= seg.num_runes;
            }
        }
    }
    pos
}

fn prev_char(buf: &BufferState, start: u64, n: u64) -> u64 {
    let mut pos = start;
    for _ in 0..n {
        let Some(seg) = cluster_before(buf, pos) else { break };
        pos -= seg.num_runes;
    }
    pos
}

/// The greatest position `<= pos` on `line` whose visual-cell offset from the line start is a
/// multiple of `buf.tab_size`.
fn prev_tab_stop(buf: &BufferState, line: u64, pos: u64) -> u64 {
    let line_start = buf.text_tree.line_start_position(line);
    let mut best = line_start;
    let mut offset = 0u64;
    for (cluster_pos, seg) in line_clusters(buf, line) {
        if cluster_pos >= pos {
            break;
        }
        offset += crate::cellwidth::cell_width(&seg.text, offset, buf.tab_size);
        let new_pos = cluster_pos + seg.num_runes;
        if new_pos <= pos && offset % buf.tab_size.max(1) == 0 {
            best = new_pos;
        }
    }
    best
}

/// The least position `>= line_start` such that every cluster in `[pos, cursor)` is a space or
/// a tab.
fn whitespace_run_start(buf: &BufferState, line_start: u64, cursor: u64) -> u64 {
    let mut pos = cursor;
    loop {
        if pos <= line_start {
            return line_start;
        }
        match cluster_before(buf, pos) {
            Some(seg) if seg.text == " " || seg.text == "\t" => pos -= seg.num_runes,
            _ => break,
        }
    }
    pos
}

fn line_boundary(buf: &BufferState, pos: u64, dir: Direction, include: bool) -> u64 {
    match dir {
        Direction::Forward => {
            let n = buf.num_chars();
            let mut p = pos;
            loop {
                match cluster_at(buf, p) {
                    None => return n,
                    Some(seg) if seg.has_newline => {
                        return if include { p + seg.num_runes } else { p };
                    }
                    Some(seg) => p += seg.num_runes,
                }
            }
        }
        Direction::Backward => {
            let line = buf.text_tree.line_num_for_position(pos);
            buf.text_tree.line_start_position(line)
        }
    }
}

fn relative_line(buf: &BufferState, dir: Direction, n: u64) -> CursorState {
    let cursor = buf.cursor;
    let target_offset = cell_offset_from_line_start(buf, cursor.position) + cursor.logical_offset;
    let target = target_line(buf, dir, n);
    let line_start = buf.text_tree.line_start_position(target);

    let clusters = line_clusters(buf, target);
    let mut cum_before = 0u64;
    for (cluster_pos, seg) in &clusters {
        let width = crate::cellwidth::cell_width(&seg.text, cum_before, buf.tab_size);
        let cum_after = cum_before + width;
        if cum_after > target_offset {
            return CursorState {
                position: *cluster_pos,
                logical_offset: 0,
            };
        }
        cum_before = cum_after;
    }

    // Target line ends before reaching target_offset: land on its last position.
    let total_width = cum_before;
    if total_width == 0 {
        return CursorState {
            position: line_start,
            logical_offset: target_offset,
        };
    }
    let actual_offset = total_width - 1;
    let last_cluster_pos = clusters.last().map(|(p, _)| *p).unwrap_or(line_start);
    CursorState {
        position: last_cluster_pos,
        logical_offset: target_offset - actual_offset,
    }
}

fn is_word_start_boundary(buf: &BufferState, pos: u64) -> bool {
    let Some(at) = cluster_at(buf, pos) else { return false };
    if at.has_newline {
        let line = buf.text_tree.line_num_for_position(pos);
        return buf.text_tree.line_start_position(line) == pos;
    }
    if at.is_whitespace {
        return false;
    }
    if pos == 0 {
        return true;
    }
    cluster_before(buf, pos).map(|s| s.is_whitespace).unwrap_or(true)
}

fn is_word_end_boundary(buf: &BufferState, pos: u64) -> bool {
    let Some(prev) = cluster_before(buf, pos) else { return false };
    if prev.is_whitespace {
        return false;
    }
    match cluster_at(buf, pos) {
        None => true,
        Some(seg) => seg.is_whitespace,
    }
}

fn is_paragraph_boundary(buf: &BufferState, pos: u64) -> bool {
    if pos == 0 {
        return false;
    }
    match cluster_at(buf, pos) {
        Some(seg) if seg.has_newline => {
            let line = buf.text_tree.line_num_for_position(pos);
            buf.text_tree.line_start_position(line) == pos
        }
        _ => false,
    }
}

/// Scans forward from `start` for the next position satisfying `pred`. None of this locator
/// family explicitly permits end-of-file landing, so exhausting the document without a hit
/// clamps to the last valid position rather than `num_chars`.
fn next_position_where(buf: &BufferState, start: u64, pred: impl Fn(&BufferState, u64) -> bool) -> u64 {
    let n = buf.num_chars();
    let last = n.saturating_sub(1);
    let mut pos = start;
    loop {
        let Some(seg) = cluster_at(buf, pos) else { return last };
        pos += seg.num_runes;
        if pos >= n {
            return last;
        }
        if pred(buf, pos) {
            return pos;
        }
    }
}

fn prev_position_where(buf: &BufferState, start: u64, pred: impl Fn(&BufferState, u64) -> bool) -> u64 {
    let mut pos = start;
    loop {
        let Some(seg) = cluster_before(buf, pos) else { return 0 };
        pos -= seg.num_runes;
        if pred(buf, pos) {
            return pos;
        }
        if pos == 0 {
            return 0;
        }
    }
}

fn cluster_word_ok(buf: &BufferState, pos: u64) -> bool {
    !cluster_at(buf, pos).map(|s| s.is_whitespace).unwrap_or(true)
}

/// Cluster-based next-word-start, optionally sharpened against the nearest non-empty syntax
/// token start: the two candidates are combined by taking whichever is closer to `pos` and does
/// not land on whitespace.
fn next_word_start(buf: &BufferState, pos: u64) -> u64 {
    let cluster_r = next_position_where(buf, pos, is_word_start_boundary);
    let Some(tt) = &buf.token_tree else { return cluster_r };
    let Some(tok) = tt
        .tokens()
        .iter()
        .find(|t| t.start_pos > pos && t.start_pos < t.end_pos)
    else {
        return cluster_r;
    };
    pick_closer(pos, cluster_r, cluster_word_ok(buf, cluster_r), tok.start_pos, cluster_word_ok(buf, tok.start_pos))
}

fn prev_word_start(buf: &BufferState, pos: u64) -> u64 {
    let cluster_r = prev_position_where(buf, pos, is_word_start_boundary);
    let Some(tt) = &buf.token_tree else { return cluster_r };
    let Some(tok) = tt
        .tokens()
        .iter()
        .rev()
        .find(|t| t.start_pos < pos && t.start_pos < t.end_pos)
    else {
        return cluster_r;
    };
    pick_closer(pos, cluster_r, cluster_word_ok(buf, cluster_r), tok.start_pos, cluster_word_ok(buf, tok.start_pos))
}

fn pick_closer(pos: u64, a: u64, a_ok: bool, b: u64, b_ok: bool) -> u64 {
    let dist = |x: u64| (x as i64 - pos as i64).unsigned_abs();
    match (a_ok, b_ok) {
        (true, true) => {
            if dist(a) <= dist(b) {
                a
            } else {
                b
            }
        }
        (true, false) => a,
        (false, true) => b,
        (false, false) => a.min(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::BufferState;
    use crate::text_tree::RopeText;

    fn buf(text: &str, pos: u64) -> BufferState {
        let mut b = BufferState::from_text(RopeText::from_str(text), 80, 24);
        b.cursor.position = pos;
        b
    }

    #[test]
    fn current_is_identity() {
        let b = buf("hello", 3);
        assert_eq!(Locator::Current.locate(&b), b.cursor);
    }

    #[test]
    fn absolute_clamps_to_num_chars() {
        let b = buf("hi", 0);
        assert_eq!(Locator::Absolute(100).locate(&b).position, 2);
    }

    #[test]
    fn char_in_line_forward_stops_before_newline() {
        let b = buf("ab\ncd", 0);
        let c = Locator::CharInLine {
            dir: Direction::Forward,
            count: 10,
            include_end_of_line_or_file: false,
        }
        .locate(&b);
        assert_eq!(c.position, 2);
    }

    #[test]
    fn char_in_line_forward_include_crosses_newline() {
        let b = buf("ab\ncd", 0);
        let c = Locator::CharInLine {
            dir: Direction::Forward,
            count: 10,
            include_end_of_line_or_file: true,
        }
        .locate(&b);
        assert_eq!(c.position, 3);
    }

    #[test]
    fn prev_char_crosses_lines() {
        let b = buf("ab\ncd", 3);
        let c = Locator::PrevChar(5).locate(&b);
        assert_eq!(c.position, 0);
    }

    #[test]
    fn onto_document_clamps_past_end() {
        let b = buf("abc", 3);
        assert_eq!(Locator::OntoDocument.locate(&b).position, 2);
    }

    #[test]
    fn onto_document_on_empty_doc_is_zero() {
        let b = buf("", 0);
        assert_eq!(Locator::OntoDocument.locate(&b).position, 0);
    }

    #[test]
    fn onto_line_moves_off_newline() {
        let b = buf("abc\ndef", 3);
        assert_eq!(Locator::OntoLine.locate(&b).position, 2);
    }

    #[test]
    fn onto_line_stays_on_empty_lines_newline() {
        let b = buf("abc\n\ndef", 4);
        assert_eq!(Locator::OntoLine.locate(&b).position, 4);
    }

    #[test]
    fn relative_line_start_clamps_to_last_line() {
        let b = buf("a\nb\nc", 0);
        let c = Locator::RelativeLineStart(Direction::Forward, 100).locate(&b);
        assert_eq!(c.position, 4); // start of line "c"
    }

    #[test]
    fn relative_line_preserves_visual_column_scenario() {
        // "abcdefgh\nijkl": cursor at 7 ('h'), moving down one line onto the shorter "ijkl".
        let b = buf("abcdefgh\nijkl", 7);
        let c = Locator::RelativeLine(Direction::Forward, 1).locate(&b);
        assert_eq!(c.position, 12);
        assert_eq!(c.logical_offset, 4);
    }

    #[test]
    fn relative_line_lands_exactly_when_long_enough() {
        let b = buf("abcd\nwxyz", 2);
        let c = Locator::RelativeLine(Direction::Forward, 1).locate(&b);
        assert_eq!(c.position, 7); // 'y', offset 2 into "wxyz"
        assert_eq!(c.logical_offset, 0);
    }

    #[test]
    fn line_boundary_forward_without_include_stops_before_newline() {
        let b = buf("ab\ncd", 0);
        let c = Locator::LineBoundary(Direction::Forward, false).locate(&b);
        assert_eq!(c.position, 2);
    }

    #[test]
    fn line_boundary_forward_with_include_crosses_newline() {
        let b = buf("ab\ncd", 0);
        let c = Locator::LineBoundary(Direction::Forward, true).locate(&b);
        assert_eq!(c.position, 3);
    }

    #[test]
    fn line_boundary_backward_lands_at_line_start() {
        let b = buf("ab\ncd", 4);
        let c = Locator::LineBoundary(Direction::Backward, false).locate(&b);
        assert_eq!(c.position, 3);
    }

    #[test]
    fn next_word_start_skips_whitespace() {
        let b = buf("foo   bar", 0);
        assert_eq!(Locator::NextWordStart.locate(&b).position, 6);
    }

    #[test]
    fn next_word_start_finds_empty_line() {
        let b = buf("foo\n\nbar", 0);
        assert_eq!(Locator::NextWordStart.locate(&b).position, 4);
    }

    #[test]
    fn prev_word_start_from_inside_word() {
        let b = buf("foo bar", 5);
        assert_eq!(Locator::PrevWordStart.locate(&b).position, 4);
    }

    #[test]
    fn next_word_start_at_the_last_word_clamps_to_the_last_char() {
        // No following word exists; landing at `num_chars` would violate the documented
        // position-in-bounds invariant for a locator that doesn't explicitly permit it.
        let b = buf("foo bar", 4);
        let c = Locator::NextWordStart.locate(&b);
        assert_eq!(c.position, b.num_chars() - 1);
    }

    #[test]
    fn next_paragraph_with_no_following_blank_line_clamps_to_the_last_char() {
        let b = buf("a\nb\nc", 0);
        let c = Locator::NextParagraph.locate(&b);
        assert_eq!(c.position, b.num_chars() - 1);
    }

    #[test]
    fn next_word_end_lands_on_last_char_of_run() {
        let b = buf("foo bar", 0);
        assert_eq!(Locator::NextWordEnd.locate(&b).position, 3);
    }

    #[test]
    fn current_word_start_end_inside_word() {
        let b = buf("foo bar", 5);
        assert_eq!(Locator::CurrentWordStart.locate(&b).position, 4);
        assert_eq!(Locator::CurrentWordEnd.locate(&b).position, 7);
    }

    #[test]
    fn current_word_on_whitespace_reaches_neighbors() {
        let b = buf("foo bar", 3);
        assert_eq!(Locator::CurrentWordStart.locate(&b).position, 3);
        assert_eq!(Locator::CurrentWordEnd.locate(&b).position, 4);
    }

    #[test]
    fn paragraph_motions_find_empty_lines() {
        let b = buf("a\nb\n\nc\nd", 0);
        assert_eq!(Locator::NextParagraph.locate(&b).position, 4);
        let b2 = buf("a\nb\n\nc\nd", 8);
        assert_eq!(Locator::PrevParagraph.locate(&b2).position, 4);
    }

    #[test]
    fn min_position_picks_smallest_and_earliest_on_ties() {
        let b = buf("abcdef", 3);
        let c = Locator::MinPosition(vec![
            Locator::Absolute(5),
            Locator::Absolute(1),
            Locator::Absolute(1),
        ])
        .locate(&b);
        assert_eq!(c.position, 1);
    }

    #[test]
    fn prev_auto_indent_stays_put_on_an_exact_tab_stop() {
        // 4 leading spaces at tab_size 4: cursor is already on a tab stop and W reaches all
        // the way back to the line start too, so max(A, W) is a no-op.
        let mut b = buf("    abc", 4);
        b.tab_size = 4;
        let c = Locator::PrevAutoIndent.locate(&b);
        assert_eq!(c.position, 4);
    }

    #[test]
    fn prev_auto_indent_backs_up_one_tab_stop_mid_indent() {
        // 6 leading spaces at tab_size 4: cursor sits between tab stops, so A pulls it back to
        // the previous stop (4) while W only reaches the line start (0); max is 4.
        let mut b = buf("      abc", 6);
        b.tab_size = 4;
        let c = Locator::PrevAutoIndent.locate(&b);
        assert_eq!(c.position, 4);
    }

    #[test]
    fn prev_auto_indent_never_crosses_non_whitespace() {
        // "ab c": the nearest tab-stop-aligned position at or before the cursor is 0, which
        // would cross back over "ab" — W clamps the result to just past "ab" instead.
        let mut b = buf("ab c", 3);
        b.tab_size = 4;
        let c = Locator::PrevAutoIndent.locate(&b);
        assert_eq!(c.position, 2);
    }

    #[test]
    fn prev_auto_indent_noop_when_disabled() {
        let mut b = buf("    abc", 4);
        b.auto_indent = false;
        assert_eq!(Locator::PrevAutoIndent.locate(&b).position, 4);
    }
}
