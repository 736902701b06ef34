//! View/scroll policy (C6).
//!
//! Pure functions over [`BufferState`] that compute a new [`ViewState`] — the mutators in
//! `mutator.rs` (`ScrollToCursor`, `ScrollLines`) just call these and assign the result back.

use crate::buffer::{BufferState, ViewState};
use crate::metrics::{cell_offset_from_line_start, line_visual_width};

/// Minimum number of lines/cells kept visible around the cursor when it's not at a document
/// boundary. Chosen to match common terminal-editor defaults (vim/helix default `scrolloff`-like
/// margins in this range); not derived from anything sharper than "a cursor hugging the very
/// edge of the screen is hard to read".
pub const SCROLL_MARGIN: u64 = 3;

/// Recomputes `view.text_origin`'s line and `view.x` so the cursor stays within `SCROLL_MARGIN`
/// lines/cells of the viewport's edges, clamped so the viewport never scrolls past the document's
/// bounds in either axis.
pub fn scroll_to_cursor(buf: &BufferState) -> ViewState {
    let mut view = buf.view;
    let cursor_line = buf.text_tree.line_num_for_position(buf.cursor.position);
    let origin_line = buf.text_tree.line_num_for_position(view.text_origin);
    let last_line = buf.last_line();
    let height = view.height.max(1);

    let margin = SCROLL_MARGIN.min(height.saturating_sub(1) / 2);
    let min_origin_line = cursor_line.saturating_sub(height.saturating_sub(1 + margin));
    let max_origin_line = cursor_line.saturating_sub(margin).min(last_line);

    let new_origin_line = if origin_line < min_origin_line {
        min_origin_line
    } else if origin_line > max_origin_line {
        max_origin_line
    } else {
        origin_line
    };

    view.text_origin = buf.text_tree.line_start_position(new_origin_line);
    view.x = scroll_x(buf, cursor_line, view.x, view.width);
    view
}

/// Recomputes `view.x` so the cursor's visual column on its own line stays within `SCROLL_MARGIN`
/// cells of the viewport's left/right edge, clamped to the line's own width.
fn scroll_x(buf: &BufferState, cursor_line: u64, current_x: u64, width: u64) -> u64 {
    let cursor_offset = cell_offset_from_line_start(buf, buf.cursor.position);
    let line_width = line_visual_width(buf, cursor_line);
    let width = width.max(1);

    let margin = SCROLL_MARGIN.min(width.saturating_sub(1) / 2);
    let min_x = cursor_offset.saturating_sub(width.saturating_sub(1 + margin));
    let max_x = cursor_offset.saturating_sub(margin).min(line_width);

    if current_x < min_x {
        min_x
    } else if current_x > max_x {
        max_x
    } else {
        current_x
    }
}

/// Scrolls the viewport by `count` lines in `dir`, without moving the cursor. Clamped so the top
/// line never goes negative, and so scrolling forward keeps at least `view_height - SCROLL_MARGIN
/// - 1` lines of the document's end comfortably visible rather than running the origin all the
/// way to `last_line`.
pub fn scroll_lines(buf: &BufferState, dir: crate::direction::Direction, count: u64) -> ViewState {
    let mut view = buf.view;
    let origin_line = buf.text_tree.line_num_for_position(view.text_origin);
    let last_line = buf.last_line();
    let height = view.height.max(1);
    let max_origin_line = last_line.saturating_sub(height.saturating_sub(SCROLL_MARGIN + 1));
    let new_line = match dir {
        crate::direction::Direction::Forward => {
            (origin_line + count).min(last_line).min(max_origin_line)
        }
        crate::direction::Direction::Backward => origin_line.saturating_sub(count),
    };
    view.text_origin = buf.text_tree.line_start_position(new_line);
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::Direction;
    use crate::text_tree::RopeText;

    fn buf_with_lines(n: u64, height: u64) -> BufferState {
        let text: String = (0..n).map(|i| format!("line{i}\n")).collect();
        BufferState::from_text(RopeText::from_str(&text), 80, height)
    }

    #[test]
    fn scroll_to_cursor_keeps_margin_when_cursor_moves_down() {
        let mut b = buf_with_lines(50, 10);
        b.cursor.position = b.text_tree.line_start_position(20);
        let view = scroll_to_cursor(&b);
        let origin_line = b.text_tree.line_num_for_position(view.text_origin);
        // Cursor line 20 should sit within the last `SCROLL_MARGIN` rows of a 10-row viewport.
        assert!(origin_line + 10 - SCROLL_MARGIN <= 20 + 1);
        assert!(origin_line <= 20);
    }

    #[test]
    fn scroll_to_cursor_does_not_scroll_past_document_start() {
        let mut b = buf_with_lines(50, 10);
        b.cursor.position = 0;
        let view = scroll_to_cursor(&b);
        assert_eq!(view.text_origin, 0);
    }

    #[test]
    fn scroll_to_cursor_clamps_near_document_end() {
        let mut b = buf_with_lines(5, 10);
        b.cursor.position = b.text_tree.line_start_position(4);
        let view = scroll_to_cursor(&b);
        assert_eq!(view.text_origin, 0);
    }

    #[test]
    fn scroll_lines_forward_and_backward() {
        let b = buf_with_lines(50, 10);
        let view = scroll_lines(&b, Direction::Forward, 5);
        assert_eq!(b.text_tree.line_num_for_position(view.text_origin), 5);

        let mut b2 = buf_with_lines(50, 10);
        b2.view.text_origin = b2.text_tree.line_start_position(5);
        let view2 = scroll_lines(&b2, Direction::Backward, 10);
        assert_eq!(view2.text_origin, 0);
    }

    #[test]
    fn scroll_lines_forward_caps_before_the_last_line_to_keep_the_document_end_visible() {
        let b = buf_with_lines(10, 10); // last_line = 9
        let view = scroll_lines(&b, Direction::Forward, 100);
        // 9 - 10 + SCROLL_MARGIN + 1 == 3, not 9.
        assert_eq!(b.text_tree.line_num_for_position(view.text_origin), 3);
    }

    #[test]
    fn scroll_to_cursor_scrolls_right_on_a_long_line() {
        let text = "x".repeat(100);
        let mut b = BufferState::from_text(RopeText::from_str(&text), 20, 10);
        b.cursor.position = 90;
        let view = scroll_to_cursor(&b);
        assert!(view.x > 0);
        assert!(view.x <= 90);
    }

    #[test]
    fn scroll_to_cursor_does_not_scroll_x_past_line_start() {
        let b = BufferState::from_text(RopeText::from_str("short line"), 80, 10);
        let view = scroll_to_cursor(&b);
        assert_eq!(view.x, 0);
    }
}
