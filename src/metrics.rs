//! Small shared text-metrics helpers used by both the locator algebra (C4) and the mutator
//! algebra (C5): cell-offset-within-line computation, single-cluster peeks, and leading
//! whitespace measurement. Kept separate so neither module has to re-derive the other's helpers.

use crate::buffer::BufferState;
use crate::cellwidth::cell_width;
use crate::direction::Direction;
use crate::graphemes::{GraphemeIter, Segment};
use crate::text_tree::TextTree;

/// The grapheme cluster starting at `pos`, if any.
pub fn cluster_at(buf: &BufferState, pos: u64) -> Option<Segment> {
    if pos >= buf.num_chars() {
        return None;
    }
    GraphemeIter::new(buf.text_tree.reader_at_position(pos, Direction::Forward), Direction::Forward)
        .next_segment()
}

/// The grapheme cluster immediately before `pos`, if any.
pub fn cluster_before(buf: &BufferState, pos: u64) -> Option<Segment> {
    if pos == 0 {
        return None;
    }
    GraphemeIter::new(
        buf.text_tree.reader_at_position(pos, Direction::Backward),
        Direction::Backward,
    )
    .next_segment()
}

/// The total visual-cell offset from the start of `pos`'s line to `pos` itself.
pub fn cell_offset_from_line_start(buf: &BufferState, pos: u64) -> u64 {
    let line = buf.text_tree.line_num_for_position(pos);
    let line_start = buf.text_tree.line_start_position(line);
    let mut offset = 0u64;
    let mut it = GraphemeIter::new(
        buf.text_tree.reader_at_position(line_start, Direction::Forward),
        Direction::Forward,
    );
    let mut cur = line_start;
    while cur < pos {
        let Some(seg) = it.next_segment() else { break };
        offset += cell_width(&seg.text, offset, buf.tab_size);
        cur += seg.num_runes;
    }
    offset
}

/// The non-newline clusters of `line`, each tagged with its start position, in order.
pub fn line_clusters(buf: &BufferState, line: u64) -> Vec<(u64, Segment)> {
    let line_start = buf.text_tree.line_start_position(line);
    let mut clusters = Vec::new();
    let mut it = GraphemeIter::new(
        buf.text_tree.reader_at_position(line_start, Direction::Forward),
        Direction::Forward,
    );
    let mut pos = line_start;
    while let Some(seg) = it.next_segment() {
        if seg.has_newline {
            break;
        }
        let seg_len = seg.num_runes;
        clusters.push((pos, seg));
        pos += seg_len;
    }
    clusters
}

/// Total visual width (in cells) of `line`'s content, excluding its trailing newline.
pub fn line_visual_width(buf: &BufferState, line: u64) -> u64 {
    let mut offset = 0u64;
    for (_, seg) in line_clusters(buf, line) {
        offset += cell_width(&seg.text, offset, buf.tab_size);
    }
    offset
}

/// The position just past the leading run of spaces/tabs on `line`.
pub fn leading_whitespace_end(buf: &BufferState, line: u64) -> u64 {
    let mut pos = buf.text_tree.line_start_position(line);
    loop {
        match cluster_at(buf, pos) {
            Some(seg) if seg.text == " " || seg.text == "\t" => pos += seg.num_runes,
            _ => break,
        }
    }
    pos
}
