//! The text rope interface the rest of the kernel consumes (§6).
//!
//! The kernel treats the rope as an opaque `TextTree`: positions are `u64` code-point counts,
//! never byte offsets. [`RopeText`] wraps `ropey::Rope` and is the only module that knows it is
//! backed by a rope at all.

use crate::direction::Direction;
use crate::error::{EditorError, Result};
use ropey::Rope;

/// The rope interface consumed by the rest of the kernel.
///
/// All positions are counted in code points (`char`s), never bytes.
pub trait TextTree {
    /// Total number of code points in the document.
    fn num_chars(&self) -> u64;

    /// Total number of lines (a trailing, unterminated line still counts as one line).
    fn num_lines(&self) -> u64;

    /// The line number containing `pos`, clamped to the last line.
    fn line_num_for_position(&self, pos: u64) -> u64;

    /// The code-point position of the first character of `line`, clamped to the last line.
    fn line_start_position(&self, line: u64) -> u64;

    /// Inserts a single scalar at `pos`.
    ///
    /// Fails with [`EditorError::InvalidRune`] for scalars the tree rejects (NUL is rejected;
    /// every other `char` is accepted, since Rust's `char` type already excludes surrogates and
    /// other invalid code points).
    fn insert_at_position(&mut self, pos: u64, r: char) -> Result<()>;

    /// Deletes the code point at `pos`. A no-op if `pos >= num_chars()`.
    fn delete_at_position(&mut self, pos: u64);

    /// Returns a byte reader starting at `pos` and walking in `dir`.
    fn reader_at_position(&self, pos: u64, dir: Direction) -> RopeReader<'_>;
}

/// A rope-backed [`TextTree`].
#[derive(Debug, Clone)]
pub struct RopeText {
    rope: Rope,
}

impl RopeText {
    /// Builds a `RopeText` from in-memory text. The text is expected to already be
    /// newline-normalized by the caller (see [`crate::line_ending`]).
    pub fn from_str(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Builds an empty `RopeText`.
    pub fn empty() -> Self {
        Self { rope: Rope::new() }
    }

    /// Renders the full document back to an owned `String`.
    pub fn to_string(&self) -> String {
        self.rope.to_string()
    }

    pub(crate) fn rope(&self) -> &Rope {
        &self.rope
    }
}

impl Default for RopeText {
    fn default() -> Self {
        Self::empty()
    }
}

impl TextTree for RopeText {
    fn num_chars(&self) -> u64 {
        self.rope.len_chars() as u64
    }

    fn num_lines(&self) -> u64 {
        self.rope.len_lines() as u64
    }

    fn line_num_for_position(&self, pos: u64) -> u64 {
        let pos = (pos as usize).min(self.rope.len_chars());
        self.rope.char_to_line(pos) as u64
    }

    fn line_start_position(&self, line: u64) -> u64 {
        let line = (line as usize).min(self.rope.len_lines().saturating_sub(1));
        self.rope.line_to_char(line) as u64
    }

    fn insert_at_position(&mut self, pos: u64, r: char) -> Result<()> {
        if r == '\0' {
            return Err(EditorError::InvalidRune);
        }
        let pos = (pos as usize).min(self.rope.len_chars());
        let mut buf = [0u8; 4];
        self.rope.insert(pos, r.encode_utf8(&mut buf));
        Ok(())
    }

    fn delete_at_position(&mut self, pos: u64) {
        let pos = pos as usize;
        if pos >= self.rope.len_chars() {
            return;
        }
        self.rope.remove(pos..pos + 1);
    }

    fn reader_at_position(&self, pos: u64, dir: Direction) -> RopeReader<'_> {
        let pos = (pos as usize).min(self.rope.len_chars());
        RopeReader {
            rope: &self.rope,
            pos,
            dir,
        }
    }
}

/// A cursor over rope chars starting at a position, walking in one direction.
///
/// This is the primitive the grapheme-cluster iterator (C2) is built on: it yields `char`s one
/// at a time so the segmenter can feed them to `unicode-segmentation`.
pub struct RopeReader<'a> {
    rope: &'a Rope,
    pos: usize,
    dir: Direction,
}

impl<'a> RopeReader<'a> {
    /// The current position the reader is sitting at.
    pub fn position(&self) -> u64 {
        self.pos as u64
    }
}

impl<'a> Iterator for RopeReader<'a> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        match self.dir {
            Direction::Forward => {
                if self.pos >= self.rope.len_chars() {
                    return None;
                }
                let c = self.rope.char(self.pos);
                self.pos += 1;
                Some(c)
            }
            Direction::Backward => {
                if self.pos == 0 {
                    return None;
                }
                self.pos -= 1;
                Some(self.rope.char(self.pos))
            }
        }
    }
}
