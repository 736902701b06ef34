//! Grapheme-cluster iterator (C2).
//!
//! A restartable, direction-aware iterator over the text tree that yields
//! [`Segment`]s — UAX #29 grapheme clusters, annotated with the flags locators need to avoid
//! re-deriving them from raw text. Forward iteration walks clusters in textual order; backward
//! iteration walks them in reverse textual order, so a backward walk is the mirror image of a
//! forward walk rather than a forward walk read backward char-by-char.
//!
//! Built on `unicode-segmentation`'s grapheme boundary rules, fed a growing lookahead buffer
//! pulled from a [`RopeReader`] so a cluster is never yielded until we know it cannot extend
//! further (unless the document itself has ended).

use crate::direction::Direction;
use crate::text_tree::RopeReader;
use std::collections::VecDeque;
use unicode_segmentation::UnicodeSegmentation;

/// How many chars to pull from the reader per refill.
const REFILL_CHUNK: usize = 32;

/// A single grapheme cluster plus the flags locators need.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segment {
    /// The cluster's text, in textual (left-to-right) order regardless of iteration direction.
    pub text: String,
    /// `true` if the cluster is a line terminator (`"\n"` or `"\r\n"`).
    pub has_newline: bool,
    /// `true` if every scalar in the cluster is Unicode whitespace.
    pub is_whitespace: bool,
    /// Number of code points (`char`s) in the cluster.
    pub num_runes: u64,
}

impl Segment {
    fn from_text(text: String) -> Self {
        let has_newline = text == "\n" || text == "\r\n";
        let is_whitespace = !text.is_empty() && text.chars().all(char::is_whitespace);
        let num_runes = text.chars().count() as u64;
        Self {
            text,
            has_newline,
            is_whitespace,
            num_runes,
        }
    }
}

/// A direction-aware, restartable grapheme-cluster walker.
#[derive(Clone)]
pub struct GraphemeIter<'a> {
    reader: RopeReader<'a>,
    dir: Direction,
    /// Buffered text, always kept in left-to-right textual order.
    buf: VecDeque<char>,
    /// `true` once the underlying reader has no more chars to contribute.
    exhausted: bool,
}

impl<'a> GraphemeIter<'a> {
    /// Creates an iterator walking `reader` in `dir`.
    pub fn new(reader: RopeReader<'a>, dir: Direction) -> Self {
        Self {
            reader,
            dir,
            buf: VecDeque::new(),
            exhausted: false,
        }
    }

    /// A cheap, independent checkpoint: clones the iterator so a caller can peek ahead without
    /// disturbing `self`.
    pub fn checkpoint(&self) -> Self {
        self.clone()
    }

    fn refill(&mut self) {
        if self.exhausted {
            return;
        }
        let mut pulled = 0;
        while pulled < REFILL_CHUNK {
            match self.reader.next() {
                Some(c) => {
                    match self.dir {
                        Direction::Forward => self.buf.push_back(c),
                        Direction::Backward => self.buf.push_front(c),
                    }
                    pulled += 1;
                }
                None => {
                    self.exhausted = true;
                    break;
                }
            }
        }
    }

    /// Returns the next grapheme cluster, or `None` once the document boundary in `dir` is
    /// reached.
    pub fn next_segment(&mut self) -> Option<Segment> {
        loop {
            if self.buf.is_empty() && self.exhausted {
                return None;
            }
            if !self.exhausted && self.buf.len() < REFILL_CHUNK {
                self.refill();
            }

            let s: String = self.buf.iter().collect();
            if s.is_empty() {
                return None;
            }

            let bounds: Vec<usize> = s.grapheme_indices(true).map(|(i, _)| i).collect();
            match self.dir {
                Direction::Forward => {
                    // Need at least two boundaries (start of first cluster, start of second) to
                    // be sure the first cluster is complete, unless input is exhausted.
                    if bounds.len() < 2 && !self.exhausted {
                        self.refill();
                        continue;
                    }
                    let end = if bounds.len() >= 2 { bounds[1] } else { s.len() };
                    let cluster: String = s[..end].to_string();
                    let n = cluster.chars().count();
                    for _ in 0..n {
                        self.buf.pop_front();
                    }
                    return Some(Segment::from_text(cluster));
                }
                Direction::Backward => {
                    if bounds.len() < 2 && !self.exhausted {
                        self.refill();
                        continue;
                    }
                    let start = if bounds.len() >= 2 {
                        bounds[bounds.len() - 1]
                    } else {
                        0
                    };
                    let cluster: String = s[start..].to_string();
                    let n = cluster.chars().count();
                    for _ in 0..n {
                        self.buf.pop_back();
                    }
                    return Some(Segment::from_text(cluster));
                }
            }
        }
    }
}

impl<'a> Iterator for GraphemeIter<'a> {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        self.next_segment()
    }
}
