//! Buffer-level state (§3): the cursor, the view/scroll window, search state, and the
//! aggregate [`BufferState`] that locators read and mutators write.

use crate::direction::Direction;
use crate::text_tree::{RopeText, TextTree};
use crate::tokens::{Token, TokenTree, Tokenizer};

/// A language tag naming the syntax a buffer is tokenized as (e.g. `"plaintext"`, `"json"`).
pub type LanguageTag = String;

/// The tag used for a buffer with no syntax highlighting / tokenization.
pub const PLAINTEXT: &str = "plaintext";

/// The cursor's position plus its virtual column memory.
///
/// Invariant: `logical_offset > 0` implies the cursor sits at the visual end of its line —
/// locators that move the cursor within a line reset `logical_offset` to 0, and only vertical
/// motion (`RelativeLine`) and `LineBoundary`/`CharInLine` no-ops preserve or set it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorState {
    /// Code-point position in the document.
    pub position: u64,
    /// The virtual column a vertical motion wants to maintain when crossing shorter lines.
    pub logical_offset: u64,
}

impl CursorState {
    /// A cursor at the document start.
    pub fn zero() -> Self {
        Self::default()
    }
}

/// The visible window into the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewState {
    /// Viewport's horizontal screen offset (host-owned; the kernel does not draw).
    pub x: u64,
    /// Viewport's vertical screen offset (host-owned; the kernel does not draw).
    pub y: u64,
    /// Viewport width in cells.
    pub width: u64,
    /// Viewport height in cells (the status bar row is not part of this).
    pub height: u64,
    /// Code-point position of the first cell of the top-left visible line.
    pub text_origin: u64,
}

/// The incremental/composing search state machine's data (§4.7 describes the transitions).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    /// The query being composed, or the last completed query once idle.
    pub query: String,
    /// The direction the current/last search ran in.
    pub direction: Direction,
    /// The current match, if the live incremental search has one.
    pub r#match: Option<(u64, u64)>,
    /// The query in effect before the current composing session started (restored on abort).
    pub prev_query: String,
    /// The direction in effect before the current composing session started.
    pub prev_direction: Direction,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            query: String::new(),
            direction: Direction::Forward,
            r#match: None,
            prev_query: String::new(),
            prev_direction: Direction::Forward,
        }
    }
}

/// All per-document state a locator reads and a mutator writes.
pub struct BufferState {
    /// The document text.
    pub text_tree: RopeText,
    /// The parallel token tree, if a tokenizer is configured and tokenization succeeded.
    ///
    /// Invariant: when present, reflects the exact current text.
    pub token_tree: Option<TokenTree>,
    /// The active tokenizer, if any.
    pub tokenizer: Option<Box<dyn Tokenizer>>,
    /// The primary cursor.
    pub cursor: CursorState,
    /// The visible window.
    pub view: ViewState,
    /// The configured syntax language.
    pub syntax_language: LanguageTag,
    /// Tab stop width in cells; always at least 1.
    pub tab_size: u64,
    /// Whether `InsertTab` inserts spaces (`true`) or a literal tab (`false`).
    pub tab_expand: bool,
    /// Whether `InsertNewline` re-indents the new line.
    pub auto_indent: bool,
    /// Incremental search state.
    pub search: SearchState,
}

impl BufferState {
    /// Builds an empty buffer with default settings.
    pub fn empty(width: u64, height: u64) -> Self {
        Self::from_text(RopeText::empty(), width, height)
    }

    /// Builds a buffer over `text` with default settings.
    pub fn from_text(text: RopeText, width: u64, height: u64) -> Self {
        Self {
            text_tree: text,
            token_tree: None,
            tokenizer: None,
            cursor: CursorState::zero(),
            view: ViewState {
                x: 0,
                y: 0,
                width,
                height,
                text_origin: 0,
            },
            syntax_language: PLAINTEXT.to_string(),
            tab_size: 4,
            tab_expand: true,
            auto_indent: true,
            search: SearchState::default(),
        }
    }

    /// Total code points in the document; convenience wrapper over `text_tree.num_chars()`.
    pub fn num_chars(&self) -> u64 {
        self.text_tree.num_chars()
    }

    /// The last valid line index (0 if the document is empty).
    pub fn last_line(&self) -> u64 {
        self.text_tree.num_lines().saturating_sub(1)
    }

    /// A snapshot of a token at `pos`, if a token tree is present and covers it.
    pub fn token_at(&self, pos: u64) -> Option<Token> {
        self.token_tree.as_ref().and_then(|t| t.token_at(pos)).copied()
    }
}
