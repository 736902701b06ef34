#![warn(missing_docs)]
//! editkernel - a headless, modal text-editor kernel.
//!
//! This crate is the core of a terminal-style modal text editor, with no rendering and no input
//! handling of its own. It exposes pure read-side algebras (cell widths, grapheme clusters, cursor
//! locators) and one side-effecting write-side algebra (buffer mutators), plus the orchestrator
//! state a host embeds to drive both.
//!
//! # Layering
//!
//! ```text
//! ┌───────────────────────────────────────────────────┐
//! │  editor: EditorState, InputMode                    │  ← host-embedded orchestrator
//! ├───────────────────────────────────────────────────┤
//! │  mutator: Mutator (writes)                         │
//! │  locator, view, search, menu (pure reads)          │
//! ├───────────────────────────────────────────────────┤
//! │  buffer: BufferState, CursorState, ViewState       │  ← per-document state
//! │  tokens: Tokenizer, TokenTree                       │
//! ├───────────────────────────────────────────────────┤
//! │  text_tree: TextTree (rope)                         │  ← storage
//! │  graphemes: GraphemeIter (UAX #29)                  │
//! │  cellwidth: cell_width (UAX #11)                    │
//! ├───────────────────────────────────────────────────┤
//! │  file_io, line_ending, config, status, error        │  ← ambient/host-facing
//! └───────────────────────────────────────────────────┘
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use editkernel::config::Config;
//! use editkernel::editor::EditorState;
//! use editkernel::locator::Locator;
//! use editkernel::mutator::Mutator;
//!
//! let mut state = EditorState::new(80, 24, Config::default());
//! Mutator::Composite(vec![
//!     Mutator::InsertRune('h'),
//!     Mutator::InsertRune('i'),
//!     Mutator::CursorAt(Locator::LineStart),
//! ])
//! .apply(&mut state);
//! assert_eq!(state.buffer.text_tree.to_string(), "hi");
//! assert_eq!(state.buffer.cursor.position, 0);
//! ```
//!
//! # Module map
//!
//! - [`error`] - error kinds and their disposition
//! - [`cellwidth`] - display-cell width of a grapheme cluster (UAX #11)
//! - [`direction`] - the `Forward`/`Backward` type shared across the crate
//! - [`text_tree`] - the rope-backed text storage interface
//! - [`graphemes`] - grapheme-cluster segmentation (UAX #29)
//! - [`tokens`] - tokenizer facade and incremental token tree
//! - [`buffer`] - per-document state: cursor, view, search, buffer
//! - [`line_ending`] - CRLF/LF detection and normalization
//! - [`status`] - status-bar message type
//! - [`config`] - per-path configuration rules
//! - [`file_io`] - load/save and external-change watching
//! - [`metrics`] - shared text-metrics helpers (cell offsets, line clusters)
//! - [`locator`] - the pure cursor-position algebra
//! - [`mutator`] - the composable, side-effecting buffer algebra
//! - [`view`] - scroll/viewport policy
//! - [`search`] - the incremental search state machine
//! - [`menu`] - the fuzzy command-menu state machine
//! - [`editor`] - the top-level orchestrator state a host embeds

pub mod buffer;
pub mod cellwidth;
pub mod config;
pub mod direction;
pub mod editor;
pub mod error;
pub mod file_io;
pub mod graphemes;
pub mod line_ending;
pub mod locator;
pub mod menu;
pub mod metrics;
pub mod mutator;
pub mod search;
pub mod status;
pub mod text_tree;
pub mod tokens;
pub mod view;

pub use buffer::{BufferState, CursorState, LanguageTag, SearchState, ViewState, PLAINTEXT};
pub use direction::Direction;
pub use editor::{EditorState, InputMode};
pub use error::{EditorError, Result};
pub use file_io::{FileCollaborator, SimpleFileCollaborator};
pub use locator::Locator;
pub use menu::{MenuItem, MenuState};
pub use mutator::Mutator;
