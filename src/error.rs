//! Error kinds and their dispositions.
//!
//! Most of these are not meant to abort a session: the orchestrator (see [`crate::editor`])
//! turns them into a [`crate::status::StatusMessage`] or silently ignores them, per operation.
//! [`EditorError::InvalidArgument`] is the one exception — it signals a programming error at
//! locator/mutator construction time, not a runtime condition a user can trigger.

use thiserror::Error;

/// Errors produced by the editor kernel.
#[derive(Debug, Error)]
pub enum EditorError {
    /// `insert_rune_at` was asked to insert a scalar the text tree rejects.
    ///
    /// Disposition: silently ignored; the caller continues with the next operation.
    #[error("invalid rune")]
    InvalidRune,

    /// A tokenizer failed during `tokenize_all` or `retokenize_after_edit`.
    ///
    /// Disposition: logged; the token tree is left at its previous value.
    #[error("tokenizer error: {0}")]
    TokenizerError(String),

    /// `load` was called with `require_exists=false` and the path did not exist.
    ///
    /// Disposition: an empty buffer is created and bound to the path; reported as "New file".
    #[error("file not found: {0}")]
    LoadNotFound(String),

    /// `load` failed for a reason other than the file not existing.
    ///
    /// Disposition: error status; no state mutation.
    #[error("failed to load {path}: {source}")]
    LoadError {
        /// Path that failed to load.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// `save` was blocked because the file watcher observed an on-disk change and the save was
    /// not forced.
    ///
    /// Disposition: error status instructing the user to force-save; no write performed.
    #[error("file changed on disk since last load; use force save to overwrite")]
    SaveBlockedByWatcher,

    /// `save` failed for a reason other than a watcher conflict.
    ///
    /// Disposition: error status; no state mutation.
    #[error("failed to save {path}: {source}")]
    SaveError {
        /// Path that failed to save.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Per-path configuration failed validation.
    ///
    /// Disposition: error status; note that by the time this is raised during `load`, the text
    /// tree and watcher may already have been swapped in.
    #[error("invalid configuration: {0}")]
    ConfigInvalid(String),

    /// A locator or mutator was constructed with an argument outside its documented domain
    /// (e.g. `CharInLine` with `n = 0`).
    ///
    /// Disposition: fatal; this is a programming error, not a recoverable runtime condition.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EditorError>;
