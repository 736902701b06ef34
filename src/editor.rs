//! Editor orchestrator (C10): the top-level state a host embeds, and the input mode it is in.
//!
//! `EditorState` owns exactly one open [`BufferState`] plus everything outside a single
//! document's concern — the menu, the file watcher, unsaved-changes tracking, and the slot a
//! scheduled shell command waits in for the host to actually run (the kernel never spawns
//! processes itself).

use std::time::Duration;

use crate::buffer::BufferState;
use crate::config::Config;
use crate::file_io::FileWatcher;
use crate::line_ending::LineEnding;
use crate::menu::{MenuItem, MenuState};
use crate::status::StatusMessage;

/// Which of the four modal input contexts the editor is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Motions and commands; the default mode.
    Normal,
    /// Keystrokes insert text at the cursor.
    Insert,
    /// The command menu is open and capturing its search query.
    Menu,
    /// A search query is being composed.
    Search,
}

/// Default interval the file watcher polls at. Frequent enough that external changes are
/// noticed well within a user's think-time between keystrokes, without busy-polling.
pub const DEFAULT_WATCHER_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// The full state a host drives via [`crate::mutator::Mutator::apply`].
pub struct EditorState {
    /// The single open document.
    pub buffer: BufferState,
    /// The current modal input context.
    pub input_mode: InputMode,
    /// The command menu's visibility and live search.
    pub menu: MenuState,
    /// The most recent status-bar message, if any.
    pub status_msg: Option<StatusMessage>,
    /// Whether `buffer` has edits not yet written to `file_path`.
    pub has_unsaved_changes: bool,
    /// Set by `Mutator::Quit`; the host checks this after each batch of mutators and exits its
    /// event loop when it flips to `true`.
    pub quit_flag: bool,
    /// The path `buffer` is bound to, if it has been loaded from or saved to one.
    pub file_path: Option<String>,
    /// The line ending to re-apply when `buffer` is next saved.
    pub line_ending: LineEnding,
    /// A background watcher for external changes to `file_path`, if bound.
    pub watcher: Option<FileWatcher>,
    /// Per-path configuration rules.
    pub config: Config,
    /// A shell command the host should run and clear, set by executing a menu item. The kernel
    /// never spawns processes itself.
    pub scheduled_shell_cmd: Option<String>,
    /// Interval the file watcher polls at.
    pub poll_interval: Duration,
    /// Menu commands contributed by the config rule matching the currently bound path, adopted on
    /// load. `ShowMenu { show_custom_items: true, .. }` merges these in alongside its own items.
    pub custom_menu_items: Vec<MenuItem>,
}

impl EditorState {
    /// Builds an editor over a fresh, empty, unbound buffer.
    pub fn new(width: u64, height: u64, config: Config) -> Self {
        Self {
            buffer: BufferState::empty(width, height),
            input_mode: InputMode::Normal,
            menu: MenuState::hidden(),
            status_msg: None,
            has_unsaved_changes: false,
            quit_flag: false,
            file_path: None,
            line_ending: LineEnding::Lf,
            watcher: None,
            config,
            scheduled_shell_cmd: None,
            poll_interval: DEFAULT_WATCHER_POLL_INTERVAL,
            custom_menu_items: Vec::new(),
        }
    }

    /// Takes and clears the scheduled shell command, if any. Hosts call this after every
    /// mutator batch to see whether there's a command to run.
    pub fn take_scheduled_shell_cmd(&mut self) -> Option<String> {
        self.scheduled_shell_cmd.take()
    }

    /// Non-blocking check for whether the watched file changed on disk since load/save. Hosts
    /// poll this (or the watcher's channel directly) between input events.
    pub fn file_changed_on_disk(&self) -> bool {
        self.watcher.as_ref().is_some_and(|w| w.changed_flag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_editor_is_unbound_and_not_quitting() {
        let state = EditorState::new(80, 24, Config::default());
        assert_eq!(state.input_mode, InputMode::Normal);
        assert!(!state.quit_flag);
        assert!(state.file_path.is_none());
        assert!(!state.has_unsaved_changes);
    }
}
