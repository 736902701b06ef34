//! Mutator algebra (C5): composable, side-effecting transformations of [`EditorState`].
//!
//! Where the locator algebra only ever reads a buffer, a [`Mutator`] is the one thing allowed to
//! change it. `Composite` and `AbortIfUnsavedChanges` let callers build bigger mutators out of
//! smaller ones, the same way key-binding tables compose a handful of primitive commands into
//! named actions.

use crate::buffer::{BufferState, CursorState};
use crate::config::PathConfig;
use crate::direction::Direction;
use crate::editor::{EditorState, InputMode};
use crate::file_io;
use crate::line_ending::LineEnding;
use crate::locator::Locator;
use crate::menu::MenuItem;
use crate::metrics::{cell_offset_from_line_start, cluster_before, leading_whitespace_end};
use crate::search;
use crate::status::StatusMessage;
use crate::text_tree::{RopeText, TextTree};
use crate::tokens::EditSpan;
use crate::view;

/// A composable, side-effecting transformation of [`EditorState`].
#[derive(Debug, Clone)]
pub enum Mutator {
    /// Runs each mutator in order.
    Composite(Vec<Mutator>),
    /// Runs `inner` unless `has_unsaved_changes` is set, in which case it reports an error
    /// status instead and leaves `inner` un-run.
    AbortIfUnsavedChanges(Box<Mutator>),

    /// Loads a file into a fresh buffer bound to `path`. If the file doesn't exist and
    /// `require_exists` is `false`, an empty buffer is created and bound instead ("New file").
    LoadDocument {
        /// The path to load.
        path: String,
        /// Whether a missing file should be reported as an error rather than treated as new.
        require_exists: bool,
    },
    /// Reloads the currently bound file from disk, discarding in-memory edits.
    ReloadDocument,
    /// Writes the buffer to `file_path`. Blocked by a watcher-observed external change unless
    /// `force` is set.
    SaveDocument {
        /// Overwrite even if the file changed on disk since it was loaded.
        force: bool,
    },

    /// Switches the modal input context.
    SetInputMode(InputMode),
    /// Replaces the status message.
    SetStatusMsg(StatusMessage),
    /// Updates the viewport's dimensions.
    Resize {
        /// New width in cells.
        width: u64,
        /// New height in cells.
        height: u64,
    },

    /// Moves the cursor to wherever `Locator` resolves to.
    CursorAt(Locator),
    /// Rescrolls the viewport to keep the cursor within the scroll margin.
    ScrollToCursor,
    /// Scrolls the viewport by `count` lines without moving the cursor.
    ScrollLines(Direction, u64),

    /// Inserts a single scalar at the cursor, advancing past it.
    InsertRune(char),
    /// Inserts a newline, re-indenting to match the current line when `auto_indent` is set.
    InsertNewline,
    /// Inserts a tab stop: spaces if `tab_expand`, a literal tab otherwise.
    InsertTab,
    /// Deletes the text between the cursor and wherever `Locator` resolves to.
    Delete(Locator),
    /// Deletes `count` whole lines starting at the cursor's line.
    DeleteLines(u64),
    /// Replaces the single cluster at the cursor with `char`, without moving the cursor.
    ReplaceChar(char),

    /// Sets the buffer's syntax language tag and retokenizes from scratch.
    SetSyntax(String),

    /// Opens the command menu with `prompt` over `load_items`. When `show_custom_items` is set,
    /// `EditorState::custom_menu_items` is appended after `load_items`. When
    /// `empty_query_show_all` is `false`, an empty query shows no results until the user types.
    ShowMenu {
        /// Prompt text shown alongside the query box.
        prompt: String,
        /// The items to show, before any custom items are merged in.
        load_items: Vec<MenuItem>,
        /// Whether an empty query shows every item or none.
        empty_query_show_all: bool,
        /// Whether to append `EditorState::custom_menu_items` to `load_items`.
        show_custom_items: bool,
    },
    /// Closes the command menu.
    HideMenu,
    /// Runs the selected menu item's shell command (via `scheduled_shell_cmd`) and closes the
    /// menu.
    ExecuteSelectedMenuItem,
    /// Moves the menu selection.
    MoveMenuSelection(Direction),
    /// Appends to the menu's search query.
    AppendMenuSearch(char),
    /// Removes the last character of the menu's search query.
    DeleteMenuSearch,

    /// Begins composing a search query in `Direction`.
    StartSearch(Direction),
    /// Abandons the composing search, restoring the previous query/direction.
    AbortSearch,
    /// Finalizes the composing search, moving the cursor to the match if one exists.
    CompleteSearch,
    /// Appends to the composing search query.
    AppendSearchQuery(char),
    /// Removes the last character of the composing search query.
    DeleteSearchQuery,
    /// Repeats the last completed search in `Direction`.
    FindNextMatch(Direction),

    /// Requests the host's event loop to exit.
    Quit,
}

impl Mutator {
    /// Applies this mutator to `state`.
    pub fn apply(&self, state: &mut EditorState) {
        match self {
            Mutator::Composite(children) => {
                for child in children {
                    child.apply(state);
                }
            }
            Mutator::AbortIfUnsavedChanges(inner) => {
                if state.has_unsaved_changes {
                    state.status_msg = Some(StatusMessage::error(
                        "unsaved changes; save or force to continue",
                    ));
                } else {
                    inner.apply(state);
                }
            }

            Mutator::LoadDocument {
                path,
                require_exists,
            } => load_document(state, path, *require_exists),
            Mutator::ReloadDocument => {
                if let Some(path) = state.file_path.clone() {
                    load_document(state, &path, true);
                } else {
                    state.status_msg = Some(StatusMessage::error("no file to reload"));
                }
            }
            Mutator::SaveDocument { force } => save_document(state, *force),

            Mutator::SetInputMode(mode) => state.input_mode = *mode,
            Mutator::SetStatusMsg(msg) => state.status_msg = Some(msg.clone()),
            Mutator::Resize { width, height } => {
                state.buffer.view.width = *width;
                state.buffer.view.height = *height;
                state.buffer.view = view::scroll_to_cursor(&state.buffer);
            }

            Mutator::CursorAt(locator) => {
                state.buffer.cursor = locator.locate(&state.buffer);
            }
            Mutator::ScrollToCursor => {
                state.buffer.view = view::scroll_to_cursor(&state.buffer);
            }
            Mutator::ScrollLines(dir, n) => {
                state.buffer.view = view::scroll_lines(&state.buffer, *dir, *n);
            }

            Mutator::InsertRune(c) => insert_rune(&mut state.buffer, *c, &mut state.has_unsaved_changes),
            Mutator::InsertNewline => insert_newline(&mut state.buffer, &mut state.has_unsaved_changes),
            Mutator::InsertTab => insert_tab(&mut state.buffer, &mut state.has_unsaved_changes),
            Mutator::Delete(locator) => delete(&mut state.buffer, locator, &mut state.has_unsaved_changes),
            Mutator::DeleteLines(count) => {
                delete_lines(&mut state.buffer, *count, &mut state.has_unsaved_changes)
            }
            Mutator::ReplaceChar(c) => {
                replace_char(&mut state.buffer, *c, &mut state.has_unsaved_changes)
            }

            Mutator::SetSyntax(lang) => set_syntax(&mut state.buffer, lang.clone()),

            Mutator::ShowMenu {
                prompt,
                load_items,
                empty_query_show_all,
                show_custom_items,
            } => {
                let mut items = load_items.clone();
                if *show_custom_items {
                    items.extend(state.custom_menu_items.iter().cloned());
                }
                state.menu.show(prompt.clone(), items, *empty_query_show_all);
                state.input_mode = InputMode::Menu;
            }
            Mutator::HideMenu => {
                state.menu.hide();
                state.input_mode = InputMode::Normal;
            }
            Mutator::ExecuteSelectedMenuItem => {
                let cmd = state
                    .menu
                    .search
                    .as_ref()
                    .and_then(|s| s.selected_item())
                    .map(|item| item.shell_cmd.clone());
                state.menu.hide();
                state.input_mode = InputMode::Normal;
                if let Some(cmd) = cmd {
                    state.scheduled_shell_cmd = Some(cmd);
                }
            }
            Mutator::MoveMenuSelection(dir) => {
                if let Some(search) = &mut state.menu.search {
                    search.move_selection(*dir);
                }
            }
            Mutator::AppendMenuSearch(c) => {
                if let Some(search) = &mut state.menu.search {
                    search.append_query(*c);
                }
            }
            Mutator::DeleteMenuSearch => {
                if let Some(search) = &mut state.menu.search {
                    search.delete_query();
                }
            }

            Mutator::StartSearch(dir) => {
                search::start(&mut state.buffer, *dir);
                state.input_mode = InputMode::Search;
            }
            Mutator::AbortSearch => {
                search::abort(&mut state.buffer);
                state.input_mode = InputMode::Normal;
            }
            Mutator::CompleteSearch => {
                if let Some(cursor) = search::complete(&state.buffer) {
                    state.buffer.cursor = cursor;
                }
                state.input_mode = InputMode::Normal;
            }
            Mutator::AppendSearchQuery(c) => search::append_query(&mut state.buffer, *c),
            Mutator::DeleteSearchQuery => search::delete_query(&mut state.buffer),
            Mutator::FindNextMatch(dir) => {
                if let Some((start, _end)) = search::find_next_match(&state.buffer, *dir) {
                    state.buffer.cursor = CursorState {
                        position: start,
                        logical_offset: 0,
                    };
                }
            }

            Mutator::Quit => state.quit_flag = true,
        }
    }
}

fn retokenize(buf: &mut BufferState, edit: EditSpan) {
    let (Some(tokenizer), Some(old_tree)) = (&buf.tokenizer, &buf.token_tree) else {
        return;
    };
    let new_text = buf.text_tree.to_string();
    match tokenizer.retokenize_after_edit(old_tree, edit, &new_text) {
        Ok(tree) => buf.token_tree = Some(tree),
        Err(e) => log::warn!("tokenizer error during retokenize: {e}"),
    }
}

fn insert_rune(buf: &mut BufferState, c: char, unsaved: &mut bool) {
    let pos = buf.cursor.position;
    if buf.text_tree.insert_at_position(pos, c).is_err() {
        return; // InvalidRune: silently ignored.
    }
    retokenize(
        buf,
        EditSpan {
            pos,
            inserted: 1,
            deleted: 0,
        },
    );
    buf.cursor = CursorState {
        position: pos + 1,
        logical_offset: 0,
    };
    *unsaved = true;
}

fn collect_text(buf: &BufferState, start: u64, end: u64) -> String {
    buf.text_tree
        .reader_at_position(start, Direction::Forward)
        .take((end - start) as usize)
        .collect()
}

fn insert_newline(buf: &mut BufferState, unsaved: &mut bool) {
    let pos = buf.cursor.position;
    let indent = if buf.auto_indent {
        let line = buf.text_tree.line_num_for_position(pos);
        let line_start = buf.text_tree.line_start_position(line);
        let end = leading_whitespace_end(buf, line).min(pos);
        collect_text(buf, line_start, end)
    } else {
        String::new()
    };

    let _ = buf.text_tree.insert_at_position(pos, '\n');
    let new_line_start = pos + 1;

    // Re-indenting means replacing the new line's own leading whitespace, not piling the
    // recomputed indent on top of whatever already followed the cursor.
    let deleted = if buf.auto_indent {
        let new_line = buf.text_tree.line_num_for_position(new_line_start);
        let ws_end = leading_whitespace_end(buf, new_line);
        let run = ws_end - new_line_start;
        for _ in 0..run {
            buf.text_tree.delete_at_position(new_line_start);
        }
        run
    } else {
        0
    };

    let mut at = new_line_start;
    for ch in indent.chars() {
        let _ = buf.text_tree.insert_at_position(at, ch);
        at += 1;
    }

    let inserted = 1 + (at - new_line_start);
    retokenize(
        buf,
        EditSpan {
            pos,
            inserted,
            deleted,
        },
    );
    buf.cursor = CursorState {
        position: at,
        logical_offset: 0,
    };
    *unsaved = true;
}

fn insert_tab(buf: &mut BufferState, unsaved: &mut bool) {
    let pos = buf.cursor.position;
    let tab_size = buf.tab_size.max(1);

    if buf.tab_expand {
        let offset = cell_offset_from_line_start(buf, pos);
        let width = tab_size - (offset % tab_size);
        let mut at = pos;
        for _ in 0..width {
            let _ = buf.text_tree.insert_at_position(at, ' ');
            at += 1;
        }
        retokenize(
            buf,
            EditSpan {
                pos,
                inserted: width,
                deleted: 0,
            },
        );
        buf.cursor = CursorState {
            position: at,
            logical_offset: 0,
        };
    } else {
        let _ = buf.text_tree.insert_at_position(pos, '\t');
        retokenize(
            buf,
            EditSpan {
                pos,
                inserted: 1,
                deleted: 0,
            },
        );
        buf.cursor = CursorState {
            position: pos + 1,
            logical_offset: 0,
        };
    }
    *unsaved = true;
}

fn delete(buf: &mut BufferState, locator: &Locator, unsaved: &mut bool) {
    let target = locator.locate(buf).position;
    let cursor = buf.cursor.position;
    let (start, end) = if target < cursor {
        (target, cursor)
    } else {
        (cursor, target)
    };
    if start == end {
        return;
    }
    let deleted = end - start;
    for _ in 0..deleted {
        buf.text_tree.delete_at_position(start);
    }
    retokenize(
        buf,
        EditSpan {
            pos: start,
            inserted: 0,
            deleted,
        },
    );
    buf.cursor = CursorState {
        position: start,
        logical_offset: 0,
    };
    *unsaved = true;
}

fn delete_lines(buf: &mut BufferState, count: u64, unsaved: &mut bool) {
    if count == 0 {
        return;
    }
    let n = buf.num_chars();
    let last_line = buf.last_line();
    let start_line = buf.text_tree.line_num_for_position(buf.cursor.position);
    let end_line_excl = start_line + count;

    let mut start = buf.text_tree.line_start_position(start_line);
    let end = if end_line_excl <= last_line {
        buf.text_tree.line_start_position(end_line_excl)
    } else {
        n
    };

    // Deleting through the document end shouldn't leave a dangling empty final line behind.
    if end == n && start > 0 {
        if let Some(prev) = cluster_before(buf, start) {
            if prev.has_newline {
                start -= prev.num_runes;
            }
        }
    }

    let deleted = end - start;
    if deleted == 0 {
        return;
    }
    for _ in 0..deleted {
        buf.text_tree.delete_at_position(start);
    }
    retokenize(
        buf,
        EditSpan {
            pos: start,
            inserted: 0,
            deleted,
        },
    );

    let new_n = buf.num_chars();
    let landing_line = start_line.min(buf.last_line());
    buf.cursor = CursorState {
        position: buf.text_tree.line_start_position(landing_line).min(new_n),
        logical_offset: 0,
    };
    *unsaved = true;
}

fn replace_char(buf: &mut BufferState, c: char, unsaved: &mut bool) {
    let pos = buf.cursor.position;
    if pos >= buf.num_chars() {
        return;
    }
    buf.text_tree.delete_at_position(pos);
    if buf.text_tree.insert_at_position(pos, c).is_err() {
        // Rejected rune (NUL): restore a space rather than silently shrinking the document.
        let _ = buf.text_tree.insert_at_position(pos, ' ');
    }
    retokenize(
        buf,
        EditSpan {
            pos,
            inserted: 1,
            deleted: 1,
        },
    );
    buf.cursor = CursorState {
        position: pos,
        logical_offset: 0,
    };
    *unsaved = true;
}

fn set_syntax(buf: &mut BufferState, lang: String) {
    buf.syntax_language = lang;
    let Some(tokenizer) = &buf.tokenizer else {
        return;
    };
    match tokenizer.tokenize_all(&buf.text_tree.to_string()) {
        Ok(tree) => buf.token_tree = Some(tree),
        Err(e) => log::warn!("tokenizer error during set_syntax: {e}"),
    }
}

fn apply_path_config(buf: &mut BufferState, cfg: &PathConfig) {
    buf.syntax_language = cfg.syntax_language.clone();
    buf.tab_size = cfg.tab_size.max(1);
    buf.tab_expand = cfg.tab_expand;
    buf.auto_indent = cfg.auto_indent;
    buf.tokenizer = Some(Box::new(crate::tokens::WordTokenizer));
    if let Some(tokenizer) = &buf.tokenizer {
        buf.token_tree = tokenizer.tokenize_all(&buf.text_tree.to_string()).ok();
    }
}

fn load_document(state: &mut EditorState, path: &str, require_exists: bool) {
    let cfg = state.config.for_path(path);
    let (width, height) = (state.buffer.view.width, state.buffer.view.height);
    let custom_menu_items: Vec<MenuItem> = cfg
        .menu_commands
        .iter()
        .map(|c| MenuItem::new(c.name.clone(), c.shell_cmd.clone()))
        .collect();

    match file_io::load(path, state.poll_interval) {
        Ok(doc) => {
            let mut buf = BufferState::from_text(RopeText::from_str(&doc.text), width, height);
            apply_path_config(&mut buf, &cfg);
            state.buffer = buf;
            state.file_path = Some(path.to_string());
            state.line_ending = doc.line_ending;
            state.watcher = Some(doc.watcher);
            state.has_unsaved_changes = false;
            state.custom_menu_items = custom_menu_items;
            state.status_msg = Some(StatusMessage::success(format!(
                "opened {}",
                file_io::relative_path_cwd(path)
            )));
        }
        Err(crate::error::EditorError::LoadNotFound(_)) if !require_exists => {
            let mut buf = BufferState::empty(width, height);
            apply_path_config(&mut buf, &cfg);
            state.buffer = buf;
            state.file_path = Some(path.to_string());
            state.line_ending = LineEnding::Lf;
            state.watcher = None;
            state.has_unsaved_changes = false;
            state.custom_menu_items = custom_menu_items;
            state.status_msg = Some(StatusMessage::info("New file"));
        }
        Err(e) => {
            state.status_msg = Some(StatusMessage::error(e.to_string()));
        }
    }
}

fn save_document(state: &mut EditorState, force: bool) {
    let Some(path) = state.file_path.clone() else {
        state.status_msg = Some(StatusMessage::error("no file path set"));
        return;
    };
    if !force && state.file_changed_on_disk() {
        state.status_msg = Some(StatusMessage::error(
            crate::error::EditorError::SaveBlockedByWatcher.to_string(),
        ));
        return;
    }

    let text = state.buffer.text_tree.to_string();
    match file_io::save(&path, &text, state.line_ending, state.poll_interval) {
        Ok(watcher) => {
            state.watcher = Some(watcher);
            state.has_unsaved_changes = false;
            state.status_msg = Some(StatusMessage::success(format!(
                "saved {}",
                file_io::relative_path_cwd(&path)
            )));
        }
        Err(e) => {
            state.status_msg = Some(StatusMessage::error(e.to_string()));
        }
    }
}
