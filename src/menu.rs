//! Menu state machine (C8): a fuzzy-searchable command palette.
//!
//! Items are ranked with `nucleo-matcher`'s fuzzy scorer, the same approach editors like Helix
//! use for their pickers. Re-querying always recomputes the full ranked result set rather than
//! filtering the previous one, so results never drift from what a fresh search over `items`
//! would produce.

use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};

use crate::direction::Direction;

/// A single selectable menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    /// Display name, and the text fuzzy-matched against.
    pub name: String,
    /// The shell command line to run if this item is executed. The kernel never runs this
    /// itself — see [`crate::editor::EditorState::scheduled_shell_cmd`].
    pub shell_cmd: String,
}

impl MenuItem {
    /// Builds a menu item.
    pub fn new(name: impl Into<String>, shell_cmd: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shell_cmd: shell_cmd.into(),
        }
    }
}

/// The full set of items a menu search ranks over, plus the live query and ranked results.
pub struct MenuSearch {
    items: Vec<MenuItem>,
    query: String,
    /// Indices into `items`, ranked best-match-first.
    results: Vec<usize>,
    /// Index into `results`, not `items`.
    selected_result_idx: usize,
    /// Whether an empty query shows every item (stable order) or none at all.
    empty_query_show_all: bool,
}

impl MenuSearch {
    /// Builds a menu search over `items` with an empty query.
    pub fn new(items: Vec<MenuItem>, empty_query_show_all: bool) -> Self {
        let results = if empty_query_show_all {
            (0..items.len()).collect()
        } else {
            Vec::new()
        };
        Self {
            items,
            query: String::new(),
            results,
            selected_result_idx: 0,
            empty_query_show_all,
        }
    }

    /// The live query text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The current ranked results, as indices into the item list.
    pub fn results(&self) -> &[usize] {
        &self.results
    }

    /// The currently selected item, if any results exist.
    pub fn selected_item(&self) -> Option<&MenuItem> {
        self.results
            .get(self.selected_result_idx)
            .map(|&i| &self.items[i])
    }

    /// Re-ranks `items` against `query`, resetting the selection to the top result.
    ///
    /// An empty query matches every item, in original order, when `empty_query_show_all` was set
    /// at construction; otherwise it matches none. A non-empty query ranks by fuzzy score
    /// (highest first), dropping non-matches entirely, regardless of that flag.
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.results = rank(&self.items, query, self.empty_query_show_all);
        self.selected_result_idx = 0;
    }

    /// Appends `c` to the query and re-ranks.
    pub fn append_query(&mut self, c: char) {
        let mut q = self.query.clone();
        q.push(c);
        self.set_query(&q);
    }

    /// Removes the last character of the query (if any) and re-ranks.
    pub fn delete_query(&mut self) {
        let mut q = self.query.clone();
        q.pop();
        self.set_query(&q);
    }

    /// Moves the selection one result in `dir`, wrapping around at either end.
    pub fn move_selection(&mut self, dir: Direction) {
        if self.results.is_empty() {
            return;
        }
        let n = self.results.len();
        self.selected_result_idx = match dir {
            Direction::Forward => (self.selected_result_idx + 1) % n,
            Direction::Backward => (self.selected_result_idx + n - 1) % n,
        };
    }
}

fn rank(items: &[MenuItem], query: &str, empty_query_show_all: bool) -> Vec<usize> {
    if query.is_empty() {
        return if empty_query_show_all {
            (0..items.len()).collect()
        } else {
            Vec::new()
        };
    }
    let mut matcher = Matcher::new(Config::DEFAULT);
    let pattern = Pattern::parse(query, CaseMatching::Smart, Normalization::Smart);
    let mut scored: Vec<(usize, u32)> = items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| {
            let mut buf = Vec::new();
            let haystack = Utf32Str::new(&item.name, &mut buf);
            pattern.score(haystack, &mut matcher).map(|score| (i, score))
        })
        .collect();
    scored.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    scored.into_iter().map(|(i, _)| i).collect()
}

/// Whether the command menu is currently shown, its prompt, and its live search.
pub struct MenuState {
    /// The prompt text shown alongside the query box. Empty when the menu is hidden.
    pub prompt: String,
    /// `None` when the menu is hidden.
    pub search: Option<MenuSearch>,
}

impl MenuState {
    /// Builds a hidden menu.
    pub fn hidden() -> Self {
        Self {
            prompt: String::new(),
            search: None,
        }
    }

    /// Whether the menu is currently visible.
    pub fn is_visible(&self) -> bool {
        self.search.is_some()
    }

    /// Shows the menu with `prompt` over `items`, starting with an empty query. When
    /// `empty_query_show_all` is `false`, the empty query shows no results until the user types.
    pub fn show(&mut self, prompt: impl Into<String>, items: Vec<MenuItem>, empty_query_show_all: bool) {
        self.prompt = prompt.into();
        self.search = Some(MenuSearch::new(items, empty_query_show_all));
    }

    /// Hides the menu, discarding its prompt and search state.
    pub fn hide(&mut self) {
        self.prompt.clear();
        self.search = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<MenuItem> {
        vec![
            MenuItem::new("open file", "echo open"),
            MenuItem::new("save file", "echo save"),
            MenuItem::new("quit", "echo quit"),
        ]
    }

    #[test]
    fn empty_query_shows_all_items_in_order() {
        let m = MenuSearch::new(items(), true);
        assert_eq!(m.results(), &[0, 1, 2]);
    }

    #[test]
    fn empty_query_shows_nothing_when_configured_off() {
        let m = MenuSearch::new(items(), false);
        assert!(m.results().is_empty());
        assert!(m.selected_item().is_none());
    }

    #[test]
    fn query_ranks_by_fuzzy_match() {
        let mut m = MenuSearch::new(items(), true);
        m.set_query("file");
        assert_eq!(m.results().len(), 2);
        assert!(m.results().contains(&0));
        assert!(m.results().contains(&1));
        assert!(!m.results().contains(&2));
    }

    #[test]
    fn non_empty_query_matches_regardless_of_empty_query_show_all() {
        let mut m = MenuSearch::new(items(), false);
        m.set_query("quit");
        assert_eq!(m.selected_item().unwrap().name, "quit");
    }

    #[test]
    fn set_query_resets_selection() {
        let mut m = MenuSearch::new(items(), true);
        m.move_selection(Direction::Forward);
        assert_eq!(m.selected_result_idx, 1);
        m.set_query("q");
        assert_eq!(m.selected_result_idx, 0);
    }

    #[test]
    fn move_selection_wraps_around() {
        let mut m = MenuSearch::new(items(), true);
        m.move_selection(Direction::Backward);
        assert_eq!(m.selected_item().unwrap().name, "quit");
        m.move_selection(Direction::Forward);
        assert_eq!(m.selected_item().unwrap().name, "open file");
    }

    #[test]
    fn append_and_delete_query_rerank() {
        let mut m = MenuSearch::new(items(), true);
        m.append_query('q');
        assert_eq!(m.query(), "q");
        assert_eq!(m.selected_item().unwrap().name, "quit");
        m.delete_query();
        assert_eq!(m.query(), "");
        assert_eq!(m.results(), &[0, 1, 2]);
    }

    #[test]
    fn show_and_hide() {
        let mut state = MenuState::hidden();
        assert!(!state.is_visible());
        state.show("Run command", items(), true);
        assert!(state.is_visible());
        assert_eq!(state.prompt, "Run command");
        state.hide();
        assert!(!state.is_visible());
        assert!(state.prompt.is_empty());
    }
}
