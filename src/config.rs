//! Configuration inputs (§6, C12).
//!
//! Parsing a config file (TOML/JSON/etc.) is out of scope for this crate; hosts parse their own
//! config format and hand the orchestrator an already-built [`Config`]. This module only carries
//! the data shape and the per-path lookup rule.

use crate::buffer::LanguageTag;

/// A single named menu command backed by a shell command (executed by the host, never by the
/// kernel — see [`crate::editor::EditorState::scheduled_shell_cmd`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuCommand {
    /// The name shown in the command menu.
    pub name: String,
    /// The shell command line to run when selected.
    pub shell_cmd: String,
}

/// Settings that apply to documents matching a given path glob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathConfig {
    /// A glob pattern (e.g. `"**/*.go"`) identifying which paths this rule applies to.
    pub path_glob: String,
    /// The syntax language to load files matching this rule with.
    pub syntax_language: LanguageTag,
    /// Tab stop width in cells.
    pub tab_size: u64,
    /// Whether `InsertTab` expands to spaces.
    pub tab_expand: bool,
    /// Whether `InsertNewline` re-indents.
    pub auto_indent: bool,
    /// Custom menu commands contributed for paths matching this rule.
    pub menu_commands: Vec<MenuCommand>,
    /// Directory names to hide from file-search/open menus.
    pub hide_directories: Vec<String>,
}

impl PathConfig {
    /// A permissive default: plaintext, 4-wide expanded tabs, auto-indent on, no extra commands.
    pub fn default_for_glob(path_glob: impl Into<String>) -> Self {
        Self {
            path_glob: path_glob.into(),
            syntax_language: crate::buffer::PLAINTEXT.to_string(),
            tab_size: 4,
            tab_expand: true,
            auto_indent: true,
            menu_commands: Vec::new(),
            hide_directories: vec![".git".to_string()],
        }
    }
}

/// The full, already-parsed configuration: an ordered list of per-path rules.
///
/// Later rules override earlier ones for any field they set; [`Config::for_path`] returns the
/// rule to apply for a given path by picking the last matching glob (this mirrors a typical
/// cascading "defaults, then overrides" config file).
#[derive(Debug, Clone, Default)]
pub struct Config {
    rules: Vec<PathConfig>,
}

impl Config {
    /// Builds a config from already-parsed path rules, in file order.
    pub fn new(rules: Vec<PathConfig>) -> Self {
        Self { rules }
    }

    /// Returns the configuration that applies to `path`: the last rule whose glob matches,
    /// falling back to a permissive default if none match.
    pub fn for_path(&self, path: &str) -> PathConfig {
        self.rules
            .iter()
            .rev()
            .find(|rule| glob_match(&rule.path_glob, path))
            .cloned()
            .unwrap_or_else(|| PathConfig::default_for_glob("**"))
    }
}

/// A minimal glob matcher supporting `*` (any run of non-separator chars) and `**` (any run of
/// chars, separators included). Parsing real gitignore-style globs is out of scope; hosts that
/// need full glob semantics can pre-resolve `path_glob` before building a [`Config`].
fn glob_match(pattern: &str, path: &str) -> bool {
    if pattern == "**" {
        return true;
    }
    if let Some(suffix) = pattern.strip_prefix("**/*.") {
        return path.ends_with(&format!(".{suffix}"));
    }
    if let Some(suffix) = pattern.strip_prefix('*') {
        return path.ends_with(suffix);
    }
    pattern == path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_path_falls_back_to_default() {
        let cfg = Config::new(vec![]);
        let resolved = cfg.for_path("main.rs");
        assert_eq!(resolved.syntax_language, crate::buffer::PLAINTEXT);
    }

    #[test]
    fn for_path_picks_matching_extension_rule() {
        let mut rule = PathConfig::default_for_glob("**/*.go");
        rule.syntax_language = "go".to_string();
        rule.tab_size = 8;
        rule.tab_expand = false;
        let cfg = Config::new(vec![rule]);
        let resolved = cfg.for_path("src/main.go");
        assert_eq!(resolved.syntax_language, "go");
        assert_eq!(resolved.tab_size, 8);
    }

    #[test]
    fn later_rule_overrides_earlier_on_conflicting_match() {
        let mut general = PathConfig::default_for_glob("**/*.go");
        general.tab_size = 8;
        let mut specific = PathConfig::default_for_glob("**/*.go");
        specific.tab_size = 2;
        let cfg = Config::new(vec![general, specific]);
        assert_eq!(cfg.for_path("a.go").tab_size, 2);
    }
}
