//! Tokenizer facade (C9) and parallel token tree.
//!
//! Per-language tokenizer implementations (tree-sitter grammars, LSP semantic tokens, …) are out
//! of scope for this crate; what lives here is the uniform interface C3 invokes on every edit
//! (the [`Tokenizer`] trait) plus one reference implementation, [`WordTokenizer`], used by tests
//! and as the default "plaintext with word/number/punctuation tokens" tokenizer.
//!
//! The defining correctness property: for any edit, `retokenize_after_edit` must produce exactly
//! the token tree a fresh `tokenize_all` over the post-edit text would produce. [`WordTokenizer`]
//! satisfies this by construction — see its module-level test — rather than by convention.

use std::sync::OnceLock;

use regex::Regex;

use crate::direction::Direction;
use crate::error::{EditorError, Result};

/// Coarse syntax role tag for a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenRole {
    /// No specific role.
    None,
    /// A generic word.
    Word,
    /// An identifier (variable/function name, etc.).
    Identifier,
    /// A language keyword.
    Keyword,
    /// A numeric literal.
    Number,
    /// A string literal's contents.
    String,
    /// A string literal's opening/closing quote.
    StringQuote,
    /// A comment's contents.
    Comment,
    /// A comment's delimiter (`//`, `/*`, `*/`, …).
    CommentDelimiter,
    /// Punctuation (brackets, commas, …).
    Punctuation,
    /// An operator (`+`, `=`, …).
    Operator,
    /// A key in a key-value structure (JSON/YAML/etc.).
    Key,
    /// Language-specific extension role 1.
    Custom1,
    /// Language-specific extension role 2.
    Custom2,
    /// Language-specific extension role 3.
    Custom3,
    /// Language-specific extension role 4.
    Custom4,
    /// Language-specific extension role 5.
    Custom5,
    /// Language-specific extension role 6.
    Custom6,
    /// Language-specific extension role 7.
    Custom7,
    /// Language-specific extension role 8.
    Custom8,
}

/// A single token: a half-open code-point range plus its role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// Start position (inclusive), in code points.
    pub start_pos: u64,
    /// End position (exclusive), in code points.
    pub end_pos: u64,
    /// The token's syntax role.
    pub role: TokenRole,
}

/// A description of a single text edit, as C3 reports it to the tokenizer facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditSpan {
    /// Position (in the *pre-edit* text) where the edit starts.
    pub pos: u64,
    /// Number of code points inserted at `pos`.
    pub inserted: u64,
    /// Number of code points deleted starting at `pos`.
    pub deleted: u64,
}

/// A parallel structure of tokens, sorted by `start_pos`, supporting forward/backward iteration
/// from any position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenTree {
    tokens: Vec<Token>,
}

impl TokenTree {
    /// Builds a token tree from an already sorted, non-overlapping token list.
    pub fn new(tokens: Vec<Token>) -> Self {
        debug_assert!(tokens.windows(2).all(|w| w[0].end_pos <= w[1].start_pos));
        Self { tokens }
    }

    /// All tokens, in document order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Iterates tokens starting at `pos`, walking in `dir`.
    ///
    /// Forward iteration starts at the first token whose `end_pos > pos`; backward iteration
    /// starts at the last token whose `start_pos < pos`.
    pub fn iter_from_position(&self, pos: u64, dir: Direction) -> TokenIter<'_> {
        let idx = match dir {
            Direction::Forward => self.tokens.partition_point(|t| t.end_pos <= pos),
            Direction::Backward => {
                let count_before = self.tokens.partition_point(|t| t.start_pos < pos);
                count_before
            }
        };
        TokenIter {
            tokens: &self.tokens,
            next_idx: idx,
            dir,
        }
    }

    /// The token containing `pos`, if any.
    pub fn token_at(&self, pos: u64) -> Option<&Token> {
        self.tokens
            .iter()
            .find(|t| t.start_pos <= pos && pos < t.end_pos)
    }
}

/// A cursor over a [`TokenTree`], advancing in one direction.
pub struct TokenIter<'a> {
    tokens: &'a [Token],
    next_idx: usize,
    dir: Direction,
}

impl<'a> Iterator for TokenIter<'a> {
    type Item = &'a Token;

    fn next(&mut self) -> Option<&'a Token> {
        match self.dir {
            Direction::Forward => {
                let t = self.tokens.get(self.next_idx)?;
                self.next_idx += 1;
                Some(t)
            }
            Direction::Backward => {
                if self.next_idx == 0 {
                    return None;
                }
                self.next_idx -= 1;
                self.tokens.get(self.next_idx)
            }
        }
    }
}

/// The uniform interface C3 invokes to (re)tokenize a document.
pub trait Tokenizer {
    /// Tokenizes the entire document from scratch.
    fn tokenize_all(&self, text: &str) -> Result<TokenTree>;

    /// Incrementally updates `tree` (which reflects `text` *before* `edit` was applied) to
    /// reflect `new_text` (the text *after* `edit`).
    ///
    /// The default implementation just calls [`Tokenizer::tokenize_all`] again; this always
    /// satisfies the defining correctness property but is not actually incremental.
    fn retokenize_after_edit(
        &self,
        tree: &TokenTree,
        edit: EditSpan,
        new_text: &str,
    ) -> Result<TokenTree> {
        let _ = (tree, edit);
        self.tokenize_all(new_text)
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn number_lead_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]").expect("static pattern"))
}

fn role_for_word(word: &str) -> TokenRole {
    if number_lead_pattern().is_match(word) {
        TokenRole::Number
    } else {
        TokenRole::Word
    }
}

/// A small reference tokenizer: splits text into word-or-number runs (`[A-Za-z0-9_]+`,
/// classified `Number` vs. `Word` by a regex on the run's leading character), single-char
/// punctuation/operator tokens, and leaves whitespace untokenized.
///
/// Not meant to model any real language; it exists so the incremental-retokenization contract
/// (C9's defining property) has a concrete, fully-tested implementation to validate against.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordTokenizer;

impl WordTokenizer {
    fn scan(chars: &[char], offset: u64) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut i = 0usize;
        while i < chars.len() {
            let c = chars[i];
            if c.is_whitespace() {
                i += 1;
                continue;
            }
            if is_word_char(c) {
                let start = i;
                while i < chars.len() && is_word_char(chars[i]) {
                    i += 1;
                }
                let word: String = chars[start..i].iter().collect();
                tokens.push(Token {
                    start_pos: offset + start as u64,
                    end_pos: offset + i as u64,
                    role: role_for_word(&word),
                });
            } else {
                tokens.push(Token {
                    start_pos: offset + i as u64,
                    end_pos: offset + i as u64 + 1,
                    role: TokenRole::Punctuation,
                });
                i += 1;
            }
        }
        tokens
    }

    /// Extends `pos` backward to the start of the word run it is inside of (or `pos` itself if
    /// it is on whitespace/punctuation or at the document start).
    fn extend_left(chars: &[char], pos: usize) -> usize {
        let mut i = pos;
        while i > 0 && is_word_char(chars[i - 1]) {
            i -= 1;
        }
        i
    }

    /// Extends `pos` forward past the end of the word run starting at or after `pos`.
    fn extend_right(chars: &[char], pos: usize) -> usize {
        let mut i = pos;
        while i < chars.len() && is_word_char(chars[i]) {
            i += 1;
        }
        i
    }
}

impl Tokenizer for WordTokenizer {
    fn tokenize_all(&self, text: &str) -> Result<TokenTree> {
        let chars: Vec<char> = text.chars().collect();
        Ok(TokenTree::new(Self::scan(&chars, 0)))
    }

    fn retokenize_after_edit(
        &self,
        tree: &TokenTree,
        edit: EditSpan,
        new_text: &str,
    ) -> Result<TokenTree> {
        let new_chars: Vec<char> = new_text.chars().collect();
        let new_len = new_chars.len() as u64;
        let delta = edit.inserted as i64 - edit.deleted as i64;

        let pos = edit.pos.min(new_len);
        let inserted_end = (edit.pos + edit.inserted).min(new_len);

        let left = Self::extend_left(&new_chars, pos as usize) as u64;
        let right = Self::extend_right(&new_chars, inserted_end as usize) as u64;

        let before: Vec<Token> = tree
            .tokens()
            .iter()
            .copied()
            .filter(|t| t.end_pos <= left)
            .collect();

        // Old-text threshold: an old token entirely at/after this position lies wholly after the
        // edited span and can be kept, shifted by `delta`.
        let old_after_threshold = (right as i64 - delta).max(0) as u64;
        let after: Vec<Token> = tree
            .tokens()
            .iter()
            .copied()
            .filter(|t| t.start_pos >= old_after_threshold)
            .map(|t| Token {
                start_pos: (t.start_pos as i64 + delta) as u64,
                end_pos: (t.end_pos as i64 + delta) as u64,
                role: t.role,
            })
            .collect();

        let middle_text = &new_chars[left as usize..right as usize];
        let middle = Self::scan(middle_text, left);

        let mut tokens = before;
        tokens.extend(middle);
        tokens.extend(after);
        Ok(TokenTree::new(tokens))
    }
}

/// Errors a [`Tokenizer`] implementation may raise. Kept separate from [`EditorError`] so that
/// `Tokenizer` implementations outside this crate don't need to depend on our error enum.
pub fn tokenizer_error(msg: impl Into<String>) -> EditorError {
    EditorError::TokenizerError(msg.into())
}
