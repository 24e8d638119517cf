//! A small language-agnostic lexer.
//!
//! [`GenericLexer`] recognises the lexical shapes shared by most C-family languages: `//` and `/* */` comments,
//! numbers, identifiers and keywords, double-quoted strings, and single-character operators. It exists to drive
//! [`StyleContext`] end to end from the CLI and the test suite.
//!
//! ## Notes
//!
//! - Block comments span lines. A line whose terminator is inside a block comment gets line state
//!   [`LINE_IN_BLOCK_COMMENT`], so a later scan can restart at the next line in the right state.
//! - Line comments and strings never continue onto the next line.

use stylescan_core::StateMask;
use stylescan_core::charset::{CharacterSet, is_a_digit, is_line_end};
use stylescan_core::words::WordList;
use stylescan_syntax::{Accessor, ScanRange, StyleContext, back_to_line_start};

/// Style ids written by [`GenericLexer`].
pub mod style {
    pub const DEFAULT: u32 = 0;
    pub const COMMENT: u32 = 1;
    pub const BLOCK_COMMENT: u32 = 2;
    pub const NUMBER: u32 = 3;
    pub const WORD: u32 = 4;
    pub const KEYWORD: u32 = 5;
    pub const STRING: u32 = 6;
    pub const OPERATOR: u32 = 7;

    /// Display name of a style id.
    pub fn name(style: u32) -> &'static str {
        match style {
            DEFAULT => "default",
            COMMENT => "comment",
            BLOCK_COMMENT => "block-comment",
            NUMBER => "number",
            WORD => "word",
            KEYWORD => "keyword",
            STRING => "string",
            OPERATOR => "operator",
            _ => "unknown",
        }
    }
}

/// Line state of a line that ends inside a block comment.
pub const LINE_IN_BLOCK_COMMENT: i32 = 1;

/// Longest word checked against the keyword list.
const MAX_KEYWORD_LEN: usize = 64;

const WORD_START: CharacterSet = CharacterSet::new()
    .with_lower()
    .with_upper()
    .with_chars("_")
    .with_value_after(true);
const WORD_CHARS: CharacterSet = WORD_START.with_digits();
const OPERATORS: CharacterSet = CharacterSet::new().with_chars("+-*/%=<>!&|^~?:;,.()[]{}");

#[derive(Debug, Clone, Default)]
pub struct GenericLexer {
    keywords: WordList,
}

impl GenericLexer {
    /// `keywords` must be lower case; words are matched case-insensitively.
    pub fn new(keywords: WordList) -> Self {
        Self { keywords }
    }

    pub fn keywords(&self) -> &WordList {
        &self.keywords
    }

    /// Style `length` bytes from `start`, beginning in `init_state`.
    #[tracing::instrument(skip_all, fields(start = start, length = length, init_state = init_state))]
    pub fn lex<A: Accessor + ?Sized>(&self, accessor: &mut A, start: usize, length: usize, init_state: u32, mask: StateMask) {
        let mut sc = StyleContext::with_mask(start, length, init_state, accessor, mask);

        while sc.more() {
            if sc.at_line_start() && matches!(sc.state(), style::COMMENT | style::STRING) {
                sc.set_state(style::DEFAULT);
            }

            match sc.state() {
                style::DEFAULT => {}
                style::OPERATOR => sc.set_state(style::DEFAULT),
                style::NUMBER => {
                    if !WORD_CHARS.contains(sc.ch()) && !sc.matches(b'.') {
                        sc.set_state(style::DEFAULT);
                    }
                }
                style::WORD | style::KEYWORD => {
                    if !WORD_CHARS.contains(sc.ch()) {
                        self.classify_word(&mut sc);
                        sc.set_state(style::DEFAULT);
                    }
                }
                style::COMMENT => {}
                style::BLOCK_COMMENT => {
                    if sc.matches_pair(b'*', b'/') {
                        sc.advance();
                        sc.advance_and_set_state(style::DEFAULT);
                    }
                }
                style::STRING => {
                    if sc.matches(b'\\') {
                        if !is_line_end(sc.ch_next()) {
                            sc.advance();
                        }
                    } else if sc.matches(b'"') {
                        sc.advance_and_set_state(style::DEFAULT);
                    }
                }
                other => {
                    tracing::trace!(state = other, pos = sc.current_pos(), "unknown state reset to default");
                    sc.set_state(style::DEFAULT);
                }
            }

            if sc.state() == style::DEFAULT {
                if sc.matches_pair(b'/', b'/') {
                    sc.set_state(style::COMMENT);
                } else if sc.matches_pair(b'/', b'*') {
                    sc.set_state(style::BLOCK_COMMENT);
                    // Skip the '*' so "/*/" does not close itself.
                    sc.advance();
                } else if is_a_digit(sc.ch()) {
                    sc.set_state(style::NUMBER);
                } else if WORD_START.contains(sc.ch()) {
                    sc.set_state(style::WORD);
                } else if sc.matches(b'"') {
                    sc.set_state(style::STRING);
                } else if OPERATORS.contains(sc.ch()) {
                    sc.set_state(style::OPERATOR);
                }
            }

            if sc.at_line_end() {
                let line = sc.current_line();
                let line_state = if sc.state() == style::BLOCK_COMMENT {
                    LINE_IN_BLOCK_COMMENT
                } else {
                    0
                };
                sc.accessor_mut().set_line_state(line, line_state);
            }

            sc.advance();
        }

        if matches!(sc.state(), style::WORD | style::KEYWORD) {
            self.classify_word(&mut sc);
        }
        sc.finish();
    }

    /// Re-style `range` after widening it to a line start, resuming from the previous line's state.
    pub fn lex_from_line<A: Accessor + ?Sized>(&self, accessor: &mut A, range: ScanRange) -> ScanRange {
        let range = back_to_line_start(accessor, range);
        let line = accessor.line_of(range.start);
        let state = match line.checked_sub(1) {
            Some(prev) if accessor.line_state(prev) == LINE_IN_BLOCK_COMMENT => style::BLOCK_COMMENT,
            _ => style::DEFAULT,
        };
        self.lex(accessor, range.start, range.length, state, StateMask::ALL);
        range
    }

    fn classify_word<A: Accessor + ?Sized>(&self, sc: &mut StyleContext<'_, A>) {
        let mut state = style::WORD;
        if !self.keywords.is_empty() && sc.current_run_length() <= MAX_KEYWORD_LEN {
            let mut buf = [0u8; MAX_KEYWORD_LEN];
            let n = sc.copy_current_run_lowered(&mut buf);
            if std::str::from_utf8(&buf[..n]).is_ok_and(|word| self.keywords.contains(word)) {
                state = style::KEYWORD;
            }
        }
        sc.set_internal_state(state);
    }
}
