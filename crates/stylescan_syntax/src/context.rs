//! The lexical cursor.
//!
//! A [`StyleContext`] walks one range of a document a character at a time on behalf of a grammar lexer. It keeps
//! the current, previous and next characters decoded, tracks line boundaries, and commits a style run to its
//! [`Accessor`] every time the lexer switches to a new visible state.
//!
//! ## Call sequence
//!
//! ```text
//! new / with_mask  →  { advance, set_state, peek … }*  →  finish
//! ```
//!
//! ## Notes
//! - The cursor borrows its accessor mutably for its whole life, so only one cursor can drive an accessor at a
//!   time and commits are strictly sequential.
//! - [`StyleContext::finish`] consumes the cursor. A cursor dropped without it loses its last open run.
//! - Past the end of the range, `ch`, `ch_prev` and `ch_next` all read as a space and `at_line_end` is true, so
//!   lexers can peek freely without bounds checks.

use stylescan_core::StateMask;
use stylescan_core::charset::make_lower_case;
use stylescan_core::decode::END_OF_TEXT;

use crate::accessor::Accessor;

const SPACE: u32 = b' ' as u32;

/// Cursor over `[start, end)` of an accessor's document.
///
/// ## Examples
/// ```rust
/// use stylescan_core::Encoding;
/// use stylescan_syntax::{LexAccessor, StyleContext, TextDocument};
///
/// let mut doc = TextDocument::new("x = 1", Encoding::Utf8);
/// let mut styler = LexAccessor::new(&mut doc);
/// let mut sc = StyleContext::new(0, 5, 0, &mut styler);
/// assert_eq!(sc.ch(), u32::from(b'x'));
/// assert_eq!(sc.ch_next(), u32::from(b' '));
/// assert!(sc.matches_literal(b"x = "));
/// sc.finish();
/// ```
pub struct StyleContext<'a, A: Accessor + ?Sized> {
    styler: &'a mut A,
    multi_byte: bool,
    length_document: usize,
    end_pos: usize,
    line_doc_end: usize,

    // Relative lookup cache: the last answered offset and where it resolved, valid while the cursor stays at
    // `current_pos_last_relative`.
    pos_relative: usize,
    current_pos_last_relative: Option<usize>,
    offset_relative: isize,

    current_pos: usize,
    current_line: usize,
    line_end: usize,
    line_start_next: usize,
    at_line_start: bool,
    at_line_end: bool,
    state: u32,
    ch_prev: u32,
    ch: u32,
    width: usize,
    ch_next: u32,
    width_next: usize,
    finished: bool,
}

impl<'a, A: Accessor + ?Sized> StyleContext<'a, A> {
    /// Start scanning `length` bytes from `start_pos` in `init_state`.
    pub fn new(start_pos: usize, length: usize, init_state: u32, styler: &'a mut A) -> Self {
        Self::with_mask(start_pos, length, init_state, styler, StateMask::ALL)
    }

    /// Start scanning with `mask` applied to `init_state`.
    ///
    /// The mask strips flag bits from the initial state only; later state changes are taken as given.
    pub fn with_mask(start_pos: usize, length: usize, init_state: u32, styler: &'a mut A, mask: StateMask) -> Self {
        let length_document = styler.length();
        let end_pos = start_pos.saturating_add(length).min(length_document + 1);
        let line_doc_end = styler.line_of(length_document);
        let current_line = styler.line_of(start_pos);
        let line_end = styler.line_end(current_line);
        let line_start_next = styler.line_start(current_line + 1);
        let at_line_start = styler.line_start(current_line) == start_pos;
        let multi_byte = styler.encoding().is_variable_width();
        let state = mask.apply(init_state);

        styler.start_at(start_pos);
        styler.start_run(start_pos);
        tracing::trace!(start_pos, end_pos, state, multi_byte, "style context started");

        let mut sc = Self {
            styler,
            multi_byte,
            length_document,
            end_pos,
            line_doc_end,
            pos_relative: 0,
            current_pos_last_relative: None,
            offset_relative: 0,
            current_pos: start_pos,
            current_line,
            line_end,
            line_start_next,
            at_line_start,
            at_line_end: false,
            state,
            ch_prev: 0,
            ch: 0,
            width: 0,
            ch_next: 0,
            width_next: 1,
            finished: false,
        };
        // With width still 0, the first fetch reads the character at start_pos itself.
        sc.get_next_char();
        sc.ch = sc.ch_next;
        sc.width = sc.width_next;
        sc.get_next_char();
        sc
    }

    fn get_next_char(&mut self) {
        let pos = self.current_pos + self.width;
        if self.multi_byte {
            let next = self.styler.character_and_width(pos);
            self.ch_next = next.ch;
            self.width_next = next.width;
        } else {
            self.ch_next = u32::from(self.styler.byte_at(pos, 0));
        }
        // The last line has no terminator, so its end is the line start after it rather than one before.
        self.at_line_end = if self.current_line < self.line_doc_end {
            self.current_pos + 1 >= self.line_start_next
        } else {
            self.current_pos >= self.line_start_next
        };
    }

    /// Whether the cursor is still inside its range.
    pub fn more(&self) -> bool {
        self.current_pos < self.end_pos
    }

    /// Step one character forward.
    pub fn advance(&mut self) {
        if self.current_pos < self.end_pos {
            self.at_line_start = self.at_line_end;
            if self.at_line_start {
                self.current_line += 1;
                self.line_end = self.styler.line_end(self.current_line);
                self.line_start_next = self.styler.line_start(self.current_line + 1);
            }
            self.ch_prev = self.ch;
            self.current_pos += self.width;
            self.ch = self.ch_next;
            self.width = self.width_next;
            self.get_next_char();
        } else {
            self.at_line_start = false;
            self.ch_prev = SPACE;
            self.ch = SPACE;
            self.ch_next = SPACE;
            self.at_line_end = true;
        }
    }

    /// Step `n` characters forward, one at a time.
    pub fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    /// Step forward until at least `n` bytes have been consumed or the range runs out.
    pub fn advance_bytes(&mut self, n: usize) {
        let target = self.current_pos.saturating_add(n);
        while target > self.current_pos {
            let before = self.current_pos;
            self.advance();
            if self.current_pos == before {
                return;
            }
        }
    }

    /// Change the state without closing the open run.
    pub fn set_internal_state(&mut self, state: u32) {
        self.state = state;
    }

    /// Close the open run under the current state, then switch to `state`.
    pub fn set_state(&mut self, state: u32) {
        self.commit_current_run();
        self.state = state;
    }

    /// [`advance`](Self::advance), then [`set_state`](Self::set_state).
    pub fn advance_and_set_state(&mut self, state: u32) {
        self.advance();
        self.set_state(state);
    }

    /// Close the last run and flush the accessor.
    pub fn finish(mut self) {
        self.commit_current_run();
        self.styler.flush();
        self.finished = true;
        tracing::trace!(end = self.current_pos, state = self.state, "style context finished");
    }

    // Runs close at the last real character consumed, never at the one-past-end sentinel.
    fn commit_current_run(&mut self) {
        let back = if self.current_pos > self.length_document { 2 } else { 1 };
        if let Some(last) = self.current_pos.checked_sub(back) {
            self.styler.commit_run(last, self.state);
        }
    }

    /// Byte `n` positions from the cursor, or `default` outside the document.
    pub fn relative_byte(&mut self, n: isize, default: u8) -> u8 {
        match self.current_pos.checked_add_signed(n) {
            Some(pos) => self.styler.byte_at(pos, default),
            None => default,
        }
    }

    /// Character `n` characters from the cursor; 0 outside the document.
    ///
    /// In variable-width text, consecutive calls that move further in one direction continue from the previous
    /// answer instead of walking again from the cursor.
    pub fn relative_character(&mut self, n: isize) -> u32 {
        if n == 0 {
            return self.ch;
        }
        if !self.multi_byte {
            return u32::from(self.relative_byte(n, 0));
        }
        let stale = self.current_pos_last_relative != Some(self.current_pos);
        let not_extending = (n > 0 && (self.offset_relative < 0 || n < self.offset_relative))
            || (n < 0 && (self.offset_relative > 0 || n > self.offset_relative));
        if stale || not_extending {
            self.pos_relative = self.current_pos;
            self.offset_relative = 0;
        }
        let diff = n - self.offset_relative;
        match self.styler.relative_position(self.pos_relative, diff) {
            Some(pos) => {
                let ch = self.styler.character_and_width(pos).ch;
                self.pos_relative = pos;
                self.current_pos_last_relative = Some(self.current_pos);
                self.offset_relative = n;
                ch
            }
            None => {
                self.current_pos_last_relative = None;
                END_OF_TEXT
            }
        }
    }

    /// Whether the cursor sits on the current line's terminator (or the end of the last line).
    pub fn matches_line_end(&self) -> bool {
        self.current_pos == self.line_end
    }

    pub fn matches(&self, ch0: u8) -> bool {
        self.ch == u32::from(ch0)
    }

    pub fn matches_pair(&self, ch0: u8, ch1: u8) -> bool {
        self.ch == u32::from(ch0) && self.ch_next == u32::from(ch1)
    }

    /// Whether the text at the cursor starts with `literal`.
    ///
    /// The first two bytes compare against `ch` and `ch_next`; the rest are read at fixed byte offsets from the
    /// cursor, which can look past the end of the scanned range.
    pub fn matches_literal(&mut self, literal: &[u8]) -> bool {
        self.matches_folded(literal, |ch| ch, |b| b)
    }

    /// Case-insensitive [`matches_literal`](Self::matches_literal); `literal` must already be lower case.
    pub fn matches_lowered(&mut self, literal: &[u8]) -> bool {
        self.matches_folded(literal, make_lower_case, |b| b)
    }

    /// Case-insensitive [`matches_literal`](Self::matches_literal), folding ASCII case on both sides.
    pub fn matches_ignore_case(&mut self, literal: &[u8]) -> bool {
        self.matches_folded(literal, make_lower_case, |b| b.to_ascii_lowercase())
    }

    fn matches_folded(&mut self, literal: &[u8], fold_doc: impl Fn(u32) -> u32, fold_lit: impl Fn(u8) -> u8) -> bool {
        let Some(&first) = literal.first() else {
            return true;
        };
        if fold_doc(self.ch) != u32::from(fold_lit(first)) {
            return false;
        }
        let Some(&second) = literal.get(1) else {
            return true;
        };
        if fold_doc(self.ch_next) != u32::from(fold_lit(second)) {
            return false;
        }
        for (n, &expected) in literal.iter().enumerate().skip(2) {
            let actual = u32::from(self.styler.byte_at(self.current_pos + n, 0));
            if fold_doc(actual) != u32::from(fold_lit(expected)) {
                return false;
            }
        }
        true
    }

    /// Bytes consumed since the open run started.
    pub fn current_run_length(&self) -> usize {
        self.current_pos.saturating_sub(self.styler.run_start())
    }

    /// Copy the open run's bytes into `out`, truncating to its length. Returns the number of bytes copied.
    pub fn copy_current_run(&mut self, out: &mut [u8]) -> usize {
        let start = self.styler.run_start();
        self.styler.copy_range(start, self.current_pos, out)
    }

    /// [`copy_current_run`](Self::copy_current_run) with ASCII letters lower-cased.
    pub fn copy_current_run_lowered(&mut self, out: &mut [u8]) -> usize {
        let n = self.copy_current_run(out);
        out[..n].make_ascii_lowercase();
        n
    }

    /// The accessor, for line-state bookkeeping and other queries the cursor does not wrap.
    pub fn accessor_mut(&mut self) -> &mut A {
        &mut *self.styler
    }

    pub fn current_pos(&self) -> usize {
        self.current_pos
    }

    pub fn current_line(&self) -> usize {
        self.current_line
    }

    pub fn line_end(&self) -> usize {
        self.line_end
    }

    pub fn line_start_next(&self) -> usize {
        self.line_start_next
    }

    /// Exclusive end of the scanned range.
    pub fn end_pos(&self) -> usize {
        self.end_pos
    }

    pub fn at_line_start(&self) -> bool {
        self.at_line_start
    }

    pub fn at_line_end(&self) -> bool {
        self.at_line_end
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    pub fn ch(&self) -> u32 {
        self.ch
    }

    pub fn ch_prev(&self) -> u32 {
        self.ch_prev
    }

    pub fn ch_next(&self) -> u32 {
        self.ch_next
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn width_next(&self) -> usize {
        self.width_next
    }
}

impl<A: Accessor + ?Sized> Drop for StyleContext<'_, A> {
    fn drop(&mut self) {
        if !self.finished {
            tracing::warn!(
                pos = self.current_pos,
                run_start = self.styler.run_start(),
                "style context dropped without finish; the open run was not committed"
            );
        }
    }
}
