//! The host document contract and an in-memory implementation.
//!
//! A [`Document`] is owned by the host (an editor buffer, a file loaded for tooling). Scans never mutate its text;
//! they only write style bytes and per-line states through it. [`crate::accessor::LexAccessor`] sits between a
//! document and the cursor and batches both directions.

use std::ops::Range;

use stylescan_core::Encoding;

/// Text buffer plus line index, styles and line states, as seen by a scan.
///
/// ## Notes
/// - Lines are numbered from 0. The last line always exists, even when it is empty.
/// - `line_start(line)` for a line past the last one returns [`Document::length`].
/// - `line_end(line)` is the offset of the line's terminator, or the length for the last line.
/// - Styling is sequential: [`Document::start_styling`] positions a write cursor that
///   [`Document::set_styles`] and [`Document::set_style_for`] advance.
pub trait Document {
    fn length(&self) -> usize;

    fn encoding(&self) -> Encoding;

    /// Copy text starting at `start` into `out`; returns the number of bytes copied.
    fn read_bytes(&self, start: usize, out: &mut [u8]) -> usize;

    fn line_from_position(&self, pos: usize) -> usize;

    fn line_start(&self, line: usize) -> usize;

    fn line_end(&self, line: usize) -> usize;

    /// Style byte at `pos`; 0 outside the document.
    fn style_at(&self, pos: usize) -> u8;

    fn start_styling(&mut self, pos: usize);

    /// Write one style byte per position from the styling cursor onward.
    fn set_styles(&mut self, styles: &[u8]);

    /// Write `length` copies of `style` from the styling cursor onward.
    fn set_style_for(&mut self, length: usize, style: u8);

    /// Lexer-defined state stored for `line`; 0 when never set.
    fn line_state(&self, line: usize) -> i32;

    fn set_line_state(&mut self, line: usize, state: i32);
}

/// A maximal span of positions sharing one style byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSpan {
    pub range: Range<usize>,
    pub style: u8,
}

/// A [`Document`] held entirely in memory.
///
/// ## Examples
/// ```rust
/// use stylescan_core::Encoding;
/// use stylescan_syntax::{Document, TextDocument};
///
/// let doc = TextDocument::new("one\r\ntwo\n", Encoding::Utf8);
/// assert_eq!(doc.line_count(), 3);
/// assert_eq!(doc.line_end(0), 3);
/// assert_eq!(doc.line_start(1), 5);
/// assert_eq!(doc.line_start(2), 9);
/// ```
#[derive(Debug, Clone)]
pub struct TextDocument {
    text: Vec<u8>,
    encoding: Encoding,
    line_starts: Vec<usize>,
    styles: Vec<u8>,
    line_states: Vec<i32>,
    styling_pos: usize,
}

impl TextDocument {
    pub fn new(text: impl Into<Vec<u8>>, encoding: Encoding) -> Self {
        let text = text.into();
        let line_starts = compute_line_starts(&text);
        Self {
            styles: vec![0; text.len()],
            line_states: vec![0; line_starts.len()],
            line_starts,
            text,
            encoding,
            styling_pos: 0,
        }
    }

    pub fn text(&self) -> &[u8] {
        &self.text
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    pub fn styles(&self) -> &[u8] {
        &self.styles
    }

    /// Reset every style byte and line state to 0.
    pub fn clear_styles(&mut self) {
        self.styles.fill(0);
        self.line_states.fill(0);
        self.styling_pos = 0;
    }

    /// Maximal spans of equal style within `range`.
    pub fn styled_spans(&self, range: Range<usize>) -> Vec<StyledSpan> {
        let end = range.end.min(self.styles.len());
        let mut spans: Vec<StyledSpan> = Vec::new();
        for pos in range.start..end {
            let style = self.styles[pos];
            match spans.last_mut() {
                Some(span) if span.style == style => span.range.end = pos + 1,
                _ => spans.push(StyledSpan {
                    range: pos..pos + 1,
                    style,
                }),
            }
        }
        spans
    }

    fn write_style(&mut self, style: u8) {
        if let Some(slot) = self.styles.get_mut(self.styling_pos) {
            *slot = style;
        }
        self.styling_pos += 1;
    }
}

/// Line starts for LF, CRLF and lone CR terminators. Always contains 0.
fn compute_line_starts(text: &[u8]) -> Vec<usize> {
    let mut starts = vec![0];
    let mut pos = 0;
    while pos < text.len() {
        match text[pos] {
            b'\r' if text.get(pos + 1) == Some(&b'\n') => {
                pos += 2;
                starts.push(pos);
            }
            b'\r' | b'\n' => {
                pos += 1;
                starts.push(pos);
            }
            _ => pos += 1,
        }
    }
    starts
}

impl Document for TextDocument {
    fn length(&self) -> usize {
        self.text.len()
    }

    fn encoding(&self) -> Encoding {
        self.encoding
    }

    fn read_bytes(&self, start: usize, out: &mut [u8]) -> usize {
        let Some(available) = self.text.get(start..) else {
            return 0;
        };
        let n = available.len().min(out.len());
        out[..n].copy_from_slice(&available[..n]);
        n
    }

    fn line_from_position(&self, pos: usize) -> usize {
        match self.line_starts.binary_search(&pos) {
            Ok(line) => line,
            Err(next) => next - 1,
        }
    }

    fn line_start(&self, line: usize) -> usize {
        self.line_starts.get(line).copied().unwrap_or(self.text.len())
    }

    fn line_end(&self, line: usize) -> usize {
        let Some(&next) = self.line_starts.get(line + 1) else {
            return self.text.len();
        };
        if next >= 2 && self.text[next - 2] == b'\r' && self.text[next - 1] == b'\n' {
            next - 2
        } else {
            next - 1
        }
    }

    fn style_at(&self, pos: usize) -> u8 {
        self.styles.get(pos).copied().unwrap_or(0)
    }

    fn start_styling(&mut self, pos: usize) {
        self.styling_pos = pos;
    }

    fn set_styles(&mut self, styles: &[u8]) {
        for &style in styles {
            self.write_style(style);
        }
    }

    fn set_style_for(&mut self, length: usize, style: u8) {
        for _ in 0..length {
            self.write_style(style);
        }
    }

    fn line_state(&self, line: usize) -> i32 {
        self.line_states.get(line).copied().unwrap_or(0)
    }

    fn set_line_state(&mut self, line: usize, state: i32) {
        match self.line_states.get_mut(line) {
            Some(slot) => *slot = state,
            None => tracing::trace!(line, state, "line state set past the last line; ignored"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_table_lf() {
        let doc = TextDocument::new("ab\ncd", Encoding::EightBit);
        assert_eq!(doc.line_count(), 2);
        assert_eq!(doc.line_from_position(0), 0);
        assert_eq!(doc.line_from_position(2), 0);
        assert_eq!(doc.line_from_position(3), 1);
        assert_eq!(doc.line_from_position(5), 1);
        assert_eq!(doc.line_from_position(99), 1);
        assert_eq!(doc.line_end(0), 2);
        assert_eq!(doc.line_end(1), 5);
        assert_eq!(doc.line_start(2), 5);
    }

    #[test]
    fn test_line_table_crlf_and_cr() {
        let doc = TextDocument::new("a\r\nb\rc", Encoding::EightBit);
        assert_eq!(doc.line_count(), 3);
        assert_eq!(doc.line_start(1), 3);
        assert_eq!(doc.line_end(0), 1);
        assert_eq!(doc.line_start(2), 5);
        assert_eq!(doc.line_end(1), 4);
        assert_eq!(doc.line_end(2), 6);
    }

    #[test]
    fn test_trailing_terminator_creates_empty_last_line() {
        let doc = TextDocument::new("x\n", Encoding::EightBit);
        assert_eq!(doc.line_count(), 2);
        assert_eq!(doc.line_start(1), 2);
        assert_eq!(doc.line_end(1), 2);
        assert_eq!(doc.line_from_position(2), 1);
    }

    #[test]
    fn test_empty_document() {
        let doc = TextDocument::new("", Encoding::Utf8);
        assert_eq!(doc.line_count(), 1);
        assert_eq!(doc.line_from_position(0), 0);
        assert_eq!(doc.line_end(0), 0);
        assert_eq!(doc.line_start(1), 0);
    }

    #[test]
    fn test_read_bytes_clamps() {
        let doc = TextDocument::new("hello", Encoding::EightBit);
        let mut out = [0u8; 8];
        assert_eq!(doc.read_bytes(3, &mut out), 2);
        assert_eq!(&out[..2], b"lo");
        assert_eq!(doc.read_bytes(9, &mut out), 0);
    }

    #[test]
    fn test_styling_is_sequential_and_clamped() {
        let mut doc = TextDocument::new("abcd", Encoding::EightBit);
        doc.start_styling(1);
        doc.set_styles(&[3, 4]);
        doc.set_style_for(5, 9);
        assert_eq!(doc.styles(), &[0, 3, 4, 9]);
        assert_eq!(doc.style_at(10), 0);
    }

    #[test]
    fn test_styled_spans_coalesce() {
        let mut doc = TextDocument::new("aabbb", Encoding::EightBit);
        doc.start_styling(0);
        doc.set_styles(&[1, 1, 2, 2, 2]);
        assert_eq!(
            doc.styled_spans(0..5),
            vec![
                StyledSpan { range: 0..2, style: 1 },
                StyledSpan { range: 2..5, style: 2 },
            ]
        );
        assert_eq!(doc.styled_spans(3..99), vec![StyledSpan { range: 3..5, style: 2 }]);
    }

    #[test]
    fn test_line_states() {
        let mut doc = TextDocument::new("a\nb", Encoding::EightBit);
        doc.set_line_state(1, 7);
        doc.set_line_state(5, 1);
        assert_eq!(doc.line_state(0), 0);
        assert_eq!(doc.line_state(1), 7);
        assert_eq!(doc.line_state(5), 0);
        doc.clear_styles();
        assert_eq!(doc.line_state(1), 0);
    }
}
