//! The bounded view a scan reads through and commits style runs to.
//!
//! [`Accessor`] is the contract the lexical cursor consumes. [`LexAccessor`] implements it over any
//! [`Document`], batching reads through a sliding window and style writes through a pending buffer, so a host whose
//! buffer is expensive to touch (a gap buffer, a remote process) is called in large chunks.

use stylescan_core::decode::{self, Decoded};
use stylescan_core::{Encoding, style_byte};

use crate::document::Document;

/// Read window size, in bytes.
const BUFFER_SIZE: usize = 4000;
/// How much of the read window is kept behind the requested position, for lookback.
const SLOP_SIZE: usize = BUFFER_SIZE / 8;

/// Reads, line queries and run commits for one scan.
///
/// ## Notes
/// - Reads never fail: out-of-range positions return the caller's default (bytes) or [`Decoded::END`]
///   (characters).
/// - Runs are committed by their **last** position, inclusive. A commit closes the open run and opens the next one
///   at `last + 1`. A commit with `last + 1 == run_start()` is empty and writes nothing.
pub trait Accessor {
    fn length(&self) -> usize;

    fn encoding(&self) -> Encoding;

    fn line_of(&self, pos: usize) -> usize;

    fn line_start(&self, line: usize) -> usize;

    fn line_end(&self, line: usize) -> usize;

    /// Byte at `pos`, or `default` when `pos` is outside the document.
    fn byte_at(&mut self, pos: usize, default: u8) -> u8;

    /// Character at `pos` and its width in bytes.
    fn character_and_width(&mut self, pos: usize) -> Decoded {
        let encoding = self.encoding();
        let length = self.length();
        decode::decode_at(encoding, pos, length, |p| self.byte_at(p, 0))
    }

    /// Position `offset` characters away from `pos`.
    ///
    /// Returns `None` when the walk would leave `[0, length]`. The document length itself is reachable.
    fn relative_position(&mut self, pos: usize, offset: isize) -> Option<usize> {
        let encoding = self.encoding();
        let length = self.length();
        if !encoding.is_variable_width() {
            return pos.checked_add_signed(offset).filter(|&p| p <= length);
        }
        let mut pos = pos;
        if offset >= 0 {
            for _ in 0..offset {
                if pos >= length {
                    return None;
                }
                pos += self.character_and_width(pos).width;
            }
        } else {
            for _ in 0..offset.unsigned_abs() {
                pos = decode::previous_char_start(encoding, pos, |p| self.byte_at(p, 0))?;
            }
        }
        Some(pos)
    }

    /// Copy the bytes of `[start, end)` into `out`, truncating to its length. Returns the number of bytes copied.
    ///
    /// `end` is clamped to the document length, so the one-past-end position contributes nothing.
    fn copy_range(&mut self, start: usize, end: usize, out: &mut [u8]) -> usize {
        let end = end.min(self.length());
        let n = end.saturating_sub(start).min(out.len());
        for (i, slot) in out.iter_mut().take(n).enumerate() {
            *slot = self.byte_at(start + i, 0);
        }
        n
    }

    /// Position the document's styling cursor at `pos`.
    fn start_at(&mut self, pos: usize);

    /// Open a run at `pos`.
    fn start_run(&mut self, pos: usize);

    /// First position of the open run.
    fn run_start(&self) -> usize;

    /// Close the open run at `last` (inclusive) under `style`.
    fn commit_run(&mut self, last: usize, style: u32);

    /// Push buffered style writes to the document.
    fn flush(&mut self);

    /// Style already stored in the document at `pos`; unflushed commits are not visible.
    fn style_at(&self, pos: usize) -> u8;

    fn line_state(&self, line: usize) -> i32;

    fn set_line_state(&mut self, line: usize, state: i32);
}

/// An [`Accessor`] over a host [`Document`] with buffered reads and writes.
///
/// Pending style writes are flushed by [`Accessor::flush`], whenever the style buffer fills, and when the accessor
/// is dropped.
pub struct LexAccessor<'d, D: Document + ?Sized> {
    document: &'d mut D,
    encoding: Encoding,
    length: usize,
    buf: Vec<u8>,
    buf_start: usize,
    buf_end: usize,
    styles: Vec<u8>,
    style_capacity: usize,
    start_seg: usize,
}

impl<'d, D: Document + ?Sized> LexAccessor<'d, D> {
    pub fn new(document: &'d mut D) -> Self {
        Self::with_buffer_size(document, BUFFER_SIZE)
    }

    /// Use `size`-byte read and style buffers instead of the default 4000.
    pub fn with_buffer_size(document: &'d mut D, size: usize) -> Self {
        let size = size.max(1);
        Self {
            encoding: document.encoding(),
            length: document.length(),
            document,
            buf: vec![0; size],
            buf_start: 0,
            buf_end: 0,
            styles: Vec::with_capacity(size),
            style_capacity: size,
            start_seg: 0,
        }
    }

    /// The underlying document, for queries the accessor does not forward.
    pub fn document(&self) -> &D {
        &*self.document
    }

    fn fill(&mut self, pos: usize) {
        let size = self.buf.len();
        let mut start = pos.saturating_sub(SLOP_SIZE.min(size / 2));
        if start + size > self.length {
            start = self.length.saturating_sub(size);
        }
        let end = (start + size).min(self.length);
        let read = self.document.read_bytes(start, &mut self.buf[..end - start]);
        self.buf_start = start;
        self.buf_end = start + read;
    }
}

impl<D: Document + ?Sized> Accessor for LexAccessor<'_, D> {
    fn length(&self) -> usize {
        self.length
    }

    fn encoding(&self) -> Encoding {
        self.encoding
    }

    fn line_of(&self, pos: usize) -> usize {
        self.document.line_from_position(pos)
    }

    fn line_start(&self, line: usize) -> usize {
        self.document.line_start(line)
    }

    fn line_end(&self, line: usize) -> usize {
        self.document.line_end(line)
    }

    fn byte_at(&mut self, pos: usize, default: u8) -> u8 {
        if pos >= self.length {
            return default;
        }
        if pos < self.buf_start || pos >= self.buf_end {
            self.fill(pos);
        }
        match pos.checked_sub(self.buf_start) {
            Some(offset) if pos < self.buf_end => self.buf[offset],
            _ => default,
        }
    }

    fn start_at(&mut self, pos: usize) {
        self.flush();
        self.document.start_styling(pos);
    }

    fn start_run(&mut self, pos: usize) {
        self.start_seg = pos;
    }

    fn run_start(&self) -> usize {
        self.start_seg
    }

    fn commit_run(&mut self, last: usize, style: u32) {
        if last + 1 != self.start_seg {
            if last < self.start_seg {
                tracing::trace!(last, run_start = self.start_seg, "backwards run commit ignored");
                return;
            }
            let len = last - self.start_seg + 1;
            let attr = style_byte(style);
            if self.styles.len() + len >= self.style_capacity {
                self.flush();
            }
            if self.styles.len() + len >= self.style_capacity {
                // Too large for the buffer: write straight through.
                self.document.set_style_for(len, attr);
            } else {
                self.styles.extend(std::iter::repeat_n(attr, len));
            }
        }
        self.start_seg = last + 1;
    }

    fn flush(&mut self) {
        if !self.styles.is_empty() {
            tracing::trace!(count = self.styles.len(), "flushing styles");
            self.document.set_styles(&self.styles);
            self.styles.clear();
        }
    }

    fn style_at(&self, pos: usize) -> u8 {
        self.document.style_at(pos)
    }

    fn line_state(&self, line: usize) -> i32 {
        self.document.line_state(line)
    }

    fn set_line_state(&mut self, line: usize, state: i32) {
        self.document.set_line_state(line, state);
    }
}

impl<D: Document + ?Sized> Drop for LexAccessor<'_, D> {
    fn drop(&mut self) {
        self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::TextDocument;
    use stylescan_core::CodePage;

    #[test]
    fn test_byte_at_defaults_out_of_range() {
        let mut doc = TextDocument::new("abc", Encoding::EightBit);
        let mut styler = LexAccessor::new(&mut doc);
        assert_eq!(styler.byte_at(0, b'?'), b'a');
        assert_eq!(styler.byte_at(2, b'?'), b'c');
        assert_eq!(styler.byte_at(3, b'?'), b'?');
        assert_eq!(styler.byte_at(usize::MAX, 0), 0);
    }

    #[test]
    fn test_reads_slide_the_window() {
        let text: Vec<u8> = (0..=255u8).cycle().take(10_000).collect();
        let mut doc = TextDocument::new(text.clone(), Encoding::EightBit);
        let mut styler = LexAccessor::with_buffer_size(&mut doc, 64);
        for pos in [0usize, 63, 64, 9_999, 5_000, 4_999, 17] {
            assert_eq!(styler.byte_at(pos, 0), text[pos], "byte at {pos}");
        }
    }

    #[test]
    fn test_character_and_width_utf8() {
        let mut doc = TextDocument::new("a€", Encoding::Utf8);
        let mut styler = LexAccessor::new(&mut doc);
        assert_eq!(styler.character_and_width(0), Decoded { ch: 97, width: 1 });
        assert_eq!(styler.character_and_width(1), Decoded { ch: 0x20AC, width: 3 });
        assert_eq!(styler.character_and_width(4), Decoded::END);
    }

    #[test]
    fn test_relative_position_single_byte() {
        let mut doc = TextDocument::new("abc", Encoding::EightBit);
        let mut styler = LexAccessor::new(&mut doc);
        assert_eq!(styler.relative_position(1, 2), Some(3));
        assert_eq!(styler.relative_position(1, 3), None);
        assert_eq!(styler.relative_position(1, -1), Some(0));
        assert_eq!(styler.relative_position(1, -2), None);
    }

    #[test]
    fn test_relative_position_utf8() {
        // a(0) é(1..3) €(3..6) b(6)
        let mut doc = TextDocument::new("aé€b", Encoding::Utf8);
        let mut styler = LexAccessor::new(&mut doc);
        assert_eq!(styler.relative_position(0, 2), Some(3));
        assert_eq!(styler.relative_position(0, 4), Some(7));
        assert_eq!(styler.relative_position(0, 5), None);
        assert_eq!(styler.relative_position(6, -2), Some(1));
        assert_eq!(styler.relative_position(6, -4), None);
    }

    #[test]
    fn test_relative_position_dbcs() {
        let mut doc = TextDocument::new(vec![b'A', 0x82, 0xA0, b'b'], Encoding::Dbcs(CodePage::ShiftJis));
        let mut styler = LexAccessor::new(&mut doc);
        assert_eq!(styler.relative_position(0, 2), Some(3));
        assert_eq!(styler.relative_position(3, -1), Some(1));
    }

    #[test]
    fn test_commit_runs_write_styles() {
        let mut doc = TextDocument::new("abcdef", Encoding::EightBit);
        {
            let mut styler = LexAccessor::new(&mut doc);
            styler.start_at(0);
            styler.start_run(0);
            styler.commit_run(1, 4);
            assert_eq!(styler.run_start(), 2);
            styler.commit_run(4, 5);
            styler.commit_run(5, 0x106);
            styler.flush();
        }
        assert_eq!(doc.styles(), &[4, 4, 5, 5, 5, 6]);
    }

    #[test]
    fn test_empty_and_backwards_commits_write_nothing() {
        let mut doc = TextDocument::new("abcd", Encoding::EightBit);
        {
            let mut styler = LexAccessor::new(&mut doc);
            styler.start_at(2);
            styler.start_run(2);
            // Empty: closes just before the run start.
            styler.commit_run(1, 9);
            assert_eq!(styler.run_start(), 2);
            styler.commit_run(0, 9);
            assert_eq!(styler.run_start(), 2);
            styler.commit_run(3, 1);
        }
        assert_eq!(doc.styles(), &[0, 0, 1, 1]);
    }

    #[test]
    fn test_oversized_runs_bypass_the_buffer() {
        let mut doc = TextDocument::new("x".repeat(100), Encoding::EightBit);
        {
            let mut styler = LexAccessor::with_buffer_size(&mut doc, 8);
            styler.start_at(0);
            styler.start_run(0);
            styler.commit_run(2, 1);
            styler.commit_run(90, 2);
            styler.commit_run(99, 3);
        }
        let styles = doc.styles();
        assert_eq!(&styles[..3], &[1, 1, 1]);
        assert!(styles[3..=90].iter().all(|&s| s == 2));
        assert!(styles[91..].iter().all(|&s| s == 3));
    }

    #[test]
    fn test_drop_flushes() {
        let mut doc = TextDocument::new("ab", Encoding::EightBit);
        {
            let mut styler = LexAccessor::new(&mut doc);
            styler.start_at(0);
            styler.start_run(0);
            styler.commit_run(1, 3);
            assert_eq!(styler.style_at(0), 0, "unflushed commits are not visible");
        }
        assert_eq!(doc.styles(), &[3, 3]);
    }

    #[test]
    fn test_copy_range_truncates() {
        let mut doc = TextDocument::new("keyword", Encoding::EightBit);
        let mut styler = LexAccessor::new(&mut doc);
        let mut out = [0u8; 3];
        assert_eq!(styler.copy_range(0, 7, &mut out), 3);
        assert_eq!(&out, b"key");
        let mut out = [0u8; 16];
        assert_eq!(styler.copy_range(3, 7, &mut out), 4);
        assert_eq!(&out[..4], b"word");
    }
}
