//! Choosing where an incremental scan starts.
//!
//! Hosts rarely re-lex a whole document after an edit. They pick a range, widen it back to a line start, and seed
//! the cursor with the style already committed just before it. Lexers that need more context than one style (an
//! open block comment, a nesting depth) keep it in the per-line state.

use crate::accessor::Accessor;
use crate::diagnostics::ScanError;

/// A validated scan request: `length` bytes from `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanRange {
    pub start: usize,
    pub length: usize,
}

impl ScanRange {
    /// Validate a request against a document of `document_length` bytes.
    ///
    /// A range may run past the end of the document; the cursor clamps it.
    pub fn new(start: usize, length: usize, document_length: usize) -> Result<Self, ScanError> {
        if length == 0 {
            return Err(ScanError::EmptyRange);
        }
        if start > document_length {
            return Err(ScanError::StartOutOfRange {
                start,
                length: document_length,
            });
        }
        Ok(Self { start, length })
    }

    /// The whole document.
    pub fn whole(document_length: usize) -> Self {
        Self {
            start: 0,
            length: document_length,
        }
    }

    /// Exclusive end.
    pub fn end(&self) -> usize {
        self.start.saturating_add(self.length)
    }
}

/// Widen `range` so it starts at the beginning of its line. The end stays put.
#[tracing::instrument(skip_all, fields(start = range.start, length = range.length))]
pub fn back_to_line_start<A: Accessor + ?Sized>(accessor: &A, range: ScanRange) -> ScanRange {
    let line_start = accessor.line_start(accessor.line_of(range.start));
    if line_start == range.start {
        return range;
    }
    tracing::trace!(line_start, "moved scan start back to line start");
    ScanRange {
        start: line_start,
        length: range.end() - line_start,
    }
}

/// The state to resume scanning at `start`: the style committed at `start - 1`, or `default` at the document
/// start.
pub fn restart_state<A: Accessor + ?Sized>(accessor: &A, start: usize, default: u32) -> u32 {
    match start.checked_sub(1) {
        Some(prev) => u32::from(accessor.style_at(prev)),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessor::LexAccessor;
    use crate::document::{Document, TextDocument};
    use stylescan_core::Encoding;

    #[test]
    fn test_scan_range_validation() {
        assert_eq!(ScanRange::new(0, 0, 10), Err(ScanError::EmptyRange));
        assert_eq!(
            ScanRange::new(11, 1, 10),
            Err(ScanError::StartOutOfRange { start: 11, length: 10 })
        );
        assert_eq!(ScanRange::new(10, 5, 10), Ok(ScanRange { start: 10, length: 5 }));
        assert_eq!(ScanRange::new(2, 3, 10).map(|r| r.end()), Ok(5));
        assert_eq!(ScanRange::whole(7), ScanRange { start: 0, length: 7 });
    }

    #[test]
    fn test_back_to_line_start() {
        let mut doc = TextDocument::new("one\ntwo\nthree", Encoding::EightBit);
        let styler = LexAccessor::new(&mut doc);
        let widened = back_to_line_start(&styler, ScanRange { start: 6, length: 4 });
        assert_eq!(widened, ScanRange { start: 4, length: 6 });
        let unchanged = ScanRange { start: 8, length: 2 };
        assert_eq!(back_to_line_start(&styler, unchanged), unchanged);
    }

    #[test]
    fn test_restart_state_reads_previous_style() {
        let mut doc = TextDocument::new("abc", Encoding::EightBit);
        doc.start_styling(0);
        doc.set_styles(&[4, 5, 6]);
        let styler = LexAccessor::new(&mut doc);
        assert_eq!(restart_state(&styler, 0, 9), 9);
        assert_eq!(restart_state(&styler, 2, 9), 5);
        assert_eq!(restart_state(&styler, 3, 9), 6);
    }
}
