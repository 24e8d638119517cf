//! An accessor decorator that records what a scan did.
//!
//! Wrap any [`Accessor`] in a [`RecordingAccessor`] to see the runs a lexer committed, in order, without reading
//! them back out of the document. The CLI's `runs` command and most of the cursor tests are built on it.

use stylescan_core::Encoding;
use stylescan_core::decode::Decoded;

use crate::accessor::Accessor;

/// One committed, non-empty style run. Both ends are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleRun {
    pub first: usize,
    pub last: usize,
    pub style: u32,
}

/// Forwards every call to the wrapped accessor and keeps a log of committed runs.
#[derive(Debug)]
pub struct RecordingAccessor<A: Accessor> {
    inner: A,
    runs: Vec<StyleRun>,
    flushes: usize,
    relative_steps: usize,
}

impl<A: Accessor> RecordingAccessor<A> {
    pub fn new(inner: A) -> Self {
        Self {
            inner,
            runs: Vec::new(),
            flushes: 0,
            relative_steps: 0,
        }
    }

    pub fn runs(&self) -> &[StyleRun] {
        &self.runs
    }

    pub fn into_runs(self) -> Vec<StyleRun> {
        self.runs
    }

    /// How many times the scan flushed.
    pub fn flushes(&self) -> usize {
        self.flushes
    }

    /// Total characters walked by relative position lookups.
    pub fn relative_steps(&self) -> usize {
        self.relative_steps
    }

    pub fn inner(&self) -> &A {
        &self.inner
    }

    pub fn into_inner(self) -> A {
        self.inner
    }
}

impl<A: Accessor> Accessor for RecordingAccessor<A> {
    fn length(&self) -> usize {
        self.inner.length()
    }

    fn encoding(&self) -> Encoding {
        self.inner.encoding()
    }

    fn line_of(&self, pos: usize) -> usize {
        self.inner.line_of(pos)
    }

    fn line_start(&self, line: usize) -> usize {
        self.inner.line_start(line)
    }

    fn line_end(&self, line: usize) -> usize {
        self.inner.line_end(line)
    }

    fn byte_at(&mut self, pos: usize, default: u8) -> u8 {
        self.inner.byte_at(pos, default)
    }

    fn character_and_width(&mut self, pos: usize) -> Decoded {
        self.inner.character_and_width(pos)
    }

    fn relative_position(&mut self, pos: usize, offset: isize) -> Option<usize> {
        self.relative_steps += offset.unsigned_abs();
        self.inner.relative_position(pos, offset)
    }

    fn copy_range(&mut self, start: usize, end: usize, out: &mut [u8]) -> usize {
        self.inner.copy_range(start, end, out)
    }

    fn start_at(&mut self, pos: usize) {
        self.inner.start_at(pos);
    }

    fn start_run(&mut self, pos: usize) {
        self.inner.start_run(pos);
    }

    fn run_start(&self) -> usize {
        self.inner.run_start()
    }

    fn commit_run(&mut self, last: usize, style: u32) {
        let first = self.inner.run_start();
        if last >= first {
            self.runs.push(StyleRun { first, last, style });
        }
        self.inner.commit_run(last, style);
    }

    fn flush(&mut self) {
        self.flushes += 1;
        self.inner.flush();
    }

    fn style_at(&self, pos: usize) -> u8 {
        self.inner.style_at(pos)
    }

    fn line_state(&self, line: usize) -> i32 {
        self.inner.line_state(line)
    }

    fn set_line_state(&mut self, line: usize, state: i32) {
        self.inner.set_line_state(line, state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessor::LexAccessor;
    use crate::document::TextDocument;

    #[test]
    fn test_records_only_non_empty_runs() {
        let mut doc = TextDocument::new("abcdef", Encoding::EightBit);
        let mut recorder = RecordingAccessor::new(LexAccessor::new(&mut doc));
        recorder.start_at(0);
        recorder.start_run(0);
        recorder.commit_run(2, 1);
        recorder.commit_run(2, 9);
        recorder.commit_run(5, 3);
        recorder.flush();
        assert_eq!(
            recorder.runs(),
            &[StyleRun { first: 0, last: 2, style: 1 }, StyleRun { first: 3, last: 5, style: 3 }]
        );
        assert_eq!(recorder.flushes(), 1);
        drop(recorder);
        assert_eq!(doc.styles(), &[1, 1, 1, 3, 3, 3]);
    }

    #[test]
    fn test_counts_relative_steps() {
        let mut doc = TextDocument::new("aé€b", Encoding::Utf8);
        let mut recorder = RecordingAccessor::new(LexAccessor::new(&mut doc));
        assert_eq!(recorder.relative_position(0, 3), Some(6));
        assert_eq!(recorder.relative_position(6, -2), Some(1));
        assert_eq!(recorder.relative_steps(), 5);
    }
}
