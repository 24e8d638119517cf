//! Keyword lists.
//!
//! Grammar lexers copy a finished word run out of the cursor and ask a [`WordList`] whether it is a keyword.
//! Lists are usually configured from a single whitespace-separated string.

use std::collections::BTreeSet;

/// A set of words loaded from whitespace-separated text.
///
/// ## Notes
/// - Lookup via [`WordList::contains`] is exact and **case-sensitive**; lexers that want case-insensitive keywords
///   load lower-case words and look up lower-cased runs.
///
/// ## Examples
/// ```rust
/// use stylescan_core::words::WordList;
///
/// let keywords = WordList::from_text("if else\nwhile");
/// assert!(keywords.contains("while"));
/// assert!(!keywords.contains("If"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList {
    words: BTreeSet<String>,
}

impl WordList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(text: &str) -> Self {
        let mut list = Self::new();
        list.set(text);
        list
    }

    /// Replace the list with the words in `text`.
    ///
    /// Returns `true` when the contents changed, so callers know cached styling is stale.
    pub fn set(&mut self, text: &str) -> bool {
        let words: BTreeSet<String> = text.split_ascii_whitespace().map(str::to_string).collect();
        if words == self.words {
            return false;
        }
        self.words = words;
        true
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_splits_on_any_whitespace() {
        let list = WordList::from_text("  alpha\tbeta\r\ngamma  ");
        assert_eq!(list.len(), 3);
        assert_eq!(list.iter().collect::<Vec<_>>(), vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_set_reports_changes() {
        let mut list = WordList::new();
        assert!(list.is_empty());
        assert!(list.set("a b"));
        assert!(!list.set("b a"), "same words in a different order are not a change");
        assert!(list.set("a"));
        assert!(!list.contains("b"));
    }

    #[test]
    fn test_duplicates_collapse() {
        let list = WordList::from_text("x x x");
        assert_eq!(list.len(), 1);
    }
}
