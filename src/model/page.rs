//! The text shown on one screen.

use std::fmt;

/// Full text of a screen, immutable once a reveal begins.
///
/// Lengths and offsets are counted in characters (Unicode scalar values), which is
/// the unit the layout engine's stream offset advances in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Page {
    text: String,
    len: usize,
}

impl Page {
    /// Create a page from text.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let len = text.chars().count();
        Self { text, len }
    }

    /// The whole text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of characters.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True for a page without characters.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The first `chars` characters (the whole text when `chars >= len`).
    pub fn prefix(&self, chars: usize) -> &str {
        match self.text.char_indices().nth(chars) {
            Some((byte, _)) => &self.text[..byte],
            None => &self.text,
        }
    }

    /// Build a continuation screen: this page followed by `suffix`.
    ///
    /// Returns the new page and the offset to start revealing from, so the text
    /// already shown appears at once and only the suffix animates.
    ///
    /// ```
    /// use xask::model::Page;
    ///
    /// let question = Page::new("Play?");
    /// let (page, start) = question.continued("y\nSplendid!");
    /// assert_eq!(page.as_str(), "Play?y\nSplendid!");
    /// assert_eq!(start, 5);
    /// ```
    pub fn continued(&self, suffix: &str) -> (Page, usize) {
        let mut text = String::with_capacity(self.text.len() + suffix.len());
        text.push_str(&self.text);
        text.push_str(suffix);
        (Page::new(text), self.len)
    }
}

impl From<&str> for Page {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Page {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
