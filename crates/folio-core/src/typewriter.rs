#![forbid(unsafe_code)]

//! Typewriter reveal of the hero heading, one character per tick.

/// Progressive reveal over the Unicode scalar values of a string.
#[derive(Debug, Clone)]
pub struct Typewriter {
    text: String,
    /// Byte offset of the end of the revealed prefix.
    cursor: usize,
}

impl Typewriter {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            cursor: 0,
        }
    }

    /// Reveal one more character. Returns the visible prefix, or `None` once
    /// everything is shown.
    pub fn tick(&mut self) -> Option<&str> {
        let next = self.text[self.cursor..].chars().next()?;
        self.cursor += next.len_utf8();
        Some(&self.text[..self.cursor])
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.cursor >= self.text.len()
    }

    #[must_use]
    pub fn visible(&self) -> &str {
        &self.text[..self.cursor]
    }
}
