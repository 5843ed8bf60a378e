//! Text blocks, the reveal cursor and the page buffer.

use crate::glyphs::RenderedText;

/// One dialog utterance. Lines are pre-split on `\n`; they are never wrapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBlock {
    text: String,
}

impl TextBlock {
    pub fn new(text: impl Into<String>) -> Self {
        TextBlock { text: text.into() }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }

    pub fn line_count(&self) -> usize {
        self.text.lines().count()
    }

    pub fn is_empty(&self) -> bool {
        self.line_count() == 0
    }
}

impl From<&str> for TextBlock {
    fn from(text: &str) -> Self {
        TextBlock::new(text)
    }
}

impl From<String> for TextBlock {
    fn from(text: String) -> Self {
        TextBlock::new(text)
    }
}

/// Position of the reveal inside the current block.
///
/// `char_index` counts characters (not bytes) already committed on the
/// current line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RevealCursor {
    pub block_index: usize,
    pub line_index: usize,
    pub char_index: usize,
}

impl RevealCursor {
    pub fn at_block(block_index: usize) -> Self {
        RevealCursor {
            block_index,
            ..Default::default()
        }
    }

    pub fn next_line(&mut self) {
        self.line_index += 1;
        self.char_index = 0;
    }
}

/// Fully revealed lines of the page currently on screen, in slot order.
#[derive(Debug, Clone)]
pub struct Page {
    capacity: usize,
    lines: Vec<RenderedText>,
}

impl Page {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Page {
            capacity,
            lines: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, line: RenderedText) {
        debug_assert!(!self.is_full(), "line pushed onto a full page");
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[RenderedText] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.lines.len() >= self.capacity
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

/// The first `chars` characters of `line`.
pub fn char_prefix(line: &str, chars: usize) -> &str {
    match line.char_indices().nth(chars) {
        Some((byte, _)) => &line[..byte],
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_has_no_lines() {
        assert!(TextBlock::new("").is_empty());
        assert_eq!(TextBlock::new("a\nb\n").line_count(), 2);
        assert_eq!(TextBlock::new("\n").line_count(), 1);
    }

    #[test]
    fn char_prefix_respects_char_boundaries() {
        assert_eq!(char_prefix("Привет", 2), "Пр");
        assert_eq!(char_prefix("ab", 5), "ab");
        assert_eq!(char_prefix("ab", 0), "");
    }
}
