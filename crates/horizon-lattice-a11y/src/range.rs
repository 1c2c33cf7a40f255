//! Character-offset ranges over accessible text.
//!
//! All offsets in this crate count Unicode scalar values (`char`s), not bytes.
//! Assistive technologies address text this way, so conversions to byte
//! offsets happen only at the edges, inside [`char_slice`] and friends.

/// Offset meaning "until the end of the text".
///
/// Passed as the `end` bound of a range query when the caller wants
/// everything from `start` onwards.
pub const UNBOUNDED: u32 = u32::MAX;

/// A range of characters, expressed as a start offset and a length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextRange {
    /// Offset of the first character in the range.
    pub start: u32,
    /// Number of characters in the range.
    pub length: u32,
}

impl TextRange {
    /// Create a range from a start offset and a length.
    pub const fn new(start: u32, length: u32) -> Self {
        Self { start, length }
    }

    /// Create a range from `[start, end)` bounds.
    ///
    /// Reversed bounds are normalized so that `start <= end` always holds.
    pub fn from_bounds(start: u32, end: u32) -> Self {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        Self {
            start,
            length: end - start,
        }
    }

    /// Offset one past the last character of the range.
    pub fn end(&self) -> u32 {
        self.start.saturating_add(self.length)
    }

    /// Whether the range covers no characters.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Whether `offset` falls inside `[start, end)`.
    pub fn contains(&self, offset: u32) -> bool {
        offset >= self.start && offset < self.end()
    }

    /// Whether two ranges share at least one character.
    pub fn overlaps(&self, other: &TextRange) -> bool {
        self.start < other.end() && other.start < self.end()
    }
}

/// Number of characters in `text`.
pub fn char_count(text: &str) -> u32 {
    u32::try_from(text.chars().count()).unwrap_or(u32::MAX)
}

/// Byte index of the character at `offset`, clamped to the end of `text`.
pub fn byte_index(text: &str, offset: u32) -> usize {
    text.char_indices()
        .nth(offset as usize)
        .map_or(text.len(), |(idx, _)| idx)
}

/// The characters of `text` in `[start, end)`.
///
/// Both bounds are clamped to the text; `end` may be [`UNBOUNDED`]. An
/// inverted range yields an empty string.
pub fn char_slice(text: &str, start: u32, end: u32) -> &str {
    if start >= end {
        return "";
    }
    let begin = byte_index(text, start);
    let rest = &text[begin..];
    let finish = byte_index(rest, end - start);
    &rest[..finish]
}
