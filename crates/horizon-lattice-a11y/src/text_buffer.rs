//! In-memory accessible text model.
//!
//! [`TextBuffer`] holds the text, caret, selection and attribute runs that a
//! simple text widget reports to assistive technologies. Widgets without a
//! richer document model of their own can keep one of these in sync and hand
//! it to a protocol bridge.

use parking_lot::RwLock;

use crate::accessible_text::{AccessibleText, TextSegment};
use crate::attributes::TextAttribute;
use crate::error::{A11yError, Result};
use crate::granularity::TextGranularity;
use crate::logging::targets;
use crate::range::{TextRange, char_count, char_slice};
use crate::segmentation;

#[derive(Debug, Default)]
struct BufferState {
    text: String,
    length: u32,
    caret: u32,
    selection: Vec<TextRange>,
    attributes: Vec<TextAttribute>,
    wrap_width: Option<u32>,
}

impl BufferState {
    fn check_range(&self, range: TextRange) -> Result<()> {
        if range.end() > self.length {
            return Err(A11yError::invalid_range(range.start, range.end(), self.length));
        }
        Ok(())
    }
}

/// Thread-safe text model implementing [`AccessibleText`].
///
/// # Example
///
/// ```
/// use horizon_lattice_a11y::{AccessibleText, TextBuffer, TextRange};
/// use horizon_lattice_a11y::attributes::names;
///
/// let buffer = TextBuffer::new("Hello, world!");
/// buffer.add_attribute(TextRange::new(0, 5), names::WEIGHT, "700").unwrap();
/// buffer.select(TextRange::new(7, 5)).unwrap();
///
/// assert_eq!(buffer.contents(7, 12).as_deref(), Some("world"));
/// assert_eq!(buffer.attributes(2).len(), 1);
/// assert_eq!(buffer.selection(), vec![TextRange::new(7, 5)]);
/// ```
#[derive(Debug, Default)]
pub struct TextBuffer {
    state: RwLock<BufferState>,
}

impl TextBuffer {
    /// Create a buffer holding `text`.
    pub fn new(text: impl Into<String>) -> Self {
        let buffer = Self::default();
        buffer.set_text(text);
        buffer
    }

    /// Replace the text.
    ///
    /// The caret moves to the start and the selection and attributes are
    /// cleared, since their offsets no longer refer to the same characters.
    pub fn set_text(&self, text: impl Into<String>) {
        let mut state = self.state.write();
        state.text = text.into();
        state.length = char_count(&state.text);
        state.caret = 0;
        state.selection.clear();
        state.attributes.clear();
        tracing::trace!(target: targets::TEXT, length = state.length, "text replaced");
    }

    /// A copy of the whole text.
    pub fn text(&self) -> String {
        self.state.read().text.clone()
    }

    /// Number of characters in the text.
    pub fn len(&self) -> u32 {
        self.state.read().length
    }

    /// Whether the text is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Move the caret, clamping it to the end of the text.
    pub fn set_caret_position(&self, offset: u32) {
        let mut state = self.state.write();
        state.caret = offset.min(state.length);
    }

    /// Replace the selection with a single range.
    ///
    /// # Errors
    ///
    /// Returns [`A11yError::InvalidRange`] if the range reaches past the text.
    pub fn select(&self, range: TextRange) -> Result<()> {
        let mut state = self.state.write();
        state.check_range(range)?;
        state.selection.clear();
        state.selection.push(range);
        Ok(())
    }

    /// Add a selection range after the existing ones.
    ///
    /// # Errors
    ///
    /// Returns [`A11yError::InvalidRange`] if the range reaches past the text.
    pub fn add_selection(&self, range: TextRange) -> Result<()> {
        let mut state = self.state.write();
        state.check_range(range)?;
        state.selection.push(range);
        Ok(())
    }

    /// Remove every selection range.
    pub fn clear_selection(&self) {
        self.state.write().selection.clear();
    }

    /// Apply an attribute to a range of characters.
    ///
    /// Attributes are reported in the order they were added.
    ///
    /// # Errors
    ///
    /// Returns [`A11yError::InvalidRange`] if the range reaches past the text.
    pub fn add_attribute(
        &self,
        range: TextRange,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<()> {
        let mut state = self.state.write();
        state.check_range(range)?;
        let attribute = TextAttribute::new(name, value, range);
        tracing::trace!(
            target: targets::TEXT,
            name = %attribute.name,
            start = range.start,
            end = range.end(),
            "attribute added"
        );
        state.attributes.push(attribute);
        Ok(())
    }

    /// Remove every attribute.
    pub fn clear_attributes(&self) {
        self.state.write().attributes.clear();
    }

    /// Set the soft-wrap width used for line segments, in characters.
    ///
    /// `None` (the default) makes lines follow hard newlines only.
    pub fn set_wrap_width(&self, width: Option<u32>) {
        self.state.write().wrap_width = width;
    }
}

impl AccessibleText for TextBuffer {
    fn contents(&self, start: u32, end: u32) -> Option<String> {
        let state = self.state.read();
        Some(char_slice(&state.text, start, end).to_string())
    }

    fn caret_position(&self) -> u32 {
        self.state.read().caret
    }

    fn contents_at(&self, offset: u32, granularity: TextGranularity) -> Option<TextSegment> {
        let state = self.state.read();
        segmentation::segment_at(&state.text, offset, granularity, state.wrap_width)
    }

    fn attributes(&self, offset: u32) -> Vec<TextAttribute> {
        self.state
            .read()
            .attributes
            .iter()
            .filter(|attribute| attribute.range.contains(offset))
            .cloned()
            .collect()
    }

    fn selection(&self) -> Vec<TextRange> {
        self.state.read().selection.clone()
    }

    fn character_count(&self) -> u32 {
        self.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::names;
    use crate::range::UNBOUNDED;

    #[test]
    fn test_new_buffer() {
        let buffer = TextBuffer::new("Hello");
        assert_eq!(buffer.text(), "Hello");
        assert_eq!(buffer.len(), 5);
        assert!(!buffer.is_empty());
        assert_eq!(buffer.caret_position(), 0);
        assert!(buffer.selection().is_empty());
    }

    #[test]
    fn test_contents_by_char_offsets() {
        let buffer = TextBuffer::new("naïve café");
        assert_eq!(buffer.contents(0, 5).as_deref(), Some("naïve"));
        assert_eq!(buffer.contents(6, UNBOUNDED).as_deref(), Some("café"));
        assert_eq!(buffer.character_count(), 10);
    }

    #[test]
    fn test_caret_is_clamped() {
        let buffer = TextBuffer::new("abc");
        buffer.set_caret_position(2);
        assert_eq!(buffer.caret_position(), 2);
        buffer.set_caret_position(99);
        assert_eq!(buffer.caret_position(), 3);
    }

    #[test]
    fn test_selection_ranges() {
        let buffer = TextBuffer::new("one two three");
        buffer.select(TextRange::new(0, 3)).unwrap();
        buffer.add_selection(TextRange::new(8, 5)).unwrap();
        assert_eq!(
            buffer.selection(),
            vec![TextRange::new(0, 3), TextRange::new(8, 5)]
        );

        buffer.select(TextRange::new(4, 3)).unwrap();
        assert_eq!(buffer.selection(), vec![TextRange::new(4, 3)]);

        buffer.clear_selection();
        assert!(buffer.selection().is_empty());
    }

    #[test]
    fn test_selection_out_of_range() {
        let buffer = TextBuffer::new("abc");
        let err = buffer.select(TextRange::new(2, 5)).unwrap_err();
        assert_eq!(err, A11yError::invalid_range(2, 7, 3));
    }

    #[test]
    fn test_attributes_at_offset() {
        let buffer = TextBuffer::new("Hello, world!");
        buffer
            .add_attribute(TextRange::new(0, 5), names::WEIGHT, "700")
            .unwrap();
        buffer
            .add_attribute(TextRange::new(3, 6), names::STYLE, "italic")
            .unwrap();

        assert_eq!(buffer.attributes(1).len(), 1);
        let at_four = buffer.attributes(4);
        assert_eq!(at_four.len(), 2);
        assert_eq!(at_four[0].name, names::WEIGHT);
        assert_eq!(at_four[1].name, names::STYLE);
        assert!(buffer.attributes(12).is_empty());

        buffer.clear_attributes();
        assert!(buffer.attributes(4).is_empty());
    }

    #[test]
    fn test_set_text_resets_state() {
        let buffer = TextBuffer::new("Hello");
        buffer.set_caret_position(3);
        buffer.select(TextRange::new(0, 2)).unwrap();
        buffer
            .add_attribute(TextRange::new(0, 5), names::WEIGHT, "700")
            .unwrap();

        buffer.set_text("Bye");
        assert_eq!(buffer.caret_position(), 0);
        assert!(buffer.selection().is_empty());
        assert!(buffer.attributes(0).is_empty());
    }

    #[test]
    fn test_wrap_width_affects_lines() {
        let buffer = TextBuffer::new("aaa bbb ccc");
        let line = buffer.contents_at(9, TextGranularity::Line).unwrap();
        assert_eq!((line.start, line.end), (0, 11));

        buffer.set_wrap_width(Some(7));
        let line = buffer.contents_at(9, TextGranularity::Line).unwrap();
        assert_eq!((line.start, line.end), (8, 11));
    }
}
