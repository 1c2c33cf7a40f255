//! The accessible text capability.

use crate::attributes::TextAttribute;
use crate::granularity::TextGranularity;
use crate::range::{TextRange, UNBOUNDED, char_count};

/// A segment of text returned by a granularity query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSegment {
    /// The characters of the segment.
    pub text: String,
    /// Character offset where the segment starts.
    pub start: u32,
    /// Character offset one past the end of the segment.
    pub end: u32,
}

impl TextSegment {
    /// Create a new segment.
    pub fn new(text: impl Into<String>, start: u32, end: u32) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }
}

/// Trait for widgets that expose their text to assistive technologies.
///
/// Labels, entries and text views implement this so that protocol bridges
/// can answer text queries without knowing the concrete widget type. All
/// offsets are character offsets.
///
/// Every method takes `&self`; implementors that can change underneath a
/// query are responsible for their own synchronization.
///
/// # Example
///
/// ```
/// use horizon_lattice_a11y::{AccessibleText, TextGranularity, TextSegment, TextRange, TextAttribute};
/// use horizon_lattice_a11y::range::char_slice;
///
/// struct Caption(String);
///
/// impl AccessibleText for Caption {
///     fn contents(&self, start: u32, end: u32) -> Option<String> {
///         Some(char_slice(&self.0, start, end).to_string())
///     }
///
///     fn caret_position(&self) -> u32 {
///         0
///     }
///
///     fn contents_at(&self, offset: u32, granularity: TextGranularity) -> Option<TextSegment> {
///         horizon_lattice_a11y::segmentation::segment_at(&self.0, offset, granularity, None)
///     }
///
///     fn attributes(&self, _offset: u32) -> Vec<TextAttribute> {
///         Vec::new()
///     }
///
///     fn selection(&self) -> Vec<TextRange> {
///         Vec::new()
///     }
/// }
///
/// let caption = Caption("Hello".into());
/// assert_eq!(caption.character_count(), 5);
/// ```
pub trait AccessibleText {
    /// Text in `[start, end)`.
    ///
    /// `end` may be [`UNBOUNDED`] to read until the end of the text.
    /// Returns `None` when the widget has no content to report.
    fn contents(&self, start: u32, end: u32) -> Option<String>;

    /// Current caret position.
    fn caret_position(&self) -> u32;

    /// The segment of the given granularity that contains `offset`.
    ///
    /// Returns `None` when `offset` does not fall inside any segment.
    fn contents_at(&self, offset: u32, granularity: TextGranularity) -> Option<TextSegment>;

    /// All attributes that apply at `offset`, each with its own range.
    fn attributes(&self, offset: u32) -> Vec<TextAttribute>;

    /// Current selection ranges, in order.
    fn selection(&self) -> Vec<TextRange>;

    /// Number of characters in the whole text.
    fn character_count(&self) -> u32 {
        self.contents(0, UNBOUNDED)
            .map_or(0, |text| char_count(&text))
    }
}

impl<T: AccessibleText + ?Sized> AccessibleText for &T {
    fn contents(&self, start: u32, end: u32) -> Option<String> {
        (**self).contents(start, end)
    }

    fn caret_position(&self) -> u32 {
        (**self).caret_position()
    }

    fn contents_at(&self, offset: u32, granularity: TextGranularity) -> Option<TextSegment> {
        (**self).contents_at(offset, granularity)
    }

    fn attributes(&self, offset: u32) -> Vec<TextAttribute> {
        (**self).attributes(offset)
    }

    fn selection(&self) -> Vec<TextRange> {
        (**self).selection()
    }

    fn character_count(&self) -> u32 {
        (**self).character_count()
    }
}

impl<T: AccessibleText + ?Sized> AccessibleText for std::sync::Arc<T> {
    fn contents(&self, start: u32, end: u32) -> Option<String> {
        (**self).contents(start, end)
    }

    fn caret_position(&self) -> u32 {
        (**self).caret_position()
    }

    fn contents_at(&self, offset: u32, granularity: TextGranularity) -> Option<TextSegment> {
        (**self).contents_at(offset, granularity)
    }

    fn attributes(&self, offset: u32) -> Vec<TextAttribute> {
        (**self).attributes(offset)
    }

    fn selection(&self) -> Vec<TextRange> {
        (**self).selection()
    }

    fn character_count(&self) -> u32 {
        (**self).character_count()
    }
}
