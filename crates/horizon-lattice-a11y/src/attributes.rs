//! Text attributes reported to assistive technologies.

use crate::range::TextRange;

/// Well-known attribute names.
///
/// Collaborators are free to report other names; these are the ones the
/// toolkit's own text widgets produce.
pub mod names {
    /// Font family name.
    pub const FAMILY: &str = "family";
    /// Font size in points.
    pub const SIZE: &str = "size";
    /// Font weight (`"400"`, `"700"`, ...).
    pub const WEIGHT: &str = "weight";
    /// Font style (`"normal"`, `"italic"`, `"oblique"`).
    pub const STYLE: &str = "style";
    /// Underline style (`"none"`, `"single"`, `"double"`, `"error"`).
    pub const UNDERLINE: &str = "underline";
    /// `"true"` when the text is struck through.
    pub const STRIKETHROUGH: &str = "strikethrough";
    /// Foreground color as `"r,g,b"`.
    pub const FOREGROUND: &str = "fg-color";
    /// Background color as `"r,g,b"`.
    pub const BACKGROUND: &str = "bg-color";
    /// BCP 47 language tag.
    pub const LANGUAGE: &str = "language";
    /// `"true"` when the text is not rendered.
    pub const INVISIBLE: &str = "invisible";
    /// `"true"` when the text can be edited.
    pub const EDITABLE: &str = "editable";
}

/// A single named attribute and the range over which it applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextAttribute {
    /// Attribute name, compared case-sensitively.
    pub name: String,
    /// Attribute value.
    pub value: String,
    /// Characters the attribute applies to.
    pub range: TextRange,
}

impl TextAttribute {
    /// Create a new attribute.
    pub fn new(name: impl Into<String>, value: impl Into<String>, range: TextRange) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            range,
        }
    }
}
