//! Units of text navigation.

use std::fmt;

/// The unit a text segment query is measured in.
///
/// Boundaries for each unit are computed by [`crate::segmentation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextGranularity {
    /// A single user-perceived character (grapheme cluster).
    Character,
    /// A word, including the whitespace and punctuation that follow it.
    Word,
    /// A sentence.
    Sentence,
    /// A line, either hard (newline-terminated) or soft-wrapped.
    Line,
    /// A newline-delimited paragraph.
    Paragraph,
}

impl TextGranularity {
    /// All granularities, from finest to coarsest.
    pub const ALL: [TextGranularity; 5] = [
        Self::Character,
        Self::Word,
        Self::Sentence,
        Self::Line,
        Self::Paragraph,
    ];

    /// Lowercase name of the granularity.
    pub fn name(self) -> &'static str {
        match self {
            Self::Character => "character",
            Self::Word => "word",
            Self::Sentence => "sentence",
            Self::Line => "line",
            Self::Paragraph => "paragraph",
        }
    }
}

impl fmt::Display for TextGranularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
