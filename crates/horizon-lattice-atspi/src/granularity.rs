//! AT-SPI text granularity and its mapping to the toolkit's vocabulary.

use horizon_lattice_a11y::TextGranularity;

use crate::error::AtspiError;

/// `AtspiTextGranularity` as sent on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum AtspiGranularity {
    /// `ATSPI_TEXT_GRANULARITY_CHAR`
    Char = 0,
    /// `ATSPI_TEXT_GRANULARITY_WORD`
    Word = 1,
    /// `ATSPI_TEXT_GRANULARITY_SENTENCE`
    Sentence = 2,
    /// `ATSPI_TEXT_GRANULARITY_LINE`
    Line = 3,
    /// `ATSPI_TEXT_GRANULARITY_PARAGRAPH`
    Paragraph = 4,
}

impl TryFrom<u32> for AtspiGranularity {
    type Error = AtspiError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Char),
            1 => Ok(Self::Word),
            2 => Ok(Self::Sentence),
            3 => Ok(Self::Line),
            4 => Ok(Self::Paragraph),
            other => Err(AtspiError::invalid_value(
                format!("Not a valid text granularity: {other}"),
                other,
            )),
        }
    }
}

impl From<AtspiGranularity> for u32 {
    fn from(granularity: AtspiGranularity) -> Self {
        granularity as u32
    }
}

impl From<AtspiGranularity> for TextGranularity {
    fn from(granularity: AtspiGranularity) -> Self {
        match granularity {
            AtspiGranularity::Char => Self::Character,
            AtspiGranularity::Word => Self::Word,
            AtspiGranularity::Sentence => Self::Sentence,
            AtspiGranularity::Line => Self::Line,
            AtspiGranularity::Paragraph => Self::Paragraph,
        }
    }
}

impl From<TextGranularity> for AtspiGranularity {
    fn from(granularity: TextGranularity) -> Self {
        match granularity {
            TextGranularity::Character => Self::Char,
            TextGranularity::Word => Self::Word,
            TextGranularity::Sentence => Self::Sentence,
            TextGranularity::Line => Self::Line,
            TextGranularity::Paragraph => Self::Paragraph,
        }
    }
}
