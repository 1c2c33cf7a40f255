//! Error types for accessible text models.

/// Result type alias for accessible text operations.
pub type Result<T> = std::result::Result<T, A11yError>;

/// Errors raised when mutating an accessible text model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum A11yError {
    /// A range reaches past the end of the text.
    #[error("range {start}..{end} is outside text of length {length}")]
    InvalidRange { start: u32, end: u32, length: u32 },
}

impl A11yError {
    /// Create a range error.
    pub fn invalid_range(start: u32, end: u32, length: u32) -> Self {
        Self::InvalidRange { start, end, length }
    }
}
