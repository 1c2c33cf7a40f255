//! Error types for the AT-SPI bridge.
//!
//! Every error is the direct reply to the call that caused it. Conditions
//! such as missing content or an absent attribute are not errors; they
//! degrade to empty or sentinel replies in [`crate::bridge`].

use crate::variant::Variant;

/// Result type alias for bridge operations.
pub type Result<T> = std::result::Result<T, AtspiError>;

/// Reason given for the text methods superseded by `GetStringAtOffset`.
pub const DEPRECATED_IN_FAVOR_OF_GET_STRING_AT_OFFSET: &str =
    "This method is deprecated in favor of GetStringAtOffset";

/// D-Bus error names used in replies.
pub mod names {
    /// The method exists but is not implemented.
    pub const NOT_SUPPORTED: &str = "org.freedesktop.DBus.Error.NotSupported";
    /// An argument was invalid.
    pub const INVALID_ARGS: &str = "org.freedesktop.DBus.Error.InvalidArgs";
    /// The method does not exist.
    pub const UNKNOWN_METHOD: &str = "org.freedesktop.DBus.Error.UnknownMethod";
}

/// Errors replied to AT-SPI callers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AtspiError {
    /// The method is recognized but not implemented, or deprecated.
    #[error("Not supported{}", .reason.as_deref().map(|r| format!(": {r}")).unwrap_or_default())]
    NotSupported { reason: Option<String> },

    /// A well-formed call referenced a value that is not valid.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        message: String,
        /// The offending value, when there is a single one.
        value: Option<Variant>,
    },

    /// No method of that name exists on the Text interface.
    #[error("Unknown method '{0}'")]
    UnknownMethod(String),
}

impl AtspiError {
    /// A not-supported error without a reason.
    pub fn not_supported() -> Self {
        Self::NotSupported { reason: None }
    }

    /// A not-supported error explaining why.
    pub fn not_supported_because(reason: impl Into<String>) -> Self {
        Self::NotSupported {
            reason: Some(reason.into()),
        }
    }

    /// The error for a method superseded by `GetStringAtOffset`.
    pub fn deprecated() -> Self {
        Self::not_supported_because(DEPRECATED_IN_FAVOR_OF_GET_STRING_AT_OFFSET)
    }

    /// An invalid-argument error with no single offending value.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
            value: None,
        }
    }

    /// An invalid-argument error carrying the offending value.
    pub fn invalid_value(message: impl Into<String>, value: impl Into<Variant>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
            value: Some(value.into()),
        }
    }

    /// The error for a selection index outside the current selections.
    pub fn invalid_selection(index: i32) -> Self {
        Self::invalid_value(format!("Not a valid selection: {index}"), index)
    }

    /// The D-Bus error name this error is replied with.
    pub fn dbus_error_name(&self) -> &'static str {
        match self {
            Self::NotSupported { .. } => names::NOT_SUPPORTED,
            Self::InvalidArgument { .. } => names::INVALID_ARGS,
            Self::UnknownMethod(_) => names::UNKNOWN_METHOD,
        }
    }

    /// The human-readable message sent along with the error name.
    ///
    /// Not-supported errors without a reason carry an empty message.
    pub fn dbus_message(&self) -> String {
        match self {
            Self::NotSupported { reason } => reason.clone().unwrap_or_default(),
            Self::InvalidArgument { message, .. } => message.clone(),
            Self::UnknownMethod(name) => format!("Unknown method '{name}'"),
        }
    }
}

#[cfg(feature = "dbus")]
impl From<AtspiError> for zbus::fdo::Error {
    fn from(err: AtspiError) -> Self {
        let message = err.dbus_message();
        match err {
            AtspiError::NotSupported { .. } => Self::NotSupported(message),
            AtspiError::InvalidArgument { .. } => Self::InvalidArgs(message),
            AtspiError::UnknownMethod(_) => Self::UnknownMethod(message),
        }
    }
}
