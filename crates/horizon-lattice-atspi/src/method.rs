//! Method and property tables of `org.a11y.atspi.Text`.

use std::fmt;
use std::str::FromStr;

use crate::error::AtspiError;

/// Generates the method enum together with its name table.
macro_rules! text_methods {
    ($($variant:ident => $name:literal, $supported:literal;)+) => {
        /// A method of the AT-SPI Text interface.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum TextMethod {
            $(
                #[doc = concat!("`", $name, "`")]
                $variant,
            )+
        }

        impl TextMethod {
            /// Every method of the interface, in introspection order.
            pub const ALL: &'static [TextMethod] = &[$(Self::$variant),+];

            /// Look a method up by its D-Bus member name.
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(Self::$variant),)+
                    _ => None,
                }
            }

            /// D-Bus member name of the method.
            pub fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }

            /// Whether the bridge answers the method with data.
            ///
            /// Unsupported methods always reply with a not-supported error.
            pub fn is_supported(self) -> bool {
                match self {
                    $(Self::$variant => $supported,)+
                }
            }
        }
    };
}

text_methods! {
    GetCaretOffset => "GetCaretOffset", true;
    SetCaretOffset => "SetCaretOffset", false;
    GetText => "GetText", true;
    GetTextBeforeOffset => "GetTextBeforeOffset", false;
    GetTextAtOffset => "GetTextAtOffset", false;
    GetTextAfterOffset => "GetTextAfterOffset", false;
    GetCharacterAtOffset => "GetCharacterAtOffset", true;
    GetStringAtOffset => "GetStringAtOffset", true;
    GetAttributes => "GetAttributes", true;
    GetAttributeValue => "GetAttributeValue", true;
    GetAttributeRun => "GetAttributeRun", false;
    GetDefaultAttributes => "GetDefaultAttributes", false;
    GetDefaultAttributeSet => "GetDefaultAttributeSet", false;
    GetNSelections => "GetNSelections", true;
    GetSelection => "GetSelection", true;
    AddSelection => "AddSelection", false;
    RemoveSelection => "RemoveSelection", false;
    SetSelection => "SetSelection", false;
    GetCharacterExtents => "GetCharacterExtents", false;
    GetRangeExtents => "GetRangeExtents", false;
    GetBoundedRanges => "GetBoundedRanges", false;
    ScrollSubstringTo => "ScrollSubstringTo", false;
    ScrollSubstringToPoint => "ScrollSubstringToPoint", false;
}

impl fmt::Display for TextMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TextMethod {
    type Err = AtspiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| AtspiError::UnknownMethod(s.to_string()))
    }
}

/// A read-only property of the AT-SPI Text interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextProperty {
    /// `CharacterCount` (`i`)
    CharacterCount,
    /// `CaretOffset` (`i`)
    CaretOffset,
}

impl TextProperty {
    /// Every property of the interface.
    pub const ALL: [TextProperty; 2] = [Self::CharacterCount, Self::CaretOffset];

    /// Look a property up by its D-Bus name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "CharacterCount" => Some(Self::CharacterCount),
            "CaretOffset" => Some(Self::CaretOffset),
            _ => None,
        }
    }

    /// D-Bus name of the property.
    pub fn name(self) -> &'static str {
        match self {
            Self::CharacterCount => "CharacterCount",
            Self::CaretOffset => "CaretOffset",
        }
    }
}

impl fmt::Display for TextProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
