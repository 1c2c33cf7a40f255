//! Typed replies and their wire form.

use std::collections::HashMap;

use crate::variant::Variant;

/// The successful reply to a Text method call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// `GetCaretOffset` → `(i)`
    Offset(i32),
    /// `GetText` → `(s)`
    Text(String),
    /// `GetCharacterAtOffset` → `(i)`, the code point or 0
    Character(i32),
    /// `GetStringAtOffset` → `(sii)`
    StringAtOffset { text: String, start: i32, end: i32 },
    /// `GetAttributes` → `(a{ss}ii)`
    Attributes {
        attributes: HashMap<String, String>,
        start: i32,
        end: i32,
    },
    /// `GetAttributeValue` → `(s)`
    AttributeValue(String),
    /// `GetNSelections` → `(i)`
    SelectionCount(i32),
    /// `GetSelection` → `(ii)`
    Selection { start: i32, end: i32 },
}

impl Reply {
    /// Tuple signature of the reply body.
    pub fn signature(&self) -> &'static str {
        match self {
            Self::Offset(_) | Self::Character(_) | Self::SelectionCount(_) => "(i)",
            Self::Text(_) | Self::AttributeValue(_) => "(s)",
            Self::StringAtOffset { .. } => "(sii)",
            Self::Attributes { .. } => "(a{ss}ii)",
            Self::Selection { .. } => "(ii)",
        }
    }

    /// Marshal the reply into its body values.
    pub fn into_variants(self) -> Vec<Variant> {
        match self {
            Self::Offset(value) | Self::Character(value) | Self::SelectionCount(value) => {
                vec![Variant::Int32(value)]
            }
            Self::Text(text) | Self::AttributeValue(text) => vec![Variant::Str(text)],
            Self::StringAtOffset { text, start, end } => vec![
                Variant::Str(text),
                Variant::Int32(start),
                Variant::Int32(end),
            ],
            Self::Attributes {
                attributes,
                start,
                end,
            } => vec![
                Variant::StrMap(attributes),
                Variant::Int32(start),
                Variant::Int32(end),
            ],
            Self::Selection { start, end } => vec![Variant::Int32(start), Variant::Int32(end)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_matches_signature() {
        let replies = [
            Reply::Offset(3),
            Reply::Text("abc".into()),
            Reply::StringAtOffset {
                text: String::new(),
                start: -1,
                end: -1,
            },
            Reply::Attributes {
                attributes: HashMap::new(),
                start: 0,
                end: i32::MAX,
            },
            Reply::Selection { start: 1, end: 4 },
        ];

        for reply in replies {
            let signature = reply.signature();
            let body: String = reply.into_variants().iter().map(Variant::signature).collect();
            assert_eq!(format!("({body})"), signature);
        }
    }

    #[test]
    fn test_string_at_offset_body() {
        let reply = Reply::StringAtOffset {
            text: "word ".into(),
            start: 4,
            end: 9,
        };
        assert_eq!(
            reply.into_variants(),
            vec![Variant::from("word "), Variant::Int32(4), Variant::Int32(9)]
        );
    }
}
