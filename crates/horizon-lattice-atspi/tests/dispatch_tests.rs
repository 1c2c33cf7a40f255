//! Integration tests for the Text method dispatcher.

use std::collections::HashMap;

use horizon_lattice_a11y::attributes::names;
use horizon_lattice_a11y::{
    AccessibleText, TextAttribute, TextBuffer, TextGranularity, TextRange, TextSegment,
};
use horizon_lattice_atspi::error::DEPRECATED_IN_FAVOR_OF_GET_STRING_AT_OFFSET;
use horizon_lattice_atspi::{
    AtspiError, AtspiGranularity, Params, Reply, TextBridge, TextMethod, Variant, params,
};

const TEXT: &str = "Hello wörld. How are you?";

fn buffer() -> TextBuffer {
    TextBuffer::new(TEXT)
}

fn call(buffer: &TextBuffer, method: &str, params: Params) -> Result<Reply, AtspiError> {
    TextBridge::new(buffer)
        .dispatch(method, &params)
        .expect("known methods always reply")
}

/// A collaborator whose offsets do not fit the wire's `i32`.
struct Oversized;

const FAR: u32 = 3_000_000_000;

impl AccessibleText for Oversized {
    fn contents(&self, _start: u32, _end: u32) -> Option<String> {
        None
    }

    fn caret_position(&self) -> u32 {
        FAR
    }

    fn contents_at(&self, _offset: u32, _granularity: TextGranularity) -> Option<TextSegment> {
        Some(TextSegment::new("x", FAR, FAR + 1))
    }

    fn attributes(&self, _offset: u32) -> Vec<TextAttribute> {
        vec![TextAttribute::new(names::WEIGHT, "700", TextRange::new(FAR, 10))]
    }

    fn selection(&self) -> Vec<TextRange> {
        vec![TextRange::new(FAR, 5)]
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn test_get_text_ranges() {
    let buffer = buffer();
    let length = TEXT.chars().count() as i32;

    for start in 0..=length {
        for end in start..=length {
            let expected: String = TEXT
                .chars()
                .skip(start as usize)
                .take((end - start) as usize)
                .collect();
            assert_eq!(
                call(&buffer, "GetText", params![start, end]),
                Ok(Reply::Text(expected))
            );
        }
        assert_eq!(
            call(&buffer, "GetText", params![start, -1]),
            call(&buffer, "GetText", params![start, length])
        );
    }
}

#[test]
fn test_get_text_negative_start_reads_from_zero() {
    let buffer = buffer();
    let bridge = TextBridge::new(&buffer);

    assert_eq!(bridge.get_text(-5, 3), "Hel");
    assert_eq!(bridge.get_text(-1, -1), TEXT);
    assert_eq!(
        call(&buffer, "GetText", params![-5, 3]),
        Ok(Reply::Text("Hel".to_string()))
    );
}

#[test]
fn test_attributes_at_negative_offset_are_empty() {
    let buffer = buffer();
    buffer
        .add_attribute(TextRange::new(0, 5), names::WEIGHT, "700")
        .unwrap();
    let bridge = TextBridge::new(&buffer);

    assert_eq!(bridge.get_attributes(-1), (HashMap::new(), 0, i32::MAX));
    assert_eq!(bridge.get_attribute_value(-1, names::WEIGHT), "");
    assert_eq!(
        call(&buffer, "GetAttributeValue", params![-3, names::WEIGHT]),
        Ok(Reply::AttributeValue(String::new()))
    );
}

#[test]
fn test_offsets_beyond_i32_saturate() {
    let bridge = TextBridge::new(&Oversized);

    assert_eq!(bridge.get_caret_offset(), i32::MAX);
    assert_eq!(bridge.get_property("CaretOffset"), Some(Variant::Int32(i32::MAX)));
    assert_eq!(bridge.get_selection(0), Ok((i32::MAX, i32::MAX)));
    assert_eq!(
        bridge.get_string_at_offset(0, AtspiGranularity::Char),
        ("x".to_string(), i32::MAX, i32::MAX)
    );

    let (attributes, start, end) = bridge.get_attributes(0);
    assert_eq!(attributes.get(names::WEIGHT).map(String::as_str), Some("700"));
    assert_eq!((start, end), (i32::MAX, i32::MAX));
}

#[test]
fn test_get_character_at_offset() {
    let buffer = buffer();
    let bridge = TextBridge::new(&buffer);
    let length = TEXT.chars().count() as i32;

    assert_eq!(bridge.get_character_at_offset(-1), 0);
    assert_eq!(bridge.get_character_at_offset(length), 0);
    assert_eq!(bridge.get_character_at_offset(length + 10), 0);

    for (offset, ch) in TEXT.chars().enumerate() {
        assert_eq!(bridge.get_character_at_offset(offset as i32), ch as i32);
    }

    assert_eq!(
        call(&buffer, "GetCharacterAtOffset", params![7]),
        Ok(Reply::Character('ö' as i32))
    );
}

#[test]
fn test_get_string_at_offset() {
    let buffer = buffer();

    assert_eq!(
        call(
            &buffer,
            "GetStringAtOffset",
            params![8, u32::from(AtspiGranularity::Word)]
        ),
        Ok(Reply::StringAtOffset {
            text: "wörld. ".to_string(),
            start: 6,
            end: 13,
        })
    );
    assert_eq!(
        call(
            &buffer,
            "GetStringAtOffset",
            params![14, u32::from(AtspiGranularity::Sentence)]
        ),
        Ok(Reply::StringAtOffset {
            text: "How are you?".to_string(),
            start: 13,
            end: 25,
        })
    );
}

#[test]
fn test_get_string_at_offset_not_found() {
    let buffer = buffer();
    let not_found = Ok(Reply::StringAtOffset {
        text: String::new(),
        start: -1,
        end: -1,
    });

    for granularity in 0..=4u32 {
        assert_eq!(
            call(&buffer, "GetStringAtOffset", params![100, granularity]),
            not_found
        );
        assert_eq!(
            call(&buffer, "GetStringAtOffset", params![-3, granularity]),
            not_found
        );
    }
}

#[test]
fn test_get_string_at_offset_invalid_granularity() {
    let buffer = buffer();
    let err = call(&buffer, "GetStringAtOffset", params![0, 9u32]).unwrap_err();
    match err {
        AtspiError::InvalidArgument { value, .. } => assert_eq!(value, Some(Variant::UInt32(9))),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_get_attributes_intersects_runs() {
    init_tracing();
    let buffer = buffer();
    buffer
        .add_attribute(TextRange::from_bounds(2, 10), names::WEIGHT, "bold")
        .unwrap();
    buffer
        .add_attribute(TextRange::from_bounds(5, 8), names::STYLE, "italic")
        .unwrap();

    let expected = HashMap::from([
        (names::WEIGHT.to_string(), "bold".to_string()),
        (names::STYLE.to_string(), "italic".to_string()),
    ]);
    assert_eq!(
        call(&buffer, "GetAttributes", params![6]),
        Ok(Reply::Attributes {
            attributes: expected,
            start: 5,
            end: 8,
        })
    );

    // Only the bold run covers offset 3.
    assert_eq!(
        call(&buffer, "GetAttributes", params![3]),
        Ok(Reply::Attributes {
            attributes: HashMap::from([(names::WEIGHT.to_string(), "bold".to_string())]),
            start: 2,
            end: 10,
        })
    );

    assert_eq!(
        call(&buffer, "GetAttributes", params![20]),
        Ok(Reply::Attributes {
            attributes: HashMap::new(),
            start: 0,
            end: i32::MAX,
        })
    );
}

#[test]
fn test_get_attribute_value() {
    let buffer = buffer();
    buffer
        .add_attribute(TextRange::new(0, 5), names::WEIGHT, "700")
        .unwrap();
    let bridge = TextBridge::new(&buffer);

    assert_eq!(bridge.get_attribute_value(2, names::WEIGHT), "700");
    assert_eq!(bridge.get_attribute_value(2, "Weight"), "");
    assert_eq!(bridge.get_attribute_value(7, names::WEIGHT), "");
    assert_eq!(
        call(&buffer, "GetAttributeValue", params![1, names::WEIGHT]),
        Ok(Reply::AttributeValue("700".to_string()))
    );
}

#[test]
fn test_selections() {
    let buffer = buffer();
    buffer.select(TextRange::new(0, 5)).unwrap();
    buffer.add_selection(TextRange::new(13, 3)).unwrap();

    assert_eq!(
        call(&buffer, "GetNSelections", params![]),
        Ok(Reply::SelectionCount(2))
    );
    assert_eq!(
        call(&buffer, "GetSelection", params![1]),
        Ok(Reply::Selection { start: 13, end: 16 })
    );

    for index in [-1, 2, 50] {
        assert_eq!(
            call(&buffer, "GetSelection", params![index]),
            Err(AtspiError::invalid_selection(index))
        );
    }
}

#[test]
fn test_selection_index_out_of_range_without_selection() {
    let buffer = buffer();
    let err = TextBridge::new(&buffer).get_selection(0).unwrap_err();
    assert_eq!(err.to_string(), "Invalid argument: Not a valid selection: 0");
}

#[test]
fn test_caret() {
    let buffer = buffer();
    buffer.set_caret_position(4);
    let bridge = TextBridge::new(&buffer);

    assert_eq!(call(&buffer, "GetCaretOffset", params![]), Ok(Reply::Offset(4)));
    assert_eq!(bridge.get_property("CaretOffset"), Some(Variant::Int32(4)));
}

#[test]
fn test_character_count_matches_text() {
    let buffer = buffer();
    let bridge = TextBridge::new(&buffer);
    let text = bridge.get_text(0, -1);

    assert_eq!(bridge.character_count(), text.chars().count() as i32);
    assert_eq!(
        bridge.get_property("CharacterCount"),
        Some(Variant::Int32(25))
    );
    assert_eq!(bridge.get_property("Name"), None);
}

#[test]
fn test_unsupported_methods_ignore_arguments() {
    let buffer = buffer();

    for (method, params) in [
        ("SetCaretOffset", params![3]),
        ("SetCaretOffset", params!["not even an int"]),
        ("AddSelection", params![0, 4]),
        ("AddSelection", params![]),
        ("ScrollSubstringTo", params![0, 4, 1u32]),
        ("GetDefaultAttributes", params![]),
        ("GetBoundedRanges", params![0, 0, 10, 10, 0u32, 0u32, 0u32]),
    ] {
        assert_eq!(
            call(&buffer, method, params),
            Err(AtspiError::not_supported()),
            "{method}"
        );
    }

    for &method in TextMethod::ALL {
        if !method.is_supported() {
            let err = call(&buffer, method.name(), params![]).unwrap_err();
            assert!(matches!(err, AtspiError::NotSupported { .. }), "{method}");
        }
    }
}

#[test]
fn test_deprecated_methods_redirect() {
    let buffer = buffer();

    for method in ["GetTextBeforeOffset", "GetTextAtOffset", "GetTextAfterOffset"] {
        assert_eq!(
            call(&buffer, method, params![0, 1u32]),
            Err(AtspiError::NotSupported {
                reason: Some(DEPRECATED_IN_FAVOR_OF_GET_STRING_AT_OFFSET.to_string()),
            })
        );
    }
}

#[test]
fn test_mismatched_arguments() {
    let buffer = buffer();
    let err = call(&buffer, "GetText", params![0u32, 5u32]).unwrap_err();
    assert_eq!(err.dbus_error_name(), "org.freedesktop.DBus.Error.InvalidArgs");
    assert!(call(&buffer, "GetCaretOffset", params![1]).is_err());
}

#[test]
fn test_repeated_calls_are_idempotent() {
    let buffer = buffer();
    buffer
        .add_attribute(TextRange::new(0, 5), names::WEIGHT, "700")
        .unwrap();
    buffer.select(TextRange::new(2, 2)).unwrap();

    let calls = [
        ("GetText", params![0, -1]),
        ("GetAttributes", params![1]),
        ("GetStringAtOffset", params![3, 1u32]),
        ("GetSelection", params![0]),
        ("GetSelection", params![4]),
    ];
    for (method, params) in calls {
        let first = call(&buffer, method, params.clone());
        let second = call(&buffer, method, params);
        assert_eq!(first, second, "{method}");
    }
}

#[test]
fn test_reply_wire_form() {
    let buffer = buffer();
    let reply = call(&buffer, "GetStringAtOffset", params![0, 1u32]).unwrap();
    assert_eq!(reply.signature(), "(sii)");
    assert_eq!(
        reply.into_variants(),
        vec![
            Variant::from("Hello "),
            Variant::Int32(0),
            Variant::Int32(6),
        ]
    );
}
