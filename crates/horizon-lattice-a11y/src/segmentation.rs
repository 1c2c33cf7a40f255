//! Text segment boundaries by granularity.
//!
//! Boundaries are computed with `unicode-segmentation` and reported in
//! character offsets. Each boundary list starts at `0`, ends at the character
//! count of the text, and is strictly increasing, so consecutive pairs form
//! the segments of the text.
//!
//! # Segment rules
//!
//! - **Character**: one grapheme cluster.
//! - **Word**: from the start of a word to the start of the next word, so
//!   trailing whitespace and punctuation belong to the preceding word. Text
//!   before the first word forms its own segment.
//! - **Sentence**: Unicode sentence boundaries (UAX #29).
//! - **Paragraph**: newline-delimited, the newline included.
//! - **Line**: same as paragraphs unless a wrap width is given, in which case
//!   paragraphs are wrapped greedily at word boundaries.

use unicode_segmentation::UnicodeSegmentation;

use crate::accessible_text::TextSegment;
use crate::granularity::TextGranularity;
use crate::range::{char_count, char_slice};

/// The segment of `granularity` that contains `offset`.
///
/// `wrap_width` is the soft line width in characters and only affects
/// [`TextGranularity::Line`]. Returns `None` when `offset` is past the end of
/// the text.
pub fn segment_at(
    text: &str,
    offset: u32,
    granularity: TextGranularity,
    wrap_width: Option<u32>,
) -> Option<TextSegment> {
    if offset >= char_count(text) {
        return None;
    }

    let bounds = boundaries(text, granularity, wrap_width);
    bounds
        .windows(2)
        .find(|pair| pair[0] <= offset && offset < pair[1])
        .map(|pair| TextSegment::new(char_slice(text, pair[0], pair[1]), pair[0], pair[1]))
}

/// Segment boundaries of `text` for `granularity`, in character offsets.
pub fn boundaries(text: &str, granularity: TextGranularity, wrap_width: Option<u32>) -> Vec<u32> {
    match granularity {
        TextGranularity::Character => {
            from_byte_starts(text, text.grapheme_indices(true).map(|(idx, _)| idx))
        }
        TextGranularity::Word => from_byte_starts(
            text,
            text.split_word_bound_indices()
                .filter(|(_, piece)| is_word(piece))
                .map(|(idx, _)| idx),
        ),
        TextGranularity::Sentence => from_byte_starts(
            text,
            text.split_sentence_bound_indices().map(|(idx, _)| idx),
        ),
        TextGranularity::Line => line_boundaries(text, wrap_width),
        TextGranularity::Paragraph => paragraph_boundaries(text),
    }
}

fn is_word(piece: &str) -> bool {
    piece.chars().any(char::is_alphanumeric)
}

/// Convert increasing byte offsets of segment starts into character
/// boundaries, adding the start and end of the text.
fn from_byte_starts(text: &str, starts: impl IntoIterator<Item = usize>) -> Vec<u32> {
    let mut bounds = vec![0];
    let mut chars = 0;
    let mut pos = 0;

    for start in starts.into_iter().chain(std::iter::once(text.len())) {
        if start <= pos {
            continue;
        }
        chars += char_count(&text[pos..start]);
        pos = start;
        bounds.push(chars);
    }

    bounds
}

fn paragraph_boundaries(text: &str) -> Vec<u32> {
    let mut bounds = vec![0];
    let mut pos = 0;

    for ch in text.chars() {
        pos += 1;
        if ch == '\n' {
            bounds.push(pos);
        }
    }

    if bounds.last() != Some(&pos) {
        bounds.push(pos);
    }
    bounds
}

fn line_boundaries(text: &str, wrap_width: Option<u32>) -> Vec<u32> {
    let paragraphs = paragraph_boundaries(text);
    let Some(width) = wrap_width.filter(|&width| width > 0) else {
        return paragraphs;
    };

    let mut bounds = vec![0];
    for pair in paragraphs.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        let mut pos = start;
        let mut line_len = 0;

        for piece in char_slice(text, start, end).split_word_bounds() {
            let len = char_count(piece);

            // Whitespace hangs off the end of the line instead of wrapping.
            if piece.chars().all(char::is_whitespace) {
                line_len += len;
                pos += len;
                continue;
            }

            if line_len > 0 && line_len + len > width {
                bounds.push(pos);
                line_len = 0;
            }

            // Words longer than the line are broken at the width.
            let mut remaining = len;
            while line_len + remaining > width {
                let take = width - line_len;
                pos += take;
                remaining -= take;
                bounds.push(pos);
                line_len = 0;
            }

            line_len += remaining;
            pos += remaining;
        }

        if bounds.last() != Some(&end) {
            bounds.push(end);
        }
    }

    bounds
}
