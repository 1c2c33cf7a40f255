//! Accessible text for Horizon Lattice.
//!
//! This crate defines the toolkit side of text accessibility: the
//! [`AccessibleText`] capability that text-bearing widgets (labels, line
//! edits, text views) implement, and the value types it trades in.
//!
//! Protocol bridges such as `horizon-lattice-atspi` only ever talk to an
//! [`AccessibleText`], never to a concrete widget, so any widget can be made
//! readable by assistive technologies by implementing the trait or by
//! keeping a [`TextBuffer`] in sync with its contents.
//!
//! # Offsets
//!
//! Every offset is a character offset (a count of `char`s). Ranges are
//! half-open, and [`range::UNBOUNDED`] stands for "until the end of the
//! text".
//!
//! # Example
//!
//! ```
//! use horizon_lattice_a11y::{AccessibleText, TextBuffer, TextGranularity};
//!
//! let label = TextBuffer::new("Hello world. How are you?");
//!
//! let sentence = label.contents_at(15, TextGranularity::Sentence).unwrap();
//! assert_eq!(sentence.text, "How are you?");
//! assert_eq!((sentence.start, sentence.end), (13, 25));
//! ```

pub mod accessible_text;
pub mod attributes;
pub mod error;
pub mod granularity;
pub mod logging;
pub mod range;
pub mod segmentation;
pub mod text_buffer;

pub use accessible_text::{AccessibleText, TextSegment};
pub use attributes::TextAttribute;
pub use error::{A11yError, Result};
pub use granularity::TextGranularity;
pub use range::{TextRange, UNBOUNDED};
pub use text_buffer::TextBuffer;
