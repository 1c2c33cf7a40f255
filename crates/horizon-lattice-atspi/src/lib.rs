//! AT-SPI Text interface bridge for Horizon Lattice.
//!
//! This crate exposes a widget's [`AccessibleText`] capability as the
//! `org.a11y.atspi.Text` D-Bus interface, which screen readers use to read
//! and navigate text out of process.
//!
//! - [`TextBridge`]: stateless translator from Text calls to
//!   [`AccessibleText`] queries, with typed methods and a name-based
//!   [`TextBridge::dispatch`]
//! - [`TextMethod`] / [`TextProperty`]: the closed method and property tables
//! - [`Params`] / [`Variant`] / [`Reply`]: loosely-typed arguments in, typed
//!   replies out
//! - [`AtspiError`]: not-supported and invalid-argument replies
//! - [`BridgeConfig`]: TOML configuration
//! - [`dbus`] (feature `dbus`): the zbus object and session-bus helpers
//!
//! # Example
//!
//! ```
//! use horizon_lattice_a11y::{TextBuffer, TextRange};
//! use horizon_lattice_atspi::{Reply, TextBridge, params};
//!
//! let entry = TextBuffer::new("Hello, world!");
//! entry.select(TextRange::new(7, 5)).unwrap();
//!
//! let bridge = TextBridge::new(&entry);
//! assert_eq!(bridge.get_text(0, 5), "Hello");
//! assert_eq!(bridge.get_selection(0), Ok((7, 12)));
//!
//! let reply = bridge.dispatch("GetText", &params![7, -1]).unwrap();
//! assert_eq!(reply, Ok(Reply::Text("world!".to_string())));
//! ```
//!
//! [`AccessibleText`]: horizon_lattice_a11y::AccessibleText

pub mod bridge;
pub mod config;
#[cfg(feature = "dbus")]
pub mod dbus;
pub mod error;
pub mod granularity;
pub mod logging;
pub mod method;
pub mod reply;
pub mod variant;

pub use bridge::{AttributeMap, BoundedRange, TextBridge, aggregate_attributes};
pub use config::{BridgeConfig, ConfigError, UnknownMethodPolicy};
pub use error::{AtspiError, Result};
pub use granularity::AtspiGranularity;
pub use method::{TextMethod, TextProperty};
pub use reply::Reply;
pub use variant::{FromParams, FromVariant, Params, Variant};
