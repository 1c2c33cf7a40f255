//! The Text interface as a zbus object.
//!
//! [`TextInterface`] exports an [`AccessibleText`] at an object path as
//! `org.a11y.atspi.Text`. Every member is declared with its AT-SPI
//! signature so introspection matches what assistive technologies expect,
//! and every call is answered by a [`TextBridge`].
//!
//! zbus answers calls to members the interface does not declare with
//! `org.freedesktop.DBus.Error.UnknownMethod` itself, so
//! [`BridgeConfig::unknown_method`] does not apply here. Rejected calls to
//! declared members are logged under the dispatch target just as
//! [`TextBridge::dispatch`] logs them.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use horizon_lattice_a11y::TextBuffer;
//! use horizon_lattice_atspi::BridgeConfig;
//! use horizon_lattice_atspi::dbus::connect_session;
//!
//! # async fn run() -> zbus::Result<()> {
//! let label = Arc::new(TextBuffer::new("Hello, world!"));
//! let _connection = connect_session(&BridgeConfig::default(), label).await?;
//! std::future::pending::<()>().await;
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use horizon_lattice_a11y::AccessibleText;
use zbus::zvariant::Value;
use zbus::{Connection, fdo, interface};

use crate::bridge::{AttributeMap, Extents, TextBridge};
use crate::config::BridgeConfig;
use crate::error::AtspiError;
use crate::granularity::AtspiGranularity;
use crate::logging::targets;
use crate::method::TextMethod;

/// An accessible text object shareable with the D-Bus object server.
pub type SharedText = Arc<dyn AccessibleText + Send + Sync>;

/// `org.a11y.atspi.Text` served for one accessible text object.
pub struct TextInterface {
    text: SharedText,
}

impl std::fmt::Debug for TextInterface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextInterface").finish_non_exhaustive()
    }
}

impl TextInterface {
    /// Wrap an accessible text object.
    pub fn new(text: SharedText) -> Self {
        Self { text }
    }

    fn bridge(&self) -> TextBridge<'_, dyn AccessibleText + Send + Sync> {
        TextBridge::new(self.text.as_ref())
    }
}

#[interface(name = "org.a11y.atspi.Text")]
impl TextInterface {
    fn get_caret_offset(&self) -> i32 {
        self.bridge().get_caret_offset()
    }

    fn set_caret_offset(&self, offset: i32) -> fdo::Result<bool> {
        reply(TextMethod::SetCaretOffset, self.bridge().set_caret_offset(offset))
    }

    fn get_text(&self, start_offset: i32, end_offset: i32) -> String {
        tracing::trace!(target: targets::DBUS, start_offset, end_offset, "GetText");
        self.bridge().get_text(start_offset, end_offset)
    }

    #[zbus(out_args("text", "start_offset", "end_offset"))]
    fn get_text_before_offset(&self, offset: i32, kind: u32) -> fdo::Result<(String, i32, i32)> {
        reply(TextMethod::GetTextBeforeOffset, self.bridge().get_text_before_offset(offset, kind))
    }

    #[zbus(out_args("text", "start_offset", "end_offset"))]
    fn get_text_at_offset(&self, offset: i32, kind: u32) -> fdo::Result<(String, i32, i32)> {
        reply(TextMethod::GetTextAtOffset, self.bridge().get_text_at_offset(offset, kind))
    }

    #[zbus(out_args("text", "start_offset", "end_offset"))]
    fn get_text_after_offset(&self, offset: i32, kind: u32) -> fdo::Result<(String, i32, i32)> {
        reply(TextMethod::GetTextAfterOffset, self.bridge().get_text_after_offset(offset, kind))
    }

    fn get_character_at_offset(&self, offset: i32) -> i32 {
        self.bridge().get_character_at_offset(offset)
    }

    #[zbus(out_args("text", "start_offset", "end_offset"))]
    fn get_string_at_offset(
        &self,
        offset: i32,
        granularity: u32,
    ) -> fdo::Result<(String, i32, i32)> {
        tracing::trace!(target: targets::DBUS, offset, granularity, "GetStringAtOffset");
        let granularity = reply(
            TextMethod::GetStringAtOffset,
            AtspiGranularity::try_from(granularity),
        )?;
        Ok(self.bridge().get_string_at_offset(offset, granularity))
    }

    #[zbus(out_args("attributes", "start_offset", "end_offset"))]
    fn get_attributes(&self, offset: i32) -> (AttributeMap, i32, i32) {
        self.bridge().get_attributes(offset)
    }

    fn get_attribute_value(&self, offset: i32, attribute_name: &str) -> String {
        self.bridge().get_attribute_value(offset, attribute_name)
    }

    #[zbus(out_args("attributes", "start_offset", "end_offset"))]
    fn get_attribute_run(
        &self,
        offset: i32,
        include_defaults: bool,
    ) -> fdo::Result<(AttributeMap, i32, i32)> {
        reply(
            TextMethod::GetAttributeRun,
            self.bridge().get_attribute_run(offset, include_defaults),
        )
    }

    fn get_default_attributes(&self) -> fdo::Result<HashMap<String, String>> {
        reply(TextMethod::GetDefaultAttributes, self.bridge().get_default_attributes())
    }

    fn get_default_attribute_set(&self) -> fdo::Result<HashMap<String, String>> {
        reply(TextMethod::GetDefaultAttributeSet, self.bridge().get_default_attribute_set())
    }

    #[zbus(name = "GetNSelections")]
    fn get_n_selections(&self) -> i32 {
        self.bridge().get_n_selections()
    }

    #[zbus(out_args("start_offset", "end_offset"))]
    fn get_selection(&self, selection_num: i32) -> fdo::Result<(i32, i32)> {
        reply(TextMethod::GetSelection, self.bridge().get_selection(selection_num))
    }

    fn add_selection(&self, start_offset: i32, end_offset: i32) -> fdo::Result<bool> {
        reply(TextMethod::AddSelection, self.bridge().add_selection(start_offset, end_offset))
    }

    fn remove_selection(&self, selection_num: i32) -> fdo::Result<bool> {
        reply(TextMethod::RemoveSelection, self.bridge().remove_selection(selection_num))
    }

    fn set_selection(
        &self,
        selection_num: i32,
        start_offset: i32,
        end_offset: i32,
    ) -> fdo::Result<bool> {
        reply(
            TextMethod::SetSelection,
            self.bridge().set_selection(selection_num, start_offset, end_offset),
        )
    }

    #[zbus(out_args("x", "y", "width", "height"))]
    fn get_character_extents(&self, offset: i32, coord_type: u32) -> fdo::Result<Extents> {
        reply(
            TextMethod::GetCharacterExtents,
            self.bridge().get_character_extents(offset, coord_type),
        )
    }

    #[zbus(out_args("x", "y", "width", "height"))]
    fn get_range_extents(
        &self,
        start_offset: i32,
        end_offset: i32,
        coord_type: u32,
    ) -> fdo::Result<Extents> {
        reply(
            TextMethod::GetRangeExtents,
            self.bridge().get_range_extents(start_offset, end_offset, coord_type),
        )
    }

    fn get_bounded_ranges(
        &self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        coord_type: u32,
        x_clip_type: u32,
        y_clip_type: u32,
    ) -> fdo::Result<Vec<(i32, i32, String, Value<'static>)>> {
        let ranges = reply(
            TextMethod::GetBoundedRanges,
            self.bridge().get_bounded_ranges(
                x,
                y,
                width,
                height,
                coord_type,
                x_clip_type,
                y_clip_type,
            ),
        )?;
        Ok(ranges
            .into_iter()
            .map(|range| (range.start, range.end, range.text, Value::from(String::new())))
            .collect())
    }

    fn scroll_substring_to(
        &self,
        start_offset: i32,
        end_offset: i32,
        kind: u32,
    ) -> fdo::Result<bool> {
        reply(
            TextMethod::ScrollSubstringTo,
            self.bridge().scroll_substring_to(start_offset, end_offset, kind),
        )
    }

    fn scroll_substring_to_point(
        &self,
        start_offset: i32,
        end_offset: i32,
        coord_type: u32,
        x: i32,
        y: i32,
    ) -> fdo::Result<bool> {
        reply(
            TextMethod::ScrollSubstringToPoint,
            self.bridge().scroll_substring_to_point(start_offset, end_offset, coord_type, x, y),
        )
    }

    #[zbus(property)]
    fn character_count(&self) -> i32 {
        self.bridge().character_count()
    }

    #[zbus(property)]
    fn caret_offset(&self) -> i32 {
        self.bridge().caret_offset()
    }
}

/// Turn a bridge result into a D-Bus reply, logging rejections.
fn reply<T>(method: TextMethod, result: crate::Result<T>) -> fdo::Result<T> {
    result.map_err(|err: AtspiError| {
        tracing::debug!(target: targets::DISPATCH, %method, error = %err, "call rejected");
        err.into()
    })
}

/// Register the Text interface for `text` at `path` on `connection`.
///
/// Returns `false` if the path already has a Text interface.
///
/// # Errors
///
/// Fails if `path` is not a valid object path.
pub async fn serve(connection: &Connection, path: &str, text: SharedText) -> zbus::Result<bool> {
    let registered = connection
        .object_server()
        .at(path, TextInterface::new(text))
        .await?;
    tracing::debug!(target: targets::DBUS, path, registered, "registered Text interface");
    Ok(registered)
}

/// Connect to the session bus and serve `text` as configured.
///
/// The interface is registered at [`BridgeConfig::object_path`], and
/// [`BridgeConfig::bus_name`] is requested when set.
///
/// # Errors
///
/// Fails if the session bus is unreachable, the object path or bus name is
/// invalid, or the name cannot be acquired.
pub async fn connect_session(config: &BridgeConfig, text: SharedText) -> zbus::Result<Connection> {
    let mut builder = zbus::connection::Builder::session()?
        .serve_at(config.object_path.as_str(), TextInterface::new(text))?;
    if let Some(name) = config.bus_name.as_deref() {
        builder = builder.name(name)?;
    }

    let connection = builder.build().await?;
    tracing::info!(
        target: targets::DBUS,
        path = %config.object_path,
        bus_name = ?config.bus_name,
        unique_name = ?connection.unique_name(),
        "serving accessible text on the session bus"
    );
    Ok(connection)
}
