//! The Text method dispatcher.
//!
//! [`TextBridge`] translates AT-SPI Text calls into queries against an
//! [`AccessibleText`] and turns the answers back into wire replies. It owns
//! nothing and keeps no state between calls; each call borrows the
//! collaborator, asks it for a fresh copy of what it needs and returns.
//!
//! Calls can enter through the typed methods (one per D-Bus member, used by
//! the zbus object) or through [`TextBridge::dispatch`], which takes a member
//! name and loosely-typed [`Params`].

use std::collections::HashMap;

use horizon_lattice_a11y::range::char_count;
use horizon_lattice_a11y::{AccessibleText, TextAttribute, UNBOUNDED};

use crate::config::{BridgeConfig, UnknownMethodPolicy};
use crate::error::{AtspiError, Result};
use crate::granularity::AtspiGranularity;
use crate::logging::targets;
use crate::method::{TextMethod, TextProperty};
use crate::reply::Reply;
use crate::variant::{Params, Variant};

/// Attribute map replied by `GetAttributes`.
pub type AttributeMap = HashMap<String, String>;

/// Bounding box `(x, y, width, height)` replied by the extents methods.
pub type Extents = (i32, i32, i32, i32);

/// One entry of a `GetBoundedRanges` reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedRange {
    /// First character of the range.
    pub start: i32,
    /// One past the last character of the range.
    pub end: i32,
    /// Text of the range.
    pub text: String,
}

/// Translates Text interface calls for one accessible text object.
#[derive(Debug)]
pub struct TextBridge<'a, T: AccessibleText + ?Sized> {
    text: &'a T,
    unknown_method: UnknownMethodPolicy,
}

impl<T: AccessibleText + ?Sized> Clone for TextBridge<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: AccessibleText + ?Sized> Copy for TextBridge<'_, T> {}

impl<'a, T: AccessibleText + ?Sized> TextBridge<'a, T> {
    /// Create a bridge over `text` with the default configuration.
    pub fn new(text: &'a T) -> Self {
        Self {
            text,
            unknown_method: UnknownMethodPolicy::default(),
        }
    }

    /// Create a bridge over `text` honoring `config`.
    pub fn with_config(text: &'a T, config: &BridgeConfig) -> Self {
        Self::new(text).unknown_method_policy(config.unknown_method)
    }

    /// Set how calls to unknown methods are answered.
    pub fn unknown_method_policy(mut self, policy: UnknownMethodPolicy) -> Self {
        self.unknown_method = policy;
        self
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Handle a call by member name.
    ///
    /// Returns `None` when the call gets no reply at all, which only happens
    /// for unknown methods under [`UnknownMethodPolicy::Ignore`].
    #[tracing::instrument(
        skip(self, params),
        fields(signature = %params.signature()),
        target = "horizon_lattice_atspi::dispatch",
        level = "trace"
    )]
    pub fn dispatch(&self, method_name: &str, params: &Params) -> Option<Result<Reply>> {
        let Some(method) = TextMethod::from_name(method_name) else {
            tracing::warn!(target: targets::DISPATCH, method = method_name, "unknown Text method");
            return match self.unknown_method {
                UnknownMethodPolicy::Reject => {
                    Some(Err(AtspiError::UnknownMethod(method_name.to_string())))
                }
                UnknownMethodPolicy::Ignore => None,
            };
        };

        let result = self.call(method, params);
        if let Err(err) = &result {
            tracing::debug!(target: targets::DISPATCH, %method, error = %err, "call rejected");
        }
        Some(result)
    }

    /// Handle a call to a known method.
    ///
    /// Supported methods decode `params` by their input signature.
    /// Unsupported methods are rejected whatever the arguments.
    ///
    /// # Errors
    ///
    /// Returns [`AtspiError::NotSupported`] for unsupported or deprecated
    /// methods, and [`AtspiError::InvalidArgument`] for mismatched arguments
    /// or invalid values.
    pub fn call(&self, method: TextMethod, params: &Params) -> Result<Reply> {
        match method {
            TextMethod::GetCaretOffset => {
                params.parse::<()>()?;
                Ok(Reply::Offset(self.get_caret_offset()))
            }
            TextMethod::GetText => {
                let (start, end): (i32, i32) = params.parse()?;
                Ok(Reply::Text(self.get_text(start, end)))
            }
            TextMethod::GetCharacterAtOffset => {
                let (offset,): (i32,) = params.parse()?;
                Ok(Reply::Character(self.get_character_at_offset(offset)))
            }
            TextMethod::GetStringAtOffset => {
                let (offset, granularity): (i32, u32) = params.parse()?;
                let granularity = AtspiGranularity::try_from(granularity)?;
                let (text, start, end) = self.get_string_at_offset(offset, granularity);
                Ok(Reply::StringAtOffset { text, start, end })
            }
            TextMethod::GetAttributes => {
                let (offset,): (i32,) = params.parse()?;
                let (attributes, start, end) = self.get_attributes(offset);
                Ok(Reply::Attributes {
                    attributes,
                    start,
                    end,
                })
            }
            TextMethod::GetAttributeValue => {
                let (offset, name): (i32, String) = params.parse()?;
                Ok(Reply::AttributeValue(
                    self.get_attribute_value(offset, &name),
                ))
            }
            TextMethod::GetNSelections => {
                params.parse::<()>()?;
                Ok(Reply::SelectionCount(self.get_n_selections()))
            }
            TextMethod::GetSelection => {
                let (index,): (i32,) = params.parse()?;
                let (start, end) = self.get_selection(index)?;
                Ok(Reply::Selection { start, end })
            }
            TextMethod::GetTextBeforeOffset
            | TextMethod::GetTextAtOffset
            | TextMethod::GetTextAfterOffset => Err(AtspiError::deprecated()),
            TextMethod::SetCaretOffset
            | TextMethod::GetAttributeRun
            | TextMethod::GetDefaultAttributes
            | TextMethod::GetDefaultAttributeSet
            | TextMethod::AddSelection
            | TextMethod::RemoveSelection
            | TextMethod::SetSelection
            | TextMethod::GetCharacterExtents
            | TextMethod::GetRangeExtents
            | TextMethod::GetBoundedRanges
            | TextMethod::ScrollSubstringTo
            | TextMethod::ScrollSubstringToPoint => Err(AtspiError::not_supported()),
        }
    }

    // =========================================================================
    // Properties
    // =========================================================================

    /// Read a property by name.
    ///
    /// Returns `None` for names the Text interface does not define.
    pub fn get_property(&self, name: &str) -> Option<Variant> {
        let property = TextProperty::from_name(name);
        if property.is_none() {
            tracing::debug!(target: targets::DISPATCH, property = name, "unknown Text property");
        }
        property.map(|property| self.property(property))
    }

    /// Read a property.
    pub fn property(&self, property: TextProperty) -> Variant {
        match property {
            TextProperty::CharacterCount => Variant::Int32(self.character_count()),
            TextProperty::CaretOffset => Variant::Int32(self.caret_offset()),
        }
    }

    /// `CharacterCount`: number of characters in the whole text.
    pub fn character_count(&self) -> i32 {
        let count = self
            .text
            .contents(0, UNBOUNDED)
            .map_or(0, |contents| char_count(&contents));
        to_wire(count)
    }

    /// `CaretOffset`: the caret position.
    pub fn caret_offset(&self) -> i32 {
        to_wire(self.text.caret_position())
    }

    // =========================================================================
    // Supported methods
    // =========================================================================

    /// `GetCaretOffset`.
    pub fn get_caret_offset(&self) -> i32 {
        self.caret_offset()
    }

    /// `GetText`: the characters in `[start, end)`.
    ///
    /// A negative `end` reads to the end of the text; a negative `start` is
    /// treated as 0.
    pub fn get_text(&self, start: i32, end: i32) -> String {
        let start = u32::try_from(start).unwrap_or(0);
        let end = u32::try_from(end).unwrap_or(UNBOUNDED);
        self.text.contents(start, end).unwrap_or_default()
    }

    /// `GetCharacterAtOffset`: the code point at `offset`, or 0 if there is
    /// none.
    pub fn get_character_at_offset(&self, offset: i32) -> i32 {
        let Ok(start) = u32::try_from(offset) else {
            return 0;
        };

        self.text
            .contents(start, start.saturating_add(1))
            .and_then(|window| window.chars().next())
            .map_or(0, |ch| ch as i32)
    }

    /// `GetStringAtOffset`: the segment of `granularity` containing `offset`
    /// and its bounds, or `("", -1, -1)` if there is none.
    pub fn get_string_at_offset(
        &self,
        offset: i32,
        granularity: AtspiGranularity,
    ) -> (String, i32, i32) {
        u32::try_from(offset)
            .ok()
            .and_then(|offset| self.text.contents_at(offset, granularity.into()))
            .map_or_else(
                || (String::new(), -1, -1),
                |segment| (segment.text, to_wire(segment.start), to_wire(segment.end)),
            )
    }

    /// `GetAttributes`: every attribute at `offset` and the run over which
    /// all of them hold.
    pub fn get_attributes(&self, offset: i32) -> (AttributeMap, i32, i32) {
        let attributes = u32::try_from(offset)
            .map(|offset| self.text.attributes(offset))
            .unwrap_or_default();
        aggregate_attributes(&attributes)
    }

    /// `GetAttributeValue`: the value of attribute `name` at `offset`, or an
    /// empty string if it is not set.
    pub fn get_attribute_value(&self, offset: i32, name: &str) -> String {
        let Ok(offset) = u32::try_from(offset) else {
            return String::new();
        };

        self.text
            .attributes(offset)
            .into_iter()
            .find(|attribute| attribute.name == name)
            .map(|attribute| attribute.value)
            .unwrap_or_default()
    }

    /// `GetNSelections`.
    pub fn get_n_selections(&self) -> i32 {
        to_wire(u32::try_from(self.text.selection().len()).unwrap_or(u32::MAX))
    }

    /// `GetSelection`: bounds of the selection at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`AtspiError::InvalidArgument`] carrying `index` if it is
    /// negative or not below the number of selections.
    pub fn get_selection(&self, index: i32) -> Result<(i32, i32)> {
        let selection = self.text.selection();
        usize::try_from(index)
            .ok()
            .and_then(|i| selection.get(i))
            .map(|range| (to_wire(range.start), to_wire(range.end())))
            .ok_or_else(|| AtspiError::invalid_selection(index))
    }

    // =========================================================================
    // Deprecated and unsupported methods
    // =========================================================================

    /// `GetTextBeforeOffset`, superseded by `GetStringAtOffset`.
    ///
    /// # Errors
    ///
    /// Always returns [`AtspiError::NotSupported`].
    pub fn get_text_before_offset(&self, _offset: i32, _kind: u32) -> Result<(String, i32, i32)> {
        Err(AtspiError::deprecated())
    }

    /// `GetTextAtOffset`, superseded by `GetStringAtOffset`.
    ///
    /// # Errors
    ///
    /// Always returns [`AtspiError::NotSupported`].
    pub fn get_text_at_offset(&self, _offset: i32, _kind: u32) -> Result<(String, i32, i32)> {
        Err(AtspiError::deprecated())
    }

    /// `GetTextAfterOffset`, superseded by `GetStringAtOffset`.
    ///
    /// # Errors
    ///
    /// Always returns [`AtspiError::NotSupported`].
    pub fn get_text_after_offset(&self, _offset: i32, _kind: u32) -> Result<(String, i32, i32)> {
        Err(AtspiError::deprecated())
    }

    /// `SetCaretOffset`. The caret cannot be moved through the bridge.
    ///
    /// # Errors
    ///
    /// Always returns [`AtspiError::NotSupported`].
    pub fn set_caret_offset(&self, _offset: i32) -> Result<bool> {
        Err(AtspiError::not_supported())
    }

    /// `GetAttributeRun`.
    ///
    /// # Errors
    ///
    /// Always returns [`AtspiError::NotSupported`].
    pub fn get_attribute_run(
        &self,
        _offset: i32,
        _include_defaults: bool,
    ) -> Result<(AttributeMap, i32, i32)> {
        Err(AtspiError::not_supported())
    }

    /// `GetDefaultAttributes`.
    ///
    /// # Errors
    ///
    /// Always returns [`AtspiError::NotSupported`].
    pub fn get_default_attributes(&self) -> Result<AttributeMap> {
        Err(AtspiError::not_supported())
    }

    /// `GetDefaultAttributeSet`.
    ///
    /// # Errors
    ///
    /// Always returns [`AtspiError::NotSupported`].
    pub fn get_default_attribute_set(&self) -> Result<AttributeMap> {
        Err(AtspiError::not_supported())
    }

    /// `AddSelection`.
    ///
    /// # Errors
    ///
    /// Always returns [`AtspiError::NotSupported`].
    pub fn add_selection(&self, _start: i32, _end: i32) -> Result<bool> {
        Err(AtspiError::not_supported())
    }

    /// `RemoveSelection`.
    ///
    /// # Errors
    ///
    /// Always returns [`AtspiError::NotSupported`].
    pub fn remove_selection(&self, _index: i32) -> Result<bool> {
        Err(AtspiError::not_supported())
    }

    /// `SetSelection`.
    ///
    /// # Errors
    ///
    /// Always returns [`AtspiError::NotSupported`].
    pub fn set_selection(&self, _index: i32, _start: i32, _end: i32) -> Result<bool> {
        Err(AtspiError::not_supported())
    }

    /// `GetCharacterExtents`.
    ///
    /// # Errors
    ///
    /// Always returns [`AtspiError::NotSupported`].
    pub fn get_character_extents(&self, _offset: i32, _coord_type: u32) -> Result<Extents> {
        Err(AtspiError::not_supported())
    }

    /// `GetRangeExtents`.
    ///
    /// # Errors
    ///
    /// Always returns [`AtspiError::NotSupported`].
    pub fn get_range_extents(&self, _start: i32, _end: i32, _coord_type: u32) -> Result<Extents> {
        Err(AtspiError::not_supported())
    }

    /// `GetBoundedRanges`.
    ///
    /// # Errors
    ///
    /// Always returns [`AtspiError::NotSupported`].
    #[allow(clippy::too_many_arguments)]
    pub fn get_bounded_ranges(
        &self,
        _x: i32,
        _y: i32,
        _width: i32,
        _height: i32,
        _coord_type: u32,
        _clip_x: u32,
        _clip_y: u32,
    ) -> Result<Vec<BoundedRange>> {
        Err(AtspiError::not_supported())
    }

    /// `ScrollSubstringTo`.
    ///
    /// # Errors
    ///
    /// Always returns [`AtspiError::NotSupported`].
    pub fn scroll_substring_to(&self, _start: i32, _end: i32, _kind: u32) -> Result<bool> {
        Err(AtspiError::not_supported())
    }

    /// `ScrollSubstringToPoint`.
    ///
    /// # Errors
    ///
    /// Always returns [`AtspiError::NotSupported`].
    pub fn scroll_substring_to_point(
        &self,
        _start: i32,
        _end: i32,
        _coord_type: u32,
        _x: i32,
        _y: i32,
    ) -> Result<bool> {
        Err(AtspiError::not_supported())
    }
}

/// Merge attribute runs into a name → value map and the run they share.
///
/// Later attributes win over earlier ones with the same name. The run starts
/// as `[0, i32::MAX)` and is narrowed by each attribute in turn: the start
/// moves up to the attribute's start, and the end moves down to the new start
/// plus the attribute's length. The end is measured from the running start,
/// not from the attribute's own start, so partly overlapping runs can give a
/// wider run than their intersection and the result depends on their order.
pub fn aggregate_attributes(attributes: &[TextAttribute]) -> (AttributeMap, i32, i32) {
    let mut map = AttributeMap::with_capacity(attributes.len());
    let mut start: u32 = 0;
    let mut end: u32 = i32::MAX as u32;

    for attribute in attributes {
        map.insert(attribute.name.clone(), attribute.value.clone());
        start = start.max(attribute.range.start);
        end = end.min(start.saturating_add(attribute.range.length));
    }

    (map, to_wire(start), to_wire(end))
}

/// Saturating conversion of an offset to the wire's `i32`.
fn to_wire(offset: u32) -> i32 {
    i32::try_from(offset).unwrap_or(i32::MAX)
}
