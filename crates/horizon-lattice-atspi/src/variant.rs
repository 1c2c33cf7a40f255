//! Loosely-typed wire values.
//!
//! Method calls arrive as a tuple of D-Bus values whose types are only known
//! at runtime. [`Params`] holds such a tuple and decodes it into the typed
//! arguments a method expects, failing with
//! [`AtspiError::InvalidArgument`] when the signature does not match.

use std::collections::HashMap;
use std::fmt;

use crate::error::{AtspiError, Result};

/// A single D-Bus value as used by the Text interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Variant {
    /// `i`
    Int32(i32),
    /// `u`
    UInt32(u32),
    /// `b`
    Boolean(bool),
    /// `s`
    Str(String),
    /// `a{ss}`
    StrMap(HashMap<String, String>),
}

impl Variant {
    /// D-Bus type signature of the value.
    pub fn signature(&self) -> &'static str {
        match self {
            Self::Int32(_) => "i",
            Self::UInt32(_) => "u",
            Self::Boolean(_) => "b",
            Self::Str(_) => "s",
            Self::StrMap(_) => "a{ss}",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int32(value) => write!(f, "{value}"),
            Self::UInt32(value) => write!(f, "{value}"),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Str(value) => write!(f, "{value:?}"),
            Self::StrMap(map) => write!(f, "{map:?}"),
        }
    }
}

impl From<i32> for Variant {
    fn from(value: i32) -> Self {
        Self::Int32(value)
    }
}

impl From<u32> for Variant {
    fn from(value: u32) -> Self {
        Self::UInt32(value)
    }
}

impl From<bool> for Variant {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<String> for Variant {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&str> for Variant {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<HashMap<String, String>> for Variant {
    fn from(value: HashMap<String, String>) -> Self {
        Self::StrMap(value)
    }
}

/// Types that can be taken out of a [`Variant`].
pub trait FromVariant: Sized {
    /// Signature this type decodes from.
    const SIGNATURE: &'static str;

    /// Extract the value, or `None` if the variant holds another type.
    fn from_variant(variant: &Variant) -> Option<Self>;
}

impl FromVariant for i32 {
    const SIGNATURE: &'static str = "i";

    fn from_variant(variant: &Variant) -> Option<Self> {
        match variant {
            Variant::Int32(value) => Some(*value),
            _ => None,
        }
    }
}

impl FromVariant for u32 {
    const SIGNATURE: &'static str = "u";

    fn from_variant(variant: &Variant) -> Option<Self> {
        match variant {
            Variant::UInt32(value) => Some(*value),
            _ => None,
        }
    }
}

impl FromVariant for bool {
    const SIGNATURE: &'static str = "b";

    fn from_variant(variant: &Variant) -> Option<Self> {
        match variant {
            Variant::Boolean(value) => Some(*value),
            _ => None,
        }
    }
}

impl FromVariant for String {
    const SIGNATURE: &'static str = "s";

    fn from_variant(variant: &Variant) -> Option<Self> {
        match variant {
            Variant::Str(value) => Some(value.clone()),
            _ => None,
        }
    }
}

/// The argument tuple of a method call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<Variant>);

impl Params {
    /// An empty argument tuple.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wrap a list of values.
    pub fn new(values: Vec<Variant>) -> Self {
        Self(values)
    }

    /// Number of arguments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no arguments.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The arguments.
    pub fn values(&self) -> &[Variant] {
        &self.0
    }

    /// Tuple signature, e.g. `(iu)`.
    pub fn signature(&self) -> String {
        let inner: String = self.0.iter().map(Variant::signature).collect();
        format!("({inner})")
    }

    /// Decode the arguments into a typed tuple.
    ///
    /// # Errors
    ///
    /// Returns [`AtspiError::InvalidArgument`] if the number or types of the
    /// arguments differ from `T`'s signature.
    pub fn parse<T: FromParams>(&self) -> Result<T> {
        T::from_params(self).ok_or_else(|| {
            AtspiError::invalid_argument(format!(
                "Expected arguments {} but received {}",
                T::signature(),
                self.signature()
            ))
        })
    }
}

impl From<Vec<Variant>> for Params {
    fn from(values: Vec<Variant>) -> Self {
        Self(values)
    }
}

/// Typed argument tuples decodable from [`Params`].
pub trait FromParams: Sized {
    /// Tuple signature, e.g. `(ii)`.
    fn signature() -> String;

    /// Decode, or `None` on any count or type mismatch.
    fn from_params(params: &Params) -> Option<Self>;
}

impl FromParams for () {
    fn signature() -> String {
        "()".to_string()
    }

    fn from_params(params: &Params) -> Option<Self> {
        params.is_empty().then_some(())
    }
}

impl<A: FromVariant> FromParams for (A,) {
    fn signature() -> String {
        format!("({})", A::SIGNATURE)
    }

    fn from_params(params: &Params) -> Option<Self> {
        match params.values() {
            [a] => Some((A::from_variant(a)?,)),
            _ => None,
        }
    }
}

impl<A: FromVariant, B: FromVariant> FromParams for (A, B) {
    fn signature() -> String {
        format!("({}{})", A::SIGNATURE, B::SIGNATURE)
    }

    fn from_params(params: &Params) -> Option<Self> {
        match params.values() {
            [a, b] => Some((A::from_variant(a)?, B::from_variant(b)?)),
            _ => None,
        }
    }
}

/// Build [`Params`] from a list of values convertible into [`Variant`].
///
/// ```
/// use horizon_lattice_atspi::params;
///
/// let params = params![3, 1u32];
/// assert_eq!(params.signature(), "(iu)");
/// ```
#[macro_export]
macro_rules! params {
    () => {
        $crate::variant::Params::empty()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::variant::Params::new(vec![$($crate::variant::Variant::from($value)),+])
    };
}
