//! Generic property tree produced by the structural decoder
//!
//! One `Property` is one decoded element: a name, an optional scalar
//! value, and ordered sub-properties. Duplicate-named siblings are
//! preserved as repeated entries — deduplication is a materializer
//! concern, never a decoding concern.

use serde::Serialize;

/// A decoded element prior to type materialization.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Property {
    pub name: String,
    pub value: Option<String>,
    pub sub_properties: Vec<Property>,
    /// Cleared until a materializer recognizes the property; anything
    /// still false after materialization is reported through diagnostics.
    #[serde(skip)]
    pub known: bool,
}

impl Property {
    /// An element with no value and no children.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// A scalar-valued element.
    pub fn scalar(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            ..Self::default()
        }
    }

    /// The synthetic leaf wrapping a bare text node.
    pub fn text(value: impl Into<String>) -> Self {
        Self::scalar("text", value)
    }

    pub fn value_str(&self) -> &str {
        self.value.as_deref().unwrap_or_default()
    }

    /// Scalar value parsed as an integer, `None` when absent or unparseable.
    pub fn value_i32(&self) -> Option<i32> {
        self.value.as_deref().and_then(|v| v.trim().parse().ok())
    }

    /// Scalar value parsed as a coordinate pair (`"x,y"`).
    pub fn value_coords(&self) -> Option<(i32, i32)> {
        let raw = self.value.as_deref()?;
        let (x, y) = raw.split_once(',')?;
        Some((x.trim().parse().ok()?, y.trim().parse().ok()?))
    }

    /// Structural equality: name, value, and sub-tree — the `known` flag
    /// is transient state and does not participate.
    pub fn same_shape(&self, other: &Property) -> bool {
        self.name == other.name
            && self.value == other.value
            && self.sub_properties.len() == other.sub_properties.len()
            && self
                .sub_properties
                .iter()
                .zip(&other.sub_properties)
                .all(|(a, b)| a.same_shape(b))
    }
}

/// First property with the given name, if any.
pub fn find_property<'a>(properties: &'a [Property], name: &str) -> Option<&'a Property> {
    properties.iter().find(|p| p.name == name)
}

/// Mutable variant of [`find_property`].
pub fn find_property_mut<'a>(
    properties: &'a mut [Property],
    name: &str,
) -> Option<&'a mut Property> {
    properties.iter_mut().find(|p| p.name == name)
}
