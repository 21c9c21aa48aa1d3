//! Filter payloads.

use std::borrow::Cow;

use serde_json::Value;

use crate::FilterSet;

/// Tag marking a value that embeds a whole filter tree.
pub const CROSS_TABLE_TAG: &str = "cross-table";

/// The payload carried by a leaf filter.
///
/// Arbitrary payloads are kept as JSON. A `["cross-table", <filter set>]`
/// pair is lifted into [`FilterValue::CrossTable`] so the embedded tree can
/// be walked without re-probing its shape.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// Opaque payload.
    Scalar(Value),
    /// Embedded filter tree evaluated against another data scope.
    CrossTable(Box<FilterSet>),
}

impl Default for FilterValue {
    fn default() -> Self {
        Self::Scalar(Value::Null)
    }
}

impl FilterValue {
    /// Create a payload from JSON. A lossless `["cross-table", <filter set>]`
    /// pair becomes [`FilterValue::CrossTable`], as in [`FilterValue::from_json`].
    pub fn scalar(value: impl Into<Value>) -> Self {
        Self::from_json(&value.into())
    }

    /// Create a cross-table payload.
    pub fn cross_table(set: FilterSet) -> Self {
        Self::CrossTable(Box::new(set))
    }

    /// The embedded filter tree, if this is a cross-table payload.
    pub fn as_cross_table(&self) -> Option<&FilterSet> {
        match self {
            Self::CrossTable(set) => Some(set),
            Self::Scalar(_) => None,
        }
    }

    /// The embedded filter tree of a `["cross-table", <filter set>, ...]`
    /// payload.
    ///
    /// Unlike [`FilterValue::as_cross_table`] this also looks inside raw
    /// [`FilterValue::Scalar`] payloads, importing the second element
    /// leniently when it is shaped like a filter set.
    pub fn embedded_set(&self) -> Option<Cow<'_, FilterSet>> {
        match self {
            Self::CrossTable(set) => Some(Cow::Borrowed(set.as_ref())),
            Self::Scalar(Value::Array(items))
                if items.len() >= 2 && items[0].as_str() == Some(CROSS_TABLE_TAG) =>
            {
                FilterSet::from_json(&items[1]).map(Cow::Owned)
            }
            Self::Scalar(_) => None,
        }
    }

    /// Number of elements when the payload is a sequence.
    pub fn sequence_len(&self) -> Option<usize> {
        match self {
            Self::CrossTable(_) => Some(2),
            Self::Scalar(Value::Array(items)) => Some(items.len()),
            Self::Scalar(_) => None,
        }
    }

    /// Whether the payload is a sequence whose first element is the
    /// `"cross-table"` tag, whether or not the embedded tree is well formed.
    pub fn is_cross_table_tagged(&self) -> bool {
        match self {
            Self::CrossTable(_) => true,
            Self::Scalar(Value::Array(items)) => {
                items.first().and_then(Value::as_str) == Some(CROSS_TABLE_TAG)
            }
            Self::Scalar(_) => false,
        }
    }

    /// Whether the second element of a sequence payload is a filter set
    /// with at least one immediate entry using `operator`.
    ///
    /// Only the top level of the embedded set is inspected.
    pub fn embeds_operator(&self, operator: &str) -> bool {
        match self {
            Self::CrossTable(set) => set
                .filters
                .iter()
                .any(|node| node.operator() == Some(operator)),
            Self::Scalar(Value::Array(items)) if items.len() > 1 => items[1]
                .get("filtersSet")
                .and_then(Value::as_array)
                .is_some_and(|entries| {
                    entries
                        .iter()
                        .any(|entry| entry.get("operator").and_then(Value::as_str) == Some(operator))
                }),
            Self::Scalar(_) => false,
        }
    }
}

impl From<FilterSet> for FilterValue {
    fn from(set: FilterSet) -> Self {
        Self::cross_table(set)
    }
}

impl From<Value> for FilterValue {
    fn from(value: Value) -> Self {
        Self::from_json(&value)
    }
}

impl From<i64> for FilterValue {
    fn from(i: i64) -> Self {
        Self::Scalar(Value::from(i))
    }
}

impl From<i32> for FilterValue {
    fn from(i: i32) -> Self {
        Self::Scalar(Value::from(i))
    }
}

impl From<f64> for FilterValue {
    fn from(f: f64) -> Self {
        Self::Scalar(Value::from(f))
    }
}

impl From<bool> for FilterValue {
    fn from(b: bool) -> Self {
        Self::Scalar(Value::from(b))
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        Self::Scalar(Value::from(s))
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        Self::Scalar(Value::from(s))
    }
}

impl std::fmt::Display for FilterValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scalar(value) => write!(f, "{value}"),
            Self::CrossTable(set) => write!(f, "{CROSS_TABLE_TAG}({} filters)", set.leaf_count()),
        }
    }
}
