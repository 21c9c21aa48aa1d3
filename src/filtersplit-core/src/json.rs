//! Import of filter trees from JSON documents.
//!
//! Callers hand filter trees over as loosely-typed JSON. Import is lenient:
//! anything that is not shaped like a filter tree is dropped instead of
//! raising, matching the partitioner's "malformed in, empty out" contract.

use common_error::{shape_err, SplitResult};
use serde_json::{Map, Value};

use crate::{Conjunction, Filter, FilterNode, FilterSet, FilterValue, CROSS_TABLE_TAG};

const FILTERS_SET_KEY: &str = "filtersSet";
const OPERATOR_KEY: &str = "operator";
const VALUE_KEY: &str = "value";
const CONJUNCTION_KEY: &str = "conjunction";

impl FilterSet {
    /// Import a filter set. Returns `None` unless `doc` is an object whose
    /// `filtersSet` is an array.
    pub fn from_json(doc: &Value) -> Option<Self> {
        let object = doc.as_object()?;
        let entries = object.get(FILTERS_SET_KEY)?.as_array()?;
        Some(Self {
            filters: entries.iter().filter_map(FilterNode::from_json).collect(),
            conjunction: conjunction_field(object),
        })
    }

    /// Parse a JSON string into a filter set.
    pub fn parse_json(json: &str) -> SplitResult<Self> {
        let doc: Value = serde_json::from_str(json)?;
        match Self::from_json(&doc) {
            Some(set) => Ok(set),
            None => shape_err!("expected an object with a `{}` array", FILTERS_SET_KEY),
        }
    }
}

impl FilterNode {
    /// Import a filter set entry. Non-object entries, and entries whose
    /// `filtersSet` is present but not an array, are skipped.
    pub fn from_json(doc: &Value) -> Option<Self> {
        let object = doc.as_object()?;
        match object.get(FILTERS_SET_KEY) {
            Some(_) => FilterSet::from_json(doc).map(Self::Set),
            None => Some(Self::Leaf(Filter::from_object(object))),
        }
    }
}

impl Filter {
    /// Import a leaf filter. Returns `None` if `doc` is not an object.
    pub fn from_json(doc: &Value) -> Option<Self> {
        doc.as_object().map(Self::from_object)
    }

    fn from_object(object: &Map<String, Value>) -> Self {
        Self {
            operator: object
                .get(OPERATOR_KEY)
                .and_then(Value::as_str)
                .filter(|op| !op.is_empty())
                .map(str::to_string),
            value: object
                .get(VALUE_KEY)
                .map(FilterValue::from_json)
                .unwrap_or_default(),
            conjunction: conjunction_field(object),
        }
    }
}

impl FilterValue {
    /// Import a payload, lifting `["cross-table", <filter set>]` into
    /// [`FilterValue::CrossTable`].
    ///
    /// The payload is only lifted when nothing would be lost: exactly two
    /// elements and an embedded set that imports entry for entry. Anything
    /// else stays [`FilterValue::Scalar`] untouched.
    pub fn from_json(doc: &Value) -> Self {
        if let Some([tag, embedded]) = doc.as_array().map(Vec::as_slice) {
            if tag.as_str() == Some(CROSS_TABLE_TAG) && is_exact_set(embedded) {
                if let Some(set) = FilterSet::from_json(embedded) {
                    return Self::cross_table(set);
                }
            }
        }
        Self::Scalar(doc.clone())
    }
}

/// Whether `doc` imports as a filter set without dropping or rewriting
/// anything.
fn is_exact_set(doc: &Value) -> bool {
    let Some(object) = doc.as_object() else {
        return false;
    };
    let Some(entries) = object.get(FILTERS_SET_KEY).and_then(Value::as_array) else {
        return false;
    };
    object
        .keys()
        .all(|key| key == FILTERS_SET_KEY || key == CONJUNCTION_KEY)
        && is_exact_string(object, CONJUNCTION_KEY)
        && entries.iter().all(is_exact_node)
}

fn is_exact_node(doc: &Value) -> bool {
    let Some(object) = doc.as_object() else {
        return false;
    };
    if object.contains_key(FILTERS_SET_KEY) {
        return is_exact_set(doc);
    }
    object
        .keys()
        .all(|key| key == OPERATOR_KEY || key == VALUE_KEY || key == CONJUNCTION_KEY)
        && is_exact_string(object, OPERATOR_KEY)
        && is_exact_string(object, CONJUNCTION_KEY)
}

/// Absent, or a non-empty string.
fn is_exact_string(object: &Map<String, Value>, key: &str) -> bool {
    object
        .get(key)
        .map_or(true, |field| field.as_str().is_some_and(|s| !s.is_empty()))
}

fn conjunction_field(object: &Map<String, Value>) -> Option<Conjunction> {
    object
        .get(CONJUNCTION_KEY)
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .map(Conjunction::parse)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_import_nested() {
        let set = FilterSet::from_json(&json!({
            "conjunction": "or",
            "filtersSet": [
                {"operator": "smart", "value": 1},
                {"filtersSet": [{"operator": "eq", "value": 2, "conjunction": "and"}]}
            ]
        }))
        .unwrap();

        assert_eq!(set.conjunction, Some(Conjunction::Or));
        assert_eq!(set.len(), 2);
        assert_eq!(set.filters[0], Filter::new("smart", 1).into());
        let nested = set.filters[1].as_set().unwrap();
        assert_eq!(nested.conjunction, None);
        assert_eq!(
            nested.filters[0],
            Filter::new("eq", 2).with_conjunction("and").into()
        );
    }

    #[test]
    fn test_import_rejects_non_sets() {
        assert!(FilterSet::from_json(&json!(null)).is_none());
        assert!(FilterSet::from_json(&json!({"filtersSet": "not-an-array"})).is_none());
        assert!(FilterSet::from_json(&json!({})).is_none());
        assert!(FilterSet::from_json(&json!([1, 2])).is_none());
    }

    #[test]
    fn test_import_skips_non_object_entries() {
        let set = FilterSet::from_json(&json!({
            "filtersSet": [1, null, "x", {"operator": "eq", "value": 2}]
        }))
        .unwrap();

        assert_eq!(set.filters, vec![Filter::new("eq", 2).into()]);
    }

    #[test]
    fn test_import_skips_entry_with_non_array_filters_set() {
        let set = FilterSet::from_json(&json!({
            "filtersSet": [
                {"filtersSet": 5, "operator": "eq"},
                {"operator": "gt", "value": 1}
            ]
        }))
        .unwrap();

        assert_eq!(set.filters, vec![Filter::new("gt", 1).into()]);
    }

    #[test]
    fn test_import_cross_table() {
        let value = FilterValue::from_json(&json!([
            "cross-table",
            {"filtersSet": [{"operator": "smart", "value": 9}]}
        ]));

        let embedded = value.as_cross_table().unwrap();
        assert_eq!(embedded.filters, vec![Filter::new("smart", 9).into()]);
    }

    #[test]
    fn test_import_malformed_cross_table_stays_scalar() {
        let value = FilterValue::from_json(&json!(["cross-table", {"filtersSet": 1}]));
        assert!(value.as_cross_table().is_none());
        assert!(value.is_cross_table_tagged());

        let value = FilterValue::from_json(&json!(["cross-table"]));
        assert!(matches!(value, FilterValue::Scalar(_)));
    }

    #[test]
    fn test_import_lossy_cross_table_stays_scalar() {
        let payloads = [
            json!(["cross-table", {"filtersSet": [{"operator": "x"}]}, "extra"]),
            json!(["cross-table", {"filtersSet": [1, {"operator": "x"}]}]),
            json!(["cross-table", {"filtersSet": [{"operator": ""}]}]),
            json!(["cross-table", {"filtersSet": [{"operator": "x", "field": "name"}]}]),
            json!(["cross-table", {"filtersSet": [{"filtersSet": [null]}]}]),
            json!(["cross-table", {"filtersSet": [], "conjunction": 1}]),
        ];

        for payload in payloads {
            assert_eq!(FilterValue::from_json(&payload), FilterValue::Scalar(payload.clone()));
        }
    }

    #[test]
    fn test_import_non_cross_referencing_filter_is_untouched() {
        let raw = json!(["cross-table", {"filtersSet": [1, {"operator": "x"}]}, "extra"]);
        let filter = Filter::from_json(&json!({"operator": "eq", "value": raw.clone()})).unwrap();

        assert_eq!(filter.value, FilterValue::Scalar(raw));
    }

    #[test]
    fn test_import_keeps_conjunction_spelling() {
        let set = FilterSet::from_json(&json!({"conjunction": "AND", "filtersSet": []})).unwrap();
        assert_eq!(set.conjunction, Some(Conjunction::Other("AND".to_string())));
    }

    #[test]
    fn test_import_ignores_non_string_fields() {
        let filter = Filter::from_json(&json!({
            "operator": 7,
            "conjunction": "",
            "value": "x"
        }))
        .unwrap();

        assert_eq!(filter.operator, None);
        assert_eq!(filter.conjunction, None);
        assert_eq!(filter.value, FilterValue::from("x"));
    }

    #[test]
    fn test_parse_json() {
        let set = FilterSet::parse_json(r#"{"filtersSet": [{"operator": "eq", "value": 2}]}"#)
            .unwrap();
        assert_eq!(set.leaf_count(), 1);

        let err = FilterSet::parse_json(r#"{"filtersSet": {}}"#).unwrap_err();
        assert!(err.to_string().starts_with("ShapeError"));

        let err = FilterSet::parse_json("{").unwrap_err();
        assert!(err.to_string().starts_with("SerdeJsonError"));
    }
}
