//! Integration tests for filtersplit-core

use filtersplit_core::*;
use proptest::prelude::*;
use serde_json::{json, Value};

#[test]
fn test_import_full_document() {
    let doc = json!({
        "conjunction": "and",
        "filtersSet": [
            {"operator": "smart", "value": "near me"},
            {
                "conjunction": "or",
                "filtersSet": [
                    {"operator": "eq", "value": 2},
                    {"operator": "gt", "value": 3, "conjunction": "and"}
                ]
            },
            {
                "operator": "hasAnyOf",
                "value": ["cross-table", {"filtersSet": [{"operator": "smart", "value": 9}]}]
            }
        ]
    });

    let set = FilterSet::from_json(&doc).unwrap();

    assert_eq!(set.conjunction, Some(Conjunction::And));
    assert_eq!(set.len(), 3);
    assert_eq!(set.leaf_count(), 4);
    assert_eq!(set.depth(), 2);
    assert!(set.contains_filter(|f| f.has_operator("smart") && f.value == 9.into()));

    let explain = set.explain();
    assert!(explain.contains("FilterSet(or)"));
    assert!(explain.contains("Filter(op=gt, value=3, conjunction=and)"));
    assert!(explain.contains("Filter(op=hasAnyOf, value=cross-table(1 filters))"));
}

#[test]
fn test_from_value_conversion_lifts_cross_table() {
    let value: FilterValue = json!(["cross-table", {"filtersSet": []}]).into();
    assert_eq!(value.as_cross_table(), Some(&FilterSet::default()));

    let value: FilterValue = json!(["cross-table", "x"]).into();
    assert_eq!(value, FilterValue::Scalar(json!(["cross-table", "x"])));
}

#[test]
fn test_builders_match_import() {
    let built = FilterSet::new(vec![
        Filter::new("eq", 1).into(),
        Filter::without_operator("x").with_conjunction("or").into(),
    ])
    .with_conjunction("and");

    let imported = FilterSet::from_json(&json!({
        "conjunction": "and",
        "filtersSet": [
            {"operator": "eq", "value": 1},
            {"value": "x", "conjunction": "or"}
        ]
    }))
    .unwrap();

    assert_eq!(built, imported);
}

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        prop_oneof![
            Just("cross-table"),
            Just("filtersSet"),
            Just("smart"),
            Just("and"),
        ]
        .prop_map(Value::from),
    ];
    leaf.prop_recursive(4, 48, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::vec(
                (
                    prop_oneof![
                        Just("filtersSet".to_string()),
                        Just("operator".to_string()),
                        Just("value".to_string()),
                        Just("conjunction".to_string()),
                    ],
                    inner,
                ),
                0..4,
            )
            .prop_map(|entries| Value::Object(entries.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn prop_import_never_panics(doc in arb_json()) {
        let _ = FilterSet::from_json(&doc);
        let _ = FilterValue::from_json(&doc);
        let _ = Filter::from_json(&doc);
    }

    #[test]
    fn prop_parse_json_agrees_with_from_json(doc in arb_json()) {
        let text = doc.to_string();
        let parsed = FilterSet::parse_json(&text).ok();
        prop_assert_eq!(parsed, FilterSet::from_json(&doc));
    }

    #[test]
    fn prop_import_keeps_only_well_formed_entries(doc in arb_json()) {
        if let Some(set) = FilterSet::from_json(&doc) {
            let well_formed = doc["filtersSet"]
                .as_array()
                .map(|entries| {
                    entries
                        .iter()
                        .filter(|e| e.is_object())
                        .filter(|e| e.get("filtersSet").map_or(true, Value::is_array))
                        .count()
                })
                .unwrap_or(0);
            prop_assert_eq!(set.len(), well_formed);
        }
    }

    #[test]
    fn prop_lifted_cross_table_is_exact(doc in arb_json()) {
        if let FilterValue::CrossTable(embedded) = FilterValue::from_json(&doc) {
            let items = doc.as_array().unwrap();
            prop_assert_eq!(items.len(), 2);
            let entries = items[1]["filtersSet"].as_array().unwrap();
            prop_assert_eq!(embedded.len(), entries.len());
        }
    }
}
