//! Classification rules that route filters to partitions.

use filtersplit_core::{Filter, FilterSet};

/// Partition key for smart-evaluated filters.
pub const SMART_KEY: &str = "smart";
/// Partition key for every other filter.
pub const DEFAULT_KEY: &str = "default";

/// Operator of filters evaluated by the smart evaluator.
pub const SMART_OPERATOR: &str = "smart";
/// Operator of cross-table filters.
pub const HAS_ANY_OF_OPERATOR: &str = "hasAnyOf";

/// Assigns a partition key to a filter.
///
/// Returning `None` excludes the filter from every partition. Implementations
/// must be total; a panic propagates to the caller of the partitioner.
///
/// Any `Fn(&Filter) -> Option<String>` closure is a classifier.
pub trait Classifier {
    /// Classify a leaf filter.
    fn classify(&self, filter: &Filter) -> Option<String>;

    /// Classify a nested set handed over as an opaque item, which only
    /// happens when sub-filter traversal is disabled. Excludes by default.
    fn classify_set(&self, _set: &FilterSet) -> Option<String> {
        None
    }
}

impl<F> Classifier for F
where
    F: Fn(&Filter) -> Option<String>,
{
    fn classify(&self, filter: &Filter) -> Option<String> {
        self(filter)
    }
}

/// Splits filters into [`SMART_KEY`] and [`DEFAULT_KEY`].
///
/// See [`smart_default_indexer`] for the rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct SmartDefaultClassifier;

impl Classifier for SmartDefaultClassifier {
    fn classify(&self, filter: &Filter) -> Option<String> {
        smart_default_indexer(filter).map(str::to_string)
    }
}

/// The default classification rule.
///
/// 1. No operator: excluded.
/// 2. `smart`: excluded when the value is tagged `"cross-table"`, otherwise
///    [`SMART_KEY`].
/// 3. `hasAnyOf` over a sequence whose second element is a filter set with a
///    `smart` entry at its top level: [`SMART_KEY`].
/// 4. Anything else: [`DEFAULT_KEY`].
///
/// Only the given filter is inspected. Recursive cross-table handling lives
/// in the partitioner.
pub fn smart_default_indexer(filter: &Filter) -> Option<&'static str> {
    let operator = filter.operator().filter(|op| !op.is_empty())?;

    if operator == SMART_OPERATOR {
        if filter.value.is_cross_table_tagged() {
            return None;
        }
        return Some(SMART_KEY);
    }

    if operator == HAS_ANY_OF_OPERATOR
        && filter.value.sequence_len().is_some_and(|len| len > 1)
        && filter.value.embeds_operator(SMART_OPERATOR)
    {
        return Some(SMART_KEY);
    }

    Some(DEFAULT_KEY)
}
