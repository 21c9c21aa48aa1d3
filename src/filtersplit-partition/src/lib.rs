//! Filter tree partitioning for filtersplit.
//!
//! Splits a [`FilterSet`](filtersplit_core::FilterSet) into one sub-tree per
//! classification key while keeping nesting, sibling order and conjunctions.
//! The usual split separates filters for the smart evaluator from the rest:
//!
//! ```rust
//! use filtersplit_core::{Filter, FilterSet};
//! use filtersplit_partition::split_filters_default;
//!
//! let tree = FilterSet::new(vec![
//!     Filter::new("smart", 1).into(),
//!     Filter::new("eq", 2).into(),
//! ]);
//!
//! let parts = split_filters_default(Some(&tree));
//! assert_eq!(parts.keys().collect::<Vec<_>>(), vec!["smart", "default"]);
//! ```
//!
//! Custom rules implement [`Classifier`], or are plain closures:
//!
//! ```rust
//! use common_config::TraverseFlags;
//! use filtersplit_core::{Filter, FilterSet};
//! use filtersplit_partition::split_filters;
//!
//! let tree = FilterSet::new(vec![Filter::new("eq", 2).into()]);
//! let by_operator = |f: &Filter| f.operator().map(str::to_string);
//!
//! let parts = split_filters(Some(&tree), &by_operator, TraverseFlags::default());
//! assert!(parts.contains_key("eq"));
//! ```

mod classifier;
mod partition_map;
mod partitioner;

pub use classifier::{
    smart_default_indexer, Classifier, SmartDefaultClassifier, DEFAULT_KEY, HAS_ANY_OF_OPERATOR,
    SMART_KEY, SMART_OPERATOR,
};
pub use partition_map::PartitionMap;
pub use partitioner::{split_filters, split_filters_default, split_filters_json, Partitioner};
