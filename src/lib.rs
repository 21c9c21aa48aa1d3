//! filtersplit - partition hierarchical filter trees by evaluation strategy.
//!
//! A filter tree is split into disjoint sub-trees, one per classification
//! key, preserving nesting, sibling order and conjunctions. Cross-table
//! filters, whose value embeds a whole secondary tree, are re-partitioned
//! recursively.

#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

// Re-export workspace crates
pub use common_config as config;
pub use common_error as error;
pub use filtersplit_core as core;
pub use filtersplit_partition as partition;

pub use common_config::TraverseFlags;
pub use common_error::{SplitError, SplitResult};
pub use filtersplit_core::{Conjunction, Filter, FilterNode, FilterSet, FilterValue};
pub use filtersplit_partition::{
    smart_default_indexer, split_filters, split_filters_default, split_filters_json, Classifier,
    PartitionMap, Partitioner, SmartDefaultClassifier,
};

/// filtersplit version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
