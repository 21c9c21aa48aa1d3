//! Recursive filter tree partitioning.
//!
//! The walk visits the top-level entries of a filter set in order:
//!
//! - A nested set is partitioned recursively. If its filters resolve to one
//!   or two keys, a copy of the set holding only that key's filters is
//!   appended to each key's partition. Sets spanning zero or more than two
//!   keys are dropped, since only unary and binary splits keep the nesting
//!   representable.
//! - A `hasAnyOf` filter whose value embeds a filter tree has that tree
//!   partitioned recursively; the filter is re-emitted once per resulting
//!   `default`/`smart` branch with its value narrowed to that branch.
//! - Any other filter is routed by the classifier, or dropped when the
//!   classifier returns no key.
//!
//! New partitions take their conjunction from the first filter routed to
//! them, else from the set being walked, else `and`.

use std::borrow::Cow;

use common_config::TraverseFlags;
use filtersplit_core::{Conjunction, Filter, FilterNode, FilterSet};
use log::{debug, trace};
use serde_json::Value;

use crate::classifier::{
    Classifier, SmartDefaultClassifier, DEFAULT_KEY, HAS_ANY_OF_OPERATOR, SMART_KEY,
};
use crate::PartitionMap;

/// Keys re-attached from a cross-table filter's embedded tree, in order.
const CROSS_TABLE_KEYS: [&str; 2] = [DEFAULT_KEY, SMART_KEY];

/// A classifier bundled with traversal flags.
#[derive(Debug, Clone)]
pub struct Partitioner<C = SmartDefaultClassifier> {
    classifier: C,
    flags: TraverseFlags,
}

impl Partitioner<SmartDefaultClassifier> {
    /// Partitioner using [`SmartDefaultClassifier`] and default flags.
    pub fn smart_default() -> Self {
        Self::new(SmartDefaultClassifier)
    }
}

impl Default for Partitioner<SmartDefaultClassifier> {
    fn default() -> Self {
        Self::smart_default()
    }
}

impl<C: Classifier> Partitioner<C> {
    /// Create a partitioner with default flags.
    pub fn new(classifier: C) -> Self {
        Self {
            classifier,
            flags: TraverseFlags::default(),
        }
    }

    /// Create a partitioner with custom flags.
    pub fn with_flags(classifier: C, flags: TraverseFlags) -> Self {
        Self { classifier, flags }
    }

    /// The traversal flags.
    pub fn flags(&self) -> TraverseFlags {
        self.flags
    }

    /// The classifier.
    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Partition a filter tree. An absent tree yields an empty map.
    pub fn partition(&self, tree: Option<&FilterSet>) -> PartitionMap {
        split_filters(tree, &self.classifier, self.flags)
    }

    /// Partition a JSON filter tree. Documents that are not shaped like a
    /// filter set yield an empty map.
    pub fn partition_json(&self, doc: &Value) -> PartitionMap {
        split_filters_json(doc, &self.classifier, self.flags)
    }
}

/// Split `tree` into one filter set per key produced by `classifier`.
///
/// Only the `default` and `smart` branches of a cross-table filter's
/// embedded tree are carried over. A custom classifier producing other keys
/// loses those filters inside cross-table values.
///
/// `flags.cross_filters` has no effect: cross-table values are always
/// partitioned.
pub fn split_filters<C>(
    tree: Option<&FilterSet>,
    classifier: &C,
    flags: TraverseFlags,
) -> PartitionMap
where
    C: Classifier + ?Sized,
{
    match tree {
        Some(tree) => Walk { classifier, flags }.split(tree),
        None => PartitionMap::new(),
    }
}

/// Split with [`SmartDefaultClassifier`] and default flags.
pub fn split_filters_default(tree: Option<&FilterSet>) -> PartitionMap {
    split_filters(tree, &SmartDefaultClassifier, TraverseFlags::default())
}

/// Import `doc` leniently and split it. See [`FilterSet::from_json`].
pub fn split_filters_json<C>(doc: &Value, classifier: &C, flags: TraverseFlags) -> PartitionMap
where
    C: Classifier + ?Sized,
{
    split_filters(FilterSet::from_json(doc).as_ref(), classifier, flags)
}

struct Walk<'c, C: ?Sized> {
    classifier: &'c C,
    flags: TraverseFlags,
}

impl<C: Classifier + ?Sized> Walk<'_, C> {
    fn split(&self, tree: &FilterSet) -> PartitionMap {
        let mut out = Partitions {
            map: PartitionMap::new(),
            tree_conjunction: tree.conjunction.as_ref(),
        };

        for node in &tree.filters {
            match node {
                FilterNode::Set(child) if self.flags.sub_filters => {
                    self.split_nested(child, tree.conjunction.as_ref(), &mut out);
                }
                _ => self.classify_simple(node, tree.conjunction.as_ref(), &mut out),
            }
        }

        out.finish()
    }

    fn split_nested(
        &self,
        child: &FilterSet,
        outer: Option<&Conjunction>,
        out: &mut Partitions<'_>,
    ) {
        let nested = self.split(child);
        match nested.len() {
            1 | 2 => {
                for (key, part) in nested {
                    out.push(&key, outer, child.with_filters(part.filters).into());
                }
            }
            n => debug!(
                "Dropping nested filter set with {} entries: it spans {} keys",
                child.len(),
                n
            ),
        }
    }

    fn classify_simple(
        &self,
        node: &FilterNode,
        parent: Option<&Conjunction>,
        out: &mut Partitions<'_>,
    ) {
        let conjunction = node.conjunction().or(parent);

        let key = match node {
            FilterNode::Leaf(filter) => {
                if let Some(embedded) = cross_table_payload(filter) {
                    self.split_cross_table(filter, &embedded, conjunction, out);
                    return;
                }
                self.classifier.classify(filter)
            }
            FilterNode::Set(set) => self.classifier.classify_set(set),
        };

        match key {
            Some(key) => {
                trace!("Routing {:?} to partition '{}'", node.operator(), key);
                out.push(&key, conjunction, node.clone());
            }
            None => trace!("Excluding {:?}", node.operator()),
        }
    }

    fn split_cross_table(
        &self,
        filter: &Filter,
        embedded: &FilterSet,
        conjunction: Option<&Conjunction>,
        out: &mut Partitions<'_>,
    ) {
        let mut nested = self.split(embedded);

        for key in CROSS_TABLE_KEYS {
            if let Some(branch) = nested.remove(key) {
                out.push(key, conjunction, filter.with_value(branch).into());
            }
        }

        if !nested.is_empty() {
            debug!(
                "Cross-table filter dropped partitions {:?}: only '{}' and '{}' are propagated",
                nested.keys().collect::<Vec<_>>(),
                DEFAULT_KEY,
                SMART_KEY
            );
        }
    }
}

/// The embedded tree of a `hasAnyOf` cross-table filter, whether its value
/// was lifted to `CrossTable` or is still a raw tagged payload.
fn cross_table_payload(filter: &Filter) -> Option<Cow<'_, FilterSet>> {
    if filter.has_operator(HAS_ANY_OF_OPERATOR) {
        filter.value.embedded_set()
    } else {
        None
    }
}

/// Output partitions of the set currently being walked.
struct Partitions<'t> {
    map: PartitionMap,
    tree_conjunction: Option<&'t Conjunction>,
}

impl Partitions<'_> {
    fn push(&mut self, key: &str, supplied: Option<&Conjunction>, node: FilterNode) {
        let conjunction = supplied
            .or(self.tree_conjunction)
            .cloned()
            .unwrap_or_default();
        self.map.get_or_create(key, conjunction).filters.push(node);
    }

    fn finish(mut self) -> PartitionMap {
        self.map.remove_empty();
        self.map
    }
}
