//! Filter tree nodes.

use crate::{Conjunction, Filter};

/// An entry of a filter set: a leaf filter or a nested set.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterNode {
    /// Leaf criterion.
    Leaf(Filter),
    /// Nested group.
    Set(FilterSet),
}

impl FilterNode {
    /// The operator of a leaf. Sets have none.
    pub fn operator(&self) -> Option<&str> {
        match self {
            Self::Leaf(filter) => filter.operator(),
            Self::Set(_) => None,
        }
    }

    /// The conjunction explicitly set on this node.
    pub fn conjunction(&self) -> Option<&Conjunction> {
        match self {
            Self::Leaf(filter) => filter.conjunction.as_ref(),
            Self::Set(set) => set.conjunction.as_ref(),
        }
    }

    /// Get as a leaf filter.
    pub fn as_leaf(&self) -> Option<&Filter> {
        match self {
            Self::Leaf(filter) => Some(filter),
            Self::Set(_) => None,
        }
    }

    /// Get as a nested set.
    pub fn as_set(&self) -> Option<&FilterSet> {
        match self {
            Self::Set(set) => Some(set),
            Self::Leaf(_) => None,
        }
    }

    fn explain(&self, indent: usize) -> String {
        match self {
            Self::Set(set) => set.explain_indented(indent),
            Self::Leaf(filter) => {
                let prefix = "  ".repeat(indent);
                let mut result = format!("{}{}", prefix, filter.explain_self());
                if let Some(embedded) = filter.value.as_cross_table() {
                    result.push('\n');
                    result.push_str(&embedded.explain_indented(indent + 1));
                }
                result
            }
        }
    }
}

impl From<Filter> for FilterNode {
    fn from(filter: Filter) -> Self {
        Self::Leaf(filter)
    }
}

impl From<FilterSet> for FilterNode {
    fn from(set: FilterSet) -> Self {
        Self::Set(set)
    }
}

/// An ordered group of filters combined by a conjunction.
///
/// Order of `filters` is significant and is preserved by every
/// transformation in this workspace.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterSet {
    /// Child filters and nested sets.
    pub filters: Vec<FilterNode>,
    /// Default conjunction for children that omit their own.
    pub conjunction: Option<Conjunction>,
}

impl FilterSet {
    /// Create a set with no explicit conjunction.
    pub fn new(filters: Vec<FilterNode>) -> Self {
        Self {
            filters,
            conjunction: None,
        }
    }

    /// Create an empty set with the given conjunction.
    pub fn empty(conjunction: Conjunction) -> Self {
        Self {
            filters: Vec::new(),
            conjunction: Some(conjunction),
        }
    }

    /// Set the conjunction.
    pub fn with_conjunction(mut self, conjunction: impl Into<Conjunction>) -> Self {
        self.conjunction = Some(conjunction.into());
        self
    }

    /// Append a child.
    pub fn with_filter(mut self, node: impl Into<FilterNode>) -> Self {
        self.filters.push(node.into());
        self
    }

    /// Copy this set with its children replaced.
    pub fn with_filters(&self, filters: Vec<FilterNode>) -> Self {
        Self {
            filters,
            conjunction: self.conjunction.clone(),
        }
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Whether the set has no children.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// All leaf filters in depth-first order.
    ///
    /// Cross-table payloads are not descended into.
    pub fn leaves(&self) -> Vec<&Filter> {
        fn collect<'a>(set: &'a FilterSet, out: &mut Vec<&'a Filter>) {
            for node in &set.filters {
                match node {
                    FilterNode::Leaf(filter) => out.push(filter),
                    FilterNode::Set(nested) => collect(nested, out),
                }
            }
        }
        let mut out = Vec::new();
        collect(self, &mut out);
        out
    }

    /// Count the leaf filters of this tree.
    pub fn leaf_count(&self) -> usize {
        self.filters
            .iter()
            .map(|node| match node {
                FilterNode::Leaf(_) => 1,
                FilterNode::Set(nested) => nested.leaf_count(),
            })
            .sum()
    }

    /// Nesting depth. A flat set has depth 1.
    pub fn depth(&self) -> usize {
        1 + self
            .filters
            .iter()
            .filter_map(FilterNode::as_set)
            .map(FilterSet::depth)
            .max()
            .unwrap_or(0)
    }

    /// Check if any leaf satisfies `predicate`, including leaves inside
    /// cross-table payloads.
    pub fn contains_filter<F>(&self, predicate: F) -> bool
    where
        F: Fn(&Filter) -> bool,
    {
        fn check<F>(set: &FilterSet, predicate: &F) -> bool
        where
            F: Fn(&Filter) -> bool,
        {
            set.filters.iter().any(|node| match node {
                FilterNode::Leaf(filter) => {
                    predicate(filter)
                        || filter
                            .value
                            .as_cross_table()
                            .is_some_and(|embedded| check(embedded, predicate))
                }
                FilterNode::Set(nested) => check(nested, predicate),
            })
        }
        check(self, &predicate)
    }

    /// Generate a tree-formatted explanation of the set.
    pub fn explain(&self) -> String {
        self.explain_indented(0)
    }

    /// Tree-formatted explanation starting at the given indent level.
    pub fn explain_indented(&self, indent: usize) -> String {
        let prefix = "  ".repeat(indent);
        let mut result = match &self.conjunction {
            Some(conjunction) => format!("{}FilterSet({})", prefix, conjunction),
            None => format!("{}FilterSet", prefix),
        };
        for node in &self.filters {
            result.push('\n');
            result.push_str(&node.explain(indent + 1));
        }
        result
    }
}
