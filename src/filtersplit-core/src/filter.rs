//! Leaf filters.

use crate::{Conjunction, FilterValue};

/// A single leaf criterion.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Filter {
    /// Operator name, e.g. `eq`, `smart`, `hasAnyOf`.
    pub operator: Option<String>,
    /// Operand payload.
    pub value: FilterValue,
    /// Combinator relative to siblings. Inherited from the parent when absent.
    pub conjunction: Option<Conjunction>,
}

impl Filter {
    /// Create a filter with an operator and a value.
    pub fn new(operator: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self {
            operator: Some(operator.into()),
            value: value.into(),
            conjunction: None,
        }
    }

    /// Create a filter that carries only a value.
    pub fn without_operator(value: impl Into<FilterValue>) -> Self {
        Self {
            operator: None,
            value: value.into(),
            conjunction: None,
        }
    }

    /// Set the conjunction.
    pub fn with_conjunction(mut self, conjunction: impl Into<Conjunction>) -> Self {
        self.conjunction = Some(conjunction.into());
        self
    }

    /// Copy this filter with its value replaced.
    pub fn with_value(&self, value: impl Into<FilterValue>) -> Self {
        Self {
            operator: self.operator.clone(),
            value: value.into(),
            conjunction: self.conjunction.clone(),
        }
    }

    /// The operator name, if any.
    pub fn operator(&self) -> Option<&str> {
        self.operator.as_deref()
    }

    /// Whether the operator equals `name`.
    pub fn has_operator(&self, name: &str) -> bool {
        self.operator() == Some(name)
    }

    pub(crate) fn explain_self(&self) -> String {
        let operator = self.operator().unwrap_or("<none>");
        match &self.conjunction {
            Some(conjunction) => format!(
                "Filter(op={}, value={}, conjunction={})",
                operator, self.value, conjunction
            ),
            None => format!("Filter(op={}, value={})", operator, self.value),
        }
    }
}
