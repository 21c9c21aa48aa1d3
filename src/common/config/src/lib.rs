//! Configuration for filtersplit traversal.
//!
//! Mirrors the `{ crossFilters, subFilters }` option bag accepted by
//! callers, with the same defaults.

use common_error::SplitResult;
use serde::{Deserialize, Serialize};

/// Traversal flags for the partitioner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TraverseFlags {
    /// Accepted for interface compatibility. Cross-table payloads are
    /// always recursed into regardless of this flag.
    pub cross_filters: bool,
    /// Recurse into nested filter sets. When disabled, nested sets are
    /// handed to the classifier as opaque items.
    pub sub_filters: bool,
}

impl Default for TraverseFlags {
    fn default() -> Self {
        Self {
            cross_filters: false,
            sub_filters: true,
        }
    }
}

impl TraverseFlags {
    /// Set the `cross_filters` flag.
    pub fn with_cross_filters(mut self, enable: bool) -> Self {
        self.cross_filters = enable;
        self
    }

    /// Set the `sub_filters` flag.
    pub fn with_sub_filters(mut self, enable: bool) -> Self {
        self.sub_filters = enable;
        self
    }

    /// Load flags from a JSON object. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> SplitResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
