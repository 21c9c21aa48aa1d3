//! Error types and result aliases for filtersplit.
//!
//! Partitioning itself never fails; these errors surface only at the
//! fallible edges (JSON import, configuration loading).

mod error;

pub use error::{SplitError, SplitResult};
