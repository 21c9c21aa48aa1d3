//! Filter tree data model for filtersplit.
//!
//! A filter tree is a [`FilterSet`]: an ordered list of [`FilterNode`]s,
//! each either a leaf [`Filter`] or a nested set, joined by a
//! [`Conjunction`]. A leaf whose value is a [`FilterValue::CrossTable`]
//! embeds a whole secondary tree evaluated against another data scope.
//!
//! # Example
//!
//! ```rust
//! use filtersplit_core::{Filter, FilterSet};
//!
//! let tree = FilterSet::new(vec![
//!     Filter::new("smart", 1).into(),
//!     FilterSet::new(vec![Filter::new("eq", 2).into()])
//!         .with_conjunction("or")
//!         .into(),
//! ]);
//!
//! assert_eq!(tree.leaf_count(), 2);
//! println!("{}", tree.explain());
//! ```
//!
//! All values are plain owned data. Transformations build new nodes through
//! copy-with-override helpers ([`Filter::with_value`],
//! [`FilterSet::with_filters`]) and never mutate their input.

mod conjunction;
mod filter;
mod json;
mod node;
mod value;

pub use conjunction::Conjunction;
pub use filter::Filter;
pub use node::{FilterNode, FilterSet};
pub use value::{FilterValue, CROSS_TABLE_TAG};
