//! Tree rewriting: canonical forms, predicate shrinking, and variant
//! generation.
//!
//! [`canonical`] holds the registry-driven passes (commutative ordering,
//! associative flattening, adjacent deduplication). [`shrink`] holds the
//! predicate-aware rules and the [`special_optimize`] fixed-point driver.
//! [`generate`] enumerates single-step mutations of a tree, lazily.

pub mod canonical;
pub mod generate;
pub mod shrink;

pub use canonical::{canonicalize, optimize, sort, sort_key};
pub use generate::{generate, Variants};
pub use shrink::{shrink_all, shrink_andor, shrink_eq, special_optimize};
