//! # Curry Analysis
//!
//! Finds repeated calls to the same function that pin one or more
//! identical arguments and rewrites the declaration into a chain of
//! single-parameter functions with two-stage call sites.

pub mod finder;
pub mod transform;

pub use finder::{CurryGroup, find_curry_groups};
pub use transform::{FunctionSignature, apply_curry_fix, find_function};
