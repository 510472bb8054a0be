//! Epsilon-aware comparisons and predicates.
//!
//! Every floating-point equality in boundary clipping and circumcenter
//! deduplication goes through [`compare_equal`], never raw `==`.

mod predicates;

pub use predicates::{compare_equal, compare_equal_eps, orient2d, Orientation, EPSILON};
