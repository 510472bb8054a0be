//! Geometric constructions used by the mesh builders.
//!
//! All computations run in `f64`; integer sites are widened first. Integer
//! inputs whose products fit in 53 bits give exact signs and exact zeros.
//! [`incircle`] stays in integers and is exact for any input it can
//! represent.

mod barycentric;
mod construct;
mod incircle;

pub use barycentric::barycentric;
pub use construct::{circumcenter, distance, unit_normal};
pub use incircle::incircle;
