//! Line-oriented text input and output.
//!
//! Reads site lists and writes triangulations and diagrams with identities
//! assigned deterministically at write time.

mod text;

pub use text::{read_sites, write_diagram, write_triangulation};
