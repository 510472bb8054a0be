//! dualmesh - Delaunay triangulation and Voronoi diagrams on a half-edge mesh
//!
//! Integer sites are triangulated by incremental insertion with Lawson flips,
//! and the triangulation is turned into its dual Voronoi diagram clipped to a
//! rectangle. Both structures are doubly-connected edge lists with stable
//! integer ids.
//!
//! Floating-point comparisons go through an explicit tolerance; see
//! [`tolerance`].
//!
//! # Example
//!
//! ```
//! use dualmesh::{triangulate, voronoi, Site};
//!
//! let sites = vec![
//!     Site::new(1, 0, 0),
//!     Site::new(2, 8, 0),
//!     Site::new(3, 8, 6),
//!     Site::new(4, 0, 6),
//!     Site::new(5, 3, 2),
//! ];
//!
//! let tri = triangulate(&sites).unwrap();
//! assert!(tri.find_empty_circle_violation(1e-9).unwrap().is_none());
//!
//! let diagram = voronoi(&tri).unwrap();
//! assert_eq!(diagram.num_faces(), sites.len());
//! ```

pub mod dcel;
pub mod error;
pub mod io;
pub mod kernel;
pub mod primitives;
pub mod tolerance;
pub mod triangulation;

pub use error::{MeshError, TextFormatError};
pub use primitives::{Point2, Ray2, Vec2};
pub use tolerance::{compare_equal, orient2d, Orientation, EPSILON};
pub use triangulation::{
    triangulate, voronoi, DelaunayBuilder, DiagramConfig, Site, Triangulation, TriangulationConfig,
    VoronoiBuilder, VoronoiDiagram,
};
