//! Delaunay triangulation of integer sites and its Voronoi dual.
//!
//! [`DelaunayBuilder`] inserts sites one at a time into a bounding triangle,
//! legalizes with edge flips, then strips the bounding vertices. The
//! resulting [`Triangulation`] feeds [`VoronoiBuilder`], which turns it into
//! a [`VoronoiDiagram`] clipped to a rectangular [`Frame`].

mod delaunay;
mod voronoi;

pub use delaunay::{triangulate, DelaunayBuilder, Site, Stage, Triangle, Triangulation, TriangulationConfig};
pub use voronoi::{voronoi, DiagramConfig, Frame, VoronoiBuilder, VoronoiDiagram};
