//! Coordinate pairs, vectors and rays.

mod point2;
mod ray2;
mod vec2;

pub use point2::{Coordinate, Point2};
pub use ray2::Ray2;
pub use vec2::Vec2;
