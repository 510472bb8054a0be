//! 2D ray type.

use super::{Point2, Vec2};
use num_traits::Float;

/// A 2D ray defined by an origin point and direction.
///
/// The direction is stored as-is (not necessarily normalized).
///
/// # Example
///
/// ```
/// use dualmesh::primitives::{Point2, Ray2, Vec2};
///
/// let ray: Ray2<f64> = Ray2::new(Point2::new(1.0, 1.0), Vec2::new(2.0, 0.0));
/// let t = ray.parameter_at_x(5.0).unwrap();
/// assert_eq!(ray.point_at(t), Point2::new(5.0, 1.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray2<F> {
    /// Origin point of the ray
    pub origin: Point2<F>,
    /// Direction vector (not necessarily normalized)
    pub direction: Vec2<F>,
}

impl<F: Float> Ray2<F> {
    /// Creates a new ray from origin and direction.
    #[inline]
    pub fn new(origin: Point2<F>, direction: Vec2<F>) -> Self {
        Self { origin, direction }
    }

    /// Returns the point along the ray at parameter t.
    ///
    /// Negative `t` gives points behind the origin, which is how a ray doubles
    /// as a full line.
    #[inline]
    pub fn point_at(&self, t: F) -> Point2<F> {
        Point2::new(
            self.origin.x + t * self.direction.x,
            self.origin.y + t * self.direction.y,
        )
    }

    /// Parameter at which the supporting line crosses the vertical line `x`.
    ///
    /// `None` when the direction has no horizontal component.
    #[inline]
    pub fn parameter_at_x(&self, x: F) -> Option<F> {
        if self.direction.x == F::zero() {
            None
        } else {
            Some((x - self.origin.x) / self.direction.x)
        }
    }

    /// Parameter at which the supporting line crosses the horizontal line `y`.
    #[inline]
    pub fn parameter_at_y(&self, y: F) -> Option<F> {
        if self.direction.y == F::zero() {
            None
        } else {
            Some((y - self.origin.y) / self.direction.y)
        }
    }
}
