//! 2D point type with the sweep ordering used by the mesh builders.

use super::Vec2;
use num_traits::{AsPrimitive, Float};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Sub};

/// Scalar types a mesh vertex can be positioned with.
///
/// Delaunay sites use `i64`, Voronoi vertices use `f64`. Every coordinate type
/// must widen losslessly enough to `f64` for the geometric kernel.
pub trait Coordinate: Copy + PartialOrd + fmt::Debug + AsPrimitive<f64> {}

impl<T> Coordinate for T where T: Copy + PartialOrd + fmt::Debug + AsPrimitive<f64> {}

/// A point in the plane.
///
/// Equality compares coordinates only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point2<T> {
    pub x: T,
    pub y: T,
}

impl<T> Point2<T> {
    /// Creates a new point.
    #[inline]
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl<T: PartialOrd> Point2<T> {
    /// Compares two points in sweep order.
    ///
    /// A point is *greater* when it lies higher (larger `y`); on equal `y` the
    /// point further left (smaller `x`) is greater. Sorting descending in this
    /// order is a top-to-bottom, left-to-right sweep.
    ///
    /// ```
    /// use dualmesh::Point2;
    /// use std::cmp::Ordering;
    ///
    /// let high = Point2::new(5, 10);
    /// let low = Point2::new(0, 3);
    /// assert_eq!(high.sweep_cmp(&low), Ordering::Greater);
    ///
    /// // Same height: the left one wins.
    /// let left = Point2::new(-1, 3);
    /// assert_eq!(left.sweep_cmp(&low), Ordering::Greater);
    /// ```
    pub fn sweep_cmp(&self, other: &Self) -> Ordering {
        match self.y.partial_cmp(&other.y) {
            Some(Ordering::Equal) | None => other.x.partial_cmp(&self.x).unwrap_or(Ordering::Equal),
            Some(ord) => ord,
        }
    }
}

impl<T: AsPrimitive<f64>> Point2<T> {
    /// Widens the coordinates to `f64`.
    #[inline]
    pub fn to_f64(self) -> Point2<f64> {
        Point2::new(self.x.as_(), self.y.as_())
    }
}

impl<F: Float> Point2<F> {
    /// Squared Euclidean distance to another point.
    #[inline]
    pub fn distance_squared(self, other: Self) -> F {
        (other - self).magnitude_squared()
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(self, other: Self) -> F {
        self.distance_squared(other).sqrt()
    }

    /// Midpoint of the segment between `self` and `other`.
    #[inline]
    pub fn midpoint(self, other: Self) -> Self {
        let two = F::one() + F::one();
        Self::new((self.x + other.x) / two, (self.y + other.y) / two)
    }
}

impl<F: Float> Sub for Point2<F> {
    type Output = Vec2<F>;

    #[inline]
    fn sub(self, other: Self) -> Vec2<F> {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

impl<F: Float> Add<Vec2<F>> for Point2<F> {
    type Output = Self;

    #[inline]
    fn add(self, offset: Vec2<F>) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y)
    }
}

impl<T: fmt::Display> fmt::Display for Point2<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sweep_order_prefers_higher_y() {
        let a = Point2::new(100, 2);
        let b = Point2::new(-100, 1);
        assert_eq!(a.sweep_cmp(&b), Ordering::Greater);
        assert_eq!(b.sweep_cmp(&a), Ordering::Less);
    }

    #[test]
    fn test_sweep_order_breaks_ties_to_the_left() {
        let a = Point2::new(1, 4);
        let b = Point2::new(2, 4);
        assert_eq!(a.sweep_cmp(&b), Ordering::Greater);
        assert_eq!(b.sweep_cmp(&a), Ordering::Less);
    }

    #[test]
    fn test_sweep_order_is_total_on_distinct_points() {
        let pts = [
            Point2::new(0, 0),
            Point2::new(1, 0),
            Point2::new(0, 1),
            Point2::new(-1, 1),
            Point2::new(3, -2),
        ];
        for a in &pts {
            for b in &pts {
                let ab = a.sweep_cmp(b);
                assert_eq!(ab, b.sweep_cmp(a).reverse());
                assert_eq!(ab == Ordering::Equal, a == b);
            }
        }
    }

    #[test]
    fn test_sweep_order_on_floats() {
        let a = Point2::new(0.5_f64, 1.0);
        let b = Point2::new(0.25_f64, 1.0);
        assert_eq!(b.sweep_cmp(&a), Ordering::Greater);
    }

    #[test]
    fn test_distance_and_midpoint() {
        let a = Point2::new(0.0_f64, 0.0);
        let b = Point2::new(3.0, 4.0);
        assert_relative_eq!(a.distance(b), 5.0);
        let m = a.midpoint(b);
        assert_relative_eq!(m.x, 1.5);
        assert_relative_eq!(m.y, 2.0);
    }

    #[test]
    fn test_to_f64() {
        let p = Point2::new(-7_i64, 12).to_f64();
        assert_eq!(p, Point2::new(-7.0, 12.0));
    }

    #[test]
    fn test_point_vector_arithmetic() {
        let p = Point2::new(1.0_f64, 2.0);
        let q = p + Vec2::new(2.0, -1.0);
        assert_eq!(q, Point2::new(3.0, 1.0));
        let v = q - p;
        assert_eq!(v, Vec2::new(2.0, -1.0));
    }
}
