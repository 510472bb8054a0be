//! Geometric predicates with explicit tolerance.

use crate::primitives::Point2;
use num_traits::Float;

/// Relative tolerance used for boundary clipping and circumcenter
/// deduplication.
pub const EPSILON: f64 = 1e-4;

/// Symmetric relative equality with the default [`EPSILON`].
///
/// `|a - b| <= max(|a|, |b|) * EPSILON`. Comparing against exactly zero only
/// succeeds for an exact zero.
///
/// ```
/// use dualmesh::tolerance::compare_equal;
///
/// assert!(compare_equal(1000.0, 1000.05));
/// assert!(!compare_equal(1.0, 1.01));
/// assert!(compare_equal(0.0, 0.0));
/// ```
#[inline]
pub fn compare_equal(a: f64, b: f64) -> bool {
    compare_equal_eps(a, b, EPSILON)
}

/// Symmetric relative equality with an explicit tolerance.
#[inline]
pub fn compare_equal_eps<F: Float>(a: F, b: F, eps: F) -> bool {
    (a - b).abs() <= a.abs().max(b.abs()) * eps
}

/// Result of an orientation test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Points are counter-clockwise (positive area).
    CounterClockwise,
    /// Points are clockwise (negative area).
    Clockwise,
    /// Points are collinear (within tolerance).
    Collinear,
}

/// Computes the orientation of three points with tolerance.
///
/// Returns the orientation of the triangle formed by points `a`, `b`, `c`:
/// - `CounterClockwise` if `c` is to the left of the line from `a` to `b`
/// - `Clockwise` if `c` is to the right of the line from `a` to `b`
/// - `Collinear` if `c` is on the line (within `eps` tolerance)
///
/// `eps` is compared against the absolute value of the cross product (twice
/// the signed area). For integer coordinates widened to `f64` an `eps` of zero
/// gives an exact answer as long as the products stay below 2^53.
#[inline]
pub fn orient2d<F: Float>(a: Point2<F>, b: Point2<F>, c: Point2<F>, eps: F) -> Orientation {
    let cross = (b - a).cross(c - a);

    if cross > eps {
        Orientation::CounterClockwise
    } else if cross < -eps {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_equal_is_relative() {
        assert!(compare_equal(1e6, 1e6 + 50.0));
        assert!(!compare_equal(1e6, 1e6 + 500.0));
        assert!(compare_equal(-3.0, -3.0002));
        assert!(!compare_equal(-3.0, 3.0));
    }

    #[test]
    fn test_compare_equal_is_symmetric() {
        let pairs = [(1.0, 1.00009), (5.0, 4.9), (0.0, 1e-30), (-2.0, -2.0001)];
        for (a, b) in pairs {
            assert_eq!(compare_equal(a, b), compare_equal(b, a));
        }
    }

    #[test]
    fn test_compare_equal_zero_is_exact() {
        assert!(compare_equal(0.0, 0.0));
        assert!(!compare_equal(0.0, 1e-300));
    }

    #[test]
    fn test_compare_equal_eps() {
        assert!(compare_equal_eps(100.0_f64, 100.5, 1e-2));
        assert!(!compare_equal_eps(100.0_f64, 100.5, 1e-3));
    }

    #[test]
    fn test_orient2d_ccw() {
        let a = Point2::new(0.0_f64, 0.0);
        let b = Point2::new(1.0, 0.0);
        let c = Point2::new(0.0, 1.0);
        assert_eq!(orient2d(a, b, c, 0.0), Orientation::CounterClockwise);
        assert_eq!(orient2d(a, c, b, 0.0), Orientation::Clockwise);
    }

    #[test]
    fn test_orient2d_collinear() {
        let a = Point2::new(0.0_f64, 0.0);
        let b = Point2::new(1.0, 1.0);
        let c = Point2::new(3.0, 3.0);
        assert_eq!(orient2d(a, b, c, 0.0), Orientation::Collinear);
    }

    #[test]
    fn test_orient2d_with_tolerance() {
        let a = Point2::new(0.0_f64, 0.0);
        let b = Point2::new(10.0, 0.0);
        let c = Point2::new(5.0, 0.001);
        assert_eq!(orient2d(a, b, c, 0.1), Orientation::Collinear);
        assert_eq!(orient2d(a, b, c, 0.0), Orientation::CounterClockwise);
    }
}
