//! Circumcenters, distances and edge normals.

use crate::error::MeshError;
use crate::primitives::{Point2, Vec2};

/// Computes the circumcenter of a triangle.
///
/// The circumcenter is equidistant from all three vertices. Collinear points
/// have no circumcenter and yield [`MeshError::DegenerateCircumcenter`]
/// instead of an infinite or NaN point.
///
/// # Example
///
/// ```
/// use dualmesh::kernel::circumcenter;
/// use dualmesh::Point2;
///
/// // Right triangle: the circumcenter is the midpoint of the hypotenuse.
/// let c = circumcenter(
///     Point2::new(0.0, 0.0),
///     Point2::new(2.0, 0.0),
///     Point2::new(0.0, 2.0),
/// )
/// .unwrap();
/// assert_eq!(c, Point2::new(1.0, 1.0));
///
/// let flat = circumcenter(
///     Point2::new(0.0, 0.0),
///     Point2::new(1.0, 0.0),
///     Point2::new(2.0, 0.0),
/// );
/// assert!(flat.is_err());
/// ```
pub fn circumcenter(a: Point2<f64>, b: Point2<f64>, c: Point2<f64>) -> Result<Point2<f64>, MeshError> {
    // Relative to `a`, so the squared lengths stay small far from the origin.
    let (bx, by) = (b.x - a.x, b.y - a.y);
    let (cx, cy) = (c.x - a.x, c.y - a.y);

    let d = 2.0 * (bx * cy - by * cx);
    if d == 0.0 {
        return Err(MeshError::DegenerateCircumcenter(a, b, c));
    }

    let b2 = bx * bx + by * by;
    let c2 = cx * cx + cy * cy;

    let ux = (cy * b2 - by * c2) / d;
    let uy = (bx * c2 - cx * b2) / d;

    if !ux.is_finite() || !uy.is_finite() {
        return Err(MeshError::DegenerateCircumcenter(a, b, c));
    }
    Ok(Point2::new(a.x + ux, a.y + uy))
}

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: Point2<f64>, b: Point2<f64>) -> f64 {
    a.distance(b)
}

/// Unit normal on the right-hand side of the directed edge `from -> to`.
///
/// For a half-edge whose face lies on its left this is the outward normal.
/// Returns `None` for a zero-length edge.
#[inline]
pub fn unit_normal(from: Point2<f64>, to: Point2<f64>) -> Option<Vec2<f64>> {
    (to - from).right_perpendicular().normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_circumcenter_equilateral() {
        let sqrt3_2 = 3.0_f64.sqrt() / 2.0;
        let a = Point2::new(0.0_f64, 1.0);
        let b = Point2::new(-sqrt3_2, -0.5);
        let c = Point2::new(sqrt3_2, -0.5);

        let center = circumcenter(a, b, c).unwrap();
        assert_relative_eq!(center.x, 0.0, epsilon = 1e-10);
        assert_relative_eq!(center.y, 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_circumcenter_is_equidistant() {
        let a = Point2::new(0.0_f64, 0.0);
        let b = Point2::new(7.0, 1.0);
        let c = Point2::new(2.0, 5.0);

        let center = circumcenter(a, b, c).unwrap();
        let ra = distance(center, a);
        assert_relative_eq!(distance(center, b), ra, epsilon = 1e-10);
        assert_relative_eq!(distance(center, c), ra, epsilon = 1e-10);
    }

    #[test]
    fn test_circumcenter_is_orientation_independent() {
        let a = Point2::new(1.0_f64, 1.0);
        let b = Point2::new(4.0, 2.0);
        let c = Point2::new(2.0, 6.0);
        let (p, q) = (circumcenter(a, b, c).unwrap(), circumcenter(c, b, a).unwrap());
        assert_relative_eq!(p.x, q.x, epsilon = 1e-12);
        assert_relative_eq!(p.y, q.y, epsilon = 1e-12);
    }

    #[test]
    fn test_circumcenter_far_from_origin() {
        let o = 1.0e7_f64;
        let a = Point2::new(o, o);
        let b = Point2::new(o + 10.0, o + 1.0);
        let c = Point2::new(o + 5.0, o + 12.0);

        let center = circumcenter(a, b, c).unwrap();
        let local = circumcenter(Point2::new(0.0, 0.0), Point2::new(10.0, 1.0), Point2::new(5.0, 12.0)).unwrap();
        assert_relative_eq!(center.x - o, local.x, epsilon = 1e-8);
        assert_relative_eq!(center.y - o, local.y, epsilon = 1e-8);
    }

    #[test]
    fn test_circumcenter_collinear_is_error() {
        let a = Point2::new(0.0_f64, 0.0);
        let b = Point2::new(1.0, 1.0);
        let c = Point2::new(2.0, 2.0);
        assert_eq!(
            circumcenter(a, b, c),
            Err(MeshError::DegenerateCircumcenter(a, b, c))
        );
    }

    #[test]
    fn test_cocircular_triangles_share_center_exactly() {
        // Integer square: both diagonals' triangles must agree bit for bit.
        let p = [
            Point2::new(0.0_f64, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(4.0, 4.0),
            Point2::new(0.0, 4.0),
        ];
        let c1 = circumcenter(p[0], p[1], p[2]).unwrap();
        let c2 = circumcenter(p[0], p[2], p[3]).unwrap();
        assert_eq!(c1, c2);
        assert_eq!(c1, Point2::new(2.0, 2.0));
    }

    #[test]
    fn test_unit_normal_points_right() {
        let n = unit_normal(Point2::new(0.0, 0.0), Point2::new(3.0, 0.0)).unwrap();
        assert_relative_eq!(n.x, 0.0);
        assert_relative_eq!(n.y, -1.0);

        let n = unit_normal(Point2::new(0.0, 0.0), Point2::new(0.0, 2.0)).unwrap();
        assert_relative_eq!(n.x, 1.0);
        assert_relative_eq!(n.y, 0.0);
    }

    #[test]
    fn test_unit_normal_zero_length() {
        let p = Point2::new(1.0, 1.0);
        assert!(unit_normal(p, p).is_none());
    }
}
