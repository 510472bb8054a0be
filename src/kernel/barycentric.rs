//! Barycentric coordinates of a point with respect to a triangle.

use crate::primitives::Point2;

/// Barycentric coordinates `[l1, l2, l3]` of `q` relative to `(p1, p2, p3)`.
///
/// The coordinates sum to one and `q = l1*p1 + l2*p2 + l3*p3`. A point is
/// strictly inside the triangle iff all three are positive; a zero marks the
/// opposite edge. The third numerator is derived from the other two so that
/// integer inputs produce exact zeros.
///
/// Returns `None` for a degenerate (zero area) triangle.
///
/// ```
/// use dualmesh::kernel::barycentric;
/// use dualmesh::Point2;
///
/// let l = barycentric(
///     Point2::new(1.0, 1.0),
///     Point2::new(0.0, 0.0),
///     Point2::new(4.0, 0.0),
///     Point2::new(0.0, 4.0),
/// )
/// .unwrap();
/// assert_eq!(l, [0.5, 0.25, 0.25]);
/// ```
pub fn barycentric(q: Point2<f64>, p1: Point2<f64>, p2: Point2<f64>, p3: Point2<f64>) -> Option<[f64; 3]> {
    let det = (p2.y - p3.y) * (p1.x - p3.x) + (p3.x - p2.x) * (p1.y - p3.y);
    if det == 0.0 {
        return None;
    }

    let n1 = (p2.y - p3.y) * (q.x - p3.x) + (p3.x - p2.x) * (q.y - p3.y);
    let n2 = (p3.y - p1.y) * (q.x - p3.x) + (p1.x - p3.x) * (q.y - p3.y);
    let n3 = det - n1 - n2;

    Some([n1 / det, n2 / det, n3 / det])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn tri() -> [Point2<f64>; 3] {
        [
            Point2::new(0.0, 0.0),
            Point2::new(6.0, 0.0),
            Point2::new(0.0, 6.0),
        ]
    }

    #[test]
    fn test_vertices_are_unit_coordinates() {
        let [a, b, c] = tri();
        assert_eq!(barycentric(a, a, b, c), Some([1.0, 0.0, 0.0]));
        assert_eq!(barycentric(b, a, b, c), Some([0.0, 1.0, 0.0]));
        assert_eq!(barycentric(c, a, b, c), Some([0.0, 0.0, 1.0]));
    }

    #[test]
    fn test_interior_point_positive() {
        let [a, b, c] = tri();
        let l = barycentric(Point2::new(1.0, 2.0), a, b, c).unwrap();
        assert!(l.iter().all(|&v| v > 0.0));
        assert_relative_eq!(l[0] + l[1] + l[2], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_point_on_edge_has_exact_zero() {
        let [a, b, c] = tri();
        // On edge b-c, opposite a.
        let l = barycentric(Point2::new(3.0, 3.0), a, b, c).unwrap();
        assert_eq!(l[0], 0.0);
        // On edge a-b, opposite c.
        let l = barycentric(Point2::new(2.0, 0.0), a, b, c).unwrap();
        assert_eq!(l[2], 0.0);
    }

    #[test]
    fn test_outside_point_has_negative() {
        let [a, b, c] = tri();
        let l = barycentric(Point2::new(5.0, 5.0), a, b, c).unwrap();
        assert!(l[0] < 0.0);
    }

    #[test]
    fn test_winding_does_not_change_sign() {
        let [a, b, c] = tri();
        let q = Point2::new(1.0, 1.0);
        let ccw = barycentric(q, a, b, c).unwrap();
        let cw = barycentric(q, a, c, b).unwrap();
        assert_relative_eq!(ccw[0], cw[0]);
        assert_relative_eq!(ccw[1], cw[2]);
        assert_relative_eq!(ccw[2], cw[1]);
    }

    #[test]
    fn test_degenerate_triangle() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(1.0, 1.0);
        let c = Point2::new(2.0, 2.0);
        assert!(barycentric(Point2::new(0.5, 0.5), a, b, c).is_none());
    }
}
