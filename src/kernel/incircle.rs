//! Exact in-circle predicate for integer points.

use crate::primitives::Point2;
use std::cmp::Ordering;

/// Where `d` lies relative to the circumcircle of the counter-clockwise
/// triangle `(a, b, c)`.
///
/// `Greater` means strictly inside, `Equal` on the circle and `Less` strictly
/// outside. The determinant is evaluated in `i128` without rounding; `None`
/// is returned if it does not fit.
///
/// ```
/// use dualmesh::kernel::incircle;
/// use dualmesh::Point2;
/// use std::cmp::Ordering;
///
/// let (a, b, c) = (Point2::new(0, 0), Point2::new(4, 0), Point2::new(4, 4));
/// assert_eq!(incircle(a, b, c, Point2::new(0, 4)), Some(Ordering::Equal));
/// assert_eq!(incircle(a, b, c, Point2::new(2, 2)), Some(Ordering::Greater));
/// assert_eq!(incircle(a, b, c, Point2::new(9, 9)), Some(Ordering::Less));
/// ```
pub fn incircle(a: Point2<i64>, b: Point2<i64>, c: Point2<i64>, d: Point2<i64>) -> Option<Ordering> {
    let rel = |p: Point2<i64>| (i128::from(p.x) - i128::from(d.x), i128::from(p.y) - i128::from(d.y));
    let (adx, ady) = rel(a);
    let (bdx, bdy) = rel(b);
    let (cdx, cdy) = rel(c);

    let lift = |x: i128, y: i128| x.checked_mul(x)?.checked_add(y.checked_mul(y)?);
    let cross = |x1: i128, y1: i128, x2: i128, y2: i128| x1.checked_mul(y2)?.checked_sub(y1.checked_mul(x2)?);

    let ta = lift(adx, ady)?.checked_mul(cross(bdx, bdy, cdx, cdy)?)?;
    let tb = lift(bdx, bdy)?.checked_mul(cross(cdx, cdy, adx, ady)?)?;
    let tc = lift(cdx, cdy)?.checked_mul(cross(adx, ady, bdx, bdy)?)?;

    Some(ta.checked_add(tb)?.checked_add(tc)?.cmp(&0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cocircular_far_from_origin() {
        let o: i64 = 100_000;
        let p = |x, y| Point2::new(o + x, o + y);
        assert_eq!(incircle(p(0, 0), p(4, 0), p(4, 4), p(0, 4)), Some(Ordering::Equal));
    }

    #[test]
    fn test_near_but_not_cocircular() {
        let o: i64 = 100_000;
        let p = |x, y| Point2::new(o + x, o + y);
        assert_eq!(incircle(p(0, 0), p(4, 0), p(4, 4), p(0, 5)), Some(Ordering::Less));
        assert_eq!(incircle(p(0, 0), p(4, 0), p(4, 4), p(1, 3)), Some(Ordering::Greater));
    }

    #[test]
    fn test_orientation_flips_sign() {
        let (a, b, c) = (Point2::new(0, 0), Point2::new(6, 0), Point2::new(0, 6));
        let d = Point2::new(1, 1);
        assert_eq!(incircle(a, b, c, d), Some(Ordering::Greater));
        assert_eq!(incircle(a, c, b, d), Some(Ordering::Less));
    }

    #[test]
    fn test_overflow_is_reported() {
        let big = Point2::new(i64::MAX, i64::MAX);
        let o = Point2::new(i64::MIN, i64::MIN);
        assert_eq!(incircle(big, o, Point2::new(i64::MIN, i64::MAX), Point2::new(0, 0)), None);
    }
}
