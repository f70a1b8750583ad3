use crate::{curve::PathPoint, Pos2};

/// Natural logarithms of the binomial coefficients `n choose i` for `i` in `0..=n`.
pub(crate) fn ln_binomials(n: usize) -> Vec<f64> {
    let mut row = Vec::with_capacity(n + 1);
    let mut curr = 0.0;
    row.push(curr);

    for i in 1..=n {
        curr += ((n - i + 1) as f64 / i as f64).ln();
        row.push(curr);
    }

    row
}

#[inline]
pub(crate) fn catmull(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    0.5 * ((2.0 * p1)
        + (-p0 + p2) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t * t
        + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * t * t * t)
}

/// The point at `len` along the ray from `p1` through `p2`.
#[inline]
pub(crate) fn point_on_line(p1: Pos2, p2: Pos2, len: f64) -> Pos2 {
    let full_len = p1.distance(p2);

    if full_len < f64::EPSILON {
        return p1;
    }

    p1 + (p2 - p1) * (len / full_len)
}

#[inline]
pub(crate) fn angle_from_points(p0: Pos2, p1: Pos2) -> f64 {
    (p1.y - p0.y).atan2(p1.x - p0.x)
}

#[inline]
pub(crate) fn polyline_length(points: &[Pos2]) -> f64 {
    points
        .iter()
        .zip(points.iter().skip(1))
        .map(|(prev, curr)| prev.distance(*curr))
        .sum()
}

/// Walk along the polyline until `distance` is covered.
///
/// Distances past the end resolve to the last point.
pub(crate) fn point_at_distance(points: &[Pos2], distance: f64) -> Option<PathPoint> {
    let (first, last) = match points {
        [] => return None,
        [single] => {
            return Some(PathPoint {
                pos: *single,
                angle: 0.0,
                segment: 0,
            })
        }
        [first, .., last] => (*first, *last),
    };

    let mut remaining = distance.max(0.0);

    if remaining < f64::EPSILON {
        return Some(PathPoint {
            pos: first,
            angle: angle_from_points(points[0], points[1]),
            segment: 0,
        });
    }

    for (segment, (&curr, &next)) in points.iter().zip(points.iter().skip(1)).enumerate() {
        let len = curr.distance(next);

        if remaining <= len {
            let pos = if len < f64::EPSILON {
                curr
            } else {
                curr + (next - curr) * (remaining / len)
            };

            return Some(PathPoint {
                pos,
                angle: angle_from_points(curr, next),
                segment,
            });
        }

        remaining -= len;
    }

    let n = points.len();

    Some(PathPoint {
        pos: last,
        angle: angle_from_points(points[n - 2], last),
        segment: n - 2,
    })
}

/// Center and radius of the circle through the three points.
///
/// `None` if the points are collinear.
pub fn circumcircle(a: Pos2, b: Pos2, c: Pos2) -> Option<(Pos2, f64)> {
    let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));

    if d.abs() < f64::EPSILON {
        return None;
    }

    let a_sq = a.length_squared();
    let b_sq = b.length_squared();
    let c_sq = c.length_squared();

    let center = Pos2 {
        x: (a_sq * (b.y - c.y) + b_sq * (c.y - a.y) + c_sq * (a.y - b.y)) / d,
        y: (a_sq * (c.x - b.x) + b_sq * (a.x - c.x) + c_sq * (b.x - a.x)) / d,
    };

    let radius = center.distance(a);

    (center.x.is_finite() && center.y.is_finite()).then(|| (center, radius))
}

/// Whether `c` lies on the left of the line from `a` to `b`.
#[inline]
pub(crate) fn is_left(a: Pos2, b: Pos2, c: Pos2) -> bool {
    ((b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)) < 0.0
}

/// Rotate `p` around `center`.
#[inline]
pub(crate) fn rotate(center: Pos2, p: Pos2, radians: f64) -> Pos2 {
    let (sin, cos) = radians.sin_cos();
    let d = p - center;

    Pos2 {
        x: cos * d.x - sin * d.y + center.x,
        y: sin * d.x + cos * d.y + center.y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binomial() {
        let row: Vec<_> = ln_binomials(4).into_iter().map(f64::exp).collect();

        for (actual, expected) in row.iter().zip([1.0, 4.0, 6.0, 4.0, 1.0]) {
            assert!((actual - expected).abs() < 1e-9);
        }

        assert!((ln_binomials(5)[3].exp() - 10.0).abs() < 1e-9);

        // 2000 choose 1000 exceeds f64 but its logarithm does not
        let wide = ln_binomials(2000);
        assert_eq!(wide.len(), 2001);
        assert!(wide.iter().all(|ln| ln.is_finite()));
        assert!(wide[2000].abs() < 1e-6);
    }

    #[test]
    fn catmull_endpoints() {
        assert!((catmull(0.0, 10.0, 20.0, 30.0, 0.0) - 10.0).abs() < 1e-12);
        assert!((catmull(0.0, 10.0, 20.0, 30.0, 1.0) - 20.0).abs() < 1e-12);
        assert!((catmull(0.0, 10.0, 20.0, 30.0, 0.5) - 15.0).abs() < 1e-12);
    }

    #[test]
    fn line_extends() {
        let p = point_on_line(Pos2::new(0.0, 0.0), Pos2::new(100.0, 0.0), 40.0);
        assert_eq!(p, Pos2::new(40.0, 0.0));

        let p = point_on_line(Pos2::new(0.0, 0.0), Pos2::new(0.0, 10.0), 20.0);
        assert_eq!(p, Pos2::new(0.0, 20.0));

        let p = point_on_line(Pos2::new(5.0, 5.0), Pos2::new(5.0, 5.0), 20.0);
        assert_eq!(p, Pos2::new(5.0, 5.0));
    }

    #[test]
    fn polyline_walk() {
        let points = [
            Pos2::new(0.0, 0.0),
            Pos2::new(10.0, 0.0),
            Pos2::new(10.0, 10.0),
        ];

        assert!((polyline_length(&points) - 20.0).abs() < f64::EPSILON);

        let p = point_at_distance(&points, 15.0).unwrap();
        assert_eq!(p.pos, Pos2::new(10.0, 5.0));
        assert_eq!(p.segment, 1);
        assert!((p.angle - std::f64::consts::FRAC_PI_2).abs() < 1e-12);

        let p = point_at_distance(&points, 100.0).unwrap();
        assert_eq!(p.pos, Pos2::new(10.0, 10.0));

        assert!(point_at_distance(&[], 1.0).is_none());
    }

    #[test]
    fn circle_through_points() {
        let (center, radius) = circumcircle(
            Pos2::new(0.0, 0.0),
            Pos2::new(2.0, 0.0),
            Pos2::new(0.0, 2.0),
        )
        .unwrap();

        assert!((center.x - 1.0).abs() < 1e-12);
        assert!((center.y - 1.0).abs() < 1e-12);
        assert!((radius - 2.0_f64.sqrt()).abs() < 1e-12);

        assert!(circumcircle(
            Pos2::new(0.0, 0.0),
            Pos2::new(1.0, 1.0),
            Pos2::new(2.0, 2.0)
        )
        .is_none());
    }

    #[test]
    fn rotation() {
        let p = rotate(Pos2::new(1.0, 1.0), Pos2::new(2.0, 1.0), std::f64::consts::PI);

        assert!((p.x - 0.0).abs() < 1e-12);
        assert!((p.y - 1.0).abs() < 1e-12);
    }
}
