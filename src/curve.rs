use crate::{
    math_util,
    parse::{CurveType, Pos2},
};

const BEZIER_STEP: f64 = 0.0025;
/// Bernstein weights below this fraction of the peak weight are dropped.
const BEZIER_WEIGHT_CUTOFF: f64 = 1e-20;
const CATMULL_STEP: f64 = 0.025;

/// A position on a slider path.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PathPoint {
    pub pos: Pos2,
    /// Direction of the polyline segment the point lies on, in radians.
    pub angle: f64,
    /// Index of the polyline segment the point lies on.
    pub segment: usize,
}

/// A slider path, ready for distance queries.
#[derive(Clone, Debug)]
pub enum Curve<'p> {
    /// Degenerate or unknown paths collapse to a single point.
    Point(Pos2),
    Linear(&'p [Pos2]),
    /// Bezier arcs split on duplicated control points. Queries walk the last
    /// arc after subtracting the length of all preceding arcs.
    Bezier {
        prefix_length: f64,
        polyline: Vec<Pos2>,
    },
    Catmull(Vec<Pos2>),
    PassThrough {
        origin: Pos2,
        center: Pos2,
        /// Negative if the arc runs clockwise.
        radius: f64,
    },
}

impl<'p> Curve<'p> {
    /// `None` if there are no control points.
    pub fn new(points: &'p [Pos2], kind: CurveType) -> Option<Self> {
        let curve = match (kind, points) {
            (_, []) => return None,
            (CurveType::Unknown, [.., last]) => Self::Point(*last),
            (_, [single]) => Self::Point(*single),
            (CurveType::Linear, _) | (CurveType::PassThrough, [_, _]) => Self::Linear(points),
            (CurveType::Bezier, _) => Self::bezier(points),
            (CurveType::CatmullRom, _) => Self::catmull(points),
            (CurveType::PassThrough, [a, b, c]) => Self::pass_through(*a, *b, *c)
                .unwrap_or_else(|| Self::bezier(points)),
            (CurveType::PassThrough, _) => Self::bezier(points),
        };

        Some(curve)
    }

    fn bezier(points: &'p [Pos2]) -> Self {
        let mut segments = Vec::new();
        let mut start = 0;

        for i in 1..points.len() {
            if points[i] == points[i - 1] {
                if i - start >= 2 {
                    segments.push((start, i));
                }

                start = i;
            }
        }

        let prefix_length: f64 = segments
            .iter()
            .map(|&(from, to)| math_util::polyline_length(&bezier_polyline(&points[from..to])))
            .sum();

        Self::Bezier {
            prefix_length,
            polyline: bezier_polyline(&points[start..]),
        }
    }

    fn catmull(points: &[Pos2]) -> Self {
        let order = points.len();
        let steps = (1.0 / CATMULL_STEP).round() as usize;
        let mut polyline = Vec::with_capacity((order - 1) * steps + 1);

        for i in 0..order - 1 {
            let v1 = if i > 0 { points[i - 1] } else { points[i] };
            let v2 = points[i];
            let v3 = points[i + 1];

            let v4 = if i + 2 < order {
                points[i + 2]
            } else {
                v3 * 2.0 - v2
            };

            for c in 0..steps {
                let t = c as f64 * CATMULL_STEP;
                polyline.push(catmull_point(v1, v2, v3, v4, t));
            }
        }

        polyline.push(points[order - 1]);

        Self::Catmull(polyline)
    }

    fn pass_through(a: Pos2, b: Pos2, c: Pos2) -> Option<Self> {
        let (center, radius) = math_util::circumcircle(a, b, c)?;
        let radius = if math_util::is_left(a, b, c) {
            -radius
        } else {
            radius
        };

        Some(Self::PassThrough {
            origin: a,
            center,
            radius,
        })
    }

    /// The position after travelling `distance` along the path.
    #[inline]
    pub fn point_at_distance(&self, distance: f64) -> Pos2 {
        self.path_point_at(distance).pos
    }

    /// Like [`Curve::point_at_distance`] but includes the angle and index of
    /// the polyline segment.
    pub fn path_point_at(&self, distance: f64) -> PathPoint {
        match self {
            Self::Point(pos) => PathPoint {
                pos: *pos,
                angle: 0.0,
                segment: 0,
            },
            Self::Linear([p1, p2]) => PathPoint {
                pos: math_util::point_on_line(*p1, *p2, distance),
                angle: math_util::angle_from_points(*p1, *p2),
                segment: 0,
            },
            Self::Linear(points) => walk(points, distance),
            Self::Bezier {
                prefix_length,
                polyline,
            } => walk(polyline, (distance - prefix_length).max(0.0)),
            Self::Catmull(polyline) => walk(polyline, distance),
            Self::PassThrough {
                origin,
                center,
                radius,
            } => {
                let radians = distance / *radius;
                let pos = math_util::rotate(*center, *origin, radians);
                let tangent = radians + (*origin - *center).y.atan2((*origin - *center).x);

                PathPoint {
                    pos,
                    angle: tangent + radius.signum() * std::f64::consts::FRAC_PI_2,
                    segment: 0,
                }
            }
        }
    }

    /// Total length of the path. A pass-through arc has no inherent end.
    pub fn length(&self) -> Option<f64> {
        match self {
            Self::Point(_) => Some(0.0),
            Self::Linear(points) => Some(math_util::polyline_length(points)),
            Self::Bezier {
                prefix_length,
                polyline,
            } => Some(prefix_length + math_util::polyline_length(polyline)),
            Self::Catmull(polyline) => Some(math_util::polyline_length(polyline)),
            Self::PassThrough { .. } => None,
        }
    }
}

fn walk(points: &[Pos2], distance: f64) -> PathPoint {
    math_util::point_at_distance(points, distance).unwrap_or(PathPoint {
        pos: Pos2::zero(),
        angle: 0.0,
        segment: 0,
    })
}

/// Sample a single bezier arc with a step size that shrinks with its order.
fn bezier_polyline(points: &[Pos2]) -> Vec<Pos2> {
    if points.len() < 2 {
        return points.to_vec();
    }

    let step = BEZIER_STEP / points.len() as f64;
    let steps = (1.0 / step).ceil() as usize;
    let ln_binomials = math_util::ln_binomials(points.len() - 1);

    (0..=steps)
        .map(|k| (k as f64 * step).min(1.0))
        .map(|t| bezier_point(points, &ln_binomials, t))
        .collect()
}

/// Bernstein form evaluated in log space, normalized by the summed weights.
///
/// Only weights around the peak at `i = n * t` are visited.
fn bezier_point(points: &[Pos2], ln_binomials: &[f64], t: f64) -> Pos2 {
    let n = points.len() - 1;

    if t <= 0.0 {
        return points[0];
    } else if t >= 1.0 {
        return points[n];
    }

    let ln_t = t.ln();
    let ln_rest = (1.0 - t).ln();
    let ln_weight = |i: usize| ln_binomials[i] + i as f64 * ln_t + (n - i) as f64 * ln_rest;

    let peak_idx = ((n as f64 * t).round() as usize).min(n);
    let peak = ln_weight(peak_idx);

    let mut sum = Pos2::zero();
    let mut total = 0.0;

    let mut add = |i: usize| {
        let weight = (ln_weight(i) - peak).exp();

        if weight < BEZIER_WEIGHT_CUTOFF {
            return false;
        }

        sum += points[i] * weight;
        total += weight;

        true
    };

    for i in (0..=peak_idx).rev() {
        if !add(i) {
            break;
        }
    }

    for i in peak_idx + 1..=n {
        if !add(i) {
            break;
        }
    }

    sum / total
}

#[inline]
fn catmull_point(p0: Pos2, p1: Pos2, p2: Pos2, p3: Pos2, t: f64) -> Pos2 {
    Pos2 {
        x: math_util::catmull(p0.x, p1.x, p2.x, p3.x, t),
        y: math_util::catmull(p0.y, p1.y, p2.y, p3.y, t),
    }
}

/// Position of a slider path after `length` osu!pixels.
///
/// Unknown curve types end on their last control point.
///
/// ```
/// use beatmap_pp::{slider_end_point, CurveType, Pos2};
///
/// let points = [Pos2::new(0.0, 0.0), Pos2::new(100.0, 0.0)];
/// let end = slider_end_point(CurveType::Linear, 40.0, &points);
///
/// assert_eq!(end, Some(Pos2::new(40.0, 0.0)));
/// ```
#[inline]
pub fn slider_end_point(curve_type: CurveType, length: f64, points: &[Pos2]) -> Option<Pos2> {
    Curve::new(points, curve_type).map(|curve| curve.point_at_distance(length))
}
