//! Test support library
//! Provides various helper functions & utilities for tests.

use gearsim::float_types::Real;
use nalgebra::Point2;

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Returns `[min_x, min_y, max_x, max_y]` for a set of points.
pub fn bounding_box(points: &[Point2<Real>]) -> [Real; 4] {
    points.iter().fold(
        [Real::MAX, Real::MAX, Real::MIN, Real::MIN],
        |[min_x, min_y, max_x, max_y], p| {
            [min_x.min(p.x), min_y.min(p.y), max_x.max(p.x), max_y.max(p.y)]
        },
    )
}

/// Largest distance from the origin to any point.
pub fn max_radius(points: &[Point2<Real>]) -> Real {
    points.iter().map(|p| p.coords.norm()).fold(0.0, Real::max)
}

/// Smallest distance from the origin to any point.
pub fn min_radius(points: &[Point2<Real>]) -> Real {
    points
        .iter()
        .map(|p| p.coords.norm())
        .fold(Real::INFINITY, Real::min)
}

/// Closed-ring edges `(p[i], p[i + 1])`, wrapping back to the first point.
fn edges(ring: &[Point2<Real>]) -> impl Iterator<Item = (Point2<Real>, Point2<Real>)> + '_ {
    let n = ring.len();
    (0..n).map(move |i| (ring[i], ring[(i + 1) % n]))
}

fn cross(o: &Point2<Real>, a: &Point2<Real>, b: &Point2<Real>) -> Real {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

/// True when segments `ab` and `cd` cross at a point interior to both.
pub fn segments_cross(
    a: &Point2<Real>,
    b: &Point2<Real>,
    c: &Point2<Real>,
    d: &Point2<Real>,
) -> bool {
    let d1 = cross(c, d, a);
    let d2 = cross(c, d, b);
    let d3 = cross(a, b, c);
    let d4 = cross(a, b, d);
    d1 * d2 < 0.0 && d3 * d4 < 0.0
}

/// True when any two non-adjacent edges of the closed ring cross.
pub fn ring_self_intersects(ring: &[Point2<Real>]) -> bool {
    let n = ring.len();
    let edges: Vec<_> = edges(ring).collect();
    for i in 0..n {
        for j in (i + 2)..n {
            if i == 0 && j == n - 1 {
                continue;
            }
            let (a, b) = edges[i];
            let (c, d) = edges[j];
            if segments_cross(&a, &b, &c, &d) {
                return true;
            }
        }
    }
    false
}

/// True when any edge of `first` crosses any edge of `second`.
pub fn rings_cross(first: &[Point2<Real>], second: &[Point2<Real>]) -> bool {
    edges(first).any(|(a, b)| edges(second).any(|(c, d)| segments_cross(&a, &b, &c, &d)))
}

/// Signed shoelace area; positive for counter-clockwise rings.
pub fn signed_area(ring: &[Point2<Real>]) -> Real {
    0.5 * edges(ring).map(|(a, b)| a.x * b.y - b.x * a.y).sum::<Real>()
}
