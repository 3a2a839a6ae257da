//! Closed 2D part outlines.
//!
//! A [`Profile`] is a thin wrapper around a [`geo::Polygon`]: one exterior ring
//! plus any number of interior rings (bores, toothed ring-gear openings).
//! Exterior rings are kept counter-clockwise and holes clockwise.

pub mod shapes;

pub use shapes::pin_layout;

use crate::float_types::{Real, tolerance};
use geo::{
    AffineOps, AffineTransform, Area, BoundingRect, Coord, LineString, Orient,
    Polygon as GeoPolygon, Rect, orient::Direction,
};
use nalgebra::{Point2, Vector2};

/// A part silhouette: outer boundary plus interior cutouts.
#[derive(Clone, Debug, PartialEq)]
pub struct Profile {
    polygon: GeoPolygon<Real>,
}

impl Profile {
    /// Builds a profile from an open outer point list and open hole point lists.
    /// Rings are closed and oriented here.
    pub fn new(outer: Vec<[Real; 2]>, holes: Vec<Vec<[Real; 2]>>) -> Self {
        let exterior = to_line_string(outer);
        let interiors = holes.into_iter().map(to_line_string).collect();
        Self::from_geo(GeoPolygon::new(exterior, interiors))
    }

    pub fn from_geo(polygon: GeoPolygon<Real>) -> Self {
        Self {
            polygon: polygon.orient(Direction::Default),
        }
    }

    pub const fn as_geo(&self) -> &GeoPolygon<Real> {
        &self.polygon
    }

    pub fn into_geo(self) -> GeoPolygon<Real> {
        self.polygon
    }

    /// Outer boundary vertices, without the closing duplicate.
    pub fn outer(&self) -> Vec<Point2<Real>> {
        ring_points(self.polygon.exterior())
    }

    /// Hole vertices, without the closing duplicates.
    pub fn holes(&self) -> Vec<Vec<Point2<Real>>> {
        self.polygon.interiors().iter().map(ring_points).collect()
    }

    pub fn num_holes(&self) -> usize {
        self.polygon.interiors().len()
    }

    pub fn bounding_box(&self) -> Option<Rect<Real>> {
        self.polygon.bounding_rect()
    }

    /// Filled area (outer minus holes).
    pub fn area(&self) -> Real {
        self.polygon.unsigned_area()
    }

    /// Largest distance from the origin to any outer vertex.
    pub fn max_radius(&self) -> Real {
        self.outer()
            .iter()
            .map(|p| p.coords.norm())
            .fold(0.0, Real::max)
    }

    /// Smallest distance from the origin to the outer boundary, edges included.
    pub fn min_radius(&self) -> Real {
        min_distance_to_ring(&self.outer())
    }

    /// Largest distance from the origin to any hole vertex, `0` without holes.
    pub fn max_hole_radius(&self) -> Real {
        self.holes()
            .iter()
            .flatten()
            .map(|p| p.coords.norm())
            .fold(0.0, Real::max)
    }

    /// Returns a copy rotated by `angle` radians about the origin, then moved by `offset`.
    pub fn transformed(&self, angle: Real, offset: Vector2<Real>) -> Self {
        let (s, c) = angle.sin_cos();
        let transform = AffineTransform::new(c, -s, offset.x, s, c, offset.y);
        Self {
            polygon: self.polygon.affine_transform(&transform),
        }
    }

    /// Ear-cut triangulation of the filled region, for renderers that want triangles.
    pub fn triangulate(&self) -> Vec<[Point2<Real>; 3]> {
        use geo::TriangulateEarcut;
        let triangulation = self.polygon.earcut_triangles_raw();
        let triangle_indices = triangulation.triangle_indices;
        let vertices = triangulation.vertices;

        let mut result = Vec::with_capacity(triangle_indices.len() / 3);
        for tri in triangle_indices.chunks_exact(3) {
            result.push([
                Point2::new(vertices[2 * tri[0]], vertices[2 * tri[0] + 1]),
                Point2::new(vertices[2 * tri[1]], vertices[2 * tri[1] + 1]),
                Point2::new(vertices[2 * tri[2]], vertices[2 * tri[2] + 1]),
            ]);
        }
        result
    }
}

// consecutive points closer than the tolerance collapse into one
fn to_line_string(points: Vec<[Real; 2]>) -> LineString<Real> {
    let eps = tolerance();
    let mut coords: Vec<Coord<Real>> = Vec::with_capacity(points.len() + 1);
    for [x, y] in points {
        let c = Coord { x, y };
        if coords.last().is_some_and(|last| near(*last, c, eps)) {
            continue;
        }
        coords.push(c);
    }
    while coords.len() > 1 && near(coords[0], coords[coords.len() - 1], eps) {
        coords.pop();
    }
    LineString::new(coords)
}

fn near(a: Coord<Real>, b: Coord<Real>, eps: Real) -> bool {
    (a.x - b.x).hypot(a.y - b.y) < eps
}

fn ring_points(ring: &LineString<Real>) -> Vec<Point2<Real>> {
    let mut points: Vec<Point2<Real>> = ring.coords().map(|c| Point2::new(c.x, c.y)).collect();
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    points
}

fn min_distance_to_ring(points: &[Point2<Real>]) -> Real {
    let n = points.len();
    (0..n)
        .map(|i| distance_to_segment(&points[i], &points[(i + 1) % n]))
        .fold(Real::INFINITY, Real::min)
}

// distance from the origin to segment ab
fn distance_to_segment(a: &Point2<Real>, b: &Point2<Real>) -> Real {
    let ab = b - a;
    let len2 = ab.norm_squared();
    if len2 == 0.0 {
        return a.coords.norm();
    }
    let t = (-a.coords.dot(&ab) / len2).clamp(0.0, 1.0);
    (a.coords + ab * t).norm()
}
