//! SVG rendering of profiles and of a posed drive.
//!
//! Every ring becomes one subpath of a single `<path>` with `fill-rule="evenodd"`,
//! so holes stay open regardless of winding. The y axis is flipped so the drive
//! reads counter-clockwise the same way it is modelled.

use crate::drive::{Part, Pose};
use crate::float_types::Real;
use crate::profile::Profile;
use crate::sim::SimulationController;
use ::svg::Document;
use ::svg::node::element::path::Data;
use ::svg::node::element::{Circle, Group, Path};
use geo::{Coord, Rect};
use nalgebra::Point2;

/// Fraction of the drawing's extent left as margin on each side.
const MARGIN_RATIO: Real = 0.05;

pub trait ToSVG {
    fn to_svg(&self) -> String;
}

impl ToSVG for Profile {
    fn to_svg(&self) -> String {
        let path = profile_path(self, "#888888");
        document(self.bounding_box()).add(path).to_string()
    }
}

impl ToSVG for SimulationController {
    /// Every part at its current pose, plus pins and bearing balls.
    fn to_svg(&self) -> String {
        let posed = self.posed_profiles();
        let poses = self.poses();

        let bounds = posed
            .values()
            .filter_map(Profile::bounding_box)
            .reduce(union_rect);

        let mut scene = Group::new().set("transform", "scale(1,-1)");
        for (part, profile) in &posed {
            scene = scene.add(
                profile_path(profile, part_colour(*part)).set("id", part.to_string()),
            );
        }
        for (part, points) in self.layouts() {
            let pose = poses.get(part).copied().unwrap_or(Pose::IDENTITY);
            for point in points {
                let centre = pose.apply_point(point);
                let r = point.coords.norm() * marker_ratio(*part);
                scene = scene.add(marker(&centre, r, part_colour(*part)));
            }
        }

        document(bounds).add(scene).to_string()
    }
}

fn profile_path(profile: &Profile, fill: &str) -> Path {
    let mut data = Data::new();
    for ring in std::iter::once(profile.outer()).chain(profile.holes()) {
        data = ring_data(data, &ring);
    }
    Path::new()
        .set("fill", fill)
        .set("fill-rule", "evenodd")
        .set("stroke", "#222222")
        .set("stroke-width", "0.05")
        .set("d", data)
}

fn ring_data(data: Data, ring: &[Point2<Real>]) -> Data {
    let Some((first, rest)) = ring.split_first() else {
        return data;
    };
    let data = data.move_to((first.x as f32, first.y as f32));
    rest.iter()
        .fold(data, |data, p| data.line_to((p.x as f32, p.y as f32)))
        .close()
}

fn marker(centre: &Point2<Real>, radius: Real, fill: &str) -> Circle {
    Circle::new()
        .set("cx", centre.x as f32)
        .set("cy", centre.y as f32)
        .set("r", radius as f32)
        .set("fill", fill)
}

/// A document whose view box covers `bounds` (y flipped) with a margin.
fn document(bounds: Option<Rect<Real>>) -> Document {
    let Some(rect) = bounds else {
        return Document::new();
    };
    let margin = rect.width().max(rect.height()) * MARGIN_RATIO;
    let min = rect.min();
    let max = rect.max();
    let view_box = format!(
        "{} {} {} {}",
        min.x - margin,
        -max.y - margin,
        rect.width() + 2.0 * margin,
        rect.height() + 2.0 * margin
    );
    Document::new().set("viewBox", view_box)
}

fn union_rect(a: Rect<Real>, b: Rect<Real>) -> Rect<Real> {
    let (a_min, a_max, b_min, b_max) = (a.min(), a.max(), b.min(), b.max());
    Rect::new(
        Coord {
            x: a_min.x.min(b_min.x),
            y: a_min.y.min(b_min.y),
        },
        Coord {
            x: a_max.x.max(b_max.x),
            y: a_max.y.max(b_max.y),
        },
    )
}

const fn part_colour(part: Part) -> &'static str {
    match part {
        Part::Sun => "#ffd700",
        Part::Planet(_) => "#4a90d9",
        Part::Ring | Part::CircularSpline | Part::PinWheel => "#9e9e9e",
        Part::Carrier => "#e05050",
        Part::WaveGenerator | Part::EccentricShaft => "#f08c30",
        Part::Flexspline => "#50b050",
        Part::CycloidalDisc => "#8e5cc8",
    }
}

/// Marker radius as a fraction of the marker's distance from the part centre.
const fn marker_ratio(part: Part) -> Real {
    match part {
        Part::PinWheel => 0.08,
        _ => 0.04,
    }
}
