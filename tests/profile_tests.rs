use approx::assert_relative_eq;
use gearsim::errors::ProfileError;
use gearsim::float_types::{FRAC_PI_2, PI, Real};
use gearsim::profile::shapes::MAX_COUNT;
use gearsim::profile::{Profile, pin_layout};
use nalgebra::{Point2, Vector2};

mod support;

use crate::support::{
    approx_eq, max_radius, min_radius, ring_self_intersects, rings_cross, signed_area,
};

#[test]
fn gear_outline_walks_four_steps_per_tooth() {
    let gear = Profile::gear_outline(20, 5.0, 1.5).unwrap();
    let outer = gear.outer();
    assert_eq!(outer.len(), 80);
    assert!(approx_eq(max_radius(&outer), 5.0, 1e-4));
    assert!(approx_eq(min_radius(&outer), 4.25, 1e-4));

    let holes = gear.holes();
    assert_eq!(holes.len(), 1);
    assert_eq!(holes[0].len(), 64);
    assert!(approx_eq(max_radius(&holes[0]), 1.5, 1e-4));
}

#[test]
fn gear_outline_without_bore_has_no_hole() {
    let gear = Profile::gear_outline(12, 3.0, 0.0).unwrap();
    assert_eq!(gear.num_holes(), 0);
    assert_eq!(gear.outer().len(), 48);
}

#[test]
fn gear_outline_rejects_bad_input() {
    assert_eq!(
        Profile::gear_outline(0, 5.0, 1.0),
        Err(ProfileError::NonPositiveCount { what: "gear teeth" })
    );
    assert!(matches!(
        Profile::gear_outline(20, -1.0, 0.0),
        Err(ProfileError::NonPositiveRadius { .. })
    ));
    assert!(matches!(
        Profile::gear_outline(20, 5.0, 4.5),
        Err(ProfileError::HoleOutsideShell { .. })
    ));
}

#[test]
fn counts_above_the_limit_are_rejected() {
    assert_eq!(
        Profile::gear_outline(MAX_COUNT + 1, 5.0, 0.0),
        Err(ProfileError::CountTooLarge {
            what: "gear teeth",
            count: MAX_COUNT + 1,
            max: MAX_COUNT,
        })
    );
    assert!(matches!(
        Profile::ring_outline(u32::MAX, 15.0, 18.0),
        Err(ProfileError::CountTooLarge { .. })
    ));
    assert!(matches!(
        pin_layout(MAX_COUNT + 1, 10.0),
        Err(ProfileError::CountTooLarge { .. })
    ));
    assert_eq!(pin_layout(MAX_COUNT, 10.0).unwrap().len(), MAX_COUNT as usize);
}

#[test]
fn ring_outline_teeth_point_inward() {
    let ring = Profile::ring_outline(60, 15.0, 18.0).unwrap();
    assert_eq!(ring.outer().len(), 64);
    assert!(approx_eq(max_radius(&ring.outer()), 18.0, 1e-4));

    let bore = &ring.holes()[0];
    assert_eq!(bore.len(), 240);
    assert!(approx_eq(min_radius(bore), 15.0, 1e-4));
    assert!(approx_eq(max_radius(bore), 17.25, 1e-4));
    assert!(ring.min_radius() > ring.max_hole_radius());
}

#[test]
fn ring_outline_needs_room_for_the_teeth() {
    assert!(matches!(
        Profile::ring_outline(60, 15.0, 17.0),
        Err(ProfileError::RingOverlap { .. })
    ));
}

#[test]
fn ring_bore_must_clear_the_polygon_rim() {
    // 17.26 clears the 17.25 tooth gaps at the corners but not along the rim edges.
    assert!(matches!(
        Profile::ring_outline(60, 15.0, 17.26),
        Err(ProfileError::RingOverlap { .. })
    ));

    let ring = Profile::ring_outline(60, 15.0, 18.0).unwrap();
    assert!(ring.max_hole_radius() < ring.min_radius());
    assert!(!rings_cross(&ring.outer(), &ring.holes()[0]));
}

#[test]
fn cycloidal_disc_is_a_simple_curve_around_its_bore() {
    let base: Real = 8.0;
    let lobes = 10;
    let disc = Profile::cycloidal_disc_outline(lobes, base).unwrap();
    let outer = disc.outer();
    assert_eq!(outer.len(), 200);
    assert!(!ring_self_intersects(&outer));

    let r = base / lobes as Real;
    let d = 0.7 * r;
    assert!(approx_eq(min_radius(&outer), base + r - d, 1e-4));
    assert!(max_radius(&outer) <= base + r + d + 1e-4);

    let bore = &disc.holes()[0];
    assert!(approx_eq(max_radius(bore), 0.2 * base, 1e-4));
    assert!(!rings_cross(&outer, bore));
}

#[test]
fn rings_are_oriented() {
    let gear = Profile::gear_outline(20, 5.0, 1.5).unwrap();
    assert!(signed_area(&gear.outer()) > 0.0);
    assert!(signed_area(&gear.holes()[0]) < 0.0);

    let ring = Profile::ring_outline(60, 15.0, 18.0).unwrap();
    assert!(signed_area(&ring.outer()) > 0.0);
    assert!(signed_area(&ring.holes()[0]) < 0.0);
}

#[test]
fn annulus_and_cross_areas() {
    let annulus = Profile::annulus(1.0, 2.0, 256).unwrap();
    assert_relative_eq!(annulus.area(), PI * 3.0, max_relative = 1e-3);

    let cross = Profile::cross(10.0, 1.0).unwrap();
    assert_relative_eq!(cross.area(), 2.0 * 10.0 * 1.0 - 1.0, max_relative = 1e-9);

    assert!(Profile::annulus(2.0, 1.0, 32).is_err());
    assert!(matches!(
        Profile::cross(1.0, 2.0),
        Err(ProfileError::ArmTooWide { .. })
    ));
    assert!(matches!(
        Profile::cross(1.0, 1.0),
        Err(ProfileError::ArmTooWide { .. })
    ));
    assert!(Profile::circle(1.0, 2).is_err());
}

#[test]
fn ellipse_extent() {
    let ellipse = Profile::ellipse(4.75, 4.25, 64).unwrap();
    let bbox = ellipse.bounding_box().unwrap();
    assert!(approx_eq(bbox.max().x, 4.75, 1e-4));
    assert!(approx_eq(bbox.max().y, 4.25, 1e-3));
}

#[test]
fn pin_layout_is_evenly_spaced() {
    let pins = pin_layout(11, 10.0).unwrap();
    assert_eq!(pins.len(), 11);
    assert!(approx_eq(pins[0].x, 10.0, 1e-6));
    assert!(approx_eq(pins[0].y, 0.0, 1e-6));
    for pin in &pins {
        assert!(approx_eq(pin.coords.norm(), 10.0, 1e-4));
    }
    let gap = (pins[1] - pins[0]).norm();
    assert!(approx_eq((pins[10] - pins[0]).norm(), gap, 1e-4));
    assert!(pin_layout(0, 10.0).is_err());
}

#[test]
fn transformed_rotates_then_translates() {
    let square = Profile::new(vec![[1.0, 0.0], [2.0, 0.0], [2.0, 1.0], [1.0, 1.0]], vec![]);
    let moved = square.transformed(FRAC_PI_2, Vector2::new(10.0, 0.0));
    let first = moved.outer()[0];
    assert!(approx_eq(first.x, 10.0, 1e-6));
    assert!(approx_eq(first.y, 1.0, 1e-6));
    assert_relative_eq!(moved.area(), square.area(), max_relative = 1e-9);
}

#[test]
fn triangulation_covers_the_filled_area() {
    let gear = Profile::gear_outline(20, 5.0, 1.5).unwrap();
    let triangles = gear.triangulate();
    assert!(!triangles.is_empty());
    let total: Real = triangles
        .iter()
        .map(|[a, b, c]| 0.5 * ((b - a).perp(&(c - a))).abs())
        .sum();
    assert_relative_eq!(total, gear.area(), max_relative = 1e-6);
}

#[test]
fn near_duplicate_points_collapse() {
    let profile = Profile::new(
        vec![[0.0, 0.0], [1.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]],
        vec![],
    );
    assert_eq!(profile.outer(), vec![
        Point2::new(0.0, 0.0),
        Point2::new(1.0, 0.0),
        Point2::new(1.0, 1.0),
        Point2::new(0.0, 1.0),
    ]);
}
