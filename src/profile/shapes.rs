//! Procedural part outlines.
//!
//! Tooth forms here are visual stand-ins: square teeth on a polygon and a
//! curtate epitrochoid for the cycloidal disc. None of them mesh correctly.

use crate::errors::ProfileError;
use crate::float_types::{Real, TAU};
use crate::profile::Profile;
use nalgebra::Point2;

/// Radial tooth depth as a fraction of the pitch (or bore) radius.
pub const TOOTH_DEPTH: Real = 0.15;

/// Largest tooth, lobe or pin count any generator accepts.
pub const MAX_COUNT: u32 = 10_000;

/// Segment count used for every circular boundary.
pub const CIRCLE_SEGMENTS: usize = 64;

/// Samples taken along the cycloidal disc curve.
pub const CYCLOID_SAMPLES: usize = 200;

/// Pen offset `d` of the cycloidal disc curve as a fraction of the rolling radius.
pub const CYCLOID_PEN_RATIO: Real = 0.7;

/// Central bore of the cycloidal disc as a fraction of its base radius.
pub const DISC_BORE_RATIO: Real = 0.2;

impl Profile {
    /// Creates a circle of `radius` centred on the origin.
    ///
    /// # Parameters
    /// - `radius`: circle radius (must be > 0)
    /// - `segments`: number of polygon edges (minimum 3)
    pub fn circle(radius: Real, segments: usize) -> Result<Self, ProfileError> {
        ensure_radius(radius, "circle radius")?;
        ensure_segments(segments)?;
        Ok(Profile::new(circle_coords(radius, segments, false), vec![]))
    }

    /// Axis-aligned ellipse with semi-axes `semi_x` and `semi_y`.
    pub fn ellipse(semi_x: Real, semi_y: Real, segments: usize) -> Result<Self, ProfileError> {
        ensure_radius(semi_x, "ellipse semi-axis")?;
        ensure_radius(semi_y, "ellipse semi-axis")?;
        ensure_segments(segments)?;
        let outer = (0..segments)
            .map(|i| {
                let theta = TAU * (i as Real) / (segments as Real);
                [semi_x * theta.cos(), semi_y * theta.sin()]
            })
            .collect();
        Ok(Profile::new(outer, vec![]))
    }

    /// Plain annulus between `inner_radius` and `outer_radius`.
    pub fn annulus(
        inner_radius: Real,
        outer_radius: Real,
        segments: usize,
    ) -> Result<Self, ProfileError> {
        ensure_radius(inner_radius, "annulus inner radius")?;
        ensure_radius(outer_radius, "annulus outer radius")?;
        ensure_segments(segments)?;
        if outer_radius <= inner_radius {
            return Err(ProfileError::RingOverlap {
                outer: outer_radius,
                bore: inner_radius,
            });
        }
        Ok(Profile::new(
            circle_coords(outer_radius, segments, false),
            vec![circle_coords(inner_radius, segments, true)],
        ))
    }

    /// Plus-shaped plate: two perpendicular bars of length `span` and width `width`
    /// crossing at the origin.
    pub fn cross(span: Real, width: Real) -> Result<Self, ProfileError> {
        ensure_radius(span, "cross span")?;
        ensure_radius(width, "cross width")?;
        if width >= span {
            return Err(ProfileError::ArmTooWide { width, span });
        }
        let a = 0.5 * span;
        let w = 0.5 * width;
        let outer = vec![
            [a, -w],
            [a, w],
            [w, w],
            [w, a],
            [-w, a],
            [-w, w],
            [-a, w],
            [-a, -w],
            [-w, -w],
            [-w, -a],
            [w, -a],
            [w, -w],
        ];
        Ok(Profile::new(outer, vec![]))
    }

    /// Square-tooth external gear.
    ///
    /// Walks `4 * teeth` equal angular steps. Steps 0 and 1 of every group of four
    /// sit on `pitch_radius`, steps 2 and 3 sit `TOOTH_DEPTH * pitch_radius` lower.
    /// A `bore_radius > 0` adds a circular hole at the origin.
    ///
    /// # Example
    /// ```
    /// use gearsim::profile::Profile;
    /// let sun = Profile::gear_outline(20, 5.0, 1.5).unwrap();
    /// assert_eq!(sun.outer().len(), 80);
    /// assert_eq!(sun.num_holes(), 1);
    /// ```
    pub fn gear_outline(
        teeth: u32,
        pitch_radius: Real,
        bore_radius: Real,
    ) -> Result<Self, ProfileError> {
        ensure_count(teeth, "gear teeth")?;
        ensure_radius(pitch_radius, "pitch radius")?;
        let body = Profile::new(
            toothed_coords(teeth, pitch_radius, -TOOTH_DEPTH * pitch_radius),
            vec![],
        );
        if bore_radius <= 0.0 {
            return Ok(body);
        }

        let shell = body.min_radius();
        if bore_radius >= shell {
            return Err(ProfileError::HoleOutsideShell {
                hole: bore_radius,
                shell,
            });
        }
        let mut polygon = body.into_geo();
        polygon.interiors_push(circle_coords(bore_radius, CIRCLE_SEGMENTS, true));
        Ok(Profile::from_geo(polygon))
    }

    /// Internal (ring) gear: a full circle of `outer_radius` with a toothed bore whose
    /// teeth point inward. The bore's gaps reach `inner_radius * (1 + TOOTH_DEPTH)`.
    ///
    /// The outer circle is a polygon, so its edges sit slightly inside `outer_radius`;
    /// the bore has to clear those edges, not just the corners.
    pub fn ring_outline(
        teeth: u32,
        inner_radius: Real,
        outer_radius: Real,
    ) -> Result<Self, ProfileError> {
        ensure_count(teeth, "ring teeth")?;
        ensure_radius(inner_radius, "ring inner radius")?;
        ensure_radius(outer_radius, "ring outer radius")?;
        let bore = inner_radius * (1.0 + TOOTH_DEPTH);
        if outer_radius <= bore {
            return Err(ProfileError::RingOverlap {
                outer: outer_radius,
                bore,
            });
        }
        let ring = Profile::new(
            circle_coords(outer_radius, CIRCLE_SEGMENTS, false),
            vec![toothed_coords(teeth, inner_radius, TOOTH_DEPTH * inner_radius)],
        );
        let (rim, bore) = (ring.min_radius(), ring.max_hole_radius());
        if bore >= rim {
            return Err(ProfileError::RingOverlap { outer: rim, bore });
        }
        Ok(ring)
    }

    /// Cycloidal disc with `lobes` lobes around `base_radius`, plus a central bore.
    ///
    /// With `r = base_radius / lobes` and `d = CYCLOID_PEN_RATIO * r` the outline is
    /// the epitrochoid
    /// ```text
    /// x(t) = (R + r)·cos(t) − d·cos(((R + r) / r)·t)
    /// y(t) = (R + r)·sin(t) − d·sin(((R + r) / r)·t)
    /// ```
    /// sampled at `CYCLOID_SAMPLES` equal steps of `t ∈ [0, 2π)`.
    pub fn cycloidal_disc_outline(lobes: u32, base_radius: Real) -> Result<Self, ProfileError> {
        ensure_count(lobes, "disc lobes")?;
        ensure_radius(base_radius, "disc base radius")?;
        let big_r = base_radius;
        let r = big_r / lobes as Real;
        let d = CYCLOID_PEN_RATIO * r;
        let k = (big_r + r) / r;

        let outer = (0..CYCLOID_SAMPLES)
            .map(|i| {
                let t = TAU * (i as Real) / (CYCLOID_SAMPLES as Real);
                [
                    (big_r + r) * t.cos() - d * (k * t).cos(),
                    (big_r + r) * t.sin() - d * (k * t).sin(),
                ]
            })
            .collect();
        let bore = circle_coords(DISC_BORE_RATIO * base_radius, CIRCLE_SEGMENTS, true);
        Ok(Profile::new(outer, vec![bore]))
    }
}

/// Evenly spaced pin centres on a circle of `radius`, the first on the +X axis.
///
/// This is a placement list, not an outline.
pub fn pin_layout(num_pins: u32, radius: Real) -> Result<Vec<Point2<Real>>, ProfileError> {
    ensure_count(num_pins, "pin count")?;
    ensure_radius(radius, "pin circle radius")?;
    Ok((0..num_pins)
        .map(|i| {
            let angle = TAU * (i as Real) / (num_pins as Real);
            Point2::new(radius * angle.cos(), radius * angle.sin())
        })
        .collect())
}

fn toothed_coords(teeth: u32, radius: Real, depth: Real) -> Vec<[Real; 2]> {
    let steps = teeth as usize * 4;
    let angle_step = TAU / steps as Real;
    (0..steps)
        .map(|i| {
            let angle = i as Real * angle_step;
            let r = match i % 4 {
                2 | 3 => radius + depth,
                _ => radius,
            };
            [r * angle.cos(), r * angle.sin()]
        })
        .collect()
}

fn circle_coords(radius: Real, segments: usize, clockwise: bool) -> Vec<[Real; 2]> {
    let sign = if clockwise { -1.0 } else { 1.0 };
    (0..segments)
        .map(|i| {
            let theta = sign * TAU * (i as Real) / (segments as Real);
            [radius * theta.cos(), radius * theta.sin()]
        })
        .collect()
}

const fn ensure_count(count: u32, what: &'static str) -> Result<(), ProfileError> {
    if count == 0 {
        return Err(ProfileError::NonPositiveCount { what });
    }
    if count > MAX_COUNT {
        return Err(ProfileError::CountTooLarge {
            what,
            count,
            max: MAX_COUNT,
        });
    }
    Ok(())
}

fn ensure_radius(value: Real, what: &'static str) -> Result<(), ProfileError> {
    if !(value.is_finite() && value > 0.0) {
        return Err(ProfileError::NonPositiveRadius { what, value });
    }
    Ok(())
}

const fn ensure_segments(segments: usize) -> Result<(), ProfileError> {
    if segments < 3 {
        return Err(ProfileError::NonPositiveCount {
            what: "segments (at least 3)",
        });
    }
    Ok(())
}
