//! Scalar type selection, vertex tolerance and angle constants.

// Scalar type used by every profile, angle and port value:
#[cfg(feature = "f32")]
pub type Real = f32;
#[cfg(feature = "f64")]
pub type Real = f64;

use core::str::FromStr;
use std::sync::OnceLock;

/// Distance below which two consecutive profile vertices count as one point.
/// [`Profile`](crate::profile::Profile) construction collapses such runs so no
/// ring carries zero-length edges.
/// Defaults depend on precision (`f32` vs `f64`), but can be overridden:
///  1) **Build-time**: set env var `GEARSIM_TOLERANCE` (e.g. `GEARSIM_TOLERANCE=1e-6 cargo build`)
///  2) **Runtime**: call [`set_tolerance`] once before using the library
static TOLERANCE_CELL: OnceLock<Real> = OnceLock::new();

#[inline]
const fn default_tolerance() -> Real {
    #[cfg(feature = "f32")]
    {
        1e-4
    }
    #[cfg(feature = "f64")]
    {
        1e-6
    }
}

/// The vertex-merge distance in effect.
///
/// The first call fixes it: an earlier [`set_tolerance`] wins, then a valid
/// `GEARSIM_TOLERANCE` captured at build time, then the precision default.
pub fn tolerance() -> Real {
    *TOLERANCE_CELL.get_or_init(|| {
        option_env!("GEARSIM_TOLERANCE")
            .and_then(|text| Real::from_str(text).ok())
            .filter(|value| value.is_finite())
            .map_or_else(default_tolerance, |value| value.max(Real::EPSILON))
    })
}

/// Overrides the vertex-merge distance. Only effective before the first profile
/// is built; later calls are ignored.
pub fn set_tolerance(value: Real) {
    let _ = TOLERANCE_CELL.set(value.max(Real::EPSILON));
}

// Pi
/// Archimedes' constant (π)
#[cfg(feature = "f32")]
pub const PI: Real = core::f32::consts::PI;
/// Archimedes' constant (π)
#[cfg(feature = "f64")]
pub const PI: Real = core::f64::consts::PI;

// Frac Pi 2
/// π/2
#[cfg(feature = "f32")]
pub const FRAC_PI_2: Real = core::f32::consts::FRAC_PI_2;
/// π/2
#[cfg(feature = "f64")]
pub const FRAC_PI_2: Real = core::f64::consts::FRAC_PI_2;

// Tau
/// The full circle constant (τ)
#[cfg(feature = "f32")]
pub const TAU: Real = core::f32::consts::TAU;
/// The full circle constant (τ)
#[cfg(feature = "f64")]
pub const TAU: Real = core::f64::consts::TAU;

// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
// Angle conversion
// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
pub const DEG_TO_RAD: Real = PI / 180.0;
pub const RAD_TO_DEG: Real = 180.0 / PI;
