//! Export of profiles and live drive snapshots.

#[cfg(feature = "svg-io")]
pub mod svg;

#[cfg(feature = "svg-io")]
pub use self::svg::ToSVG;
