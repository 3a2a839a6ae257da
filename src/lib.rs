//! Kinematics and 2D part profiles for three gear-reducer topologies:
//! **planetary**, **harmonic** (strain-wave) and **cycloidal**.
//!
//! A [`SimulationController`](sim::SimulationController) owns exactly one active
//! drive. Each tick advances the input member and re-derives every other angle
//! from the reduction ratio; port torques and speeds follow from the lossless
//! ideal-gear relations. Part outlines are generated as [`Profile`]s (a
//! [`geo::Polygon`] underneath) and regenerated only when the configuration
//! changes.
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//! - **svg-io**: export profiles and posed drives as SVG
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64
//! - **wasm**: `wasm-bindgen` wrapper around the controller

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod drive;
pub mod errors;
pub mod float_types;
pub mod i18n;
pub mod io;
pub mod profile;
pub mod sim;

#[cfg(feature = "wasm")]
pub mod wasm;

#[cfg(any(
    all(feature = "f64", feature = "f32"),
    not(any(feature = "f64", feature = "f32"))
))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use drive::{Drive, DriveConfig, DriveTopology, Part, PortRole, TopologyKind};
pub use errors::{ConfigError, ProfileError};
pub use profile::Profile;
pub use sim::{SimulationController, SimulationSettings};
