//! Cycloidal drive: eccentric shaft input, wobbling disc output, pin wheel fixed.
//!
//! With `k = D / (P - D)` the disc turns at `-1/(k + 1)` of the shaft speed and
//! carries `k + 1` times the input torque. Its centre orbits the drive axis at the
//! fixed eccentricity, in phase with the shaft.

use crate::drive::{
    Drive, Part, PartLayouts, PartPoses, PartProfiles, PortMap, PortRole, PortValue, Pose,
    RatioSummary, TopologyKind, ensure_module,
};
use crate::errors::{ConfigError, ProfileError};
use crate::float_types::Real;
use crate::profile::shapes::{CIRCLE_SEGMENTS, MAX_COUNT};
use crate::profile::{Profile, pin_layout};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Smallest legal lobe count.
pub const MIN_LOBES: u32 = 5;

/// Default centre offset of the disc.
pub const DEFAULT_ECCENTRICITY: Real = 0.5;

// Part proportions relative to the pin circle radius.
const DISC_RADIUS_RATIO: Real = 0.8;
const PIN_WHEEL_HALF_WIDTH: Real = 0.08;
const SHAFT_RADIUS_RATIO: Real = 0.15;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CycloidalConfig {
    pub lobes: u32,
    pub pins: u32,
    #[serde(default = "CycloidalConfig::default_module")]
    pub module: Real,
}

impl Default for CycloidalConfig {
    fn default() -> Self {
        Self::new(10, 11)
    }
}

impl CycloidalConfig {
    pub const fn new(lobes: u32, pins: u32) -> Self {
        Self {
            lobes,
            pins,
            module: Self::default_module(),
        }
    }

    pub const fn with_module(mut self, module: Real) -> Self {
        self.module = module;
        self
    }

    const fn default_module() -> Real {
        1.0
    }

    /// Pin circle radius.
    pub fn radius(&self) -> Real {
        self.module * self.lobes as Real
    }

    /// `k = D / (P - D)`.
    pub fn k(&self) -> Real {
        self.lobes as Real / (self.pins as Real - self.lobes as Real)
    }
}

#[derive(Clone, Debug)]
pub struct CycloidalDrive {
    config: CycloidalConfig,
    eccentricity: Real,
    ecc_angle: Real,
    disc_angle: Real,
}

impl Default for CycloidalDrive {
    fn default() -> Self {
        Self {
            config: CycloidalConfig::default(),
            eccentricity: DEFAULT_ECCENTRICITY,
            ecc_angle: 0.0,
            disc_angle: 0.0,
        }
    }
}

impl CycloidalDrive {
    pub fn new(config: CycloidalConfig) -> Result<Self, ConfigError> {
        Self::check(&config)?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    pub const fn with_eccentricity(mut self, eccentricity: Real) -> Self {
        self.eccentricity = eccentricity;
        self
    }

    pub const fn eccentricity(&self) -> Real {
        self.eccentricity
    }

    pub const fn eccentric_angle(&self) -> Real {
        self.ecc_angle
    }

    pub const fn disc_angle(&self) -> Real {
        self.disc_angle
    }

    /// Disc centre, `e·(cos θ, sin θ)` for shaft angle `θ`.
    pub fn disc_offset(&self) -> Vector2<Real> {
        let (s, c) = self.ecc_angle.sin_cos();
        Vector2::new(c, s) * self.eccentricity
    }
}

impl Drive for CycloidalDrive {
    type Config = CycloidalConfig;

    const KIND: TopologyKind = TopologyKind::Cycloidal;

    fn config(&self) -> &CycloidalConfig {
        &self.config
    }

    fn check(config: &CycloidalConfig) -> Result<(), ConfigError> {
        let CycloidalConfig {
            lobes,
            pins,
            module,
        } = *config;
        if lobes < MIN_LOBES || pins <= lobes || pins > MAX_COUNT {
            return Err(ConfigError::InvalidCycloidal { lobes, pins });
        }
        ensure_module(module)
    }

    fn replace_config(&mut self, config: CycloidalConfig) {
        self.config = config;
    }

    fn reset(&mut self) {
        self.ecc_angle = 0.0;
        self.disc_angle = 0.0;
    }

    fn ratio(&self) -> Real {
        -1.0 / (self.config.k() + 1.0)
    }

    fn reduction(&self) -> Real {
        self.config.k() + 1.0
    }

    fn input_angle(&self) -> Real {
        self.ecc_angle
    }

    fn step(&mut self, input_angular_velocity: Real, dt: Real) {
        self.ecc_angle += input_angular_velocity * dt;
        self.disc_angle = -self.ecc_angle / (self.config.k() + 1.0);
    }

    fn port_values(&self, input_torque: Real, input_angular_velocity: Real) -> PortMap {
        let k1 = self.config.k() + 1.0;
        PortMap::from([
            (
                PortRole::Input,
                PortValue::new(
                    Part::EccentricShaft,
                    Some(input_torque),
                    input_angular_velocity,
                ),
            ),
            (
                PortRole::Output,
                PortValue::new(
                    Part::CycloidalDisc,
                    Some(input_torque * k1),
                    -input_angular_velocity / k1,
                ),
            ),
            (PortRole::Fixed, PortValue::fixed(Part::PinWheel, None)),
        ])
    }

    fn profiles(&self) -> Result<PartProfiles, ProfileError> {
        let radius = self.config.radius();
        let mut parts = PartProfiles::new();
        parts.insert(
            Part::CycloidalDisc,
            Profile::cycloidal_disc_outline(self.config.lobes, radius * DISC_RADIUS_RATIO)?,
        );
        parts.insert(
            Part::PinWheel,
            Profile::annulus(
                radius * (1.0 - PIN_WHEEL_HALF_WIDTH),
                radius * (1.0 + PIN_WHEEL_HALF_WIDTH),
                CIRCLE_SEGMENTS,
            )?,
        );
        parts.insert(
            Part::EccentricShaft,
            Profile::circle(radius * SHAFT_RADIUS_RATIO, CIRCLE_SEGMENTS)?,
        );
        Ok(parts)
    }

    fn poses(&self) -> PartPoses {
        PartPoses::from([
            (Part::EccentricShaft, Pose::rotation(self.ecc_angle)),
            (
                Part::CycloidalDisc,
                Pose::new(self.disc_angle, self.disc_offset()),
            ),
            (Part::PinWheel, Pose::IDENTITY),
        ])
    }

    fn layouts(&self) -> Result<PartLayouts, ProfileError> {
        let pins = pin_layout(self.config.pins, self.config.radius())?;
        Ok(PartLayouts::from([(Part::PinWheel, pins)]))
    }

    fn ratio_summary(&self) -> RatioSummary {
        RatioSummary {
            gear_ratio: None,
            reduction: format!("1:{:.1}", self.reduction()),
        }
    }
}
