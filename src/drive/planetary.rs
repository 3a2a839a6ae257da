//! Planetary gear set: sun input, carrier output, ring fixed.
//!
//! # Ratio convention
//!
//! `ratio = w_carrier / w_sun = S / (S + R)`, so the reduction is `1 + R/S`.
//! Ideal torques are `T_carrier = T_sun·(1 + R/S)` and the ring reacts
//! `T_ring = T_sun·(R/S)`.

use crate::drive::{
    Drive, Part, PartPoses, PartProfiles, PortMap, PortRole, PortValue, Pose, RatioSummary,
    TopologyKind, ensure_module,
};
use crate::errors::{ConfigError, ProfileError};
use crate::float_types::{Real, TAU};
use crate::profile::Profile;
use crate::profile::shapes::MAX_COUNT;
use nalgebra::{Rotation2, Vector2};
use serde::{Deserialize, Serialize};

/// Number of planets, evenly spaced on the carrier.
pub const PLANET_COUNT: u8 = 3;

/// Smallest legal sun tooth count.
pub const MIN_SUN_TEETH: u32 = 5;

/// Bore of sun and planets as a fraction of their pitch radius.
const GEAR_BORE_RATIO: Real = 0.3;
/// Ring gear rim as a multiple of its pitch radius.
const RING_RIM_RATIO: Real = 1.2;
/// Carrier arm span and width as multiples of the carrier radius.
const CARRIER_SPAN_RATIO: Real = 2.2;
const CARRIER_ARM_RATIO: Real = 0.1;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanetaryConfig {
    pub sun_teeth: u32,
    pub ring_teeth: u32,
    #[serde(default = "PlanetaryConfig::default_module")]
    pub module: Real,
}

impl Default for PlanetaryConfig {
    fn default() -> Self {
        Self::new(20, 60)
    }
}

impl PlanetaryConfig {
    pub const fn new(sun_teeth: u32, ring_teeth: u32) -> Self {
        Self {
            sun_teeth,
            ring_teeth,
            module: Self::default_module(),
        }
    }

    pub const fn with_module(mut self, module: Real) -> Self {
        self.module = module;
        self
    }

    const fn default_module() -> Real {
        0.5
    }

    /// Derived planet tooth count `(R - S) / 2`.
    pub const fn planet_teeth(&self) -> u32 {
        self.ring_teeth.saturating_sub(self.sun_teeth) / 2
    }

    pub fn sun_radius(&self) -> Real {
        self.module * self.sun_teeth as Real / 2.0
    }

    pub fn planet_radius(&self) -> Real {
        self.module * self.planet_teeth() as Real / 2.0
    }

    pub fn ring_radius(&self) -> Real {
        self.module * self.ring_teeth as Real / 2.0
    }

    pub fn carrier_radius(&self) -> Real {
        (self.sun_radius() + self.ring_radius()) / 2.0
    }
}

/// Sun and carrier angles; planet angles are derived from them.
#[derive(Clone, Debug, Default)]
pub struct PlanetaryDrive {
    config: PlanetaryConfig,
    sun_angle: Real,
    carrier_angle: Real,
}

impl PlanetaryDrive {
    pub fn new(config: PlanetaryConfig) -> Result<Self, ConfigError> {
        Self::check(&config)?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    pub const fn sun_angle(&self) -> Real {
        self.sun_angle
    }

    pub const fn carrier_angle(&self) -> Real {
        self.carrier_angle
    }

    /// Spin of every planet relative to the carrier: `-(sun - carrier)·(S/P)`.
    /// Zero when the planets have no teeth.
    pub fn planet_angle(&self) -> Real {
        let planet_teeth = self.config.planet_teeth();
        if planet_teeth == 0 {
            return 0.0;
        }
        let relative = self.sun_angle - self.carrier_angle;
        -relative * (self.config.sun_teeth as Real / planet_teeth as Real)
    }

    /// Planet centre `index` in carrier coordinates.
    fn planet_centre(&self, index: u8) -> Vector2<Real> {
        let angle = TAU * index as Real / PLANET_COUNT as Real;
        let distance = self.config.sun_radius() + self.config.planet_radius();
        Vector2::new(distance * angle.cos(), distance * angle.sin())
    }
}

impl Drive for PlanetaryDrive {
    type Config = PlanetaryConfig;

    const KIND: TopologyKind = TopologyKind::Planetary;

    fn config(&self) -> &PlanetaryConfig {
        &self.config
    }

    fn check(config: &PlanetaryConfig) -> Result<(), ConfigError> {
        let PlanetaryConfig {
            sun_teeth: s,
            ring_teeth: r,
            module,
        } = *config;
        if s < MIN_SUN_TEETH || r < s || r > MAX_COUNT || (r - s) % 2 != 0 {
            return Err(ConfigError::InvalidPlanetary { sun: s, ring: r });
        }
        ensure_module(module)
    }

    fn replace_config(&mut self, config: PlanetaryConfig) {
        self.config = config;
    }

    fn reset(&mut self) {
        self.sun_angle = 0.0;
        self.carrier_angle = 0.0;
    }

    fn ratio(&self) -> Real {
        let s = self.config.sun_teeth as Real;
        let r = self.config.ring_teeth as Real;
        s / (s + r)
    }

    fn reduction(&self) -> Real {
        1.0 + self.config.ring_teeth as Real / self.config.sun_teeth as Real
    }

    fn input_angle(&self) -> Real {
        self.sun_angle
    }

    fn step(&mut self, input_angular_velocity: Real, dt: Real) {
        self.sun_angle += input_angular_velocity * dt;
        self.carrier_angle = self.sun_angle * self.ratio();
    }

    fn port_values(&self, input_torque: Real, input_angular_velocity: Real) -> PortMap {
        let torque_ratio = self.config.ring_teeth as Real / self.config.sun_teeth as Real;
        PortMap::from([
            (
                PortRole::Input,
                PortValue::new(Part::Sun, Some(input_torque), input_angular_velocity),
            ),
            (
                PortRole::Output,
                PortValue::new(
                    Part::Carrier,
                    Some(input_torque * (1.0 + torque_ratio)),
                    input_angular_velocity * self.ratio(),
                ),
            ),
            (
                PortRole::Fixed,
                PortValue::fixed(Part::Ring, Some(input_torque * torque_ratio)),
            ),
        ])
    }

    fn profiles(&self) -> Result<PartProfiles, ProfileError> {
        let c = &self.config;
        let sun_radius = c.sun_radius();
        let ring_radius = c.ring_radius();
        let carrier_radius = c.carrier_radius();

        let mut parts = PartProfiles::new();
        parts.insert(
            Part::Sun,
            Profile::gear_outline(c.sun_teeth, sun_radius, sun_radius * GEAR_BORE_RATIO)?,
        );
        parts.insert(
            Part::Ring,
            Profile::ring_outline(c.ring_teeth, ring_radius, ring_radius * RING_RIM_RATIO)?,
        );
        parts.insert(
            Part::Carrier,
            Profile::cross(
                carrier_radius * CARRIER_SPAN_RATIO,
                carrier_radius * CARRIER_ARM_RATIO,
            )?,
        );

        let planet_teeth = c.planet_teeth();
        if planet_teeth > 0 {
            let planet_radius = c.planet_radius();
            let planet =
                Profile::gear_outline(planet_teeth, planet_radius, planet_radius * GEAR_BORE_RATIO)?;
            for index in 0..PLANET_COUNT {
                parts.insert(Part::Planet(index), planet.clone());
            }
        }
        Ok(parts)
    }

    fn poses(&self) -> PartPoses {
        let mut poses = PartPoses::new();
        poses.insert(Part::Sun, Pose::rotation(self.sun_angle));
        poses.insert(Part::Ring, Pose::IDENTITY);
        poses.insert(Part::Carrier, Pose::rotation(self.carrier_angle));

        if self.config.planet_teeth() > 0 {
            let carrier = Rotation2::new(self.carrier_angle);
            let spin = self.carrier_angle + self.planet_angle();
            for index in 0..PLANET_COUNT {
                poses.insert(
                    Part::Planet(index),
                    Pose::new(spin, carrier * self.planet_centre(index)),
                );
            }
        }
        poses
    }

    fn ratio_summary(&self) -> RatioSummary {
        let r_over_s = self.config.ring_teeth as Real / self.config.sun_teeth as Real;
        RatioSummary {
            gear_ratio: Some(format!("1:{r_over_s:.2}")),
            reduction: format!("1:{:.2}", self.reduction()),
        }
    }
}
