//! Harmonic (strain-wave) drive: wave generator input, flexspline output,
//! circular spline fixed.

use crate::drive::{
    Drive, Part, PartLayouts, PartPoses, PartProfiles, PortMap, PortRole, PortValue, Pose,
    RatioSummary, TopologyKind, ensure_module,
};
use crate::errors::{ConfigError, ProfileError};
use crate::float_types::Real;
use crate::profile::shapes::{CIRCLE_SEGMENTS, MAX_COUNT};
use crate::profile::{Profile, pin_layout};
use serde::{Deserialize, Serialize};

/// Smallest legal flexspline tooth count.
pub const MIN_FLEX_TEETH: u32 = 50;

/// Ball bearings drawn between wave generator and flexspline.
pub const BEARING_COUNT: u32 = 20;

// Part proportions relative to the flexspline pitch radius.
const WAVE_MAJOR_RATIO: Real = 0.95;
const WAVE_MINOR_RATIO: Real = 0.85;
const FLEX_BORE_RATIO: Real = 0.75;
const BEARING_CIRCLE_RATIO: Real = 0.85;
const CIRCULAR_INNER_RATIO: Real = 1.05;
const CIRCULAR_RIM_RATIO: Real = 1.2;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HarmonicConfig {
    pub flex_teeth: u32,
    pub circular_teeth: u32,
    #[serde(default = "HarmonicConfig::default_module")]
    pub module: Real,
}

impl Default for HarmonicConfig {
    fn default() -> Self {
        Self::new(200, 202)
    }
}

impl HarmonicConfig {
    pub const fn new(flex_teeth: u32, circular_teeth: u32) -> Self {
        Self {
            flex_teeth,
            circular_teeth,
            module: Self::default_module(),
        }
    }

    pub const fn with_module(mut self, module: Real) -> Self {
        self.module = module;
        self
    }

    const fn default_module() -> Real {
        0.05
    }

    /// Flexspline pitch radius.
    pub fn radius(&self) -> Real {
        self.module * self.flex_teeth as Real / 2.0
    }
}

#[derive(Clone, Debug, Default)]
pub struct HarmonicDrive {
    config: HarmonicConfig,
    wave_angle: Real,
    flex_angle: Real,
}

impl HarmonicDrive {
    pub fn new(config: HarmonicConfig) -> Result<Self, ConfigError> {
        Self::check(&config)?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    pub const fn wave_angle(&self) -> Real {
        self.wave_angle
    }

    pub const fn flex_angle(&self) -> Real {
        self.flex_angle
    }
}

impl Drive for HarmonicDrive {
    type Config = HarmonicConfig;

    const KIND: TopologyKind = TopologyKind::Harmonic;

    fn config(&self) -> &HarmonicConfig {
        &self.config
    }

    fn check(config: &HarmonicConfig) -> Result<(), ConfigError> {
        let HarmonicConfig {
            flex_teeth: flex,
            circular_teeth: circular,
            module,
        } = *config;
        // a two-tooth difference is customary but not required
        if flex < MIN_FLEX_TEETH || circular <= flex || circular > MAX_COUNT {
            return Err(ConfigError::InvalidHarmonic { flex, circular });
        }
        ensure_module(module)
    }

    fn replace_config(&mut self, config: HarmonicConfig) {
        self.config = config;
    }

    fn reset(&mut self) {
        self.wave_angle = 0.0;
        self.flex_angle = 0.0;
    }

    /// `-F / (C - F)`: the flexspline turns against the wave generator.
    fn ratio(&self) -> Real {
        let f = self.config.flex_teeth as Real;
        let c = self.config.circular_teeth as Real;
        -f / (c - f)
    }

    fn reduction(&self) -> Real {
        self.ratio().abs()
    }

    fn input_angle(&self) -> Real {
        self.wave_angle
    }

    fn step(&mut self, input_angular_velocity: Real, dt: Real) {
        self.wave_angle += input_angular_velocity * dt;
        self.flex_angle = self.wave_angle * self.ratio();
    }

    fn port_values(&self, input_torque: Real, input_angular_velocity: Real) -> PortMap {
        let ratio = self.ratio();
        PortMap::from([
            (
                PortRole::Input,
                PortValue::new(
                    Part::WaveGenerator,
                    Some(input_torque),
                    input_angular_velocity,
                ),
            ),
            (
                PortRole::Output,
                PortValue::new(
                    Part::Flexspline,
                    Some(input_torque / ratio),
                    input_angular_velocity * ratio,
                ),
            ),
            (PortRole::Fixed, PortValue::fixed(Part::CircularSpline, None)),
        ])
    }

    fn profiles(&self) -> Result<PartProfiles, ProfileError> {
        let c = &self.config;
        let radius = c.radius();
        let circular_inner = radius * CIRCULAR_INNER_RATIO;

        let mut parts = PartProfiles::new();
        parts.insert(
            Part::WaveGenerator,
            Profile::ellipse(
                radius * WAVE_MAJOR_RATIO,
                radius * WAVE_MINOR_RATIO,
                CIRCLE_SEGMENTS,
            )?,
        );
        parts.insert(
            Part::Flexspline,
            Profile::gear_outline(c.flex_teeth, radius, radius * FLEX_BORE_RATIO)?,
        );
        parts.insert(
            Part::CircularSpline,
            Profile::ring_outline(
                c.circular_teeth,
                circular_inner,
                circular_inner * CIRCULAR_RIM_RATIO,
            )?,
        );
        Ok(parts)
    }

    fn poses(&self) -> PartPoses {
        PartPoses::from([
            (Part::WaveGenerator, Pose::rotation(self.wave_angle)),
            (Part::Flexspline, Pose::rotation(self.flex_angle)),
            (Part::CircularSpline, Pose::IDENTITY),
        ])
    }

    /// Bearing balls ride with the flexspline.
    fn layouts(&self) -> Result<PartLayouts, ProfileError> {
        let bearings = pin_layout(BEARING_COUNT, self.config.radius() * BEARING_CIRCLE_RATIO)?;
        Ok(PartLayouts::from([(Part::Flexspline, bearings)]))
    }

    fn ratio_summary(&self) -> RatioSummary {
        RatioSummary {
            gear_ratio: None,
            reduction: format!("1:{:.1}", self.reduction()),
        }
    }
}
