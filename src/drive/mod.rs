//! Drive topologies and their shared kinematic contract.
//!
//! Every topology owns a validated configuration and a small kinematic state.
//! Output angles are re-derived from the accumulated input angle on every step
//! rather than integrated on their own, so the whole model is quasi-static.
//!
//! ```text
//! input w, dt ──► step() ──► input angle ──(× ratio)──► output angle
//! input T, w  ──► port_values() ──► {input, output, fixed} × (torque, w)
//! config      ──► profiles()    ──► {part → Profile}
//! ```

pub mod cycloidal;
pub mod harmonic;
pub mod planetary;

pub use cycloidal::{CycloidalConfig, CycloidalDrive};
pub use harmonic::{HarmonicConfig, HarmonicDrive};
pub use planetary::{PlanetaryConfig, PlanetaryDrive};

use crate::errors::{ConfigError, ProfileError};
use crate::float_types::Real;
use crate::profile::Profile;
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::str::FromStr;

/// Part outlines keyed by part.
pub type PartProfiles = BTreeMap<Part, Profile>;
/// Part poses keyed by part.
pub type PartPoses = BTreeMap<Part, Pose>;
/// Point placements (pins, bearing balls) in part-local coordinates.
pub type PartLayouts = BTreeMap<Part, Vec<Point2<Real>>>;
/// Port values keyed by role.
pub type PortMap = BTreeMap<PortRole, PortValue>;

/// The three supported reducer designs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopologyKind {
    Planetary,
    Harmonic,
    Cycloidal,
}

impl TopologyKind {
    pub const ALL: [TopologyKind; 3] = [Self::Planetary, Self::Harmonic, Self::Cycloidal];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Planetary => "planetary",
            Self::Harmonic => "harmonic",
            Self::Cycloidal => "cycloidal",
        }
    }
}

impl Display for TopologyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TopologyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown topology '{s}'"))
    }
}

/// Every mechanical part any topology can show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Part {
    Sun,
    /// Planet gear by index, `0..PLANET_COUNT`.
    Planet(u8),
    Ring,
    Carrier,
    WaveGenerator,
    Flexspline,
    CircularSpline,
    EccentricShaft,
    CycloidalDisc,
    PinWheel,
}

impl Part {
    /// Translation key of the part's display label.
    pub const fn label_key(self) -> &'static str {
        match self {
            Part::Sun => "sunGear",
            Part::Planet(_) => "planetGear",
            Part::Ring => "ringGear",
            Part::Carrier => "carrier",
            Part::WaveGenerator => "waveGen",
            Part::Flexspline => "flexspline",
            Part::CircularSpline => "circularSpline",
            Part::EccentricShaft => "eccentric",
            Part::CycloidalDisc => "cycloidDisc",
            Part::PinWheel => "pinWheel",
        }
    }
}

impl Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Part::Sun => f.write_str("sun"),
            Part::Planet(i) => write!(f, "planet-{i}"),
            Part::Ring => f.write_str("ring"),
            Part::Carrier => f.write_str("carrier"),
            Part::WaveGenerator => f.write_str("wave-generator"),
            Part::Flexspline => f.write_str("flexspline"),
            Part::CircularSpline => f.write_str("circular-spline"),
            Part::EccentricShaft => f.write_str("eccentric-shaft"),
            Part::CycloidalDisc => f.write_str("cycloidal-disc"),
            Part::PinWheel => f.write_str("pin-wheel"),
        }
    }
}

/// Mechanical role of a port.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortRole {
    Input,
    Output,
    Fixed,
}

/// Torque and angular velocity at one port.
///
/// `torque` is `None` where the lossless model leaves the reaction torque implied
/// by equilibrium instead of computing it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PortValue {
    #[serde(serialize_with = "serialize_part")]
    pub part: Part,
    pub torque: Option<Real>,
    pub angular_velocity: Real,
}

impl PortValue {
    pub const fn new(part: Part, torque: Option<Real>, angular_velocity: Real) -> Self {
        Self {
            part,
            torque,
            angular_velocity,
        }
    }

    /// A fixed reaction member: never moves.
    pub const fn fixed(part: Part, torque: Option<Real>) -> Self {
        Self::new(part, torque, 0.0)
    }

    /// Same port with its torque multiplied by `factor`.
    pub fn scale_torque(self, factor: Real) -> Self {
        Self {
            torque: self.torque.map(|t| t * factor),
            ..self
        }
    }
}

fn serialize_part<S: serde::Serializer>(part: &Part, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(part)
}

/// Rotation about the part's own centre followed by an optional translation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Pose {
    pub angle: Real,
    pub offset: Option<Vector2<Real>>,
}

impl Pose {
    pub const IDENTITY: Pose = Pose::rotation(0.0);

    pub const fn rotation(angle: Real) -> Self {
        Self {
            angle,
            offset: None,
        }
    }

    pub const fn new(angle: Real, offset: Vector2<Real>) -> Self {
        Self {
            angle,
            offset: Some(offset),
        }
    }

    /// Maps a part-local point into the drive frame.
    pub fn apply_point(&self, point: &Point2<Real>) -> Point2<Real> {
        let (s, c) = self.angle.sin_cos();
        let rotated = Point2::new(c * point.x - s * point.y, s * point.x + c * point.y);
        rotated + self.offset.unwrap_or_else(Vector2::zeros)
    }

    /// Places a part-local profile into the drive frame.
    pub fn apply(&self, profile: &Profile) -> Profile {
        profile.transformed(self.angle, self.offset.unwrap_or_else(Vector2::zeros))
    }
}

/// Human-readable ratio strings, e.g. `1:3.00` and `1:4.00`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RatioSummary {
    pub gear_ratio: Option<String>,
    pub reduction: String,
}

impl Display for RatioSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(gear_ratio) = &self.gear_ratio {
            write!(f, "gear ratio {gear_ratio}, ")?;
        }
        write!(f, "reduction {}", self.reduction)
    }
}

/// Kinematic contract shared by all topologies.
pub trait Drive: Clone {
    type Config: Clone + PartialEq;

    const KIND: TopologyKind;

    fn config(&self) -> &Self::Config;

    /// Checks a candidate configuration against the topology's legality rules.
    fn check(config: &Self::Config) -> Result<(), ConfigError>;

    fn validate(config: &Self::Config) -> bool {
        Self::check(config).is_ok()
    }

    /// Replaces the configuration. Callers have already validated it.
    fn replace_config(&mut self, config: Self::Config);

    /// Zeroes every angle.
    fn reset(&mut self);

    /// Applies `config` if it is legal.
    ///
    /// An illegal configuration leaves configuration and state untouched. A legal but
    /// different configuration resets the state; re-applying the current one is a no-op.
    fn apply_config(&mut self, config: Self::Config) -> Result<(), ConfigError> {
        Self::check(&config)?;
        if &config != self.config() {
            self.replace_config(config);
            self.reset();
        }
        Ok(())
    }

    /// Output angular velocity divided by input angular velocity.
    fn ratio(&self) -> Real;

    /// Reduction magnitude shown to the user as `1:reduction`.
    fn reduction(&self) -> Real;

    /// Accumulated input angle (radians).
    fn input_angle(&self) -> Real;

    /// Advances the input member by `input_angular_velocity * dt` (rad/s, s) and
    /// re-derives every dependent angle.
    fn step(&mut self, input_angular_velocity: Real, dt: Real);

    /// Lossless torque and speed at each port for the given input.
    ///
    /// Angular velocities come back in whatever unit `input_angular_velocity` uses.
    fn port_values(&self, input_torque: Real, input_angular_velocity: Real) -> PortMap;

    fn profiles(&self) -> Result<PartProfiles, ProfileError>;

    fn poses(&self) -> PartPoses;

    fn layouts(&self) -> Result<PartLayouts, ProfileError> {
        Ok(PartLayouts::new())
    }

    fn ratio_summary(&self) -> RatioSummary;
}

/// Configuration for any topology, tagged by topology name when serialized.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "topology", rename_all = "lowercase")]
pub enum DriveConfig {
    Planetary(PlanetaryConfig),
    Harmonic(HarmonicConfig),
    Cycloidal(CycloidalConfig),
}

impl DriveConfig {
    pub const fn kind(&self) -> TopologyKind {
        match self {
            DriveConfig::Planetary(_) => TopologyKind::Planetary,
            DriveConfig::Harmonic(_) => TopologyKind::Harmonic,
            DriveConfig::Cycloidal(_) => TopologyKind::Cycloidal,
        }
    }
}

impl From<PlanetaryConfig> for DriveConfig {
    fn from(config: PlanetaryConfig) -> Self {
        DriveConfig::Planetary(config)
    }
}

impl From<HarmonicConfig> for DriveConfig {
    fn from(config: HarmonicConfig) -> Self {
        DriveConfig::Harmonic(config)
    }
}

impl From<CycloidalConfig> for DriveConfig {
    fn from(config: CycloidalConfig) -> Self {
        DriveConfig::Cycloidal(config)
    }
}

/// The active drive, dispatched by topology.
#[derive(Clone, Debug)]
pub enum DriveTopology {
    Planetary(PlanetaryDrive),
    Harmonic(HarmonicDrive),
    Cycloidal(CycloidalDrive),
}

macro_rules! dispatch {
    ($self:expr, $drive:ident => $body:expr) => {
        match $self {
            DriveTopology::Planetary($drive) => $body,
            DriveTopology::Harmonic($drive) => $body,
            DriveTopology::Cycloidal($drive) => $body,
        }
    };
}

impl DriveTopology {
    /// A fresh drive of `kind` in its default configuration, all angles zero.
    pub fn new(kind: TopologyKind, eccentricity: Real) -> Self {
        match kind {
            TopologyKind::Planetary => Self::Planetary(PlanetaryDrive::default()),
            TopologyKind::Harmonic => Self::Harmonic(HarmonicDrive::default()),
            TopologyKind::Cycloidal => {
                Self::Cycloidal(CycloidalDrive::default().with_eccentricity(eccentricity))
            },
        }
    }

    pub const fn kind(&self) -> TopologyKind {
        match self {
            Self::Planetary(_) => PlanetaryDrive::KIND,
            Self::Harmonic(_) => HarmonicDrive::KIND,
            Self::Cycloidal(_) => CycloidalDrive::KIND,
        }
    }

    pub fn config(&self) -> DriveConfig {
        match self {
            Self::Planetary(d) => DriveConfig::Planetary(*d.config()),
            Self::Harmonic(d) => DriveConfig::Harmonic(*d.config()),
            Self::Cycloidal(d) => DriveConfig::Cycloidal(*d.config()),
        }
    }

    pub fn check(&self, config: &DriveConfig) -> Result<(), ConfigError> {
        match (self, config) {
            (Self::Planetary(_), DriveConfig::Planetary(c)) => PlanetaryDrive::check(c),
            (Self::Harmonic(_), DriveConfig::Harmonic(c)) => HarmonicDrive::check(c),
            (Self::Cycloidal(_), DriveConfig::Cycloidal(c)) => CycloidalDrive::check(c),
            _ => Err(ConfigError::TopologyMismatch {
                active: self.kind(),
                given: config.kind(),
            }),
        }
    }

    pub fn validate(&self, config: &DriveConfig) -> bool {
        self.check(config).is_ok()
    }

    pub fn apply_config(&mut self, config: DriveConfig) -> Result<(), ConfigError> {
        match (self, config) {
            (Self::Planetary(d), DriveConfig::Planetary(c)) => d.apply_config(c),
            (Self::Harmonic(d), DriveConfig::Harmonic(c)) => d.apply_config(c),
            (Self::Cycloidal(d), DriveConfig::Cycloidal(c)) => d.apply_config(c),
            (this, config) => Err(ConfigError::TopologyMismatch {
                active: this.kind(),
                given: config.kind(),
            }),
        }
    }

    pub fn ratio(&self) -> Real {
        dispatch!(self, d => d.ratio())
    }

    pub fn reduction(&self) -> Real {
        dispatch!(self, d => d.reduction())
    }

    pub fn input_angle(&self) -> Real {
        dispatch!(self, d => d.input_angle())
    }

    pub fn step(&mut self, input_angular_velocity: Real, dt: Real) {
        dispatch!(self, d => d.step(input_angular_velocity, dt))
    }

    pub fn port_values(&self, input_torque: Real, input_angular_velocity: Real) -> PortMap {
        dispatch!(self, d => d.port_values(input_torque, input_angular_velocity))
    }

    pub fn profiles(&self) -> Result<PartProfiles, ProfileError> {
        dispatch!(self, d => d.profiles())
    }

    pub fn poses(&self) -> PartPoses {
        dispatch!(self, d => d.poses())
    }

    pub fn layouts(&self) -> Result<PartLayouts, ProfileError> {
        dispatch!(self, d => d.layouts())
    }

    pub fn ratio_summary(&self) -> RatioSummary {
        dispatch!(self, d => d.ratio_summary())
    }
}

pub(crate) fn ensure_module(module: Real) -> Result<(), ConfigError> {
    if !(module.is_finite() && module > 0.0) {
        return Err(ConfigError::InvalidModule(module));
    }
    Ok(())
}
