//! Error types for profile generation, drive configuration and persistence.

use crate::drive::TopologyKind;
use crate::float_types::Real;

/// All the reasons a profile can be refused by the generator
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileError {
    /// (NonPositiveCount) A tooth, lobe, pin or segment count was zero
    #[error("(NonPositiveCount) {what} must be positive")]
    NonPositiveCount { what: &'static str },
    /// (CountTooLarge) A tooth, lobe, pin or segment count exceeds the generator limit
    #[error("(CountTooLarge) {what} is {count}, above the limit of {max}")]
    CountTooLarge { what: &'static str, count: u32, max: u32 },
    /// (NonPositiveRadius) A radius was zero, negative or not finite
    #[error("(NonPositiveRadius) {what} must be positive, got {value}")]
    NonPositiveRadius { what: &'static str, value: Real },
    /// (HoleOutsideShell) A bore reaches the outer boundary
    #[error("(HoleOutsideShell) hole radius {hole} does not fit inside minimum outer radius {shell}")]
    HoleOutsideShell { hole: Real, shell: Real },
    /// (RingOverlap) A ring's outer boundary does not clear its bore
    #[error("(RingOverlap) outer boundary at radius {outer} must clear the bore's maximum radius {bore}")]
    RingOverlap { outer: Real, bore: Real },
    /// (ArmTooWide) A plate's arm is at least as wide as it is long
    #[error("(ArmTooWide) arm width {width} must be less than span {span}")]
    ArmTooWide { width: Real, span: Real },
}

/// A proposed drive configuration that cannot take effect
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid planetary teeth: sun {sun}, ring {ring} (need sun >= 5, ring >= sun, even difference, ring <= 10000)")]
    InvalidPlanetary { sun: u32, ring: u32 },
    #[error("invalid harmonic teeth: flexspline {flex}, circular {circular} (need flexspline >= 50, circular > flexspline, circular <= 10000)")]
    InvalidHarmonic { flex: u32, circular: u32 },
    #[error("invalid cycloidal counts: lobes {lobes}, pins {pins} (need lobes >= 5, pins > lobes, pins <= 10000)")]
    InvalidCycloidal { lobes: u32, pins: u32 },
    #[error("module must be positive, got {0}")]
    InvalidModule(Real),
    #[error("configuration for {given} cannot be applied to the active {active} drive")]
    TopologyMismatch { active: TopologyKind, given: TopologyKind },
    #[error("profile generation failed: {0}")]
    Profile(#[from] ProfileError),
}

impl ConfigError {
    /// Translation key of the user-facing alert for this error.
    pub const fn message_key(&self) -> &'static str {
        match self {
            ConfigError::InvalidPlanetary { .. } => "alertInvalidTeeth",
            ConfigError::InvalidHarmonic { .. } => "alertInvalidFlex",
            ConfigError::InvalidCycloidal { .. } => "alertInvalidCycloidal",
            ConfigError::InvalidModule(_) | ConfigError::Profile(_) => "alertInvalidTeeth",
            ConfigError::TopologyMismatch { .. } => "alertTopologyMismatch",
        }
    }
}

/// Failure to read simulation settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("tick rate must be positive, got {0}")]
    InvalidTickRate(Real),
    #[error("eccentricity must be finite and non-negative, got {0}")]
    InvalidEccentricity(Real),
}

/// Failure to load or save a persisted preference
#[derive(Debug, thiserror::Error)]
pub enum PreferenceError {
    #[error("preference store I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
