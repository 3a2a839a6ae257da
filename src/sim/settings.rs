//! Start-up settings for a [`SimulationController`](crate::sim::SimulationController).

use crate::drive::TopologyKind;
use crate::drive::cycloidal::DEFAULT_ECCENTRICITY;
use crate::errors::SettingsError;
use crate::float_types::Real;
use crate::i18n::Language;
use crate::sim::clock::{DEFAULT_TICK_RATE_HZ, TickClock};
use crate::sim::units::TorqueUnit;
use serde::{Deserialize, Serialize};

/// Every field is optional in JSON and falls back to its default.
///
/// ```
/// use gearsim::sim::SimulationSettings;
/// let settings = SimulationSettings::from_json_str(r#"{ "topology": "harmonic" }"#).unwrap();
/// assert_eq!(settings.input_speed, 60.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    pub topology: TopologyKind,
    /// Input speed in degrees per second.
    pub input_speed: Real,
    /// Input torque in `unit`.
    pub input_torque: Real,
    pub unit: TorqueUnit,
    pub tick_rate_hz: Real,
    /// Integrate wall-clock time between ticks instead of assuming `tick_rate_hz`.
    pub measure_elapsed_time: bool,
    pub eccentricity: Real,
    pub language: Language,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            topology: TopologyKind::Planetary,
            input_speed: 60.0,
            input_torque: 10.0,
            unit: TorqueUnit::NewtonMetre,
            tick_rate_hz: DEFAULT_TICK_RATE_HZ,
            measure_elapsed_time: false,
            eccentricity: DEFAULT_ECCENTRICITY,
            language: Language::Korean,
        }
    }
}

impl SimulationSettings {
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.tick_rate_hz.is_finite() && self.tick_rate_hz > 0.0) {
            return Err(SettingsError::InvalidTickRate(self.tick_rate_hz));
        }
        if !(self.eccentricity.is_finite() && self.eccentricity >= 0.0) {
            return Err(SettingsError::InvalidEccentricity(self.eccentricity));
        }
        Ok(())
    }

    pub fn clock(&self) -> TickClock {
        if self.measure_elapsed_time {
            TickClock::measured(self.tick_rate_hz)
        } else {
            TickClock::fixed(self.tick_rate_hz)
        }
    }
}
