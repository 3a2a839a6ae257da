//! Torque display units and lenient numeric input parsing.

use crate::float_types::Real;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

/// Unit used for every displayed torque.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TorqueUnit {
    /// Newton metre, the base unit.
    #[default]
    #[serde(rename = "Nm")]
    NewtonMetre,
    /// Kilogram-force centimetre.
    #[serde(rename = "kgcm")]
    KilogramForceCentimetre,
    /// Pound-force foot.
    #[serde(rename = "lbft")]
    PoundForceFoot,
}

impl TorqueUnit {
    pub const ALL: [TorqueUnit; 3] = [
        Self::NewtonMetre,
        Self::KilogramForceCentimetre,
        Self::PoundForceFoot,
    ];

    /// Value of one newton metre expressed in this unit.
    pub const fn factor(self) -> Real {
        match self {
            Self::NewtonMetre => 1.0,
            Self::KilogramForceCentimetre => 10.197,
            Self::PoundForceFoot => 0.73756,
        }
    }

    /// Multiplier taking a torque in `self` to the same torque in `to`.
    pub fn conversion_to(self, to: TorqueUnit) -> Real {
        to.factor() / self.factor()
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            Self::NewtonMetre => "Nm",
            Self::KilogramForceCentimetre => "kgcm",
            Self::PoundForceFoot => "lbft",
        }
    }
}

impl Display for TorqueUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for TorqueUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|unit| unit.symbol().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown torque unit '{s}'"))
    }
}

/// Reads a user-entered number. Empty or malformed text counts as zero.
pub fn parse_lenient(text: &str) -> Real {
    text.trim()
        .parse::<Real>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}
