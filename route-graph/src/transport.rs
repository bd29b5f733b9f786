use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A way of travelling between cities. Slower modes scale every distance up, faster ones scale it down.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Car,
    Bus,
    Plane,
}

impl TransportMode {
    pub const ALL: [TransportMode; 3] = [TransportMode::Car, TransportMode::Bus, TransportMode::Plane];

    /// The factor every base distance is multiplied with.
    pub fn coefficient(self) -> f64 {
        match self {
            TransportMode::Car => 1.0,
            TransportMode::Bus => 1.2,
            TransportMode::Plane => 0.5,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TransportMode::Car => "car",
            TransportMode::Bus => "bus",
            TransportMode::Plane => "plane",
        }
    }
}

impl Default for TransportMode {
    fn default() -> Self {
        TransportMode::Car
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown transport mode '{0}' (expected car, bus or plane)")]
pub struct ParseModeError(String);

impl FromStr for TransportMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        TransportMode::ALL
            .iter()
            .copied()
            .find(|mode| mode.name() == name)
            .ok_or_else(|| ParseModeError(s.to_string()))
    }
}
