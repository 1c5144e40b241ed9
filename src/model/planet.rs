//! Planets the probe can visit and the readings taken on arrival.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// A destination. The set is closed: every planet has exactly one reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Planet {
    Mars,
    Jupiter,
    Saturn,
}

/// Fixed environmental telemetry associated with a planet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetReading {
    pub temperature: f64,
    pub radiation: f64,
    pub magnetic_field: f64,
}

/// A planet name that is not part of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown planet: {0}")]
pub struct UnknownPlanet(pub String);

impl Planet {
    /// Every planet, in menu order.
    pub const ALL: [Planet; 3] = [Planet::Mars, Planet::Jupiter, Planet::Saturn];

    /// The reading the probe records on arrival.
    pub fn reading(self) -> PlanetReading {
        match self {
            Self::Mars => PlanetReading {
                temperature: -60.0,
                radiation: 240.0,
                magnetic_field: 0.5,
            },
            Self::Jupiter => PlanetReading {
                temperature: -108.0,
                radiation: 50.0,
                magnetic_field: 428.0,
            },
            Self::Saturn => PlanetReading {
                temperature: -139.0,
                radiation: 20.0,
                magnetic_field: 21.0,
            },
        }
    }

    /// Maps a 1-based menu choice to a planet.
    pub fn from_choice(choice: i64) -> Option<Self> {
        match choice {
            1 => Some(Self::Mars),
            2 => Some(Self::Jupiter),
            3 => Some(Self::Saturn),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Mars => "Mars",
            Self::Jupiter => "Jupiter",
            Self::Saturn => "Saturn",
        }
    }
}

impl fmt::Display for Planet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts a planet name (case-insensitive) or its menu number.
impl FromStr for Planet {
    type Err = UnknownPlanet;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(choice) = s.parse::<i64>() {
            return Self::from_choice(choice).ok_or_else(|| UnknownPlanet(s.to_string()));
        }
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownPlanet(s.to_string()))
    }
}
