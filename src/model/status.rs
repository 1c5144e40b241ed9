//! Probe status: the resources a mission spends.

use serde::Serialize;

/// Health lost per unit of fuel or energy spent.
const WEAR_PER_UNIT: f64 = 0.01;

/// The mutable resource triple tracked across a mission.
///
/// Values are not clamped and may go negative. Deciding what a depleted
/// probe means is left to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeStatus {
    pub fuel: f64,
    pub energy: f64,
    pub health: f64,
}

impl Default for ProbeStatus {
    fn default() -> Self {
        Self {
            fuel: 100.0,
            energy: 100.0,
            health: 100.0,
        }
    }
}

impl ProbeStatus {
    /// Returns the status after spending `fuel_used` and `energy_used` on a leg.
    ///
    /// Health degrades in proportion to the total spent.
    #[must_use]
    pub fn apply_travel_cost(self, fuel_used: f64, energy_used: f64) -> Self {
        Self {
            fuel: self.fuel - fuel_used,
            energy: self.energy - energy_used,
            health: self.health - (fuel_used + energy_used) * WEAR_PER_UNIT,
        }
    }

    /// A probe with no health left has malfunctioned.
    pub fn is_disabled(&self) -> bool {
        self.health <= 0.0
    }
}
