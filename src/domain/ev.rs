use serde::{Deserialize, Serialize};

/// An electric vehicle whose battery doubles as flexible community storage.
///
/// All `soc_*` fields are fractions of `battery_capacity_kwh`. The optimizer
/// reasons over kWh-scaled SoC trajectories; it never mutates a live EV.
/// Percentage-based representations are a presentation-layer concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ev {
    pub id: u32,
    /// Owning household.
    pub household_id: u32,
    pub battery_capacity_kwh: f64,
    /// Lowest SoC the battery may be driven to.
    pub soc_min: f64,
    /// Highest SoC the battery may be charged to.
    pub soc_max: f64,
    /// SoC at the start of the planning horizon.
    pub soc_initial: f64,
    /// SoC that must be reached before a scheduled outage begins.
    pub soc_emergency: f64,
    /// User override: false means an upcoming trip reserves the battery
    /// and the optimizer must never discharge it.
    pub available_for_discharge: bool,
}

impl Ev {
    pub fn min_energy_kwh(&self) -> f64 {
        self.soc_min * self.battery_capacity_kwh
    }

    pub fn max_energy_kwh(&self) -> f64 {
        self.soc_max * self.battery_capacity_kwh
    }

    pub fn initial_energy_kwh(&self) -> f64 {
        self.soc_initial * self.battery_capacity_kwh
    }

    pub fn emergency_energy_kwh(&self) -> f64 {
        self.soc_emergency * self.battery_capacity_kwh
    }
}
