use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An optimal community schedule extracted from a solved model.
///
/// Only built from an OPTIMAL solver outcome; infeasibility and solver
/// failures surface as `ScheduleError` instead of a partial result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub id: Uuid,
    pub computed_at: DateTime<Utc>,
    /// Objective value: weighted energy cost + battery wear + peak penalty.
    pub total_cost: f64,
    /// Highest simultaneous community draw (households + EV charging, kW).
    pub peak_load_kw: f64,
    pub per_ev: Vec<EvSchedule>,
    /// Community-wide EV charging power per slot.
    pub community_load: Vec<CommunityLoadPoint>,
}

/// Per-EV time series of the solved schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvSchedule {
    pub ev_id: u32,
    pub household_id: u32,
    pub per_slot: Vec<EvSlotPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvSlotPoint {
    pub slot: usize,
    pub soc_kwh: f64,
    pub charge_kw: f64,
    pub discharge_kw: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommunityLoadPoint {
    pub slot: usize,
    pub ev_charging_kw: f64,
}

impl EvSchedule {
    pub fn soc_series(&self) -> Vec<f64> {
        self.per_slot.iter().map(|p| p.soc_kwh).collect()
    }

    /// Net battery power per slot: charge minus discharge (kW).
    pub fn net_power_series(&self) -> Vec<f64> {
        self.per_slot
            .iter()
            .map(|p| p.charge_kw - p.discharge_kw)
            .collect()
    }
}
