use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use validator::Validate;

use crate::domain::{Appliance, Ev, Household, OutageWindow, PriceForecast};
use crate::error::ScheduleError;

/// Tunable objective weights.
///
/// Defaults match the community pilot calibration; production deployments
/// override them via config or per request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
pub struct Weights {
    /// Weight on total energy cost (grid purchases + battery wear).
    #[validate(range(min = 0.0))]
    pub alpha: f64,
    /// Weight on the community peak load (peak shaving).
    #[validate(range(min = 0.0))]
    pub beta: f64,
    /// Battery wear penalty per kWh of charge/discharge throughput.
    #[validate(range(min = 0.0))]
    pub degradation_cost: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            beta: 0.5,
            degradation_cost: 0.05,
        }
    }
}

/// EV charger hardware limits and conversion efficiencies, shared by every
/// EV in the request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
pub struct EvLimits {
    #[validate(range(exclusive_min = 0.0))]
    pub charge_max_kw: f64,
    /// Zero disables discharging community-wide.
    #[validate(range(min = 0.0))]
    pub discharge_max_kw: f64,
    #[validate(range(exclusive_min = 0.0, max = 1.0))]
    pub charge_efficiency: f64,
    #[validate(range(exclusive_min = 0.0, max = 1.0))]
    pub discharge_efficiency: f64,
}

impl Default for EvLimits {
    fn default() -> Self {
        Self {
            charge_max_kw: 11.0,
            discharge_max_kw: 7.0,
            charge_efficiency: 0.9,
            discharge_efficiency: 0.9,
        }
    }
}

/// One complete optimization request.
///
/// All entities are caller-supplied and read-only for the duration of the
/// run; nothing is shared or mutated across concurrent runs.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OptimizeRequest {
    /// Number of slots in the planning horizon.
    pub horizon_slots: usize,
    /// Slot length in hours (1.0 for hourly slots).
    #[validate(range(exclusive_min = 0.0))]
    pub slot_duration_hours: f64,
    pub households: Vec<Household>,
    pub evs: Vec<Ev>,
    pub appliances: Vec<Appliance>,
    /// One non-negative price per slot.
    pub price_per_slot: PriceForecast,
    #[serde(default)]
    pub outage: Option<OutageWindow>,
    /// Explicit low-price mask; derived from `price_per_slot` when absent.
    #[serde(default)]
    pub low_price_slots: Option<Vec<bool>>,
    #[serde(default)]
    #[validate(nested)]
    pub weights: Option<Weights>,
    #[serde(default)]
    #[validate(nested)]
    pub ev_limits: Option<EvLimits>,
}

impl OptimizeRequest {
    pub fn weights(&self) -> Weights {
        self.weights.unwrap_or_default()
    }

    pub fn ev_limits(&self) -> EvLimits {
        self.ev_limits.unwrap_or_default()
    }

    /// The low-price mask the price-opt-in restriction runs against:
    /// caller-supplied if present, otherwise derived by thresholding the
    /// price forecast.
    pub fn low_price_mask(&self) -> Vec<bool> {
        match &self.low_price_slots {
            Some(mask) => mask.clone(),
            None => self.price_per_slot.low_price_mask(),
        }
    }
}

fn invalid(msg: impl Into<String>) -> ScheduleError {
    ScheduleError::InvalidInput(msg.into())
}

/// Validate a request before any model construction.
///
/// Scalar ranges are checked via the `Validate` derives above; everything
/// cross-referential (id resolution, horizon-shaped vectors, the outage
/// window) is checked here. The model is never built on invalid input.
pub fn validate_request(request: &OptimizeRequest) -> Result<(), ScheduleError> {
    request.validate()?;

    if request.horizon_slots == 0 {
        return Err(invalid("horizon must contain at least one slot"));
    }
    if request.price_per_slot.len() != request.horizon_slots {
        return Err(invalid(format!(
            "price vector has {} entries for a {}-slot horizon",
            request.price_per_slot.len(),
            request.horizon_slots
        )));
    }
    if request
        .price_per_slot
        .as_slice()
        .iter()
        .any(|p| !p.is_finite() || *p < 0.0)
    {
        return Err(invalid("prices must be finite and non-negative"));
    }
    if let Some(mask) = &request.low_price_slots {
        if mask.len() != request.horizon_slots {
            return Err(invalid(format!(
                "low-price mask has {} entries for a {}-slot horizon",
                mask.len(),
                request.horizon_slots
            )));
        }
    }

    if let Some(outage) = &request.outage {
        if outage.start_slot >= outage.end_slot {
            return Err(invalid("outage window is empty (start_slot >= end_slot)"));
        }
        if outage.end_slot > request.horizon_slots {
            return Err(invalid(format!(
                "outage ends at slot {} but the horizon has {} slots",
                outage.end_slot, request.horizon_slots
            )));
        }
        if outage.start_slot == 0 && request.evs.iter().any(|ev| ev.soc_emergency > 0.0) {
            return Err(invalid(
                "outage starting at slot 0 leaves no slot to reach the emergency state of charge",
            ));
        }
    }

    let appliance_ids: HashSet<u32> = request.appliances.iter().map(|a| a.id).collect();
    if appliance_ids.len() != request.appliances.len() {
        return Err(invalid("duplicate appliance id in catalog"));
    }
    for appliance in &request.appliances {
        if !appliance.power_kw.is_finite() || appliance.power_kw < 0.0 {
            return Err(invalid(format!(
                "appliance {} has a non-finite or negative power draw",
                appliance.id
            )));
        }
    }
    let evs_by_id: HashMap<u32, &Ev> = request.evs.iter().map(|ev| (ev.id, ev)).collect();
    if evs_by_id.len() != request.evs.len() {
        return Err(invalid("duplicate EV id"));
    }
    let households_by_id: HashMap<u32, &Household> =
        request.households.iter().map(|h| (h.id, h)).collect();
    if households_by_id.len() != request.households.len() {
        return Err(invalid("duplicate household id"));
    }

    for household in &request.households {
        for &appliance_id in &household.appliances {
            if !appliance_ids.contains(&appliance_id) {
                return Err(ScheduleError::UnknownAppliance {
                    household_id: household.id,
                    appliance_id,
                });
            }
        }
        if !household.essentials_are_owned() {
            return Err(invalid(format!(
                "household {} marks an appliance essential that it does not own",
                household.id
            )));
        }
        for &ev_id in &household.evs {
            match evs_by_id.get(&ev_id) {
                Some(ev) if ev.household_id == household.id => {}
                Some(_) => {
                    return Err(invalid(format!(
                        "household {} lists EV {} owned by another household",
                        household.id, ev_id
                    )))
                }
                None => {
                    return Err(invalid(format!(
                        "household {} references unknown EV {}",
                        household.id, ev_id
                    )))
                }
            }
        }
    }

    for ev in &request.evs {
        match households_by_id.get(&ev.household_id) {
            Some(household) if household.owns_ev(ev.id) => {}
            Some(_) => {
                return Err(invalid(format!(
                    "EV {} is not listed by its household {}",
                    ev.id, ev.household_id
                )))
            }
            None => {
                return Err(invalid(format!(
                    "EV {} references unknown household {}",
                    ev.id, ev.household_id
                )))
            }
        }

        if !(ev.battery_capacity_kwh.is_finite() && ev.battery_capacity_kwh > 0.0) {
            return Err(invalid(format!("EV {} has a non-positive capacity", ev.id)));
        }
        let fractions = [ev.soc_min, ev.soc_max, ev.soc_initial, ev.soc_emergency];
        if fractions.iter().any(|f| !f.is_finite() || *f < 0.0 || *f > 1.0) {
            return Err(invalid(format!(
                "EV {} has a SoC fraction outside [0, 1]",
                ev.id
            )));
        }
        if !(ev.soc_min <= ev.soc_initial && ev.soc_initial <= ev.soc_max) {
            return Err(invalid(format!(
                "EV {} violates soc_min <= soc_initial <= soc_max",
                ev.id
            )));
        }
    }

    Ok(())
}
