//! MILP formulation of the community charging schedule.
//!
//! One request becomes one independent linear program: continuous grid,
//! charge, discharge and SoC variables per entity and slot, binary
//! charge/discharge mode switches, and an auxiliary peak variable tied to
//! the community load. The problem is handed to good_lp's default solver
//! (CBC) and the solution is read back into domain series.

use std::collections::HashMap;

use chrono::Utc;
use good_lp::{
    constraint, default_solver, variable, Expression, ProblemVariables, ResolutionError, Solution,
    SolverModel, Variable,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::ScheduleError;
use crate::optimizer::demand::{appliance_catalog, household_demand_kw};
use crate::optimizer::request::{validate_request, OptimizeRequest};
use crate::optimizer::result::{CommunityLoadPoint, EvSchedule, EvSlotPoint, OptimizationResult};

/// Build, solve and extract one schedule. Synchronous; owns its variable
/// and constraint set exclusively, so concurrent requests never interfere.
pub fn solve(request: &OptimizeRequest) -> Result<OptimizationResult, ScheduleError> {
    validate_request(request)?;

    let weights = request.weights();
    let limits = request.ev_limits();
    let horizon = request.horizon_slots;
    let dt = request.slot_duration_hours;
    let prices = request.price_per_slot.as_slice();
    let low_price = request.low_price_mask();
    let catalog = appliance_catalog(&request.appliances);
    let outage = request.outage.as_ref();

    let households = &request.households;
    let evs = &request.evs;
    let ev_index: HashMap<u32, usize> = evs.iter().enumerate().map(|(i, ev)| (ev.id, i)).collect();

    debug!(
        households = households.len(),
        evs = evs.len(),
        slots = horizon,
        "building community schedule model"
    );
    if let Some(window) = outage {
        debug!(
            start_slot = window.start_slot,
            slots = window.len_slots(),
            "outage window active"
        );
    }

    let mut vars = ProblemVariables::new();

    // grid[h][t]: power drawn from the grid by household h at slot t (kW)
    let grid: Vec<Vec<Variable>> = households
        .iter()
        .map(|household| {
            (0..horizon)
                .map(|t| {
                    vars.add(
                        variable()
                            .min(0.0)
                            .name(format!("grid_{}_{}", household.id, t)),
                    )
                })
                .collect()
        })
        .collect();

    // Per-EV variables: charge/discharge power, SoC trajectory, the binary
    // charge/discharge mode switch and the binary discharge gate.
    let mut charge: Vec<Vec<Variable>> = Vec::with_capacity(evs.len());
    let mut discharge: Vec<Vec<Variable>> = Vec::with_capacity(evs.len());
    let mut soc: Vec<Vec<Variable>> = Vec::with_capacity(evs.len());
    let mut mode: Vec<Vec<Variable>> = Vec::with_capacity(evs.len());
    let mut dischargeable: Vec<Vec<Variable>> = Vec::with_capacity(evs.len());
    for ev in evs {
        charge.push(
            (0..horizon)
                .map(|t| {
                    vars.add(
                        variable()
                            .min(0.0)
                            .max(limits.charge_max_kw)
                            .name(format!("charge_{}_{}", ev.id, t)),
                    )
                })
                .collect(),
        );
        discharge.push(
            (0..horizon)
                .map(|t| {
                    vars.add(
                        variable()
                            .min(0.0)
                            .max(limits.discharge_max_kw)
                            .name(format!("discharge_{}_{}", ev.id, t)),
                    )
                })
                .collect(),
        );
        soc.push(
            (0..horizon)
                .map(|t| {
                    vars.add(
                        variable()
                            .min(ev.min_energy_kwh())
                            .max(ev.max_energy_kwh())
                            .name(format!("soc_{}_{}", ev.id, t)),
                    )
                })
                .collect(),
        );
        mode.push(
            (0..horizon)
                .map(|t| vars.add(variable().binary().name(format!("mode_{}_{}", ev.id, t))))
                .collect(),
        );
        dischargeable.push(
            (0..horizon)
                .map(|t| {
                    vars.add(
                        variable()
                            .binary()
                            .name(format!("dischargeable_{}_{}", ev.id, t)),
                    )
                })
                .collect(),
        );
    }

    // ev_load[t]: total community EV charging power; peak bounds the
    // community draw (EV charging + household grid) across all slots.
    let ev_load: Vec<Variable> = (0..horizon)
        .map(|t| vars.add(variable().min(0.0).name(format!("ev_load_{t}"))))
        .collect();
    let peak = vars.add(variable().min(0.0).name("peak"));

    // Objective: alpha * (energy cost + battery wear) + beta * peak.
    let mut objective: Expression = weights.beta * peak;
    for hi in 0..households.len() {
        for t in 0..horizon {
            objective += weights.alpha * prices[t] * grid[hi][t];
        }
    }
    for ei in 0..evs.len() {
        for t in 0..horizon {
            objective +=
                weights.alpha * weights.degradation_cost * (charge[ei][t] + discharge[ei][t]);
        }
    }

    let mut model = vars.minimise(objective.clone()).using(default_solver);

    // Power balance: grid + sum(discharge * eta_d - charge / eta_c) = demand.
    for (hi, household) in households.iter().enumerate() {
        for t in 0..horizon {
            let mut lhs = Expression::from(grid[hi][t]);
            for &ev_id in &household.evs {
                let ei = ev_index[&ev_id];
                lhs += limits.discharge_efficiency * discharge[ei][t];
                lhs -= (1.0 / limits.charge_efficiency) * charge[ei][t];
            }
            let demand_kw = household_demand_kw(household, &catalog, t, outage)?;
            model = model.with(constraint!(lhs == demand_kw));
        }
    }

    // SoC dynamics, seeded from the EV's initial state of charge.
    let soc_gain = limits.charge_efficiency * dt;
    let soc_loss = dt / limits.discharge_efficiency;
    for (ei, ev) in evs.iter().enumerate() {
        for t in 0..horizon {
            let delta = soc_gain * charge[ei][t] - soc_loss * discharge[ei][t];
            if t == 0 {
                model = model.with(constraint!(soc[ei][0] == ev.initial_energy_kwh() + delta));
            } else {
                model = model.with(constraint!(soc[ei][t] - soc[ei][t - 1] == delta));
            }
        }
    }

    // Mutual exclusivity: a slot is in charging mode or discharging mode,
    // never both.
    for ei in 0..evs.len() {
        for t in 0..horizon {
            model = model.with(constraint!(
                charge[ei][t] <= limits.charge_max_kw * mode[ei][t]
            ));
            model = model.with(constraint!(
                discharge[ei][t] + limits.discharge_max_kw * mode[ei][t] <= limits.discharge_max_kw
            ));
        }
    }

    // Discharge availability: the user override caps the gate variable,
    // which in turn caps discharge power.
    for (ei, ev) in evs.iter().enumerate() {
        let availability = if ev.available_for_discharge { 1.0 } else { 0.0 };
        for t in 0..horizon {
            model = model.with(constraint!(dischargeable[ei][t] <= availability));
            model = model.with(constraint!(
                discharge[ei][t] <= limits.discharge_max_kw * dischargeable[ei][t]
            ));
        }
    }

    // Emergency preparedness: the floor binds at the slot immediately
    // before the outage. Validation already rejected start_slot == 0 when
    // any emergency level is set, so the index is well-defined here.
    if let Some(window) = outage {
        if window.start_slot >= 1 {
            let before_outage = window.start_slot - 1;
            for (ei, ev) in evs.iter().enumerate() {
                model = model.with(constraint!(
                    soc[ei][before_outage] >= ev.emergency_energy_kwh()
                ));
            }
        }
    }

    // Price-opt-in restriction: opted-in households may only charge their
    // EVs during low-price slots.
    for household in households.iter().filter(|h| h.accepts_recommendations) {
        for &ev_id in &household.evs {
            let ei = ev_index[&ev_id];
            for t in 0..horizon {
                let allowed = if low_price[t] { 1.0 } else { 0.0 };
                model = model.with(constraint!(
                    charge[ei][t] <= limits.charge_max_kw * allowed
                ));
            }
        }
    }

    // Aggregate load definition and peak tracking.
    for t in 0..horizon {
        let total_charging: Expression = (0..evs.len())
            .map(|ei| Expression::from(charge[ei][t]))
            .sum();
        model = model.with(constraint!(ev_load[t] == total_charging));

        let total_grid: Expression = (0..households.len())
            .map(|hi| Expression::from(grid[hi][t]))
            .sum();
        model = model.with(constraint!(peak >= ev_load[t] + total_grid));
    }

    let solution = match model.solve() {
        Ok(solution) => solution,
        Err(ResolutionError::Infeasible) => {
            warn!("no feasible schedule for request");
            return Err(ScheduleError::Infeasible);
        }
        Err(e) => return Err(ScheduleError::Solver(e.to_string())),
    };

    let total_cost = objective.eval_with(&solution);
    let peak_load_kw = solution.value(peak);

    let per_ev = evs
        .iter()
        .enumerate()
        .map(|(ei, ev)| EvSchedule {
            ev_id: ev.id,
            household_id: ev.household_id,
            per_slot: (0..horizon)
                .map(|t| EvSlotPoint {
                    slot: t,
                    soc_kwh: solution.value(soc[ei][t]),
                    charge_kw: solution.value(charge[ei][t]),
                    discharge_kw: solution.value(discharge[ei][t]),
                })
                .collect(),
        })
        .collect();

    let community_load = (0..horizon)
        .map(|t| CommunityLoadPoint {
            slot: t,
            ev_charging_kw: solution.value(ev_load[t]),
        })
        .collect();

    info!(total_cost, peak_load_kw, "optimal schedule found");

    Ok(OptimizationResult {
        id: Uuid::new_v4(),
        computed_at: Utc::now(),
        total_cost,
        peak_load_kw,
        per_ev,
        community_load,
    })
}
