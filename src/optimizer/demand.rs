use std::collections::HashMap;

use crate::domain::{Appliance, Household, OutageWindow};
use crate::error::ScheduleError;

/// Index the appliance catalog by id for O(1) lookups during model build.
pub fn appliance_catalog(appliances: &[Appliance]) -> HashMap<u32, &Appliance> {
    appliances.iter().map(|a| (a.id, a)).collect()
}

/// Total instantaneous power draw (kW) of one household at one slot.
///
/// Inside the outage window only essential appliances count; outside it,
/// every owned appliance does. A dangling appliance id is malformed input
/// and fails loudly - it must never read as zero demand.
pub fn household_demand_kw(
    household: &Household,
    catalog: &HashMap<u32, &Appliance>,
    slot: usize,
    outage: Option<&OutageWindow>,
) -> Result<f64, ScheduleError> {
    let in_outage = outage.is_some_and(|window| window.contains(slot));

    let mut total_kw = 0.0;
    for &appliance_id in &household.appliances {
        let appliance =
            catalog
                .get(&appliance_id)
                .ok_or(ScheduleError::UnknownAppliance {
                    household_id: household.id,
                    appliance_id,
                })?;
        if !in_outage || household.is_essential(appliance_id) {
            total_kw += appliance.power_kw;
        }
    }
    Ok(total_kw)
}
