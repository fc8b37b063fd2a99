use serde::{Deserialize, Serialize};

/// A household participating in the community schedule.
///
/// Owns EVs and appliances by id; a subset of the appliances is marked
/// essential and stays powered during an outage. Invariant (checked at
/// request validation): `essential_appliances ⊆ appliances`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Household {
    pub id: u32,
    #[serde(default)]
    pub evs: Vec<u32>,
    #[serde(default)]
    pub appliances: Vec<u32>,
    #[serde(default)]
    pub essential_appliances: Vec<u32>,
    /// Opt-in to price-driven charging restrictions: when set, the
    /// household's EVs may only charge during low-price slots.
    #[serde(default)]
    pub accepts_recommendations: bool,
}

impl Household {
    pub fn is_essential(&self, appliance_id: u32) -> bool {
        self.essential_appliances.contains(&appliance_id)
    }

    pub fn owns_ev(&self, ev_id: u32) -> bool {
        self.evs.contains(&ev_id)
    }

    /// True when every essential appliance is also an owned appliance.
    pub fn essentials_are_owned(&self) -> bool {
        self.essential_appliances
            .iter()
            .all(|id| self.appliances.contains(id))
    }
}
