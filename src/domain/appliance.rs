use serde::{Deserialize, Serialize};

/// A household appliance with a constant power draw.
///
/// Immutable for the duration of one optimization run; the catalog is built
/// fresh from caller-supplied data on every request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appliance {
    pub id: u32,
    pub name: String,
    /// Constant draw while powered (kW).
    pub power_kw: f64,
}

impl Appliance {
    pub fn new(id: u32, name: impl Into<String>, power_kw: f64) -> Self {
        Self {
            id,
            name: name.into(),
            power_kw,
        }
    }
}
