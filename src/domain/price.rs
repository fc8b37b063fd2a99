use serde::{Deserialize, Serialize};

/// Fraction of the price range (above the minimum) below which a slot
/// counts as low-price when no explicit mask is supplied.
const LOW_PRICE_BAND: f64 = 0.25;

/// Per-slot electricity prices over the planning horizon.
///
/// Serializes as a plain array so request JSON stays flat.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceForecast(pub Vec<f64>);

impl PriceForecast {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Derive a low-price mask by thresholding against the price range.
    ///
    /// A slot is low-price when its price sits in the bottom quarter of the
    /// observed range. A flat forecast marks every slot low-price, which
    /// leaves opted-in households unrestricted - there is no cheap window
    /// to steer them into.
    pub fn low_price_mask(&self) -> Vec<bool> {
        let (min, max) = self.0.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &p| {
            (lo.min(p), hi.max(p))
        });
        if !min.is_finite() || !max.is_finite() {
            return vec![false; self.0.len()];
        }
        let threshold = min + LOW_PRICE_BAND * (max - min);
        self.0.iter().map(|&p| p <= threshold).collect()
    }
}

impl From<Vec<f64>> for PriceForecast {
    fn from(per_slot: Vec<f64>) -> Self {
        Self(per_slot)
    }
}
