use serde::{Deserialize, Serialize};

/// Average market price per square foot used when no override is configured.
pub const DEFAULT_AREA_AVG_PRICE_PER_SQFT: f64 = 150.0;

/// Market inputs the valuation formulas are calibrated against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationConfig {
    pub area_avg_price_per_sqft: f64,
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            area_avg_price_per_sqft: DEFAULT_AREA_AVG_PRICE_PER_SQFT,
        }
    }
}
