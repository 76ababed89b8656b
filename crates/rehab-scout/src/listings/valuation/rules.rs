use std::collections::BTreeSet;

use super::super::domain::ListingFeature;
use super::super::raw::RawListing;

const BASE_REHAB_SCORE: i32 = 70;
const BASE_INVESTMENT_SCORE: f64 = 60.0;
const ARV_MARKET_DISCOUNT: f64 = 0.95;
const LARGE_LOT_SQFT: f64 = 8000.0;

/// Normalized numeric inputs shared by every metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PropertyFacts {
    pub price: f64,
    pub square_feet: f64,
    pub age: i64,
}

impl PropertyFacts {
    pub(crate) fn from_raw(raw: &RawListing, as_of_year: i32) -> Self {
        let year_built = year_built(raw);
        let age = if year_built == 0 {
            0
        } else {
            i64::from(as_of_year) - i64::from(year_built)
        };

        Self {
            price: non_negative(raw.price),
            square_feet: non_negative(raw.building_size),
            age,
        }
    }

    fn price_per_sqft(&self) -> f64 {
        self.price / self.square_feet.max(1.0)
    }
}

pub(crate) fn non_negative(value: Option<f64>) -> f64 {
    value
        .filter(|number| number.is_finite() && *number >= 0.0)
        .unwrap_or(0.0)
}

pub(crate) fn coordinate(value: Option<f64>) -> f64 {
    value.filter(|number| number.is_finite()).unwrap_or(0.0)
}

/// 0 stands in for "unknown"; ages computed from it collapse to zero.
pub(crate) fn year_built(raw: &RawListing) -> i32 {
    let year = non_negative(raw.year_built).trunc();
    year.min(f64::from(i32::MAX)) as i32
}

pub(crate) fn rehab_potential(facts: &PropertyFacts, area_avg_price_per_sqft: f64) -> u8 {
    let mut score = BASE_REHAB_SCORE;

    score += if facts.age > 30 {
        15
    } else if facts.age > 20 {
        10
    } else if facts.age > 10 {
        5
    } else {
        0
    };

    let price_per_sqft = facts.price_per_sqft();
    score += if price_per_sqft < area_avg_price_per_sqft * 0.7 {
        15
    } else if price_per_sqft < area_avg_price_per_sqft * 0.8 {
        10
    } else if price_per_sqft < area_avg_price_per_sqft * 0.9 {
        5
    } else {
        0
    };

    score.clamp(0, 100) as u8
}

pub(crate) fn repair_cost_per_sqft(age: i64) -> f64 {
    if age > 30 {
        45.0
    } else if age > 20 {
        35.0
    } else if age > 10 {
        25.0
    } else {
        15.0
    }
}

pub(crate) fn estimated_repair_cost(facts: &PropertyFacts) -> f64 {
    finite_or_zero((facts.square_feet * repair_cost_per_sqft(facts.age)).round())
}

pub(crate) fn after_repair_value(facts: &PropertyFacts, area_avg_price_per_sqft: f64) -> f64 {
    finite_or_zero((facts.square_feet * area_avg_price_per_sqft * ARV_MARKET_DISCOUNT).round())
}

// Products that overflow are treated like unknown sizes.
fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

pub(crate) fn potential_profit(
    facts: &PropertyFacts,
    after_repair_value: f64,
    repair_cost: f64,
) -> f64 {
    (after_repair_value - (facts.price + repair_cost)).max(0.0)
}

pub(crate) fn investment_score(
    facts: &PropertyFacts,
    potential_profit: f64,
    rehab_potential: u8,
) -> u8 {
    let roi = if facts.price > 0.0 {
        potential_profit / facts.price * 100.0
    } else {
        0.0
    };

    let mut score = BASE_INVESTMENT_SCORE;
    score += if roi > 30.0 {
        20.0
    } else if roi > 20.0 {
        15.0
    } else if roi > 10.0 {
        10.0
    } else {
        0.0
    };
    score += f64::from(rehab_potential) * 0.2;

    score.round().clamp(0.0, 100.0) as u8
}

pub(crate) fn extract_features(raw: &RawListing) -> BTreeSet<ListingFeature> {
    let mut features = BTreeSet::new();

    if non_negative(raw.garage_spaces) > 0.0 {
        features.insert(ListingFeature::Garage);
    }
    if non_negative(raw.lot_size) > LARGE_LOT_SQFT {
        features.insert(ListingFeature::LargeLot);
    }
    if raw.has_basement.unwrap_or(false) {
        features.insert(ListingFeature::Basement);
    }
    if raw.has_fireplace.unwrap_or(false) {
        features.insert(ListingFeature::Fireplace);
    }
    if raw.has_pool.unwrap_or(false) {
        features.insert(ListingFeature::Pool);
    }
    if raw.cooling_type.as_deref() == Some("central") {
        features.insert(ListingFeature::CentralAir);
    }

    features
}
