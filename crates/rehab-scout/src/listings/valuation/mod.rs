mod config;
mod rules;

pub use config::{ValuationConfig, DEFAULT_AREA_AVG_PRICE_PER_SQFT};

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{Listing, ListingFeature, ListingId};
use super::raw::{non_empty, parse_list_date, RawListing};
use rules::PropertyFacts;

static GENERATED_LISTING_SEQUENCE: AtomicU64 = AtomicU64::new(1);

// Not stable across fetches: saved-state reconciliation only works for
// listings whose provider supplies an id.
fn generated_listing_id() -> ListingId {
    let id = GENERATED_LISTING_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ListingId(format!("generated-{id:06}"))
}

/// Derived investment metrics for a single listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Valuation {
    pub rehab_potential: u8,
    pub estimated_repair_cost: f64,
    pub after_repair_value: f64,
    pub potential_profit: f64,
    pub investment_score: u8,
    pub features: BTreeSet<ListingFeature>,
}

/// Stateless calculator turning raw provider records into valued listings.
///
/// The market rate and the as-of year are fixed at construction so that two engines
/// built from the same inputs always agree.
#[derive(Debug, Clone)]
pub struct ValuationEngine {
    config: ValuationConfig,
    as_of_year: i32,
}

impl ValuationEngine {
    pub fn new(config: ValuationConfig, as_of_year: i32) -> Self {
        Self { config, as_of_year }
    }

    pub fn config(&self) -> &ValuationConfig {
        &self.config
    }

    pub fn as_of_year(&self) -> i32 {
        self.as_of_year
    }

    /// Compute the derived metrics without building the full listing.
    pub fn value(&self, raw: &RawListing) -> Valuation {
        let market_rate = self.config.area_avg_price_per_sqft;
        let facts = PropertyFacts::from_raw(raw, self.as_of_year);

        let rehab_potential = rules::rehab_potential(&facts, market_rate);
        let estimated_repair_cost = rules::estimated_repair_cost(&facts);
        let after_repair_value = rules::after_repair_value(&facts, market_rate);
        let potential_profit =
            rules::potential_profit(&facts, after_repair_value, estimated_repair_cost);
        let investment_score = rules::investment_score(&facts, potential_profit, rehab_potential);

        Valuation {
            rehab_potential,
            estimated_repair_cost,
            after_repair_value,
            potential_profit,
            investment_score,
            features: rules::extract_features(raw),
        }
    }

    pub fn appraise(&self, raw: &RawListing) -> Listing {
        let valuation = self.value(raw);
        let id = raw
            .property_id
            .as_deref()
            .and_then(non_empty)
            .map(ListingId)
            .unwrap_or_else(generated_listing_id);
        let text = |value: &Option<String>| {
            value
                .as_deref()
                .and_then(non_empty)
                .unwrap_or_default()
        };

        Listing {
            id,
            address: text(&raw.address_line),
            city: text(&raw.city),
            state: text(&raw.state_code),
            zip_code: text(&raw.postal_code),
            price: rules::non_negative(raw.price),
            bedrooms: rules::non_negative(raw.beds).trunc().min(f64::from(u32::MAX)) as u32,
            bathrooms: rules::non_negative(raw.baths),
            square_feet: rules::non_negative(raw.building_size),
            year_built: rules::year_built(raw),
            description: text(&raw.description),
            images: raw.photos.clone(),
            lat: rules::coordinate(raw.lat),
            lng: rules::coordinate(raw.lon),
            rehab_potential: valuation.rehab_potential,
            estimated_repair_cost: valuation.estimated_repair_cost,
            after_repair_value: valuation.after_repair_value,
            potential_profit: valuation.potential_profit,
            investment_score: valuation.investment_score,
            listing_date: raw.list_date.as_deref().and_then(parse_list_date),
            features: valuation.features,
            is_saved: false,
        }
    }

    /// Value a batch, preserving input order.
    pub fn appraise_all(&self, raws: &[RawListing]) -> Vec<Listing> {
        let listings: Vec<Listing> = raws.iter().map(|raw| self.appraise(raw)).collect();
        debug!(
            count = listings.len(),
            as_of_year = self.as_of_year,
            "valued listing batch"
        );
        listings
    }
}
