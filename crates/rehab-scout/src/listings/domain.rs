use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for valued listings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ListingId(pub String);

impl ListingId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ListingId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Qualitative amenity tags derived from raw provider flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ListingFeature {
    Garage,
    #[serde(rename = "Large Lot")]
    LargeLot,
    Basement,
    Fireplace,
    Pool,
    #[serde(rename = "Central Air")]
    CentralAir,
}

impl ListingFeature {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Garage => "Garage",
            Self::LargeLot => "Large Lot",
            Self::Basement => "Basement",
            Self::Fireplace => "Fireplace",
            Self::Pool => "Pool",
            Self::CentralAir => "Central Air",
        }
    }
}

/// Display band for the rehab potential score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RehabTier {
    High,
    Moderate,
    Low,
}

impl RehabTier {
    pub const fn from_score(score: u8) -> Self {
        if score >= 80 {
            Self::High
        } else if score >= 60 {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Moderate => "Moderate",
            Self::Low => "Low",
        }
    }
}

/// A valued listing. Derived metrics are fixed at valuation time; only the
/// presentation layer flips `is_saved`, and it does so on a copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub price: f64,
    pub bedrooms: u32,
    pub bathrooms: f64,
    pub square_feet: f64,
    pub year_built: i32,
    pub description: String,
    pub images: Vec<String>,
    pub lat: f64,
    pub lng: f64,
    pub rehab_potential: u8,
    pub estimated_repair_cost: f64,
    pub after_repair_value: f64,
    pub potential_profit: f64,
    pub investment_score: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listing_date: Option<NaiveDate>,
    pub features: BTreeSet<ListingFeature>,
    pub is_saved: bool,
}

impl Listing {
    /// Projected return on the purchase price, as a percentage.
    pub fn roi_percent(&self) -> Option<f64> {
        (self.price > 0.0).then(|| self.potential_profit / self.price * 100.0)
    }

    pub fn rehab_tier(&self) -> RehabTier {
        RehabTier::from_score(self.rehab_potential)
    }

    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    pub fn has_feature(&self, feature: ListingFeature) -> bool {
        self.features.contains(&feature)
    }

    pub fn with_saved(mut self, saved: bool) -> Self {
        self.is_saved = saved;
        self
    }
}

pub fn find_listing<'a>(listings: &'a [Listing], id: &ListingId) -> Option<&'a Listing> {
    listings.iter().find(|listing| &listing.id == id)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub(crate) fn listing(id: &str, city: &str, price: f64) -> Listing {
        Listing {
            id: ListingId::from(id),
            address: format!("{id} Main St"),
            city: city.to_string(),
            state: "MI".to_string(),
            zip_code: "48201".to_string(),
            price,
            bedrooms: 3,
            bathrooms: 1.5,
            square_feet: 1400.0,
            year_built: 1950,
            description: String::new(),
            images: Vec::new(),
            lat: 42.33,
            lng: -83.05,
            rehab_potential: 85,
            estimated_repair_cost: 63_000.0,
            after_repair_value: 199_500.0,
            potential_profit: 0.0,
            investment_score: 77,
            listing_date: None,
            features: BTreeSet::new(),
            is_saved: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::listing;
    use super::*;

    #[test]
    fn roi_is_absent_for_free_listings() {
        let mut free = listing("a", "Detroit", 0.0);
        free.potential_profit = 50_000.0;
        assert_eq!(free.roi_percent(), None);

        let mut priced = listing("b", "Detroit", 100_000.0);
        priced.potential_profit = 17_000.0;
        let roi = priced.roi_percent().expect("roi for priced listing");
        assert!((roi - 17.0).abs() < 1e-9);
    }

    #[test]
    fn rehab_tier_bands_scores() {
        assert_eq!(RehabTier::from_score(100), RehabTier::High);
        assert_eq!(RehabTier::from_score(80), RehabTier::High);
        assert_eq!(RehabTier::from_score(79), RehabTier::Moderate);
        assert_eq!(RehabTier::from_score(60), RehabTier::Moderate);
        assert_eq!(RehabTier::from_score(59), RehabTier::Low);
    }

    #[test]
    fn features_serialize_with_display_labels() {
        let json = serde_json::to_string(&ListingFeature::CentralAir).expect("serialize");
        assert_eq!(json, "\"Central Air\"");
        assert_eq!(ListingFeature::LargeLot.label(), "Large Lot");
    }

    #[test]
    fn with_saved_leaves_original_untouched() {
        let original = listing("a", "Detroit", 90_000.0);
        let stamped = original.clone().with_saved(true);
        assert!(stamped.is_saved);
        assert!(!original.is_saved);
    }

    #[test]
    fn find_listing_matches_by_id() {
        let listings = vec![
            listing("a", "Detroit", 90_000.0),
            listing("b", "Flint", 40_000.0),
        ];
        let found = find_listing(&listings, &ListingId::from("b")).expect("listing b");
        assert_eq!(found.city, "Flint");
        assert!(find_listing(&listings, &ListingId::from("z")).is_none());
    }
}
