use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::domain::Listing;

/// Presentation orderings offered alongside search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "investment")]
    BestInvestment,
    #[serde(rename = "rehab")]
    RehabPotential,
    #[serde(rename = "price-low")]
    PriceLowToHigh,
    #[serde(rename = "price-high")]
    PriceHighToLow,
}

impl SortOrder {
    pub const fn key(self) -> &'static str {
        match self {
            Self::BestInvestment => "investment",
            Self::RehabPotential => "rehab",
            Self::PriceLowToHigh => "price-low",
            Self::PriceHighToLow => "price-high",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::BestInvestment => "Best Investment",
            Self::RehabPotential => "Rehab Potential",
            Self::PriceLowToHigh => "Price (Low to High)",
            Self::PriceHighToLow => "Price (High to Low)",
        }
    }

    fn compare(self, left: &Listing, right: &Listing) -> Ordering {
        match self {
            Self::BestInvestment => right.investment_score.cmp(&left.investment_score),
            Self::RehabPotential => right.rehab_potential.cmp(&left.rehab_potential),
            Self::PriceLowToHigh => left.price.total_cmp(&right.price),
            Self::PriceHighToLow => right.price.total_cmp(&left.price),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSortOrder(pub String);

impl fmt::Display for UnknownSortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown sort order '{}' (expected investment, rehab, price-low, or price-high)",
            self.0
        )
    }
}

impl std::error::Error for UnknownSortOrder {}

impl FromStr for SortOrder {
    type Err = UnknownSortOrder;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "investment" => Ok(Self::BestInvestment),
            "rehab" => Ok(Self::RehabPotential),
            "price-low" => Ok(Self::PriceLowToHigh),
            "price-high" => Ok(Self::PriceHighToLow),
            _ => Err(UnknownSortOrder(value.to_string())),
        }
    }
}

/// Stable sort: listings that compare equal keep their input order.
pub fn sort_listings(listings: &mut [Listing], order: SortOrder) {
    listings.sort_by(|left, right| order.compare(left, right));
}
