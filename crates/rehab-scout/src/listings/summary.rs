use serde::Serialize;

use super::domain::{Listing, ListingId, RehabTier};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RehabTierEntry {
    pub tier: RehabTier,
    pub tier_label: &'static str,
    pub count: usize,
}

/// Aggregate figures for a page of search results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchSummary {
    pub total: usize,
    pub saved: usize,
    pub average_investment_score: f64,
    pub average_rehab_potential: f64,
    pub total_potential_profit: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_listing_id: Option<ListingId>,
    pub rehab_tiers: Vec<RehabTierEntry>,
}

impl SearchSummary {
    pub fn from_listings(listings: &[Listing]) -> Self {
        let total = listings.len();
        let saved = listings.iter().filter(|listing| listing.is_saved).count();

        let (score_sum, rehab_sum, total_potential_profit) = listings.iter().fold(
            (0.0, 0.0, 0.0),
            |(scores, rehab, profit), listing| {
                (
                    scores + f64::from(listing.investment_score),
                    rehab + f64::from(listing.rehab_potential),
                    profit + listing.potential_profit,
                )
            },
        );

        let average = |sum: f64| if total > 0 { sum / total as f64 } else { 0.0 };

        // Earliest listing wins ties so the pick matches the default sort.
        let best_listing_id = listings
            .iter()
            .fold(None::<&Listing>, |best, listing| match best {
                Some(current) if current.investment_score >= listing.investment_score => {
                    Some(current)
                }
                _ => Some(listing),
            })
            .map(|listing| listing.id.clone());

        let rehab_tiers = [RehabTier::High, RehabTier::Moderate, RehabTier::Low]
            .into_iter()
            .map(|tier| RehabTierEntry {
                tier,
                tier_label: tier.label(),
                count: listings
                    .iter()
                    .filter(|listing| listing.rehab_tier() == tier)
                    .count(),
            })
            .collect();

        Self {
            total,
            saved,
            average_investment_score: average(score_sum),
            average_rehab_potential: average(rehab_sum),
            total_potential_profit,
            best_listing_id,
            rehab_tiers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listings::domain::fixtures::listing;

    #[test]
    fn empty_results_produce_zeroed_summary() {
        let summary = SearchSummary::from_listings(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.average_investment_score, 0.0);
        assert!(summary.best_listing_id.is_none());
        assert!(summary.rehab_tiers.iter().all(|entry| entry.count == 0));
    }

    #[test]
    fn aggregates_scores_profit_and_tiers() {
        let mut a = listing("a", "Detroit", 80_000.0);
        a.investment_score = 90;
        a.rehab_potential = 100;
        a.potential_profit = 20_000.0;
        let mut b = listing("b", "Detroit", 80_000.0).with_saved(true);
        b.investment_score = 70;
        b.rehab_potential = 70;
        b.potential_profit = 5_000.0;
        let mut c = listing("c", "Detroit", 80_000.0);
        c.investment_score = 90;
        c.rehab_potential = 85;

        let summary = SearchSummary::from_listings(&[a, b, c]);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.saved, 1);
        assert!((summary.average_investment_score - 250.0 / 3.0).abs() < 1e-9);
        assert!((summary.average_rehab_potential - 85.0).abs() < 1e-9);
        assert_eq!(summary.total_potential_profit, 25_000.0);
        assert_eq!(summary.best_listing_id, Some(ListingId::from("a")));

        let high = &summary.rehab_tiers[0];
        assert_eq!((high.tier, high.count), (RehabTier::High, 2));
        assert_eq!(summary.rehab_tiers[1].count, 1);
        assert_eq!(summary.rehab_tiers[2].count, 0);
    }
}
