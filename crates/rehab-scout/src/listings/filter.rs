use serde::{Deserialize, Serialize};

use super::domain::Listing;

/// Caller-supplied constraints; every unset field matches everything.
///
/// Thresholds are plain numbers; negative or fractional bounds are accepted as given.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSpec {
    pub location: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_beds: Option<f64>,
    pub min_baths: Option<f64>,
    pub min_rehab_potential: Option<f64>,
    pub min_square_feet: Option<f64>,
    pub max_year_built: Option<f64>,
}

impl FilterSpec {
    pub fn is_unconstrained(&self) -> bool {
        self == &Self::default()
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        if let Some(location) = &self.location {
            if !listing
                .city
                .to_lowercase()
                .contains(&location.to_lowercase())
            {
                return false;
            }
        }

        at_least(listing.price, self.min_price)
            && at_most(listing.price, self.max_price)
            && at_least(f64::from(listing.bedrooms), self.min_beds)
            && at_least(listing.bathrooms, self.min_baths)
            && at_least(f64::from(listing.rehab_potential), self.min_rehab_potential)
            && at_least(listing.square_feet, self.min_square_feet)
            && at_most(f64::from(listing.year_built), self.max_year_built)
    }
}

fn at_least(value: f64, min: Option<f64>) -> bool {
    min.map_or(true, |min| value >= min)
}

fn at_most(value: f64, max: Option<f64>) -> bool {
    max.map_or(true, |max| value <= max)
}

/// Return the listings satisfying every constraint in `spec`, in input order.
pub fn filter_listings(listings: &[Listing], spec: &FilterSpec) -> Vec<Listing> {
    listings
        .iter()
        .filter(|listing| spec.matches(listing))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listings::domain::fixtures::listing;

    fn ids(listings: &[Listing]) -> Vec<&str> {
        listings.iter().map(|listing| listing.id.as_str()).collect()
    }

    fn sample() -> Vec<Listing> {
        let mut detroit = listing("det", "Detroit", 90_000.0);
        detroit.bedrooms = 2;
        detroit.bathrooms = 1.0;
        detroit.year_built = 1925;
        detroit.rehab_potential = 100;
        detroit.square_feet = 1100.0;

        let mut ann_arbor = listing("a2", "Ann Arbor", 300_000.0);
        ann_arbor.bedrooms = 4;
        ann_arbor.bathrooms = 2.5;
        ann_arbor.year_built = 1998;
        ann_arbor.rehab_potential = 75;
        ann_arbor.square_feet = 2400.0;

        let mut hamtramck = listing("ham", "Hamtramck", 65_000.0);
        hamtramck.bedrooms = 3;
        hamtramck.bathrooms = 1.0;
        hamtramck.year_built = 1941;
        hamtramck.rehab_potential = 95;
        hamtramck.square_feet = 900.0;

        vec![detroit, ann_arbor, hamtramck]
    }

    #[test]
    fn location_is_case_insensitive_substring_on_city() {
        let spec = FilterSpec {
            location: Some("detroit".to_string()),
            ..FilterSpec::default()
        };
        assert_eq!(ids(&filter_listings(&sample(), &spec)), vec!["det"]);

        let spec = FilterSpec {
            location: Some("AR".to_string()),
            ..FilterSpec::default()
        };
        assert_eq!(ids(&filter_listings(&sample(), &spec)), vec!["a2"]);
    }

    #[test]
    fn empty_spec_returns_input_unchanged() {
        let listings = sample();
        let spec = FilterSpec::default();
        assert!(spec.is_unconstrained());
        assert_eq!(filter_listings(&listings, &spec), listings);
    }

    #[test]
    fn price_window_is_inclusive() {
        let spec = FilterSpec {
            min_price: Some(65_000.0),
            max_price: Some(90_000.0),
            ..FilterSpec::default()
        };
        assert_eq!(ids(&filter_listings(&sample(), &spec)), vec!["det", "ham"]);
    }

    #[test]
    fn constraints_combine_with_and() {
        let spec = FilterSpec {
            min_beds: Some(3.0),
            min_rehab_potential: Some(90.0),
            max_year_built: Some(1950.0),
            ..FilterSpec::default()
        };
        assert_eq!(ids(&filter_listings(&sample(), &spec)), vec!["ham"]);

        let spec = FilterSpec {
            min_baths: Some(2.0),
            min_square_feet: Some(2000.0),
            ..FilterSpec::default()
        };
        assert_eq!(ids(&filter_listings(&sample(), &spec)), vec!["a2"]);
    }

    #[test]
    fn negative_thresholds_match_everything() {
        let spec = FilterSpec {
            min_price: Some(-1.0),
            min_baths: Some(-3.0),
            min_square_feet: Some(-100.0),
            ..FilterSpec::default()
        };
        assert_eq!(filter_listings(&sample(), &spec).len(), 3);

        let spec = FilterSpec {
            min_beds: Some(-1.0),
            min_rehab_potential: Some(-5.0),
            ..FilterSpec::default()
        };
        assert_eq!(filter_listings(&sample(), &spec).len(), 3);
    }

    #[test]
    fn fractional_thresholds_compare_against_whole_values() {
        let spec = FilterSpec {
            min_beds: Some(2.5),
            min_rehab_potential: Some(94.5),
            ..FilterSpec::default()
        };
        assert_eq!(ids(&filter_listings(&sample(), &spec)), vec!["ham"]);

        let spec = FilterSpec {
            max_year_built: Some(1925.5),
            ..FilterSpec::default()
        };
        assert_eq!(ids(&filter_listings(&sample(), &spec)), vec!["det"]);
    }

    #[test]
    fn deserializes_out_of_range_thresholds() {
        let payload = r#"{"min_beds":-1,"min_rehab_potential":1.5e3,"max_year_built":1960.5}"#;
        let spec: FilterSpec = serde_json::from_str(payload).expect("spec parses");
        assert_eq!(spec.min_beds, Some(-1.0));
        assert_eq!(spec.min_rehab_potential, Some(1500.0));
        assert_eq!(spec.max_year_built, Some(1960.5));
    }

    #[test]
    fn filtering_is_idempotent() {
        let spec = FilterSpec {
            max_price: Some(100_000.0),
            location: Some("a".to_string()),
            ..FilterSpec::default()
        };
        let once = filter_listings(&sample(), &spec);
        let twice = filter_listings(&once, &spec);
        assert_eq!(once, twice);
    }

    #[test]
    fn tightening_a_threshold_never_grows_the_result() {
        let listings = sample();
        let mut previous = usize::MAX;
        for min_price in [0.0, 65_000.0, 65_001.0, 90_000.0, 300_000.0, 300_001.0] {
            let spec = FilterSpec {
                min_price: Some(min_price),
                ..FilterSpec::default()
            };
            let count = filter_listings(&listings, &spec).len();
            assert!(count <= previous, "min_price {min_price} grew the result");
            previous = count;
        }
        assert_eq!(previous, 0);
    }

    #[test]
    fn deserializes_partial_specs() {
        let spec: FilterSpec =
            serde_json::from_str(r#"{"location":"flint","min_beds":2}"#).expect("spec parses");
        assert_eq!(spec.location.as_deref(), Some("flint"));
        assert_eq!(spec.min_beds, Some(2.0));
        assert!(spec.max_price.is_none());
    }
}
