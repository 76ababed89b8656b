use std::collections::BTreeSet;
use std::fs;
use std::sync::{Arc, Mutex};

use rehab_scout::listings::{
    FeedFormat, FilterSpec, ListingFeedImporter, ListingId, ListingService, SavedListingError,
    SavedListingStore, SortOrder, ValuationConfig, ValuationEngine,
};

#[derive(Default)]
struct VecSavedStore {
    ids: Mutex<BTreeSet<ListingId>>,
}

impl SavedListingStore for VecSavedStore {
    fn save(&self, id: ListingId) -> Result<bool, SavedListingError> {
        Ok(self.ids.lock().expect("store mutex poisoned").insert(id))
    }

    fn unsave(&self, id: &ListingId) -> Result<(), SavedListingError> {
        if self.ids.lock().expect("store mutex poisoned").remove(id) {
            Ok(())
        } else {
            Err(SavedListingError::NotSaved(id.clone()))
        }
    }

    fn saved_ids(&self) -> Result<BTreeSet<ListingId>, SavedListingError> {
        Ok(self.ids.lock().expect("store mutex poisoned").clone())
    }
}

const PROVIDER_PAYLOAD: &str = r#"{
  "meta": { "returned_rows": 3 },
  "properties": [
    {
      "property_id": "M7001",
      "price": 100000,
      "beds": 3,
      "baths": 1,
      "year_built": 1985,
      "building_size": { "size": 1200 },
      "address": { "line": "18 Oak St", "city": "Detroit", "state_code": "MI", "postal_code": "48205" },
      "photos": [{ "href": "https://img.example/m7001.jpg" }]
    },
    {
      "property_id": "M7002",
      "price": 320000,
      "beds": 4,
      "year_built": 2012,
      "building_size": { "size": 2400 },
      "address": { "city": "Ann Arbor", "state_code": "MI" }
    },
    {
      "property_id": "M7003",
      "price": 45000,
      "beds": 2,
      "year_built": 1921,
      "building_size": { "size": 900 },
      "address": { "city": "Detroit", "state_code": "MI" }
    }
  ]
}"#;

#[test]
fn provider_payload_imports_and_searches_with_saved_state() {
    let raws =
        ListingFeedImporter::from_reader(PROVIDER_PAYLOAD.as_bytes(), FeedFormat::ProviderJson)
            .expect("provider payload imports");
    assert_eq!(raws.len(), 3);

    let service = ListingService::new(
        ValuationEngine::new(ValuationConfig::default(), 2024),
        Arc::new(VecSavedStore::default()),
    );
    service.save(ListingId::from("M7003")).expect("save succeeds");

    let filter = FilterSpec {
        location: Some("detroit".to_string()),
        ..FilterSpec::default()
    };
    let results = service
        .search(&raws, &filter, SortOrder::PriceLowToHigh)
        .expect("search succeeds");

    let ids: Vec<&str> = results.listings.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, vec!["M7003", "M7001"]);
    assert!(results.listings[0].is_saved);
    assert_eq!(
        results.listings[1].primary_image(),
        Some("https://img.example/m7001.jpg")
    );
    assert_eq!(results.summary.total, 2);
    assert_eq!(results.summary.saved, 1);
    assert_eq!(results.scanned, 3);
}

#[test]
fn csv_file_imports_from_disk() {
    let path = std::env::temp_dir().join(format!("rehab-scout-feed-{}.csv", std::process::id()));
    fs::write(
        &path,
        "property_id,city,state_code,price,beds,baths,building_size,year_built,garage_spaces\n\
C1,Flint,MI,\"$39,900\",3,1,1100,1940,1\n\
C2,Flint,MI,72000,2,1,950,1962,0\n",
    )
    .expect("write temp feed");

    let raws = ListingFeedImporter::from_path(&path).expect("csv feed imports");
    fs::remove_file(&path).ok();

    assert_eq!(raws.len(), 2);
    assert_eq!(raws[0].price, Some(39_900.0));
    assert_eq!(raws[1].property_id.as_deref(), Some("C2"));

    let listings = ValuationEngine::new(ValuationConfig::default(), 2024).appraise_all(&raws);
    assert_eq!(listings[0].bedrooms, 3);
    assert_eq!(listings[0].year_built, 1940);
}
