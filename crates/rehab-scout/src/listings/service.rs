use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use super::domain::{Listing, ListingId};
use super::filter::{filter_listings, FilterSpec};
use super::raw::RawListing;
use super::saved::{apply_saved, SavedListingError, SavedListingStore};
use super::sort::{sort_listings, SortOrder};
use super::summary::SearchSummary;
use super::valuation::ValuationEngine;

/// Filtered, ordered listings plus aggregate figures.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub scanned: usize,
    pub summary: SearchSummary,
    pub listings: Vec<Listing>,
}

/// Service composing the valuation engine with the saved-listing store.
pub struct ListingService<S> {
    engine: Arc<ValuationEngine>,
    saved: Arc<S>,
}

impl<S> ListingService<S>
where
    S: SavedListingStore + 'static,
{
    pub fn new(engine: ValuationEngine, saved: Arc<S>) -> Self {
        Self {
            engine: Arc::new(engine),
            saved,
        }
    }

    pub fn engine(&self) -> &ValuationEngine {
        &self.engine
    }

    /// Value a batch and stamp saved state from the store.
    pub fn appraise(&self, raws: &[RawListing]) -> Result<Vec<Listing>, ListingServiceError> {
        let listings = self.engine.appraise_all(raws);
        let saved = self.saved.saved_ids()?;
        Ok(apply_saved(&listings, &saved))
    }

    /// Value, filter, and order a batch in one pass.
    pub fn search(
        &self,
        raws: &[RawListing],
        filter: &FilterSpec,
        order: SortOrder,
    ) -> Result<SearchResults, ListingServiceError> {
        let listings = self.appraise(raws)?;
        let mut matched = filter_listings(&listings, filter);
        sort_listings(&mut matched, order);

        info!(
            scanned = listings.len(),
            matched = matched.len(),
            sort = %order,
            "listing search completed"
        );

        Ok(SearchResults {
            scanned: listings.len(),
            summary: SearchSummary::from_listings(&matched),
            listings: matched,
        })
    }

    pub fn save(&self, id: ListingId) -> Result<bool, ListingServiceError> {
        Ok(self.saved.save(id)?)
    }

    pub fn unsave(&self, id: &ListingId) -> Result<(), ListingServiceError> {
        Ok(self.saved.unsave(id)?)
    }

    pub fn saved_ids(&self) -> Result<BTreeSet<ListingId>, ListingServiceError> {
        Ok(self.saved.saved_ids()?)
    }
}

/// Error raised by the listing service.
#[derive(Debug, thiserror::Error)]
pub enum ListingServiceError {
    #[error(transparent)]
    Saved(#[from] SavedListingError),
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub(crate) struct MemorySavedStore {
        ids: Mutex<BTreeSet<ListingId>>,
        unavailable: bool,
    }

    impl MemorySavedStore {
        pub(crate) fn offline() -> Self {
            Self {
                unavailable: true,
                ..Self::default()
            }
        }
    }

    impl SavedListingStore for MemorySavedStore {
        fn save(&self, id: ListingId) -> Result<bool, SavedListingError> {
            if self.unavailable {
                return Err(SavedListingError::Unavailable("offline".to_string()));
            }
            Ok(self.ids.lock().expect("saved mutex poisoned").insert(id))
        }

        fn unsave(&self, id: &ListingId) -> Result<(), SavedListingError> {
            if self.ids.lock().expect("saved mutex poisoned").remove(id) {
                Ok(())
            } else {
                Err(SavedListingError::NotSaved(id.clone()))
            }
        }

        fn saved_ids(&self) -> Result<BTreeSet<ListingId>, SavedListingError> {
            if self.unavailable {
                return Err(SavedListingError::Unavailable("offline".to_string()));
            }
            Ok(self.ids.lock().expect("saved mutex poisoned").clone())
        }
    }
}
