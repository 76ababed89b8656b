use std::collections::BTreeSet;

use super::domain::{Listing, ListingId};

/// Storage abstraction for the ids a user has bookmarked.
///
/// Only ids are persisted. Listings themselves are re-valued on every fetch and have the
/// flag stamped back on through [`apply_saved`].
pub trait SavedListingStore: Send + Sync {
    /// Returns `true` when the id was not saved before.
    fn save(&self, id: ListingId) -> Result<bool, SavedListingError>;
    fn unsave(&self, id: &ListingId) -> Result<(), SavedListingError>;
    fn saved_ids(&self) -> Result<BTreeSet<ListingId>, SavedListingError>;
}

/// Error enumeration for saved-listing store failures.
#[derive(Debug, thiserror::Error)]
pub enum SavedListingError {
    #[error("listing {0} is not saved")]
    NotSaved(ListingId),
    #[error("saved listing store unavailable: {0}")]
    Unavailable(String),
}

/// Copy `listings`, marking the ones whose id is in `saved`.
pub fn apply_saved(listings: &[Listing], saved: &BTreeSet<ListingId>) -> Vec<Listing> {
    listings
        .iter()
        .map(|listing| listing.clone().with_saved(saved.contains(&listing.id)))
        .collect()
}
