//! Listing valuation, filtering, and saved-listing reconciliation.
//!
//! Raw provider records flow through [`valuation::ValuationEngine`] into immutable
//! [`Listing`] values, which [`filter::filter_listings`] narrows and [`sort::SortOrder`]
//! orders for presentation. Saved state lives outside the listings themselves and is
//! stamped on with [`saved::apply_saved`].

pub mod domain;
pub mod feed;
pub mod filter;
pub mod raw;
pub mod router;
pub mod saved;
pub mod service;
pub mod sort;
pub mod summary;
pub mod valuation;

pub use domain::{find_listing, Listing, ListingFeature, ListingId, RehabTier};
pub use feed::{FeedFormat, FeedImportError, ListingFeedImporter};
pub use filter::{filter_listings, FilterSpec};
pub use raw::RawListing;
pub use router::listing_router;
pub use saved::{apply_saved, SavedListingError, SavedListingStore};
pub use service::{ListingService, ListingServiceError, SearchResults};
pub use sort::{sort_listings, SortOrder};
pub use summary::SearchSummary;
pub use valuation::{Valuation, ValuationConfig, ValuationEngine};
