use metrics_exporter_prometheus::PrometheusHandle;
use rehab_scout::config::parse_market_rate as validate_market_rate;
use rehab_scout::listings::{ListingId, SavedListingError, SavedListingStore, SortOrder};
use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::debug;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemorySavedListingStore {
    ids: Arc<Mutex<BTreeSet<ListingId>>>,
}

impl SavedListingStore for InMemorySavedListingStore {
    fn save(&self, id: ListingId) -> Result<bool, SavedListingError> {
        let mut guard = self.ids.lock().expect("saved listing mutex poisoned");
        Ok(guard.insert(id))
    }

    fn unsave(&self, id: &ListingId) -> Result<(), SavedListingError> {
        let mut guard = self.ids.lock().expect("saved listing mutex poisoned");
        if guard.remove(id) {
            Ok(())
        } else {
            Err(SavedListingError::NotSaved(id.clone()))
        }
    }

    fn saved_ids(&self) -> Result<BTreeSet<ListingId>, SavedListingError> {
        let guard = self.ids.lock().expect("saved listing mutex poisoned");
        Ok(guard.clone())
    }
}

/// Saved-listing store persisted as a JSON array of ids.
///
/// A missing file reads as an empty set. Every mutation rewrites the whole file while
/// holding the store lock.
pub(crate) struct JsonFileSavedListingStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileSavedListingStore {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<BTreeSet<ListingId>, SavedListingError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(BTreeSet::new()),
            Err(err) => return Err(self.unavailable(err)),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(BTreeSet::new());
        }

        let ids: Vec<String> = serde_json::from_slice(&bytes).map_err(|err| self.unavailable(err))?;
        Ok(ids.into_iter().map(ListingId).collect())
    }

    fn write(&self, ids: &BTreeSet<ListingId>) -> Result<(), SavedListingError> {
        let payload: Vec<&str> = ids.iter().map(ListingId::as_str).collect();
        let json = serde_json::to_vec_pretty(&payload).map_err(|err| self.unavailable(err))?;
        fs::write(&self.path, json).map_err(|err| self.unavailable(err))?;
        debug!(path = %self.path.display(), count = ids.len(), "persisted saved listings");
        Ok(())
    }

    fn unavailable(&self, err: impl std::fmt::Display) -> SavedListingError {
        SavedListingError::Unavailable(format!("{}: {err}", self.path.display()))
    }
}

impl SavedListingStore for JsonFileSavedListingStore {
    fn save(&self, id: ListingId) -> Result<bool, SavedListingError> {
        let _guard = self.lock.lock().expect("saved listing file mutex poisoned");
        let mut ids = self.read()?;
        let inserted = ids.insert(id);
        if inserted {
            self.write(&ids)?;
        }
        Ok(inserted)
    }

    fn unsave(&self, id: &ListingId) -> Result<(), SavedListingError> {
        let _guard = self.lock.lock().expect("saved listing file mutex poisoned");
        let mut ids = self.read()?;
        if !ids.remove(id) {
            return Err(SavedListingError::NotSaved(id.clone()));
        }
        self.write(&ids)
    }

    fn saved_ids(&self) -> Result<BTreeSet<ListingId>, SavedListingError> {
        let _guard = self.lock.lock().expect("saved listing file mutex poisoned");
        self.read()
    }
}

pub(crate) fn parse_sort(raw: &str) -> Result<SortOrder, String> {
    raw.parse::<SortOrder>().map_err(|err| err.to_string())
}

pub(crate) fn parse_market_rate(raw: &str) -> Result<f64, String> {
    validate_market_rate(raw).map_err(|err| err.to_string())
}
