mod parser;
mod provider;

pub use provider::from_provider_records;

use std::io::Read;
use std::path::Path;

use tracing::info;

use super::raw::RawListing;

/// Source document layouts the importer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedFormat {
    /// Provider search payload: `{"properties": [...]}` or a bare array of records.
    ProviderJson,
    /// Flat export with one column per raw listing field.
    Csv,
}

impl FeedFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::Csv,
            _ => Self::ProviderJson,
        }
    }
}

#[derive(Debug)]
pub enum FeedImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for FeedImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedImportError::Io(err) => write!(f, "failed to read listing feed: {}", err),
            FeedImportError::Csv(err) => write!(f, "invalid listing CSV data: {}", err),
            FeedImportError::Json(err) => write!(f, "invalid listing feed payload: {}", err),
        }
    }
}

impl std::error::Error for FeedImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FeedImportError::Io(err) => Some(err),
            FeedImportError::Csv(err) => Some(err),
            FeedImportError::Json(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for FeedImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for FeedImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<serde_json::Error> for FeedImportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Reads raw listing records from provider exports.
///
/// Document-level problems (unreadable file, broken JSON) are errors; individual records
/// that cannot be read are skipped so the rest of the batch still gets valued.
pub struct ListingFeedImporter;

impl ListingFeedImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<RawListing>, FeedImportError> {
        let path = path.as_ref();
        let format = FeedFormat::from_path(path);
        let file = std::fs::File::open(path)?;
        let records = Self::from_reader(file, format)?;
        info!(
            path = %path.display(),
            ?format,
            count = records.len(),
            "imported listing feed"
        );
        Ok(records)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        format: FeedFormat,
    ) -> Result<Vec<RawListing>, FeedImportError> {
        match format {
            FeedFormat::ProviderJson => provider::parse_payload(reader),
            FeedFormat::Csv => parser::parse_records(reader).map_err(FeedImportError::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn format_follows_file_extension() {
        assert_eq!(FeedFormat::from_path(Path::new("feed.CSV")), FeedFormat::Csv);
        assert_eq!(
            FeedFormat::from_path(Path::new("feed.json")),
            FeedFormat::ProviderJson
        );
        assert_eq!(
            FeedFormat::from_path(Path::new("listings")),
            FeedFormat::ProviderJson
        );
    }

    #[test]
    fn broken_json_is_a_feed_error() {
        let err = ListingFeedImporter::from_reader(
            Cursor::new("{\"properties\": ["),
            FeedFormat::ProviderJson,
        )
        .expect_err("truncated payload rejected");
        assert!(matches!(err, FeedImportError::Json(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = ListingFeedImporter::from_path("/definitely/not/here.json")
            .expect_err("missing file rejected");
        assert!(matches!(err, FeedImportError::Io(_)));
    }
}
