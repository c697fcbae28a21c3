use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::UserAgentRecord;

/// Dataset shipped with the crate: a gzip-compressed JSON array of records.
static EMBEDDED_DATASET: &[u8] = include_bytes!("../data/useragents.json.gz");

/// Immutable, ordered collection of user-agent records.
///
/// A store is loaded once and never mutated; every selector operation is a
/// pure read over it. Loading is atomic: either the full list deserializes
/// or the constructor fails with no partial state.
#[derive(Debug)]
pub struct RecordStore {
    records: Vec<UserAgentRecord>,
}

impl RecordStore {
    /// Load the dataset embedded in the crate.
    pub fn embedded() -> Result<Self> {
        Self::from_gzip(EMBEDDED_DATASET)
    }

    /// Load a gzip-compressed JSON dataset from a file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(Error::DataUnavailable)?;
        Self::from_gzip(&bytes)
    }

    /// Decompress and parse a gzip-compressed JSON dataset.
    pub fn from_gzip(bytes: &[u8]) -> Result<Self> {
        let mut json = String::new();
        GzDecoder::new(bytes)
            .read_to_string(&mut json)
            .map_err(|e| Error::DataCorrupt(e.into()))?;
        Self::from_json(&json)
    }

    /// Parse a JSON array of records.
    pub fn from_json(json: &str) -> Result<Self> {
        let records: Vec<UserAgentRecord> =
            serde_json::from_str(json).map_err(|e| Error::DataCorrupt(e.into()))?;
        debug!(count = records.len(), "loaded user-agent records");
        Ok(Self::from_records(records))
    }

    /// Build a store from already-parsed records.
    pub fn from_records(records: Vec<UserAgentRecord>) -> Self {
        Self { records }
    }

    /// The full record list, in load order.
    pub fn records(&self) -> &[UserAgentRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &UserAgentRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use flate2::write::GzEncoder;
    use flate2::Compression;

    use super::*;

    #[test]
    fn embedded_dataset_loads() {
        let store = RecordStore::embedded().unwrap();
        assert!(!store.is_empty());
        for record in store.iter() {
            assert!(!record.user_agent.is_empty());
            assert!(record.weight >= 0.0);
            assert!(record.screen_width > 0);
        }
    }

    #[test]
    fn embedded_load_is_idempotent() {
        let first = RecordStore::embedded().unwrap();
        let second = RecordStore::embedded().unwrap();
        assert_eq!(first.records(), second.records());
    }

    #[test]
    fn gzip_round_trip() {
        let json = r#"[{
            "platform": "Win32",
            "vendor": "Google Inc.",
            "userAgent": "Mozilla/5.0 (Windows NT 10.0; Win64; x64) Chrome/120.0.0.0",
            "screenWidth": 1920,
            "screenHeight": 1080,
            "connection": {"type": "wifi", "effectiveType": "4g", "downlink": 10.0, "rtt": 50.0},
            "weight": 0.5,
            "language": "en-US",
            "appName": "Netscape",
            "pluginsLength": 5
        }]"#;
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(json.as_bytes()).unwrap();
        let compressed = encoder.finish().unwrap();

        let store = RecordStore::from_gzip(&compressed).unwrap();
        assert_eq!(store.len(), 1);
        let record = &store.records()[0];
        assert_eq!(record.platform, "Win32");
        assert_eq!(record.screen_width, 1920);
        let connection = record.connection.as_ref().unwrap();
        assert_eq!(connection.kind.as_deref(), Some("wifi"));
        assert_eq!(connection.effective_type.as_deref(), Some("4g"));
        assert_eq!(connection.downlink_max, None);
    }

    #[test]
    fn absent_optional_fields_default() {
        let json = r#"[{
            "platform": "iPhone",
            "vendor": "Apple Computer, Inc.",
            "userAgent": "Mozilla/5.0 (iPhone; CPU iPhone OS 18_0 like Mac OS X)",
            "screenWidth": 390,
            "screenHeight": 844,
            "appName": "Netscape"
        }]"#;
        let store = RecordStore::from_json(json).unwrap();
        let record = &store.records()[0];
        assert_eq!(record.weight, 0.0);
        assert!(record.connection.is_none());
        assert!(record.language.is_none());
        assert!(record.oscpu.is_none());
        assert_eq!(record.plugins_length, 0);
    }

    #[test]
    fn garbage_bytes_are_corrupt() {
        let err = RecordStore::from_gzip(b"definitely not gzip").unwrap_err();
        assert!(matches!(err, Error::DataCorrupt(_)));
    }

    #[test]
    fn truncated_json_is_corrupt() {
        let err = RecordStore::from_json(r#"[{"platform": "Win32""#).unwrap_err();
        assert!(matches!(err, Error::DataCorrupt(_)));
    }

    #[test]
    fn missing_file_is_unavailable() {
        let err = RecordStore::from_path("/nonexistent/useragents.json.gz").unwrap_err();
        assert!(matches!(err, Error::DataUnavailable(_)));
    }
}
