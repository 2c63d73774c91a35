//! File-backed recipient directory.
//!
//! The directory is a JSON object mapping recipient ids to records:
//!
//! ```json
//! {
//!   "acct-042": {
//!     "display_name": "Billing dept",
//!     "endpoint": "sftp://relay.example.net/billing",
//!     "key_id": "k-2024-11"
//!   }
//! }
//! ```
//!
//! Each lookup re-reads the file, so edits are visible without a restart;
//! callers that want memoization put a [`LookupCache`](super::LookupCache)
//! in front.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{RelayError, Result};

use super::lookup_cache::RecordSource;

/// A single recipient entry as stored in the directory file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientRecord {
    /// Recipient id, filled in from the directory key on load.
    #[serde(default, skip_serializing)]
    pub id: String,
    /// Human-readable name.
    pub display_name: String,
    /// Delivery endpoint URI.
    pub endpoint: String,
    /// Identifier of the key the recipient verifies signatures against.
    pub key_id: String,
}

/// Recipient directory backed by a JSON file on disk.
pub struct FileDirectory {
    path: PathBuf,
}

impl FileDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> Result<HashMap<String, RecipientRecord>> {
        let data = std::fs::read_to_string(&self.path).map_err(|e| {
            RelayError::Directory(format!("{}: {}", self.path.display(), e))
        })?;
        serde_json::from_str(&data)
            .map_err(|e| RelayError::Directory(format!("{}: {}", self.path.display(), e)))
    }
}

impl RecordSource for FileDirectory {
    type Record = RecipientRecord;

    /// Look up `key` in the directory file.
    ///
    /// An unreadable or unparseable file is a fault (`Err`); a well-formed
    /// file without the key is `Ok(None)`.
    fn try_find(&self, key: &str) -> Result<Option<RecipientRecord>> {
        let mut all = self.read_all()?;
        Ok(all.remove(key).map(|mut record| {
            record.id = key.to_string();
            record
        }))
    }
}

/// Helper for tests and fixtures: serialize records back to directory form.
pub fn write_directory(path: &Path, records: &[RecipientRecord]) -> Result<()> {
    let map: HashMap<&str, &RecipientRecord> =
        records.iter().map(|r| (r.id.as_str(), r)).collect();
    let data = serde_json::to_string_pretty(&map)?;
    std::fs::write(path, data)?;
    Ok(())
}
