use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::model::{CandidateFile, FileId};

/// Playable preview URLs for the current batch, keyed by file id.
///
/// URLs are owned here and must be revoked whenever the batch is replaced.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ObjectUrlCache {
    live: BTreeMap<FileId, Url>,
    issued_total: u64,
    revoked_total: u64,
}

impl ObjectUrlCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Revokes every live URL and issues one per file in `files`.
    ///
    /// Returns the revoked URLs. Files whose path is not absolute get no URL.
    pub fn regenerate(&mut self, files: &[CandidateFile]) -> Vec<Url> {
        let revoked = self.revoke_all();
        for file in files {
            if let Ok(url) = Url::from_file_path(&file.path) {
                self.live.insert(file.id, url);
                self.issued_total += 1;
            }
        }
        revoked
    }

    pub fn revoke_all(&mut self) -> Vec<Url> {
        let revoked: Vec<Url> = std::mem::take(&mut self.live).into_values().collect();
        self.revoked_total += revoked.len() as u64;
        revoked
    }

    pub fn get(&self, id: FileId) -> Option<&Url> {
        self.live.get(&id)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn issued_total(&self) -> u64 {
        self.issued_total
    }

    pub fn revoked_total(&self) -> u64 {
        self.revoked_total
    }
}
