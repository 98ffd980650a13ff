use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the manifest document inside the storage folder
pub const MANIFEST_FILE: &str = "manifest.json";

/// Durable mapping from original source file path to assigned identifier.
///
/// Persisted as `{ "identifiers": { "<sourcePath>": "<identifier>" } }` in
/// the storage folder. Every mutation rewrites the whole document; there is
/// no locking, so concurrent processes race and the last writer wins.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Manifest {
    pub identifiers: BTreeMap<String, String>,
}

impl Manifest {
    /// Load the manifest from a storage folder.
    /// A missing document is an empty manifest, not an error.
    pub fn load(folder: &Path) -> Result<Self> {
        let path = Self::document_path(folder);
        if !path.exists() {
            return Ok(Self::default());
        }
        let bytes = fs::read(&path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Rewrite the whole document.
    /// Written to a sibling temp file and renamed into place so a crash
    /// mid-write cannot leave a half-written manifest behind.
    pub fn persist(&self, folder: &Path) -> Result<()> {
        let path = Self::document_path(folder);
        let tmp = folder.join(format!("{}.tmp", MANIFEST_FILE));
        let mut bytes = serde_json::to_vec_pretty(self)?;
        bytes.push(b'\n');
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    /// Upsert an entry and persist immediately. Last write wins on a
    /// duplicate source path.
    pub fn add_entry(
        &mut self,
        source_path: impl Into<String>,
        identifier: impl Into<String>,
        folder: &Path,
    ) -> Result<()> {
        self.identifiers
            .insert(source_path.into(), identifier.into());
        self.persist(folder)
    }

    /// Remove an entry by source path; a miss is a no-op.
    /// Returns whether anything was removed.
    pub fn evict_entry(&mut self, source_path: &str, folder: &Path) -> Result<bool> {
        if self.identifiers.remove(source_path).is_none() {
            return Ok(false);
        }
        self.persist(folder)?;
        Ok(true)
    }

    /// Snapshot of all assigned identifiers; order is unspecified
    pub fn identifiers(&self) -> Vec<String> {
        self.identifiers.values().cloned().collect()
    }

    /// Reverse lookup: the source path an identifier was assigned from
    pub fn path_of(&self, identifier: &str) -> Option<&str> {
        self.identifiers
            .iter()
            .find(|(_, id)| id.as_str() == identifier)
            .map(|(path, _)| path.as_str())
    }

    pub fn contains_identifier(&self, identifier: &str) -> bool {
        self.identifiers.values().any(|id| id == identifier)
    }

    fn document_path(folder: &Path) -> PathBuf {
        folder.join(MANIFEST_FILE)
    }
}
