use crate::error::{EnvaultError, Result};
use crate::manifest::Manifest;
use std::fs;
use std::path::{Path, PathBuf};

/// Default name of the storage folder, relative to the working directory
pub const DEFAULT_FOLDER: &str = ".env-manager";

/// Default filename prefix for stored ciphertext files
pub const STORED_PREFIX: &str = ".env.";

/// Where and how configurations are stored.
///
/// Passed explicitly to `Store::open` instead of living in process-wide
/// state, so tests and callers can point at any folder.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Storage directory holding ciphertext files and the manifest
    pub folder: PathBuf,
    /// Filename prefix for ciphertext files: `<prefix><identifier>`
    pub stored_prefix: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            folder: PathBuf::from(DEFAULT_FOLDER),
            stored_prefix: STORED_PREFIX.to_string(),
        }
    }
}

impl StoreConfig {
    pub fn at(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
            ..Self::default()
        }
    }

    /// Whether a path points into the managed folder or carries the stored
    /// prefix, meaning its content is a ciphertext envelope
    pub fn is_stored_path(&self, path: &Path) -> bool {
        let in_folder = path.starts_with(&self.folder)
            || path
                .components()
                .any(|c| c.as_os_str() == self.folder.as_os_str());
        let has_prefix = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with(&self.stored_prefix));
        in_folder || has_prefix
    }

    /// Best-effort identifier from a stored file name: the part after the
    /// prefix. Only reliable for `<prefix><identifier>` layouts; manifest
    /// lookups are the authoritative path.
    pub fn identifier_from_path<'a>(&self, path: &'a Path) -> Option<&'a str> {
        let name = path.file_name()?.to_str()?;
        match name.strip_prefix(&self.stored_prefix) {
            Some(id) if !id.is_empty() => Some(id),
            _ => None,
        }
    }
}

/// An opened storage folder and its manifest.
///
/// Lives for one command invocation; nothing here coordinates with other
/// processes operating on the same folder.
pub struct Store {
    pub config: StoreConfig,
    manifest: Manifest,
}

impl Store {
    /// Open the storage folder, creating the directory (not its parents) on
    /// first use, and load the manifest, tolerating its absence.
    pub fn open(config: StoreConfig) -> Result<Self> {
        if let Err(e) = fs::create_dir(&config.folder) {
            if e.kind() != std::io::ErrorKind::AlreadyExists {
                return Err(e.into());
            }
        }
        let manifest = Manifest::load(&config.folder)?;
        Ok(Self { config, manifest })
    }

    /// Record `(source path -> identifier)` in the manifest
    pub fn add_file_identifier(&mut self, source_path: &str, identifier: &str) -> Result<()> {
        self.manifest
            .add_entry(source_path, identifier, &self.config.folder)
    }

    /// Drop a manifest entry by source path; a miss is a no-op
    pub fn evict_file_identifier(&mut self, source_path: &str) -> Result<bool> {
        self.manifest.evict_entry(source_path, &self.config.folder)
    }

    /// All assigned identifiers, in unspecified order
    pub fn identifiers(&self) -> Vec<String> {
        self.manifest.identifiers()
    }

    /// Ciphertext file path for an identifier
    pub fn resolve_path(&self, identifier: &str) -> PathBuf {
        self.config
            .folder
            .join(format!("{}{}", self.config.stored_prefix, identifier))
    }

    /// Source path an identifier was stored from, if the manifest knows it
    pub fn source_of(&self, identifier: &str) -> Option<&str> {
        self.manifest.path_of(identifier)
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.manifest.contains_identifier(identifier)
    }

    /// Remove a configuration: evict its manifest entry, then delete the
    /// ciphertext file. Returns the path of the deleted file; a file that
    /// was already gone is reported via `Ok(None)` rather than failing, so
    /// a half-removed configuration can still be cleaned up.
    pub fn remove(&mut self, identifier: &str) -> Result<Option<PathBuf>> {
        let source = self
            .manifest
            .path_of(identifier)
            .map(str::to_string)
            .ok_or_else(|| EnvaultError::IdentifierNotFound(identifier.to_string()))?;

        self.manifest.evict_entry(&source, &self.config.folder)?;

        let path = self.resolve_path(identifier);
        match fs::remove_file(&path) {
            Ok(()) => Ok(Some(path)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_creates_folder() {
        let dir = tempdir().unwrap();
        let folder = dir.path().join(DEFAULT_FOLDER);
        assert!(!folder.exists());

        let store = Store::open(StoreConfig::at(&folder)).unwrap();
        assert!(folder.is_dir());
        assert!(store.identifiers().is_empty());
    }

    #[test]
    fn test_open_existing_folder_loads_manifest() {
        let dir = tempdir().unwrap();
        let folder = dir.path().join(DEFAULT_FOLDER);

        let mut store = Store::open(StoreConfig::at(&folder)).unwrap();
        store.add_file_identifier(".env.local", "local").unwrap();

        let reopened = Store::open(StoreConfig::at(&folder)).unwrap();
        assert_eq!(reopened.identifiers(), vec!["local".to_string()]);
        assert_eq!(reopened.source_of("local"), Some(".env.local"));
    }

    #[test]
    fn test_evict_file_identifier() {
        let dir = tempdir().unwrap();
        let mut store = Store::open(StoreConfig::at(dir.path().join(DEFAULT_FOLDER))).unwrap();
        store.add_file_identifier(".env.local", "local").unwrap();

        assert!(store.evict_file_identifier(".env.local").unwrap());
        assert!(!store.evict_file_identifier(".env.local").unwrap());
        assert!(store.identifiers().is_empty());
    }

    #[test]
    fn test_open_fails_without_parent() {
        let dir = tempdir().unwrap();
        // Only the directory itself is created, never its parents
        let nested = dir.path().join("missing-parent").join(DEFAULT_FOLDER);
        assert!(Store::open(StoreConfig::at(nested)).is_err());
    }

    #[test]
    fn test_resolve_path_joins_prefix_and_identifier() {
        let dir = tempdir().unwrap();
        let folder = dir.path().join(DEFAULT_FOLDER);
        let store = Store::open(StoreConfig::at(&folder)).unwrap();
        assert_eq!(store.resolve_path("prod"), folder.join(".env.prod"));
    }

    #[test]
    fn test_remove_deletes_entry_and_file() {
        let dir = tempdir().unwrap();
        let folder = dir.path().join(DEFAULT_FOLDER);
        let mut store = Store::open(StoreConfig::at(&folder)).unwrap();

        store.add_file_identifier("secrets.txt", "prod").unwrap();
        std::fs::write(store.resolve_path("prod"), "abcd").unwrap();

        let deleted = store.remove("prod").unwrap();
        assert_eq!(deleted, Some(folder.join(".env.prod")));
        assert!(!folder.join(".env.prod").exists());
        assert!(store.identifiers().is_empty());
    }

    #[test]
    fn test_remove_unknown_identifier_fails() {
        let dir = tempdir().unwrap();
        let mut store = Store::open(StoreConfig::at(dir.path().join(DEFAULT_FOLDER))).unwrap();
        assert!(matches!(
            store.remove("ghost"),
            Err(EnvaultError::IdentifierNotFound(_))
        ));
    }

    #[test]
    fn test_remove_tolerates_missing_file() {
        let dir = tempdir().unwrap();
        let mut store = Store::open(StoreConfig::at(dir.path().join(DEFAULT_FOLDER))).unwrap();
        store.add_file_identifier("secrets.txt", "prod").unwrap();

        // Manifest entry exists but the ciphertext file never did
        assert_eq!(store.remove("prod").unwrap(), None);
        assert!(store.identifiers().is_empty());
    }

    #[test]
    fn test_is_stored_path() {
        let config = StoreConfig::default();
        assert!(config.is_stored_path(Path::new(".env-manager/.env.prod")));
        assert!(config.is_stored_path(Path::new(".env.prod")));
        assert!(!config.is_stored_path(Path::new("secrets.txt")));
        assert!(!config.is_stored_path(Path::new("config/app.toml")));
    }

    #[test]
    fn test_identifier_from_path() {
        let config = StoreConfig::default();
        assert_eq!(
            config.identifier_from_path(Path::new(".env-manager/.env.prod")),
            Some("prod")
        );
        assert_eq!(config.identifier_from_path(Path::new(".env.")), None);
        assert_eq!(config.identifier_from_path(Path::new("plain.txt")), None);
    }
}
