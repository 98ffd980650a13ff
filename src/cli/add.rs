use crate::entry::ConfigEntry;
use crate::error::{EnvaultError, Result};
use crate::store::Store;
use std::path::Path;

/// Store a source file that already carries a header block.
/// Returns the identifier the configuration was stored under.
///
/// The key is exercised by the encryption step before any file or manifest
/// write, so an unusable secret leaves the folder untouched.
pub fn store_configuration(store: &mut Store, source_path: &Path, key: &[u8]) -> Result<String> {
    let entry = ConfigEntry::from_source(source_path, &store.config)?;
    if entry.is_sealed() {
        // The path dispatched as a stored ciphertext file; storing it again
        // would double-encrypt. Use `create` to force an identifier instead.
        return Err(EnvaultError::InvalidHeader(format!(
            "'{}' looks like a stored ciphertext file, not a source file",
            source_path.display()
        )));
    }
    entry.save(store, &source_path.to_string_lossy(), key)?;
    Ok(entry.identifier().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EnvaultError;
    use crate::store::{StoreConfig, DEFAULT_FOLDER};
    use tempfile::tempdir;

    const KEY: &[u8] = b"s3cret-key-16byt";

    #[test]
    fn test_store_configuration() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("app.env");
        std::fs::write(
            &source,
            "#- identifier: test\n#- restore-as: .env.test\nHELLO=WORLD\n",
        )
        .unwrap();

        let mut store = Store::open(StoreConfig::at(dir.path().join(DEFAULT_FOLDER))).unwrap();
        let id = store_configuration(&mut store, &source, KEY).unwrap();

        assert_eq!(id, "test");
        assert!(store.resolve_path("test").exists());
        assert_eq!(store.identifiers(), vec!["test".to_string()]);
    }

    #[test]
    fn test_store_headerless_source_fails() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("app.env");
        std::fs::write(&source, "HELLO=WORLD\n").unwrap();

        let mut store = Store::open(StoreConfig::at(dir.path().join(DEFAULT_FOLDER))).unwrap();
        let result = store_configuration(&mut store, &source, KEY);
        assert!(matches!(result, Err(EnvaultError::InvalidHeader(_))));
    }

    #[test]
    fn test_store_without_restore_as_fails() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("app.env");
        std::fs::write(&source, "#- identifier: bare\nA=1\n").unwrap();

        let folder = dir.path().join(DEFAULT_FOLDER);
        let mut store = Store::open(StoreConfig::at(&folder)).unwrap();
        let result = store_configuration(&mut store, &source, KEY);

        // An identifier line alone is not a complete header for a source
        assert!(matches!(result, Err(EnvaultError::InvalidHeader(_))));
        assert!(store.identifiers().is_empty());
        assert!(!folder.join(".env.bare").exists());
    }

    #[test]
    fn test_store_with_short_secret_touches_nothing() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("app.env");
        std::fs::write(
            &source,
            "#- identifier: test\n#- restore-as: .env.test\nHELLO=WORLD\n",
        )
        .unwrap();

        let folder = dir.path().join(DEFAULT_FOLDER);
        let mut store = Store::open(StoreConfig::at(&folder)).unwrap();
        let result = store_configuration(&mut store, &source, b"s3cret-key-15by");

        assert!(matches!(result, Err(EnvaultError::InvalidKeySize(15))));
        assert!(store.identifiers().is_empty());
        assert!(!folder.join(".env.test").exists());
    }
}
