use crate::error::Result;
use crate::store::Store;
use std::path::PathBuf;

/// Remove a stored configuration: its manifest entry and its ciphertext
/// file. Returns the deleted file path, or `None` when the file was
/// already gone (the manifest entry is still evicted so the folder ends up
/// consistent either way).
pub fn remove_configuration(store: &mut Store, identifier: &str) -> Result<Option<PathBuf>> {
    store.remove(identifier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::add::store_configuration;
    use crate::cli::get::fetch_and_restore;
    use crate::error::EnvaultError;
    use crate::store::{StoreConfig, DEFAULT_FOLDER};
    use tempfile::tempdir;

    const KEY: &[u8] = b"s3cret-key-16byt";

    #[test]
    fn test_remove_then_fetch_fails() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("app.env");
        std::fs::write(
            &source,
            "#- identifier: production\n#- restore-as: .env.prod\nDB_HOST=localhost\n",
        )
        .unwrap();

        let mut store = Store::open(StoreConfig::at(dir.path().join(DEFAULT_FOLDER))).unwrap();
        store_configuration(&mut store, &source, KEY).unwrap();

        let deleted = remove_configuration(&mut store, "production").unwrap();
        assert_eq!(deleted, Some(store.resolve_path("production")));
        assert!(!store.resolve_path("production").exists());

        let result = fetch_and_restore(&store, "production", dir.path(), KEY);
        assert!(matches!(result, Err(EnvaultError::IdentifierNotFound(_))));
    }

    #[test]
    fn test_remove_unknown_identifier_fails() {
        let dir = tempdir().unwrap();
        let mut store = Store::open(StoreConfig::at(dir.path().join(DEFAULT_FOLDER))).unwrap();
        assert!(matches!(
            remove_configuration(&mut store, "ghost"),
            Err(EnvaultError::IdentifierNotFound(_))
        ));
    }
}
