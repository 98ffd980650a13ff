use crate::entry::ConfigEntry;
use crate::error::{EnvaultError, Result};
use crate::store::Store;
use std::fs;
use std::path::{Path, PathBuf};

/// Fetch a stored configuration by identifier, decrypt it, and write it to
/// its restore filename inside `dest_dir`. Returns the restored path.
///
/// The manifest is the authoritative identifier index; an identifier it
/// does not know fails with `IdentifierNotFound` before any file is read.
pub fn fetch_and_restore(
    store: &Store,
    identifier: &str,
    dest_dir: &Path,
    key: &[u8],
) -> Result<PathBuf> {
    if !store.contains(identifier) {
        return Err(EnvaultError::IdentifierNotFound(identifier.to_string()));
    }

    let path = store.resolve_path(identifier);
    let envelope = fs::read_to_string(&path).map_err(|e| {
        EnvaultError::Io(std::io::Error::new(
            e.kind(),
            format!("reading {}: {}", path.display(), e),
        ))
    })?;

    let mut entry = ConfigEntry::from_ciphertext(envelope, identifier);
    entry.restore(dest_dir, key)
}
