use crate::entry::ConfigEntry;
use crate::error::Result;
use crate::store::Store;
use std::fs;
use std::path::Path;

/// Store a source file that has no header block, stamping one from the
/// given identifier and restore name. `restore_as` of `None` restores to
/// the default filename. Returns the identifier.
pub fn create_configuration(
    store: &mut Store,
    source_path: &Path,
    identifier: &str,
    restore_as: Option<String>,
    key: &[u8],
) -> Result<String> {
    let raw = fs::read_to_string(source_path)?;

    let mut entry = ConfigEntry::init(identifier, restore_as);
    entry.set_content(&raw)?;
    entry.save(store, &source_path.to_string_lossy(), key)?;
    Ok(entry.identifier().to_string())
}
