use crate::store::Store;

/// One listed configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub identifier: String,
    /// Source path the configuration was stored from
    pub source: String,
    /// Whether the ciphertext file is actually present on disk
    pub present: bool,
}

/// List all stored configurations from the manifest snapshot.
///
/// An entry whose ciphertext file has gone missing is still listed, marked
/// absent, so callers can warn about it instead of aborting the listing.
pub fn list_configurations(store: &Store) -> Vec<ListEntry> {
    let mut entries: Vec<ListEntry> = store
        .identifiers()
        .into_iter()
        .map(|identifier| {
            let present = store.resolve_path(&identifier).exists();
            let source = store
                .source_of(&identifier)
                .unwrap_or_default()
                .to_string();
            ListEntry {
                identifier,
                source,
                present,
            }
        })
        .collect();
    entries.sort_by(|a, b| a.identifier.cmp(&b.identifier));
    entries
}
