use crate::cipher;
use crate::error::{EnvaultError, Result};
use crate::header::Header;
use crate::store::{Store, StoreConfig};
use std::fs;
use std::path::{Path, PathBuf};

/// The authoritative content of an entry at each lifecycle stage.
///
/// Exactly one side exists at a time, so an entry can never hold a stale
/// plaintext next to a fresher ciphertext or vice versa.
#[derive(Debug, Clone)]
enum Content {
    /// Decrypted or raw text with its parsed header
    Plaintext { text: String, header: Header },
    /// Hex ciphertext envelope. The identifier is provisional (taken from
    /// the filename or the manifest) until decryption re-parses the header.
    Sealed { hex: String, provisional: String },
}

/// One configuration file: header metadata plus either plaintext content or
/// its encrypted counterpart.
#[derive(Debug, Clone)]
pub struct ConfigEntry {
    content: Content,
}

impl ConfigEntry {
    /// Fresh entry with a header and no body yet; fill it with
    /// `set_content`
    pub fn init(identifier: impl Into<String>, restore_as: Option<String>) -> Self {
        let header = Header::new(identifier, restore_as);
        let text = header.render();
        Self {
            content: Content::Plaintext { text, header },
        }
    }

    /// Entry from plaintext file content carrying an embedded header.
    ///
    /// Source files must carry the full header block, restore-as included;
    /// only the restore-time re-parse in `unseal` tolerates its absence.
    pub fn from_plaintext(text: String) -> Result<Self> {
        let header = Header::parse_strict(&text)?;
        Ok(Self {
            content: Content::Plaintext { text, header },
        })
    }

    /// Entry from a stored ciphertext envelope. Header fields are unknown
    /// until decryption; the given identifier stands in until then.
    pub fn from_ciphertext(hex: String, provisional_identifier: impl Into<String>) -> Self {
        Self {
            content: Content::Sealed {
                hex,
                provisional: provisional_identifier.into(),
            },
        }
    }

    /// Read an entry from disk, dispatching on the source.
    ///
    /// Paths inside the managed folder or carrying the stored prefix load
    /// as sealed ciphertext with the identifier parsed from the filename
    /// tail; this is best-effort and only reliable for the
    /// `<prefix><identifier>` layout. Anything else loads as plaintext and
    /// must carry the full header block, restore-as included.
    pub fn from_source(path: &Path, config: &StoreConfig) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        if config.is_stored_path(path) {
            let provisional = config
                .identifier_from_path(path)
                .map(str::to_string)
                .ok_or_else(|| {
                    EnvaultError::InvalidHeader(format!(
                        "cannot derive an identifier from '{}'",
                        path.display()
                    ))
                })?;
            Ok(Self::from_ciphertext(raw, provisional))
        } else {
            Self::from_plaintext(raw)
        }
    }

    /// Replace the body, stamping the header lines in front of it so they
    /// survive the encrypt/decrypt round trip
    pub fn set_content(&mut self, raw: &str) -> Result<()> {
        match &mut self.content {
            Content::Plaintext { text, header } => {
                *text = format!("{}{}", header.render(), raw);
                Ok(())
            }
            Content::Sealed { .. } => Err(EnvaultError::EntrySealed),
        }
    }

    pub fn identifier(&self) -> &str {
        match &self.content {
            Content::Plaintext { header, .. } => &header.identifier,
            Content::Sealed { provisional, .. } => provisional,
        }
    }

    /// Filename this entry restores to. Sealed entries report the default
    /// until decryption recovers the header.
    pub fn restore_target(&self) -> &str {
        match &self.content {
            Content::Plaintext { header, .. } => header.restore_target(),
            Content::Sealed { .. } => crate::header::DEFAULT_RESTORE_AS,
        }
    }

    pub fn is_sealed(&self) -> bool {
        matches!(self.content, Content::Sealed { .. })
    }

    pub fn plaintext(&self) -> Option<&str> {
        match &self.content {
            Content::Plaintext { text, .. } => Some(text),
            Content::Sealed { .. } => None,
        }
    }

    /// Encrypt the plaintext content into a hex envelope, leaving the entry
    /// itself untouched
    pub fn seal(&self, key: &[u8]) -> Result<String> {
        match &self.content {
            Content::Plaintext { text, .. } => cipher::encrypt(text.as_bytes(), key),
            Content::Sealed { .. } => Err(EnvaultError::EntrySealed),
        }
    }

    /// Decrypt a sealed entry in place and re-parse the header from the
    /// recovered text. The header-derived identifier and restore name are
    /// authoritative from here on; a missing restore-as falls back to the
    /// default at restore time. A plaintext entry is left as-is.
    pub fn unseal(&mut self, key: &[u8]) -> Result<()> {
        let (hex, provisional) = match &self.content {
            Content::Sealed { hex, provisional } => (hex, provisional),
            Content::Plaintext { .. } => return Ok(()),
        };

        let bytes = cipher::decrypt(hex, key)?;
        let text = String::from_utf8(bytes).map_err(|_| {
            EnvaultError::DecryptionFailed(
                "recovered content is not valid UTF-8 (wrong secret?)".to_string(),
            )
        })?;

        // A garbled header usually means the wrong secret was used; keep
        // the provisional identifier in the diagnostic.
        let header = Header::parse(&text).map_err(|_| {
            EnvaultError::DecryptionFailed(format!(
                "no valid header in decrypted content for '{}' (wrong secret?)",
                provisional
            ))
        })?;

        self.content = Content::Plaintext { text, header };
        Ok(())
    }

    /// Encrypt and write this entry into the store.
    ///
    /// The manifest records `(source -> identifier)` before the ciphertext
    /// file is written: a failed write then leaves a dangling manifest
    /// entry, which lookups detect, instead of an untracked ciphertext
    /// file, which nothing would surface.
    pub fn save(&self, store: &mut Store, source_path: &str, key: &[u8]) -> Result<PathBuf> {
        let envelope = self.seal(key)?;

        store.add_file_identifier(source_path, self.identifier())?;

        let dest = store.resolve_path(self.identifier());
        fs::write(&dest, envelope).map_err(|e| {
            EnvaultError::Io(std::io::Error::new(
                e.kind(),
                format!("writing {}: {}", dest.display(), e),
            ))
        })?;
        Ok(dest)
    }

    /// Decrypt if needed and write the plaintext to its restore filename
    /// inside `dest_dir`. Returns the restored path.
    pub fn restore(&mut self, dest_dir: &Path, key: &[u8]) -> Result<PathBuf> {
        self.unseal(key)?;

        let dest = dest_dir.join(self.restore_target());
        let text = self
            .plaintext()
            .expect("entry is plaintext after unsealing");
        fs::write(&dest, text).map_err(|e| {
            EnvaultError::Io(std::io::Error::new(
                e.kind(),
                format!("writing {}: {}", dest.display(), e),
            ))
        })?;
        Ok(dest)
    }
}
