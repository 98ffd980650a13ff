use crate::error::{EnvaultError, Result};

/// Line prefix carrying the identifier inside plaintext content
pub const IDENTIFIER_PREFIX: &str = "#- identifier: ";

/// Line prefix carrying the restore filename inside plaintext content
pub const RESTORE_AS_PREFIX: &str = "#- restore-as: ";

/// Filename used on restore when the header carries no restore-as line
pub const DEFAULT_RESTORE_AS: &str = ".env";

/// Metadata block embedded as leading comment lines of a configuration file.
///
/// Values are plain text and must not contain newlines or the literal
/// prefix strings; no escaping is performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Stable name of the configuration, unique per storage folder
    pub identifier: String,
    /// Filename the configuration is restored as; `None` means the default
    pub restore_as: Option<String>,
}

impl Header {
    pub fn new(identifier: impl Into<String>, restore_as: Option<String>) -> Self {
        Self {
            identifier: identifier.into(),
            restore_as,
        }
    }

    /// Extract a header from file content.
    ///
    /// Every line is scanned, not just the first two: the header lines may
    /// appear anywhere and in any order, and the last occurrence of a prefix
    /// wins. Values are whitespace-trimmed. Fails when no non-empty
    /// identifier line is present; a missing restore-as is tolerated and the
    /// default is applied lazily via `restore_target`.
    pub fn parse(text: &str) -> Result<Self> {
        let mut identifier = String::new();
        let mut restore_as = String::new();

        for line in text.lines() {
            let line = line.trim();
            if let Some(value) = line.strip_prefix(IDENTIFIER_PREFIX) {
                identifier = value.trim().to_string();
            }
            if let Some(value) = line.strip_prefix(RESTORE_AS_PREFIX) {
                restore_as = value.trim().to_string();
            }
        }

        if identifier.is_empty() {
            return Err(EnvaultError::InvalidHeader(
                "identifier not found".to_string(),
            ));
        }

        Ok(Self {
            identifier,
            restore_as: if restore_as.is_empty() {
                None
            } else {
                Some(restore_as)
            },
        })
    }

    /// As `parse`, but the restore-as line is mandatory
    pub fn parse_strict(text: &str) -> Result<Self> {
        let header = Self::parse(text)?;
        if header.restore_as.is_none() {
            return Err(EnvaultError::InvalidHeader(
                "restore-as not found".to_string(),
            ));
        }
        Ok(header)
    }

    /// Render the two header lines, each with a trailing newline.
    /// A missing restore-as renders as the default filename.
    pub fn render(&self) -> String {
        format!(
            "{}{}\n{}{}\n",
            IDENTIFIER_PREFIX,
            self.identifier,
            RESTORE_AS_PREFIX,
            self.restore_target()
        )
    }

    /// Filename this configuration restores to
    pub fn restore_target(&self) -> &str {
        self.restore_as.as_deref().unwrap_or(DEFAULT_RESTORE_AS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_both_lines() {
        let text = "#- identifier: staging\n#- restore-as: .env.staging\nDB_HOST=localhost\n";
        let header = Header::parse(text).unwrap();
        assert_eq!(header.identifier, "staging");
        assert_eq!(header.restore_as.as_deref(), Some(".env.staging"));
    }

    #[test]
    fn test_parse_is_order_insensitive() {
        let text = "#- restore-as: .env.prod\nKEY=value\n#- identifier: prod\n";
        let header = Header::parse(text).unwrap();
        assert_eq!(header.identifier, "prod");
        assert_eq!(header.restore_as.as_deref(), Some(".env.prod"));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let text = "  #- identifier:   spaced   \n  #- restore-as:  .env.x \n";
        let header = Header::parse(text).unwrap();
        assert_eq!(header.identifier, "spaced");
        assert_eq!(header.restore_as.as_deref(), Some(".env.x"));
    }

    #[test]
    fn test_parse_last_occurrence_wins() {
        let text = "#- identifier: first\n#- identifier: second\n";
        let header = Header::parse(text).unwrap();
        assert_eq!(header.identifier, "second");
    }

    #[test]
    fn test_parse_missing_identifier_fails() {
        let result = Header::parse("#- restore-as: .env\nKEY=value\n");
        assert!(matches!(result, Err(EnvaultError::InvalidHeader(_))));
    }

    #[test]
    fn test_parse_empty_identifier_fails() {
        let result = Header::parse("#- identifier: \nKEY=value\n");
        assert!(matches!(result, Err(EnvaultError::InvalidHeader(_))));
    }

    #[test]
    fn test_parse_missing_restore_as_is_tolerated() {
        let header = Header::parse("#- identifier: bare\n").unwrap();
        assert_eq!(header.restore_as, None);
        assert_eq!(header.restore_target(), DEFAULT_RESTORE_AS);
    }

    #[test]
    fn test_parse_strict_requires_restore_as() {
        let result = Header::parse_strict("#- identifier: bare\n");
        assert!(matches!(result, Err(EnvaultError::InvalidHeader(_))));
    }

    #[test]
    fn test_render_parse_roundtrip() {
        let header = Header::new("ci", Some(".env.ci".to_string()));
        let parsed = Header::parse(&header.render()).unwrap();
        assert_eq!(parsed, header);
    }

    #[test]
    fn test_render_applies_default_restore_as() {
        let header = Header::new("bare", None);
        let rendered = header.render();
        assert!(rendered.contains("#- restore-as: .env\n"));

        // The default becomes explicit after a roundtrip
        let parsed = Header::parse(&rendered).unwrap();
        assert_eq!(parsed.restore_as.as_deref(), Some(DEFAULT_RESTORE_AS));
    }
}
