use crate::error::{EnvaultError, Result};
use std::fs;
use std::path::Path;

/// Environment variable consulted first for the secret
pub const SECRET_ENV: &str = "ENVAULT_SECRET";

/// Fallback secret file in the working directory
pub const SECRET_FILE: &str = ".secret";

/// Resolve the shared secret: the `ENVAULT_SECRET` environment variable
/// first, then a `.secret` file next to the invocation. The value is
/// trimmed; an empty value counts as absent. The secret is opaque here --
/// the cipher layer decides whether its length is usable as a key.
pub fn resolve_secret() -> Result<String> {
    if let Ok(value) = std::env::var(SECRET_ENV) {
        let value = value.trim().to_string();
        if !value.is_empty() {
            return Ok(value);
        }
    }

    secret_from_file(Path::new("."))?.ok_or(EnvaultError::SecretNotFound)
}

/// Secret from the `.secret` file in `dir`, trimmed; `None` when the file
/// is missing or holds only whitespace
fn secret_from_file(dir: &Path) -> Result<Option<String>> {
    let path = dir.join(SECRET_FILE);
    if !path.exists() {
        return Ok(None);
    }
    let value = fs::read_to_string(&path)?.trim().to_string();
    Ok((!value.is_empty()).then_some(value))
}
