//! Envault - Encrypted Environment Configuration Storage
//!
//! Stores a user's environment-configuration files encrypted at rest in a
//! managed folder, keyed by user-chosen identifiers. Each configuration
//! carries a two-line metadata header inside its plaintext:
//!
//! ```text
//! #- identifier: production
//! #- restore-as: .env.prod
//! ```
//!
//! The header survives the encrypt/decrypt round trip, so a restored file
//! knows the name it should be written back as. A `manifest.json` in the
//! storage folder maps original source paths to identifiers and backs
//! list/lookup/removal.
//!
//! ## Storage format
//!
//! Each configuration is stored at `<folder>/<prefix><identifier>` as the
//! lowercase hex of `IV(16 bytes) || AES-CFB ciphertext`. The secret's raw
//! bytes are the key (16, 24, or 32 of them). There is no authentication
//! tag: decryption succeeding proves nothing about integrity.
//!
//! ## Example
//!
//! ```no_run
//! use envault::cli::{create_configuration, fetch_and_restore};
//! use envault::store::{Store, StoreConfig};
//! use std::path::Path;
//!
//! let key = b"0123456789abcdef";
//! let mut store = Store::open(StoreConfig::default()).unwrap();
//!
//! create_configuration(
//!     &mut store,
//!     Path::new("secrets.txt"),
//!     "production",
//!     Some(".env.prod".into()),
//!     key,
//! ).unwrap();
//!
//! fetch_and_restore(&store, "production", Path::new("."), key).unwrap();
//! ```

pub mod cipher;
pub mod cli;
pub mod entry;
pub mod error;
pub mod header;
pub mod manifest;
pub mod secret;
pub mod store;

pub use entry::ConfigEntry;
pub use error::{EnvaultError, Result};
pub use header::Header;
pub use manifest::Manifest;
pub use store::{Store, StoreConfig};
