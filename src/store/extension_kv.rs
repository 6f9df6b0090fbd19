//! Reader for the Chromium-family extension storage.
//!
//! The extension keeps its local state in a LevelDB under the profile's
//! `Local Extension Settings`, with scalar values serialized JSON-style
//! (quoted). The store is opened read-only and non-creating so a probe
//! never plants an empty database in a vendor directory.

use std::path::PathBuf;

use rusty_leveldb::{StatusCode, DB};

use crate::base::ExtractError;
use crate::record::CredentialRecord;
use crate::store::vendors;

const EMAIL_KEY: &[u8] = b"userEmail";
const KEY_HASH_KEY: &[u8] = b"keyHash";
const ITERATIONS_KEY: &[u8] = b"kdfIterations";

/// Reads the extension's local storage out of the first vendor candidate
/// that opens.
pub struct ExtensionStoreReader {
    candidates: Vec<(&'static str, PathBuf)>,
}

impl ExtensionStoreReader {
    /// Reader over the platform's vendor candidate list.
    pub fn new() -> Self {
        Self {
            candidates: vendors::extension_store_candidates(),
        }
    }

    /// Reader over an explicit candidate list.
    pub fn with_candidates(candidates: Vec<(&'static str, PathBuf)>) -> Self {
        Self { candidates }
    }

    /// Try the candidates in order; the first store that opens wins.
    ///
    /// An absent store advances to the next candidate. A held store lock
    /// is `SourceBusy`: the right store was found but a live browser owns
    /// it. A lookup failure after a successful open is `StructureChanged`
    /// and does not continue down the list — the store was found, its
    /// key layout just doesn't match anymore.
    pub fn read(&self) -> Result<CredentialRecord, ExtractError> {
        for (browser, path) in &self.candidates {
            if !path.is_dir() {
                continue;
            }
            let mut options = rusty_leveldb::Options::default();
            options.create_if_missing = false;
            let mut db = match DB::open(path, options) {
                Ok(db) => db,
                Err(status) if status.code == StatusCode::LockError => {
                    tracing::warn!(browser = %browser, path = %path.display(), "extension store is locked");
                    return Err(ExtractError::SourceBusy);
                }
                Err(status) => {
                    tracing::debug!(
                        browser = %browser,
                        path = %path.display(),
                        code = ?status.code,
                        "candidate store did not open"
                    );
                    continue;
                }
            };
            tracing::debug!(browser = %browser, path = %path.display(), "opened extension store");
            let record = read_fields(&mut db);
            // Drop the handle (and its lock) before reporting anything,
            // or the next attempt would see a spurious busy store.
            drop(db);
            return record;
        }
        Err(ExtractError::not_found("no extension store candidate exists"))
    }
}

impl Default for ExtensionStoreReader {
    fn default() -> Self {
        Self::new()
    }
}

fn read_fields(db: &mut DB) -> Result<CredentialRecord, ExtractError> {
    let email = read_text(db, EMAIL_KEY)?;
    let key_hash = read_text(db, KEY_HASH_KEY)?;
    let kdf_iterations = read_text(db, ITERATIONS_KEY)?
        .parse()
        .map_err(|_| ExtractError::StructureChanged)?;
    Ok(CredentialRecord {
        email,
        key_hash,
        kdf_iterations,
    })
}

/// Look up one key; values are stored JSON-quoted, so decode UTF-8 and
/// strip the surrounding quotes.
fn read_text(db: &mut DB, key: &[u8]) -> Result<String, ExtractError> {
    let raw = db.get(key).ok_or(ExtractError::StructureChanged)?;
    let text = String::from_utf8(raw).map_err(|_| ExtractError::StructureChanged)?;
    Ok(text.trim_matches('"').to_owned())
}
