//! Reader for the Firefox extension's structured storage.
//!
//! The extension's state lives in an IndexedDB SQLite file under the
//! profile's `storage/default/moz-extension+++...` directory. The
//! `object_data` table has no keys that are meaningful for this lookup,
//! so the reader materializes the full table in its native order and
//! picks the target rows by the fixed ordinal positions in
//! [`vendors::field_rows`]. Those positions are empirical; every decode
//! surprise collapses to `StructureChanged` instead of propagating.

use std::path::Path;

use rusqlite::{Connection, OpenFlags};

use crate::base::ExtractError;
use crate::record::CredentialRecord;
use crate::store::framing::{decode_framed_field, FieldKind};
use crate::store::vendors::{self, field_rows};

/// Read the three fields out of the store under `profile_dir`.
///
/// An absent store file is `NotFound` so the caller can re-supply the
/// path. A store locked by a live browser is `SourceBusy`. The
/// connection is released before the function returns on every path.
pub fn read_profile_store(profile_dir: &Path) -> Result<CredentialRecord, ExtractError> {
    let path = profile_dir.join(vendors::FIREFOX_IDB_SUFFIX);
    if !path.is_file() {
        return Err(ExtractError::not_found(path.display().to_string()));
    }

    let conn = Connection::open_with_flags(&path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
    let rows = scan_object_data(&conn)?;
    drop(conn);

    tracing::debug!(path = %path.display(), rows = rows.len(), "scanned extension object data");
    let kdf_iterations =
        decode_framed_field(row(&rows, field_rows::KDF_ITERATIONS)?, FieldKind::Count)?
            .into_count()?;
    let key_hash =
        decode_framed_field(row(&rows, field_rows::KEY_HASH)?, FieldKind::Text)?.into_text()?;
    let email =
        decode_framed_field(row(&rows, field_rows::USER_EMAIL)?, FieldKind::Text)?.into_text()?;

    Ok(CredentialRecord {
        email,
        key_hash,
        kdf_iterations,
    })
}

/// Unconditional full-table scan in native row order.
fn scan_object_data(conn: &Connection) -> Result<Vec<Vec<u8>>, ExtractError> {
    let mut stmt = conn.prepare("SELECT data FROM object_data")?;
    let rows = stmt
        .query_map([], |row| row.get::<_, Vec<u8>>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

fn row(rows: &[Vec<u8>], index: usize) -> Result<&[u8], ExtractError> {
    rows.get(index)
        .map(Vec::as_slice)
        .ok_or(ExtractError::StructureChanged)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Wrap a payload in the store's framing: sentinel, payload, NUL
    /// padding, sentinel.
    fn framed(payload: &[u8]) -> Vec<u8> {
        let mut blob = vec![0xff];
        blob.extend_from_slice(payload);
        blob.extend_from_slice(b"\x00\x00");
        blob.push(0xff);
        blob
    }

    /// Build a profile directory whose store holds `rows` framed blobs.
    fn seed_profile(rows: &[Vec<u8>]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join(vendors::FIREFOX_IDB_SUFFIX);
        std::fs::create_dir_all(db_path.parent().unwrap()).unwrap();
        let conn = Connection::open(&db_path).unwrap();
        conn.execute("CREATE TABLE object_data (data BLOB)", []).unwrap();
        for blob in rows {
            conn.execute(
                "INSERT INTO object_data (data) VALUES (?1)",
                rusqlite::params![blob],
            )
            .unwrap();
        }
        dir
    }

    fn well_formed_rows() -> Vec<Vec<u8>> {
        let mut rows = vec![framed(b"filler"); 22];
        rows[field_rows::KDF_ITERATIONS] = framed(&100_000u32.to_le_bytes());
        rows[field_rows::KEY_HASH] = framed(b"hashhash");
        rows[field_rows::USER_EMAIL] = framed(b"user@example.com");
        rows
    }

    #[test]
    fn recovers_the_fields_from_their_fixed_rows() {
        let dir = seed_profile(&well_formed_rows());
        let record = read_profile_store(dir.path()).unwrap();
        assert_eq!(record.email, "user@example.com");
        assert_eq!(record.key_hash, "hashhash");
        assert_eq!(record.kdf_iterations, 100_000);
    }

    #[test]
    fn absent_store_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            read_profile_store(dir.path()),
            Err(ExtractError::NotFound { .. })
        ));
    }

    #[test]
    fn short_table_is_a_structure_change() {
        let dir = seed_profile(&vec![framed(b"filler"); 5]);
        assert_eq!(
            read_profile_store(dir.path()),
            Err(ExtractError::StructureChanged)
        );
    }

    #[test]
    fn undecodable_target_row_is_a_structure_change() {
        let mut rows = well_formed_rows();
        rows[field_rows::USER_EMAIL] = vec![0xff, 0xff];
        let dir = seed_profile(&rows);
        assert_eq!(
            read_profile_store(dir.path()),
            Err(ExtractError::StructureChanged)
        );
    }

    #[test]
    fn missing_table_is_a_structure_change() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join(vendors::FIREFOX_IDB_SUFFIX);
        std::fs::create_dir_all(db_path.parent().unwrap()).unwrap();
        let conn = Connection::open(&db_path).unwrap();
        conn.execute("CREATE TABLE unrelated (x INTEGER)", []).unwrap();
        drop(conn);

        assert_eq!(
            read_profile_store(dir.path()),
            Err(ExtractError::StructureChanged)
        );
    }

    #[test]
    fn exclusively_locked_store_is_source_busy() {
        let dir = seed_profile(&well_formed_rows());
        let db_path = dir.path().join(vendors::FIREFOX_IDB_SUFFIX);
        let holder = Connection::open(&db_path).unwrap();
        holder.execute_batch("BEGIN EXCLUSIVE").unwrap();

        assert_eq!(
            read_profile_store(dir.path()),
            Err(ExtractError::SourceBusy)
        );

        holder.execute_batch("COMMIT").unwrap();
        // With the lock released the same store reads fine.
        assert!(read_profile_store(dir.path()).is_ok());
    }
}
