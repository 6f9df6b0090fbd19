//! Reader for self-contained Bitwarden `data.json` documents.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::base::ExtractError;
use crate::record::CredentialRecord;

/// The three top-level fields of a `data.json` document. Everything else
/// in the document is ignored.
#[derive(Debug, Deserialize)]
struct DataFile {
    #[serde(rename = "userEmail")]
    user_email: String,
    #[serde(rename = "keyHash")]
    key_hash: String,
    #[serde(rename = "kdfIterations")]
    kdf_iterations: IterationCount,
}

/// Desktop clients store the count as a JSON number, some exports as a
/// numeric string. Both are accepted.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IterationCount {
    Number(u32),
    Text(String),
}

impl IterationCount {
    fn resolve(self) -> Option<u32> {
        let count = match self {
            IterationCount::Number(n) => Some(n),
            IterationCount::Text(s) => s.trim().parse().ok(),
        };
        count.filter(|&n| n >= 1)
    }
}

/// Parse the document at `path` by exact top-level key lookup.
///
/// An absent file is `NotFound`; an unparseable document, a missing key,
/// or an out-of-range iteration count is `MalformedInput`. Absence of any
/// one field fails the whole strategy — there are no partial records.
pub fn read_data_file(path: &Path) -> Result<CredentialRecord, ExtractError> {
    if !path.is_file() {
        return Err(ExtractError::not_found(path.display().to_string()));
    }
    let raw = fs::read_to_string(path).map_err(|e| ExtractError::malformed(e.to_string()))?;
    let doc: DataFile =
        serde_json::from_str(&raw).map_err(|e| ExtractError::malformed(e.to_string()))?;

    if doc.user_email.is_empty() || doc.key_hash.is_empty() {
        return Err(ExtractError::malformed("userEmail or keyHash is empty"));
    }
    let kdf_iterations = doc
        .kdf_iterations
        .resolve()
        .ok_or_else(|| ExtractError::malformed("kdfIterations is not a positive integer"))?;

    tracing::debug!(path = %path.display(), "recovered record from data file");
    Ok(CredentialRecord {
        email: doc.user_email,
        key_hash: doc.key_hash,
        kdf_iterations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_doc(dir: &tempfile::TempDir, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join("data.json");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn reads_the_three_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_doc(
            &dir,
            r#"{"userEmail":"a@b.com","keyHash":"H","kdfIterations":100000}"#,
        );
        let record = read_data_file(&path).unwrap();
        assert_eq!(record.email, "a@b.com");
        assert_eq!(record.key_hash, "H");
        assert_eq!(record.kdf_iterations, 100_000);
    }

    #[test]
    fn accepts_a_numeric_string_count() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_doc(
            &dir,
            r#"{"userEmail":"a@b.com","keyHash":"H","kdfIterations":"5000"}"#,
        );
        assert_eq!(read_data_file(&path).unwrap().kdf_iterations, 5000);
    }

    #[test]
    fn ignores_unrelated_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_doc(
            &dir,
            r#"{"userEmail":"a@b.com","other":{"nested":true},"keyHash":"H","kdfIterations":1}"#,
        );
        assert!(read_data_file(&path).is_ok());
    }

    #[test]
    fn missing_key_hash_is_malformed_not_a_crash() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_doc(&dir, r#"{"userEmail":"a@b.com","kdfIterations":100000}"#);
        assert!(matches!(
            read_data_file(&path),
            Err(ExtractError::MalformedInput { .. })
        ));
    }

    #[test]
    fn zero_iterations_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_doc(
            &dir,
            r#"{"userEmail":"a@b.com","keyHash":"H","kdfIterations":0}"#,
        );
        assert!(matches!(
            read_data_file(&path),
            Err(ExtractError::MalformedInput { .. })
        ));
    }

    #[test]
    fn unparseable_document_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_doc(&dir, "not json at all");
        assert!(matches!(
            read_data_file(&path),
            Err(ExtractError::MalformedInput { .. })
        ));
    }

    #[test]
    fn absent_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        assert!(matches!(
            read_data_file(&path),
            Err(ExtractError::NotFound { .. })
        ));
    }
}
