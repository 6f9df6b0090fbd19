//! The recovered credential record and its hashcat rendering.

use base64::prelude::BASE64_STANDARD;
use base64::Engine;

/// The three credential-verification fields recovered from a source.
///
/// A record is only constructed once all three fields are known. Readers
/// discard partial recoveries so the next strategy in the chain gets its
/// turn instead of a half-filled record leaking out. A record is built
/// fresh per extraction attempt, is immutable once returned, and is
/// consumed exactly once by [`CredentialRecord::hashcat_line`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    /// Account identifier, with any source-level quoting stripped.
    pub email: String,
    /// Key-derivation check value, kept as an opaque token.
    pub key_hash: String,
    /// Configured key-derivation rounds.
    pub kdf_iterations: u32,
}

impl CredentialRecord {
    /// Render the record in the format hashcat mode 23400 consumes:
    /// `$bitwarden$1*<iterations>*<base64(email)>*<keyHash>`.
    ///
    /// The iteration count is decimal with no leading zeros, the email is
    /// standard-alphabet base64 with padding. Total for every structurally
    /// valid record.
    pub fn hashcat_line(&self) -> String {
        format!(
            "$bitwarden$1*{}*{}*{}",
            self.kdf_iterations,
            BASE64_STANDARD.encode(self.email.as_bytes()),
            self.key_hash
        )
    }
}
