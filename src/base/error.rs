use thiserror::Error;

/// Error kinds a reader can surface at its boundary.
///
/// Readers catch their internal failures and convert them into one of
/// these kinds; the orchestrator decides whether to fall back or stop
/// based on the kind alone, never on reader internals.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// The expected artifact does not exist. Always a fallback trigger,
    /// never fatal until every strategy has been exhausted.
    #[error("artifact not found: {path}")]
    NotFound { path: String },

    /// The artifact exists but is exclusively locked by a live owning
    /// process. Fatal for the current target: continuing would suggest no
    /// credential exists when one very likely does.
    #[error("store is locked by a running application, close the browser (or client) and retry")]
    SourceBusy,

    /// The artifact opened but its internal layout no longer matches the
    /// expected schema. Fatal for the current strategy; the next one runs.
    #[error("something in the store structure changed, close and reopen the browser and retry")]
    StructureChanged,

    /// A structured document is present but cannot be parsed into the
    /// expected shape. Falls back like [`ExtractError::NotFound`].
    #[error("malformed document: {reason}")]
    MalformedInput { reason: String },

    /// Interactive prompting failed, e.g. stdin was closed.
    #[error("prompt failed: {0}")]
    Prompt(String),
}

impl ExtractError {
    /// Create a not-found error for the given path.
    pub fn not_found(path: impl Into<String>) -> Self {
        ExtractError::NotFound { path: path.into() }
    }

    /// Create a malformed-input error.
    pub fn malformed(reason: impl Into<String>) -> Self {
        ExtractError::MalformedInput { reason: reason.into() }
    }
}

// A busy or locked database means the owning browser still holds the
// store; anything else after a successful open is schema drift.
impl From<rusqlite::Error> for ExtractError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(e, _)
                if e.code == rusqlite::ffi::ErrorCode::DatabaseBusy
                    || e.code == rusqlite::ffi::ErrorCode::DatabaseLocked =>
            {
                ExtractError::SourceBusy
            }
            _ => ExtractError::StructureChanged,
        }
    }
}
