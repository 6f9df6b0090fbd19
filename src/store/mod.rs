//! Readers for the artifact formats that can hold the credential fields.
//!
//! | Source | Format | Reader |
//! |--------|--------|--------|
//! | Desktop/CLI `data.json` | JSON document | [`datafile`] |
//! | Chromium extension storage | LevelDB, JSON-quoted values | [`extension_kv`] |
//! | Firefox extension storage | SQLite `object_data` framed blobs | [`mozstorage`] + [`framing`] |
//!
//! Vendor install locations and layout constants live in [`vendors`] as
//! declarative data. Every reader opens its store read-only, converts
//! internal failures into [`ExtractError`](crate::base::ExtractError)
//! kinds at its boundary, and releases its handle before returning.

pub mod datafile;
pub mod extension_kv;
pub mod framing;
pub mod mozstorage;
pub mod vendors;
