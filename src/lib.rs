//! # bw2hashcat
//!
//! Recovers Bitwarden credential-verification artifacts — account email,
//! key-derivation check value, KDF iteration count — from whichever local
//! store currently holds them, and renders them as a single
//! `$bitwarden$1*...` line consumable by hashcat (mode 23400).
//!
//! ## Extraction strategies
//!
//! Tried in priority order per target, first success wins:
//!
//! 1. A self-contained `data.json` document ([`store::datafile`])
//! 2. The Chromium-family extension LevelDB store ([`store::extension_kv`])
//! 3. The Firefox extension's IndexedDB SQLite store ([`store::mozstorage`])
//! 4. Interactive manual entry ([`extract::manual`])
//!
//! A store locked by a live browser surfaces as
//! [`ExtractError::SourceBusy`] instead of degrading to manual entry; a
//! drifted store layout falls back without fabricating a record. The
//! system only locates and reformats already-computed artifacts — it
//! never derives, validates, or cracks any cryptographic value.
//!
//! macOS storage layouts are not supported.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bw2hashcat::extract::{Extractor, TerminalPrompter};
//!
//! let mut prompter = TerminalPrompter;
//! let record = Extractor::new(&mut prompter).extract(None)?;
//! println!("{}", record.hashcat_line());
//! # Ok::<(), bw2hashcat::ExtractError>(())
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error taxonomy
//! - [`record`] - The recovered credential record and hashcat rendering
//! - [`store`] - Readers for the three artifact formats
//! - [`extract`] - Strategy orchestration and the manual fallback

pub mod base;
pub mod extract;
pub mod record;
pub mod store;

pub use base::ExtractError;
pub use record::CredentialRecord;
