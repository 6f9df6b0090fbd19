//! Base types and error handling.
//!
//! Provides the error taxonomy shared by every extraction strategy:
//! [`ExtractError`], a flat error-kind enum the orchestrator drives its
//! fallback decisions off.

pub mod error;

pub use error::ExtractError;
