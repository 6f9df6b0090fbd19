//! Strategy selection and fallback control.
//!
//! One extraction attempt walks an explicit state machine instead of
//! nested fallthrough, so the priority order and the short-circuit on a
//! busy store stay visible and testable on their own.

use std::path::Path;

use crate::base::ExtractError;
use crate::extract::manual::FieldSource;
use crate::record::CredentialRecord;
use crate::store::extension_kv::ExtensionStoreReader;
use crate::store::{datafile, mozstorage, vendors};

/// Phases of one extraction attempt. Transitions are driven entirely by
/// the error kind the current strategy returns.
#[derive(Debug)]
pub enum Phase {
    /// Parse the target as a `data.json` document.
    TryDataFile,
    /// Probe the platform's browser stores.
    TryBrowserStore,
    /// Fall back to operator-supplied values.
    TryManual,
    /// A strategy produced a record.
    Done(CredentialRecord),
    /// The attempt is over without a record.
    Failed(ExtractError),
}

/// Runs the strategy chain, one target at a time.
pub struct Extractor<'a, S: FieldSource> {
    source: &'a mut S,
}

impl<'a, S: FieldSource> Extractor<'a, S> {
    pub fn new(source: &'a mut S) -> Self {
        Self { source }
    }

    /// Process a single target to completion.
    ///
    /// `target` is an explicit `data.json` path, or `None` to search the
    /// standard installation locations. The first successful strategy
    /// wins. A store locked by its owning application ends the attempt
    /// with [`ExtractError::SourceBusy`] instead of degrading to manual
    /// entry — continuing would suggest no credential exists when one
    /// very likely does.
    pub fn extract(&mut self, target: Option<&Path>) -> Result<CredentialRecord, ExtractError> {
        let mut phase = Phase::TryDataFile;
        loop {
            phase = match phase {
                Phase::TryDataFile => self.data_file_phase(target),
                Phase::TryBrowserStore => self.browser_store_phase(),
                Phase::TryManual => self.manual_phase(),
                Phase::Done(record) => return Ok(record),
                Phase::Failed(err) => return Err(err),
            };
        }
    }

    fn data_file_phase(&mut self, target: Option<&Path>) -> Phase {
        let outcome = match target {
            Some(path) => {
                let outcome = datafile::read_data_file(path);
                if let Err(err) = &outcome {
                    eprintln!("{err}... trying other methods");
                }
                outcome
            }
            None => match vendors::data_file_candidates().iter().find(|p| p.is_file()) {
                Some(path) => datafile::read_data_file(path),
                None => Err(ExtractError::not_found("no default data.json location")),
            },
        };
        match outcome {
            Ok(record) => Phase::Done(record),
            Err(ExtractError::SourceBusy) => Phase::Failed(ExtractError::SourceBusy),
            Err(err) => {
                tracing::debug!(error = %err, "data file strategy failed");
                Phase::TryBrowserStore
            }
        }
    }

    fn browser_store_phase(&mut self) -> Phase {
        match ExtensionStoreReader::new().read() {
            Ok(record) => return Phase::Done(record),
            Err(ExtractError::SourceBusy) => return Phase::Failed(ExtractError::SourceBusy),
            Err(ExtractError::StructureChanged) => {
                eprintln!("{}", ExtractError::StructureChanged);
                return Phase::TryManual;
            }
            Err(err) => {
                tracing::debug!(error = %err, "no chromium extension store found");
            }
        }

        // No chromium-family store on this machine, so this is the
        // Firefox structured-storage path, which needs the profile
        // directory from the operator.
        let profile = match self.source.supply_profile_path() {
            Ok(path) => vendors::expand_home(&path),
            Err(err) => return Phase::Failed(ExtractError::Prompt(err.to_string())),
        };
        match mozstorage::read_profile_store(&profile) {
            Ok(record) => Phase::Done(record),
            Err(ExtractError::SourceBusy) => Phase::Failed(ExtractError::SourceBusy),
            Err(ExtractError::NotFound { .. }) => {
                eprintln!("Please enter a valid path");
                Phase::TryManual
            }
            Err(err) => {
                eprintln!("{err}");
                Phase::TryManual
            }
        }
    }

    fn manual_phase(&mut self) -> Phase {
        match self.source.supply_three_fields() {
            Ok((email, key_hash, iterations)) => {
                // Manual input is taken verbatim; iteration text that is
                // not a number renders as 0.
                let kdf_iterations = iterations.trim().parse().unwrap_or(0);
                Phase::Done(CredentialRecord {
                    email,
                    key_hash,
                    kdf_iterations,
                })
            }
            Err(err) => Phase::Failed(ExtractError::Prompt(err.to_string())),
        }
    }
}
