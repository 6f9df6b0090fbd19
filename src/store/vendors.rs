//! Vendor install locations and store layout constants.
//!
//! Everything path- or layout-shaped lives here as declarative data so a
//! new vendor is one table entry, not a branch inside a reader.

use std::env;
use std::path::PathBuf;

/// Bitwarden extension ID on Chrome, Brave and Vivaldi.
pub const CHROME_EXTENSION_ID: &str = "nngceckbapebfimnlniiiahkandclblb";
/// Bitwarden extension ID on Opera.
pub const OPERA_EXTENSION_ID: &str = "ccnckbpmaceehanjmeomladnmlffdjgn";
/// Bitwarden extension ID on chromium-based Edge.
pub const EDGE_EXTENSION_ID: &str = "jbkfoedolllekgbhcbcoahefnbanhhlh";

/// Fixed suffix of the Firefox extension's IndexedDB store, appended to
/// the operator-supplied profile directory.
pub const FIREFOX_IDB_SUFFIX: &str = "idb/3647222921wleabcEoxlt-eengsairo.sqlite";

/// Environment variable naming the per-user profile directory.
#[cfg(windows)]
pub const PROFILE_ENV: &str = "USERPROFILE";
/// Environment variable naming the per-user profile directory.
#[cfg(not(windows))]
pub const PROFILE_ENV: &str = "HOME";

/// Ordinal row positions of the target fields in the Firefox
/// `object_data` scan.
///
/// Empirically derived from observed store layouts and carrying no
/// forward-compatibility guarantee; revalidate against current extension
/// releases before trusting them on a new store dump.
pub mod field_rows {
    pub const KDF_ITERATIONS: usize = 9;
    pub const KEY_HASH: usize = 10;
    pub const USER_EMAIL: usize = 21;
}

/// A candidate extension-storage location for one browser vendor.
#[derive(Debug, Clone, Copy)]
pub struct ExtensionStore {
    /// Vendor label, used in diagnostics.
    pub browser: &'static str,
    /// Store directory relative to the profile directory.
    pub settings_dir: &'static str,
}

/// Ordered candidate list for the Chromium-family extension store; the
/// first store that opens wins.
#[cfg(windows)]
pub const EXTENSION_STORES: &[ExtensionStore] = &[
    ExtensionStore {
        browser: "Chrome",
        settings_dir: "AppData/Local/Google/Chrome/User Data/Default/Local Extension Settings/nngceckbapebfimnlniiiahkandclblb",
    },
    ExtensionStore {
        browser: "Opera",
        settings_dir: "AppData/Roaming/Opera Software/Opera Stable/Local Extension Settings/ccnckbpmaceehanjmeomladnmlffdjgn",
    },
    ExtensionStore {
        browser: "Brave",
        settings_dir: "AppData/Local/BraveSoftware/Brave-browser/User Data/Default/Local Extension Settings/nngceckbapebfimnlniiiahkandclblb",
    },
    ExtensionStore {
        browser: "Vivaldi",
        settings_dir: "AppData/Local/Vivaldi/User Data/Default/Local Extension Settings/nngceckbapebfimnlniiiahkandclblb",
    },
    ExtensionStore {
        browser: "Edge",
        settings_dir: "AppData/Local/Microsoft/Edge/User Data/Default/Extensions/jbkfoedolllekgbhcbcoahefnbanhhlh",
    },
];

/// Ordered candidate list for the Chromium-family extension store; the
/// first store that opens wins.
#[cfg(not(windows))]
pub const EXTENSION_STORES: &[ExtensionStore] = &[
    ExtensionStore {
        browser: "Chrome",
        settings_dir: ".config/google-chrome/Default/Local Extension Settings/nngceckbapebfimnlniiiahkandclblb",
    },
    ExtensionStore {
        browser: "Chromium (snap)",
        settings_dir: "snap/chromium/common/chromium/Default/Local Extension Settings/nngceckbapebfimnlniiiahkandclblb",
    },
];

/// Default `data.json` locations under the profile directory.
#[cfg(windows)]
const PROFILE_DATA_FILES: &[&str] = &[
    // Windows Store app
    "AppData/Local/Packages/8bitSolutionsLLC.bitwardendesktop_h4e712dmw3xyy/LocalCache/Roaming/Bitwarden/data.json",
    // desktop app
    "AppData/Roaming/Bitwarden/data.json",
    // CLI
    "AppData/Roaming/Bitwarden CLI/data.json",
];
/// Default `data.json` locations under the profile directory.
#[cfg(not(windows))]
const PROFILE_DATA_FILES: &[&str] = &[
    // desktop app
    ".config/Bitwarden/data.json",
    // CLI
    ".config/Bitwarden CLI/data.json",
];

/// Per-user profile directory from the platform environment variable.
pub fn profile_dir() -> Option<PathBuf> {
    env::var(PROFILE_ENV).ok().map(PathBuf::from)
}

/// Ordered extension-store candidates resolved against the profile
/// directory. Empty when the profile variable is unset.
pub fn extension_store_candidates() -> Vec<(&'static str, PathBuf)> {
    match profile_dir() {
        Some(profile) => EXTENSION_STORES
            .iter()
            .map(|store| (store.browser, profile.join(store.settings_dir)))
            .collect(),
        None => Vec::new(),
    }
}

/// Ordered default `data.json` locations searched when no path argument
/// was given: current directory, portable installation, then the
/// per-user installs.
pub fn data_file_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![
        PathBuf::from("data.json"),
        PathBuf::from("bitwarden-appdata").join("data.json"),
    ];
    if let Some(profile) = profile_dir() {
        candidates.extend(PROFILE_DATA_FILES.iter().map(|rel| profile.join(rel)));
    }
    candidates
}

/// Expand a leading `~` against the profile environment variable.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix('~') {
        if let Some(profile) = profile_dir() {
            return profile.join(rest.trim_start_matches(['/', '\\']));
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_candidate_targets_a_known_extension_id() {
        for store in EXTENSION_STORES {
            let id_matches = store.settings_dir.ends_with(CHROME_EXTENSION_ID)
                || store.settings_dir.ends_with(OPERA_EXTENSION_ID)
                || store.settings_dir.ends_with(EDGE_EXTENSION_ID);
            assert!(id_matches, "unexpected extension id in {}", store.settings_dir);
        }
    }

    #[test]
    fn field_rows_are_distinct() {
        assert_ne!(field_rows::KDF_ITERATIONS, field_rows::KEY_HASH);
        assert_ne!(field_rows::KEY_HASH, field_rows::USER_EMAIL);
        assert_ne!(field_rows::KDF_ITERATIONS, field_rows::USER_EMAIL);
    }

    #[test]
    fn data_file_search_starts_in_the_current_directory() {
        let candidates = data_file_candidates();
        assert_eq!(candidates[0], PathBuf::from("data.json"));
        assert!(candidates.iter().all(|p| p.ends_with("data.json")));
    }

    #[test]
    fn expand_home_resolves_a_leading_tilde() {
        let expanded = expand_home("~/profile/storage");
        if let Some(profile) = profile_dir() {
            assert_eq!(expanded, profile.join("profile/storage"));
        }
        // Paths without a tilde pass through untouched.
        assert_eq!(expand_home("/tmp/x"), PathBuf::from("/tmp/x"));
    }
}
