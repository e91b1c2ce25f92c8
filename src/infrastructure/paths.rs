//! Data directory resolution for ledger storage.
//!
//! The ledgers live in a small per-user data directory. Resolution order:
//! an explicit configuration override, the `PLAYDEX_DATA_DIR` environment
//! variable, the platform data directory, and finally the working directory
//! so the core still functions in stripped-down environments.

use std::path::PathBuf;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "PLAYDEX_DATA_DIR";

/// Returns the directory ledger files are stored in.
///
/// Never fails; the last-resort fallback is `.playdex` under the working
/// directory. The directory itself is created lazily by the JSON store.
#[must_use]
pub fn data_dir(configured: Option<&PathBuf>) -> PathBuf {
    if let Some(dir) = configured {
        return dir.clone();
    }

    if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    dirs::data_local_dir().map_or_else(
        || PathBuf::from(".playdex"),
        |base| base.join("playdex"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_dir_wins() {
        let configured = PathBuf::from("/tmp/custom");
        assert_eq!(data_dir(Some(&configured)), configured);
    }

    #[test]
    fn fallback_is_never_empty() {
        let dir = data_dir(None);
        assert!(!dir.as_os_str().is_empty());
    }
}
