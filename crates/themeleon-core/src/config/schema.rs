//! Config structs grouped by concern, loaded from the environment.
//!
//! `from_env` only reads; `.env` loading happens once at binary startup.

use super::env_keys::{extension as ext_keys, observability as obv_keys, paths as path_keys};
use super::loader::{env_bool, env_optional, env_or};
use std::path::PathBuf;

/// Default namespace for externally packaged extensions.
pub const DEFAULT_EXTENSION_PREFIX: &str = "themeleon-";

/// Extension resolution settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionConfig {
    /// Prepended to bare names before asking the external loader.
    pub prefix: String,
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_EXTENSION_PREFIX.to_string(),
        }
    }
}

impl ExtensionConfig {
    pub fn from_env() -> Self {
        Self {
            prefix: env_or(
                ext_keys::THEMELEON_EXTENSION_PREFIX,
                ext_keys::EXTENSION_PREFIX_ALIASES,
                || DEFAULT_EXTENSION_PREFIX.to_string(),
            ),
        }
    }

    /// External package name for a bare extension name.
    pub fn package_name(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name)
    }
}

/// Output locations
#[derive(Debug, Clone)]
pub struct PathsConfig {
    /// Destination used by the CLI when `--dest` is omitted.
    pub dest: Option<PathBuf>,
}

impl PathsConfig {
    pub fn from_env() -> Self {
        Self {
            dest: env_optional(path_keys::THEMELEON_DEST, path_keys::DEST_ALIASES)
                .map(PathBuf::from),
        }
    }
}

/// Observability: quiet, log_level, log_json
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub quiet: bool,
    pub log_level: String,
    pub log_json: bool,
}

impl ObservabilityConfig {
    pub fn from_env() -> &'static Self {
        use std::sync::OnceLock;
        static CACHE: OnceLock<ObservabilityConfig> = OnceLock::new();
        CACHE.get_or_init(|| Self {
            quiet: env_bool(obv_keys::THEMELEON_QUIET, obv_keys::QUIET_ALIASES, false),
            log_level: env_or(
                obv_keys::THEMELEON_LOG_LEVEL,
                obv_keys::LOG_LEVEL_ALIASES,
                || "themeleon=info".to_string(),
            ),
            log_json: env_bool(
                obv_keys::THEMELEON_LOG_JSON,
                obv_keys::LOG_JSON_ALIASES,
                false,
            ),
        })
    }
}
