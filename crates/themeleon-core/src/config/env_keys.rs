//! Environment variable keys and their aliases.
//!
//! Primary variables use the `THEMELEON_*` namespace.

/// Extension resolution
pub mod extension {
    /// Prefix prepended to bare extension names before external lookup.
    pub const THEMELEON_EXTENSION_PREFIX: &str = "THEMELEON_EXTENSION_PREFIX";
    pub const EXTENSION_PREFIX_ALIASES: &[&str] = &["THEMELEON_EXT_PREFIX"];
}

/// Output locations
pub mod paths {
    pub const THEMELEON_DEST: &str = "THEMELEON_DEST";
    pub const DEST_ALIASES: &[&str] = &["THEMELEON_OUTPUT_DIR"];
}

/// Observability and logging
pub mod observability {
    pub const THEMELEON_QUIET: &str = "THEMELEON_QUIET";
    pub const QUIET_ALIASES: &[&str] = &[];

    pub const THEMELEON_LOG_LEVEL: &str = "THEMELEON_LOG_LEVEL";
    pub const LOG_LEVEL_ALIASES: &[&str] = &["THEMELEON_LOG"];

    pub const THEMELEON_LOG_JSON: &str = "THEMELEON_LOG_JSON";
    pub const LOG_JSON_ALIASES: &[&str] = &[];
}
