//! Error types for registration, setup and builder dispatch.
//!
//! Step failures are plain `anyhow::Error`s and travel through the
//! [`Completion`](crate::Completion) unchanged.

use thiserror::Error;

/// Failure reported by an [`ExtensionLoader`](crate::ExtensionLoader).
#[derive(Debug, Error)]
pub enum LoadError {
    /// The specifier is unknown to the loader. Bare names fall back to the
    /// built-in mixins only on this variant.
    #[error("module '{0}' not found")]
    NotFound(String),

    #[error("failed to load '{specifier}': {source}")]
    Failed {
        specifier: String,
        source: anyhow::Error,
    },
}

/// Registration-time errors, returned synchronously from `use_ext`.
#[derive(Debug, Error)]
pub enum ExtensionError {
    #[error("extension '{name}' not found (tried {})", .tried.join(", "))]
    NotFound { name: String, tried: Vec<String> },

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("extension constructor '{name}' failed: {source}")]
    Constructor {
        name: String,
        source: anyhow::Error,
    },
}

/// Render-time errors raised before any step runs.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The setup procedure returned an error while enqueuing steps.
    #[error("theme setup failed: {0}")]
    Setup(#[source] anyhow::Error),
}

/// Dynamic dispatch errors on a [`Builder`](crate::Builder).
#[derive(Debug, Error)]
pub enum BuilderError {
    #[error("no operation named '{name}' (available: {available})")]
    UnknownOperation { name: String, available: String },
}
