//! Extension specifiers and their resolution into mixins.
//!
//! Resolution rule for names:
//! - a bare name (no path separator) is looked up externally under the
//!   configured prefix (`themeleon-<name>`); only a `NotFound` from the
//!   loader falls back to the built-in mixin of the same name;
//! - a name containing a separator goes to the loader verbatim, no fallback.
//!
//! A constructor, supplied directly or produced by the lookup, is called with
//! the bound arguments; a mixin is used as-is.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use themeleon_core::config::ExtensionConfig;

use crate::error::{ExtensionError, LoadError};
use crate::mixin::{Mixin, MixinConstructor};
use crate::mixins;

/// What can be handed to `use_ext`.
#[derive(Clone)]
pub enum Extension {
    Mixin(Mixin),
    Constructor(MixinConstructor),
    Name(String),
}

impl Extension {
    pub fn constructor<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> anyhow::Result<Mixin> + Send + Sync + 'static,
    {
        Self::Constructor(Arc::new(f))
    }

    /// Short label for logs and errors.
    pub fn describe(&self) -> String {
        match self {
            Self::Mixin(m) => m.label().to_string(),
            Self::Constructor(_) => "<constructor>".to_string(),
            Self::Name(name) => name.clone(),
        }
    }
}

impl fmt::Debug for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mixin(m) => f.debug_tuple("Mixin").field(m).finish(),
            Self::Constructor(_) => f.write_str("Constructor(..)"),
            Self::Name(name) => f.debug_tuple("Name").field(name).finish(),
        }
    }
}

impl From<Mixin> for Extension {
    fn from(m: Mixin) -> Self {
        Self::Mixin(m)
    }
}

impl From<&str> for Extension {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for Extension {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

/// A value produced by a lookup: either a ready mixin or a constructor.
#[derive(Clone)]
pub enum Loaded {
    Mixin(Mixin),
    Constructor(MixinConstructor),
}

impl Loaded {
    pub fn constructor<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> anyhow::Result<Mixin> + Send + Sync + 'static,
    {
        Self::Constructor(Arc::new(f))
    }
}

impl From<Mixin> for Loaded {
    fn from(m: Mixin) -> Self {
        Self::Mixin(m)
    }
}

/// External lookup of extension specifiers.
///
/// Must report an unknown specifier as [`LoadError::NotFound`] so that bare
/// names can fall back to built-ins; any other error aborts resolution.
pub trait ExtensionLoader: Send + Sync {
    fn load(&self, specifier: &str) -> Result<Loaded, LoadError>;
}

/// In-memory loader keyed by specifier, filled by the host at startup.
#[derive(Clone, Default)]
pub struct Catalog {
    entries: HashMap<String, Loaded>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, specifier: impl Into<String>, loaded: impl Into<Loaded>) {
        self.entries.insert(specifier.into(), loaded.into());
    }

    #[must_use]
    pub fn with(mut self, specifier: impl Into<String>, loaded: impl Into<Loaded>) -> Self {
        self.insert(specifier, loaded);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ExtensionLoader for Catalog {
    fn load(&self, specifier: &str) -> Result<Loaded, LoadError> {
        self.entries
            .get(specifier)
            .cloned()
            .ok_or_else(|| LoadError::NotFound(specifier.to_string()))
    }
}

fn is_path_like(name: &str) -> bool {
    name.contains('/') || name.contains(std::path::MAIN_SEPARATOR)
}

/// Turn a name into a loadable value per the lookup/fallback rule.
pub fn lookup(
    name: &str,
    loader: &dyn ExtensionLoader,
    config: &ExtensionConfig,
) -> Result<Loaded, ExtensionError> {
    if is_path_like(name) {
        return Ok(loader.load(name)?);
    }

    let package = config.package_name(name);
    match loader.load(&package) {
        Ok(loaded) => {
            tracing::debug!(name, package = %package, "extension loaded from package");
            Ok(loaded)
        }
        Err(LoadError::NotFound(_)) => match mixins::builtin(name) {
            Some(loaded) => {
                tracing::debug!(name, "extension resolved to built-in mixin");
                Ok(loaded)
            }
            None => Err(ExtensionError::NotFound {
                name: name.to_string(),
                tried: vec![package, format!("builtin:{}", name)],
            }),
        },
        Err(other) => Err(other.into()),
    }
}

/// Resolve a specifier plus bound arguments into a concrete mixin.
pub fn resolve(
    ext: Extension,
    args: &[Value],
    loader: &dyn ExtensionLoader,
    config: &ExtensionConfig,
) -> Result<Mixin, ExtensionError> {
    let name = ext.describe();
    let loaded = match ext {
        Extension::Mixin(m) => Loaded::Mixin(m),
        Extension::Constructor(c) => Loaded::Constructor(c),
        Extension::Name(n) => lookup(&n, loader, config)?,
    };

    match loaded {
        Loaded::Constructor(construct) => {
            construct(args).map_err(|source| ExtensionError::Constructor { name, source })
        }
        Loaded::Mixin(m) => {
            if !args.is_empty() {
                tracing::debug!(extension = %name, "arguments ignored for non-constructor extension");
            }
            Ok(m)
        }
    }
}
