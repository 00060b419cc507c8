//! Theme function factory.
//!
//! A [`Themeleon`] owns an append-only extension registry shared by every
//! [`ThemeFunction`] it creates. Registrations made after a theme function
//! exists still apply to its later renders.

use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

use serde_json::Value;
use themeleon_core::config::ExtensionConfig;

use crate::builder::{Builder, Context, ThemePath};
use crate::error::{ExtensionError, RenderError};
use crate::extension::{self, Catalog, Extension, ExtensionLoader};
use crate::mixin::Mixin;
use crate::mixins;
use crate::scheduler::Completion;

type Registry = Arc<RwLock<Vec<Mixin>>>;
type SetupProc = Arc<dyn Fn(&mut Builder) -> anyhow::Result<()> + Send + Sync>;

fn snapshot(registry: &Registry) -> Vec<Mixin> {
    registry
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Create a fresh factory with its own registry, seeded with `core`.
/// External lookups go to an empty [`Catalog`].
pub fn factory() -> Themeleon {
    Themeleon::new()
}

/// Factory handle. Clones share the same registry.
#[derive(Clone)]
pub struct Themeleon {
    exts: Registry,
    loader: Arc<dyn ExtensionLoader>,
    config: ExtensionConfig,
}

impl Default for Themeleon {
    fn default() -> Self {
        Self::new()
    }
}

impl Themeleon {
    pub fn new() -> Self {
        Self::with_loader(Catalog::default())
    }

    /// Factory whose bare and path-like names are looked up through `loader`.
    pub fn with_loader(loader: impl ExtensionLoader + 'static) -> Self {
        Self {
            exts: Arc::new(RwLock::new(vec![mixins::core()])),
            loader: Arc::new(loader),
            config: ExtensionConfig::from_env(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: ExtensionConfig) -> Self {
        self.config = config;
        self
    }

    /// Resolve `ext` (with bound `args` for constructors) and append it to
    /// the registry. Returns `self` for chaining.
    ///
    /// Meant for setup time; registering while renders are in flight is not
    /// ordered against those renders.
    pub fn use_ext(
        &self,
        ext: impl Into<Extension>,
        args: &[Value],
    ) -> Result<&Self, ExtensionError> {
        let ext = ext.into();
        let requested = ext.describe();
        let mixin = extension::resolve(ext, args, self.loader.as_ref(), &self.config)?;
        tracing::debug!(
            extension = %requested,
            mixin = %mixin.label(),
            ops = mixin.len(),
            "extension registered"
        );
        self.exts
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(mixin);
        Ok(self)
    }

    /// Labels of registered mixins, in merge order.
    pub fn extensions(&self) -> Vec<String> {
        snapshot(&self.exts)
            .iter()
            .map(|m| m.label().to_string())
            .collect()
    }

    /// Bind a theme path and setup procedure into a reusable render function.
    /// Nothing is validated until `render`.
    pub fn theme<P, F>(&self, path: P, proc: F) -> ThemeFunction
    where
        P: Into<ThemePath>,
        F: Fn(&mut Builder) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let path: ThemePath = path.into();
        ThemeFunction {
            path: path.into_inner().into(),
            proc: Arc::new(proc),
            exts: Arc::clone(&self.exts),
        }
    }
}

/// Immutable pairing of theme path and setup procedure.
#[derive(Clone)]
pub struct ThemeFunction {
    path: Arc<[PathBuf]>,
    proc: SetupProc,
    exts: Registry,
}

impl ThemeFunction {
    pub fn path(&self) -> &[PathBuf] {
        &self.path
    }

    /// Render the theme into `dest`.
    ///
    /// The setup procedure runs before this returns; if it fails the error
    /// comes back here and no step runs. Otherwise the returned
    /// [`Completion`] runs the destination guard followed by every enqueued
    /// step, settling with the last result or the first step error.
    pub fn render(
        &self,
        dest: impl Into<PathBuf>,
        ctx: Context,
    ) -> Result<Completion, RenderError> {
        let dest = dest.into();
        let mut builder = Builder::new(Arc::clone(&self.path), dest.clone(), ctx);
        for mixin in snapshot(&self.exts) {
            builder.mixin(&mixin);
        }

        builder.push(move |_| async move {
            themeleon_fs::ensure_dir(&dest).await?;
            Ok(Value::Null)
        });

        (self.proc)(&mut builder).map_err(RenderError::Setup)?;
        tracing::debug!(
            dest = %builder.dest().display(),
            steps = builder.len(),
            "render scheduled"
        );
        Ok(builder.into_scheduler().into_completion())
    }
}

impl std::fmt::Debug for Themeleon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Themeleon")
            .field("extensions", &self.extensions())
            .field("prefix", &self.config.prefix)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Debug for ThemeFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeFunction")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
