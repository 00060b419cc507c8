//! Render session: the build phase of a single render call.
//!
//! A [`Builder`] collects steps and carries the merged operation table.
//! Once the setup procedure returns it is turned into a
//! [`Scheduler`](crate::Scheduler) and can no longer accept steps.

use std::collections::BTreeMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures_util::future::{BoxFuture, FutureExt};
use serde_json::Value;

use crate::error::BuilderError;
use crate::mixin::{Mixin, Operation};
use crate::scheduler::Scheduler;

/// Opaque key/value data handed to every step.
pub type Context = serde_json::Map<String, Value>;

/// One unit of deferred work. Gets the previous step's result
/// (`Value::Null` for the first step).
pub type Step = Box<dyn FnOnce(Value) -> BoxFuture<'static, anyhow::Result<Value>> + Send>;

/// Ordered theme roots: a base path followed by overrides.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ThemePath(Vec<PathBuf>);

impl ThemePath {
    pub fn segments(&self) -> &[PathBuf] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<PathBuf> {
        self.0
    }
}

impl From<&str> for ThemePath {
    fn from(s: &str) -> Self {
        Self(vec![PathBuf::from(s)])
    }
}

impl From<String> for ThemePath {
    fn from(s: String) -> Self {
        Self(vec![PathBuf::from(s)])
    }
}

impl From<&Path> for ThemePath {
    fn from(p: &Path) -> Self {
        Self(vec![p.to_path_buf()])
    }
}

impl From<PathBuf> for ThemePath {
    fn from(p: PathBuf) -> Self {
        Self(vec![p])
    }
}

impl<T: Into<PathBuf>> From<Vec<T>> for ThemePath {
    fn from(v: Vec<T>) -> Self {
        Self(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<PathBuf>, const N: usize> From<[T; N]> for ThemePath {
    fn from(v: [T; N]) -> Self {
        Self(v.into_iter().map(Into::into).collect())
    }
}

/// Per-render session state.
pub struct Builder {
    theme_path: Arc<[PathBuf]>,
    dest: PathBuf,
    ctx: Arc<Context>,
    ops: BTreeMap<String, (String, Operation)>,
    steps: Vec<Step>,
}

impl Builder {
    pub fn new(theme_path: Arc<[PathBuf]>, dest: impl Into<PathBuf>, ctx: Context) -> Self {
        Self {
            theme_path,
            dest: dest.into(),
            ctx: Arc::new(ctx),
            ops: BTreeMap::new(),
            steps: Vec::new(),
        }
    }

    /// Overlay a mixin's operations. Same-named operations from earlier
    /// mixins are replaced.
    pub fn mixin(&mut self, mixin: &Mixin) -> &mut Self {
        for (name, op) in mixin.ops() {
            let previous = self
                .ops
                .insert(name.clone(), (mixin.label().to_string(), Arc::clone(op)));
            if let Some((from, _)) = previous {
                tracing::debug!(
                    op = %name,
                    from = %from,
                    to = %mixin.label(),
                    "operation shadowed by later mixin"
                );
            }
        }
        self
    }

    /// Append an async step.
    pub fn push<F, Fut>(&mut self, step: F) -> &mut Self
    where
        F: FnOnce(Value) -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<Value>> + Send + 'static,
    {
        self.steps.push(Box::new(move |prev| step(prev).boxed()));
        self
    }

    /// Append a step that completes without suspending.
    pub fn push_sync<F>(&mut self, step: F) -> &mut Self
    where
        F: FnOnce(Value) -> anyhow::Result<Value> + Send + 'static,
    {
        self.push(move |prev| async move { step(prev) })
    }

    /// Invoke a merged operation by name.
    pub fn call(&mut self, name: &str, args: &[Value]) -> anyhow::Result<()> {
        let op = match self.ops.get(name) {
            Some((_, op)) => Arc::clone(op),
            None => {
                return Err(BuilderError::UnknownOperation {
                    name: name.to_string(),
                    available: self.op_names().collect::<Vec<_>>().join(", "),
                }
                .into())
            }
        };
        op(self, args)
    }

    pub fn has_op(&self, name: &str) -> bool {
        self.ops.contains_key(name)
    }

    pub fn op_names(&self) -> impl Iterator<Item = &str> {
        self.ops.keys().map(String::as_str)
    }

    /// Label of the mixin that currently provides `name`.
    pub fn op_provider(&self, name: &str) -> Option<&str> {
        self.ops.get(name).map(|(label, _)| label.as_str())
    }

    pub fn theme_path(&self) -> &[PathBuf] {
        &self.theme_path
    }

    pub fn dest(&self) -> &Path {
        &self.dest
    }

    pub fn ctx(&self) -> &Arc<Context> {
        &self.ctx
    }

    /// Number of pending steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// End the build phase.
    pub fn into_scheduler(self) -> Scheduler {
        Scheduler::new(self.dest, self.steps)
    }
}
