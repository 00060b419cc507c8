//! Capability sets ("mixins"): named operation tables merged onto a builder.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::builder::Builder;

/// A named operation. Receives the builder it is merged onto plus dynamic
/// arguments, and typically enqueues one or more steps.
pub type Operation = Arc<dyn Fn(&mut Builder, &[Value]) -> anyhow::Result<()> + Send + Sync>;

/// Builds a [`Mixin`] from bound arguments (parameterized extensions).
pub type MixinConstructor = Arc<dyn Fn(&[Value]) -> anyhow::Result<Mixin> + Send + Sync>;

/// A bag of named operations. Cheap to clone; the table is shared.
#[derive(Clone)]
pub struct Mixin {
    label: String,
    ops: Arc<BTreeMap<String, Operation>>,
}

impl Mixin {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ops: Arc::new(BTreeMap::new()),
        }
    }

    /// Add (or replace) an operation.
    #[must_use]
    pub fn with_op<F>(mut self, name: impl Into<String>, op: F) -> Self
    where
        F: Fn(&mut Builder, &[Value]) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Arc::make_mut(&mut self.ops).insert(name.into(), Arc::new(op));
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn op(&self, name: &str) -> Option<&Operation> {
        self.ops.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.ops.keys().map(String::as_str)
    }

    pub(crate) fn ops(&self) -> impl Iterator<Item = (&String, &Operation)> {
        self.ops.iter()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

impl fmt::Debug for Mixin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mixin")
            .field("label", &self.label)
            .field("ops", &self.names().collect::<Vec<_>>())
            .finish()
    }
}
