//! Run phase: executes a builder's steps strictly in append order.
//!
//! Each step gets the previous step's result. The first failure settles the
//! whole run and the remaining steps never start.

use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};
use std::task::{Context, Poll};

use futures_util::future::{BoxFuture, FutureExt};
use serde_json::Value;

use crate::builder::Step;

/// Lifecycle of one render call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    /// Steps are being enqueued, or the completion has not been polled yet.
    Pending,
    Running,
    Succeeded,
    Failed,
}

impl RenderState {
    pub fn is_settled(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

/// Shared view of a render's [`RenderState`]; stays valid after the
/// completion has been awaited.
#[derive(Clone)]
pub struct StateHandle(Arc<Mutex<RenderState>>);

impl StateHandle {
    fn new() -> Self {
        Self(Arc::new(Mutex::new(RenderState::Pending)))
    }

    pub fn get(&self) -> RenderState {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set(&self, state: RenderState) {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) = state;
    }
}

impl fmt::Debug for StateHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StateHandle").field(&self.get()).finish()
    }
}

/// A fixed step sequence ready to run.
pub struct Scheduler {
    dest: PathBuf,
    steps: Vec<Step>,
    state: StateHandle,
}

impl Scheduler {
    pub(crate) fn new(dest: PathBuf, steps: Vec<Step>) -> Self {
        Self {
            dest,
            steps,
            state: StateHandle::new(),
        }
    }

    pub fn state_handle(&self) -> StateHandle {
        self.state.clone()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run every step in order, threading results through.
    /// Resolves with the last step's result, or the first step error as-is.
    pub async fn run(self) -> anyhow::Result<Value> {
        let Self { dest, steps, state } = self;
        let total = steps.len();
        state.set(RenderState::Running);
        tracing::debug!(dest = %dest.display(), total, "render started");

        let mut outcome = Value::Null;
        for (index, step) in steps.into_iter().enumerate() {
            tracing::trace!(step = index + 1, total, "step started");
            match step(outcome).await {
                Ok(value) => outcome = value,
                Err(err) => {
                    state.set(RenderState::Failed);
                    tracing::debug!(
                        dest = %dest.display(),
                        step = index + 1,
                        total,
                        skipped = total - index - 1,
                        error = %err,
                        "render failed"
                    );
                    return Err(err);
                }
            }
        }

        state.set(RenderState::Succeeded);
        tracing::debug!(dest = %dest.display(), total, "render finished");
        Ok(outcome)
    }

    pub fn into_completion(self) -> Completion {
        let state = self.state_handle();
        Completion {
            state,
            inner: self.run().boxed(),
        }
    }
}

/// The single deferred outcome of a render call. Steps start running when
/// it is first polled.
#[must_use = "a render does nothing unless its completion is awaited"]
pub struct Completion {
    state: StateHandle,
    inner: BoxFuture<'static, anyhow::Result<Value>>,
}

impl Completion {
    pub fn state(&self) -> RenderState {
        self.state.get()
    }

    pub fn state_handle(&self) -> StateHandle {
        self.state.clone()
    }
}

impl Future for Completion {
    type Output = anyhow::Result<Value>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.get_mut().inner.as_mut().poll(cx)
    }
}

impl fmt::Debug for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completion")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
