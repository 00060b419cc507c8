//! Themeleon engine: render a theme into a destination directory through an
//! ordered pipeline of async steps contributed by mixins.
//!
//! Flow:
//! - [`factory`] creates a [`Themeleon`] with its own extension registry,
//!   seeded with the built-in `core` mixin.
//! - [`Themeleon::use_ext`] resolves an [`Extension`] into a [`Mixin`] and
//!   appends it to the registry.
//! - [`Themeleon::theme`] pairs a theme path with a setup procedure and
//!   returns a [`ThemeFunction`].
//! - [`ThemeFunction::render`] builds a fresh [`Builder`], merges every
//!   registered mixin onto it, enqueues the destination guard, runs the setup
//!   procedure, and hands back a [`Completion`] that drives the steps in order.

pub mod builder;
pub mod error;
pub mod extension;
pub mod factory;
pub mod mixin;
pub mod mixins;
pub mod scheduler;

pub use builder::{Builder, Context, Step, ThemePath};
pub use error::{BuilderError, ExtensionError, LoadError, RenderError};
pub use extension::{Catalog, Extension, ExtensionLoader, Loaded};
pub use factory::{factory, Themeleon, ThemeFunction};
pub use mixin::{Mixin, MixinConstructor, Operation};
pub use scheduler::{Completion, RenderState, Scheduler, StateHandle};
