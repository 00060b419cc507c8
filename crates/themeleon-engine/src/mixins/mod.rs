//! Built-in mixins.
//!
//! - `core`:    always registered first; mkdir, copy, write
//! - `context`: named fallback; dump_context (constructor, optional file name)

mod base;
mod context;

use anyhow::Result;
use serde_json::Value;

use crate::extension::Loaded;

pub use self::base::core;
pub use self::context::context;

/// Built-in lookup used when an external package is not found.
pub fn builtin(name: &str) -> Option<Loaded> {
    match name {
        "core" => Some(Loaded::Mixin(core())),
        "context" => Some(Loaded::constructor(context)),
        _ => None,
    }
}

/// Names accepted by [`builtin`].
pub const BUILTIN_NAMES: &[&str] = &["core", "context"];

fn str_arg<'a>(args: &'a [Value], index: usize, op: &str) -> Result<&'a str> {
    args.get(index).and_then(Value::as_str).ok_or_else(|| {
        anyhow::anyhow!(
            "operation '{}' expects a string argument at position {}",
            op,
            index
        )
    })
}

fn opt_str_arg<'a>(args: &'a [Value], index: usize, op: &str) -> Result<Option<&'a str>> {
    match args.get(index) {
        None | Some(Value::Null) => Ok(None),
        Some(_) => str_arg(args, index, op).map(Some),
    }
}
