//! The `context` mixin: writes the render context to the destination.

use serde_json::{json, Value};

use super::opt_str_arg;
use crate::builder::Builder;
use crate::mixin::Mixin;

const DEFAULT_FILE: &str = "context.json";

/// Constructor. `args[0]` optionally names the output file.
pub fn context(args: &[Value]) -> anyhow::Result<Mixin> {
    let file = opt_str_arg(args, 0, "context")?
        .unwrap_or(DEFAULT_FILE)
        .to_string();
    if file.trim().is_empty() {
        anyhow::bail!("context file name must not be empty");
    }

    Ok(Mixin::new("context").with_op("dump_context", move |b: &mut Builder, _: &[Value]| {
        let target = b.dest().join(&file);
        let ctx = b.ctx().clone();
        b.push(move |_| async move {
            let body = serde_json::to_vec_pretty(&*ctx)?;
            themeleon_fs::write_file(&target, &body).await?;
            Ok(json!({ "written": target }))
        });
        Ok(())
    }))
}
