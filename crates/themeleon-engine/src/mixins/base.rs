//! The `core` mixin, present in every registry.

use std::path::PathBuf;

use serde_json::{json, Value};

use super::{opt_str_arg, str_arg};
use crate::builder::Builder;
use crate::mixin::Mixin;

pub fn core() -> Mixin {
    Mixin::new("core")
        .with_op("mkdir", mkdir)
        .with_op("copy", copy)
        .with_op("write", write)
}

/// `mkdir [rel]`: create `dest/rel`.
fn mkdir(b: &mut Builder, args: &[Value]) -> anyhow::Result<()> {
    let target = b.dest().join(str_arg(args, 0, "mkdir")?);
    b.push(move |_| async move {
        themeleon_fs::ensure_dir(&target).await?;
        Ok(json!({ "created": target }))
    });
    Ok(())
}

/// `copy [src, dst?]`: copy a theme-relative path into the destination.
///
/// A file comes from the last theme layer that has it. A directory is merged
/// from every layer that has it, base first, so overrides overwrite.
fn copy(b: &mut Builder, args: &[Value]) -> anyhow::Result<()> {
    let src = PathBuf::from(str_arg(args, 0, "copy")?);
    let dst = b
        .dest()
        .join(opt_str_arg(args, 1, "copy")?.map(PathBuf::from).unwrap_or_else(|| src.clone()));
    let layers = b.theme_path().to_vec();

    b.push(move |_| async move {
        let hit = themeleon_fs::resolve_layered(&layers, &src).await?;
        let mut copied = 0;
        if themeleon_fs::is_dir(&hit).await {
            for root in &layers {
                let candidate = root.join(&src);
                if themeleon_fs::is_dir(&candidate).await {
                    copied += themeleon_fs::copy_path(&candidate, &dst).await?;
                }
            }
        } else {
            copied = themeleon_fs::copy_path(&hit, &dst).await?;
        }
        tracing::debug!(src = %src.display(), dst = %dst.display(), copied, "theme files copied");
        Ok(json!({ "copied": copied }))
    });
    Ok(())
}

/// `write [rel, content]`: write a string (or pretty JSON for anything
/// else) to `dest/rel`.
fn write(b: &mut Builder, args: &[Value]) -> anyhow::Result<()> {
    let target = b.dest().join(str_arg(args, 0, "write")?);
    let content = match args.get(1) {
        Some(Value::String(s)) => s.clone().into_bytes(),
        Some(other) => serde_json::to_vec_pretty(other)?,
        None => anyhow::bail!("operation 'write' expects content at position 1"),
    };

    b.push(move |_| async move {
        themeleon_fs::write_file(&target, &content).await?;
        Ok(json!({ "written": target, "bytes": content.len() }))
    });
    Ok(())
}
