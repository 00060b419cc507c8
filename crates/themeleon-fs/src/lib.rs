//! Async filesystem primitives used by render steps.
//!
//! - `ensure_dir`: create a directory and its parents, idempotent
//! - `is_dir`: existence check for directories
//! - `resolve_layered`: find a relative path in an ordered list of theme roots
//! - `copy_path`: copy a file or directory tree
//! - `write_file`: write a file, creating parent directories

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Filesystem failures, always tagged with the path involved.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("'{}' exists but is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("'{}' not found in any theme layer ({layers} searched)", .rel.display())]
    NotInLayers { rel: PathBuf, layers: usize },

    #[error("{op} '{}': {source}", .path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, FsError>;

fn io_err<'a>(op: &'static str, path: &'a Path) -> impl FnOnce(io::Error) -> FsError + 'a {
    move |source| FsError::Io {
        op,
        path: path.to_path_buf(),
        source,
    }
}

/// Create `path` and any missing parents. Succeeds if it already exists as a
/// directory; fails if some component exists as a non-directory.
pub async fn ensure_dir(path: &Path) -> Result<()> {
    match tokio::fs::create_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) => match tokio::fs::metadata(path).await {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(FsError::NotADirectory(path.to_path_buf())),
            Err(_) => Err(io_err("create directory", path)(e)),
        },
    }
}

/// True if `path` exists and is a directory.
pub async fn is_dir(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false)
}

/// Look `rel` up through `layers`, last layer first, so later layers
/// override earlier ones.
pub async fn resolve_layered(layers: &[PathBuf], rel: &Path) -> Result<PathBuf> {
    for root in layers.iter().rev() {
        let candidate = root.join(rel);
        if tokio::fs::try_exists(&candidate)
            .await
            .map_err(io_err("stat", &candidate))?
        {
            return Ok(candidate);
        }
    }
    Err(FsError::NotInLayers {
        rel: rel.to_path_buf(),
        layers: layers.len(),
    })
}

/// Copy a file or a whole directory tree from `src` to `dst`.
/// Returns the number of files copied.
///
/// When `dst` lies inside `src` the destination subtree is skipped, so a
/// theme can be rendered into a directory of its own.
pub async fn copy_path(src: &Path, dst: &Path) -> Result<u64> {
    let meta = tokio::fs::metadata(src).await.map_err(io_err("stat", src))?;
    if !meta.is_dir() {
        if let Some(parent) = dst.parent() {
            ensure_dir(parent).await?;
        }
        tokio::fs::copy(src, dst).await.map_err(io_err("copy", src))?;
        return Ok(1);
    }

    ensure_dir(dst).await?;
    let dst_real = tokio::fs::canonicalize(dst)
        .await
        .map_err(io_err("resolve", dst))?;

    let mut copied = 0;
    let mut pending = vec![(src.to_path_buf(), dst.to_path_buf())];
    while let Some((from_dir, to_dir)) = pending.pop() {
        ensure_dir(&to_dir).await?;
        let mut entries = tokio::fs::read_dir(&from_dir)
            .await
            .map_err(io_err("read directory", &from_dir))?;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(io_err("read directory", &from_dir))?
        {
            let from = entry.path();
            let to = to_dir.join(entry.file_name());
            let kind = entry.file_type().await.map_err(io_err("stat", &from))?;
            if kind.is_dir() {
                let from_real = tokio::fs::canonicalize(&from)
                    .await
                    .map_err(io_err("resolve", &from))?;
                if from_real == dst_real {
                    tracing::debug!(skipped = %from.display(), "destination is inside source");
                    continue;
                }
                pending.push((from, to));
            } else {
                tokio::fs::copy(&from, &to).await.map_err(io_err("copy", &from))?;
                copied += 1;
            }
        }
    }
    tracing::trace!(src = %src.display(), dst = %dst.display(), copied, "copied tree");
    Ok(copied)
}

/// Write `content` to `path`, creating parent directories first.
pub async fn write_file(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent).await?;
    }
    tokio::fs::write(path, content)
        .await
        .map_err(io_err("write", path))
}
