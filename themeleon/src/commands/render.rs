//! `themeleon render`: copy theme layers (and optionally the context) into a
//! destination through the engine.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use serde::Serialize;
use serde_json::Value;
use themeleon_core::config::PathsConfig;
use themeleon_engine::{factory, Context};

pub struct RenderOptions {
    pub theme: Vec<PathBuf>,
    pub dest: Option<PathBuf>,
    pub ctx: Option<PathBuf>,
    pub uses: Vec<String>,
    pub copy: Vec<String>,
    pub dump_context: bool,
}

#[derive(Debug, Serialize)]
pub struct RenderSummary {
    pub dest: PathBuf,
    pub theme: Vec<PathBuf>,
    pub extensions: Vec<String>,
    /// Result of the last step.
    pub result: Value,
}

/// Split `NAME=ARG,ARG` into the name and JSON arguments. Arguments that do
/// not parse as JSON are kept as strings.
pub fn parse_use(spec: &str) -> (String, Vec<Value>) {
    match spec.split_once('=') {
        Some((name, rest)) => {
            let args = rest
                .split(',')
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(|a| serde_json::from_str(a).unwrap_or_else(|_| Value::String(a.to_string())))
                .collect();
            (name.trim().to_string(), args)
        }
        None => (spec.trim().to_string(), Vec::new()),
    }
}

/// Read a context object from JSON or YAML (by file extension).
pub fn load_context(path: &Path) -> Result<Context> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read context file {}", path.display()))?;
    let value: Value = match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&raw)
            .with_context(|| format!("Invalid YAML in {}", path.display()))?,
        _ => serde_json::from_str(&raw)
            .with_context(|| format!("Invalid JSON in {}", path.display()))?,
    };
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Context::new()),
        other => anyhow::bail!(
            "Context file {} must contain a mapping, found {}",
            path.display(),
            kind(&other)
        ),
    }
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}

pub fn run(opts: RenderOptions) -> Result<RenderSummary> {
    let dest = opts
        .dest
        .or_else(|| PathsConfig::from_env().dest)
        .context("No destination: pass --dest or set THEMELEON_DEST")?;
    let ctx = match &opts.ctx {
        Some(path) => load_context(path)?,
        None => Context::new(),
    };

    let t = factory();
    for spec in &opts.uses {
        let (name, args) = parse_use(spec);
        t.use_ext(name.as_str(), &args)
            .with_context(|| format!("Failed to register extension '{}'", name))?;
    }
    if opts.dump_context && !t.extensions().iter().any(|e| e == "context") {
        t.use_ext("context", &[])?;
    }

    let copies = if opts.copy.is_empty() {
        vec![".".to_string()]
    } else {
        opts.copy
    };
    let dump = opts.dump_context;
    let theme = t.theme(opts.theme.clone(), move |b| {
        for rel in &copies {
            b.call("copy", &[Value::String(rel.clone())])?;
        }
        if dump {
            b.call("dump_context", &[])?;
        }
        Ok(())
    });

    tracing::info!(dest = %dest.display(), layers = opts.theme.len(), "rendering theme");
    let completion = theme.render(&dest, ctx)?;
    let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
    let result = rt
        .block_on(completion)
        .with_context(|| format!("Failed to render theme into {}", dest.display()))?;

    Ok(RenderSummary {
        dest,
        theme: opts.theme,
        extensions: t.extensions(),
        result,
    })
}
