//! `themeleon extensions`: describe the built-in mixins.

use serde::Serialize;
use themeleon_engine::mixins::{builtin, BUILTIN_NAMES};
use themeleon_engine::Loaded;

#[derive(Debug, Serialize)]
pub struct ExtensionInfo {
    pub name: String,
    /// True if the extension takes constructor arguments.
    pub configurable: bool,
    pub ops: Vec<String>,
}

pub fn list() -> Vec<ExtensionInfo> {
    BUILTIN_NAMES
        .iter()
        .filter_map(|name| {
            let (configurable, mixin) = match builtin(name)? {
                Loaded::Mixin(m) => (false, m),
                Loaded::Constructor(construct) => (true, construct(&[]).ok()?),
            };
            Some(ExtensionInfo {
                name: name.to_string(),
                configurable,
                ops: mixin.names().map(String::from).collect(),
            })
        })
        .collect()
}
