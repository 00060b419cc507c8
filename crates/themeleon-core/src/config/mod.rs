//! Themeleon configuration layer.
//!
//! Every environment read lives here; the rest of the workspace goes through
//! the structured config types instead of calling `std::env::var` directly.
//!
//! - `loader`: env_or, env_optional, env_bool helpers and `.env` loading
//! - `schema`: ExtensionConfig, ObservabilityConfig, PathsConfig
//! - `env_keys`: key constants (with aliases)

pub mod env_keys;
pub mod loader;
pub mod schema;

pub use loader::{env_bool, env_optional, env_or, load_dotenv, load_dotenv_from};
pub use schema::{ExtensionConfig, ObservabilityConfig, PathsConfig};
