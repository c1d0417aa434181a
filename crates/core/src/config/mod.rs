//! Configuration loading and validation.
//!
//! Settings come from a TOML file, overridden by `CARDSHELF_`-prefixed
//! environment variables with `__` separating nested keys
//! (e.g. `CARDSHELF_SERVER__PORT=9000`).

mod loader;
mod types;
mod validate;

pub use loader::{load_config, load_config_from_str};
pub use types::*;
pub use validate::validate_config;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
