//! Configuration module for nbport
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (NBPORT_*)
//! 3. Project config (`nbport.toml` in the working directory)
//! 4. User config (`$XDG_CONFIG_HOME/nbport/config.toml`)
//! 5. Built-in defaults (lowest priority)

mod env_validator;
mod loader;
mod types;

pub use env_validator::{levenshtein, nearest, EnvVarValidator};
pub use loader::{ConfigWarning, PROJECT_CONFIG_FILE};
pub use types::{
    CliOverrides, Config, LogConfig, LogLevel, OutputConfig, PayloadsConfig, ServicesConfig,
    SourceConfig, SummaryConfig,
};
