//! Configuration system for Callsheet.
//!
//! Provides TOML-based configuration with:
//! - Contact file location, delimiter, and column names (`[contacts]`)
//! - Notes output directory and file naming (`[notes]`)
//! - Log file directory (`[logging]`)
//! - Config file layering (user config dir + project-local overrides)

pub mod discovery;
pub mod error;
pub mod types;

pub use discovery::{
    ConfigSource, Layer, LayerStatus, LoadedConfig, PROJECT_CONFIG_FILE, USER_CONFIG_FILE,
    create_config_file, load_config, load_config_file, user_config_dir,
};
pub use error::{ConfigError, Result};
pub use types::*;
