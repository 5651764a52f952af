//! Finding, layering, and creating config files.
//!
//! Callsheet reads two layers, the later replacing whole sections of the
//! earlier:
//! 1. [`Layer::User`]: `config.toml` in the Callsheet config dir
//!    (`--config-dir`, then `CALLSHEET_CONFIG_DIR`, then the platform dir)
//! 2. [`Layer::Project`]: `callsheet.toml` in the working directory
//!
//! A layer that cannot be read or parsed is skipped with a warning; a bad
//! config file never stops a calling session from starting.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::{CallsheetConfig, ConfigError, Result};

/// File name of the project layer.
pub const PROJECT_CONFIG_FILE: &str = "callsheet.toml";

/// File name of the user layer inside the config dir.
pub const USER_CONFIG_FILE: &str = "config.toml";

const CONFIG_DIR_ENV: &str = "CALLSHEET_CONFIG_DIR";

const FILE_HEADER: &str = "# Callsheet configuration\n\
                           # Set [contacts].path to your tab-separated export.\n\n";

/// The two config layers, lowest precedence first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    User,
    Project,
}

impl Layer {
    pub fn label(self) -> &'static str {
        match self {
            Layer::User => "user",
            Layer::Project => "project",
        }
    }
}

/// What happened to a layer's file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerStatus {
    /// No file at the path.
    Missing,
    /// Parsed and merged.
    Loaded,
    /// Present but unreadable or malformed; the message says why.
    Skipped(String),
}

/// One layer that was looked for.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    pub layer: Layer,
    pub path: PathBuf,
    pub status: LayerStatus,
}

impl ConfigSource {
    pub fn is_loaded(&self) -> bool {
        self.status == LayerStatus::Loaded
    }
}

/// The merged config and how it was assembled.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: CallsheetConfig,
    /// Every layer looked for, lowest precedence first.
    pub sources: Vec<ConfigSource>,
    /// Problems worth showing the operator. None of them are fatal.
    pub warnings: Vec<String>,
}

impl LoadedConfig {
    /// Paths of the layers that were merged.
    pub fn loaded_from(&self) -> Vec<&Path> {
        self.sources
            .iter()
            .filter(|s| s.is_loaded())
            .map(|s| s.path.as_path())
            .collect()
    }
}

/// Read and merge both layers.
///
/// `project_dir` defaults to the working directory. `config_dir` replaces the
/// user config dir lookup entirely.
pub fn load_config(project_dir: Option<&Path>, config_dir: Option<&Path>) -> LoadedConfig {
    let user_path = config_dir
        .map(Path::to_path_buf)
        .or_else(user_config_dir)
        .map(|dir| dir.join(USER_CONFIG_FILE));
    let project_path = project_dir
        .unwrap_or_else(|| Path::new("."))
        .join(PROJECT_CONFIG_FILE);

    let mut config = CallsheetConfig::new();
    let mut sources = Vec::new();
    let mut warnings = Vec::new();

    let layers = user_path
        .map(|path| (Layer::User, path))
        .into_iter()
        .chain([(Layer::Project, project_path)]);

    for (layer, path) in layers {
        let status = match read_layer(&path) {
            Ok(None) => LayerStatus::Missing,
            Ok(Some(parsed)) => {
                debug!(layer = layer.label(), path = %path.display(), "Merged config layer");
                config.merge(parsed);
                LayerStatus::Loaded
            }
            Err(e) => {
                warnings.push(format!(
                    "ignoring {} config {}: {}",
                    layer.label(),
                    path.display(),
                    e
                ));
                LayerStatus::Skipped(e.to_string())
            }
        };
        sources.push(ConfigSource {
            layer,
            path,
            status,
        });
    }

    if let Some(contacts) = &config.contacts
        && let Err(e) = contacts.delimiter_byte()
    {
        warnings.push(format!("[contacts] {}; using tab instead", e));
    }

    LoadedConfig {
        config,
        sources,
        warnings,
    }
}

/// Parse a single config file.
pub fn load_config_file(path: &Path) -> Result<CallsheetConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.display().to_string(),
        source: e,
    })?;
    CallsheetConfig::from_toml(&contents)
}

/// `None` when the file does not exist.
fn read_layer(path: &Path) -> Result<Option<CallsheetConfig>> {
    if !path.exists() {
        return Ok(None);
    }
    load_config_file(path).map(Some)
}

/// Write `config` to a new file at `path`, creating parent directories.
///
/// Never overwrites: an existing file yields [`ConfigError::AlreadyExists`].
pub fn create_config_file(config: &CallsheetConfig, path: &Path) -> Result<()> {
    let write_err = |e: io::Error| ConfigError::WriteFile {
        path: path.display().to_string(),
        source: e,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }

    let contents = config.to_toml()?;
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => ConfigError::AlreadyExists(path.to_path_buf()),
            _ => write_err(e),
        })?;
    file.write_all(FILE_HEADER.as_bytes()).map_err(write_err)?;
    file.write_all(contents.as_bytes()).map_err(write_err)?;

    info!(path = %path.display(), "Created config file");
    Ok(())
}

/// The Callsheet config dir: `CALLSHEET_CONFIG_DIR` if set, else
/// `<platform config dir>/callsheet`.
pub fn user_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV)
        && !dir.is_empty()
    {
        return Some(PathBuf::from(dir));
    }
    dirs::config_dir().map(|d| d.join("callsheet"))
}
