//! Configuration loading and root folder resolution
//!
//! The root folder holds both CSV tables and the managed image directory.
//! Resolution priority:
//! 1. Command-line argument (highest priority)
//! 2. `FDRK_ROOT_FOLDER`, then `FDRK_ROOT` environment variable
//! 3. `root_folder` in the module TOML config file
//! 4. OS-dependent compiled default (fallback)
//!
//! A missing or malformed TOML file never aborts startup; it is logged and
//! resolution falls through to the next source.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::{Error, Result};

/// Primary environment variable for the root folder
pub const ROOT_FOLDER_ENV: &str = "FDRK_ROOT_FOLDER";
/// Alternative environment variable for the root folder
pub const ROOT_ENV: &str = "FDRK_ROOT";

/// Submission table file name
pub const DATA_TABLE_FILE: &str = "data.csv";
/// Ranked table file name
pub const RANK_TABLE_FILE: &str = "rank.csv";
/// Managed image directory name
pub const IMAGE_DIR_NAME: &str = "food_picture";

/// Bootstrap configuration loaded from `<config dir>/fdrk/<module>.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TomlConfig {
    /// Root folder for tables and images (optional)
    #[serde(default)]
    pub root_folder: Option<PathBuf>,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,

    /// HTTP bind address such as `127.0.0.1:5741` (optional)
    #[serde(default)]
    pub bind_addr: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file to append to; stderr when unset
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TomlConfig {
    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// Load the config file for `module_name`, if one exists and parses
    pub fn load_for_module(module_name: &str) -> Option<Self> {
        let path = config_file_path(module_name)?;
        match Self::from_file(&path) {
            Ok(config) => {
                debug!("Loaded config from {}", path.display());
                Some(config)
            }
            Err(e) => {
                warn!("Ignoring config file: {}", e);
                None
            }
        }
    }
}

/// Compiled-in fallbacks used when nothing else is configured
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub root_folder: PathBuf,
    pub log_level: String,
}

impl CompiledDefaults {
    pub fn for_current_platform() -> Self {
        Self {
            root_folder: default_root_folder(),
            log_level: default_log_level(),
        }
    }
}

/// OS-dependent default root folder
fn default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/fdrk
        dirs::data_local_dir()
            .map(|d| d.join("fdrk"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/fdrk"))
    } else if cfg!(target_os = "macos") {
        // ~/Library/Application Support/fdrk
        dirs::data_dir()
            .map(|d| d.join("fdrk"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/fdrk"))
    } else if cfg!(target_os = "windows") {
        // %LOCALAPPDATA%\fdrk
        dirs::data_local_dir()
            .map(|d| d.join("fdrk"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\fdrk"))
    } else {
        PathBuf::from("./fdrk_data")
    }
}

/// First existing config file for `module_name`
///
/// Linux also checks `/etc/fdrk/<module>.toml` after the user config dir.
fn config_file_path(module_name: &str) -> Option<PathBuf> {
    let file_name = format!("{}.toml", module_name);
    let user_config = dirs::config_dir().map(|d| d.join("fdrk").join(&file_name));

    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/fdrk").join(&file_name);
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// Resolves the root folder for one module
#[derive(Debug, Clone)]
pub struct RootFolderResolver {
    module_name: String,
    cli_override: Option<PathBuf>,
}

impl RootFolderResolver {
    pub fn new(module_name: &str) -> Self {
        Self {
            module_name: module_name.to_string(),
            cli_override: None,
        }
    }

    /// Apply a command-line `--root-folder` value
    pub fn with_cli_override(mut self, path: Option<PathBuf>) -> Self {
        self.cli_override = path;
        self
    }

    /// Resolve the root folder; never fails
    pub fn resolve(&self) -> PathBuf {
        if let Some(path) = &self.cli_override {
            debug!("Root folder from command line: {}", path.display());
            return path.clone();
        }

        for var in [ROOT_FOLDER_ENV, ROOT_ENV] {
            if let Ok(path) = std::env::var(var) {
                if !path.is_empty() {
                    debug!("Root folder from {}: {}", var, path);
                    return PathBuf::from(path);
                }
            }
        }

        if let Some(path) =
            TomlConfig::load_for_module(&self.module_name).and_then(|c| c.root_folder)
        {
            debug!("Root folder from config file: {}", path.display());
            return path;
        }

        CompiledDefaults::for_current_platform().root_folder
    }
}

/// Locations of the two tables and the managed image directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub data_table: PathBuf,
    pub rank_table: PathBuf,
    pub image_dir: PathBuf,
}

impl DataPaths {
    /// Standard layout under `root`
    pub fn under(root: &Path) -> Self {
        Self {
            data_table: root.join(DATA_TABLE_FILE),
            rank_table: root.join(RANK_TABLE_FILE),
            image_dir: root.join(IMAGE_DIR_NAME),
        }
    }
}

/// Creates the root folder and derives file locations inside it
#[derive(Debug, Clone)]
pub struct RootFolderInitializer {
    root_folder: PathBuf,
}

impl RootFolderInitializer {
    pub fn new(root_folder: PathBuf) -> Self {
        Self { root_folder }
    }

    pub fn root_folder(&self) -> &Path {
        &self.root_folder
    }

    /// Create the root folder (and parents) if missing; idempotent
    pub fn ensure_directory_exists(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root_folder).map_err(|e| {
            Error::Config(format!(
                "Failed to create root folder {}: {}",
                self.root_folder.display(),
                e
            ))
        })
    }

    pub fn data_paths(&self) -> DataPaths {
        DataPaths::under(&self.root_folder)
    }

    pub fn rank_table_exists(&self) -> bool {
        self.data_paths().rank_table.exists()
    }
}
