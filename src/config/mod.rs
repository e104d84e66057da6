// src/config/mod.rs
//! User configuration: mount root, external commands and extra handlers.
//!
//! Read from `<config_dir>/avfs-open/config.toml`:
//!
//! ```toml
//! mount_root = "~/.avfs"
//! mount_command = ["mountavfs"]
//! file_manager = ["nautilus"]
//!
//! [handlers]
//! "application/x-lzip-compressed-tar" = "#ulzip#utar"
//! ```
//!
//! Every key is optional; a missing file means defaults.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::{
    avfs::{default_mount_root, CommandSpec, HandlerTable},
    error::{AvfsError, Result},
};

pub const DEFAULT_MOUNT_COMMAND: &str = "mountavfs";
pub const DEFAULT_FILE_MANAGER: &str = "nautilus";

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// `None` means `~/.avfs`.
    pub mount_root: Option<String>,
    pub mount_command: Vec<String>,
    pub file_manager: Vec<String>,
    /// Extra or replacement MIME -> suffix entries, applied in order.
    pub handlers: IndexMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mount_root: None,
            mount_command: vec![DEFAULT_MOUNT_COMMAND.to_string()],
            file_manager: vec![DEFAULT_FILE_MANAGER.to_string()],
            handlers: IndexMap::new(),
        }
    }
}

/// `<config_dir>/avfs-open/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("avfs-open").join("config.toml"))
}

impl Config {
    pub fn parse(text: &str, origin: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|source| AvfsError::Config {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Load `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => {
                tracing::debug!(path = %path.display(), "loaded config");
                Self::parse(&text, path)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Load from an explicit path, or the default location when `None`.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path.map(Path::to_path_buf).or_else(default_config_path) {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// Tilde-expanded mount root.
    pub fn mount_root(&self) -> Result<PathBuf> {
        match &self.mount_root {
            Some(raw) => Ok(PathBuf::from(shellexpand::tilde(raw).into_owned())),
            None => default_mount_root(),
        }
    }

    pub fn mount_command(&self) -> Result<CommandSpec> {
        CommandSpec::from_argv(&self.mount_command, "mount command")
    }

    pub fn file_manager(&self) -> Result<CommandSpec> {
        CommandSpec::from_argv(&self.file_manager, "file manager")
    }

    /// Built-in handlers with this config's entries applied.
    pub fn handler_table(&self) -> HandlerTable {
        HandlerTable::builtin().with_overrides(
            self.handlers
                .iter()
                .map(|(mime, suffix)| (mime.clone(), suffix.clone())),
        )
    }
}
