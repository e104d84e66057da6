// src/error.rs
//! Error type shared by the registry, mount and launcher layers.

use std::{io, path::PathBuf, process::ExitStatus};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AvfsError {
    #[error("no home directory to place the AVFS mount root under")]
    NoHomeDir,

    #[error("command line for {0} is empty")]
    EmptyCommand(&'static str),

    #[error("failed to run mount command `{command}`: {source}")]
    MountCommand {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error(
        "mount command `{command}` exited with {status} and {root} is not mounted{}",
        detail(.stderr)
    )]
    MountFailed {
        command: String,
        status: ExitStatus,
        root: PathBuf,
        /// Trimmed stderr of the mount command, possibly empty.
        stderr: String,
    },

    #[error("{0} is still not a mount point after running the mount command")]
    NotMounted(PathBuf),

    #[error("failed to launch file manager `{command}`: {source}")]
    Launch {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, AvfsError>;

fn detail(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}
