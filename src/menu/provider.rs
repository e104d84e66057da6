// src/menu/provider.rs
//! The "Open with AVFS" context-menu provider.

use std::path::{Path, PathBuf};

use crate::{
    avfs::{
        virtual_path, CommandSpec, FsMountProbe, HandlerTable, Launcher, MountProbe,
        SystemLauncher,
    },
    config::Config,
    error::{AvfsError, Result},
    fs::FileInfo,
};

use super::MenuItem;

pub const ITEM_NAME: &str = "AvfsOpen::OpenWithAVFS";
pub const ITEM_LABEL: &str = "_Open with AVFS as virtual directory";
pub const ITEM_TIP: &str = "Mount and open the archive with AVFS";
pub const ITEM_ICON: &str = "archive-mount";

/// The contract a host drives: ask for items, activate one.
pub trait MenuProvider {
    /// Items to show for `files`. Must not have side effects.
    fn file_items<F: FileInfo + Clone>(&self, files: &[F]) -> Vec<MenuItem<F>>;

    /// Run the action of an item previously returned by `file_items`.
    fn activate<F: FileInfo>(&self, item: &MenuItem<F>) -> Result<Activation>;
}

/// Outcome of a successful activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    /// Path handed to the file manager.
    pub virtual_path: PathBuf,
    /// Whether this activation had to run the mount command.
    pub mounted: bool,
}

/// Mounts AVFS on demand and opens archives in a new file manager window.
#[derive(Debug, Clone)]
pub struct AvfsMenuProvider<L = SystemLauncher, P = FsMountProbe> {
    handlers: HandlerTable,
    mount_root: PathBuf,
    mount_command: CommandSpec,
    file_manager: CommandSpec,
    launcher: L,
    probe: P,
}

impl AvfsMenuProvider {
    /// Provider wired to the real filesystem and process table.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            config.handler_table(),
            config.mount_root()?,
            config.mount_command()?,
            config.file_manager()?,
            SystemLauncher,
            FsMountProbe,
        ))
    }
}

impl<L: Launcher, P: MountProbe> AvfsMenuProvider<L, P> {
    pub fn new(
        handlers: HandlerTable,
        mount_root: PathBuf,
        mount_command: CommandSpec,
        file_manager: CommandSpec,
        launcher: L,
        probe: P,
    ) -> Self {
        Self {
            handlers,
            mount_root,
            mount_command,
            file_manager,
            launcher,
            probe,
        }
    }

    pub fn handlers(&self) -> &HandlerTable {
        &self.handlers
    }

    pub fn mount_root(&self) -> &Path {
        &self.mount_root
    }

    /// Menu items for a selection: one item for a single supported
    /// archive, nothing otherwise.
    pub fn build_menu_items<F: FileInfo + Clone>(&self, files: &[F]) -> Vec<MenuItem<F>> {
        let [file] = files else {
            return Vec::new();
        };
        if !self.handlers.is_supported_archive(file) {
            return Vec::new();
        }
        vec![MenuItem {
            name: ITEM_NAME.to_string(),
            label: ITEM_LABEL.to_string(),
            tip: ITEM_TIP.to_string(),
            icon: ITEM_ICON.to_string(),
            file: file.clone(),
        }]
    }

    /// Where `file` shows up under the mount root. No side effects.
    pub fn virtual_path_for<F: FileInfo + ?Sized>(&self, file: &F) -> PathBuf {
        virtual_path(&self.mount_root, file.path(), self.handlers.lookup_handler(file))
    }

    /// Mount the AVFS root unless it already is. Returns whether the mount
    /// command was run.
    pub fn ensure_mounted(&self) -> Result<bool> {
        if self.probe.is_mounted(&self.mount_root) {
            tracing::debug!(root = %self.mount_root.display(), "already mounted");
            return Ok(false);
        }

        tracing::info!(root = %self.mount_root.display(), command = %self.mount_command, "mounting AVFS");
        let output = self
            .launcher
            .run(&self.mount_command, &[])
            .map_err(|source| AvfsError::MountCommand {
                command: self.mount_command.to_string(),
                source,
            })?;
        let status = output.status;
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let (stdout, stderr) = (stdout.trim(), stderr.trim());

        if status.success() {
            tracing::debug!(%status, stdout, stderr, "mount command finished");
        } else {
            tracing::warn!(%status, stdout, stderr, "mount command failed");
        }

        if self.probe.is_mounted(&self.mount_root) {
            if !status.success() {
                tracing::warn!(root = %self.mount_root.display(), "root is mounted anyway");
            }
            return Ok(true);
        }
        if status.success() {
            Err(AvfsError::NotMounted(self.mount_root.clone()))
        } else {
            Err(AvfsError::MountFailed {
                command: self.mount_command.to_string(),
                status,
                root: self.mount_root.clone(),
                stderr: stderr.to_string(),
            })
        }
    }

    /// Ensure the mount, then open the archive's virtual directory in a new
    /// file manager window without waiting for it.
    pub fn activate_file<F: FileInfo + ?Sized>(&self, file: &F) -> Result<Activation> {
        let mounted = self.ensure_mounted()?;
        let virtual_path = self.virtual_path_for(file);

        tracing::info!(
            file = %file.path().display(),
            virtual_path = %virtual_path.display(),
            "opening archive"
        );
        self.launcher
            .spawn_detached(&self.file_manager, &[virtual_path.clone().into_os_string()])
            .map_err(|source| AvfsError::Launch {
                command: self.file_manager.to_string(),
                source,
            })?;

        Ok(Activation {
            virtual_path,
            mounted,
        })
    }
}

impl<L: Launcher, P: MountProbe> MenuProvider for AvfsMenuProvider<L, P> {
    fn file_items<F: FileInfo + Clone>(&self, files: &[F]) -> Vec<MenuItem<F>> {
        self.build_menu_items(files)
    }

    fn activate<F: FileInfo>(&self, item: &MenuItem<F>) -> Result<Activation> {
        self.activate_file(&item.file)
    }
}
