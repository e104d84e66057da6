// src/avfs/mount.rs
//! AVFS mount root: mount-point probing and virtual path construction.

use std::{
    ffi::OsString,
    os::unix::fs::MetadataExt,
    path::{Component, Path, PathBuf},
};

use crate::error::{AvfsError, Result};

/// Directory name AVFS mounts under the user's home.
pub const MOUNT_DIR_NAME: &str = ".avfs";

/// `~/.avfs`.
pub fn default_mount_root() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(MOUNT_DIR_NAME))
        .ok_or(AvfsError::NoHomeDir)
}

/// Whether `path` is a mount point.
///
/// A symlink never is. Otherwise the path is a mount point when it lives on
/// a different device than its parent, or when it is its own parent (`/`).
/// Any stat failure (missing dir, dead FUSE endpoint) counts as unmounted.
pub fn is_mount(path: &Path) -> bool {
    let Ok(meta) = path.symlink_metadata() else {
        return false;
    };
    if meta.file_type().is_symlink() {
        return false;
    }
    let Ok(parent) = path.join("..").symlink_metadata() else {
        return false;
    };
    meta.dev() != parent.dev() || meta.ino() == parent.ino()
}

/// Answers "is this directory currently mounted?".
pub trait MountProbe {
    fn is_mounted(&self, root: &Path) -> bool;
}

impl<T: MountProbe + ?Sized> MountProbe for &T {
    fn is_mounted(&self, root: &Path) -> bool {
        (**self).is_mounted(root)
    }
}

/// Probe backed by [`is_mount`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FsMountProbe;

impl MountProbe for FsMountProbe {
    fn is_mounted(&self, root: &Path) -> bool {
        is_mount(root)
    }
}

/// `mount_root` + `file` without its leading separators + `suffix`.
///
/// AVFS mirrors the real tree under its root; the suffix selects the
/// decoder chain, e.g. `/data/a.tar.gz` + `#ugz#utar` ->
/// `<root>/data/a.tar.gz#ugz#utar`.
pub fn virtual_path(mount_root: &Path, file: &Path, suffix: &str) -> PathBuf {
    let relative: PathBuf = file
        .components()
        .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
        .collect();
    let mut name = OsString::from(relative.as_os_str());
    name.push(suffix);
    mount_root.join(name)
}
