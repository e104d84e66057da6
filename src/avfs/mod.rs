// src/avfs/mod.rs
//! AVFS module - handler registry, mount root handling and process launching.

pub mod handlers;
pub mod launcher;
pub mod mount;

// Re-export commonly used types
pub use handlers::{HandlerEntry, HandlerTable, BUILTIN_HANDLERS, DEFAULT_HANDLER};
pub use launcher::{CommandSpec, Launcher, SystemLauncher};
pub use mount::{default_mount_root, is_mount, virtual_path, FsMountProbe, MountProbe};
