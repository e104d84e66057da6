// src/lib.rs
//! avfs-open - browse archives as directories through AVFS.
//!
//! This library provides the "Open with AVFS" context-menu action: a MIME
//! type to AVFS handler registry, on-demand mounting of `~/.avfs`, and the
//! launch of a file manager at the archive's virtual path. A small terminal
//! file browser hosts the menu.

pub mod app;
pub mod avfs;
pub mod config;
pub mod error;
pub mod fs;
pub mod menu;
pub mod ui;

pub use error::{AvfsError, Result};
