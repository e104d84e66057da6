// src/fs/mod.rs
//! Filesystem module - handles file browsing and type detection.

pub mod browser;
pub mod detection;
pub mod file_info;

// Re-export commonly used types
pub use browser::{load_entries, tail_path, Entry};
pub use detection::{canonical_mime, detect_file_type, DetectedFile, FileCategory, FileType};
pub use file_info::FileInfo;
