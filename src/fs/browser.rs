// src/fs/browser.rs
//! Directory listing for the file browser.

use std::{fs, path::Path};

use super::detection::{detect_file_type, FileCategory, FileType};

/// One row of the browser.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub name: String,
    pub is_dir: bool,
    /// `None` for directories and unreadable files.
    pub file_type: Option<FileType>,
}

impl Entry {
    pub fn category(&self) -> FileCategory {
        self.file_type
            .as_ref()
            .map(|ft| ft.category)
            .unwrap_or(FileCategory::Binary)
    }

    pub fn mime(&self) -> &str {
        self.file_type.as_ref().map(|ft| ft.mime.as_str()).unwrap_or("")
    }
}

/// Load the entries of `dir`: directories first, then files, each group
/// sorted case-insensitively. An unreadable directory yields no entries.
pub fn load_entries(dir: &Path) -> Vec<Entry> {
    let read = match fs::read_dir(dir) {
        Ok(read) => read,
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "cannot list directory");
            return Vec::new();
        }
    };

    let mut list = read
        .filter_map(Result::ok)
        .map(|e| {
            let name = e.file_name().to_string_lossy().into_owned();
            let path = e.path();
            if path.is_dir() {
                Entry {
                    name,
                    is_dir: true,
                    file_type: None,
                }
            } else {
                let file_type = detect_file_type(&path)
                    .inspect_err(|e| tracing::debug!(path = %path.display(), error = %e, "detection failed"))
                    .ok();
                Entry {
                    name,
                    is_dir: false,
                    file_type,
                }
            }
        })
        .collect::<Vec<_>>();
    list.sort_by_key(|e| (!e.is_dir, e.name.to_lowercase()));
    list
}

/// Show only the last `n` components of `path`, prefixed with `…/` when
/// anything was cut.
pub fn tail_path(path: &Path, n: usize) -> String {
    let parts: Vec<String> = path
        .components()
        .filter_map(|c| match c {
            std::path::Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    if parts.is_empty() {
        return "/".to_string();
    }
    let skip = parts.len().saturating_sub(n);
    let tail = parts[skip..].join("/");
    if skip > 0 {
        format!("…/{}", tail)
    } else if path.is_absolute() {
        format!("/{}", tail)
    } else {
        tail
    }
}
