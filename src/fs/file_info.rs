// src/fs/file_info.rs
//! The file abstraction a host hands to the menu provider.

use std::path::Path;

/// A selected filesystem entry, owned by the host.
pub trait FileInfo {
    /// Absolute path of the entry.
    fn path(&self) -> &Path;

    /// Whether the entry's content type is (or is an alias of) `mime`.
    fn matches_mime_type(&self, mime: &str) -> bool;
}

impl<T: FileInfo + ?Sized> FileInfo for &T {
    fn path(&self) -> &Path {
        (**self).path()
    }

    fn matches_mime_type(&self, mime: &str) -> bool {
        (**self).matches_mime_type(mime)
    }
}
