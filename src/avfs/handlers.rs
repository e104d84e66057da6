// src/avfs/handlers.rs
//! MIME type to AVFS handler suffix registry.
//!
//! The suffixes are AVFS's own module names (see `/usr/share/avfs/extfs/`
//! and the AVFS README) and must be kept byte-for-byte.

use crate::fs::FileInfo;

/// Suffix used when no entry matches: a plain passthrough mount.
pub const DEFAULT_HANDLER: &str = "#";

/// Built-in handlers, in lookup order.
pub const BUILTIN_HANDLERS: &[(&str, &str)] = &[
    // specializations from avfs modules
    ("application/x-bzip-compressed-tar", "#"), // .tar.bz2
    ("application/x-compressed-tar", "#ugz#utar"), // .tar.gz
    ("application/x-xz-compressed-tar", "#uxz#utar"), // .tar.xz
    ("application/x-cd-image", "#iso9660"),     // .iso
    ("application/java-archive", "#uzip"),      // .jar
    ("application/vnd.rar", "#urar"),           // .rar
    ("application/x-archive", "#uar"),          // .ar
    // extfs modules
    ("application/x-7z-compressed", "#u7z"),
    ("application/vnd.debian.binary-package", "#deb"),
    ("application/x-redhat-package-manager", "#rpm"),
    ("application/vnd.ms-cab-compressed", "#ucab"),
    ("application/x-cpio", "#ucpio"),
    ("application/x-lha", "#ulha"),
    ("application/x-zoo", "#uzoo"),
    ("application/vnd.comicbook-rar", "#urar"), // .cbr
    // catch-alls
    ("application/x-tar", "#utar"),
    ("application/zip", "#uzip"),
];

/// One registry entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerEntry {
    pub mime: String,
    pub suffix: String,
}

/// Ordered MIME -> suffix table. Keys are unique; the first matching entry wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerTable {
    entries: Vec<HandlerEntry>,
}

impl Default for HandlerTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl HandlerTable {
    /// The table AVFS ships modules for.
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN_HANDLERS
                .iter()
                .map(|(mime, suffix)| HandlerEntry {
                    mime: mime.to_string(),
                    suffix: suffix.to_string(),
                })
                .collect(),
        }
    }

    /// Apply user entries: an existing key keeps its position and takes the
    /// new suffix, an unknown key is appended.
    pub fn with_overrides<I, K, V>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (mime, suffix) in overrides {
            let (mime, suffix) = (mime.into(), suffix.into());
            match self.entries.iter_mut().find(|e| e.mime == mime) {
                Some(entry) => entry.suffix = suffix,
                None => self.entries.push(HandlerEntry { mime, suffix }),
            }
        }
        self
    }

    pub fn entries(&self) -> &[HandlerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Suffix for the first entry the file matches, or [`DEFAULT_HANDLER`].
    pub fn lookup_handler<F: FileInfo + ?Sized>(&self, file: &F) -> &str {
        self.entries
            .iter()
            .find(|e| file.matches_mime_type(&e.mime))
            .map(|e| e.suffix.as_str())
            .unwrap_or(DEFAULT_HANDLER)
    }

    /// Same as [`lookup_handler`](Self::lookup_handler) for a bare MIME string.
    pub fn lookup_mime(&self, mime: &str) -> &str {
        self.entries
            .iter()
            .find(|e| e.mime == mime)
            .map(|e| e.suffix.as_str())
            .unwrap_or(DEFAULT_HANDLER)
    }

    /// Whether the file's type is one of the table's keys.
    pub fn is_supported_archive<F: FileInfo + ?Sized>(&self, file: &F) -> bool {
        self.entries.iter().any(|e| file.matches_mime_type(&e.mime))
    }
}
