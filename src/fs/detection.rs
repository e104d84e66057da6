// src/fs/detection.rs
//! File type detection using archive file names, magic numbers and an
//! extension-based fallback.

use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use anyhow::Result;
use infer::{Infer, MatcherType};
use mime_guess::MimeGuess;

use super::FileInfo;

/// High-level file categories.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum FileCategory {
    Archive,
    Image,
    Audio,
    Video,
    Document,
    Binary,
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FileCategory::Archive => "Archive",
            FileCategory::Image => "Image",
            FileCategory::Audio => "Audio",
            FileCategory::Video => "Video",
            FileCategory::Document => "Document",
            FileCategory::Binary => "Binary",
        };
        write!(f, "{}", s)
    }
}

/// Archive names the generic guessers get wrong or too coarse
/// (`.tar.gz` is not just `application/gzip`). Freedesktop type names.
const ARCHIVE_NAMES: &[(&str, &str)] = &[
    (".tar.gz", "application/x-compressed-tar"),
    (".tgz", "application/x-compressed-tar"),
    (".tar.bz2", "application/x-bzip-compressed-tar"),
    (".tbz2", "application/x-bzip-compressed-tar"),
    (".tbz", "application/x-bzip-compressed-tar"),
    (".tb2", "application/x-bzip-compressed-tar"),
    (".tar.xz", "application/x-xz-compressed-tar"),
    (".txz", "application/x-xz-compressed-tar"),
    (".tar", "application/x-tar"),
    (".iso", "application/x-cd-image"),
    (".jar", "application/java-archive"),
    (".rar", "application/vnd.rar"),
    (".cbr", "application/vnd.comicbook-rar"),
    (".ar", "application/x-archive"),
    (".7z", "application/x-7z-compressed"),
    (".deb", "application/vnd.debian.binary-package"),
    (".rpm", "application/x-redhat-package-manager"),
    (".cab", "application/vnd.ms-cab-compressed"),
    (".cpio", "application/x-cpio"),
    (".lha", "application/x-lha"),
    (".lzh", "application/x-lha"),
    (".zoo", "application/x-zoo"),
    (".zip", "application/zip"),
];

/// Legacy or vendor names -> the name used in the handler table.
const MIME_ALIASES: &[(&str, &str)] = &[
    ("application/x-rar-compressed", "application/vnd.rar"),
    ("application/x-rar", "application/vnd.rar"),
    ("application/x-cbr", "application/vnd.comicbook-rar"),
    ("application/x-rpm", "application/x-redhat-package-manager"),
    ("application/x-deb", "application/vnd.debian.binary-package"),
    ("application/x-debian-package", "application/vnd.debian.binary-package"),
    ("application/x-unix-archive", "application/x-archive"),
    ("application/x-iso9660-image", "application/x-cd-image"),
    ("application/x-zip-compressed", "application/zip"),
    ("application/x-zip", "application/zip"),
    ("application/x-java-archive", "application/java-archive"),
    ("application/x-lzh-compressed", "application/x-lha"),
    ("application/x-gtar", "application/x-tar"),
    ("application/x-gzip", "application/gzip"),
];

/// Compressed streams that are archive-like even without a table entry.
const COMPRESSED: &[&str] = &["application/gzip", "application/x-bzip2", "application/x-xz"];

/// Map a MIME name to its canonical spelling.
pub fn canonical_mime(mime: &str) -> &str {
    MIME_ALIASES
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(mime))
        .map(|(_, canonical)| *canonical)
        .unwrap_or(mime)
}

fn archive_mime_from_name(path: &Path) -> Option<&'static str> {
    let name = path.file_name()?.to_string_lossy().to_lowercase();
    ARCHIVE_NAMES
        .iter()
        .find(|(ext, _)| name.len() > ext.len() && name.ends_with(ext))
        .map(|(_, mime)| *mime)
}

/// Holds the detected MIME type, its alternative names and a category.
#[derive(Debug, Clone, PartialEq)]
pub struct FileType {
    /// Canonical MIME type.
    pub mime: String,
    /// `mime` first, then any other name it was reported under.
    pub names: Vec<String>,
    pub category: FileCategory,
}

impl FileType {
    /// Type reported under `reported`; archive types override `category`.
    pub fn from_mime(reported: &str, category: FileCategory) -> Self {
        let canonical = canonical_mime(reported).to_string();
        let mut names = vec![canonical.clone()];
        if !reported.eq_ignore_ascii_case(&canonical) {
            names.push(reported.to_string());
        }
        let category = if ARCHIVE_NAMES.iter().any(|(_, m)| *m == canonical)
            || COMPRESSED.iter().any(|m| *m == canonical)
        {
            FileCategory::Archive
        } else {
            category
        };
        Self {
            mime: canonical,
            names,
            category,
        }
    }

    /// Case-insensitive match against the canonical name or any alias.
    pub fn is(&self, mime: &str) -> bool {
        let wanted = canonical_mime(mime);
        self.names
            .iter()
            .any(|n| n.eq_ignore_ascii_case(wanted) || n.eq_ignore_ascii_case(mime))
    }
}

/// Detect MIME type & category for a given file path.
pub fn detect_file_type(path: &Path) -> Result<FileType> {
    // 1. Archive file names
    if let Some(mime) = archive_mime_from_name(path) {
        return Ok(FileType::from_mime(mime, FileCategory::Archive));
    }

    // 2. Magic-number sniffing
    if let Some(kind) = Infer::new().get_from_path(path)? {
        let category = match kind.matcher_type() {
            MatcherType::Archive => FileCategory::Archive,
            MatcherType::Image => FileCategory::Image,
            MatcherType::Audio => FileCategory::Audio,
            MatcherType::Video => FileCategory::Video,
            MatcherType::Doc | MatcherType::Text | MatcherType::Book => FileCategory::Document,
            _ => FileCategory::Binary,
        };
        return Ok(FileType::from_mime(kind.mime_type(), category));
    }

    // 3. Fallback to extension-based lookup
    let guess = MimeGuess::from_path(path);
    let mime = guess
        .first_or_octet_stream() // defaults to application/octet-stream
        .to_string();

    // 4. Map top-level type to category
    let category = match mime.split('/').next().unwrap_or("application") {
        "image" => FileCategory::Image,
        "audio" => FileCategory::Audio,
        "video" => FileCategory::Video,
        "text" => FileCategory::Document,
        _ => FileCategory::Binary,
    };

    Ok(FileType::from_mime(&mime, category))
}

/// A file whose type has been detected, ready to hand to the menu provider.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedFile {
    path: PathBuf,
    file_type: FileType,
}

impl DetectedFile {
    /// Resolve `path` to its canonical form (absolute, no `.`, `..` or
    /// symlinks) and detect its type. The file must exist.
    pub fn detect(path: impl AsRef<Path>) -> Result<Self> {
        let path = fs::canonicalize(path.as_ref())?;
        let file_type = detect_file_type(&path)?;
        Ok(Self { path, file_type })
    }

    /// Wrap an already known type. The path should be absolute.
    pub fn with_type(path: impl Into<PathBuf>, file_type: FileType) -> Self {
        Self {
            path: path.into(),
            file_type,
        }
    }

    pub fn file_type(&self) -> &FileType {
        &self.file_type
    }
}

impl FileInfo for DetectedFile {
    fn path(&self) -> &Path {
        &self.path
    }

    fn matches_mime_type(&self, mime: &str) -> bool {
        self.file_type.is(mime)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn compound_tar_names_win_over_gzip() {
        let dir = tempfile::tempdir().unwrap();
        // gzip magic, but the name says tarball
        let path = write(dir.path(), "Backup.TAR.GZ", &[0x1f, 0x8b, 0x08, 0x00]);
        let ft = detect_file_type(&path).unwrap();
        assert_eq!(ft.mime, "application/x-compressed-tar");
        assert_eq!(ft.category, FileCategory::Archive);
    }

    #[test]
    fn archive_names_map_to_freedesktop_types() {
        let cases = [
            ("a.tgz", "application/x-compressed-tar"),
            ("a.tar.bz2", "application/x-bzip-compressed-tar"),
            ("a.tar.xz", "application/x-xz-compressed-tar"),
            ("a.cbr", "application/vnd.comicbook-rar"),
            ("a.rar", "application/vnd.rar"),
            ("a.deb", "application/vnd.debian.binary-package"),
            ("a.jar", "application/java-archive"),
            ("a.iso", "application/x-cd-image"),
            ("a.lzh", "application/x-lha"),
            ("a.tar", "application/x-tar"),
            ("a.ar", "application/x-archive"),
            ("a.zip", "application/zip"),
        ];
        for (name, mime) in cases {
            assert_eq!(archive_mime_from_name(Path::new(name)), Some(mime), "{name}");
        }
        assert_eq!(archive_mime_from_name(Path::new(".zip")), None);
        assert_eq!(archive_mime_from_name(Path::new("notes.txt")), None);
    }

    #[test]
    fn sniffs_zip_without_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "blob", b"PK\x03\x04\x14\x00\x00\x00\x08\x00");
        let ft = detect_file_type(&path).unwrap();
        assert_eq!(ft.mime, "application/zip");
        assert_eq!(ft.category, FileCategory::Archive);
    }

    #[test]
    fn falls_back_to_extension_guess() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "notes.txt", b"hello");
        let ft = detect_file_type(&path).unwrap();
        assert_eq!(ft.mime, "text/plain");
        assert_eq!(ft.category, FileCategory::Document);
    }

    #[test]
    fn aliases_match_both_ways() {
        let ft = FileType::from_mime("application/x-rar-compressed", FileCategory::Archive);
        assert_eq!(ft.mime, "application/vnd.rar");
        assert!(ft.is("application/vnd.rar"));
        assert!(ft.is("application/x-rar-compressed"));
        assert!(ft.is("application/x-rar"));
        assert!(!ft.is("application/zip"));
    }

    #[test]
    fn detected_file_is_absolute_and_matches() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "set.7z", b"7z\xbc\xaf\x27\x1c");
        let file = DetectedFile::detect(&path).unwrap();
        assert!(file.path().is_absolute());
        assert!(file.matches_mime_type("application/x-7z-compressed"));
        assert!(!file.matches_mime_type("application/zip"));
    }

    #[test]
    fn detected_file_path_has_no_parent_components() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        write(dir.path(), "x.zip", b"PK\x03\x04");
        let file = DetectedFile::detect(dir.path().join("sub/../x.zip")).unwrap();
        let canonical = fs::canonicalize(dir.path()).unwrap().join("x.zip");
        assert_eq!(file.path(), canonical.as_path());
        assert!(!file.path().components().any(|c| c == std::path::Component::ParentDir));
    }

    #[test]
    fn missing_file_is_not_detected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(DetectedFile::detect(dir.path().join("gone.zip")).is_err());
    }
}
