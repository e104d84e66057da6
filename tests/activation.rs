//! End-to-end activation against real processes and the real filesystem.
//!
//! `/` always is a mount point, so it stands in for a live AVFS root; a fresh
//! temp dir stands in for one that never gets mounted. `true` and `false`
//! play the external commands.

use std::{fs, path::Path};

use avfs_open::{
    config::Config,
    fs::{DetectedFile, FileInfo},
    menu::{AvfsMenuProvider, MenuProvider},
    AvfsError,
};

fn config(mount_root: &Path, mount_command: &str, file_manager: &str) -> Config {
    Config {
        mount_root: Some(mount_root.display().to_string()),
        mount_command: vec![mount_command.to_string()],
        file_manager: vec![file_manager.to_string()],
        ..Config::default()
    }
}

fn archive(dir: &Path, name: &str, bytes: &[u8]) -> DetectedFile {
    let path = dir.join(name);
    fs::write(&path, bytes).unwrap();
    DetectedFile::detect(&path).unwrap()
}

#[test]
fn mounted_root_skips_mount_and_launches_viewer() {
    let dir = tempfile::tempdir().unwrap();
    let file = archive(dir.path(), "comics.cbr", b"Rar!\x1a\x07\x00");
    // the mount command would fail if it ran
    let provider =
        AvfsMenuProvider::from_config(&config(Path::new("/"), "false", "true")).unwrap();

    let items = provider.file_items(std::slice::from_ref(&file));
    assert_eq!(items.len(), 1);
    let activation = provider.activate(&items[0]).unwrap();

    assert!(!activation.mounted);
    let expected = format!("{}#urar", file.path().display());
    assert_eq!(activation.virtual_path.to_string_lossy(), expected);
}

#[test]
fn repeated_activation_never_fails_on_live_mount() {
    let dir = tempfile::tempdir().unwrap();
    let file = archive(dir.path(), "src.tar.xz", b"\xfd7zXZ\x00");
    let provider =
        AvfsMenuProvider::from_config(&config(Path::new("/"), "false", "true")).unwrap();

    for _ in 0..2 {
        let activation = provider.activate_file(&file).unwrap();
        assert!(activation.virtual_path.to_string_lossy().ends_with("src.tar.xz#uxz#utar"));
    }
}

#[test]
fn mount_that_leaves_root_unmounted_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("avfs");
    fs::create_dir(&root).unwrap();
    let file = archive(dir.path(), "a.zip", b"PK\x03\x04");

    let provider = AvfsMenuProvider::from_config(&config(&root, "true", "true")).unwrap();
    assert!(matches!(provider.activate_file(&file), Err(AvfsError::NotMounted(_))));

    let provider = AvfsMenuProvider::from_config(&config(&root, "false", "true")).unwrap();
    assert!(matches!(
        provider.activate_file(&file),
        Err(AvfsError::MountFailed { .. })
    ));
}

#[test]
fn missing_binaries_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    let file = archive(dir.path(), "a.7z", b"7z\xbc\xaf\x27\x1c");

    let provider = AvfsMenuProvider::from_config(&config(
        &dir.path().join("avfs"),
        "avfs-open-test-missing-mount",
        "true",
    ))
    .unwrap();
    assert!(matches!(
        provider.activate_file(&file),
        Err(AvfsError::MountCommand { .. })
    ));

    let provider = AvfsMenuProvider::from_config(&config(
        Path::new("/"),
        "true",
        "avfs-open-test-missing-viewer",
    ))
    .unwrap();
    assert!(matches!(provider.activate_file(&file), Err(AvfsError::Launch { .. })));
}

#[test]
fn selection_rules_hold_for_detected_files() {
    let dir = tempfile::tempdir().unwrap();
    let zip = archive(dir.path(), "a.zip", b"PK\x03\x04");
    let deb = archive(dir.path(), "pkg.deb", b"!<arch>\n");
    let txt = archive(dir.path(), "notes.txt", b"hello");
    let provider = AvfsMenuProvider::from_config(&config(Path::new("/"), "true", "true")).unwrap();

    assert!(provider.file_items::<DetectedFile>(&[]).is_empty());
    assert!(provider.file_items(&[zip.clone(), deb.clone()]).is_empty());
    assert!(provider.file_items(&[txt]).is_empty());
    assert_eq!(provider.file_items(&[deb.clone()]).len(), 1);
    assert_eq!(provider.handlers().lookup_handler(&deb), "#deb");
    assert_eq!(provider.handlers().lookup_handler(&zip), "#uzip");
}
