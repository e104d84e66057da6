// src/app/state.rs
//! Application state management.

use std::{collections::BTreeSet, path::PathBuf};

use anyhow::Result;
use ratatui::{widgets::ListState, Frame};

use crate::{
    avfs::{FsMountProbe, Launcher, MountProbe, SystemLauncher},
    fs::{load_entries, tail_path, DetectedFile, Entry, FileCategory, FileInfo, FileType},
    menu::{AvfsMenuProvider, MenuItem, MenuProvider},
    ui::{
        keybindings::{key_to_action, NavigationAction},
        layout::{compute_layout, Section, SectionVisibility},
        widgets::{render_details, render_file_list, render_menu_popup, render_status_bar},
    },
};

use crossterm::event::KeyEvent;

/// Open context menu.
pub struct MenuPopup {
    pub items: Vec<MenuItem<DetectedFile>>,
    pub selected: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// Message shown in the status bar until the next one replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub text: String,
}

impl Status {
    fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }
}

/// What the details pane shows for the highlighted file.
pub struct Details {
    pub name: String,
    pub file_type: FileType,
    pub suffix: String,
    pub supported: bool,
    pub virtual_path: PathBuf,
}

/// Main application state.
pub struct App<L = SystemLauncher, P = FsMountProbe> {
    /// Current directory being browsed
    pub current_dir: PathBuf,
    /// Directory entries
    pub entries: Vec<Entry>,
    /// List widget state
    pub state: ListState,
    /// Currently highlighted index
    pub selected: usize,
    /// Names of marked entries in `current_dir`
    pub marked: BTreeSet<String>,

    /// Provider queried for context-menu items
    pub provider: AvfsMenuProvider<L, P>,
    /// Context menu, when open
    pub menu: Option<MenuPopup>,
    /// Last status message
    pub status: Option<Status>,

    /// Section visibility state
    pub visibility: SectionVisibility,
}

impl App {
    /// Create a new application instance browsing `dir`.
    pub fn new(dir: PathBuf, provider: AvfsMenuProvider) -> Result<Self> {
        Self::with_provider(dir, provider)
    }
}

impl<L: Launcher, P: MountProbe> App<L, P> {
    pub fn with_provider(dir: PathBuf, provider: AvfsMenuProvider<L, P>) -> Result<Self> {
        let current_dir = std::fs::canonicalize(&dir)?;
        let mut state = ListState::default();
        state.select(Some(0));

        Ok(Self {
            entries: load_entries(&current_dir),
            current_dir,
            state,
            selected: 0,
            marked: BTreeSet::new(),
            provider,
            menu: None,
            status: None,
            visibility: SectionVisibility::default(),
        })
    }

    /// Handle a key event and return true if the app should quit.
    pub fn on_key(&mut self, key: KeyEvent) -> bool {
        self.handle(key_to_action(&key))
    }

    /// Apply an action and return true if the app should quit.
    pub fn handle(&mut self, action: NavigationAction) -> bool {
        if self.menu.is_some() {
            self.handle_menu(action);
            return false;
        }

        match action {
            NavigationAction::ToggleSection(d) => {
                self.visibility.toggle(d);
            }
            NavigationAction::Down => {
                if self.selected + 1 < self.entries.len() {
                    self.selected += 1;
                }
            }
            NavigationAction::Up => {
                if self.selected > 0 {
                    self.selected -= 1;
                }
            }
            NavigationAction::Enter => {
                if let Some(entry) = self.entries.get(self.selected) {
                    if entry.is_dir {
                        let name = entry.name.clone();
                        self.change_dir(self.current_dir.join(name));
                    } else {
                        self.open_menu();
                    }
                }
            }
            NavigationAction::Back => {
                if let Some(parent) = self.current_dir.parent().map(PathBuf::from) {
                    self.change_dir(parent);
                }
            }
            NavigationAction::ToggleMark => {
                if let Some(entry) = self.entries.get(self.selected) {
                    if !entry.is_dir && !self.marked.remove(&entry.name) {
                        self.marked.insert(entry.name.clone());
                    }
                    if self.selected + 1 < self.entries.len() {
                        self.selected += 1;
                    }
                }
            }
            NavigationAction::OpenMenu => self.open_menu(),
            NavigationAction::Close => {
                self.marked.clear();
                self.status = None;
            }
            NavigationAction::Quit => {
                return true; // Signal to quit
            }
            NavigationAction::Key(_) | NavigationAction::None => {}
        }

        self.state.select(Some(self.selected));
        false
    }

    fn handle_menu(&mut self, action: NavigationAction) {
        let Some(menu) = self.menu.as_mut() else {
            return;
        };
        match action {
            NavigationAction::Down => {
                if menu.selected + 1 < menu.items.len() {
                    menu.selected += 1;
                }
            }
            NavigationAction::Up => {
                menu.selected = menu.selected.saturating_sub(1);
            }
            NavigationAction::Enter => {
                let index = menu.selected;
                self.activate(index);
            }
            NavigationAction::Key(c) => {
                let c = c.to_ascii_lowercase();
                let found = menu.items.iter().position(|it| it.mnemonic() == Some(c));
                if let Some(index) = found {
                    self.activate(index);
                }
            }
            NavigationAction::Close | NavigationAction::Back | NavigationAction::Quit => {
                self.menu = None;
            }
            _ => {}
        }
    }

    fn change_dir(&mut self, dir: PathBuf) {
        self.current_dir = dir;
        self.entries = load_entries(&self.current_dir);
        self.selected = 0;
        self.marked.clear();
        self.state.select(Some(0));
    }

    /// Files the context menu acts on: the marked files, or the highlighted
    /// file when nothing is marked.
    pub fn selection(&self) -> Vec<DetectedFile> {
        let as_file = |entry: &Entry| {
            let file_type = entry.file_type.clone().unwrap_or_else(|| {
                FileType::from_mime("application/octet-stream", FileCategory::Binary)
            });
            DetectedFile::with_type(self.current_dir.join(&entry.name), file_type)
        };

        if self.marked.is_empty() {
            self.entries
                .get(self.selected)
                .filter(|e| !e.is_dir)
                .map(as_file)
                .into_iter()
                .collect()
        } else {
            self.entries
                .iter()
                .filter(|e| self.marked.contains(&e.name))
                .map(as_file)
                .collect()
        }
    }

    /// Ask the provider for items on the current selection.
    pub fn open_menu(&mut self) {
        let selection = self.selection();
        let items = self.provider.file_items(&selection);
        if items.is_empty() {
            let reason = match selection.len() {
                0 => "Nothing selected".to_string(),
                1 => "No actions for this file type".to_string(),
                n => format!("No actions for {n} files"),
            };
            self.status = Some(Status::info(reason));
            return;
        }
        self.menu = Some(MenuPopup { items, selected: 0 });
    }

    fn activate(&mut self, index: usize) {
        let Some(menu) = self.menu.take() else {
            return;
        };
        let Some(item) = menu.items.get(index) else {
            return;
        };
        self.status = Some(match self.provider.activate(item) {
            Ok(activation) => {
                let mut text = format!("Opened {}", activation.virtual_path.display());
                if activation.mounted {
                    text.push_str(" (mounted AVFS)");
                }
                Status::info(text)
            }
            Err(e) => {
                tracing::error!(file = %item.file.path().display(), error = %e, "activation failed");
                Status::error(e.to_string())
            }
        });
    }

    /// Details for the highlighted entry, if it is a file.
    pub fn details(&self) -> Option<Details> {
        let entry = self.entries.get(self.selected).filter(|e| !e.is_dir)?;
        let file_type = entry.file_type.clone()?;
        let file = DetectedFile::with_type(self.current_dir.join(&entry.name), file_type.clone());
        let handlers = self.provider.handlers();
        Some(Details {
            name: entry.name.clone(),
            suffix: handlers.lookup_handler(&file).to_string(),
            supported: handlers.is_supported_archive(&file),
            virtual_path: self.provider.virtual_path_for(&file),
            file_type,
        })
    }

    /// Draw the application UI.
    pub fn draw(&mut self, f: &mut Frame<'_>) {
        let layout = compute_layout(f.area(), &self.visibility);

        for (section, area) in layout.columns.iter().copied() {
            match section {
                Section::Files => {
                    let title = format!("1: {}", tail_path(&self.current_dir, 3));
                    render_file_list(f, area, &title, &self.entries, &self.marked, &mut self.state);
                }
                Section::Details => {
                    render_details(f, area, self.details().as_ref(), self.provider.mount_root());
                }
            }
        }

        render_status_bar(f, layout.status_area, self.status.as_ref(), self.menu.is_some());

        if let Some(menu) = &self.menu {
            render_menu_popup(f, layout.main_area, menu);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::avfs::{CommandSpec, HandlerTable};
    use std::{
        cell::RefCell,
        ffi::OsString,
        fs, io,
        os::unix::process::ExitStatusExt,
        path::Path,
        process::{ExitStatus, Output},
    };

    #[derive(Default)]
    struct Recorder {
        spawned: RefCell<Vec<Vec<OsString>>>,
        fail: bool,
    }

    impl Launcher for Recorder {
        fn run(&self, _cmd: &CommandSpec, _extra: &[OsString]) -> io::Result<Output> {
            Ok(Output {
                status: ExitStatus::from_raw(0),
                stdout: Vec::new(),
                stderr: Vec::new(),
            })
        }

        fn spawn_detached(&self, _cmd: &CommandSpec, extra: &[OsString]) -> io::Result<()> {
            if self.fail {
                return Err(io::Error::new(io::ErrorKind::NotFound, "nautilus missing"));
            }
            self.spawned.borrow_mut().push(extra.to_vec());
            Ok(())
        }
    }

    struct AlwaysMounted;

    impl MountProbe for AlwaysMounted {
        fn is_mounted(&self, _root: &Path) -> bool {
            true
        }
    }

    fn app_in<'a>(dir: &Path, launcher: &'a Recorder) -> App<&'a Recorder, AlwaysMounted> {
        let provider = AvfsMenuProvider::new(
            HandlerTable::builtin(),
            PathBuf::from("/home/u/.avfs"),
            CommandSpec::program("mountavfs"),
            CommandSpec::program("nautilus"),
            launcher,
            AlwaysMounted,
        );
        App::with_provider(dir.to_path_buf(), provider).unwrap()
    }

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("a.zip"), b"PK\x03\x04").unwrap();
        fs::write(dir.path().join("b.rar"), b"Rar!\x1a\x07\x00").unwrap();
        fs::write(dir.path().join("c.txt"), b"text").unwrap();
        dir
    }

    #[test]
    fn enter_on_archive_opens_menu_and_enter_activates() {
        let dir = fixture();
        let rec = Recorder::default();
        let mut app = app_in(dir.path(), &rec);

        // sub, a.zip, b.rar, c.txt
        app.handle(NavigationAction::Down);
        app.handle(NavigationAction::Enter);
        let menu = app.menu.as_ref().expect("menu open");
        assert_eq!(menu.items.len(), 1);

        app.handle(NavigationAction::Enter);
        assert!(app.menu.is_none());
        let spawned = rec.spawned.borrow();
        assert_eq!(spawned.len(), 1);
        let archive = fs::canonicalize(dir.path()).unwrap().join("a.zip");
        let expected = format!("/home/u/.avfs{}#uzip", archive.display());
        assert_eq!(spawned[0], vec![OsString::from(expected)]);
        assert_eq!(app.status.as_ref().map(|s| s.kind), Some(StatusKind::Info));
    }

    #[test]
    fn start_dir_is_canonicalized() {
        let dir = fixture();
        let rec = Recorder::default();
        let app = app_in(&dir.path().join("sub/.."), &rec);
        assert_eq!(app.current_dir, fs::canonicalize(dir.path()).unwrap());
        assert_eq!(app.entries.len(), 4);
    }

    #[test]
    fn mnemonic_activates_menu_item() {
        let dir = fixture();
        let rec = Recorder::default();
        let mut app = app_in(dir.path(), &rec);
        app.selected = 2; // b.rar
        app.handle(NavigationAction::OpenMenu);
        app.handle(NavigationAction::Key('O'));
        assert_eq!(rec.spawned.borrow().len(), 1);
    }

    #[test]
    fn unsupported_file_gets_no_menu() {
        let dir = fixture();
        let rec = Recorder::default();
        let mut app = app_in(dir.path(), &rec);
        app.selected = 3; // c.txt
        app.handle(NavigationAction::OpenMenu);
        assert!(app.menu.is_none());
        assert_eq!(app.status.as_ref().map(|s| s.kind), Some(StatusKind::Info));
    }

    #[test]
    fn multiple_marked_files_get_no_menu() {
        let dir = fixture();
        let rec = Recorder::default();
        let mut app = app_in(dir.path(), &rec);
        app.selected = 1;
        app.handle(NavigationAction::ToggleMark); // a.zip, moves to b.rar
        app.handle(NavigationAction::ToggleMark); // b.rar
        assert_eq!(app.selection().len(), 2);
        app.handle(NavigationAction::OpenMenu);
        assert!(app.menu.is_none());

        // a single mark is a single selection
        app.handle(NavigationAction::Close);
        app.selected = 2;
        app.handle(NavigationAction::ToggleMark);
        assert_eq!(app.selection().len(), 1);
        app.handle(NavigationAction::OpenMenu);
        assert!(app.menu.is_some());
    }

    #[test]
    fn escape_closes_menu_without_launching() {
        let dir = fixture();
        let rec = Recorder::default();
        let mut app = app_in(dir.path(), &rec);
        app.selected = 1;
        app.handle(NavigationAction::OpenMenu);
        assert!(!app.handle(NavigationAction::Quit));
        assert!(app.menu.is_none());
        assert!(rec.spawned.borrow().is_empty());
    }

    #[test]
    fn launch_failure_lands_in_status_bar() {
        let dir = fixture();
        let rec = Recorder {
            fail: true,
            ..Recorder::default()
        };
        let mut app = app_in(dir.path(), &rec);
        app.selected = 1;
        app.handle(NavigationAction::OpenMenu);
        app.handle(NavigationAction::Enter);
        let status = app.status.clone().unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert!(status.text.contains("nautilus"));
    }

    #[test]
    fn navigates_into_and_out_of_directories() {
        let dir = fixture();
        let rec = Recorder::default();
        let mut app = app_in(dir.path(), &rec);
        app.handle(NavigationAction::Enter); // sub
        assert!(app.current_dir.ends_with("sub"));
        assert!(app.entries.is_empty());
        app.handle(NavigationAction::Back);
        assert_eq!(app.entries.len(), 4);
        assert!(app.handle(NavigationAction::Quit));
    }

    #[test]
    fn details_show_suffix_and_virtual_path() {
        let dir = fixture();
        let rec = Recorder::default();
        let mut app = app_in(dir.path(), &rec);
        app.selected = 2;
        let details = app.details().unwrap();
        assert_eq!(details.suffix, "#urar");
        assert!(details.supported);
        assert!(details.virtual_path.to_string_lossy().ends_with("b.rar#urar"));

        app.selected = 0;
        assert!(app.details().is_none());
    }
}
