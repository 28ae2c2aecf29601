//! Directory browser panel: navigate directories, pick one file

use crate::config::OverlayConfig;
use crate::fs::{FileSystem, StdFileSystem};
use crate::path;
use serde::Serialize;
use std::path::{Path, PathBuf};
use vista_core::{Result, Size, VistaError};
use vista_gui::{Align, BoxLayout, EventKind, Icon, LayoutParams, ListItem, PanelToolkit, UiEvent, WidgetId};

/// Display name of the synthetic "go to parent" row
pub const PARENT_ENTRY: &str = "..";

/// What a listing row stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Parent,
    Directory,
    File,
}

/// One row of the listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub name: String,
    pub kind: EntryKind,
}

impl Entry {
    fn parent() -> Self {
        Self {
            name: PARENT_ENTRY.to_string(),
            kind: EntryKind::Parent,
        }
    }

    /// Parent and directory rows navigate; file rows select
    pub fn is_dir(&self) -> bool {
        matches!(self.kind, EntryKind::Parent | EntryKind::Directory)
    }

    pub fn icon(&self) -> Icon {
        if self.is_dir() {
            Icon::Folder
        } else {
            Icon::File
        }
    }
}

/// Widget handles owned by one browser
#[derive(Debug, Clone, Copy)]
struct BrowserWidgets {
    panel: WidgetId,
    path_label: WidgetId,
    list: WidgetId,
    ok: WidgetId,
    cancel: WidgetId,
}

/// A file picker panel.
///
/// The browser owns its navigation state; the widgets mirroring that state
/// live in whatever [`PanelToolkit`] the host passes to each call. Pressing
/// OK or Cancel queues [`UiEvent::Confirmed`] / [`UiEvent::Cancelled`] with
/// the browser's panel as source. The browser never hides itself.
pub struct DirectoryBrowser<F: FileSystem = StdFileSystem> {
    fs: F,
    current_path: PathBuf,
    entries: Vec<Entry>,
    selected: Option<usize>,
    show_hidden: bool,
    preferred: Size,
    widgets: BrowserWidgets,
}

impl<F: FileSystem> DirectoryBrowser<F> {
    /// Build the browser panel (initially hidden) and list the start directory.
    ///
    /// The start directory is `browser.start_dir` from the config, or the
    /// filesystem's working directory. Fails without creating any widget when
    /// that directory cannot be listed.
    pub fn new<T: PanelToolkit>(ui: &mut T, fs: F, config: &OverlayConfig) -> Result<Self> {
        let cwd = fs.current_dir()?;
        let start = match &config.browser.start_dir {
            Some(dir) => path::absolute(&cwd, dir),
            None => path::normalize(&cwd),
        };
        let show_hidden = config.browser.show_hidden;
        let entries = read_entries(&fs, &start, show_hidden)?;

        let widgets = build_widgets(ui, config);
        let mut browser = Self {
            fs,
            current_path: PathBuf::new(),
            entries: Vec::new(),
            selected: None,
            show_hidden,
            preferred: config.browser.size(),
            widgets,
        };
        browser.commit(ui, start, entries);
        Ok(browser)
    }

    /// Show the directory at `path`.
    ///
    /// Relative paths resolve against the current directory. On failure
    /// nothing changes: path, entries, selection and widgets keep their
    /// previous content.
    pub fn set_path<T: PanelToolkit>(&mut self, ui: &mut T, path: impl AsRef<Path>) -> Result<()> {
        let target = path::absolute(&self.current_path, path.as_ref());
        let entries = read_entries(&self.fs, &target, self.show_hidden)?;
        self.commit(ui, target, entries);
        Ok(())
    }

    /// Re-read the current directory, keeping the selected file if it still exists
    pub fn refresh<T: PanelToolkit>(&mut self, ui: &mut T) -> Result<()> {
        let selected = self
            .selected
            .and_then(|i| self.entries.get(i))
            .map(|e| e.name.clone());
        let current = self.current_path.clone();
        self.set_path(ui, current)?;

        self.selected = selected.and_then(|name| {
            self.entries
                .iter()
                .position(|e| e.kind == EntryKind::File && e.name == name)
        });
        Ok(())
    }

    /// React to the user activating row `index`.
    ///
    /// The parent row ascends (a no-op at the root), a directory row
    /// descends, a file row becomes the selection. Out-of-range indices are
    /// ignored.
    pub fn on_entry_activated<T: PanelToolkit>(&mut self, ui: &mut T, index: usize) -> Result<()> {
        let Some(entry) = self.entries.get(index) else {
            return Ok(());
        };

        match entry.kind {
            EntryKind::Parent => match path::parent_of(&self.current_path) {
                Some(parent) => self.set_path(ui, parent),
                None => Ok(()),
            },
            EntryKind::Directory => {
                let target = path::join(&self.current_path, &entry.name)?;
                self.set_path(ui, target)
            }
            EntryKind::File => {
                self.selected = Some(index);
                Ok(())
            }
        }
    }

    /// Full path of the selected file, if a file row has been activated
    pub fn selected_path(&self) -> Option<PathBuf> {
        let entry = self.entries.get(self.selected?)?;
        if entry.kind != EntryKind::File {
            return None;
        }
        path::join(&self.current_path, &entry.name).ok()
    }

    /// Like [`selected_path`](Self::selected_path) but as an error for hosts
    pub fn require_selection(&self) -> Result<PathBuf> {
        self.selected_path().ok_or(VistaError::NothingSelected)
    }

    /// Make the panel visible, sized to fit and centered in its parent
    pub fn show<T: PanelToolkit>(&mut self, ui: &mut T) {
        ui.set_visible(self.widgets.panel, true);
        self.recenter(ui);
        ui.raise(self.widgets.panel);
    }

    pub fn hide<T: PanelToolkit>(&mut self, ui: &mut T) {
        ui.set_visible(self.widgets.panel, false);
    }

    pub fn is_visible<T: PanelToolkit>(&self, ui: &T) -> bool {
        ui.is_visible(self.widgets.panel)
    }

    /// Shrink the configured size to the parent surface and center on it
    pub fn recenter<T: PanelToolkit>(&self, ui: &mut T) {
        let parent = ui.parent_size(self.widgets.panel);
        let size = self.preferred.fit_within(parent);
        ui.set_size(self.widgets.panel, size);
        ui.set_position(self.widgets.panel, size.centered_in(parent));
    }

    /// Route a toolkit event to the browser. Returns true when it belonged
    /// to one of the browser's widgets.
    ///
    /// A failed navigation is returned after the event is consumed; the
    /// browser stays on its previous directory.
    pub fn handle_event<T: PanelToolkit>(&mut self, ui: &mut T, event: &UiEvent) -> Result<bool> {
        let w = self.widgets;
        match *event {
            UiEvent::Activated { source, index } if source == w.list => {
                self.on_entry_activated(ui, index)?;
                Ok(true)
            }
            UiEvent::Clicked { source } if source == w.ok => {
                ui.emit(UiEvent::Confirmed { source: w.panel });
                Ok(true)
            }
            UiEvent::Clicked { source } if source == w.cancel => {
                ui.emit(UiEvent::Cancelled { source: w.panel });
                Ok(true)
            }
            UiEvent::Resized { .. } => {
                self.recenter(ui);
                Ok(false)
            }
            _ => Ok(false),
        }
    }

    pub fn current_path(&self) -> &Path {
        &self.current_path
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Top-level panel; source of Confirmed/Cancelled events
    pub fn panel(&self) -> WidgetId {
        self.widgets.panel
    }

    pub fn list(&self) -> WidgetId {
        self.widgets.list
    }

    pub fn path_label(&self) -> WidgetId {
        self.widgets.path_label
    }

    pub fn ok_button(&self) -> WidgetId {
        self.widgets.ok
    }

    pub fn cancel_button(&self) -> WidgetId {
        self.widgets.cancel
    }

    pub fn file_system(&self) -> &F {
        &self.fs
    }

    pub fn file_system_mut(&mut self) -> &mut F {
        &mut self.fs
    }

    fn commit<T: PanelToolkit>(&mut self, ui: &mut T, path: PathBuf, entries: Vec<Entry>) {
        let items = entries
            .iter()
            .map(|e| ListItem::new(e.name.clone(), e.icon()))
            .collect();
        ui.set_text(self.widgets.path_label, &path.display().to_string());
        ui.set_items(self.widgets.list, items);

        self.current_path = path;
        self.entries = entries;
        self.selected = None;
    }
}

/// Read, filter and sort one directory into listing rows
fn read_entries<F: FileSystem>(fs: &F, dir: &Path, show_hidden: bool) -> Result<Vec<Entry>> {
    let mut children = fs
        .read_dir(dir)
        .map_err(|e| VistaError::unreadable(dir, e))?;

    children.retain(|c| {
        !c.name.is_empty()
            && c.name != "."
            && c.name != PARENT_ENTRY
            && (show_hidden || !c.name.starts_with('.'))
    });
    children.sort_by(|a, b| a.name.cmp(&b.name));

    let mut entries = Vec::with_capacity(children.len() + 1);
    if !path::is_root(dir) {
        entries.push(Entry::parent());
    }
    entries.extend(children.into_iter().map(|c| Entry {
        name: c.name,
        kind: if c.is_dir {
            EntryKind::Directory
        } else {
            EntryKind::File
        },
    }));

    Ok(entries)
}

fn build_widgets<T: PanelToolkit>(ui: &mut T, config: &OverlayConfig) -> BrowserWidgets {
    let style = &config.style;

    let panel = ui.create_panel(config.browser.size());
    ui.set_frame(panel, style.border, style.padding, style.background_color());
    ui.set_layout(panel, BoxLayout::vertical(style.spacing));
    ui.set_visible(panel, false);

    let path_label = ui.create_label("");
    ui.add_child(panel, path_label);

    let list = ui.create_list(Size::ZERO);
    ui.set_layout_params(list, LayoutParams::new(5.0, Align::Fill));
    ui.subscribe(list, EventKind::Activated);
    ui.add_child(panel, list);

    // Button row
    let row = ui.create_panel(Size::ZERO);
    ui.set_layout(row, BoxLayout::horizontal(style.spacing));
    ui.set_layout_params(row, LayoutParams::new(1.0, Align::Fill));
    ui.add_child(panel, row);

    let ok = ui.create_button("OK");
    ui.set_layout_params(ok, LayoutParams::new(0.0, Align::Center));
    ui.subscribe(ok, EventKind::Clicked);
    ui.add_child(row, ok);

    let cancel = ui.create_button("Cancel");
    ui.set_layout_params(cancel, LayoutParams::new(0.0, Align::Center));
    ui.subscribe(cancel, EventKind::Clicked);
    ui.add_child(row, cancel);

    BrowserWidgets {
        panel,
        path_label,
        list,
        ok,
        cancel,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MemoryFileSystem;
    use std::fs;
    use vista_core::Vec2;
    use vista_gui::PanelTree;

    fn names(browser: &DirectoryBrowser<impl FileSystem>) -> Vec<&str> {
        browser.entries().iter().map(|e| e.name.as_str()).collect()
    }

    fn home_fs() -> MemoryFileSystem {
        MemoryFileSystem::new()
            .with_dir("/home/u/docs/specs")
            .with_file("/home/u/docs/readme.md")
            .with_file("/home/u/notes.txt")
            .with_cwd("/home/u")
    }

    fn setup(fs: MemoryFileSystem) -> (PanelTree, DirectoryBrowser<MemoryFileSystem>) {
        let mut tree = PanelTree::new(Size::new(1000.0, 700.0));
        let browser = DirectoryBrowser::new(&mut tree, fs, &OverlayConfig::default()).unwrap();
        (tree, browser)
    }

    #[test]
    fn test_home_scenario() {
        let (mut tree, mut browser) = setup(home_fs());
        browser.set_path(&mut tree, "/home/u").unwrap();
        assert_eq!(names(&browser), vec!["..", "docs", "notes.txt"]);
        assert_eq!(browser.entries()[0].kind, EntryKind::Parent);
        assert_eq!(browser.entries()[1].kind, EntryKind::Directory);
        assert_eq!(browser.entries()[2].kind, EntryKind::File);

        browser.on_entry_activated(&mut tree, 1).unwrap();
        assert_eq!(browser.current_path(), Path::new("/home/u/docs"));
        assert_eq!(names(&browser), vec!["..", "readme.md", "specs"]);

        browser.on_entry_activated(&mut tree, 0).unwrap();
        assert_eq!(browser.current_path(), Path::new("/home/u"));
    }

    #[test]
    fn test_starts_in_working_directory() {
        let (tree, browser) = setup(home_fs());
        assert_eq!(browser.current_path(), Path::new("/home/u"));
        assert!(!browser.is_visible(&tree));
        let label = tree.widget(browser.path_label()).unwrap();
        assert_eq!(label.text, "/home/u");
    }

    #[test]
    fn test_start_dir_from_config() {
        let mut tree = PanelTree::new(Size::new(1000.0, 700.0));
        let mut config = OverlayConfig::default();
        config.browser.start_dir = Some(PathBuf::from("docs"));
        let browser = DirectoryBrowser::new(&mut tree, home_fs(), &config).unwrap();
        assert_eq!(browser.current_path(), Path::new("/home/u/docs"));
    }

    #[test]
    fn test_unreadable_start_creates_no_widgets() {
        let mut tree = PanelTree::new(Size::new(1000.0, 700.0));
        let fs = MemoryFileSystem::new().with_dir("/x").with_unreadable("/x").with_cwd("/x");
        let err = DirectoryBrowser::new(&mut tree, fs, &OverlayConfig::default())
            .err()
            .unwrap();
        assert!(err.is_io());
        assert!(tree.is_empty());
    }

    #[test]
    fn test_root_has_no_parent_entry() {
        let (mut tree, mut browser) = setup(home_fs());
        browser.set_path(&mut tree, "/").unwrap();
        assert_eq!(names(&browser), vec!["home"]);

        browser.set_path(&mut tree, "/home").unwrap();
        browser.on_entry_activated(&mut tree, 0).unwrap();
        assert_eq!(browser.current_path(), Path::new("/"));
        assert!(browser.entries().iter().all(|e| e.kind != EntryKind::Parent));
    }

    #[test]
    fn test_empty_directory_lists_only_parent() {
        let fs = home_fs().with_dir("/home/u/empty");
        let (mut tree, mut browser) = setup(fs);
        browser.set_path(&mut tree, "/home/u/empty").unwrap();
        assert_eq!(names(&browser), vec![".."]);
    }

    #[test]
    fn test_sort_is_case_sensitive_byte_order() {
        let fs = MemoryFileSystem::new()
            .with_file("/d/b.txt")
            .with_file("/d/B.txt")
            .with_dir("/d/a")
            .with_file("/d/_x")
            .with_cwd("/d");
        let (_, browser) = setup(fs);
        assert_eq!(names(&browser), vec!["..", "B.txt", "_x", "a", "b.txt"]);
    }

    #[test]
    fn test_failed_set_path_keeps_state() {
        let fs = home_fs().with_dir("/locked").with_unreadable("/locked");
        let (mut tree, mut browser) = setup(fs);
        browser.on_entry_activated(&mut tree, 2).unwrap();
        let before_entries = browser.entries().to_vec();
        let before_items = tree.widget(browser.list()).unwrap().items.clone();

        let err = browser.set_path(&mut tree, "/missing").unwrap_err();
        assert!(matches!(err, VistaError::DirectoryUnreadable { .. }));
        let err = browser.set_path(&mut tree, "/locked").unwrap_err();
        assert!(err.is_io());
        let err = browser.set_path(&mut tree, "/home/u/notes.txt").unwrap_err();
        assert!(err.is_io());

        assert_eq!(browser.current_path(), Path::new("/home/u"));
        assert_eq!(browser.entries(), before_entries.as_slice());
        assert_eq!(browser.selected_index(), Some(2));
        assert_eq!(tree.widget(browser.list()).unwrap().items, before_items);
        assert_eq!(tree.widget(browser.path_label()).unwrap().text, "/home/u");
    }

    #[test]
    fn test_vanished_directory_activation_errors() {
        let (mut tree, mut browser) = setup(home_fs());
        browser.file_system_mut().remove("/home/u/docs");
        let err = browser.on_entry_activated(&mut tree, 1).unwrap_err();
        assert!(err.is_io());
        assert_eq!(browser.current_path(), Path::new("/home/u"));
        assert_eq!(names(&browser), vec!["..", "docs", "notes.txt"]);
    }

    #[test]
    fn test_selection() {
        let (mut tree, mut browser) = setup(home_fs());
        assert_eq!(browser.selected_path(), None);
        assert!(matches!(
            browser.require_selection(),
            Err(VistaError::NothingSelected)
        ));

        browser.on_entry_activated(&mut tree, 2).unwrap();
        assert_eq!(browser.selected_index(), Some(2));
        assert_eq!(
            browser.selected_path(),
            Some(PathBuf::from("/home/u/notes.txt"))
        );

        // Navigating clears the selection
        browser.on_entry_activated(&mut tree, 1).unwrap();
        assert_eq!(browser.selected_path(), None);

        // Out of range is ignored
        browser.on_entry_activated(&mut tree, 99).unwrap();
        assert_eq!(browser.current_path(), Path::new("/home/u/docs"));
    }

    #[test]
    fn test_refresh_keeps_surviving_selection() {
        let (mut tree, mut browser) = setup(home_fs());
        browser.on_entry_activated(&mut tree, 2).unwrap();

        browser.file_system_mut().remove("/home/u/docs");
        browser.refresh(&mut tree).unwrap();
        assert_eq!(names(&browser), vec!["..", "notes.txt"]);
        assert_eq!(
            browser.selected_path(),
            Some(PathBuf::from("/home/u/notes.txt"))
        );

        browser.file_system_mut().remove("/home/u/notes.txt");
        browser.refresh(&mut tree).unwrap();
        assert_eq!(browser.selected_path(), None);
    }

    #[test]
    fn test_hidden_files_filtered() {
        let fs = home_fs().with_file("/home/u/.bashrc");
        let mut tree = PanelTree::new(Size::new(1000.0, 700.0));

        let browser = DirectoryBrowser::new(&mut tree, fs.clone(), &OverlayConfig::default()).unwrap();
        assert_eq!(names(&browser), vec!["..", ".bashrc", "docs", "notes.txt"]);

        let mut config = OverlayConfig::default();
        config.browser.show_hidden = false;
        let browser = DirectoryBrowser::new(&mut tree, fs, &config).unwrap();
        assert_eq!(names(&browser), vec!["..", "docs", "notes.txt"]);
    }

    #[test]
    fn test_list_items_carry_icons() {
        let (tree, browser) = setup(home_fs());
        let items = &tree.widget(browser.list()).unwrap().items;
        let icons: Vec<Option<Icon>> = items.iter().map(|i| i.icon).collect();
        assert_eq!(
            icons,
            vec![Some(Icon::Folder), Some(Icon::Folder), Some(Icon::File)]
        );
    }

    #[test]
    fn test_show_centers_and_fits() {
        let (mut tree, mut browser) = setup(home_fs());
        browser.show(&mut tree);
        assert!(browser.is_visible(&tree));
        assert_eq!(tree.position(browser.panel()), Vec2::new(300.0, 200.0));
        assert_eq!(tree.size(browser.panel()), Size::new(400.0, 300.0));

        tree.resize(Size::new(300.0, 800.0));
        for event in tree.drain_events() {
            browser.handle_event(&mut tree, &event).unwrap();
        }
        assert_eq!(tree.size(browser.panel()), Size::new(300.0, 300.0));
        assert_eq!(tree.position(browser.panel()), Vec2::new(0.0, 250.0));

        // The configured size comes back once there is room
        tree.resize(Size::new(1000.0, 700.0));
        browser.show(&mut tree);
        assert_eq!(tree.size(browser.panel()), Size::new(400.0, 300.0));

        browser.hide(&mut tree);
        assert!(!browser.is_visible(&tree));
    }

    #[test]
    fn test_events_drive_navigation_and_buttons() {
        let (mut tree, mut browser) = setup(home_fs());
        browser.show(&mut tree);

        assert!(tree.activate(browser.list(), 2));
        assert!(tree.click(browser.ok_button()));
        assert!(tree.click(browser.cancel_button()));

        for event in tree.drain_events() {
            assert!(browser.handle_event(&mut tree, &event).unwrap());
        }
        assert_eq!(
            browser.selected_path(),
            Some(PathBuf::from("/home/u/notes.txt"))
        );
        assert_eq!(
            tree.drain_events(),
            vec![
                UiEvent::Confirmed {
                    source: browser.panel()
                },
                UiEvent::Cancelled {
                    source: browser.panel()
                },
            ]
        );
        // Confirming never hides the browser by itself
        assert!(browser.is_visible(&tree));
    }

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("vista_browser_test_{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_real_directory_listing() {
        let dir = temp_dir();
        fs::create_dir(dir.join("models")).unwrap();
        fs::write(dir.join("teapot.obj"), b"v 0 0 0").unwrap();
        fs::write(dir.join("Axes.dae"), b"<COLLADA/>").unwrap();

        let mut tree = PanelTree::new(Size::new(800.0, 600.0));
        let mut config = OverlayConfig::default();
        config.browser.start_dir = Some(dir.clone());
        let mut browser = DirectoryBrowser::new(&mut tree, StdFileSystem, &config).unwrap();

        assert_eq!(names(&browser), vec!["..", "Axes.dae", "models", "teapot.obj"]);

        browser.on_entry_activated(&mut tree, 2).unwrap();
        assert_eq!(browser.current_path(), dir.join("models").as_path());
        assert_eq!(names(&browser), vec![".."]);

        browser.on_entry_activated(&mut tree, 0).unwrap();
        browser.on_entry_activated(&mut tree, 3).unwrap();
        assert_eq!(browser.selected_path(), Some(dir.join("teapot.obj")));

        fs::remove_dir_all(&dir).ok();
    }
}
