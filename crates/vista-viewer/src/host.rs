//! Viewer host: owns the overlay and reacts to its outcomes

use crate::loader::{LoadedModel, ModelLoader};
use log::{debug, info, warn};
use std::path::Path;
use vista_core::{Result, Size, VistaError};
use vista_gui::{Dispatcher, EventKind, PanelTree, UiEvent};
use vista_overlay::{AlertDialog, DirectoryBrowser, FileSystem, OverlayConfig};

/// Actions offered by the viewer's menu bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    OpenModel,
    RemoveModels,
    Quit,
}

/// Everything event handlers may touch
pub struct ViewerState<F: FileSystem, L: ModelLoader> {
    pub ui: PanelTree,
    pub browser: DirectoryBrowser<F>,
    pub dialog: AlertDialog,
    loader: L,
    models: Vec<LoadedModel>,
    quit_requested: bool,
}

impl<F: FileSystem, L: ModelLoader> ViewerState<F, L> {
    pub fn models(&self) -> &[LoadedModel] {
        &self.models
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Show an error in the alert dialog
    pub fn alert(&mut self, err: &VistaError) {
        self.dialog.show(&mut self.ui, err.to_string());
    }

    /// Load a model through the loader and add it to the scene
    pub fn open_model(&mut self, path: &Path) -> Result<()> {
        let model = self.loader.load(path)?;
        info!("Loaded {} model {}", model.format.name(), model.path.display());
        self.models.push(model);
        Ok(())
    }

    /// Let both components react to a raw toolkit event
    fn route(&mut self, event: &UiEvent) {
        if let Err(e) = self.browser.handle_event(&mut self.ui, event) {
            warn!("Navigation failed: {}", e);
            self.alert(&e);
        }
        self.dialog.handle_event(&mut self.ui, event);
    }

    fn on_confirmed(&mut self, event: &UiEvent) {
        if event.source() != Some(self.browser.panel()) {
            return;
        }

        let path = match self.browser.require_selection() {
            Ok(path) => path,
            Err(e) => {
                self.alert(&e);
                return;
            }
        };

        match self.open_model(&path) {
            Ok(()) => self.browser.hide(&mut self.ui),
            Err(e) => {
                warn!("Failed to load {}: {}", path.display(), e);
                self.alert(&e);
            }
        }
    }

    fn on_cancelled(&mut self, event: &UiEvent) {
        if event.source() == Some(self.browser.panel()) {
            self.browser.hide(&mut self.ui);
        }
    }

    fn on_dismissed(&mut self, event: &UiEvent) {
        if event.source() == Some(self.dialog.panel()) {
            debug!("Alert dismissed");
        }
    }
}

/// A viewer's overlay session.
///
/// Input goes into [`ui_mut`](Self::ui_mut) (or comes from the painter);
/// [`process_events`](Self::process_events) then routes the queued events
/// to the components and runs the host handlers until the queue is empty.
pub struct ViewerHost<F: FileSystem + 'static, L: ModelLoader + 'static> {
    state: ViewerState<F, L>,
    dispatcher: Dispatcher<ViewerState<F, L>>,
}

impl<F: FileSystem + 'static, L: ModelLoader + 'static> ViewerHost<F, L> {
    /// Build the overlay on a surface of the given size. Both panels start hidden.
    pub fn new(surface: Size, fs: F, loader: L, config: &OverlayConfig) -> Result<Self> {
        let mut ui = PanelTree::new(surface);
        let browser = DirectoryBrowser::new(&mut ui, fs, config)?;
        let dialog = AlertDialog::new(&mut ui, config);

        let mut dispatcher: Dispatcher<ViewerState<F, L>> = Dispatcher::new();
        dispatcher.subscribe(EventKind::Confirmed, ViewerState::on_confirmed);
        dispatcher.subscribe(EventKind::Cancelled, ViewerState::on_cancelled);
        dispatcher.subscribe(EventKind::Dismissed, ViewerState::on_dismissed);

        info!(
            "Overlay ready, browsing {}",
            browser.current_path().display()
        );

        Ok(Self {
            state: ViewerState {
                ui,
                browser,
                dialog,
                loader,
                models: Vec::new(),
                quit_requested: false,
            },
            dispatcher,
        })
    }

    pub fn menu(&mut self, action: MenuAction) {
        debug!("Menu action {:?}", action);
        let state = &mut self.state;
        match action {
            MenuAction::OpenModel => state.browser.show(&mut state.ui),
            MenuAction::RemoveModels => {
                info!("Removing {} model(s)", state.models.len());
                state.models.clear();
            }
            MenuAction::Quit => state.quit_requested = true,
        }
    }

    /// Load a model without going through the browser, e.g. from the command line
    pub fn open_model(&mut self, path: &Path) -> Result<()> {
        self.state.open_model(path)
    }

    /// Re-read the browsed directory, alerting when it became unreadable
    pub fn refresh_listing(&mut self) {
        let state = &mut self.state;
        if let Err(e) = state.browser.refresh(&mut state.ui) {
            warn!("Refresh failed: {}", e);
            state.alert(&e);
        }
    }

    /// The hosting surface changed size
    pub fn resize(&mut self, surface: Size) {
        self.state.ui.resize(surface);
        self.process_events();
    }

    /// Drain and handle events until none are left. Returns how many were handled.
    pub fn process_events(&mut self) -> usize {
        let mut handled = 0;
        loop {
            let events = self.state.ui.drain_events();
            if events.is_empty() {
                break;
            }
            for event in &events {
                self.state.route(event);
                self.dispatcher.dispatch(&mut self.state, event);
            }
            handled += events.len();
        }
        handled
    }

    pub fn state(&self) -> &ViewerState<F, L> {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ViewerState<F, L> {
        &mut self.state
    }

    pub fn ui(&self) -> &PanelTree {
        &self.state.ui
    }

    pub fn ui_mut(&mut self) -> &mut PanelTree {
        &mut self.state.ui
    }

    pub fn browser(&self) -> &DirectoryBrowser<F> {
        &self.state.browser
    }

    pub fn dialog(&self) -> &AlertDialog {
        &self.state.dialog
    }

    pub fn models(&self) -> &[LoadedModel] {
        self.state.models()
    }

    pub fn quit_requested(&self) -> bool {
        self.state.quit_requested()
    }
}
