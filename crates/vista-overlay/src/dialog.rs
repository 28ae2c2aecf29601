//! Modal alert dialog with a single OK button

use crate::config::OverlayConfig;
use vista_core::Size;
use vista_gui::{Align, BoxLayout, EventKind, LayoutParams, PanelToolkit, UiEvent, WidgetId};

/// A one-line message panel.
///
/// While visible the panel is modal and stacked above everything else, so
/// only its OK button receives input. Pressing OK hides it and queues
/// [`UiEvent::Dismissed`] with the dialog panel as source.
pub struct AlertDialog {
    panel: WidgetId,
    label: WidgetId,
    ok: WidgetId,
    message: String,
    preferred: Size,
}

impl AlertDialog {
    /// Build the dialog panel, initially hidden
    pub fn new<T: PanelToolkit>(ui: &mut T, config: &OverlayConfig) -> Self {
        let style = &config.style;
        let preferred = config.dialog.size();

        let panel = ui.create_panel(preferred);
        ui.set_frame(panel, style.border, style.padding, style.background_color());
        ui.set_layout(panel, BoxLayout::vertical(style.spacing));
        ui.set_modal(panel, true);
        ui.set_visible(panel, false);

        let label = ui.create_label("");
        ui.set_layout_params(label, LayoutParams::new(2.0, Align::Fill));
        ui.add_child(panel, label);

        let ok = ui.create_button("OK");
        ui.set_layout_params(ok, LayoutParams::new(1.0, Align::Center));
        ui.subscribe(ok, EventKind::Clicked);
        ui.add_child(panel, ok);

        Self {
            panel,
            label,
            ok,
            message: String::new(),
            preferred,
        }
    }

    /// Display `message`, replacing any message already shown
    pub fn show<T: PanelToolkit>(&mut self, ui: &mut T, message: impl Into<String>) {
        self.message = message.into();
        ui.set_text(self.label, &self.message);
        ui.set_visible(self.panel, true);
        self.recenter(ui);
        ui.raise(self.panel);
    }

    /// Hide the dialog and queue `Dismissed`. Does nothing when hidden.
    pub fn dismiss<T: PanelToolkit>(&mut self, ui: &mut T) {
        if !self.is_visible(&*ui) {
            return;
        }
        ui.set_visible(self.panel, false);
        ui.emit(UiEvent::Dismissed { source: self.panel });
    }

    /// Last message shown
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_visible<T: PanelToolkit>(&self, ui: &T) -> bool {
        ui.is_visible(self.panel)
    }

    /// Shrink the configured size to the parent surface and center on it
    pub fn recenter<T: PanelToolkit>(&self, ui: &mut T) {
        let parent = ui.parent_size(self.panel);
        let size = self.preferred.fit_within(parent);
        ui.set_size(self.panel, size);
        ui.set_position(self.panel, size.centered_in(parent));
    }

    /// Route a toolkit event to the dialog. Returns true when it was the OK
    /// button.
    pub fn handle_event<T: PanelToolkit>(&mut self, ui: &mut T, event: &UiEvent) -> bool {
        match *event {
            UiEvent::Clicked { source } if source == self.ok => {
                self.dismiss(ui);
                true
            }
            UiEvent::Resized { .. } => {
                self.recenter(ui);
                false
            }
            _ => false,
        }
    }

    /// Top-level panel; source of `Dismissed`
    pub fn panel(&self) -> WidgetId {
        self.panel
    }

    pub fn label(&self) -> WidgetId {
        self.label
    }

    pub fn ok_button(&self) -> WidgetId {
        self.ok
    }
}
