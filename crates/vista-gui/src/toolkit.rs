//! The widget-toolkit contract overlay components are written against

use crate::element::{BoxLayout, LayoutParams, ListItem, WidgetId};
use crate::event::{EventKind, UiEvent};
use vista_core::{Color, Size, Vec2};

/// Operations an overlay component needs from a retained 2D widget system.
///
/// Operations on an unknown widget id are ignored; getters return defaults.
pub trait PanelToolkit {
    /// Create a detached container panel
    fn create_panel(&mut self, size: Size) -> WidgetId;

    /// Create a one-line text label sized to its text
    fn create_label(&mut self, text: &str) -> WidgetId;

    /// Create a scrollable single-selection list
    fn create_list(&mut self, size: Size) -> WidgetId;

    /// Create a push button sized to its caption
    fn create_button(&mut self, text: &str) -> WidgetId;

    /// Attach `child` as the last child of `parent`
    fn add_child(&mut self, parent: WidgetId, child: WidgetId);

    fn set_layout(&mut self, panel: WidgetId, layout: BoxLayout);

    fn set_layout_params(&mut self, widget: WidgetId, params: LayoutParams);

    /// Border width, inner padding and background color of a panel
    fn set_frame(&mut self, panel: WidgetId, border: f32, padding: f32, color: Color);

    fn set_text(&mut self, widget: WidgetId, text: &str);

    /// Replace every row of a list; clears the highlighted row
    fn set_items(&mut self, list: WidgetId, items: Vec<ListItem>);

    fn set_visible(&mut self, widget: WidgetId, visible: bool);

    fn is_visible(&self, widget: WidgetId) -> bool;

    /// Position relative to the parent surface
    fn position(&self, widget: WidgetId) -> Vec2;

    fn set_position(&mut self, widget: WidgetId, position: Vec2);

    /// Current (laid out) size
    fn size(&self, widget: WidgetId) -> Size;

    /// Preferred size; box layouts may still stretch it
    fn set_size(&mut self, widget: WidgetId, size: Size);

    /// Size of the surface the widget is placed on
    fn parent_size(&self, widget: WidgetId) -> Size;

    /// Ask the toolkit to deliver events of `kind` raised by `widget`
    fn subscribe(&mut self, widget: WidgetId, kind: EventKind);

    /// A visible modal panel receives all input until it is hidden
    fn set_modal(&mut self, panel: WidgetId, modal: bool);

    /// Bring a top-level panel in front of its siblings
    fn raise(&mut self, panel: WidgetId);

    /// Queue a component-level event for the host
    fn emit(&mut self, event: UiEvent);
}
