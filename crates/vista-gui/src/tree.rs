//! Retained in-memory panel tree implementing [`PanelToolkit`]

use crate::element::{BoxLayout, LayoutParams, ListItem, Widget, WidgetId, WidgetKind};
use crate::event::{EventKind, UiEvent};
use crate::layout;
use crate::toolkit::PanelToolkit;
use std::collections::HashSet;
use vista_core::{Color, Rect, Size, Vec2};

/// All overlay widgets of one surface.
///
/// Geometry is re-resolved eagerly after every structural or size change, so
/// `rect` on each widget is always current. Input is injected through
/// [`click`](Self::click), [`highlight`](Self::highlight) and
/// [`activate`](Self::activate); resulting events are queued in arrival
/// order for the host to [`drain`](Self::drain_events).
///
/// Visible modal panels always stack above every other top-level panel.
pub struct PanelTree {
    widgets: Vec<Widget>,
    /// Top-level panels, back to front
    stacking: Vec<WidgetId>,
    subscriptions: HashSet<(WidgetId, EventKind)>,
    surface: Size,
    events: Vec<UiEvent>,
    next_id: u32,
}

impl PanelTree {
    pub fn new(surface: Size) -> Self {
        Self {
            widgets: Vec::new(),
            stacking: Vec::new(),
            subscriptions: HashSet::new(),
            surface,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Size of the surface the overlay is composited on
    pub fn surface(&self) -> Size {
        self.surface
    }

    /// Find widget by ID
    pub fn widget(&self, id: WidgetId) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.id == id)
    }

    fn widget_mut(&mut self, id: WidgetId) -> Option<&mut Widget> {
        self.widgets.iter_mut().find(|w| w.id == id)
    }

    /// Absolute rectangle of a widget
    pub fn rect(&self, id: WidgetId) -> Option<Rect> {
        self.widget(id).map(|w| w.rect)
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Top-level panels from back to front
    pub fn roots(&self) -> &[WidgetId] {
        &self.stacking
    }

    /// Top-level panel that contains `id`
    pub fn root_of(&self, id: WidgetId) -> Option<WidgetId> {
        let mut current = self.widget(id)?;
        while let Some(parent) = current.parent {
            current = self.widget(parent)?;
        }
        Some(current.id)
    }

    /// True when `ancestor` is `id` itself or lies on its parent chain
    pub fn is_ancestor(&self, ancestor: WidgetId, id: WidgetId) -> bool {
        let mut current = Some(id);
        while let Some(cur) = current {
            if cur == ancestor {
                return true;
            }
            current = self.widget(cur).and_then(|w| w.parent);
        }
        false
    }

    /// True when the widget and every ancestor are visible
    pub fn is_shown(&self, id: WidgetId) -> bool {
        let mut current = match self.widget(id) {
            Some(w) => w,
            None => return false,
        };
        loop {
            if !current.visible {
                return false;
            }
            match current.parent.and_then(|p| self.widget(p)) {
                Some(parent) => current = parent,
                None => return true,
            }
        }
    }

    /// The front-most visible modal panel, if any
    pub fn active_modal(&self) -> Option<WidgetId> {
        self.stacking
            .iter()
            .rev()
            .copied()
            .find(|&id| self.widget(id).is_some_and(|w| w.modal && w.visible))
    }

    /// Whether user input may reach this widget right now
    pub fn accepts_input(&self, id: WidgetId) -> bool {
        if !self.is_shown(id) {
            return false;
        }
        match self.active_modal() {
            Some(modal) => self.root_of(id) == Some(modal),
            None => true,
        }
    }

    fn is_subscribed(&self, id: WidgetId, kind: EventKind) -> bool {
        self.subscriptions.contains(&(id, kind))
    }

    /// Press a button. Returns false when the input was dropped.
    pub fn click(&mut self, button: WidgetId) -> bool {
        let is_button = self.widget(button).is_some_and(|w| w.kind == WidgetKind::Button);
        if !is_button || !self.accepts_input(button) {
            return false;
        }
        if self.is_subscribed(button, EventKind::Clicked) {
            self.events.push(UiEvent::Clicked { source: button });
        }
        true
    }

    /// Highlight a list row (single click)
    pub fn highlight(&mut self, list: WidgetId, index: usize) -> bool {
        if !self.select_row(list, index) {
            return false;
        }
        if self.is_subscribed(list, EventKind::Changed) {
            self.events.push(UiEvent::Changed { source: list, index });
        }
        true
    }

    /// Activate a list row (double click / enter)
    pub fn activate(&mut self, list: WidgetId, index: usize) -> bool {
        if !self.select_row(list, index) {
            return false;
        }
        if self.is_subscribed(list, EventKind::Activated) {
            self.events.push(UiEvent::Activated { source: list, index });
        }
        true
    }

    fn select_row(&mut self, list: WidgetId, index: usize) -> bool {
        if !self.accepts_input(list) {
            return false;
        }
        match self.widget_mut(list) {
            Some(w) if w.kind == WidgetKind::List && index < w.items.len() => {
                w.highlighted = Some(index);
                w.scroll = w.scroll_to_row(index, layout::ROW_HEIGHT);
                true
            }
            _ => false,
        }
    }

    /// Scroll a list by `delta` pixels (positive moves toward later rows).
    /// Returns false when the input was dropped.
    pub fn scroll_list(&mut self, list: WidgetId, delta: f32) -> bool {
        if !self.accepts_input(list) {
            return false;
        }
        match self.widget_mut(list) {
            Some(w) if w.kind == WidgetKind::List => {
                let max = w.max_scroll(layout::ROW_HEIGHT);
                w.scroll = (w.scroll + delta).clamp(0.0, max);
                true
            }
            _ => false,
        }
    }

    /// The hosting surface changed size
    pub fn resize(&mut self, surface: Size) {
        self.surface = surface;
        self.relayout();
        self.events.push(UiEvent::Resized { size: surface });
    }

    /// Take every queued event
    pub fn drain_events(&mut self) -> Vec<UiEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }

    fn insert(&mut self, kind: WidgetKind, size: Size) -> WidgetId {
        let id = WidgetId(self.next_id);
        self.next_id += 1;
        self.widgets.push(Widget::new(id, kind, size));
        self.stacking.push(id);
        self.restack();
        self.relayout();
        id
    }

    fn relayout(&mut self) {
        let rects = layout::resolve_layout(&self.widgets);
        for widget in &mut self.widgets {
            if let Some(rect) = rects.get(&widget.id) {
                widget.rect = *rect;
            }
            if widget.kind == WidgetKind::List {
                widget.scroll = widget.scroll.clamp(0.0, widget.max_scroll(layout::ROW_HEIGHT));
            }
        }
    }

    /// Move visible modal roots above the rest, keeping relative order
    fn restack(&mut self) {
        let mut stacking = std::mem::take(&mut self.stacking);
        stacking.sort_by_key(|&id| self.widget(id).is_some_and(|w| w.modal && w.visible));
        self.stacking = stacking;
    }

    /// Apply a change to one widget, then re-resolve geometry
    fn update<F: FnOnce(&mut Widget)>(&mut self, id: WidgetId, f: F) {
        if let Some(widget) = self.widget_mut(id) {
            f(widget);
            self.relayout();
        }
    }
}

impl PanelToolkit for PanelTree {
    fn create_panel(&mut self, size: Size) -> WidgetId {
        self.insert(WidgetKind::Panel, size)
    }

    fn create_label(&mut self, text: &str) -> WidgetId {
        let id = self.insert(WidgetKind::Label, layout::label_size(text));
        self.update(id, |w| w.text = text.to_string());
        id
    }

    fn create_list(&mut self, size: Size) -> WidgetId {
        self.insert(WidgetKind::List, size)
    }

    fn create_button(&mut self, text: &str) -> WidgetId {
        let id = self.insert(WidgetKind::Button, layout::button_size(text));
        self.update(id, |w| w.text = text.to_string());
        id
    }

    fn add_child(&mut self, parent: WidgetId, child: WidgetId) {
        if parent == child || self.widget(parent).is_none() || self.widget(child).is_none() {
            return;
        }
        // Refuse cycles
        if self.is_ancestor(child, parent) {
            return;
        }
        if let Some(old) = self.widget(child).and_then(|w| w.parent) {
            if let Some(old_parent) = self.widget_mut(old) {
                old_parent.children.retain(|c| *c != child);
            }
        }
        self.stacking.retain(|id| *id != child);
        if let Some(p) = self.widget_mut(parent) {
            p.children.push(child);
        }
        self.update(child, |w| w.parent = Some(parent));
    }

    fn set_layout(&mut self, panel: WidgetId, layout: BoxLayout) {
        self.update(panel, |w| w.layout = Some(layout));
    }

    fn set_layout_params(&mut self, widget: WidgetId, params: LayoutParams) {
        self.update(widget, |w| w.params = params);
    }

    fn set_frame(&mut self, panel: WidgetId, border: f32, padding: f32, color: Color) {
        self.update(panel, |w| {
            w.border = border;
            w.padding = padding;
            w.color = color;
        });
    }

    fn set_text(&mut self, widget: WidgetId, text: &str) {
        self.update(widget, |w| {
            w.text = text.to_string();
            match w.kind {
                WidgetKind::Label => w.size = layout::label_size(text),
                WidgetKind::Button => w.size = layout::button_size(text),
                _ => {}
            }
        });
    }

    fn set_items(&mut self, list: WidgetId, items: Vec<ListItem>) {
        self.update(list, |w| {
            w.items = items;
            w.highlighted = None;
            w.scroll = 0.0;
        });
    }

    fn set_visible(&mut self, widget: WidgetId, visible: bool) {
        self.update(widget, |w| w.visible = visible);
        self.restack();
    }

    fn is_visible(&self, widget: WidgetId) -> bool {
        self.widget(widget).is_some_and(|w| w.visible)
    }

    fn position(&self, widget: WidgetId) -> Vec2 {
        match self.widget(widget) {
            Some(w) => match w.parent.and_then(|p| self.widget(p)) {
                Some(parent) => w.rect.origin() - parent.rect.origin(),
                None => w.position,
            },
            None => Vec2::ZERO,
        }
    }

    fn set_position(&mut self, widget: WidgetId, position: Vec2) {
        self.update(widget, |w| w.position = position);
    }

    fn size(&self, widget: WidgetId) -> Size {
        self.widget(widget).map(|w| w.rect.size()).unwrap_or_default()
    }

    fn set_size(&mut self, widget: WidgetId, size: Size) {
        self.update(widget, |w| w.size = size);
    }

    fn parent_size(&self, widget: WidgetId) -> Size {
        match self.widget(widget).and_then(|w| w.parent) {
            Some(parent) => self.size(parent),
            None => self.surface,
        }
    }

    fn subscribe(&mut self, widget: WidgetId, kind: EventKind) {
        self.subscriptions.insert((widget, kind));
    }

    fn set_modal(&mut self, panel: WidgetId, modal: bool) {
        self.update(panel, |w| w.modal = modal);
        self.restack();
    }

    fn raise(&mut self, panel: WidgetId) {
        if self.stacking.contains(&panel) {
            self.stacking.retain(|id| *id != panel);
            self.stacking.push(panel);
            self.restack();
        }
    }

    fn emit(&mut self, event: UiEvent) {
        self.events.push(event);
    }
}
