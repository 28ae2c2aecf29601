//! egui painter for a [`PanelTree`]
//!
//! Draws every visible top-level panel back to front and turns pointer
//! clicks and wheel motion into toolkit input (button clicks, list
//! highlight/activation, list scrolling).

use egui::{Align2, Color32, FontId, Painter, Pos2, Stroke};
use vista_core::{Color, Rect, Vec2};
use vista_gui::layout::{FONT_SIZE, ROW_HEIGHT};
use vista_gui::{PanelTree, Widget, WidgetId, WidgetKind};

const TEXT_COLOR: Color32 = Color32::from_rgb(20, 20, 20);
const BORDER_COLOR: Color32 = Color32::from_rgb(90, 90, 90);
const BUTTON_FILL: Color32 = Color32::from_rgb(225, 225, 225);
const HIGHLIGHT_FILL: Color32 = Color32::from_rgb(170, 200, 240);

/// What a pointer position landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Button(WidgetId),
    Row { list: WidgetId, index: usize },
}

/// Draws the overlay and feeds pointer input back into the tree
#[derive(Debug, Clone)]
pub struct OverlayPainter {
    pub font_size: f32,
}

impl Default for OverlayPainter {
    fn default() -> Self {
        Self {
            font_size: FONT_SIZE,
        }
    }
}

impl OverlayPainter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paint all visible panels, back to front
    pub fn paint(&self, tree: &PanelTree, painter: &Painter) {
        for &root in tree.roots() {
            if let Some(widget) = tree.widget(root) {
                self.paint_widget(tree, widget, painter);
            }
        }
    }

    fn paint_widget(&self, tree: &PanelTree, widget: &Widget, painter: &Painter) {
        if !widget.visible {
            return;
        }
        let rect = to_egui_rect(widget.rect);
        let font = FontId::proportional(self.font_size);

        match widget.kind {
            WidgetKind::Panel => {
                painter.rect_filled(rect, 0.0, to_color32(widget.color));
                if widget.border > 0.0 {
                    painter.rect_stroke(rect, 0.0, Stroke::new(widget.border, BORDER_COLOR));
                }
            }
            WidgetKind::Label => {
                painter.text(rect.left_center(), Align2::LEFT_CENTER, &widget.text, font, TEXT_COLOR);
            }
            WidgetKind::Button => {
                painter.rect_filled(rect, 2.0, BUTTON_FILL);
                painter.rect_stroke(rect, 2.0, Stroke::new(1.0, BORDER_COLOR));
                painter.text(rect.center(), Align2::CENTER_CENTER, &widget.text, font, TEXT_COLOR);
            }
            WidgetKind::List => {
                painter.rect_stroke(rect, 0.0, Stroke::new(1.0, BORDER_COLOR));
                let clipped = painter.with_clip_rect(rect);
                let first = (widget.scroll / ROW_HEIGHT).floor() as usize;
                for (i, item) in widget.items.iter().enumerate().skip(first) {
                    let top = rect.top() + i as f32 * ROW_HEIGHT - widget.scroll;
                    if top > rect.bottom() {
                        break;
                    }
                    let row = egui::Rect::from_min_size(
                        egui::pos2(rect.left(), top),
                        egui::vec2(rect.width(), ROW_HEIGHT),
                    );
                    if widget.highlighted == Some(i) {
                        clipped.rect_filled(row, 0.0, HIGHLIGHT_FILL);
                    }
                    let text = match item.icon {
                        Some(icon) => format!("{} {}", icon.glyph(), item.text),
                        None => item.text.clone(),
                    };
                    clipped.text(
                        row.left_center() + egui::vec2(4.0, 0.0),
                        Align2::LEFT_CENTER,
                        text,
                        font.clone(),
                        TEXT_COLOR,
                    );
                }
            }
        }

        for &child in &widget.children {
            if let Some(child) = tree.widget(child) {
                self.paint_widget(tree, child, painter);
            }
        }
    }

    /// Deepest visible widget under a surface position.
    ///
    /// While a modal panel is showing only that panel is considered;
    /// otherwise the front-most panel containing `pos` wins.
    pub fn widget_at<'a>(&self, tree: &'a PanelTree, pos: Vec2) -> Option<&'a Widget> {
        let candidates: Vec<WidgetId> = match tree.active_modal() {
            Some(modal) => vec![modal],
            None => tree.roots().iter().rev().copied().collect(),
        };
        for root in candidates {
            let Some(widget) = tree.widget(root) else {
                continue;
            };
            if widget.visible && widget.rect.contains(pos) {
                return Some(descend(tree, widget, pos));
            }
        }
        None
    }

    /// Find the clickable element under a surface position
    pub fn hit_test(&self, tree: &PanelTree, pos: Vec2) -> Option<Hit> {
        let widget = self.widget_at(tree, pos)?;
        match widget.kind {
            WidgetKind::Button => Some(Hit::Button(widget.id)),
            WidgetKind::List => {
                let index = ((pos.y - widget.rect.y + widget.scroll) / ROW_HEIGHT).floor() as usize;
                (index < widget.items.len()).then_some(Hit::Row {
                    list: widget.id,
                    index,
                })
            }
            _ => None,
        }
    }

    /// Apply one pointer press at `pos`. Returns true when the tree took the input.
    pub fn click_at(&self, tree: &mut PanelTree, pos: Vec2, double: bool) -> bool {
        match self.hit_test(tree, pos) {
            Some(Hit::Button(button)) => tree.click(button),
            Some(Hit::Row { list, index }) if double => tree.activate(list, index),
            Some(Hit::Row { list, index }) => tree.highlight(list, index),
            None => false,
        }
    }

    /// Scroll the list under `pos` by `delta` pixels. Returns true when the tree took the input.
    pub fn scroll_at(&self, tree: &mut PanelTree, pos: Vec2, delta: f32) -> bool {
        let list = self
            .widget_at(tree, pos)
            .filter(|w| w.kind == WidgetKind::List)
            .map(|w| w.id);
        match list {
            Some(list) => tree.scroll_list(list, delta),
            None => false,
        }
    }

    /// Read this frame's pointer input from egui and forward it to the tree
    pub fn handle_input(&self, tree: &mut PanelTree, ctx: &egui::Context) -> bool {
        let (press, wheel) = ctx.input(|i| {
            let press = i.pointer.interact_pos().and_then(|pos| {
                let double = i.pointer.button_double_clicked(egui::PointerButton::Primary);
                (i.pointer.primary_clicked() || double).then_some((pos, double))
            });
            let wheel = i
                .pointer
                .hover_pos()
                .filter(|_| i.raw_scroll_delta.y != 0.0)
                .map(|pos| (pos, i.raw_scroll_delta.y));
            (press, wheel)
        });

        // egui reports wheel-up as a positive delta; rows move the other way
        let scrolled = match wheel {
            Some((pos, dy)) => self.scroll_at(tree, Vec2::new(pos.x, pos.y), -dy),
            None => false,
        };
        let clicked = match press {
            Some((pos, double)) => self.click_at(tree, Vec2::new(pos.x, pos.y), double),
            None => false,
        };
        scrolled || clicked
    }
}

fn descend<'a>(tree: &'a PanelTree, widget: &'a Widget, pos: Vec2) -> &'a Widget {
    for &child in widget.children.iter().rev() {
        let Some(child) = tree.widget(child) else {
            continue;
        };
        if child.visible && child.rect.contains(pos) {
            return descend(tree, child, pos);
        }
    }
    widget
}

fn to_egui_rect(rect: Rect) -> egui::Rect {
    egui::Rect::from_min_size(Pos2::new(rect.x, rect.y), egui::vec2(rect.w, rect.h))
}

fn to_color32(color: Color) -> Color32 {
    let [r, g, b, a] = color.to_rgba8();
    Color32::from_rgba_unmultiplied(r, g, b, a)
}
