//! Layout resolution: converts the widget tree into absolute rectangles

use crate::element::{Align, BoxLayout, Orientation, Widget, WidgetId};
use std::collections::HashMap;
use vista_core::{Rect, Size};

/// Nominal glyph size used to size labels and buttons
pub const FONT_SIZE: f32 = 14.0;

/// Height of one list row
pub const ROW_HEIGHT: f32 = FONT_SIZE + 6.0;

/// Resolve every widget's absolute rectangle.
///
/// Roots are placed at their own position and preferred size. Children of a
/// panel with a box layout are flowed along its axis; children of a panel
/// without one are offset from the parent's content area by their position.
pub fn resolve_layout(widgets: &[Widget]) -> HashMap<WidgetId, Rect> {
    let mut results = HashMap::new();

    let widget_map: HashMap<WidgetId, &Widget> = widgets.iter().map(|w| (w.id, w)).collect();

    for root in widgets.iter().filter(|w| w.is_root()) {
        let rect = Rect::new(root.position, root.size);
        resolve_widget(root, rect, &widget_map, &mut results);
    }

    results
}

fn resolve_widget(
    widget: &Widget,
    rect: Rect,
    widget_map: &HashMap<WidgetId, &Widget>,
    results: &mut HashMap<WidgetId, Rect>,
) {
    results.insert(widget.id, rect);

    let content = rect.inset(widget.content_inset());

    let (shown, hidden): (Vec<&Widget>, Vec<&Widget>) = widget
        .children
        .iter()
        .filter_map(|id| widget_map.get(id).copied())
        .partition(|c| c.visible);

    match widget.layout {
        Some(layout) => {
            let rects = box_rects(&layout, content, &shown);
            for (child, child_rect) in shown.iter().zip(rects) {
                resolve_widget(child, child_rect, widget_map, results);
            }
        }
        None => {
            for child in &shown {
                let child_rect = Rect::new(content.origin() + child.position, child.size);
                resolve_widget(child, child_rect, widget_map, results);
            }
        }
    }

    // Hidden children take no space
    for child in hidden {
        let collapsed = Rect::new(content.origin(), Size::ZERO);
        resolve_widget(child, collapsed, widget_map, results);
    }
}

/// Flow `children` along the layout axis inside `content`.
///
/// Non-expanding children keep their preferred main-axis size. Whatever is
/// left after those and the spacing is shared among expanding children in
/// proportion to their weights.
pub fn box_rects(layout: &BoxLayout, content: Rect, children: &[&Widget]) -> Vec<Rect> {
    let vertical = layout.orientation == Orientation::Vertical;
    let main_of = |s: Size| if vertical { s.height } else { s.width };
    let cross_of = |s: Size| if vertical { s.width } else { s.height };

    let (main_total, cross_total) = if vertical {
        (content.h, content.w)
    } else {
        (content.w, content.h)
    };

    let gaps = layout.spacing * children.len().saturating_sub(1) as f32;
    let fixed: f32 = children
        .iter()
        .filter(|c| c.params.expand <= 0.0)
        .map(|c| main_of(c.size))
        .sum();
    let weights: f32 = children.iter().map(|c| c.params.expand.max(0.0)).sum();
    let leftover = (main_total - fixed - gaps).max(0.0);

    let mut cursor = 0.0_f32;
    let mut rects = Vec::with_capacity(children.len());

    for child in children {
        let main = if child.params.expand > 0.0 && weights > 0.0 {
            leftover * child.params.expand / weights
        } else {
            main_of(child.size)
        };

        let own_cross = cross_of(child.size).min(cross_total);
        let (cross, offset) = match child.params.align {
            Align::Start => (own_cross, 0.0),
            Align::Center => (own_cross, (cross_total - own_cross) / 2.0),
            Align::End => (own_cross, cross_total - own_cross),
            Align::Fill => (cross_total, 0.0),
        };

        let rect = if vertical {
            Rect {
                x: content.x + offset,
                y: content.y + cursor,
                w: cross,
                h: main,
            }
        } else {
            Rect {
                x: content.x + cursor,
                y: content.y + offset,
                w: main,
                h: cross,
            }
        };
        rects.push(rect);

        cursor += main + layout.spacing;
    }

    rects
}

/// Compute approximate text width (matching the painter's monospace convention)
pub fn approximate_text_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * 0.6
}

/// Preferred size of a one-line label
pub fn label_size(text: &str) -> Size {
    Size::new(approximate_text_width(text, FONT_SIZE), ROW_HEIGHT)
}

/// Preferred size of a push button with a caption
pub fn button_size(text: &str) -> Size {
    Size::new(approximate_text_width(text, FONT_SIZE) + 16.0, FONT_SIZE + 12.0)
}
