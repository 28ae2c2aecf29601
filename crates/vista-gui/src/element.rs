//! Widget types and data structures

use std::fmt;
use vista_core::{Color, Rect, Size, Vec2};

/// Identifier of a widget inside one panel tree
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct WidgetId(pub u32);

impl fmt::Debug for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WidgetId({})", self.0)
    }
}

/// Widget kind determines rendering and which input it accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    Panel,
    Label,
    List,
    Button,
}

/// Glyph shown in front of a list row. Cosmetic only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Folder,
    File,
}

impl Icon {
    /// Unicode glyph used by text-based painters
    pub fn glyph(self) -> &'static str {
        match self {
            Icon::Folder => "\u{1F4C1}",
            Icon::File => "\u{1F5CB}",
        }
    }
}

/// One row of a list widget
#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    pub text: String,
    pub icon: Option<Icon>,
}

impl ListItem {
    pub fn new(text: impl Into<String>, icon: Icon) -> Self {
        Self {
            text: text.into(),
            icon: Some(icon),
        }
    }
}

/// Main axis of a box layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

/// Box layout assigned to a panel: children flow along one axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxLayout {
    pub orientation: Orientation,
    pub spacing: f32,
}

impl BoxLayout {
    pub fn vertical(spacing: f32) -> Self {
        Self {
            orientation: Orientation::Vertical,
            spacing,
        }
    }

    pub fn horizontal(spacing: f32) -> Self {
        Self {
            orientation: Orientation::Horizontal,
            spacing,
        }
    }
}

/// Cross-axis alignment of a child inside a box layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Start,
    Center,
    End,
    /// Stretch to the full cross-axis extent
    Fill,
}

/// Per-child box layout parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    /// Share of the leftover main-axis space; 0 keeps the preferred size
    pub expand: f32,
    pub align: Align,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            expand: 0.0,
            align: Align::Start,
        }
    }
}

impl LayoutParams {
    pub fn new(expand: f32, align: Align) -> Self {
        Self { expand, align }
    }
}

/// A single widget in the tree
#[derive(Debug, Clone)]
pub struct Widget {
    pub id: WidgetId,
    pub kind: WidgetKind,
    pub parent: Option<WidgetId>,
    pub children: Vec<WidgetId>,
    pub text: String,
    pub items: Vec<ListItem>,
    /// Row the toolkit shows as highlighted (lists only)
    pub highlighted: Option<usize>,
    /// Vertical scroll offset of the rows in pixels (lists only)
    pub scroll: f32,
    pub visible: bool,
    /// Position relative to the parent (or the surface for roots)
    pub position: Vec2,
    /// Preferred size; layouts may stretch or shrink it
    pub size: Size,
    pub layout: Option<BoxLayout>,
    pub params: LayoutParams,
    pub border: f32,
    pub padding: f32,
    pub color: Color,
    pub modal: bool,

    /// Resolved absolute rectangle, rewritten on every relayout
    pub rect: Rect,
}

impl Widget {
    pub fn new(id: WidgetId, kind: WidgetKind, size: Size) -> Self {
        Self {
            id,
            kind,
            parent: None,
            children: Vec::new(),
            text: String::new(),
            items: Vec::new(),
            highlighted: None,
            scroll: 0.0,
            visible: true,
            position: Vec2::ZERO,
            size,
            layout: None,
            params: LayoutParams::default(),
            border: 0.0,
            padding: 0.0,
            color: Color::WHITE,
            modal: false,
            rect: Rect::default(),
        }
    }

    /// Inset between the widget edge and its children
    pub fn content_inset(&self) -> f32 {
        self.border + self.padding
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Largest scroll offset that still fills the list rect with rows
    pub fn max_scroll(&self, row_height: f32) -> f32 {
        (self.items.len() as f32 * row_height - self.rect.h).max(0.0)
    }

    /// Scroll offset that keeps row `index` fully inside the rect, starting
    /// from the current offset
    pub fn scroll_to_row(&self, index: usize, row_height: f32) -> f32 {
        let top = index as f32 * row_height;
        let bottom = top + row_height;
        let scroll = if top < self.scroll {
            top
        } else if bottom > self.scroll + self.rect.h {
            bottom - self.rect.h
        } else {
            self.scroll
        };
        scroll.clamp(0.0, self.max_scroll(row_height))
    }
}
