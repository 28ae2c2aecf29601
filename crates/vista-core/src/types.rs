//! 2D geometry and color types shared by overlay panels

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A 2D position in surface pixels, relative to the parent surface
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Vec2 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Vec2 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

/// Width and height of a widget or surface
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Clamp both dimensions to the given bounds (never below zero)
    pub fn fit_within(&self, bounds: Size) -> Size {
        Size {
            width: self.width.min(bounds.width).max(0.0),
            height: self.height.min(bounds.height).max(0.0),
        }
    }

    /// Top-left position that centers a box of this size inside `parent`.
    /// Clamped so the top-left corner never leaves the parent.
    pub fn centered_in(&self, parent: Size) -> Vec2 {
        Vec2 {
            x: ((parent.width - self.width) / 2.0).max(0.0),
            y: ((parent.height - self.height) / 2.0).max(0.0),
        }
    }
}

/// Axis-aligned rectangle in absolute surface coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(origin: Vec2, size: Size) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            w: size.width,
            h: size.height,
        }
    }

    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.w, self.h)
    }

    /// Shrink the rect by an equal inset on every side
    pub fn inset(&self, amount: f32) -> Rect {
        Rect {
            x: self.x + amount,
            y: self.y + amount,
            w: (self.w - 2.0 * amount).max(0.0),
            h: (self.h - 2.0 * amount).max(0.0),
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.y >= self.y && p.x < self.x + self.w && p.y < self.y + self.h
    }
}

/// RGBA color
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_array(arr: [f32; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Convert to 8-bit channels, clamping out-of-range components
    pub fn to_rgba8(&self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_in_parent() {
        let panel = Size::new(400.0, 300.0);
        let pos = panel.centered_in(Size::new(1000.0, 700.0));
        assert_eq!(pos, Vec2::new(300.0, 200.0));
    }

    #[test]
    fn test_centered_in_smaller_parent_clamps() {
        let panel = Size::new(400.0, 300.0);
        let pos = panel.centered_in(Size::new(200.0, 100.0));
        assert_eq!(pos, Vec2::ZERO);
    }

    #[test]
    fn test_fit_within() {
        let fitted = Size::new(400.0, 300.0).fit_within(Size::new(350.0, 500.0));
        assert_eq!(fitted, Size::new(350.0, 300.0));
    }

    #[test]
    fn test_rect_inset_and_contains() {
        let r = Rect::new(Vec2::new(10.0, 10.0), Size::new(100.0, 50.0)).inset(5.0);
        assert_eq!(r, Rect { x: 15.0, y: 15.0, w: 90.0, h: 40.0 });
        assert!(r.contains(Vec2::new(20.0, 20.0)));
        assert!(!r.contains(Vec2::new(5.0, 20.0)));
    }

    #[test]
    fn test_color_rgba8() {
        assert_eq!(Color::WHITE.to_rgba8(), [255, 255, 255, 255]);
        assert_eq!(Color::new(2.0, -1.0, 0.5, 1.0).to_rgba8(), [255, 0, 128, 255]);
    }
}
