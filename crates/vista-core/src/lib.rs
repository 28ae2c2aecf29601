//! Vista Core - Foundational types for the Vista overlay
//!
//! This crate provides the types every other Vista crate depends on:
//! - `Vec2`, `Size`, `Rect` - 2D overlay geometry
//! - `Color` - RGBA panel colors
//! - Error types and Result alias

mod error;
mod types;

pub use error::{Result, VistaError};
pub use types::{Color, Rect, Size, Vec2};
