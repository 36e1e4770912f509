use serde::{Serialize, Serializer};
use std::fmt;

use crate::context::Tally;

/// An RGB color, serialized as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Primitive drawing commands the engine needs from a render backend.
///
/// Coordinates are in world units with y growing downward. `ellipse` is
/// centred on `(x, y)`; `rectangle` is anchored at its top-left corner.
pub trait DrawSurface {
    fn ellipse(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color);
    fn rectangle(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color);
    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32);
    /// `color` defaults to black and `size` to the backend's default font size.
    fn text(&mut self, x: f32, y: f32, text: &str, color: Option<Color>, size: Option<u32>);

    fn clear(&mut self);
    /// Finish the current frame and wait out the rest of its time slot.
    fn present_frame(&mut self, target_frame_rate: u32);

    /// True once the render target has gone away. Must be checked before
    /// `clear()`; drawing on a destroyed surface is not allowed.
    fn is_destroyed(&self) -> bool;
}

/// Scene-level drawing done once per frame before any entity draws itself.
pub trait Overlay {
    fn draw(&self, surface: &mut dyn DrawSurface, tally: &Tally);
}

/// An overlay that draws nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOverlay;

impl Overlay for NoOverlay {
    fn draw(&self, _surface: &mut dyn DrawSurface, _tally: &Tally) {}
}
