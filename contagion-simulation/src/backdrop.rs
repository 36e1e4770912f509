use contagion_core::{Agent, Bounds, DrawSurface, Vec2};

use crate::scene;

/// The party room as an agent: sits at the origin with no size, never moves,
/// and draws the floor plan underneath whatever joined after it.
#[derive(Debug, Clone, Copy)]
pub struct Backdrop {
    bounds: Bounds,
}

impl Backdrop {
    pub fn new(bounds: Bounds) -> Self {
        Backdrop { bounds }
    }
}

impl Agent for Backdrop {
    fn position(&self) -> Vec2 {
        Vec2::ZERO
    }

    fn radius(&self) -> f32 {
        0.0
    }

    fn on_draw(&self, surface: &mut dyn DrawSurface) {
        scene::draw_room(surface, self.bounds);
    }

    fn label(&self) -> &'static str {
        "backdrop"
    }
}
