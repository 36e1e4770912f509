use contagion_core::{Bounds, Color, DrawSurface, Engine, EngineOptions};
use rand::rngs::mock::StepRng;

/// 600x600 world whose random source always yields the low end of a range.
pub fn engine_with(options: EngineOptions) -> Engine {
    Engine::new(Bounds::new(600.0, 600.0), 40, options, Box::new(StepRng::new(0, 0)))
}

/// Keeps just enough of each draw call to assert on.
#[derive(Debug, Default)]
pub struct TextSurface {
    pub texts: Vec<String>,
    pub rectangles: Vec<(f32, f32)>,
    pub ellipses: usize,
    pub first_fill: Option<Color>,
}

impl TextSurface {
    fn fill(&mut self, color: Color) {
        self.first_fill.get_or_insert(color);
    }
}

impl DrawSurface for TextSurface {
    fn ellipse(&mut self, _x: f32, _y: f32, _w: f32, _h: f32, color: Color) {
        self.ellipses += 1;
        self.fill(color);
    }

    fn rectangle(&mut self, x: f32, y: f32, _w: f32, _h: f32, color: Color) {
        self.rectangles.push((x, y));
        self.fill(color);
    }

    fn line(&mut self, _x1: f32, _y1: f32, _x2: f32, _y2: f32) {}

    fn text(&mut self, _x: f32, _y: f32, text: &str, _color: Option<Color>, _size: Option<u32>) {
        self.texts.push(text.to_string());
    }

    fn clear(&mut self) {}

    fn present_frame(&mut self, _frame_rate: u32) {}

    fn is_destroyed(&self) -> bool {
        false
    }
}
