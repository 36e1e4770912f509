use contagion_core::{Bounds, Side};
use glam::Vec2;
use rand::{Rng, RngCore};

/// Distance covered per tick along each axis the heading moves on.
pub const STEP: f32 = 2.0;

/// One of eight compass directions, numbered 1..=8 clockwise from north.
/// Screen coordinates: north is towards y = 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    North = 1,
    NorthEast = 2,
    East = 3,
    SouthEast = 4,
    South = 5,
    SouthWest = 6,
    West = 7,
    NorthWest = 8,
}

use Heading::*;

const AFTER_TOP: [Heading; 5] = [East, SouthEast, South, SouthWest, West];
const AFTER_LEFT: [Heading; 5] = [North, NorthEast, East, SouthEast, South];
const AFTER_BOTTOM: [Heading; 5] = [North, NorthEast, East, West, NorthWest];
const AFTER_RIGHT: [Heading; 5] = [North, South, SouthWest, West, NorthWest];

impl Heading {
    pub const ALL: [Heading; 8] =
        [North, NorthEast, East, SouthEast, South, SouthWest, West, NorthWest];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Heading> {
        Heading::ALL.get(usize::from(code).checked_sub(1)?).copied()
    }

    /// Uniform over all eight directions.
    pub fn random(rng: &mut dyn RngCore) -> Heading {
        Heading::ALL[rng.gen_range(0..Heading::ALL.len())]
    }

    /// Displacement for one tick.
    pub fn step(self) -> Vec2 {
        let (dx, dy) = match self {
            North => (0.0, -1.0),
            NorthEast => (1.0, -1.0),
            East => (1.0, 0.0),
            SouthEast => (1.0, 1.0),
            South => (0.0, 1.0),
            SouthWest => (-1.0, 1.0),
            West => (-1.0, 0.0),
            NorthWest => (-1.0, -1.0),
        };
        Vec2::new(dx, dy) * STEP
    }

    /// Directions a walker may take after touching `side`: the five that do
    /// not point further out through it.
    pub fn choices_after(side: Side) -> &'static [Heading] {
        match side {
            Side::Top => &AFTER_TOP,
            Side::Left => &AFTER_LEFT,
            Side::Bottom => &AFTER_BOTTOM,
            Side::Right => &AFTER_RIGHT,
        }
    }

    /// Uniform pick from [`Heading::choices_after`].
    pub fn reroll(side: Side, rng: &mut dyn RngCore) -> Heading {
        let choices = Heading::choices_after(side);
        choices[rng.gen_range(0..choices.len())]
    }
}

/// Position plus heading; the movement shared by every person.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Walker {
    pub position: Vec2,
    pub heading: Heading,
}

impl Walker {
    pub fn new(position: Vec2, heading: Heading) -> Self {
        Walker { position, heading }
    }

    /// Random whole-unit position inside `bounds` (edges included) and a
    /// random heading.
    pub fn spawn(bounds: Bounds, rng: &mut dyn RngCore) -> Self {
        let x = rng.gen_range(0..=bounds.width as u32) as f32;
        let y = rng.gen_range(0..=bounds.height as u32) as f32;
        Walker::new(Vec2::new(x, y), Heading::random(rng))
    }

    pub fn advance(&mut self) {
        self.position += self.heading.step();
    }

    /// Pick a new heading for `side`. Called once per touched side, so in a
    /// corner the last side processed decides.
    pub fn bounce(&mut self, side: Side, rng: &mut dyn RngCore) {
        self.heading = Heading::reroll(side, rng);
    }
}
