use glam::Vec2;
use smallvec::SmallVec;

/// A side of the play area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Left,
    Bottom,
    Right,
}

impl Side {
    /// Order in which edge hooks fire within a tick.
    pub const ORDER: [Side; 4] = [Side::Top, Side::Left, Side::Bottom, Side::Right];
}

/// Extent of the play area; the origin is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Bounds { width, height }
    }

    /// Coordinate of `side` on its own axis.
    pub fn coordinate(&self, side: Side) -> f32 {
        match side {
            Side::Top | Side::Left => 0.0,
            Side::Bottom => self.height,
            Side::Right => self.width,
        }
    }
}

pub type EdgeHits = SmallVec<[(Side, f32); 4]>;

/// Sides a circle is touching or past, in [`Side::ORDER`].
///
/// Top and left use a strict test (`centre - radius < 0`); bottom and right
/// are inclusive (`centre + radius >= extent`).
pub fn touching_sides(center: Vec2, radius: f32, bounds: Bounds) -> EdgeHits {
    let mut hits = EdgeHits::new();
    for side in Side::ORDER {
        let touching = match side {
            Side::Top => center.y - radius < 0.0,
            Side::Left => center.x - radius < 0.0,
            Side::Bottom => center.y + radius >= bounds.height,
            Side::Right => center.x + radius >= bounds.width,
        };
        if touching {
            hits.push((side, bounds.coordinate(side)));
        }
    }
    hits
}
