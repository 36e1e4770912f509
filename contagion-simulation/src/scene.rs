//! Drawing shared by the agents and the scene overlay: the person glyph,
//! the party room, and the statistics panel under the play area.

use contagion_core::{Bounds, Color, DrawSurface, Overlay, Tally};

pub const HEALTHY: Color = Color::WHITE;
pub const CONTAGIOUS: Color = Color::rgb(0xFC, 0x35, 0x47);
pub const AFFECTED: Color = Color::rgb(0xFD, 0x87, 0x8E);
pub const MASK: Color = Color::rgb(0x41, 0x7C, 0xF9);

const FLOOR: Color = Color::rgb(0x96, 0x95, 0x95);
const WOOD: Color = Color::rgb(0x71, 0x3F, 0x1C);
const DARK_WOOD: Color = Color::rgb(0x58, 0x31, 0x16);
const SOFA: Color = Color::rgb(0x42, 0x42, 0x41);
const CUSHION: Color = Color::rgb(0x4D, 0x4D, 0x4D);
const STOOL: Color = Color::rgb(0x3A, 0x3A, 0x3A);
const PANEL: Color = Color::rgb(0xE6, 0xE0, 0x47);
const HEALTHY_TEXT: Color = Color::rgb(0x18, 0x15, 0x63);
const INFECTED_TEXT: Color = Color::rgb(0x66, 0x02, 0x0A);

/// Height of the statistics panel drawn below the play area.
pub const STATS_PANEL_HEIGHT: f32 = 300.0;

/// Diameter of every person.
pub const PERSON_DIAMETER: f32 = 20.0;

/// A person: face, two eyes, and either a mask or a mouth.
pub fn draw_person(surface: &mut dyn DrawSurface, x: f32, y: f32, masked: bool, color: Color) {
    surface.ellipse(x, y, PERSON_DIAMETER, PERSON_DIAMETER, color);
    surface.ellipse(x - 5.0, y - 5.0, 3.0, 3.0, Color::BLACK);
    surface.ellipse(x + 5.0, y - 5.0, 3.0, 3.0, Color::BLACK);
    if masked {
        surface.rectangle(x - 8.0, y, 16.0, 8.0, MASK);
    } else {
        surface.ellipse(x, y + 4.0, 8.0, 2.0, Color::BLACK);
    }
}

/// Furniture layout, authored for a 600x600 room and stretched to `bounds`.
pub fn draw_room(surface: &mut dyn DrawSurface, bounds: Bounds) {
    let sx = bounds.width / 600.0;
    let sy = bounds.height / 600.0;
    let mut rect = |x: f32, y: f32, w: f32, h: f32, color: Color| {
        surface.rectangle(x * sx, y * sy, w * sx, h * sy, color)
    };

    rect(0.0, 0.0, 600.0, 600.0, FLOOR);
    // TV and stand
    rect(210.0, 20.0, 185.0, 18.0, WOOD);
    rect(225.0, 10.0, 150.0, 15.0, Color::BLACK);
    // Sofas
    rect(80.0, 80.0, 70.0, 90.0, SOFA);
    rect(110.0, 98.0, 40.0, 54.0, CUSHION);
    rect(450.0, 80.0, 70.0, 90.0, SOFA);
    rect(450.0, 98.0, 40.0, 54.0, CUSHION);
    rect(210.0, 180.0, 185.0, 70.0, SOFA);
    rect(240.0, 180.0, 118.0, 50.0, CUSHION);
    // Dining chairs
    rect(50.0, 420.0, 30.0, 60.0, WOOD);
    rect(60.0, 420.0, 20.0, 40.0, FLOOR);
    rect(220.0, 420.0, 30.0, 60.0, WOOD);
    rect(220.0, 420.0, 20.0, 40.0, FLOOR);
    rect(135.0, 280.0, 30.0, 60.0, WOOD);
    rect(135.0, 280.0, 20.0, 40.0, FLOOR);
    // Bar
    rect(590.0, 420.0, 10.0, 75.0, DARK_WOOD);
    rect(530.0, 405.0, 30.0, 105.0, DARK_WOOD);

    // Coffee table, dining table, bar stools
    surface.ellipse(300.0 * sx, 98.0 * sy, 140.0 * sx, 40.0 * sy, WOOD);
    surface.ellipse(150.0 * sx, 450.0 * sy, 100.0 * sx, 180.0 * sy, WOOD);
    for stool_y in [415.0, 450.0, 485.0] {
        surface.ellipse(515.0 * sx, stool_y * sy, 22.0 * sx, 22.0 * sy, STOOL);
    }

    surface.text(300.0 * sx, 130.0 * sy, "Living Room", None, None);
    surface.text(150.0 * sx, 570.0 * sy, "Dining Room", None, None);
    surface.text(465.0 * sx, 485.0 * sy, "Bar", None, None);
}

/// Cohort sizes the run started with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Census {
    pub masked_susceptible: u32,
    pub unmasked_susceptible: u32,
    pub contagious: u32,
    pub contagious_masked: bool,
}

impl Census {
    pub fn susceptible(&self) -> u32 {
        self.masked_susceptible + self.unmasked_susceptible
    }

    pub fn population(&self) -> u32 {
        self.susceptible() + self.contagious
    }

    pub fn currently_healthy(&self, tally: &Tally) -> u32 {
        self.susceptible().saturating_sub(tally.affected)
    }

    pub fn currently_infected(&self, tally: &Tally) -> u32 {
        self.contagious + tally.affected
    }
}

/// Room background plus the statistics panel.
#[derive(Debug, Clone)]
pub struct PartyScene {
    census: Census,
    bounds: Bounds,
    draw_room: bool,
}

impl PartyScene {
    pub fn new(census: Census, bounds: Bounds) -> Self {
        PartyScene { census, bounds, draw_room: true }
    }

    /// Leave the room to a backdrop agent instead of drawing it here.
    pub fn without_room(mut self) -> Self {
        self.draw_room = false;
        self
    }

    pub fn census(&self) -> &Census {
        &self.census
    }

    fn draw_stats(&self, surface: &mut dyn DrawSurface, tally: &Tally) {
        let census = &self.census;
        let top = self.bounds.height;
        let width = self.bounds.width;
        let line = |offset: f32| top + offset;

        surface.rectangle(0.0, top, width, STATS_PANEL_HEIGHT, PANEL);
        surface.line(0.0, top, width, top);
        surface.text(50.0, line(15.0), "Statistics/Information:", Some(Color::BLACK), Some(25));

        let total = format!("Total Number of People: {}", census.population());
        surface.text(50.0, line(50.0), &total, None, None);
        surface.text(
            50.0,
            line(70.0),
            &format!("Current Number of Healthy People: {}", census.currently_healthy(tally)),
            Some(HEALTHY_TEXT),
            None,
        );
        surface.text(
            50.0,
            line(90.0),
            &format!("Original Number of Healthy Mask Wearers: {}", census.masked_susceptible),
            Some(HEALTHY_TEXT),
            None,
        );
        draw_person(surface, 413.0, line(98.0), true, HEALTHY);
        surface.text(
            50.0,
            line(110.0),
            &format!(
                "Original Number of Healthy Non Mask Wearers: {}",
                census.unmasked_susceptible
            ),
            Some(HEALTHY_TEXT),
            None,
        );
        draw_person(surface, 450.0, line(118.0), false, HEALTHY);

        surface.text(
            50.0,
            line(130.0),
            &format!("Number of Contagious People: {}", census.contagious),
            Some(INFECTED_TEXT),
            None,
        );
        draw_person(surface, 322.0, line(138.0), true, CONTAGIOUS);
        draw_person(surface, 347.0, line(138.0), false, CONTAGIOUS);
        let masked = if census.contagious_masked { "yes" } else { "no" };
        surface.text(
            50.0,
            line(150.0),
            &format!("Are the Contagious People Wearing Masks?: {}", masked),
            Some(INFECTED_TEXT),
            None,
        );
        surface.text(
            50.0,
            line(170.0),
            &format!("Current Number of Infected People: {}", census.currently_infected(tally)),
            Some(INFECTED_TEXT),
            None,
        );
        surface.text(
            50.0,
            line(190.0),
            &format!("Number of Newly Infected People: {}", tally.affected),
            Some(INFECTED_TEXT),
            None,
        );
        draw_person(surface, 350.0, line(198.0), true, AFFECTED);
        draw_person(surface, 375.0, line(198.0), false, AFFECTED);
    }
}

impl Overlay for PartyScene {
    fn draw(&self, surface: &mut dyn DrawSurface, tally: &Tally) {
        if self.draw_room {
            draw_room(surface, self.bounds);
        }
        self.draw_stats(surface, tally);
    }
}
