use std::ops::ControlFlow;
use std::rc::Rc;

use contagion_core::{Agent, Bounds, DrawSurface, Exposure, Side, TickContext, Vec2};
use log::debug;
use rand::RngCore;

use crate::heading::Walker;
use crate::policy::TransmissionPolicy;
use crate::scene::{self, PERSON_DIAMETER};

/// How close a contagious person has to be to pass the infection on.
pub const CONTACT_RANGE: f32 = 20.0;

/// A healthy person who can be infected.
#[derive(Debug, Clone)]
pub struct Susceptible {
    pub walker: Walker,
    pub exposure: Exposure,
}

impl Susceptible {
    pub fn new(walker: Walker, masked: bool) -> Self {
        Susceptible { walker, exposure: Exposure::new(masked) }
    }

    pub fn spawn(bounds: Bounds, masked: bool, rng: &mut dyn RngCore) -> Self {
        Susceptible::new(Walker::spawn(bounds, rng), masked)
    }

    pub fn is_affected(&self) -> bool {
        self.exposure.affected
    }
}

impl Agent for Susceptible {
    fn position(&self) -> Vec2 {
        self.walker.position
    }

    fn radius(&self) -> f32 {
        PERSON_DIAMETER / 2.0
    }

    fn on_move(&mut self, _ctx: &mut TickContext<'_>) {
        self.walker.advance();
    }

    fn on_edge(&mut self, side: Side, _boundary: f32, ctx: &mut TickContext<'_>) {
        self.walker.bounce(side, ctx.rng());
    }

    fn on_draw(&self, surface: &mut dyn DrawSurface) {
        let color = if self.is_affected() { scene::AFFECTED } else { scene::HEALTHY };
        let Vec2 { x, y } = self.walker.position;
        scene::draw_person(surface, x, y, self.exposure.masked, color);
    }

    fn exposure(&mut self) -> Option<&mut Exposure> {
        Some(&mut self.exposure)
    }

    fn label(&self) -> &'static str {
        "susceptible"
    }
}

/// A carrier. Infects susceptible neighbours inside [`CONTACT_RANGE`].
pub struct Contagious {
    pub walker: Walker,
    pub masked: bool,
    policy: Rc<dyn TransmissionPolicy>,
}

impl Contagious {
    pub fn new(walker: Walker, masked: bool, policy: Rc<dyn TransmissionPolicy>) -> Self {
        Contagious { walker, masked, policy }
    }

    pub fn spawn(
        bounds: Bounds,
        masked: bool,
        policy: Rc<dyn TransmissionPolicy>,
        rng: &mut dyn RngCore,
    ) -> Self {
        Contagious::new(Walker::spawn(bounds, rng), masked, policy)
    }
}

impl Agent for Contagious {
    fn position(&self) -> Vec2 {
        self.walker.position
    }

    fn radius(&self) -> f32 {
        PERSON_DIAMETER / 2.0
    }

    fn on_proximity(
        &mut self,
        other: &mut dyn Agent,
        distance: f32,
        ctx: &mut TickContext<'_>,
    ) -> ControlFlow<()> {
        // Neighbours arrive nearest first; nobody further out can be in range.
        if distance > CONTACT_RANGE {
            return ControlFlow::Break(());
        }

        let label = other.label();
        let Some(exposure) = other.exposure() else {
            return ControlFlow::Continue(());
        };
        if exposure.affected {
            return ControlFlow::Continue(());
        }

        if self.policy.transmits(self.masked, exposure.masked, ctx.rng()) {
            exposure.affected = true;
            ctx.tally_mut().record_affected();
            if let (Some(carrier), Some(host)) = (ctx.current(), ctx.counterpart()) {
                debug!(
                    "tick {}: {} {} infected by {} at distance {:.1}",
                    ctx.tick(),
                    label,
                    host,
                    carrier,
                    distance
                );
            }
        }
        ControlFlow::Continue(())
    }

    fn on_move(&mut self, _ctx: &mut TickContext<'_>) {
        self.walker.advance();
    }

    fn on_edge(&mut self, side: Side, _boundary: f32, ctx: &mut TickContext<'_>) {
        self.walker.bounce(side, ctx.rng());
    }

    fn on_draw(&self, surface: &mut dyn DrawSurface) {
        let Vec2 { x, y } = self.walker.position;
        scene::draw_person(surface, x, y, self.masked, scene::CONTAGIOUS);
    }

    fn label(&self) -> &'static str {
        "contagious"
    }
}
