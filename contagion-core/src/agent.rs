use glam::Vec2;
use std::ops::ControlFlow;

use crate::context::TickContext;
use crate::edge::Side;
use crate::surface::DrawSurface;

/// Exposure state an agent lends to other agents' proximity hooks.
///
/// Only agents that can be infected hand one out; everything else answers
/// `None` from [`Agent::exposure`] and is skipped by contagious neighbours.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Exposure {
    pub masked: bool,
    /// Set the first time a contagious neighbour passes the infection on.
    pub affected: bool,
}

impl Exposure {
    pub fn new(masked: bool) -> Self {
        Exposure { masked, affected: false }
    }
}

/// The capability set every simulated entity implements.
///
/// The default methods are the passive behaviour: never stop proximity
/// delivery, never move, ignore edges, draw nothing. A hook that meets an
/// agent it has no interaction with must treat it the same way.
pub trait Agent {
    fn position(&self) -> Vec2;
    fn radius(&self) -> f32;

    /// Called with each other active agent, nearest first. Returning
    /// `ControlFlow::Break` ends delivery for this agent for the current tick.
    fn on_proximity(
        &mut self,
        _other: &mut dyn Agent,
        _distance: f32,
        _ctx: &mut TickContext<'_>,
    ) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn on_move(&mut self, _ctx: &mut TickContext<'_>) {}

    /// Called once per side the agent is touching or past, in the order
    /// top, left, bottom, right. `boundary` is that side's coordinate.
    fn on_edge(&mut self, _side: Side, _boundary: f32, _ctx: &mut TickContext<'_>) {}

    fn on_draw(&self, _surface: &mut dyn DrawSurface) {}

    fn exposure(&mut self) -> Option<&mut Exposure> {
        None
    }

    /// Short name used in log lines.
    fn label(&self) -> &'static str {
        "agent"
    }
}
