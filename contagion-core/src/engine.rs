//! The tick pipeline.
//!
//! A tick is always `nearby -> move -> edge -> commit -> render`. The first
//! three phases walk the active set as it stood when the tick began; anything
//! hooks add or remove is queued and only applied by the commit.

use log::{debug, trace, warn};
use rand::RngCore;

use crate::agent::Agent;
use crate::context::{Tally, TickContext};
use crate::edge::{touching_sides, Bounds};
use crate::error::{EngineError, RegistryError};
use crate::options::EngineOptions;
use crate::proximity::{self, pairwise_events, Body, Delivery};
use crate::registry::{CommitSummary, EntityId, Registry};
use crate::surface::{DrawSurface, Overlay};

/// How a call to [`Engine::tick`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// All phases ran and a frame was presented.
    Rendered,
    /// The game was already over; nothing ran.
    Halted,
    /// The phases ran but the render target was gone, so the game is now over.
    TornDown,
}

pub struct Engine {
    registry: Registry,
    options: EngineOptions,
    bounds: Bounds,
    frame_rate: u32,
    rng: Box<dyn RngCore>,
    tally: Tally,
    tick: u64,
    game_over: bool,
}

impl Engine {
    pub fn new(
        bounds: Bounds,
        frame_rate: u32,
        options: EngineOptions,
        rng: Box<dyn RngCore>,
    ) -> Self {
        Engine {
            registry: Registry::new(),
            options,
            bounds,
            frame_rate,
            rng,
            tally: Tally::default(),
            tick: 0,
            game_over: false,
        }
    }

    pub fn add(&mut self, agent: Box<dyn Agent>) -> EntityId {
        self.registry.add(agent)
    }

    pub fn remove(&mut self, id: EntityId) -> Result<(), EngineError> {
        Ok(self.registry.remove(id)?)
    }

    /// Queue `count` agents built by `make`, which may draw from the engine's
    /// random source. They become active at the next commit.
    pub fn spawn<F>(&mut self, count: usize, mut make: F) -> Vec<EntityId>
    where
        F: FnMut(&mut dyn RngCore) -> Box<dyn Agent>,
    {
        let mut ids = Vec::with_capacity(count);
        for _ in 0..count {
            let agent = make(self.rng.as_mut());
            ids.push(self.registry.add(agent));
        }
        ids
    }

    /// Run the full tick sequence, including render.
    pub fn tick(
        &mut self,
        surface: &mut dyn DrawSurface,
        overlay: &dyn Overlay,
    ) -> Result<TickOutcome, EngineError> {
        if self.game_over {
            return Ok(TickOutcome::Halted);
        }
        self.step()?;
        if self.render(surface, overlay) {
            Ok(TickOutcome::Rendered)
        } else {
            Ok(TickOutcome::TornDown)
        }
    }

    /// Run the simulation phases and the commit without rendering.
    pub fn step(&mut self) -> Result<CommitSummary, EngineError> {
        self.tally.begin_tick();
        let delivery = self.nearby_phase()?;
        self.move_phase()?;
        self.edge_phase()?;
        let summary = self.commit();
        trace!(
            "tick {}: {} proximity calls, {} early exits, {} newly affected",
            self.tick,
            delivery.delivered,
            delivery.early_exits,
            self.tally.affected_this_tick
        );
        self.tick += 1;
        Ok(summary)
    }

    pub fn nearby_phase(&mut self) -> Result<Delivery, EngineError> {
        let bodies: Vec<Body> = self
            .registry
            .active
            .iter()
            .map(|slot| Body::of(slot.agent.as_ref()))
            .collect();
        let events = pairwise_events(&bodies, self.options.account_for_radii_in_dist);
        let roster = self.registry.ids();

        let Registry { active, queue } = &mut self.registry;
        let mut ctx =
            TickContext::new(self.tick, self.rng.as_mut(), &mut self.tally, queue, &roster);
        Ok(proximity::deliver(active, &events, &mut ctx)?)
    }

    pub fn move_phase(&mut self) -> Result<(), EngineError> {
        let roster = self.registry.ids();
        let Registry { active, queue } = &mut self.registry;
        let mut ctx =
            TickContext::new(self.tick, self.rng.as_mut(), &mut self.tally, queue, &roster);

        for slot in active.iter_mut() {
            ctx.focus(slot.id, None);
            slot.agent.on_move(&mut ctx);
            check(&mut ctx)?;
        }
        Ok(())
    }

    pub fn edge_phase(&mut self) -> Result<(), EngineError> {
        let roster = self.registry.ids();
        let bounds = self.bounds;
        let Registry { active, queue } = &mut self.registry;
        let mut ctx =
            TickContext::new(self.tick, self.rng.as_mut(), &mut self.tally, queue, &roster);

        for slot in active.iter_mut() {
            let hits = touching_sides(slot.agent.position(), slot.agent.radius(), bounds);
            for (side, boundary) in hits {
                ctx.focus(slot.id, None);
                // Each call re-decides on its own; in a corner the last side wins.
                slot.agent.on_edge(side, boundary, &mut ctx);
                check(&mut ctx)?;
            }
        }
        Ok(())
    }

    pub fn commit(&mut self) -> CommitSummary {
        self.registry.commit()
    }

    /// Draw the current active set. Returns `false`, and ends the game, when
    /// the surface has already been torn down.
    pub fn render(&mut self, surface: &mut dyn DrawSurface, overlay: &dyn Overlay) -> bool {
        if surface.is_destroyed() {
            warn!("render target is gone after tick {}; stopping", self.tick);
            self.game_over = true;
            return false;
        }

        surface.clear();
        overlay.draw(surface, &self.tally);
        for (_, agent) in self.registry.iter() {
            agent.on_draw(surface);
        }
        surface.present_frame(self.frame_rate);
        true
    }

    pub fn set_game_over(&mut self) {
        if !self.game_over {
            debug!("game over set at tick {}", self.tick);
        }
        self.game_over = true;
    }

    pub fn is_over(&self) -> bool {
        self.game_over
    }

    /// Number of completed ticks.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn tally(&self) -> &Tally {
        &self.tally
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }
}

fn check(ctx: &mut TickContext<'_>) -> Result<(), RegistryError> {
    match ctx.take_violation() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
