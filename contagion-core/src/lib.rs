//! Tick-based 2D agent simulation engine.
//!
//! Agents live in a [`Registry`] and are driven by the [`Engine`] through a
//! fixed sequence each tick: proximity, move, edge, commit, render. Agents
//! only reach the engine through the [`TickContext`] handed to their hooks,
//! and any add/remove they request is deferred to the commit.

pub mod agent;
pub mod context;
pub mod edge;
pub mod engine;
pub mod error;
pub mod options;
pub mod proximity;
pub mod registry;
pub mod surface;

#[cfg(test)]
mod testing;

pub use agent::{Agent, Exposure};
pub use context::{Tally, TickContext};
pub use edge::{touching_sides, Bounds, Side};
pub use engine::{Engine, TickOutcome};
pub use error::{EngineError, RegistryError};
pub use options::{EngineOptions, ACCOUNT_FOR_RADII_IN_DIST};
pub use proximity::{pairwise_events, Body, Delivery, ProximityEvent};
pub use registry::{CommitSummary, EntityId, Membership, Registry};
pub use surface::{Color, DrawSurface, NoOverlay, Overlay};

pub use glam::Vec2;
