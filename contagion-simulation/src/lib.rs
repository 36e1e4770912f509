//! The party: susceptible and contagious people wandering a room, the room
//! itself, and the overlay that reports how far the infection has spread.

pub mod backdrop;
pub mod heading;
pub mod person;
pub mod policy;
pub mod scene;
pub mod spawn;

#[cfg(test)]
mod testing;

pub use backdrop::Backdrop;
pub use heading::{Heading, Walker, STEP};
pub use person::{Contagious, Susceptible, CONTACT_RANGE};
pub use policy::{MaskTable, TransmissionPolicy};
pub use scene::{draw_person, draw_room, Census, PartyScene, STATS_PANEL_HEIGHT};
pub use spawn::{populate, spawn_cohort, Cohort};
