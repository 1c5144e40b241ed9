//! Core data model for the probe.
//!
//! These types represent what a mission is made of:
//! planets and their readings, the probe's resources, and the tasks it performs.

mod planet;
mod status;
mod task;

pub use planet::{Planet, PlanetReading};
pub use status::ProbeStatus;
pub use task::{TaskKind, TaskSelection};
