//! World simulation engine.
//!
//! A grid of linked tiles populated by animals and plants. Each call to
//! [`World::simulate`] runs one turn: organisms act in initiative order,
//! collisions between tile-mates are resolved by per-species rules, and the
//! dead are purged before survivors age.

pub mod ability;
pub mod grid;
pub mod invariants;
pub mod log;
pub mod organism;
pub mod rng;
pub mod snapshot;
mod species;
pub mod world;

pub use ability::{AbilityStatus, Immortality};
pub use grid::{Grid, Tile};
pub use invariants::{check_invariants, InvariantViolation};
pub use log::EventLog;
pub use organism::{HumanControls, Organism};
pub use rng::Dice;
pub use snapshot::WorldSnapshot;
pub use world::World;
