//! Config and snapshot files.
//!
//! Snapshots ending in `.json` are stored as pretty JSON, anything else as
//! bincode.

use anyhow::{Context, Result};
use ecosim_core::SimulationConfig;
use ecosim_world::{World, WorldSnapshot};
use std::path::Path;

pub fn load_config(path: &Path) -> Result<SimulationConfig> {
    SimulationConfig::from_file(path)
        .with_context(|| format!("failed to load config {}", path.display()))
}

pub fn save_world(world: &World, path: &Path) -> Result<()> {
    world
        .snapshot()
        .save(path)
        .with_context(|| format!("failed to write snapshot {}", path.display()))
}

pub fn load_world(path: &Path) -> Result<World> {
    let snapshot = WorldSnapshot::load(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    World::from_snapshot(snapshot)
        .with_context(|| format!("failed to restore snapshot {}", path.display()))
}
