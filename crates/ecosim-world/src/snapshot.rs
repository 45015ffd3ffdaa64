//! Save and restore complete world state.

use crate::grid::Grid;
use crate::log::EventLog;
use crate::organism::Organism;
use crate::rng::Dice;
use crate::world::{check_dimensions, World};
use ecosim_core::{Error, OrganismId, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

pub const SNAPSHOT_VERSION: u32 = 1;

/// Everything needed to continue a world exactly where it stopped.
///
/// The grid is not stored; it is rebuilt from the dimensions and organisms
/// are re-linked to tiles by their stored index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub version: u32,
    pub width: usize,
    pub height: usize,
    pub time: u64,
    pub next_id: u64,
    pub human: Option<OrganismId>,
    pub organisms: Vec<Organism>,
    pub dice: Dice,
}

impl WorldSnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Self = serde_json::from_str(json)?;
        snapshot.check_version()?;
        Ok(snapshot)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let snapshot: Self = bincode::deserialize(bytes)?;
        snapshot.check_version()?;
        Ok(snapshot)
    }

    /// Write to `path` as pretty JSON for a `.json` extension, bincode otherwise.
    pub fn save(&self, path: &Path) -> Result<()> {
        let bytes = if is_json(path) {
            self.to_json()?.into_bytes()
        } else {
            self.to_bytes()?
        };
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Read a file written by [`WorldSnapshot::save`].
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        if is_json(path) {
            let json = std::str::from_utf8(&bytes)
                .map_err(|err| Error::Serialization(err.to_string()))?;
            Self::from_json(json)
        } else {
            Self::from_bytes(&bytes)
        }
    }

    fn check_version(&self) -> Result<()> {
        if self.version != SNAPSHOT_VERSION {
            return Err(Error::InvalidState(format!(
                "unsupported snapshot version {} (expected {SNAPSHOT_VERSION})",
                self.version
            )));
        }
        Ok(())
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

impl World {
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            version: SNAPSHOT_VERSION,
            width: self.width(),
            height: self.height(),
            time: self.time,
            next_id: self.next_id,
            human: self.human,
            organisms: self.organisms(),
            dice: self.dice.clone(),
        }
    }

    pub fn from_snapshot(snapshot: WorldSnapshot) -> Result<Self> {
        snapshot.check_version()?;
        check_dimensions(snapshot.width, snapshot.height)?;

        let mut world = World {
            grid: Grid::new(snapshot.width, snapshot.height),
            organisms: HashMap::new(),
            roster: Vec::new(),
            logs: EventLog::default(),
            human: None,
            dice: snapshot.dice,
            time: snapshot.time,
            next_id: snapshot.next_id,
        };
        world.set_organisms(snapshot.organisms)?;

        if let Some(id) = snapshot.human {
            world.set_human(id)?;
        }

        info!(
            time = world.time,
            organisms = world.organism_count(),
            "World restored from snapshot"
        );
        Ok(world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecosim_core::{Kind, SimulationRules, TileId};

    fn busy_world() -> World {
        let mut world = World::new(8, 8, 21);
        world.spread_organisms(Kind::Human, 1);
        world.spread_organisms(Kind::Wolf, 3);
        world.spread_organisms(Kind::Sheep, 6);
        world.spread_organisms(Kind::Grass, 4);
        world
    }

    #[test]
    fn test_restored_world_continues_identically() {
        let rules = SimulationRules::default();
        let mut original = busy_world();
        for _ in 0..5 {
            original.simulate(&rules);
        }

        let mut restored = World::from_snapshot(original.snapshot()).unwrap();
        assert_eq!(restored.snapshot(), original.snapshot());

        for _ in 0..10 {
            original.simulate(&rules);
            restored.simulate(&rules);
            assert_eq!(original.logs(), restored.logs());
        }
        assert_eq!(original.snapshot(), restored.snapshot());
    }

    #[test]
    fn test_json_and_binary_encodings() {
        let snapshot = busy_world().snapshot();

        let json = snapshot.to_json().unwrap();
        assert_eq!(WorldSnapshot::from_json(&json).unwrap(), snapshot);

        let bytes = snapshot.to_bytes().unwrap();
        assert_eq!(WorldSnapshot::from_bytes(&bytes).unwrap(), snapshot);
    }

    #[test]
    fn test_files_pick_format_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = busy_world().snapshot();

        let json_path = dir.path().join("world.json");
        snapshot.save(&json_path).unwrap();
        let text = std::fs::read_to_string(&json_path).unwrap();
        assert!(text.contains("\"version\": 1"));
        assert_eq!(WorldSnapshot::load(&json_path).unwrap(), snapshot);

        let bin_path = dir.path().join("world.bin");
        snapshot.save(&bin_path).unwrap();
        assert_eq!(std::fs::read(&bin_path).unwrap(), snapshot.to_bytes().unwrap());
        assert_eq!(WorldSnapshot::load(&bin_path).unwrap(), snapshot);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            WorldSnapshot::load(&dir.path().join("absent.bin")),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn test_zero_sized_snapshot_is_rejected() {
        let mut snapshot = busy_world().snapshot();
        snapshot.width = 0;
        snapshot.organisms.clear();
        snapshot.human = None;
        assert!(matches!(
            World::from_snapshot(snapshot),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_version_mismatch_is_rejected() {
        let mut snapshot = busy_world().snapshot();
        snapshot.version = 99;
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(matches!(
            WorldSnapshot::from_json(&json),
            Err(Error::InvalidState(_))
        ));
    }

    #[test]
    fn test_out_of_bounds_tile_is_rejected() {
        let mut snapshot = busy_world().snapshot();
        snapshot.organisms[0].tile = TileId(10_000);
        assert!(World::from_snapshot(snapshot).is_err());
    }

    #[test]
    fn test_human_designation_survives() {
        let world = busy_world();
        let human = world.human().unwrap();
        let restored = World::from_snapshot(world.snapshot()).unwrap();
        assert_eq!(restored.human(), Some(human));
    }
}
