//! Configuration types for the simulation.

use crate::{Error, Kind, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// World configuration parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Width of the world grid
    pub width: usize,
    /// Height of the world grid
    pub height: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
        }
    }
}

/// Toggles read by the turn engine on every call to `simulate`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationRules {
    /// When false only the human-controlled organism acts
    pub ai_acts: bool,
    /// When false same-kind collisions never produce offspring and plants never spread
    pub ai_reproduces: bool,
}

impl Default for SimulationRules {
    fn default() -> Self {
        Self {
            ai_acts: true,
            ai_reproduces: true,
        }
    }
}

/// How many instances of a kind to scatter when populating a world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationEntry {
    pub kind: Kind,
    pub count: usize,
}

impl PopulationEntry {
    pub fn new(kind: Kind, count: usize) -> Self {
        Self { kind, count }
    }
}

/// One human plus three of every other species.
pub fn default_population() -> Vec<PopulationEntry> {
    Kind::ALL
        .iter()
        .map(|&kind| {
            let count = if kind == Kind::Human { 1 } else { 3 };
            PopulationEntry::new(kind, count)
        })
        .collect()
}

/// Simulation run configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of turns to run
    pub num_turns: u64,
    /// Random seed for reproducibility
    pub seed: u64,
    /// World configuration
    pub world: WorldConfig,
    /// Engine toggles
    pub rules: SimulationRules,
    /// Initial population, spread in order
    pub population: Vec<PopulationEntry>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_turns: 50,
            seed: 0,
            world: WorldConfig::default(),
            rules: SimulationRules::default(),
            population: default_population(),
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.world.width == 0 || self.world.height == 0 {
            return Err(Error::InvalidConfig(format!(
                "world must be at least 1x1, got {}x{}",
                self.world.width, self.world.height
            )));
        }

        let humans: usize = self
            .population
            .iter()
            .filter(|entry| entry.kind == Kind::Human)
            .map(|entry| entry.count)
            .sum();
        if humans > 1 {
            return Err(Error::InvalidConfig(format!(
                "at most one human may be placed, got {humans}"
            )));
        }

        Ok(())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configs() {
        let world_config = WorldConfig::default();
        assert_eq!(world_config.width, 20);
        assert_eq!(world_config.height, 20);

        let rules = SimulationRules::default();
        assert!(rules.ai_acts);
        assert!(rules.ai_reproduces);

        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.population.len(), Kind::ALL.len());
    }

    #[test]
    fn test_default_population_has_one_human() {
        let population = default_population();
        let human = population.iter().find(|e| e.kind == Kind::Human).unwrap();
        assert_eq!(human.count, 1);
        assert!(population
            .iter()
            .filter(|e| e.kind != Kind::Human)
            .all(|e| e.count == 3));
    }

    #[test]
    fn test_validation_rejects_empty_world() {
        let config = SimulationConfig {
            world: WorldConfig {
                width: 0,
                height: 5,
            },
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_validation_rejects_two_humans() {
        let config = SimulationConfig {
            population: vec![
                PopulationEntry::new(Kind::Human, 1),
                PopulationEntry::new(Kind::Human, 1),
            ],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SimulationConfig::from_json(r#"{"seed": 7, "world": {"width": 8}}"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.world.width, 8);
        assert_eq!(config.world.height, 20);
        assert_eq!(config.num_turns, 50);
        assert!(config.rules.ai_reproduces);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"num_turns": 12}"#).unwrap();
        assert_eq!(SimulationConfig::from_file(&path).unwrap().num_turns, 12);

        let missing = dir.path().join("missing.json");
        assert!(matches!(
            SimulationConfig::from_file(&missing),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn test_rules_serialization() {
        let rules = SimulationRules {
            ai_acts: false,
            ai_reproduces: true,
        };
        let json = serde_json::to_string(&rules).unwrap();
        let deserialized: SimulationRules = serde_json::from_str(&json).unwrap();
        assert_eq!(rules, deserialized);
    }
}
