//! Organism state and management.

use crate::ability::Immortality;
use ecosim_core::{Direction, Kind, OrganismId, TileId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pending command and ability state of the human-controlled organism
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HumanControls {
    pub next_move: Option<Direction>,
    pub immortality: Immortality,
}

/// An organism in the simulation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organism {
    /// Assigned by the world when the organism is added
    pub id: OrganismId,
    pub kind: Kind,
    pub power: i32,
    pub initiative: i32,
    pub age: u64,
    pub alive: bool,
    pub skipped: bool,
    pub breed_cooldown: u32,
    /// Assigned by the world when the organism is added
    pub tile: TileId,
    /// Tile left by the last move this turn, used to undo it
    pub previous_tile: Option<TileId>,
    pub birth_turn: u64,
    /// The cooldown was set this turn and must not tick down at cleanup
    #[serde(default)]
    pub cooldown_fresh: bool,
    #[serde(default)]
    pub controls: Option<HumanControls>,
}

impl Organism {
    /// Fresh instance of `kind`, not yet placed in any world
    pub fn new(kind: Kind) -> Self {
        let profile = kind.profile();
        Self {
            id: OrganismId::default(),
            kind,
            power: profile.power,
            initiative: profile.initiative,
            age: 0,
            alive: true,
            skipped: false,
            breed_cooldown: 0,
            tile: TileId::default(),
            previous_tile: None,
            birth_turn: 0,
            cooldown_fresh: false,
            controls: (kind == Kind::Human).then(HumanControls::default),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn is_dead(&self) -> bool {
        !self.alive
    }

    pub fn set_breed_cooldown(&mut self, turns: u32) {
        self.breed_cooldown = turns;
        self.cooldown_fresh = true;
    }

    pub fn is_immortal(&self) -> bool {
        self.controls
            .map(|c| c.immortality.is_active())
            .unwrap_or(false)
    }

    /// End-of-turn bookkeeping for a survivor
    pub(crate) fn end_turn(&mut self, turn: u64) {
        if self.birth_turn != turn {
            self.age += 1;
        }
        if !self.cooldown_fresh {
            self.breed_cooldown = self.breed_cooldown.saturating_sub(1);
        }
        self.cooldown_fresh = false;
        self.skipped = false;
        self.previous_tile = None;
    }
}

impl fmt::Display for Organism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.kind, self.id)
    }
}
