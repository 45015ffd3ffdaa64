//! World invariants - sanity checks that detect engine bugs.
//!
//! These must hold between turns. A violation means the turn engine or a
//! species behavior left the world inconsistent.

use crate::world::World;
use ecosim_core::Kind;
use std::collections::HashSet;

/// Invariant violation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

fn violation(message: String) -> InvariantViolation {
    InvariantViolation { message }
}

/// Check all world invariants.
///
/// Returns the violations found, or an empty list if everything holds.
#[must_use]
pub fn check_invariants(world: &World) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let grid = world.grid();

    let roster: HashSet<_> = world.roster().iter().copied().collect();
    if roster.len() != world.roster().len() {
        violations.push(violation("roster lists an organism twice".to_string()));
    }

    for &id in world.roster() {
        let Some(organism) = world.organism(id) else {
            violations.push(violation(format!("roster entry {id} has no organism")));
            continue;
        };
        if organism.is_dead() {
            violations.push(violation(format!("{organism} is dead but still listed")));
            continue;
        }
        match grid.get(organism.tile) {
            Some(tile) if tile.residents().contains(&id) => {}
            Some(_) => violations.push(violation(format!(
                "{organism} is not registered on tile {}",
                organism.tile
            ))),
            None => violations.push(violation(format!(
                "{organism} sits on tile {} outside the grid",
                organism.tile
            ))),
        }
    }

    for (position, tile) in grid.iter() {
        let alive = tile
            .residents()
            .iter()
            .filter(|&&id| world.is_alive(id))
            .count();
        if alive > 1 {
            violations.push(violation(format!(
                "tile {position:?} holds {alive} living organisms"
            )));
        }

        for &id in tile.residents() {
            if !roster.contains(&id) {
                violations.push(violation(format!(
                    "tile {position:?} lists unknown organism {id}"
                )));
            } else if world.organism(id).is_some_and(|o| o.tile != tile.id) {
                violations.push(violation(format!(
                    "organism {id} is listed on tile {position:?} but points elsewhere"
                )));
            }
        }
    }

    if let Some(id) = world.human() {
        if !world.is_alive(id) || world.kind_of(id) != Some(Kind::Human) {
            violations.push(violation(format!(
                "designated human {id} is not a living human"
            )));
        }
    }

    violations
}
