//! Turtle: mostly stays put and shrugs off weak attackers.

use super::{animal, Behavior};
use crate::organism::Organism;
use crate::world::World;
use ecosim_core::{Kind, OrganismId, SimulationRules};

/// Percent chance to skip moving on a turn
const STAY_CHANCE: u32 = 75;
/// Attackers weaker than this are pushed back to where they came from
const SHELL_STRENGTH: i32 = 5;

pub(super) static BEHAVIOR: Behavior = Behavior {
    act,
    collision: animal::collision,
    react,
    construct: Organism::new,
};

fn act(world: &mut World, me: OrganismId, _rules: &SimulationRules) {
    if world.dice().chance(STAY_CHANCE) {
        return;
    }
    animal::wander(world, me);
}

fn react(world: &mut World, me: OrganismId, initiator: OrganismId, _rules: &SimulationRules) -> bool {
    let Some(attacker) = world.organism(initiator) else {
        return false;
    };
    if attacker.kind == Kind::Turtle || attacker.power >= SHELL_STRENGTH {
        return false;
    }
    if !world.undo_move(initiator) {
        return false;
    }
    let (me_label, attacker_label) = (world.label(me), world.label(initiator));
    world.log(format!("{me_label} fended off {attacker_label}!"));
    true
}
