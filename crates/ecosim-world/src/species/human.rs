//! Human: moves only on command and can turn immortal for a few turns.

use super::{animal, Behavior};
use crate::organism::Organism;
use crate::world::World;
use ecosim_core::{OrganismId, SimulationRules};

pub(super) static BEHAVIOR: Behavior = Behavior {
    act,
    collision,
    react,
    construct: Organism::new,
};

fn act(world: &mut World, me: OrganismId, _rules: &SimulationRules) {
    let Some(human) = world.organism_mut(me) else {
        return;
    };
    let tile = human.tile;
    let next_move = human.controls.as_mut().and_then(|controls| {
        controls.immortality.begin_turn();
        controls.next_move.take()
    });

    if let Some(dest) = next_move.and_then(|dir| world.grid().neighbor(tile, dir)) {
        world.move_organism(me, dest);
    }
}

fn collision(world: &mut World, me: OrganismId, other: OrganismId, rules: &SimulationRules) {
    if !world.organism(me).is_some_and(Organism::is_immortal) {
        animal::collision(world, me, other, rules);
        return;
    }

    if !step_aside(world, me) {
        world.undo_move(me);
    }
    let (me_label, other_label) = (world.label(me), world.label(other));
    world.log(format!("{me_label} is immortal and slipped past {other_label}"));
}

fn react(world: &mut World, me: OrganismId, initiator: OrganismId, _rules: &SimulationRules) -> bool {
    if !world.organism(me).is_some_and(Organism::is_immortal) {
        return false;
    }
    if !step_aside(world, me) && !world.undo_move(initiator) {
        return false;
    }
    let (me_label, initiator_label) = (world.label(me), world.label(initiator));
    world.log(format!("{me_label} is immortal and avoided {initiator_label}"));
    true
}

fn step_aside(world: &mut World, me: OrganismId) -> bool {
    let Some(tile) = world.organism(me).map(|o| o.tile) else {
        return false;
    };
    match world.random_free_neighbor(tile) {
        Some(dest) => {
            world.move_organism(me, dest);
            true
        }
        None => false,
    }
}
