//! Antelope: keeps running after a quiet step and bolts from strangers.

use super::{animal, Behavior};
use crate::organism::Organism;
use crate::world::World;
use ecosim_core::{Kind, OrganismId, SimulationRules, TileId};

/// Percent chance to flee from a non-antelope encounter
const ESCAPE_CHANCE: u32 = 50;

pub(super) static BEHAVIOR: Behavior = Behavior {
    act,
    collision,
    react,
    construct: Organism::new,
};

fn act(world: &mut World, me: OrganismId, _rules: &SimulationRules) {
    animal::wander(world, me);
    if world.has_live_company(me) {
        return;
    }

    let Some((tile, came_from)) = world.organism(me).map(|o| (o.tile, o.previous_tile)) else {
        return;
    };
    let onward: Vec<TileId> = world
        .grid()
        .neighbors(tile)
        .into_iter()
        .filter(|&n| Some(n) != came_from)
        .collect();
    if let Some(dest) = world.dice().pick(&onward) {
        world.move_organism(me, dest);
    }
}

fn collision(world: &mut World, me: OrganismId, other: OrganismId, rules: &SimulationRules) {
    if world.kind_of(other) != Some(Kind::Antelope)
        && world.dice().chance(ESCAPE_CHANCE)
        && flee(world, me, other)
    {
        return;
    }
    animal::collision(world, me, other, rules);
}

fn react(world: &mut World, me: OrganismId, initiator: OrganismId, _rules: &SimulationRules) -> bool {
    if world.kind_of(initiator) == Some(Kind::Antelope) {
        return false;
    }
    world.dice().chance(ESCAPE_CHANCE) && flee(world, me, initiator)
}

fn flee(world: &mut World, me: OrganismId, from: OrganismId) -> bool {
    let Some(tile) = world.organism(me).map(|o| o.tile) else {
        return false;
    };
    let Some(dest) = world.random_free_neighbor(tile) else {
        return false;
    };
    world.move_organism(me, dest);
    let (me_label, from_label) = (world.label(me), world.label(from));
    world.log(format!("{me_label} escaped from {from_label}!"));
    true
}
