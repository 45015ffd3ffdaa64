//! Fox: smells danger and never steps next to a fight it would lose.

use super::{animal, Behavior};
use crate::organism::Organism;
use crate::world::World;
use ecosim_core::{OrganismId, SimulationRules, TileId};

pub(super) static BEHAVIOR: Behavior = Behavior {
    act,
    collision: animal::collision,
    react: super::no_reaction,
    construct: Organism::new,
};

fn act(world: &mut World, me: OrganismId, _rules: &SimulationRules) {
    let Some(fox) = world.organism(me) else {
        return;
    };
    let (tile, kind, power) = (fox.tile, fox.kind, fox.power);

    let safe: Vec<TileId> = world
        .grid()
        .neighbors(tile)
        .into_iter()
        .filter(|&n| {
            world.grid().tile(n).residents().iter().all(|&id| {
                world
                    .organism(id)
                    .map_or(true, |o| o.is_dead() || o.kind == kind || o.power < power)
            })
        })
        .collect();

    if let Some(dest) = world.dice().pick(&safe) {
        world.move_organism(me, dest);
    }
}
