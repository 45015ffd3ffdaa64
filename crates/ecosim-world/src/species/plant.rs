//! Plants: never move, spread onto free neighbors, and some bite back.

use super::{animal, Behavior};
use crate::organism::Organism;
use crate::world::World;
use ecosim_core::{OrganismId, SimulationRules};
use tracing::trace;

/// Power an animal gains by eating guarana
const GUARANA_BOOST: i32 = 3;
/// Spread attempts milkweed makes per turn
const MILKWEED_ATTEMPTS: usize = 3;

const PLANT: Behavior = Behavior {
    act,
    collision,
    react: super::no_reaction,
    construct: Organism::new,
};

pub(super) static BEHAVIOR: Behavior = PLANT;

pub(super) static GUARANA: Behavior = Behavior {
    react: guarana_react,
    ..PLANT
};

pub(super) static WOLF_BERRIES: Behavior = Behavior {
    react: poisonous_react,
    ..PLANT
};

pub(super) static MILKWEED: Behavior = Behavior {
    act: milkweed_act,
    ..PLANT
};

pub(super) static HOGWEED: Behavior = Behavior {
    act: hogweed_act,
    react: poisonous_react,
    ..PLANT
};

fn act(world: &mut World, me: OrganismId, rules: &SimulationRules) {
    spread(world, me, rules);
}

/// Plants never move, so this only runs if something lands on them by other means.
fn collision(world: &mut World, me: OrganismId, other: OrganismId, _rules: &SimulationRules) {
    if world.kind_of(me) != world.kind_of(other) {
        animal::fight(world, me, other);
    }
}

/// One spread attempt at the kind's chance onto a random free neighbor.
fn spread(world: &mut World, me: OrganismId, rules: &SimulationRules) -> Option<OrganismId> {
    if !rules.ai_reproduces {
        return None;
    }
    let (kind, tile) = world.organism(me).map(|o| (o.kind, o.tile))?;
    if !world.dice().chance(kind.profile().spread_chance) {
        return None;
    }
    let dest = world.random_free_neighbor(tile)?;

    let sprout = world.spawn_offspring(kind, dest);
    trace!(parent = ?me, sprout = ?sprout, "plant spread");
    let (me_label, sprout_label) = (world.label(me), world.label(sprout));
    world.log(format!("{me_label} spread as {sprout_label}"));
    Some(sprout)
}

fn milkweed_act(world: &mut World, me: OrganismId, rules: &SimulationRules) {
    for _ in 0..MILKWEED_ATTEMPTS {
        spread(world, me, rules);
    }
}

/// Burns every mortal animal next to it, then spreads.
fn hogweed_act(world: &mut World, me: OrganismId, rules: &SimulationRules) {
    let Some(tile) = world.organism(me).map(|o| o.tile) else {
        return;
    };
    let victims: Vec<OrganismId> = world
        .grid()
        .neighbors(tile)
        .into_iter()
        .flat_map(|n| world.grid().tile(n).residents().to_vec())
        .filter(|&id| {
            world
                .organism(id)
                .is_some_and(|o| o.is_alive() && o.kind.is_animal() && !o.is_immortal())
        })
        .collect();

    let me_label = world.label(me);
    for victim in victims {
        let victim_label = world.label(victim);
        world.kill(victim);
        world.log(format!("{victim_label} was burned by {me_label}!"));
    }

    spread(world, me, rules);
}

fn guarana_react(world: &mut World, me: OrganismId, eater: OrganismId, _rules: &SimulationRules) -> bool {
    let Some(eater_state) = world.organism_mut(eater) else {
        return false;
    };
    eater_state.power += GUARANA_BOOST;
    let power = eater_state.power;

    world.kill(me);
    let (me_label, eater_label) = (world.label(me), world.label(eater));
    world.log(format!("{eater_label} ate {me_label} and grew stronger (power {power})!"));
    true
}

fn poisonous_react(world: &mut World, me: OrganismId, eater: OrganismId, _rules: &SimulationRules) -> bool {
    let (me_label, eater_label) = (world.label(me), world.label(eater));
    world.kill(eater);
    world.kill(me);
    world.log(format!("{eater_label} ate {me_label} and was killed!"));
    true
}
