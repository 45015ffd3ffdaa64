//! Default animal behavior: random walk, then breed with kin or fight strangers.

use super::Behavior;
use crate::organism::Organism;
use crate::world::World;
use ecosim_core::{OrganismId, SimulationRules};
use tracing::trace;

/// Cooldown given to both parents after breeding
pub(crate) const PARENT_COOLDOWN: u32 = 5;
/// Cooldown a newborn animal starts with
pub(crate) const NEWBORN_COOLDOWN: u32 = 10;

pub(super) static BEHAVIOR: Behavior = Behavior {
    act,
    collision,
    react: super::no_reaction,
    construct: Organism::new,
};

pub(super) fn act(world: &mut World, me: OrganismId, _rules: &SimulationRules) {
    wander(world, me);
}

/// Step onto a uniformly random neighbor. Returns false when there is none.
pub(super) fn wander(world: &mut World, me: OrganismId) -> bool {
    let Some(tile) = world.organism(me).map(|o| o.tile) else {
        return false;
    };
    match world.random_neighbor(tile) {
        Some(dest) => {
            world.move_organism(me, dest);
            true
        }
        None => false,
    }
}

pub(super) fn collision(
    world: &mut World,
    me: OrganismId,
    other: OrganismId,
    rules: &SimulationRules,
) {
    if super::react(world, other, me, rules) {
        return;
    }
    resolve(world, me, other, rules);
}

/// Standard resolution once `other` has declined to react
pub(super) fn resolve(
    world: &mut World,
    me: OrganismId,
    other: OrganismId,
    rules: &SimulationRules,
) {
    if world.kind_of(me) == world.kind_of(other) {
        meet_kin(world, me, other, rules);
    } else {
        fight(world, me, other);
    }
}

fn meet_kin(world: &mut World, me: OrganismId, other: OrganismId, rules: &SimulationRules) {
    world.undo_move(me);
    let (me_label, other_label) = (world.label(me), world.label(other));

    if !rules.ai_reproduces {
        world.log(format!("{me_label} bumped into {other_label}"));
        return;
    }

    world.skip_turn(other);

    let (Some(a), Some(b)) = (world.organism(me), world.organism(other)) else {
        return;
    };
    if a.breed_cooldown > 0 || b.breed_cooldown > 0 {
        world.log(format!("{me_label} and {other_label} are not ready to breed"));
        return;
    }
    let (kind, nest) = (a.kind, b.tile);

    let Some(tile) = world.random_free_neighbor(nest) else {
        world.log(format!("{me_label} and {other_label} found no room for offspring"));
        return;
    };

    let child = world.spawn_offspring(kind, tile);
    for id in [me, other] {
        if let Some(parent) = world.organism_mut(id) {
            parent.set_breed_cooldown(PARENT_COOLDOWN);
        }
    }
    if let Some(newborn) = world.organism_mut(child) {
        newborn.set_breed_cooldown(NEWBORN_COOLDOWN);
    }

    trace!(parent = ?me, partner = ?other, child = ?child, "offspring born");
    let child_label = world.label(child);
    world.log(format!("{me_label} and {other_label} bred a new {child_label}!"));
}

/// Higher power wins; a tie goes against the mover.
pub(super) fn fight(world: &mut World, me: OrganismId, other: OrganismId) {
    let (Some(a), Some(b)) = (world.organism(me), world.organism(other)) else {
        return;
    };
    let mover_wins = a.power > b.power;
    let (me_label, other_label) = (world.label(me), world.label(other));

    if mover_wins {
        world.kill(other);
        world.log(format!("{me_label} killed {other_label}!"));
    } else {
        world.kill(me);
        world.log(format!("{me_label} was killed by {other_label}!"));
    }
}
