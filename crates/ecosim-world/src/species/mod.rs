//! Per-kind behavior tables.
//!
//! Every [`Kind`] maps to a static [`Behavior`] holding its four operations.
//! The turn engine only ever dispatches through [`behavior`]; variants reuse
//! the animal and plant defaults and override the entries they need.

mod animal;
mod antelope;
mod fox;
mod human;
mod plant;
mod turtle;


use crate::organism::Organism;
use crate::world::World;
use ecosim_core::{Kind, OrganismId, SimulationRules};

/// `act(world, me, rules)`
pub(crate) type ActFn = fn(&mut World, OrganismId, &SimulationRules);
/// `collision(world, mover, other, rules)`
pub(crate) type CollisionFn = fn(&mut World, OrganismId, OrganismId, &SimulationRules);
/// `react(world, me, initiator, rules)`; true when the encounter is settled
pub(crate) type ReactFn = fn(&mut World, OrganismId, OrganismId, &SimulationRules) -> bool;
pub(crate) type ConstructFn = fn(Kind) -> Organism;

pub(crate) struct Behavior {
    pub act: ActFn,
    pub collision: CollisionFn,
    pub react: ReactFn,
    pub construct: ConstructFn,
}

pub(crate) fn behavior(kind: Kind) -> &'static Behavior {
    match kind {
        Kind::Wolf | Kind::Sheep => &animal::BEHAVIOR,
        Kind::Human => &human::BEHAVIOR,
        Kind::Fox => &fox::BEHAVIOR,
        Kind::Turtle => &turtle::BEHAVIOR,
        Kind::Antelope => &antelope::BEHAVIOR,
        Kind::Grass => &plant::BEHAVIOR,
        Kind::Guarana => &plant::GUARANA,
        Kind::WolfBerries => &plant::WOLF_BERRIES,
        Kind::Milkweed => &plant::MILKWEED,
        Kind::SosnowskyHogweed => &plant::HOGWEED,
    }
}

/// Fresh instance of `kind` through its factory entry
pub(crate) fn construct(kind: Kind) -> Organism {
    (behavior(kind).construct)(kind)
}

/// Ask `me` whether it settles an encounter started by `initiator`
pub(crate) fn react(
    world: &mut World,
    me: OrganismId,
    initiator: OrganismId,
    rules: &SimulationRules,
) -> bool {
    match world.kind_of(me) {
        Some(kind) => (behavior(kind).react)(world, me, initiator, rules),
        None => false,
    }
}

fn no_reaction(_: &mut World, _: OrganismId, _: OrganismId, _: &SimulationRules) -> bool {
    false
}
