//! Property-based tests for the turn engine.
//!
//! Whole populations are run for a number of turns and checked against the
//! laws every turn must uphold.

use proptest::prelude::*;
use std::collections::HashMap;

use ecosim_core::{
    default_population, Direction, OrganismId, SimulationConfig, SimulationRules, WorldConfig,
};
use ecosim_world::{check_invariants, World};

fn config(seed: u64, width: usize, height: usize) -> SimulationConfig {
    SimulationConfig {
        seed,
        world: WorldConfig { width, height },
        population: default_population(),
        ..SimulationConfig::default()
    }
}

/// (age, breed cooldown) of every organism alive before the turn
fn survivors_state(world: &World) -> HashMap<OrganismId, (u64, u32)> {
    world
        .iter()
        .map(|o| (o.id, (o.age, o.breed_cooldown)))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Two worlds built from the same seed stay identical turn by turn.
    #[test]
    fn prop_same_seed_same_history(
        seed in any::<u64>(),
        width in 3usize..12,
        height in 3usize..12,
        turns in 1usize..30
    ) {
        let rules = SimulationRules::default();
        let mut a = World::from_config(&config(seed, width, height)).unwrap();
        let mut b = World::from_config(&config(seed, width, height)).unwrap();
        prop_assert_eq!(a.snapshot(), b.snapshot());

        for _ in 0..turns {
            a.simulate(&rules);
            b.simulate(&rules);
            prop_assert_eq!(a.logs(), b.logs());
        }
        prop_assert_eq!(a.snapshot(), b.snapshot());
    }

    /// The world is consistent after every turn, whatever the human does.
    #[test]
    fn prop_invariants_hold_every_turn(
        seed in any::<u64>(),
        width in 2usize..10,
        height in 2usize..10,
        commands in prop::collection::vec((0usize..5, any::<bool>()), 1..40),
        ai_acts in any::<bool>(),
        ai_reproduces in any::<bool>()
    ) {
        let rules = SimulationRules { ai_acts, ai_reproduces };
        let mut world = World::from_config(&config(seed, width, height)).unwrap();
        prop_assert!(check_invariants(&world).is_empty());

        for (turn, (step, immortal)) in commands.into_iter().enumerate() {
            if let Some(&direction) = Direction::ALL.get(step) {
                world.command_human(direction);
            }
            if immortal {
                world.arm_immortality();
            }
            world.simulate(&rules);

            prop_assert_eq!(world.time(), turn as u64 + 1);
            let violations = check_invariants(&world);
            prop_assert!(violations.is_empty(), "turn {}: {:?}", turn + 1, violations);
            prop_assert!(world.iter().all(|o| o.is_alive() && !o.skipped));
        }
    }

    /// Survivors age by exactly one and cooldowns only tick down or restart from zero.
    #[test]
    fn prop_survivors_age_and_cool_down(
        seed in any::<u64>(),
        turns in 1usize..25
    ) {
        let rules = SimulationRules::default();
        let mut world = World::from_config(&config(seed, 8, 8)).unwrap();

        for _ in 0..turns {
            let before = survivors_state(&world);
            world.simulate(&rules);

            for organism in world.iter() {
                match before.get(&organism.id) {
                    Some(&(age, cooldown)) => {
                        prop_assert_eq!(organism.age, age + 1);
                        if cooldown > 0 {
                            prop_assert_eq!(organism.breed_cooldown, cooldown - 1);
                        } else {
                            prop_assert!(organism.breed_cooldown == 0 || organism.breed_cooldown == 5);
                        }
                    }
                    None => {
                        prop_assert_eq!(organism.age, 0);
                        prop_assert_eq!(organism.birth_turn, world.time());
                    }
                }
            }
        }
    }

    /// Snapshots taken mid-run resume into the same future.
    #[test]
    fn prop_snapshot_resume_matches(
        seed in any::<u64>(),
        before in 0usize..10,
        after in 1usize..10
    ) {
        let rules = SimulationRules::default();
        let mut original = World::from_config(&config(seed, 7, 7)).unwrap();
        for _ in 0..before {
            original.simulate(&rules);
        }

        let bytes = original.snapshot().to_bytes().unwrap();
        let snapshot = ecosim_world::WorldSnapshot::from_bytes(&bytes).unwrap();
        let mut resumed = World::from_snapshot(snapshot).unwrap();

        for _ in 0..after {
            original.simulate(&rules);
            resumed.simulate(&rules);
            prop_assert_eq!(original.logs(), resumed.logs());
        }
        prop_assert_eq!(original.snapshot(), resumed.snapshot());
    }
}

#[test]
fn test_default_config_runs_to_completion() {
    let config = SimulationConfig::default();
    let mut world = World::from_config(&config).unwrap();
    let rules = config.rules;

    for _ in 0..config.num_turns {
        world.simulate(&rules);
        assert!(check_invariants(&world).is_empty());
    }
    assert_eq!(world.time(), config.num_turns);
}
