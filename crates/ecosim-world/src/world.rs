//! World state and the turn engine.

use crate::grid::{Grid, Tile};
use crate::log::EventLog;
use crate::organism::Organism;
use crate::rng::Dice;
use crate::species;
use ecosim_core::{
    Direction, Error, Kind, OrganismId, PopulationEntry, Result, SimulationConfig,
    SimulationRules, TileId,
};
use std::cmp::Reverse;
use std::collections::HashMap;
use tracing::{debug, info, trace};

#[derive(Debug, Clone)]
pub struct World {
    pub(crate) grid: Grid,
    pub(crate) organisms: HashMap<OrganismId, Organism>,
    /// Acting order, re-sorted every turn
    pub(crate) roster: Vec<OrganismId>,
    pub(crate) logs: EventLog,
    pub(crate) human: Option<OrganismId>,
    pub(crate) dice: Dice,
    pub(crate) time: u64,
    pub(crate) next_id: u64,
}

/// Both dimensions must be non-zero
pub(crate) fn check_dimensions(width: usize, height: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidConfig(format!(
            "world must be at least 1x1, got {width}x{height}"
        )));
    }
    Ok(())
}

impl World {
    /// # Panics
    ///
    /// Panics if either dimension is zero; [`World::from_config`] and
    /// [`World::set_world`] reject that with an error instead.
    pub fn new(width: usize, height: usize, seed: u64) -> Self {
        Self {
            grid: Grid::new(width, height),
            organisms: HashMap::new(),
            roster: Vec::new(),
            logs: EventLog::default(),
            human: None,
            dice: Dice::seeded(seed),
            time: 0,
            next_id: 1,
        }
    }

    /// Build and populate a world from a validated configuration
    pub fn from_config(config: &SimulationConfig) -> Result<Self> {
        config.validate()?;
        let mut world = Self::new(config.world.width, config.world.height, config.seed);
        world.populate(&config.population);
        Ok(world)
    }

    pub fn width(&self) -> usize {
        self.grid.width
    }

    pub fn height(&self) -> usize {
        self.grid.height
    }

    /// Number of turns simulated since the last reset
    pub fn time(&self) -> u64 {
        self.time
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn tile(&self, x: usize, y: usize) -> Option<&Tile> {
        self.grid.tile_id(x, y).map(|id| self.grid.tile(id))
    }

    pub fn tile_at(&self, index: usize) -> Option<&Tile> {
        self.grid.get(TileId(index))
    }

    /// Living occupant of the tile at `(x, y)`, if any
    pub fn organism_at(&self, x: usize, y: usize) -> Option<&Organism> {
        self.tile(x, y)?
            .residents()
            .iter()
            .filter_map(|id| self.organisms.get(id))
            .find(|o| o.is_alive())
    }

    pub fn organism(&self, id: OrganismId) -> Option<&Organism> {
        self.organisms.get(&id)
    }

    pub(crate) fn organism_mut(&mut self, id: OrganismId) -> Option<&mut Organism> {
        self.organisms.get_mut(&id)
    }

    pub fn is_alive(&self, id: OrganismId) -> bool {
        self.organism(id).is_some_and(Organism::is_alive)
    }

    pub fn kind_of(&self, id: OrganismId) -> Option<Kind> {
        self.organism(id).map(|o| o.kind)
    }

    /// Organisms in acting order
    pub fn iter(&self) -> impl Iterator<Item = &Organism> + '_ {
        self.roster.iter().filter_map(|id| self.organisms.get(id))
    }

    pub fn roster(&self) -> &[OrganismId] {
        &self.roster
    }

    /// Copies of every organism in acting order
    pub fn organisms(&self) -> Vec<Organism> {
        self.iter().cloned().collect()
    }

    pub fn organism_count(&self) -> usize {
        self.roster.len()
    }

    /// Events of the most recent turn
    pub fn logs(&self) -> &[String] {
        self.logs.entries()
    }

    pub fn human(&self) -> Option<OrganismId> {
        self.human
    }

    pub fn human_organism(&self) -> Option<&Organism> {
        self.human.and_then(|id| self.organism(id))
    }

    pub fn has_human(&self) -> bool {
        self.human.is_some()
    }

    /// Designate the human-controlled organism. Only a living human qualifies.
    pub fn set_human(&mut self, id: OrganismId) -> Result<()> {
        let Some(organism) = self.organism(id) else {
            return Err(Error::NotFound(format!("organism {id}")));
        };
        if organism.kind != Kind::Human || organism.is_dead() {
            return Err(Error::InvalidState(format!(
                "{organism} cannot be human-controlled"
            )));
        }
        self.human = Some(id);
        Ok(())
    }

    pub fn find_human(&self) -> Option<OrganismId> {
        self.iter()
            .find(|o| o.kind == Kind::Human && o.is_alive())
            .map(|o| o.id)
    }

    /// Queue the human's next step. Returns false without a human.
    pub fn command_human(&mut self, direction: Direction) -> bool {
        let Some(id) = self.human else {
            return false;
        };
        match self.organism_mut(id).and_then(|o| o.controls.as_mut()) {
            Some(controls) => {
                controls.next_move = Some(direction);
                true
            }
            None => false,
        }
    }

    /// Arm the human's immortality for its next action. False when unavailable.
    pub fn arm_immortality(&mut self) -> bool {
        let Some(id) = self.human else {
            return false;
        };
        self.organism_mut(id)
            .and_then(|o| o.controls.as_mut())
            .is_some_and(|controls| controls.immortality.arm())
    }

    /// Place an organism on a free tile of this world.
    pub fn add_organism(&mut self, organism: Organism, tile: TileId) -> Result<OrganismId> {
        let Some(target) = self.grid.get(tile) else {
            return Err(Error::InvalidState(format!("tile {tile} is outside the grid")));
        };
        if !target.is_free() {
            return Err(Error::InvalidState(format!("tile {tile} is occupied")));
        }
        let id = self.insert(organism, tile);
        if self.kind_of(id) == Some(Kind::Human) && self.human.is_none() {
            self.human = Some(id);
        }
        Ok(id)
    }

    /// Assign an id, stamp the birth turn, and register on `tile` and the roster
    fn insert(&mut self, mut organism: Organism, tile: TileId) -> OrganismId {
        let id = OrganismId(self.next_id);
        self.next_id += 1;

        organism.id = id;
        organism.tile = tile;
        organism.previous_tile = None;
        organism.birth_turn = self.time;

        self.grid.place(tile, id);
        self.roster.push(id);
        self.organisms.insert(id, organism);
        id
    }

    /// Scatter `count` fresh instances of `kind` over random free tiles.
    ///
    /// Stops early once the board is full. Returns the ids actually placed.
    pub fn spread_organisms(&mut self, kind: Kind, count: usize) -> Vec<OrganismId> {
        let mut placed = Vec::with_capacity(count);
        while placed.len() < count {
            let free = self.grid.free_tiles();
            let Some(tile) = self.dice.pick(&free) else {
                debug!(kind = %kind, requested = count, placed = placed.len(), "board full");
                break;
            };
            let id = self.insert(species::construct(kind), tile);
            if kind == Kind::Human && self.human.is_none() {
                self.human = Some(id);
            }
            placed.push(id);
        }
        placed
    }

    /// Reset, then spread each entry in order
    pub fn populate(&mut self, population: &[PopulationEntry]) {
        self.reset();
        for entry in population {
            self.spread_organisms(entry.kind, entry.count);
        }
        info!(
            width = self.width(),
            height = self.height(),
            organisms = self.organism_count(),
            has_human = self.has_human(),
            "World populated"
        );
    }

    /// Drop every organism, empty the tiles, clear logs, and rewind time.
    pub fn reset(&mut self) {
        self.organisms.clear();
        self.roster.clear();
        self.human = None;
        self.grid.clear_occupancy();
        self.logs.clear();
        self.time = 0;
    }

    /// Rebuild the grid with new dimensions and set the clock.
    ///
    /// Organisms are dropped; restore them with [`World::set_organisms`].
    pub fn set_world(&mut self, width: usize, height: usize, time: u64) -> Result<()> {
        check_dimensions(width, height)?;
        self.organisms.clear();
        self.roster.clear();
        self.human = None;
        self.grid = Grid::new(width, height);
        self.time = time;
        Ok(())
    }

    /// Replace the population with `organisms`, keeping their ids and tiles.
    ///
    /// On error the world is left empty.
    pub fn set_organisms(&mut self, organisms: Vec<Organism>) -> Result<()> {
        self.organisms.clear();
        self.roster.clear();
        self.human = None;

        for organism in organisms {
            let id = organism.id;
            if self.organisms.insert(id, organism).is_some() {
                self.organisms.clear();
                self.roster.clear();
                return Err(Error::InvalidState(format!("duplicate organism id {id}")));
            }
            self.roster.push(id);
            self.next_id = self.next_id.max(id.0 + 1);
        }

        if let Err(err) = self.link_organisms_with_tiles() {
            self.organisms.clear();
            self.roster.clear();
            self.grid.clear_occupancy();
            return Err(err);
        }
        self.human = self.find_human();
        Ok(())
    }

    /// Rebuild tile occupancy from each organism's stored tile index.
    pub fn link_organisms_with_tiles(&mut self) -> Result<()> {
        self.grid.clear_occupancy();
        for id in &self.roster {
            let Some(organism) = self.organisms.get(id) else {
                continue;
            };
            if organism.is_dead() {
                continue;
            }
            let Some(tile) = self.grid.get(organism.tile) else {
                return Err(Error::InvalidState(format!(
                    "{organism} refers to tile {} outside the {}x{} grid",
                    organism.tile,
                    self.grid.width,
                    self.grid.height
                )));
            };
            if !tile.is_free() {
                return Err(Error::InvalidState(format!(
                    "{organism} shares tile {} with another organism",
                    organism.tile
                )));
            }
            self.grid.place(organism.tile, *id);
        }
        Ok(())
    }

    /// Advance the world by one turn
    pub fn simulate(&mut self, rules: &SimulationRules) {
        self.time += 1;
        self.logs.clear();
        self.sort_roster();

        let order = self.roster.clone();
        debug!(turn = self.time, organisms = order.len(), "turn started");

        for id in order {
            let Some(organism) = self.organisms.get(&id) else {
                continue;
            };
            if organism.is_dead() || organism.skipped {
                continue;
            }
            if !rules.ai_acts && self.human != Some(id) {
                continue;
            }

            let kind = organism.kind;
            (species::behavior(kind).act)(self, id, rules);
            self.settle(id, rules);
        }

        let removed = self.remove_dead_organisms();
        debug!(
            turn = self.time,
            organisms = self.roster.len(),
            removed,
            events = self.logs.len(),
            "turn finished"
        );
    }

    /// Higher initiative first, then older first. Stable, so ties keep roster order.
    fn sort_roster(&mut self) {
        let organisms = &self.organisms;
        self.roster.sort_by_key(|id| {
            organisms
                .get(id)
                .map(|o| (Reverse(o.initiative), Reverse(o.age)))
        });
    }

    /// Resolve a collision if `mover` now shares its tile with a living organism
    fn settle(&mut self, mover: OrganismId, rules: &SimulationRules) {
        let Some(organism) = self.organisms.get(&mover) else {
            return;
        };
        if organism.is_dead() {
            return;
        }
        let (kind, tile) = (organism.kind, self.grid.tile(organism.tile));
        if tile.organism_count() <= 1 {
            return;
        }
        let Some(other) = tile.other_than(mover) else {
            return;
        };
        if !self.is_alive(other) {
            return;
        }

        trace!(turn = self.time, mover = ?mover, other = ?other, tile = %tile.id, "collision");
        (species::behavior(kind).collision)(self, mover, other, rules);
    }

    /// Purge the dead, then age survivors and clear their per-turn state
    fn remove_dead_organisms(&mut self) -> usize {
        let organisms = &self.organisms;
        let mut dead = Vec::new();
        self.roster.retain(|id| match organisms.get(id) {
            Some(o) if o.is_alive() => true,
            _ => {
                dead.push(*id);
                false
            }
        });

        for id in &dead {
            if let Some(organism) = self.organisms.remove(id) {
                self.grid.remove(organism.tile, *id);
                debug!(
                    turn = self.time,
                    organism = %organism,
                    age = organism.age,
                    "organism removed"
                );
            }
            if self.human == Some(*id) {
                self.human = None;
            }
        }

        let turn = self.time;
        for id in &self.roster {
            if let Some(organism) = self.organisms.get_mut(id) {
                organism.end_turn(turn);
            }
        }
        dead.len()
    }

    // Primitives used by species behaviors.

    pub(crate) fn dice(&mut self) -> &mut Dice {
        &mut self.dice
    }

    pub(crate) fn log(&mut self, entry: impl Into<String>) {
        self.logs.push(entry);
    }

    pub(crate) fn label(&self, id: OrganismId) -> String {
        self.organism(id)
            .map(|o| o.to_string())
            .unwrap_or_else(|| format!("#{id}"))
    }

    pub(crate) fn random_neighbor(&mut self, tile: TileId) -> Option<TileId> {
        self.grid.random_neighbor(tile, &mut self.dice)
    }

    pub(crate) fn random_free_neighbor(&mut self, tile: TileId) -> Option<TileId> {
        self.grid.random_free_neighbor(tile, &mut self.dice)
    }

    /// True when another living organism shares `id`'s tile
    pub(crate) fn has_live_company(&self, id: OrganismId) -> bool {
        self.organism(id).is_some_and(|o| {
            self.grid
                .tile(o.tile)
                .residents()
                .iter()
                .any(|&r| r != id && self.is_alive(r))
        })
    }

    pub(crate) fn move_organism(&mut self, id: OrganismId, dest: TileId) {
        let Some(organism) = self.organisms.get_mut(&id) else {
            return;
        };
        let from = organism.tile;
        organism.previous_tile = Some(from);
        organism.tile = dest;
        self.grid.remove(from, id);
        self.grid.place(dest, id);
    }

    /// Step back to the tile left by the last move. False when there is none.
    pub(crate) fn undo_move(&mut self, id: OrganismId) -> bool {
        let Some(organism) = self.organisms.get_mut(&id) else {
            return false;
        };
        let Some(back) = organism.previous_tile.take() else {
            return false;
        };
        let from = organism.tile;
        organism.tile = back;
        self.grid.remove(from, id);
        self.grid.place(back, id);
        true
    }

    /// Flag dead and detach from the tile; the roster entry goes at cleanup
    pub(crate) fn kill(&mut self, id: OrganismId) {
        let Some(organism) = self.organisms.get_mut(&id) else {
            return;
        };
        organism.alive = false;
        let tile = organism.tile;
        self.grid.remove(tile, id);
    }

    pub(crate) fn skip_turn(&mut self, id: OrganismId) {
        if let Some(organism) = self.organisms.get_mut(&id) {
            organism.skipped = true;
        }
    }

    /// Construct a newborn of `kind` on `tile`; it sits out the rest of this turn
    pub(crate) fn spawn_offspring(&mut self, kind: Kind, tile: TileId) -> OrganismId {
        let mut newborn = species::construct(kind);
        newborn.skipped = true;
        self.insert(newborn, tile)
    }
}
