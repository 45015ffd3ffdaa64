//! 2D grid for the world.

use crate::rng::Dice;
use ecosim_core::{Direction, OrganismId, Position, TileId};
use serde::{Deserialize, Serialize};

/// One cell of the grid.
///
/// Links are fixed when the grid is built; only the resident list changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    links: [Option<TileId>; 4],
    residents: Vec<OrganismId>,
}

impl Tile {
    fn new(id: TileId) -> Self {
        Self {
            id,
            links: [None; 4],
            residents: Vec::new(),
        }
    }

    pub fn link(&self, direction: Direction) -> Option<TileId> {
        self.links[direction.slot()]
    }

    pub fn residents(&self) -> &[OrganismId] {
        &self.residents
    }

    pub fn organism_count(&self) -> usize {
        self.residents.len()
    }

    pub fn is_free(&self) -> bool {
        self.residents.is_empty()
    }

    /// The first resident that is not `me`
    pub fn other_than(&self, me: OrganismId) -> Option<OrganismId> {
        self.residents.iter().copied().find(|&id| id != me)
    }
}

/// Non-wrapping grid of linked tiles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    tiles: Vec<Tile>,
}

impl Grid {
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "grid must be at least 1x1, got {width}x{height}");
        let mut tiles: Vec<Tile> = (0..width * height).map(|i| Tile::new(TileId(i))).collect();

        for y in 0..height {
            for x in 0..width {
                let tile = &mut tiles[y * width + x];
                if y > 0 {
                    tile.links[Direction::Up.slot()] = Some(TileId((y - 1) * width + x));
                }
                if y + 1 < height {
                    tile.links[Direction::Down.slot()] = Some(TileId((y + 1) * width + x));
                }
                if x > 0 {
                    tile.links[Direction::Left.slot()] = Some(TileId(y * width + x - 1));
                }
                if x + 1 < width {
                    tile.links[Direction::Right.slot()] = Some(TileId(y * width + x + 1));
                }
            }
        }

        Self {
            width,
            height,
            tiles,
        }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tile by arena index. Panics on an index from another grid.
    pub fn tile(&self, id: TileId) -> &Tile {
        &self.tiles[id.index()]
    }

    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.index())
    }

    pub fn tile_id(&self, x: usize, y: usize) -> Option<TileId> {
        (x < self.width && y < self.height).then(|| TileId(y * self.width + x))
    }

    /// Get position from index
    pub fn position_of(&self, id: TileId) -> Position {
        Position::new(id.index() % self.width, id.index() / self.width)
    }

    pub fn neighbor(&self, id: TileId, direction: Direction) -> Option<TileId> {
        self.tile(id).link(direction)
    }

    /// Existing links only; edge and corner tiles have fewer than four
    pub fn neighbors(&self, id: TileId) -> Vec<TileId> {
        self.tile(id).links.iter().flatten().copied().collect()
    }

    pub fn random_neighbor(&self, id: TileId, dice: &mut Dice) -> Option<TileId> {
        dice.pick(&self.neighbors(id))
    }

    pub fn random_free_neighbor(&self, id: TileId, dice: &mut Dice) -> Option<TileId> {
        let free: Vec<TileId> = self
            .neighbors(id)
            .into_iter()
            .filter(|&n| self.tile(n).is_free())
            .collect();
        dice.pick(&free)
    }

    pub fn free_tiles(&self) -> Vec<TileId> {
        self.tiles
            .iter()
            .filter(|tile| tile.is_free())
            .map(|tile| tile.id)
            .collect()
    }

    pub fn place(&mut self, id: TileId, organism: OrganismId) {
        let residents = &mut self.tiles[id.index()].residents;
        if !residents.contains(&organism) {
            residents.push(organism);
        }
    }

    pub fn remove(&mut self, id: TileId, organism: OrganismId) {
        if let Some(tile) = self.tiles.get_mut(id.index()) {
            tile.residents.retain(|&r| r != organism);
        }
    }

    /// Drop every resident, keeping the links
    pub fn clear_occupancy(&mut self) {
        for tile in &mut self.tiles {
            tile.residents.clear();
        }
    }

    /// Iterator over all tiles with positions
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Tile)> + '_ {
        self.tiles
            .iter()
            .map(move |tile| (self.position_of(tile.id), tile))
    }
}
