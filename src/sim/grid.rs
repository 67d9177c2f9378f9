//! Tile grid built from a level map and a tileset
//!
//! Geometry is fixed once built. The only mutable part is the open/closed
//! state of the start and exit gates, which the owning round drives.

use glam::Vec2;

use super::collision::point_in_box;
use crate::assets::{Level, SpriteKey, TileDef, TileKind, Tileset};
use crate::error::ConfigError;

/// Grid coordinates of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

/// What a tile looks like, and for gates whether it is open
#[derive(Debug, Clone)]
enum TileVisual {
    Basic(SpriteKey),
    Gate {
        open: bool,
        open_sprite: SpriteKey,
        closed_sprite: SpriteKey,
    },
}

/// One cell of the grid with its absolute pixel bounds
#[derive(Debug, Clone)]
pub struct Tile {
    kind: TileKind,
    cell: Cell,
    pos: Vec2,
    dims: Vec2,
    visual: TileVisual,
}

impl Tile {
    fn new(def: &TileDef, cell: Cell, tile_size: Vec2) -> Self {
        let visual = match def {
            TileDef::Basic { sprite, .. } => TileVisual::Basic(sprite.clone()),
            // Gates start open, the round closes what it needs closed
            TileDef::Openable { open, closed, .. } => TileVisual::Gate {
                open: true,
                open_sprite: open.clone(),
                closed_sprite: closed.clone(),
            },
        };
        Self {
            kind: def.kind(),
            cell,
            pos: Vec2::new(cell.col as f32 * tile_size.x, cell.row as f32 * tile_size.y),
            dims: tile_size,
            visual,
        }
    }

    pub fn kind(&self) -> TileKind {
        self.kind
    }

    pub fn cell(&self) -> Cell {
        self.cell
    }

    /// Absolute top-left corner in pixels
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn dims(&self) -> Vec2 {
        self.dims
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.dims / 2.0
    }

    pub fn is_openable(&self) -> bool {
        matches!(self.visual, TileVisual::Gate { .. })
    }

    /// Always false for tiles that are not gates
    pub fn is_open(&self) -> bool {
        matches!(self.visual, TileVisual::Gate { open: true, .. })
    }

    /// Open a gate; returns true if the state changed
    pub fn open(&mut self) -> bool {
        self.set_open(true)
    }

    /// Close a gate; returns true if the state changed
    pub fn close(&mut self) -> bool {
        self.set_open(false)
    }

    fn set_open(&mut self, value: bool) -> bool {
        match &mut self.visual {
            TileVisual::Gate { open, .. } if *open != value => {
                *open = value;
                true
            }
            _ => false,
        }
    }

    /// Floors never block; gates block only while closed
    pub fn is_solid(&self) -> bool {
        match self.kind {
            TileKind::Floor => false,
            _ => !self.is_open(),
        }
    }

    /// Point inside this tile while it is solid
    pub fn collides(&self, pos: Vec2) -> bool {
        self.is_solid() && self.collides_regardless_of_state(pos)
    }

    /// Point inside this tile's bounds, ignoring solidity and gate state
    pub fn collides_regardless_of_state(&self, pos: Vec2) -> bool {
        point_in_box(pos, self.pos, self.dims)
    }

    /// Sprite for the tile's current state
    pub fn sprite(&self) -> &SpriteKey {
        match &self.visual {
            TileVisual::Basic(sprite) => sprite,
            TileVisual::Gate {
                open: true,
                open_sprite,
                ..
            } => open_sprite,
            TileVisual::Gate { closed_sprite, .. } => closed_sprite,
        }
    }
}

/// Row-major tile matrix of one level
#[derive(Debug, Clone)]
pub struct Grid {
    rows: usize,
    cols: usize,
    tile_size: Vec2,
    tiles: Vec<Tile>,
    start: usize,
    exits: Vec<usize>,
}

impl Grid {
    /// Build the grid, resolving every level character through the tileset
    pub fn build(level: &Level, tileset: &Tileset) -> Result<Self, ConfigError> {
        let tile_size = tileset.tile_size();
        let mut tiles = Vec::with_capacity(level.width() * level.height());

        for (row, chars) in level.rows().enumerate() {
            for (col, &ch) in chars.iter().enumerate() {
                let def = tileset.get(ch)?;
                tiles.push(Tile::new(def, Cell { row, col }, tile_size));
            }
        }

        let starts: Vec<usize> = indices_of(&tiles, TileKind::Start);
        let start = match starts.as_slice() {
            [] => return Err(ConfigError::MissingStart),
            [start] => *start,
            many => return Err(ConfigError::MultipleStarts(many.len())),
        };
        let exits = indices_of(&tiles, TileKind::Exit);
        if exits.is_empty() {
            return Err(ConfigError::MissingExit);
        }

        Ok(Self {
            rows: level.height(),
            cols: level.width(),
            tile_size,
            tiles,
            start,
            exits,
        })
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn col_count(&self) -> usize {
        self.cols
    }

    pub fn tile_size(&self) -> Vec2 {
        self.tile_size
    }

    /// Pixel size of the whole map
    pub fn pixel_size(&self) -> Vec2 {
        Vec2::new(
            self.cols as f32 * self.tile_size.x,
            self.rows as f32 * self.tile_size.y,
        )
    }

    /// Flat row-major tile list
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Tiles as matrix rows
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.chunks(self.cols)
    }

    pub fn tile(&self, row: usize, col: usize) -> Option<&Tile> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.tiles.get(row * self.cols + col)
    }

    /// Cell containing `pos`, if it lies on the map
    pub fn cell_at(&self, pos: Vec2) -> Option<Cell> {
        if pos.x < 0.0 || pos.y < 0.0 {
            return None;
        }
        let col = (pos.x / self.tile_size.x) as usize;
        let row = (pos.y / self.tile_size.y) as usize;
        (row < self.rows && col < self.cols).then_some(Cell { row, col })
    }

    /// First solid tile containing `pos`
    pub fn solid_tile_at(&self, pos: Vec2) -> Option<&Tile> {
        self.tiles.iter().find(|tile| tile.collides(pos))
    }

    pub fn start(&self) -> &Tile {
        &self.tiles[self.start]
    }

    pub fn exits(&self) -> impl Iterator<Item = &Tile> {
        self.exits.iter().map(|&i| &self.tiles[i])
    }

    /// Worm spawn point: centre of the start cell
    pub fn spawn_position(&self) -> Vec2 {
        self.start().center()
    }

    pub fn open_start(&mut self) -> bool {
        self.tiles[self.start].open()
    }

    pub fn close_start(&mut self) -> bool {
        self.tiles[self.start].close()
    }

    /// Open every exit; true if any changed
    pub fn open_exits(&mut self) -> bool {
        let mut changed = false;
        for &i in &self.exits {
            changed |= self.tiles[i].open();
        }
        changed
    }

    /// Close every exit; true if any changed
    pub fn close_exits(&mut self) -> bool {
        let mut changed = false;
        for &i in &self.exits {
            changed |= self.tiles[i].close();
        }
        changed
    }

    pub fn is_start_open(&self) -> bool {
        self.start().is_open()
    }

    pub fn are_exits_open(&self) -> bool {
        self.exits().all(Tile::is_open)
    }

    /// `pos` within any exit's bounds, open or not
    pub fn exit_contains(&self, pos: Vec2) -> bool {
        self.exits().any(|tile| tile.collides_regardless_of_state(pos))
    }
}

fn indices_of(tiles: &[Tile], kind: TileKind) -> Vec<usize> {
    tiles
        .iter()
        .enumerate()
        .filter(|(_, tile)| tile.kind == kind)
        .map(|(i, _)| i)
        .collect()
}
