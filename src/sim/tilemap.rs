//! Tile grid with per-cell collision classification

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// How a tile blocks bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TileCollision {
    #[default]
    None,
    /// Blocks from every side
    Solid,
    /// One-way: blocks only bodies falling onto it that do not ignore platforms
    Platform,
    /// Drawn differently, blocks like solid
    Grate,
}

impl TileCollision {
    /// Blocks regardless of direction
    #[inline]
    pub fn is_solid(self) -> bool {
        matches!(self, TileCollision::Solid | TileCollision::Grate)
    }
}

/// Width × height grid, row-major, y grows downward
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileMap {
    width: usize,
    height: usize,
    tile_size: f32,
    tiles: Vec<TileCollision>,
}

impl TileMap {
    pub fn new(width: usize, height: usize, tile_size: f32) -> Self {
        Self {
            width,
            height,
            tile_size,
            tiles: vec![TileCollision::None; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// World-space size of the map
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32) * self.tile_size
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    pub fn get(&self, x: usize, y: usize) -> Option<TileCollision> {
        self.index(x, y).map(|i| self.tiles[i])
    }

    /// Collision at a signed tile coordinate; outside the map is open
    pub fn collision_at(&self, x: i32, y: i32) -> TileCollision {
        if x < 0 || y < 0 {
            return TileCollision::None;
        }
        self.get(x as usize, y as usize).unwrap_or_default()
    }

    /// Set a tile. Out-of-range writes are ignored.
    pub fn set(&mut self, x: usize, y: usize, collision: TileCollision) {
        if let Some(i) = self.index(x, y) {
            self.tiles[i] = collision;
        }
    }

    pub fn row(&self, y: usize) -> &[TileCollision] {
        if y >= self.height {
            return &[];
        }
        &self.tiles[y * self.width..(y + 1) * self.width]
    }

    pub fn count(&self, collision: TileCollision) -> usize {
        self.tiles.iter().filter(|&&t| t == collision).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_is_open() {
        let mut map = TileMap::new(4, 3, 1.0);
        map.set(10, 10, TileCollision::Solid);
        assert_eq!(map.count(TileCollision::Solid), 0);
        assert_eq!(map.collision_at(-1, 0), TileCollision::None);
        assert_eq!(map.collision_at(4, 0), TileCollision::None);
        assert_eq!(map.get(0, 3), None);
    }

    #[test]
    fn test_row_access() {
        let mut map = TileMap::new(4, 3, 1.0);
        map.set(2, 1, TileCollision::Grate);
        assert_eq!(map.row(1)[2], TileCollision::Grate);
        assert!(map.row(5).is_empty());
        assert!(TileCollision::Grate.is_solid());
        assert!(!TileCollision::Platform.is_solid());
    }

    #[test]
    fn test_world_size_scales_with_tile() {
        let map = TileMap::new(4, 3, 2.0);
        assert_eq!(map.world_size(), Vec2::new(8.0, 6.0));
    }
}
