//! Fixtures shared by the simulation tests

use super::generator::LevelLayout;
use super::level::{Level, LevelSettings};
use super::tilemap::{TileCollision, TileMap};

/// 20x30 box with a solid floor on the last row and no water
pub fn flat_level() -> Level {
    let mut map = TileMap::new(20, 30, 1.0);
    for x in 0..20 {
        map.set(x, 29, TileCollision::Solid);
    }
    for y in 0..30 {
        map.set(0, y, TileCollision::Solid);
        map.set(19, y, TileCollision::Solid);
    }
    let settings = LevelSettings {
        water_level: 0.0,
        ..LevelSettings::default()
    };
    let layout = LevelLayout {
        tile_map: map,
        finish_height: -100.0,
        wind_channels: Vec::new(),
    };
    Level::from_layout(settings, layout, 5)
}
