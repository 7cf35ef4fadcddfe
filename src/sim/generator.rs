//! Tile layout generation per level archetype
//!
//! Opening and victory maps are hand-authored; everything else is scanned
//! row by row with randomized platform runs.

use rand::Rng;

use super::level::{LevelArchetype, LevelSettings};
use super::tilemap::{TileCollision, TileMap};
use crate::consts::*;

/// Output of generation: the grid plus the level-wide markers placed with it
#[derive(Debug, Clone)]
pub struct LevelLayout {
    pub tile_map: TileMap,
    pub finish_height: f32,
    /// Center Y of each wind channel, top to bottom
    pub wind_channels: Vec<f32>,
}

/// Build the tile map, finish line and wind channels for `settings`
pub fn generate_layout(settings: &LevelSettings, rng: &mut impl Rng) -> LevelLayout {
    let archetype = settings.archetype();
    let mut tile_map = TileMap::new(archetype.width(), settings.height, TILE_SIZE);

    let finish_height = match archetype {
        LevelArchetype::Opening => {
            fill_opening(&mut tile_map);
            22.5
        }
        LevelArchetype::Victory => {
            fill_victory(&mut tile_map);
            // Below the map: never reached, the screen just holds
            -100.0
        }
        LevelArchetype::Procedural => {
            fill_procedural(&mut tile_map, settings, rng);
            DEFAULT_FINISH_HEIGHT
        }
    };

    let wind_channels = if settings.has_wind {
        place_wind_channels(settings.height, rng)
    } else {
        Vec::new()
    };

    log::info!(
        "Generated {:?} level {}x{}: {} solid, {} platform, {} grate, {} wind channels",
        archetype,
        tile_map.width(),
        tile_map.height(),
        tile_map.count(TileCollision::Solid),
        tile_map.count(TileCollision::Platform),
        tile_map.count(TileCollision::Grate),
        wind_channels.len()
    );

    LevelLayout {
        tile_map,
        finish_height,
        wind_channels,
    }
}

/// Row `from_bottom` rows up from the last one, if the map is tall enough
#[inline]
fn row_up(map: &TileMap, from_bottom: usize) -> Option<usize> {
    map.height().checked_sub(from_bottom)
}

/// Tutorial layout: open top, fixed ledges split at fixed columns
fn fill_opening(map: &mut TileMap) {
    let (w, h) = (map.width(), map.height());
    for y in 0..h {
        for x in 0..w {
            if x == 0 || x == w - 1 || y == h - 1 {
                map.set(x, y, TileCollision::Solid);
            }
        }
    }

    let rows = [5, 12, 15, 20, 28].map(|k| row_up(map, k));
    for x in 1..w.saturating_sub(1) {
        if let Some(y) = rows[0] {
            map.set(x, y, TileCollision::Platform);
        }
        if let Some(y) = rows[1] {
            let kind = if x < 7 { TileCollision::Platform } else { TileCollision::Solid };
            map.set(x, y, kind);
        }
        if let Some(y) = rows[2].filter(|_| x > 7 && x < 14) {
            map.set(x, y, TileCollision::Platform);
        }
        if let Some(y) = rows[3] {
            let kind = if x < 15 { TileCollision::Solid } else { TileCollision::Platform };
            map.set(x, y, kind);
        }
        if let Some(y) = rows[4] {
            map.set(x, y, TileCollision::Platform);
        }
    }
}

/// Closed box with one short ledge near the bottom
fn fill_victory(map: &mut TileMap) {
    let (w, h) = (map.width(), map.height());
    for y in 0..h {
        for x in 0..w {
            if x == 0 || y == 0 || x == w - 1 || y == h - 1 {
                map.set(x, y, TileCollision::Solid);
            }
        }
    }

    if let Some(y) = row_up(map, 5) {
        for x in 8..14.min(w.saturating_sub(1)) {
            map.set(x, y, TileCollision::Platform);
        }
    }
}

fn fill_procedural(map: &mut TileMap, settings: &LevelSettings, rng: &mut impl Rng) {
    let (w, h) = (map.width(), map.height());
    let start_row = row_up(map, START_ROW_FROM_BOTTOM);
    let min_width = settings.min_platform_width.min(settings.max_platform_width);
    let max_width = settings.max_platform_width.max(settings.min_platform_width);
    let solid_chance = settings.solid_chance.clamp(0.0, 1.0);

    for y in 0..h {
        let mut run = 0usize;
        let mut grates = 0usize;
        let mut solid = false;

        for x in 0..w {
            if y % 3 == 0 && rng.random_ratio(1, 10) {
                run = rng.random_range(min_width..=max_width);
                solid = rng.random::<f64>() <= solid_chance;
            }

            if x == 0 || x == w - 1 {
                map.set(x, y, TileCollision::Solid);
            } else if Some(y) == start_row {
                map.set(x, y, TileCollision::Platform);
            } else if run > 0 {
                if settings.has_grates && rng.random_ratio(1, 8) {
                    grates = rng.random_range(2..5);
                }

                let kind = if grates > 0 {
                    grates -= 1;
                    TileCollision::Grate
                } else if solid {
                    TileCollision::Solid
                } else {
                    TileCollision::Platform
                };
                map.set(x, y, kind);
                run -= 1;
            }
        }
    }
}

/// One channel per 20 rows (minus one), jittered around its nominal Y
fn place_wind_channels(height: usize, rng: &mut impl Rng) -> Vec<f32> {
    let count = (height / 20).saturating_sub(1);
    (0..count)
        .map(|i| nominal_wind_y(i) + (rng.random::<f32>() - 0.5) * WIND_JITTER)
        .collect()
}

/// Unjittered center of wind channel `index`
pub fn nominal_wind_y(index: usize) -> f32 {
    WIND_OFFSET + index as f32 * WIND_SPACING
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn procedural(height: usize) -> LevelSettings {
        LevelSettings {
            height,
            has_wind: true,
            has_grates: true,
            ..LevelSettings::default()
        }
    }

    #[test]
    fn test_wind_channel_count_and_jitter() {
        let mut rng = Pcg32::seed_from_u64(7);
        let layout = generate_layout(&procedural(100), &mut rng);

        assert_eq!(layout.wind_channels.len(), 100 / 20 - 1);
        for (i, &y) in layout.wind_channels.iter().enumerate() {
            assert!((y - nominal_wind_y(i)).abs() <= WIND_JITTER / 2.0);
        }
    }

    #[test]
    fn test_no_wind_when_disabled() {
        let mut rng = Pcg32::seed_from_u64(7);
        let settings = LevelSettings {
            has_wind: false,
            ..procedural(100)
        };
        assert!(generate_layout(&settings, &mut rng).wind_channels.is_empty());
    }

    #[test]
    fn test_short_map_has_no_wind() {
        let mut rng = Pcg32::seed_from_u64(7);
        let layout = generate_layout(&procedural(30), &mut rng);
        assert!(layout.wind_channels.is_empty());
    }

    #[test]
    fn test_procedural_borders_and_start_row() {
        let mut rng = Pcg32::seed_from_u64(42);
        let layout = generate_layout(&procedural(80), &mut rng);
        let map = &layout.tile_map;

        assert_eq!(map.width(), PROCEDURAL_WIDTH);
        for y in 0..map.height() {
            assert_eq!(map.get(0, y), Some(TileCollision::Solid));
            assert_eq!(map.get(map.width() - 1, y), Some(TileCollision::Solid));
        }

        let start = map.height() - START_ROW_FROM_BOTTOM;
        for x in 1..map.width() - 1 {
            assert_eq!(map.get(x, start), Some(TileCollision::Platform));
        }
        assert_eq!(layout.finish_height, DEFAULT_FINISH_HEIGHT);
    }

    #[test]
    fn test_grates_only_when_enabled() {
        for seed in 0..8 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let settings = LevelSettings {
                has_grates: false,
                ..procedural(120)
            };
            let layout = generate_layout(&settings, &mut rng);
            assert_eq!(layout.tile_map.count(TileCollision::Grate), 0);
        }
    }

    #[test]
    fn test_runs_only_start_on_third_rows() {
        let mut rng = Pcg32::seed_from_u64(3);
        let layout = generate_layout(&procedural(90), &mut rng);
        let map = &layout.tile_map;
        let start = map.height() - START_ROW_FROM_BOTTOM;

        for y in (0..map.height()).filter(|y| y % 3 != 0 && *y != start) {
            let interior = &map.row(y)[1..map.width() - 1];
            assert!(interior.iter().all(|&t| t == TileCollision::None), "row {y} has tiles");
        }
    }

    #[test]
    fn test_solid_chance_one_means_no_plain_platforms() {
        let mut rng = Pcg32::seed_from_u64(11);
        let settings = LevelSettings {
            solid_chance: 1.0,
            has_grates: false,
            ..procedural(90)
        };
        let layout = generate_layout(&settings, &mut rng);
        let map = &layout.tile_map;
        let start = map.height() - START_ROW_FROM_BOTTOM;
        for y in (0..map.height()).filter(|&y| y != start) {
            assert!(!map.row(y).contains(&TileCollision::Platform));
        }
    }

    #[test]
    fn test_opening_layout() {
        let mut rng = Pcg32::seed_from_u64(1);
        let settings = LevelSettings::opening();
        let layout = generate_layout(&settings, &mut rng);
        let map = &layout.tile_map;
        let h = map.height();

        assert_eq!(map.width(), OPENING_WIDTH);
        assert_eq!(layout.finish_height, 22.5);
        // Open top, closed floor
        assert_eq!(map.get(5, 0), Some(TileCollision::None));
        assert_eq!(map.get(5, h - 1), Some(TileCollision::Solid));
        assert_eq!(map.get(3, h - 12), Some(TileCollision::Platform));
        assert_eq!(map.get(10, h - 12), Some(TileCollision::Solid));
        assert_eq!(map.get(10, h - 20), Some(TileCollision::Solid));
        assert_eq!(map.get(16, h - 20), Some(TileCollision::Platform));
        assert_eq!(map.get(5, h - 15), Some(TileCollision::None));
        assert_eq!(map.get(10, h - 15), Some(TileCollision::Platform));
    }

    #[test]
    fn test_victory_layout_is_closed() {
        let mut rng = Pcg32::seed_from_u64(1);
        let layout = generate_layout(&LevelSettings::victory(), &mut rng);
        let map = &layout.tile_map;

        assert_eq!(map.width(), VICTORY_WIDTH);
        for x in 0..map.width() {
            assert_eq!(map.get(x, 0), Some(TileCollision::Solid));
            assert_eq!(map.get(x, map.height() - 1), Some(TileCollision::Solid));
        }
        assert_eq!(map.count(TileCollision::Platform), 6);
        assert!(layout.finish_height < 0.0);
    }
}
