//! Game session
//!
//! Owns the current level and walks the level list. Real frame time is fed
//! through a fixed-timestep accumulator; slow motion scales the time fed in,
//! never the tick length.

use crate::consts::*;
use crate::input::{Action, InputOracle, InputState};
use crate::settings::{GameSettings, SettingsError};
use crate::sim::{EntityId, Level, LevelEvent};

#[derive(Debug)]
pub struct Game {
    settings: GameSettings,
    level_index: usize,
    level: Level,
    player: EntityId,
    torch: EntityId,
    accumulator: f32,
    /// Presses latched until a substep consumes them
    input: InputState,
    events: Vec<LevelEvent>,
}

impl Game {
    /// Start a session at the first level
    pub fn new(settings: GameSettings) -> Result<Self, SettingsError> {
        if settings.levels.is_empty() {
            return Err(SettingsError::NoLevels);
        }
        let (level, player, torch) = build_level(&settings, 0);
        Ok(Self {
            settings,
            level_index: 0,
            level,
            player,
            torch,
            accumulator: 0.0,
            input: InputState::new(),
            events: Vec::new(),
        })
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn level_mut(&mut self) -> &mut Level {
        &mut self.level
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn level_count(&self) -> usize {
        self.settings.levels.len()
    }

    pub fn player(&self) -> EntityId {
        self.player
    }

    pub fn torch(&self) -> EntityId {
        self.torch
    }

    pub fn is_last_level(&self) -> bool {
        self.level_index + 1 >= self.level_count()
    }

    /// Drain level events collected since the last call
    pub fn drain_events(&mut self) -> Vec<LevelEvent> {
        std::mem::take(&mut self.events)
    }

    /// Run one rendered frame, returning how many ticks were simulated
    pub fn frame<I: InputOracle + ?Sized>(&mut self, input: &I, real_dt: f32) -> u32 {
        self.input.latch(input);

        if self.input.just_pressed(Action::Restart) {
            self.restart();
            return 0;
        }
        if self.input.just_pressed(Action::Skip) {
            self.advance();
            return 0;
        }

        let scale = if self.level.is_slow_mo() { SLOW_MO_SCALE } else { 1.0 };
        self.accumulator += real_dt.min(MAX_FRAME_DT) * scale;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.level.update(&self.input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // One-shot presses belong to the first tick only
            self.input.end_frame();
            self.events.extend(self.level.drain_events());

            // The last level keeps running once finished
            if self.level.finished && !self.is_last_level() {
                self.advance();
                break;
            }
        }
        substeps
    }

    /// Rebuild the current level from scratch
    pub fn restart(&mut self) {
        log::info!("Restarting level {}", self.level_index);
        self.load(self.level_index);
    }

    /// Move to the next level, staying put on the last one
    pub fn advance(&mut self) {
        if self.is_last_level() {
            log::debug!("Already on the last level");
            self.input.end_frame();
            return;
        }
        log::info!("Advancing to level {}", self.level_index + 1);
        self.load(self.level_index + 1);
    }

    fn load(&mut self, index: usize) {
        let (level, player, torch) = build_level(&self.settings, index);
        self.level = level;
        self.player = player;
        self.torch = torch;
        self.level_index = index;
        self.accumulator = 0.0;
        self.input.end_frame();
    }
}

fn build_level(settings: &GameSettings, index: usize) -> (Level, EntityId, EntityId) {
    let level_settings = settings.levels[index].clone();
    let mut level = match settings.level_seed(index) {
        Some(seed) => Level::with_seed(level_settings, seed),
        None => Level::new(level_settings),
    };
    let (player, torch) = level.spawn_defaults(settings.player);
    log::info!(
        "Level {} ready: {:?}, {}x{} tiles, seed {}",
        index,
        level.settings.archetype(),
        level.tile_map.width(),
        level.tile_map.height(),
        level.seed
    );
    (level, player, torch)
}
