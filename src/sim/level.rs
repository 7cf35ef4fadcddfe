//! Level state and the per-tick simulation loop
//!
//! Order inside a tick is fixed: controllers, then environment rules for
//! every entity, then one integration pass over every body, then timers.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::{Body, Bounds, PhysicsWorld};
use super::controller::PlayerController;
use super::entity::{Entity, EntityWorld};
use super::generator::{LevelLayout, generate_layout};
use super::physics::{Integrator, TileIntegrator};
use super::registry::EntityId;
use super::tilemap::TileMap;
use crate::consts::*;
use crate::decay;
use crate::input::InputOracle;
use crate::tuning::{EntityTuning, PlayerTuning};

/// Player collision box
pub const PLAYER_SIZE: Vec2 = Vec2::new(0.75, 0.9);
/// Torch collision box
pub const TORCH_SIZE: Vec2 = Vec2::new(0.5, 0.6);

/// Which layout a level is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelArchetype {
    /// Hand-authored tutorial climb
    Opening,
    /// Closed end screen
    Victory,
    Procedural,
}

impl LevelArchetype {
    /// Map width in tiles
    pub fn width(self) -> usize {
        match self {
            LevelArchetype::Opening => OPENING_WIDTH,
            LevelArchetype::Victory => VICTORY_WIDTH,
            LevelArchetype::Procedural => PROCEDURAL_WIDTH,
        }
    }
}

/// Construction inputs for one level
///
/// Preconditions (not checked): `height` leaves room for the archetype's
/// fixed rows, `min_platform_width <= max_platform_width`, and
/// `solid_chance` lies in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelSettings {
    pub is_opening: bool,
    pub is_victory: bool,
    /// Map height in tiles
    pub height: usize,
    pub min_platform_width: usize,
    pub max_platform_width: usize,
    /// Chance a platform run is solid rather than one-way
    pub solid_chance: f64,
    pub has_grates: bool,
    pub has_wind: bool,
    /// Initial water height measured up from the map bottom
    pub water_level: f32,
    /// Water rise speed (units/s)
    pub water_rise_speed: f32,
}

impl Default for LevelSettings {
    fn default() -> Self {
        Self {
            is_opening: false,
            is_victory: false,
            height: 100,
            min_platform_width: 3,
            max_platform_width: 8,
            solid_chance: 0.3,
            has_grates: false,
            has_wind: false,
            water_level: DEFAULT_WATER_LEVEL,
            water_rise_speed: 0.0,
        }
    }
}

impl LevelSettings {
    pub fn opening() -> Self {
        Self {
            is_opening: true,
            height: 48,
            water_level: 0.0,
            ..Self::default()
        }
    }

    pub fn victory() -> Self {
        Self {
            is_victory: true,
            height: 24,
            water_level: 0.0,
            ..Self::default()
        }
    }

    pub fn archetype(&self) -> LevelArchetype {
        if self.is_opening {
            LevelArchetype::Opening
        } else if self.is_victory {
            LevelArchetype::Victory
        } else {
            LevelArchetype::Procedural
        }
    }

    /// Tile row the player and torch start on
    pub fn spawn_row(&self) -> usize {
        let from_bottom = match self.archetype() {
            LevelArchetype::Opening => 1,
            LevelArchetype::Victory => 5,
            LevelArchetype::Procedural => START_ROW_FROM_BOTTOM,
        };
        self.height.saturating_sub(from_bottom)
    }
}

/// Click variants played when the torch is struck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    Click1,
    Click2,
    Click3,
}

impl SoundCue {
    /// One of the three clicks, uniformly
    pub fn random_click(rng: &mut impl Rng) -> Self {
        match rng.random_range(0..3) {
            0 => SoundCue::Click1,
            1 => SoundCue::Click2,
            _ => SoundCue::Click3,
        }
    }
}

/// Discrete happenings for the presentation layer to drain
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LevelEvent {
    /// A kick connected with the torch
    TorchKicked { by: EntityId },
    /// A dash bumped the torch
    TorchBumped { by: EntityId },
    /// Entity stayed under water long enough to go out
    PutOut(EntityId),
    /// The player crossed the finish line
    FinishReached(EntityId),
    Sound(SoundCue),
}

/// One playable level: map, bodies, entities and level-wide timers
#[derive(Debug)]
pub struct Level {
    pub settings: LevelSettings,
    pub tile_map: TileMap,
    pub physics: PhysicsWorld,
    pub entities: EntityWorld,

    pub camera_center: Vec2,
    /// Entity the camera follows
    pub camera_target: Option<EntityId>,

    /// World Y the player must climb to
    pub finish_height: f32,
    /// Entity whose arrival at the finish counts
    pub finish_target: Option<EntityId>,
    pub finished: bool,

    /// Water height measured up from the map bottom
    pub water_level: f32,
    /// Slow-motion window remaining (seconds)
    pub slow_mo_timer: f32,
    /// Center Y of each wind channel
    pub wind_channels: Vec<f32>,

    pub events: Vec<LevelEvent>,

    pub seed: u64,
    pub(crate) rng: Pcg32,
    integrator: Box<dyn Integrator>,
}

impl Level {
    /// Build a level from a freshly drawn seed
    pub fn new(settings: LevelSettings) -> Self {
        Self::with_seed(settings, rand::random())
    }

    /// Build a level whose layout is fully determined by `seed`
    pub fn with_seed(settings: LevelSettings, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let layout = generate_layout(&settings, &mut rng);
        let mut level = Self::from_layout(settings, layout, seed);
        level.rng = rng;
        level
    }

    /// Build a level around an existing layout
    pub fn from_layout(settings: LevelSettings, layout: LevelLayout, seed: u64) -> Self {
        let camera_center = layout.tile_map.world_size() / 2.0;
        Self {
            water_level: settings.water_level,
            settings,
            tile_map: layout.tile_map,
            physics: PhysicsWorld::new(),
            entities: EntityWorld::new(),
            camera_center,
            camera_target: None,
            finish_height: layout.finish_height,
            finish_target: None,
            finished: false,
            slow_mo_timer: 0.0,
            wind_channels: layout.wind_channels,
            events: Vec::new(),
            seed,
            rng: Pcg32::seed_from_u64(seed),
            integrator: Box::new(TileIntegrator::default()),
        }
    }

    /// Swap the integration service
    pub fn with_integrator(mut self, integrator: Box<dyn Integrator>) -> Self {
        self.integrator = integrator;
        self
    }

    /// World Y of the water surface
    pub fn water_top(&self) -> f32 {
        self.tile_map.world_size().y - self.water_level
    }

    pub fn is_slow_mo(&self) -> bool {
        self.slow_mo_timer > 0.0
    }

    /// Body of an entity, if both still exist
    pub fn body_of(&self, id: EntityId) -> Option<&Body> {
        self.entities
            .try_get_entity(id)
            .and_then(|e| e.body_id)
            .and_then(|b| self.physics.try_get_body(b))
    }

    pub fn body_of_mut(&mut self, id: EntityId) -> Option<&mut Body> {
        let body_id = self.entities.try_get_entity(id).and_then(|e| e.body_id)?;
        self.physics.try_get_body_mut(body_id)
    }

    /// Drain events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<LevelEvent> {
        std::mem::take(&mut self.events)
    }

    /// Register a torch whose body top-left sits at `position`
    pub fn spawn_torch_at(&mut self, position: Vec2) -> EntityId {
        let body = self
            .physics
            .add_body(Body::new(position, Bounds::new(Vec2::ZERO, TORCH_SIZE)));
        self.entities
            .add_entity(Entity::new(Some(body), EntityTuning::torch()))
    }

    /// Register a player tracking `torch`, followed by the camera
    pub fn spawn_player_at(&mut self, position: Vec2, torch: EntityId, tuning: PlayerTuning) -> EntityId {
        let body = self
            .physics
            .add_body(Body::new(position, Bounds::new(Vec2::ZERO, PLAYER_SIZE)));
        let entity = Entity::new(Some(body), EntityTuning::player())
            .with_brain(PlayerController::new(torch, tuning));
        let id = self.entities.add_entity(entity);

        self.camera_target = Some(id);
        self.finish_target = Some(id);
        id
    }

    /// Torch and player standing side by side on the spawn row
    pub fn spawn_defaults(&mut self, tuning: PlayerTuning) -> (EntityId, EntityId) {
        let ts = self.tile_map.tile_size();
        let floor = self.settings.spawn_row() as f32 * ts;
        let mid = self.tile_map.world_size().x / 2.0;

        let torch = self.spawn_torch_at(Vec2::new(mid + ts, floor - TORCH_SIZE.y));
        let player = self.spawn_player_at(Vec2::new(mid - ts, floor - PLAYER_SIZE.y), torch, tuning);
        log::info!(
            "Spawned player {:?} and torch {:?} on row {}",
            player,
            torch,
            self.settings.spawn_row()
        );
        (player, torch)
    }

    /// Advance the level by one tick
    pub fn update<I: InputOracle + ?Sized>(&mut self, input: &I, dt: f32) {
        self.run_controllers(input, dt);

        for id in self.entities.ids() {
            self.apply_environment(id, dt);
        }

        self.water_level += self.settings.water_rise_speed * dt;

        for (_, body) in self.physics.bodies_mut() {
            self.integrator.advance(body, dt, &self.tile_map);
        }

        if let Some(center) = self.camera_target.and_then(|id| self.body_of(id)).map(Body::center) {
            self.camera_center = center;
        }
        self.check_finish();

        self.slow_mo_timer = decay(self.slow_mo_timer, dt);
    }

    /// Run every entity's controller once
    pub fn run_controllers<I: InputOracle + ?Sized>(&mut self, input: &I, dt: f32) {
        for id in self.entities.ids() {
            let Some(mut brain) = self
                .entities
                .try_get_entity_mut(id)
                .and_then(|e| e.brain.take())
            else {
                continue;
            };

            brain.update(id, self, input, dt);

            if let Some(entity) = self.entities.try_get_entity_mut(id) {
                entity.brain = Some(brain);
            }
        }
    }

    /// Friction, rotation, water and wind for one entity
    fn apply_environment(&mut self, id: EntityId, dt: f32) {
        let water_top = self.water_top();
        let Some(entity) = self.entities.try_get_entity_mut(id) else {
            return;
        };
        let Some(body_id) = entity.body_id else {
            return;
        };
        let Some(body) = self.physics.try_get_body_mut(body_id) else {
            return;
        };

        let grounded = body.is_grounded();
        body.friction = if grounded && body.speed() >= entity.danger_speed {
            entity.danger_friction
        } else if grounded {
            entity.ground_friction
        } else {
            entity.air_friction
        };

        if entity.can_rotate {
            entity.rotation += body.velocity.x * dt;
        }

        if body.center().y >= water_top {
            entity.water_timer += dt;
            if entity.water_timer >= WATER_PUT_OUT_TIME && !entity.is_put_out {
                entity.is_put_out = true;
                log::info!("Entity {:?} put out after {:.2}s under water", id, entity.water_timer);
                self.events.push(LevelEvent::PutOut(id));
            }
        } else {
            entity.water_timer = 0.0;
        }

        if entity.is_blowable {
            let center_y = body.center().y;
            for (index, &channel) in self.wind_channels.iter().enumerate() {
                if (center_y - channel).abs() <= WIND_HALF_HEIGHT {
                    body.force.x += wind_direction(index) * WIND_FORCE;
                }
            }
        }
    }

    fn check_finish(&mut self) {
        if self.finished {
            return;
        }
        let Some(target) = self.finish_target else {
            return;
        };
        let Some(center) = self.body_of(target).map(Body::center) else {
            return;
        };
        if center.y <= self.finish_height {
            self.finished = true;
            log::info!("Finish reached by {:?} at y={:.2}", target, center.y);
            self.events.push(LevelEvent::FinishReached(target));
        }
    }
}

/// Even channels push right, odd channels push left
#[inline]
pub fn wind_direction(index: usize) -> f32 {
    if index % 2 == 0 { 1.0 } else { -1.0 }
}
