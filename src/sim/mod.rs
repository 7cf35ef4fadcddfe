//! Gameplay simulation module
//!
//! Everything that happens inside one tick lives here:
//! - Player controller state machine (movement, jumps, dashes, kicks)
//! - Level loop (environment rules, integration pass, timers)
//! - Tile map generation per level archetype
//!
//! Records are always re-resolved by id; nothing holds a reference across ticks.

pub mod body;
pub mod controller;
pub mod entity;
pub mod generator;
pub mod level;
pub mod physics;
pub mod registry;
pub mod tilemap;

#[cfg(test)]
pub(crate) mod test_support;

pub use body::{Body, Bounds, PhysicsWorld};
pub use controller::PlayerController;
pub use entity::{Entity, EntityWorld};
pub use generator::{LevelLayout, generate_layout};
pub use level::{Level, LevelArchetype, LevelEvent, LevelSettings, SoundCue};
pub use physics::{Integrator, TileIntegrator};
pub use registry::{BodyId, EntityId, Registry};
pub use tilemap::{TileCollision, TileMap};
