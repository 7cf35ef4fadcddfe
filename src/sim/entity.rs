//! Gameplay entity records

use serde::{Deserialize, Serialize};

use super::controller::PlayerController;
use super::registry::{BodyId, EntityId, Registry};
use crate::tuning::EntityTuning;

/// Gameplay-facing record; physical state lives in its body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// Physics body, `None` for view-only entities
    pub body_id: Option<BodyId>,
    /// Per-tick controller
    pub brain: Option<PlayerController>,

    /// Dash still resolving while > 0
    pub dash_timer: f32,
    /// Kick still resolving while > 0
    pub kick_timer: f32,
    /// One-shot kick pose signal, cleared by the view layer
    pub kick: bool,

    pub danger_speed: f32,
    pub danger_friction: f32,
    pub ground_friction: f32,
    pub air_friction: f32,

    /// Seconds spent submerged
    pub water_timer: f32,
    /// Extinguished. Never clears within a level.
    pub is_put_out: bool,

    pub can_rotate: bool,
    pub rotation: f32,
    pub is_blowable: bool,

    /// The torch went out; horizontal motion is frozen
    pub has_lost_all_hope: bool,
}

impl Entity {
    pub fn new(body_id: Option<BodyId>, tuning: EntityTuning) -> Self {
        Self {
            body_id,
            brain: None,
            dash_timer: 0.0,
            kick_timer: 0.0,
            kick: false,
            danger_speed: tuning.danger_speed,
            danger_friction: tuning.danger_friction,
            ground_friction: tuning.ground_friction,
            air_friction: tuning.air_friction,
            water_timer: 0.0,
            is_put_out: false,
            can_rotate: tuning.can_rotate,
            rotation: 0.0,
            is_blowable: tuning.is_blowable,
            has_lost_all_hope: false,
        }
    }

    pub fn with_brain(mut self, brain: PlayerController) -> Self {
        self.brain = Some(brain);
        self
    }

    /// Read and clear the kick pose signal
    pub fn take_kick(&mut self) -> bool {
        std::mem::take(&mut self.kick)
    }
}

/// Registry of every entity in a level
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityWorld {
    entities: Registry<Entity>,
}

impl EntityWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_entity(&mut self, entity: Entity) -> EntityId {
        EntityId(self.entities.insert(entity))
    }

    pub fn remove_entity(&mut self, id: EntityId) -> Option<Entity> {
        self.entities.remove(id.0)
    }

    pub fn try_get_entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.try_get(id.0)
    }

    pub fn try_get_entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.try_get_mut(id.0)
    }

    /// Live ids in registration order, detached from the registry borrow
    pub fn ids(&self) -> Vec<EntityId> {
        self.entities.ids().into_iter().map(EntityId).collect()
    }

    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities.iter().map(|(id, e)| (EntityId(id), e))
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
