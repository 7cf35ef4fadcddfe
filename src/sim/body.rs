//! Physics bodies and their registry

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::registry::{BodyId, Registry};

/// Axis-aligned bounds relative to the body position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Top-left corner offset from the body position
    pub offset: Vec2,
    pub size: Vec2,
}

impl Bounds {
    pub fn new(offset: Vec2, size: Vec2) -> Self {
        Self { offset, size }
    }

    /// Bounds with the top-left corner at the body position
    pub fn sized(width: f32, height: f32) -> Self {
        Self::new(Vec2::ZERO, Vec2::new(width, height))
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.offset + self.size / 2.0
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.offset.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.offset.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.offset.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.offset.y + self.size.y
    }
}

/// A rigid body integrated once per tick against the tile map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Instant velocity change applied on the next integration
    pub impulse: Vec2,
    /// Acceleration applied over the next integration
    pub force: Vec2,
    pub bounds: Bounds,
    /// Per-axis contact sign from the previous integration (+y = standing on something)
    pub contact: Vec2,
    /// Horizontal damping coefficient (1/s)
    pub friction: f32,
    /// Fall through one-way platforms
    pub ignores_platforms: bool,
}

impl Body {
    pub fn new(position: Vec2, bounds: Bounds) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            impulse: Vec2::ZERO,
            force: Vec2::ZERO,
            bounds,
            contact: Vec2::ZERO,
            friction: 0.0,
            ignores_platforms: false,
        }
    }

    /// World-space bounds center
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.position + self.bounds.center()
    }

    /// World-space bottom edge
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.position.y + self.bounds.bottom()
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Touching something below after the last integration
    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.contact.y > 0.0
    }

    pub fn distance_to(&self, other: &Body) -> f32 {
        self.center().distance(other.center())
    }
}

/// Registry of every body in a level
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhysicsWorld {
    bodies: Registry<Body>,
}

impl PhysicsWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_body(&mut self, body: Body) -> BodyId {
        BodyId(self.bodies.insert(body))
    }

    pub fn remove_body(&mut self, id: BodyId) -> Option<Body> {
        self.bodies.remove(id.0)
    }

    pub fn try_get_body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.try_get(id.0)
    }

    pub fn try_get_body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.try_get_mut(id.0)
    }

    /// Resolve a body together with an optional second, distinct body
    pub fn try_get_with_mut(
        &mut self,
        id: BodyId,
        other: Option<BodyId>,
    ) -> Option<(&mut Body, Option<&mut Body>)> {
        match other {
            Some(other) if other != id => {
                let (body, other) = self.bodies.try_get_pair_mut(id.0, other.0);
                body.map(|b| (b, other))
            }
            _ => self.bodies.try_get_mut(id.0).map(|b| (b, None)),
        }
    }

    pub fn bodies(&self) -> impl Iterator<Item = (BodyId, &Body)> {
        self.bodies.iter().map(|(id, b)| (BodyId(id), b))
    }

    pub fn bodies_mut(&mut self) -> impl Iterator<Item = (BodyId, &mut Body)> {
        self.bodies.iter_mut().map(|(id, b)| (BodyId(id), b))
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}
