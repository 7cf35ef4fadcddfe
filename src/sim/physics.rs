//! Body integration against the tile map
//!
//! The level treats integration as a service behind [`Integrator`]. The
//! bundled [`TileIntegrator`] is a plain axis-separated AABB resolver, enough
//! to run the gameplay rules headless.

use glam::Vec2;

use super::body::Body;
use super::tilemap::{TileCollision, TileMap};
use crate::consts::{GRAVITY, MAX_FALL_SPEED};

/// Slack so bodies resting exactly on a tile edge do not overlap it
const EDGE_EPSILON: f32 = 1e-4;

/// Advances one body by `dt` against the tile map.
///
/// Implementations consume and clear the impulse/force accumulators, update
/// position and velocity, and set per-axis contact flags.
pub trait Integrator: std::fmt::Debug {
    fn advance(&self, body: &mut Body, dt: f32, map: &TileMap);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileIntegrator {
    pub gravity: f32,
    pub max_fall_speed: f32,
    /// Largest displacement per substep, in tiles
    pub max_step: f32,
}

impl Default for TileIntegrator {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            max_fall_speed: MAX_FALL_SPEED,
            max_step: 0.5,
        }
    }
}

/// Inclusive tile index range covered by `[min, max)`
#[inline]
fn tile_span(min: f32, max: f32, tile_size: f32) -> (i32, i32) {
    let first = ((min + EDGE_EPSILON) / tile_size).floor() as i32;
    let last = ((max - EDGE_EPSILON) / tile_size).ceil() as i32 - 1;
    (first, last)
}

impl TileIntegrator {
    fn move_x(&self, body: &mut Body, dx: f32, map: &TileMap) {
        body.position.x += dx;

        let ts = map.tile_size();
        let (x0, x1) = tile_span(
            body.position.x + body.bounds.left(),
            body.position.x + body.bounds.right(),
            ts,
        );
        let (y0, y1) = tile_span(
            body.position.y + body.bounds.top(),
            body.position.y + body.bounds.bottom(),
            ts,
        );

        let mut hit: Option<f32> = None;
        for ty in y0..=y1 {
            for tx in x0..=x1 {
                if !map.collision_at(tx, ty).is_solid() {
                    continue;
                }
                let edge = if dx > 0.0 { tx as f32 * ts } else { (tx + 1) as f32 * ts };
                hit = Some(match hit {
                    Some(h) if dx > 0.0 => h.min(edge),
                    Some(h) => h.max(edge),
                    None => edge,
                });
            }
        }

        if let Some(edge) = hit {
            body.position.x = if dx > 0.0 {
                edge - body.bounds.right()
            } else {
                edge - body.bounds.left()
            };
            body.velocity.x = 0.0;
            body.contact.x = dx.signum();
        }
    }

    fn move_y(&self, body: &mut Body, dy: f32, map: &TileMap) {
        let prev_bottom = body.bottom();
        body.position.y += dy;

        let ts = map.tile_size();
        let (x0, x1) = tile_span(
            body.position.x + body.bounds.left(),
            body.position.x + body.bounds.right(),
            ts,
        );
        let (y0, y1) = tile_span(
            body.position.y + body.bounds.top(),
            body.position.y + body.bounds.bottom(),
            ts,
        );

        let mut hit: Option<f32> = None;
        for ty in y0..=y1 {
            let tile_top = ty as f32 * ts;
            for tx in x0..=x1 {
                let blocks = match map.collision_at(tx, ty) {
                    TileCollision::Solid | TileCollision::Grate => true,
                    TileCollision::Platform => {
                        dy > 0.0 && !body.ignores_platforms && prev_bottom <= tile_top + EDGE_EPSILON
                    }
                    TileCollision::None => false,
                };
                if !blocks {
                    continue;
                }
                let edge = if dy > 0.0 { tile_top } else { tile_top + ts };
                hit = Some(match hit {
                    Some(h) if dy > 0.0 => h.min(edge),
                    Some(h) => h.max(edge),
                    None => edge,
                });
            }
        }

        if let Some(edge) = hit {
            body.position.y = if dy > 0.0 {
                edge - body.bounds.bottom()
            } else {
                edge - body.bounds.top()
            };
            body.velocity.y = 0.0;
            body.contact.y = dy.signum();
        }
    }
}

impl Integrator for TileIntegrator {
    fn advance(&self, body: &mut Body, dt: f32, map: &TileMap) {
        body.velocity += body.impulse;
        body.impulse = Vec2::ZERO;
        body.velocity += body.force * dt;
        body.force = Vec2::ZERO;

        body.velocity.y = (body.velocity.y + self.gravity * dt).min(self.max_fall_speed);
        body.velocity.x *= (1.0 - body.friction * dt).max(0.0);

        body.contact = Vec2::ZERO;

        let delta = body.velocity * dt;
        let max_step = (self.max_step * map.tile_size()).max(f32::EPSILON);
        let steps = ((delta.abs().max_element() / max_step).ceil() as u32).max(1);
        let step = delta / steps as f32;

        for _ in 0..steps {
            if step.x != 0.0 && body.contact.x == 0.0 {
                self.move_x(body, step.x, map);
            }
            if step.y != 0.0 && body.contact.y == 0.0 {
                self.move_y(body, step.y, map);
            }
        }
    }
}
