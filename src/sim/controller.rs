//! Player controller state machine
//!
//! Runs once per tick for the player entity. Owns the jump budget and the
//! short-lived timers, steers the player's body, and strikes the torch body
//! with kicks (jump-triggered) and bumps (dash-triggered). Every strike that
//! connects refunds one jump, so dash → bump → jump → kick chains can keep
//! the player airborne.

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::entity::Entity;
use super::level::{Level, LevelEvent, SoundCue};
use super::registry::EntityId;
use crate::input::{Action, InputOracle};
use crate::tuning::PlayerTuning;
use crate::{decay, facing_sign, horizontal_axis};

/// Level-wide outputs of a strike on the torch
struct Strike<'a> {
    by: EntityId,
    slow_mo_timer: &'a mut f32,
    events: &'a mut Vec<LevelEvent>,
    rng: &'a mut Pcg32,
}

impl Strike<'_> {
    fn land(&mut self, slow_mo: f32, event: LevelEvent) {
        *self.slow_mo_timer = slow_mo;
        self.events.push(event);
        self.events.push(LevelEvent::Sound(SoundCue::random_click(&mut *self.rng)));
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerController {
    tuning: PlayerTuning,
    /// Entity kicked and bumped by this player
    torch_id: EntityId,

    /// Time the current jump has been held
    jump_timer: f32,
    is_jumping: bool,
    /// Always within `0..=tuning.max_jumps`
    jumps_left: u32,
    dash_direction: Vec2,
    dash_cooldown_timer: f32,
    /// Coyote time remaining
    grace_timer: f32,

    /// A bump already landed during the current dash
    has_bumped: bool,
    /// A kick already landed during the current kick window
    has_kicked: bool,
}

impl PlayerController {
    pub fn new(torch_id: EntityId, tuning: PlayerTuning) -> Self {
        Self {
            tuning,
            torch_id,
            jump_timer: 0.0,
            is_jumping: false,
            jumps_left: tuning.max_jumps,
            dash_direction: Vec2::ZERO,
            dash_cooldown_timer: 0.0,
            grace_timer: 0.0,
            has_bumped: false,
            has_kicked: false,
        }
    }

    pub fn tuning(&self) -> &PlayerTuning {
        &self.tuning
    }

    pub fn torch_id(&self) -> EntityId {
        self.torch_id
    }

    pub fn jumps_left(&self) -> u32 {
        self.jumps_left
    }

    pub fn is_jumping(&self) -> bool {
        self.is_jumping
    }

    pub fn jump_timer(&self) -> f32 {
        self.jump_timer
    }

    pub fn dash_direction(&self) -> Vec2 {
        self.dash_direction
    }

    pub fn dash_cooldown_timer(&self) -> f32 {
        self.dash_cooldown_timer
    }

    pub fn grace_timer(&self) -> f32 {
        self.grace_timer
    }

    /// Advance the controller for `entity_id` by one tick
    pub fn update<I: InputOracle + ?Sized>(
        &mut self,
        entity_id: EntityId,
        level: &mut Level,
        input: &I,
        dt: f32,
    ) {
        let t = self.tuning;

        let Some(body_id) = level
            .entities
            .try_get_entity(entity_id)
            .and_then(|e| e.body_id)
        else {
            return;
        };
        let torch = level.entities.try_get_entity(self.torch_id);
        let torch_put_out = torch.is_some_and(|e| e.is_put_out);
        let torch_body_id = torch.and_then(|e| e.body_id);
        let water_top = level.water_top();

        let Level {
            entities,
            physics,
            slow_mo_timer,
            events,
            rng,
            ..
        } = level;
        let Some(entity) = entities.try_get_entity_mut(entity_id) else {
            return;
        };
        let Some((body, mut torch_body)) = physics.try_get_with_mut(body_id, torch_body_id) else {
            return;
        };
        let mut strike = Strike {
            by: entity_id,
            slow_mo_timer,
            events,
            rng,
        };

        // Terminal until the level is rebuilt
        if torch_put_out {
            if !entity.has_lost_all_hope {
                log::info!("Torch is out, player {:?} has lost all hope", entity_id);
            }
            entity.has_lost_all_hope = true;
            body.velocity.x = 0.0;
            return;
        }

        // Floating on the surface counts as grounded
        let mut speed_modifier = 1.0;
        if body.bottom() >= water_top {
            body.position.y = water_top - body.bounds.bottom();
            if body.velocity.y > 0.0 {
                body.velocity.y = 0.0;
            }
            speed_modifier = t.submerged_speed_modifier;
            self.jumps_left = t.max_jumps;
        }

        let speed = body.speed();

        body.ignores_platforms = input.is_pressed(Action::Drop);

        self.grace_timer = decay(self.grace_timer, dt);

        let left = input.is_pressed(Action::MoveLeft);
        let right = input.is_pressed(Action::MoveRight);

        // No steering out of a dash or a high-speed launch
        if speed < entity.danger_speed && entity.dash_timer <= 0.0 {
            let run = t.movement_speed * speed_modifier;
            if right {
                body.velocity.x = run;
            }
            if left {
                body.velocity.x = -run;
            }
            if !left && !right {
                body.velocity.x = 0.0;
            }
        }

        if body.is_grounded() {
            self.jumps_left = t.max_jumps;
            self.grace_timer = t.grace_period;
        }

        self.dash_cooldown_timer = decay(self.dash_cooldown_timer, dt);

        if entity.dash_timer <= 0.0 {
            self.has_bumped = false;

            if input.just_pressed(Action::Dash) && self.jumps_left > 0 && self.dash_cooldown_timer <= 0.0 {
                let direction = horizontal_axis(left, right);
                if direction.x != 0.0 {
                    self.dash_direction = direction;
                    entity.dash_timer = t.dash_time;
                    self.jumps_left -= 1;
                    self.dash_cooldown_timer = t.dash_cooldown;
                    log::debug!("Player {:?} dashed {:?}", entity_id, direction);
                }
            }
        }

        if entity.kick_timer <= 0.0 {
            self.has_kicked = false;
        }

        let jump_held = input.is_pressed(Action::Jump);

        if input.just_pressed(Action::Jump) && self.jumps_left > 0 {
            body.velocity.y = 0.0;
            body.impulse.y -= t.jump_impulse_step(0.0, dt);

            self.jump_timer = dt;
            self.is_jumping = true;
            self.jumps_left -= 1;

            self.begin_kick(entity, body, torch_body.as_deref());
        } else if jump_held && self.is_jumping && self.jump_timer < t.jump_time {
            body.impulse.y -= t.jump_impulse_step(self.jump_timer, dt);
            self.jump_timer += dt;
        }

        if self.jump_timer >= t.jump_time {
            self.is_jumping = false;
        }

        // Short hop: letting go cancels the rest of the rise
        if !jump_held {
            if body.velocity.y < 0.0 {
                body.velocity.y = 0.0;
            }
            self.jump_timer = 0.0;
            self.is_jumping = false;
        }

        if entity.dash_timer > 0.0 {
            entity.dash_timer = decay(entity.dash_timer, dt);
            body.velocity = self.dash_direction * t.dash_speed;
            self.bump_torch(body, torch_body.as_deref_mut(), &mut strike);
        }

        if entity.kick_timer > 0.0 {
            entity.kick_timer = decay(entity.kick_timer, dt);
            self.kick_torch(body, torch_body.as_deref_mut(), &mut strike);
        }
    }

    /// Start the kick pose when near the torch, or on any air jump past coyote time
    fn begin_kick(&mut self, entity: &mut Entity, body: &Body, torch: Option<&Body>) {
        if self.has_kicked {
            return;
        }

        let near_torch = torch.is_some_and(|torch| body.distance_to(torch) <= self.tuning.kick_distance);
        let airborne = !body.is_grounded() && self.grace_timer <= 0.0;

        if near_torch || airborne {
            self.jumps_left = 0;
            entity.kick_timer = self.tuning.kick_time;
            entity.kick = true;
        }
    }

    /// Strike the torch if it is in reach while the kick window is open
    fn kick_torch(&mut self, body: &Body, torch: Option<&mut Body>, strike: &mut Strike<'_>) {
        if self.has_kicked {
            return;
        }
        let Some(torch) = torch else {
            return;
        };

        let player_center = body.center();
        let torch_center = torch.center();
        if player_center.distance(torch_center) > self.tuning.kick_distance {
            return;
        }

        torch.velocity.y = 0.0;
        torch.impulse += Vec2::new(
            (torch_center.x - player_center.x) * self.tuning.kick_h_multiplier,
            -self.tuning.kick_impulse,
        );

        self.has_kicked = true;
        self.refund_jump();
        log::debug!("Player {:?} kicked the torch", strike.by);
        strike.land(self.tuning.kick_slow_mo, LevelEvent::TorchKicked { by: strike.by });
    }

    /// Knock the torch along the dash direction, once per dash
    fn bump_torch(&mut self, body: &Body, torch: Option<&mut Body>, strike: &mut Strike<'_>) {
        if self.has_bumped {
            return;
        }
        let Some(torch) = torch else {
            return;
        };

        if body.distance_to(torch) > self.tuning.kick_distance {
            return;
        }

        torch.velocity.y = 0.0;
        torch.impulse += Vec2::new(
            facing_sign(body.velocity.x) * self.tuning.dash_h_impulse,
            -self.tuning.dash_impulse,
        );

        self.has_bumped = true;
        self.refund_jump();
        log::debug!("Player {:?} bumped the torch", strike.by);
        strike.land(self.tuning.bump_slow_mo, LevelEvent::TorchBumped { by: strike.by });
    }

    #[inline]
    fn refund_jump(&mut self) {
        self.jumps_left = (self.jumps_left + 1).min(self.tuning.max_jumps);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::input::InputState;
    use crate::sim::test_support::flat_level;
    use proptest::prelude::*;

    const DT: f32 = SIM_DT;

    /// Player standing on the floor of the flat level, torch far to the right
    fn grounded_setup() -> (Level, EntityId, EntityId) {
        let mut level = flat_level();
        let torch = level.spawn_torch_at(Vec2::new(15.0, 28.4));
        let player = level.spawn_player_at(Vec2::new(3.0, 28.1), torch, PlayerTuning::default());
        level.body_of_mut(player).unwrap().contact.y = 1.0;
        (level, player, torch)
    }

    /// Player hanging in mid-air with the torch at `torch_pos`
    fn airborne_setup(torch_pos: Vec2) -> (Level, EntityId, EntityId) {
        let mut level = flat_level();
        let torch = level.spawn_torch_at(torch_pos);
        let player = level.spawn_player_at(Vec2::new(5.0, 15.0), torch, PlayerTuning::default());
        (level, player, torch)
    }

    fn brain(level: &Level, player: EntityId) -> &PlayerController {
        level
            .entities
            .try_get_entity(player)
            .and_then(|e| e.brain.as_ref())
            .unwrap()
    }

    fn brain_mut(level: &mut Level, player: EntityId) -> &mut PlayerController {
        level
            .entities
            .try_get_entity_mut(player)
            .and_then(|e| e.brain.as_mut())
            .unwrap()
    }

    fn entity(level: &Level, id: EntityId) -> &Entity {
        level.entities.try_get_entity(id).unwrap()
    }

    fn pressing(actions: &[Action]) -> InputState {
        let mut input = InputState::new();
        input.set_held(actions);
        input
    }

    #[test]
    fn test_spawned_controller_tracks_its_torch() {
        let tuning = PlayerTuning {
            max_jumps: 3,
            ..PlayerTuning::default()
        };
        let mut level = flat_level();
        let torch = level.spawn_torch_at(Vec2::new(6.0, 28.4));
        let player = level.spawn_player_at(Vec2::new(3.0, 28.1), torch, tuning);

        let controller = brain(&level, player);
        assert_eq!(controller.torch_id(), torch);
        assert_eq!(controller.tuning(), &tuning);
        assert_eq!(controller.jumps_left(), 3);
    }

    #[test]
    fn test_jump_from_ground() {
        let (mut level, player, _) = grounded_setup();
        let input = pressing(&[Action::Jump]);

        level.run_controllers(&input, DT);

        let brain = brain(&level, player);
        assert_eq!(brain.jumps_left(), 1);
        assert!(brain.is_jumping());
        let body = level.body_of(player).unwrap();
        let expected = PlayerTuning::default().jump_impulse_step(0.0, DT);
        assert!((body.impulse.y + expected).abs() < 1e-5);
        assert_eq!(body.velocity.y, 0.0);
        assert!(!entity(&level, player).kick);
    }

    #[test]
    fn test_held_jump_ramps_then_stops() {
        let (mut level, player, _) = grounded_setup();
        let tuning = PlayerTuning::default();
        let mut input = pressing(&[Action::Jump]);

        let mut total = 0.0;
        for _ in 0..12 {
            level.run_controllers(&input, DT);
            let body = level.body_of_mut(player).unwrap();
            total -= body.impulse.y;
            body.impulse = Vec2::ZERO;
            body.contact.y = 0.0;
            input.end_frame();
        }

        assert!((total - tuning.jump_impulse).abs() < 1e-3, "total {total}");
        assert!(!brain(&level, player).is_jumping());
    }

    #[test]
    fn test_releasing_jump_cancels_rise() {
        let (mut level, player, _) = grounded_setup();
        let mut input = pressing(&[Action::Jump]);
        level.run_controllers(&input, DT);
        input.end_frame();

        let body = level.body_of_mut(player).unwrap();
        body.velocity.y = -8.0;
        body.contact.y = 0.0;
        input.release(Action::Jump);
        level.run_controllers(&input, DT);

        let brain = brain(&level, player);
        assert!(!brain.is_jumping());
        assert_eq!(brain.jump_timer(), 0.0);
        assert_eq!(level.body_of(player).unwrap().velocity.y, 0.0);

        // Holding again without a fresh press does not resume the ramp
        level.body_of_mut(player).unwrap().impulse = Vec2::ZERO;
        input.press(Action::Jump);
        input.end_frame();
        level.run_controllers(&input, DT);
        assert_eq!(level.body_of(player).unwrap().impulse.y, 0.0);
    }

    #[test]
    fn test_grounding_restores_budget_and_grace() {
        let (mut level, player, _) = grounded_setup();
        brain_mut(&mut level, player).jumps_left = 0;

        level.run_controllers(&InputState::new(), DT);

        let brain = brain(&level, player);
        assert_eq!(brain.jumps_left(), 2);
        assert_eq!(brain.grace_timer(), PlayerTuning::default().grace_period);
    }

    #[test]
    fn test_coyote_jump_is_not_a_kick() {
        let (mut level, player, _) = grounded_setup();
        level.run_controllers(&InputState::new(), DT);

        // Walked off a ledge one tick ago
        level.body_of_mut(player).unwrap().contact.y = 0.0;
        level.run_controllers(&pressing(&[Action::Jump]), DT);

        assert_eq!(brain(&level, player).jumps_left(), 1);
        assert!(!entity(&level, player).kick);
    }

    #[test]
    fn test_air_jump_without_torch_nearby_flags_kick_but_misses() {
        let (mut level, player, torch) = airborne_setup(Vec2::new(15.0, 28.4));
        brain_mut(&mut level, player).jumps_left = 1;

        level.run_controllers(&pressing(&[Action::Jump]), DT);

        let e = entity(&level, player);
        assert!(e.kick);
        assert!(e.kick_timer > 0.0);
        assert_eq!(brain(&level, player).jumps_left(), 0);
        assert_eq!(level.body_of(torch).unwrap().impulse, Vec2::ZERO);
        assert!(!brain(&level, player).has_kicked);
        assert_eq!(level.slow_mo_timer, 0.0);
    }

    #[test]
    fn test_kick_strikes_nearby_torch() {
        let tuning = PlayerTuning::default();
        let (mut level, player, torch) = airborne_setup(Vec2::new(5.8, 15.2));

        level.run_controllers(&pressing(&[Action::Jump]), DT);

        let player_center = level.body_of(player).unwrap().center();
        let torch_body = level.body_of(torch).unwrap();
        let offset = torch_body.center().x - player_center.x;
        assert!((torch_body.impulse.x - offset * tuning.kick_h_multiplier).abs() < 1e-4);
        assert_eq!(torch_body.impulse.y, -tuning.kick_impulse);

        // Jump used one, the kick zeroed the rest, the hit refunds one
        assert_eq!(brain(&level, player).jumps_left(), 1);
        assert_eq!(level.slow_mo_timer, tuning.kick_slow_mo);

        let events = level.drain_events();
        assert!(events.contains(&LevelEvent::TorchKicked { by: player }));
        assert!(events.iter().any(|e| matches!(e, LevelEvent::Sound(_))));
    }

    #[test]
    fn test_kick_lands_once_per_window() {
        let (mut level, _, torch) = airborne_setup(Vec2::new(5.8, 15.2));
        let mut input = pressing(&[Action::Jump]);
        level.run_controllers(&input, DT);
        input.end_frame();

        level.body_of_mut(torch).unwrap().impulse = Vec2::ZERO;
        level.run_controllers(&input, DT);
        assert_eq!(level.body_of(torch).unwrap().impulse, Vec2::ZERO);
    }

    #[test]
    fn test_kick_resolves_later_when_torch_arrives() {
        let (mut level, player, torch) = airborne_setup(Vec2::new(15.0, 15.0));
        let mut input = pressing(&[Action::Jump]);
        level.run_controllers(&input, DT);
        input.end_frame();
        assert!(entity(&level, player).kick);
        assert_eq!(brain(&level, player).jumps_left(), 0);

        // Torch drifts into reach while the kick window is still open
        level.body_of_mut(torch).unwrap().position = Vec2::new(5.5, 15.0);
        level.run_controllers(&input, DT);

        assert!(level.body_of(torch).unwrap().impulse.y < 0.0);
        assert_eq!(brain(&level, player).jumps_left(), 1);
    }

    #[test]
    fn test_dash_right() {
        let tuning = PlayerTuning::default();
        let (mut level, player, _) = grounded_setup();
        level.run_controllers(&pressing(&[Action::MoveRight, Action::Dash]), DT);

        let brain = brain(&level, player);
        assert_eq!(brain.dash_direction(), Vec2::new(1.0, 0.0));
        assert_eq!(brain.jumps_left(), 1);
        assert_eq!(brain.dash_cooldown_timer(), tuning.dash_cooldown);
        assert!(entity(&level, player).dash_timer > 0.0);
        assert_eq!(level.body_of(player).unwrap().velocity, Vec2::new(tuning.dash_speed, 0.0));
    }

    #[test]
    fn test_dash_without_direction_is_discarded() {
        let (mut level, player, _) = grounded_setup();
        level.run_controllers(&pressing(&[Action::Dash]), DT);

        let controller = brain(&level, player);
        assert_eq!(controller.jumps_left(), 2);
        assert_eq!(controller.dash_cooldown_timer(), 0.0);
        assert_eq!(entity(&level, player).dash_timer, 0.0);

        // Left and right together cancel out
        let (mut level, player, _) = grounded_setup();
        level.run_controllers(&pressing(&[Action::MoveLeft, Action::MoveRight, Action::Dash]), DT);
        assert_eq!(brain(&level, player).jumps_left(), 2);
    }

    #[test]
    fn test_dash_respects_cooldown() {
        let (mut level, player, _) = grounded_setup();
        let mut input = pressing(&[Action::MoveRight, Action::Dash]);
        level.run_controllers(&input, DT);
        input.end_frame();

        // Let the dash finish but not the cooldown
        for _ in 0..8 {
            level.run_controllers(&input, DT);
        }
        assert_eq!(entity(&level, player).dash_timer, 0.0);

        input.release(Action::Dash);
        input.press(Action::Dash);
        level.run_controllers(&input, DT);
        assert_eq!(entity(&level, player).dash_timer, 0.0);
    }

    #[test]
    fn test_bump_pushes_torch_along_dash() {
        let tuning = PlayerTuning::default();
        let (mut level, player, torch) = grounded_setup();
        level.body_of_mut(torch).unwrap().position = Vec2::new(4.0, 28.4);

        level.run_controllers(&pressing(&[Action::MoveLeft, Action::Dash]), DT);

        let torch_body = level.body_of(torch).unwrap();
        assert_eq!(torch_body.impulse, Vec2::new(-tuning.dash_h_impulse, -tuning.dash_impulse));
        // Dash spent one, the bump gave it back
        assert_eq!(brain(&level, player).jumps_left(), 2);
        assert_eq!(level.slow_mo_timer, tuning.bump_slow_mo);
        assert!(brain(&level, player).has_bumped);
    }

    #[test]
    fn test_movement_blocked_during_dash_and_above_danger_speed() {
        let (mut level, player, _) = grounded_setup();
        level.body_of_mut(player).unwrap().velocity.x = 30.0;
        level.run_controllers(&pressing(&[Action::MoveLeft]), DT);
        assert_eq!(level.body_of(player).unwrap().velocity.x, 30.0);

        level.body_of_mut(player).unwrap().velocity.x = 2.0;
        level.run_controllers(&pressing(&[Action::MoveLeft]), DT);
        assert_eq!(level.body_of(player).unwrap().velocity.x, -PlayerTuning::default().movement_speed);

        level.run_controllers(&InputState::new(), DT);
        assert_eq!(level.body_of(player).unwrap().velocity.x, 0.0);
    }

    #[test]
    fn test_drop_mirrors_ignore_platforms() {
        let (mut level, player, _) = grounded_setup();
        level.run_controllers(&pressing(&[Action::Drop]), DT);
        assert!(level.body_of(player).unwrap().ignores_platforms);
        level.run_controllers(&InputState::new(), DT);
        assert!(!level.body_of(player).unwrap().ignores_platforms);
    }

    #[test]
    fn test_submersion_clamps_to_surface() {
        let tuning = PlayerTuning::default();
        let (mut level, player, _) = airborne_setup(Vec2::new(15.0, 28.4));
        level.water_level = 10.0;
        let water_top = level.water_top();
        brain_mut(&mut level, player).jumps_left = 0;
        let body = level.body_of_mut(player).unwrap();
        body.position.y = water_top - 0.4;
        body.velocity.y = 6.0;

        level.run_controllers(&pressing(&[Action::MoveRight]), DT);

        let body = level.body_of(player).unwrap();
        assert!((body.bottom() - water_top).abs() < 1e-4);
        assert_eq!(body.velocity.y, 0.0);
        assert_eq!(body.velocity.x, tuning.movement_speed * tuning.submerged_speed_modifier);
        assert_eq!(brain(&level, player).jumps_left(), tuning.max_jumps);
    }

    #[test]
    fn test_torch_out_freezes_player() {
        let (mut level, player, torch) = grounded_setup();
        level.entities.try_get_entity_mut(torch).unwrap().is_put_out = true;
        let mut input = pressing(&[Action::MoveRight, Action::Jump]);

        for _ in 0..5 {
            level.body_of_mut(player).unwrap().velocity.x = 4.0;
            level.run_controllers(&input, DT);
            input.end_frame();
            assert_eq!(level.body_of(player).unwrap().velocity.x, 0.0);
        }

        assert!(entity(&level, player).has_lost_all_hope);
        assert_eq!(brain(&level, player).jumps_left(), 2);
        assert_eq!(level.body_of(player).unwrap().impulse, Vec2::ZERO);
    }

    #[test]
    fn test_missing_torch_entity_still_moves() {
        let mut level = flat_level();
        let player = level.spawn_player_at(Vec2::new(3.0, 28.1), EntityId(999), PlayerTuning::default());
        level.run_controllers(&pressing(&[Action::MoveRight]), DT);
        assert_eq!(level.body_of(player).unwrap().velocity.x, PlayerTuning::default().movement_speed);
    }

    fn actions_from_bits(bits: u8) -> Vec<Action> {
        [Action::MoveLeft, Action::MoveRight, Action::Jump, Action::Dash, Action::Drop]
            .into_iter()
            .enumerate()
            .filter(|(i, _)| bits & (1 << i) != 0)
            .map(|(_, a)| a)
            .collect()
    }

    proptest! {
        #[test]
        fn prop_jump_budget_stays_bounded(frames in prop::collection::vec(any::<u8>(), 1..240)) {
            let mut level = flat_level();
            let (player, _) = {
                let torch = level.spawn_torch_at(Vec2::new(6.0, 28.4));
                let player = level.spawn_player_at(Vec2::new(4.0, 28.1), torch, PlayerTuning::default());
                (player, torch)
            };
            let max = PlayerTuning::default().max_jumps;
            let mut input = InputState::new();

            for bits in frames {
                input.set_held(&actions_from_bits(bits));
                level.update(&input, DT);
                input.end_frame();
                prop_assert!(brain(&level, player).jumps_left() <= max);
            }
        }

        #[test]
        fn prop_lost_hope_zeroes_horizontal_velocity(frames in prop::collection::vec(any::<u8>(), 1..60)) {
            let (mut level, player, torch) = grounded_setup();
            level.entities.try_get_entity_mut(torch).unwrap().is_put_out = true;
            let mut input = InputState::new();

            for bits in frames {
                input.set_held(&actions_from_bits(bits));
                level.run_controllers(&input, DT);
                input.end_frame();
                prop_assert_eq!(level.body_of(player).unwrap().velocity.x, 0.0);
            }
        }
    }
}
