//! Ember Climb - headless runner
//!
//! Plays a scripted input pattern through the session and logs what
//! happens. Usage: `ember-climb [settings.json] [frames]`.
//! Set `RUST_LOG=debug` for per-strike detail.

use std::process::ExitCode;

use ember_climb::consts::SIM_DT;
use ember_climb::sim::LevelEvent;
use ember_climb::{Action, Game, GameSettings, InputState};

/// Frames simulated when no count is given (one minute at 60 fps)
const DEFAULT_FRAMES: u32 = 3600;

/// Held actions for `frame` of the demo script.
///
/// Runs in alternating directions, jumping and double-jumping, with a dash
/// every other second.
fn scripted_actions(frame: u32) -> Vec<Action> {
    let mut held = Vec::new();
    let second = frame / 60;
    let within = frame % 60;

    held.push(if second % 4 < 2 { Action::MoveRight } else { Action::MoveLeft });
    if within < 8 || (20..26).contains(&within) {
        held.push(Action::Jump);
    }
    if second % 2 == 1 && (30..32).contains(&within) {
        held.push(Action::Dash);
    }
    held
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Ember Climb (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => match GameSettings::load(&path) {
            Ok(settings) => settings,
            Err(err) => {
                log::error!("Could not load {}: {}", path, err);
                return ExitCode::FAILURE;
            }
        },
        None => GameSettings::default(),
    };
    let frames = args
        .next()
        .and_then(|n| n.parse().ok())
        .unwrap_or(DEFAULT_FRAMES);

    let mut game = match Game::new(settings) {
        Ok(game) => game,
        Err(err) => {
            log::error!("Could not start session: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let mut input = InputState::new();
    let mut ticks = 0u64;
    let mut kicks = 0u32;
    let mut bumps = 0u32;

    for frame in 0..frames {
        input.set_held(&scripted_actions(frame));
        ticks += u64::from(game.frame(&input, SIM_DT));
        input.end_frame();

        for event in game.drain_events() {
            match event {
                LevelEvent::TorchKicked { .. } => kicks += 1,
                LevelEvent::TorchBumped { .. } => bumps += 1,
                LevelEvent::PutOut(id) if id == game.torch() => {
                    log::info!("Torch went out on frame {}, restarting", frame);
                    game.restart();
                }
                LevelEvent::Sound(cue) => log::debug!("Play {:?}", cue),
                other => log::debug!("{:?}", other),
            }
        }
    }

    let level = game.level();
    let height = level
        .body_of(game.player())
        .map(|body| level.tile_map.world_size().y - body.bottom())
        .unwrap_or_default();
    log::info!(
        "Ran {} frames ({} ticks): level {}/{}, player {:.1} units up, {} kicks, {} bumps",
        frames,
        ticks,
        game.level_index() + 1,
        game.level_count(),
        height,
        kicks,
        bumps
    );

    ExitCode::SUCCESS
}
