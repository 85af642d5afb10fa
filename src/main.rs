//! Meteor Strike entry point
//!
//! Headless native driver: runs a seeded session on a fixed 60 Hz virtual
//! clock with a small autopilot standing in for a human, and logs the event
//! stream. A real frontend drives [`meteor_strike::sim::tick`] the same way
//! with polled input and a renderer consuming the events.

use meteor_strike::Tuning;
use meteor_strike::sim::{GameEvent, GamePhase, GameState, TickInput, Viewport, tick};

/// 60 Hz frame delta in milliseconds
const FRAME_MS: f32 = 1000.0 / 60.0;

/// Cap the demo at two minutes of virtual time
const MAX_FRAMES: u64 = 60 * 120;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0xC0FFEE);

    let mut state = GameState::new(seed, Viewport::new(800.0, 600.0), Tuning::default());
    log::info!("session started with seed {seed}");

    let mut input = TickInput::default();
    let mut now_ms = 0.0f64;
    let mut frames = 0u64;

    while state.phase != GamePhase::GameOver && frames < MAX_FRAMES {
        now_ms += FRAME_MS as f64;
        frames += 1;

        autopilot(&state, &mut input);
        let events = tick(&mut state, &input, now_ms, FRAME_MS);

        // Clear one-shot inputs after processing
        input.fire_pressed = false;
        input.restart_pressed = false;

        for event in events {
            match event {
                GameEvent::ScoreChanged(score) => log::info!("score {score}"),
                GameEvent::LivesChanged(lives) => log::info!("lives {lives}"),
                GameEvent::BonusLifeAwarded => log::info!("bonus life!"),
                GameEvent::DamageTierChanged(tier) => log::debug!("hull {tier:?}"),
                GameEvent::Spawned { id, kind, .. } => log::debug!("spawned {kind:?} #{id}"),
                GameEvent::Destroyed { id } => log::trace!("destroyed #{id}"),
                GameEvent::Moved { .. } => {}
                GameEvent::GameOver => log::info!("game over"),
                GameEvent::Restarted => log::info!("restarted"),
            }
        }
    }

    log::info!(
        "final score {} with {} lives after {:.1}s",
        state.player.score(),
        state.player.lives(),
        now_ms / 1000.0
    );
}

/// Demo-mode stand-in for a player: chase the column of the lowest meteor
/// and keep the trigger held.
fn autopilot(state: &GameState, input: &mut TickInput) {
    let target = state
        .spawner
        .meteors
        .iter()
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        .map(|meteor| meteor.pos.x);

    (input.left_held, input.right_held) = match target {
        Some(x) if x < state.player.pos.x - 4.0 => (true, false),
        Some(x) if x > state.player.pos.x + 4.0 => (false, true),
        _ => (false, false),
    };
    input.fire_pressed = true;
}
