//! Per-frame simulation tick
//!
//! One logical tick per rendered frame, driven by an external frame clock
//! that supplies a monotonic timestamp and frame delta in milliseconds.
//! Everything inside a tick is synchronous; the only time-deferred state
//! (invulnerability, fire delay, spawn schedule) lives in deadline fields
//! checked against `now_ms`, so nothing ever needs cancelling on reset.

use super::state::{EntityKind, GameEvent, GamePhase, GameState};

/// Input intents for a single tick, polled by the driver
///
/// The core is agnostic to where intents come from (keyboard, on-screen
/// buttons). One-shot intents are edge-triggered: the driver sets them on
/// the press edge and clears them after the tick that consumed them.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub left_held: bool,
    pub right_held: bool,
    /// Edge-triggered fire request
    pub fire_pressed: bool,
    /// Edge-triggered restart request; only honored after game over
    pub restart_pressed: bool,
}

/// Derive a fresh session seed for an input-driven restart. Drivers that
/// want a specific seed call [`GameState::restart`] themselves instead.
fn next_session_seed(seed: u64) -> u64 {
    seed.wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407)
}

/// Advance the simulation by one frame.
///
/// Order per frame: background scroll, movement/fire intents, projectile
/// motion, meteor spawn-if-due, meteor motion, collision resolution, then
/// the terminal check. Returns the events the presentation layer needs to
/// mirror the state change.
///
/// After game over the simulation is frozen - in-flight meteors keep their
/// last-tick state and nothing spawns, moves, or scores - until a restart
/// is requested.
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    now_ms: f64,
    delta_ms: f32,
) -> Vec<GameEvent> {
    assert!(
        now_ms.is_finite() && delta_ms.is_finite(),
        "tick timestamps must be finite"
    );
    let dt = delta_ms.max(0.0) / 1000.0;
    let mut events = Vec::new();

    if state.phase == GamePhase::GameOver {
        if input.restart_pressed {
            state.restart(next_session_seed(state.seed));
            events.push(GameEvent::Restarted);
            events.push(GameEvent::Spawned {
                id: state.player.id,
                kind: EntityKind::Player,
                pos: state.player.pos,
            });
        }
        return events;
    }

    // Background scroll
    state
        .background
        .advance(dt, state.tuning.scroll_speed, &state.viewport);

    // Movement intents
    let x_before = state.player.pos.x;
    if input.left_held {
        state.player.move_left(dt, &state.viewport, &state.tuning);
    }
    if input.right_held {
        state.player.move_right(dt, &state.viewport, &state.tuning);
    }
    if state.player.pos.x != x_before {
        events.push(GameEvent::Moved {
            id: state.player.id,
            pos: state.player.pos,
        });
    }

    // Fire intent
    if input.fire_pressed {
        if let Some(shot) = state.player.fire(now_ms, &mut state.ids, &state.tuning) {
            events.push(GameEvent::Spawned {
                id: shot.id,
                kind: EntityKind::Projectile,
                pos: shot.pos,
            });
        }
    }

    // Projectile motion; top-edge leavers are destroyed by their owner
    for id in state.player.advance_projectiles(dt) {
        events.push(GameEvent::Destroyed { id });
    }
    for shot in &state.player.projectiles {
        events.push(GameEvent::Moved {
            id: shot.id,
            pos: shot.pos,
        });
    }

    // Meteor spawn-if-due, then motion; panel-reachers are destroyed
    if let Some(meteor) = state.spawner.try_spawn(
        now_ms,
        &state.viewport,
        &mut state.rng,
        &mut state.ids,
        &state.tuning,
    ) {
        events.push(GameEvent::Spawned {
            id: meteor.id,
            kind: EntityKind::Meteor,
            pos: meteor.pos,
        });
    }
    for id in state.spawner.advance_meteors(dt, &state.viewport) {
        events.push(GameEvent::Destroyed { id });
    }
    for meteor in &state.spawner.meteors {
        events.push(GameEvent::Moved {
            id: meteor.id,
            pos: meteor.pos,
        });
    }

    // Collision resolution: pairs from a snapshot, effects applied here
    let outcome = state.spawner.resolve_collisions(&state.player);
    state.player.remove_projectiles(&outcome.destroyed_projectiles);
    for &id in outcome
        .destroyed_meteors
        .iter()
        .chain(&outcome.destroyed_projectiles)
    {
        events.push(GameEvent::Destroyed { id });
    }

    for _ in 0..outcome.damage_ticks {
        if state.player.lives() < 0 {
            break;
        }
        if state.player.take_damage(now_ms, &state.tuning) {
            events.push(GameEvent::LivesChanged(state.player.lives()));
            events.push(GameEvent::DamageTierChanged(state.player.damage_tier()));
        }
    }

    for _ in 0..outcome.kills {
        let bonus = state
            .player
            .add_score(state.tuning.score_per_meteor, &state.tuning);
        events.push(GameEvent::ScoreChanged(state.player.score()));
        if bonus {
            log::info!("bonus life at score {}", state.player.score());
            events.push(GameEvent::BonusLifeAwarded);
            events.push(GameEvent::LivesChanged(state.player.lives()));
            events.push(GameEvent::DamageTierChanged(state.player.damage_tier()));
        }
    }

    // Terminal condition
    if state.player.lives() < 0 {
        state.phase = GamePhase::GameOver;
        state.spawner.stop_spawning();
        log::info!("game over at score {}", state.player.score());
        events.push(GameEvent::GameOver);
    }

    events
}
