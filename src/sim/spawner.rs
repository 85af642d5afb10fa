//! Meteor spawning and per-tick collision resolution
//!
//! The spawner owns the live meteor collection and the randomized spawn
//! schedule. Collision effects that belong to the player (damage ticks,
//! consumed projectiles, kill count) are reported back to the tick
//! orchestrator rather than applied through a mutable player reference;
//! the spawner only reads player state.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::Tuning;

use super::collision::{Rect, resolve};
use super::player::Player;
use super::state::{EntityIds, Viewport};

/// A falling meteor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Meteor {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Meteor {
    pub fn new(id: u32, pos: Vec2, vel: Vec2) -> Self {
        assert!(
            pos.is_finite() && vel.is_finite(),
            "meteor position/velocity must be finite"
        );
        Self { id, pos, vel }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, Vec2::new(METEOR_WIDTH, METEOR_HEIGHT))
    }

    /// Move by `velocity * dt`. Returns true once the meteor has reached
    /// `exit_y` (the control panel's top edge); the owner destroys it.
    pub fn advance(&mut self, dt: f32, exit_y: f32) -> bool {
        self.pos += self.vel * dt;
        self.pos.y > exit_y
    }
}

/// Collision effects of one tick, for the orchestrator to apply
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionOutcome {
    /// One damage tick per meteor that struck the ship
    pub damage_ticks: u32,
    /// Meteors destroyed by projectiles (each worth a score bonus)
    pub kills: u32,
    pub destroyed_meteors: Vec<u32>,
    pub destroyed_projectiles: Vec<u32>,
}

/// Owner of the live meteors and the spawn schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeteorSpawner {
    /// Live meteors, in spawn order
    pub meteors: Vec<Meteor>,
    /// Absolute time the next spawn is due. Starts in the past so the
    /// first meteor appears on the first tick.
    spawn_deadline_ms: f64,
    /// Cleared on game over; suppresses all further spawns
    active: bool,
}

impl MeteorSpawner {
    pub fn new() -> Self {
        Self {
            meteors: Vec::new(),
            spawn_deadline_ms: 0.0,
            active: true,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn stop_spawning(&mut self) {
        self.active = false;
    }

    /// Spawn one meteor if the schedule says it is due, then redraw the
    /// next interval uniformly from the tuning bounds. The horizontal
    /// position keeps the meteor inside the band the ship can reach.
    /// Returns a copy of the new meteor when one was spawned.
    pub fn try_spawn(
        &mut self,
        now_ms: f64,
        viewport: &Viewport,
        rng: &mut Pcg32,
        ids: &mut EntityIds,
        tuning: &Tuning,
    ) -> Option<Meteor> {
        if !self.active || now_ms <= self.spawn_deadline_ms {
            return None;
        }

        let min_x = Player::half_width();
        let max_x = (viewport.width - Player::half_width()).max(min_x);
        let x = rng.random_range(min_x..=max_x);

        let meteor = Meteor::new(
            ids.alloc(),
            Vec2::new(x, METEOR_SPAWN_Y),
            Vec2::new(0.0, tuning.meteor_speed),
        );
        self.meteors.push(meteor);

        let interval = rng.random_range(tuning.min_spawn_interval_ms..=tuning.max_spawn_interval_ms);
        self.spawn_deadline_ms = now_ms + interval;
        Some(meteor)
    }

    /// Advance all live meteors; remove and report the ones that reached
    /// the control panel.
    pub fn advance_meteors(&mut self, dt: f32, viewport: &Viewport) -> Vec<u32> {
        let exit_y = viewport.panel_top();
        let mut destroyed = Vec::new();
        self.meteors.retain_mut(|m| {
            if m.advance(dt, exit_y) {
                destroyed.push(m.id);
                false
            } else {
                true
            }
        });
        destroyed
    }

    /// Two-phase collision resolution: pair meteors against the ship and
    /// its live projectiles from a read-only snapshot, then remove the
    /// struck meteors and report the player-side effects to the caller.
    pub fn resolve_collisions(&mut self, player: &Player) -> CollisionOutcome {
        let player_bounds = player.bounds();
        let projectile_bounds: Vec<Rect> = player.projectiles.iter().map(|p| p.bounds()).collect();
        let meteor_bounds: Vec<Rect> = self.meteors.iter().map(|m| m.bounds()).collect();

        let pairs = resolve(&player_bounds, &projectile_bounds, &meteor_bounds);

        let mut outcome = CollisionOutcome {
            damage_ticks: pairs.player_hits.len() as u32,
            kills: pairs.projectile_hits.len() as u32,
            ..CollisionOutcome::default()
        };
        for &mi in &pairs.player_hits {
            outcome.destroyed_meteors.push(self.meteors[mi].id);
        }
        for &(mi, pi) in &pairs.projectile_hits {
            outcome.destroyed_meteors.push(self.meteors[mi].id);
            outcome.destroyed_projectiles.push(player.projectiles[pi].id);
        }

        self.meteors.retain(|m| !outcome.destroyed_meteors.contains(&m.id));
        outcome
    }
}

impl Default for MeteorSpawner {
    fn default() -> Self {
        Self::new()
    }
}
