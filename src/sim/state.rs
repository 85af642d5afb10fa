//! Game state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::Tuning;

use super::background::Background;
use super::player::{DamageTier, Player};
use super::spawner::MeteorSpawner;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// The ship has been destroyed; the simulation is frozen until restart
    GameOver,
}

/// Kinds of visual entities the presentation layer is told about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Projectile,
    Meteor,
}

/// What the core tells the presentation layer after each tick.
///
/// Entity lifecycle events carry the stable entity ID the presentation keys
/// its sprites on. Background tiles are deliberately absent: the grid is read
/// directly via [`Background::tiles`] instead of flooding the stream with a
/// `Moved` per tile per frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Spawned { id: u32, kind: EntityKind, pos: Vec2 },
    Moved { id: u32, pos: Vec2 },
    Destroyed { id: u32 },
    LivesChanged(i32),
    ScoreChanged(u32),
    DamageTierChanged(DamageTier),
    BonusLifeAwarded,
    GameOver,
    Restarted,
}

/// Logical screen area the simulation plays in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Dimensions are clamped to [`MIN_VIEWPORT_DIM`] so the tiling math
    /// stays well-defined; non-finite input is a contract violation.
    pub fn new(width: f32, height: f32) -> Self {
        assert!(
            width.is_finite() && height.is_finite(),
            "viewport dimensions must be finite"
        );
        Self {
            width: width.max(MIN_VIEWPORT_DIM),
            height: height.max(MIN_VIEWPORT_DIM),
        }
    }

    /// Top edge of the bottom control panel. Meteors despawn here.
    #[inline]
    pub fn panel_top(&self) -> f32 {
        self.height * (1.0 - UI_PANEL_FRACTION)
    }
}

/// Allocator for stable entity IDs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityIds {
    next: u32,
}

impl EntityIds {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn alloc(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

impl Default for EntityIds {
    fn default() -> Self {
        Self::new()
    }
}

/// Complete simulation state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub viewport: Viewport,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub player: Player,
    pub spawner: MeteorSpawner,
    pub background: Background,
    pub(super) rng: Pcg32,
    pub(super) ids: EntityIds,
}

impl GameState {
    /// Create a fresh session. The presentation layer builds its initial
    /// view from this state directly; events begin with the first tick.
    pub fn new(seed: u64, viewport: Viewport, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut ids = EntityIds::new();
        let player = Player::new(ids.alloc(), &viewport, &tuning);
        let background = Background::new(&viewport, &mut rng);
        Self {
            seed,
            viewport,
            tuning,
            phase: GamePhase::Playing,
            player,
            spawner: MeteorSpawner::new(),
            background,
            rng,
            ids,
        }
    }

    /// Tear down and recreate the mutable session parts: player stats,
    /// live entities, spawn schedule, and a fresh background grid.
    pub fn restart(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.phase = GamePhase::Playing;
        self.player.reset(&self.viewport, &self.tuning);
        self.spawner = MeteorSpawner::new();
        self.background.rebuild(&self.viewport, &mut self.rng);
        log::info!("session restarted with seed {seed}");
    }

    /// Handle a viewport resize: recompute movement clamps, re-center the
    /// ship, and rebuild the background grid at the new dimensions.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
        self.player.recenter(&self.viewport);
        self.background.rebuild(&self.viewport, &mut self.rng);
        log::info!(
            "viewport resized to {}x{}",
            self.viewport.width,
            self.viewport.height
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_clamps_to_minimum() {
        let v = Viewport::new(-5.0, 0.0);
        assert_eq!(v.width, MIN_VIEWPORT_DIM);
        assert_eq!(v.height, MIN_VIEWPORT_DIM);
    }

    #[test]
    #[should_panic]
    fn test_viewport_rejects_non_finite() {
        Viewport::new(f32::NAN, 600.0);
    }

    #[test]
    fn test_panel_top() {
        let v = Viewport::new(800.0, 600.0);
        assert_eq!(v.panel_top(), 480.0);
    }

    #[test]
    fn test_entity_ids_are_unique_and_increasing() {
        let mut ids = EntityIds::new();
        let a = ids.alloc();
        let b = ids.alloc();
        assert!(b > a);
    }

    #[test]
    fn test_new_session_defaults() {
        let state = GameState::new(7, Viewport::new(800.0, 600.0), Tuning::default());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.lives(), 3);
        assert_eq!(state.player.score(), 0);
        assert!(state.player.projectiles.is_empty());
        assert!(state.spawner.meteors.is_empty());
        assert!(state.spawner.is_active());
    }

    #[test]
    fn test_restart_resets_session() {
        let mut state = GameState::new(7, Viewport::new(800.0, 600.0), Tuning::default());
        state.phase = GamePhase::GameOver;
        state.restart(8);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.seed, 8);
        assert_eq!(state.player.lives(), 3);
        assert!(state.spawner.is_active());
    }

    #[test]
    fn test_resize_recenters_player() {
        let mut state = GameState::new(7, Viewport::new(800.0, 600.0), Tuning::default());
        state.resize(1000.0, 400.0);
        assert_eq!(state.player.pos.x, 500.0);
        assert_eq!(state.player.pos.y, 300.0);
    }
}
