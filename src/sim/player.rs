//! Player ship: movement, firing, damage tiers, and bonus lives

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::Tuning;

use super::collision::Rect;
use super::state::{EntityIds, Viewport};

/// Discrete hull-damage bucket derived from remaining lives.
///
/// The presentation layer maps tiers to increasingly battered ship
/// variants; `Destroyed` is the terminal sentinel that plays the death
/// animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageTier {
    Intact,
    Scorched,
    Battered,
    Wrecked,
    Destroyed,
}

impl DamageTier {
    pub fn for_lives(lives: i32) -> Self {
        match lives {
            2 => DamageTier::Scorched,
            1 => DamageTier::Battered,
            0 => DamageTier::Wrecked,
            _ if lives < 0 => DamageTier::Destroyed,
            _ => DamageTier::Intact,
        }
    }
}

/// A projectile fired by the ship
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Projectile {
    pub fn new(id: u32, pos: Vec2, vel: Vec2) -> Self {
        assert!(
            pos.is_finite() && vel.is_finite(),
            "projectile position/velocity must be finite"
        );
        Self { id, pos, vel }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, Vec2::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT))
    }

    /// Move by `velocity * dt`. Returns true once the projectile has fully
    /// crossed the top edge of the play area; the owner destroys it.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.pos += self.vel * dt;
        self.pos.y < -PROJECTILE_HEIGHT
    }
}

/// The player ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    /// Ship center. `y` is fixed per viewport; only `x` moves.
    pub pos: Vec2,
    lives: i32,
    score: u32,
    /// Score at which the last bonus life was granted
    last_bonus_life_score: u32,
    /// Deadline checked each tick; no timer is ever scheduled
    invulnerable_until_ms: Option<f64>,
    last_fire_ms: Option<f64>,
    /// Live projectiles, in firing order
    pub projectiles: Vec<Projectile>,
}

impl Player {
    pub fn new(id: u32, viewport: &Viewport, tuning: &Tuning) -> Self {
        Self {
            id,
            pos: Self::anchor(viewport),
            lives: tuning.starting_lives,
            score: 0,
            last_bonus_life_score: 0,
            invulnerable_until_ms: None,
            last_fire_ms: None,
            projectiles: Vec::new(),
        }
    }

    fn anchor(viewport: &Viewport) -> Vec2 {
        Vec2::new(viewport.width / 2.0, viewport.height * PLAYER_Y_FRACTION)
    }

    #[inline]
    pub fn half_width() -> f32 {
        PLAYER_WIDTH / 2.0
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT))
    }

    pub fn lives(&self) -> i32 {
        self.lives
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn damage_tier(&self) -> DamageTier {
        DamageTier::for_lives(self.lives)
    }

    pub fn is_invulnerable(&self, now_ms: f64) -> bool {
        matches!(self.invulnerable_until_ms, Some(deadline) if now_ms < deadline)
    }

    /// Clamp so the ship's bounding box never exits the horizontal bounds
    fn clamp_x(&mut self, viewport: &Viewport) {
        let half = Self::half_width();
        self.pos.x = self.pos.x.clamp(half, (viewport.width - half).max(half));
    }

    pub fn move_left(&mut self, dt: f32, viewport: &Viewport, tuning: &Tuning) {
        self.pos.x -= tuning.move_speed * dt;
        self.clamp_x(viewport);
    }

    pub fn move_right(&mut self, dt: f32, viewport: &Viewport, tuning: &Tuning) {
        self.pos.x += tuning.move_speed * dt;
        self.clamp_x(viewport);
    }

    /// Fire a projectile from the ship's horizontal center at the top edge
    /// of its bounding box. Rate-limited by `tuning.fire_delay_ms`; returns
    /// a copy of the new projectile when a shot was actually fired.
    pub fn fire(&mut self, now_ms: f64, ids: &mut EntityIds, tuning: &Tuning) -> Option<Projectile> {
        assert!(self.lives >= 0, "fire() on a destroyed player");
        if let Some(last) = self.last_fire_ms {
            if now_ms - last < tuning.fire_delay_ms {
                return None;
            }
        }
        let muzzle = Vec2::new(self.pos.x, self.pos.y - PLAYER_HEIGHT / 2.0);
        let shot = Projectile::new(
            ids.alloc(),
            muzzle,
            Vec2::new(0.0, -tuning.projectile_speed),
        );
        self.projectiles.push(shot);
        self.last_fire_ms = Some(now_ms);
        Some(shot)
    }

    /// Apply one damage tick. A no-op while invulnerable; otherwise
    /// decrements lives and opens the invulnerability window. Returns
    /// whether damage was actually applied.
    pub fn take_damage(&mut self, now_ms: f64, tuning: &Tuning) -> bool {
        assert!(self.lives >= 0, "take_damage() on a destroyed player");
        if self.is_invulnerable(now_ms) {
            return false;
        }
        self.lives -= 1;
        self.invulnerable_until_ms = Some(now_ms + tuning.invulnerable_ms);
        true
    }

    /// Add points and grant a bonus life when the score crosses a new
    /// multiple of `tuning.score_for_bonus_life` since the last grant.
    /// The watermark moves to the current score, not the multiple boundary.
    /// Returns whether a bonus life was granted.
    pub fn add_score(&mut self, points: u32, tuning: &Tuning) -> bool {
        self.score += points;

        let threshold = tuning.score_for_bonus_life.max(1);
        let current_level = self.score / threshold;
        let last_level = self.last_bonus_life_score / threshold;

        if current_level > last_level && self.lives < tuning.max_lives {
            self.lives = (self.lives + 1).min(tuning.max_lives);
            self.last_bonus_life_score = self.score;
            return true;
        }
        false
    }

    /// Advance all live projectiles; remove and report the ones that left
    /// the play area.
    pub fn advance_projectiles(&mut self, dt: f32) -> Vec<u32> {
        let mut destroyed = Vec::new();
        self.projectiles.retain_mut(|p| {
            if p.advance(dt) {
                destroyed.push(p.id);
                false
            } else {
                true
            }
        });
        destroyed
    }

    /// Remove projectiles consumed by collisions this tick
    pub fn remove_projectiles(&mut self, ids: &[u32]) {
        self.projectiles.retain(|p| !ids.contains(&p.id));
    }

    /// Re-anchor the ship after a viewport resize
    pub fn recenter(&mut self, viewport: &Viewport) {
        self.pos = Self::anchor(viewport);
    }

    /// Restore session defaults: full lives, zero score, cleared
    /// invulnerability and projectiles. Used on restart.
    pub fn reset(&mut self, viewport: &Viewport, tuning: &Tuning) {
        self.lives = tuning.starting_lives;
        self.score = 0;
        self.last_bonus_life_score = 0;
        self.invulnerable_until_ms = None;
        self.last_fire_ms = None;
        self.projectiles.clear();
        self.pos = Self::anchor(viewport);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Player, Viewport, Tuning, EntityIds) {
        let viewport = Viewport::new(800.0, 600.0);
        let tuning = Tuning::default();
        let mut ids = EntityIds::new();
        let player = Player::new(ids.alloc(), &viewport, &tuning);
        (player, viewport, tuning, ids)
    }

    #[test]
    fn test_starts_anchored() {
        let (player, _, _, _) = setup();
        assert_eq!(player.pos, Vec2::new(400.0, 450.0));
        assert_eq!(player.lives(), 3);
        assert_eq!(player.damage_tier(), DamageTier::Intact);
    }

    #[test]
    fn test_movement_clamps_to_viewport() {
        let (mut player, viewport, tuning, _) = setup();
        for _ in 0..600 {
            player.move_left(1.0 / 60.0, &viewport, &tuning);
        }
        assert_eq!(player.pos.x, Player::half_width());
        for _ in 0..600 {
            player.move_right(1.0 / 60.0, &viewport, &tuning);
        }
        assert_eq!(player.pos.x, viewport.width - Player::half_width());
    }

    #[test]
    fn test_fire_spawns_at_muzzle() {
        let (mut player, _, tuning, mut ids) = setup();
        let shot = player.fire(100.0, &mut ids, &tuning).unwrap();
        assert_eq!(player.projectiles[0], shot);
        assert_eq!(shot.pos, Vec2::new(400.0, 450.0 - PLAYER_HEIGHT / 2.0));
        assert!(shot.vel.y < 0.0);
    }

    #[test]
    fn test_fire_is_rate_limited() {
        let (mut player, _, mut tuning, mut ids) = setup();
        tuning.fire_delay_ms = 200.0;
        assert!(player.fire(100.0, &mut ids, &tuning).is_some());
        assert!(player.fire(150.0, &mut ids, &tuning).is_none());
        assert!(player.fire(300.0, &mut ids, &tuning).is_some());
        assert_eq!(player.projectiles.len(), 2);
    }

    #[test]
    fn test_damage_opens_invulnerability_window() {
        let (mut player, _, tuning, _) = setup();
        assert!(player.take_damage(1000.0, &tuning));
        assert_eq!(player.lives(), 2);
        assert_eq!(player.damage_tier(), DamageTier::Scorched);

        // Within the 1000 ms window: a no-op
        assert!(!player.take_damage(1500.0, &tuning));
        assert_eq!(player.lives(), 2);

        // After the window: damage applies again
        assert!(player.take_damage(2100.0, &tuning));
        assert_eq!(player.lives(), 1);
        assert_eq!(player.damage_tier(), DamageTier::Battered);
    }

    #[test]
    fn test_damage_to_terminal_sentinel() {
        let (mut player, _, tuning, _) = setup();
        let mut now = 0.0;
        for _ in 0..4 {
            assert!(player.take_damage(now, &tuning));
            now += tuning.invulnerable_ms + 1.0;
        }
        assert_eq!(player.lives(), -1);
        assert_eq!(player.damage_tier(), DamageTier::Destroyed);
    }

    #[test]
    #[should_panic]
    fn test_damage_on_destroyed_player_is_a_contract_violation() {
        let (mut player, _, tuning, _) = setup();
        let mut now = 0.0;
        for _ in 0..5 {
            player.take_damage(now, &tuning);
            now += tuning.invulnerable_ms + 1.0;
        }
    }

    #[test]
    fn test_bonus_life_watermark_semantics() {
        let (mut player, _, tuning, _) = setup();

        // 0 -> 140: below the 150 threshold, no bonus
        assert!(!player.add_score(140, &tuning));
        assert_eq!(player.lives(), 3);

        // 140 -> 150: crosses the first multiple, one life
        assert!(player.add_score(10, &tuning));
        assert_eq!(player.lives(), 4);

        // 150 -> 155: watermark is 150, same level, no second grant
        assert!(!player.add_score(5, &tuning));
        assert_eq!(player.lives(), 4);

        // 155 -> 290: still level 1, nothing
        assert!(!player.add_score(135, &tuning));
        // 290 -> 305: crosses 300
        assert!(player.add_score(15, &tuning));
        assert_eq!(player.lives(), 5);
    }

    #[test]
    fn test_bonus_life_watermark_is_current_score_not_boundary() {
        let (mut player, _, tuning, _) = setup();
        // One jump from 0 to 160: level 0 -> 1, watermark must land on 160
        assert!(player.add_score(160, &tuning));
        // 160 -> 299 stays level 1
        assert!(!player.add_score(139, &tuning));
        // 299 -> 301 crosses level 2
        assert!(player.add_score(2, &tuning));
    }

    #[test]
    fn test_lives_never_exceed_max() {
        let (mut player, _, tuning, _) = setup();
        for _ in 0..10 {
            player.add_score(150, &tuning);
        }
        assert!(player.lives() <= tuning.max_lives);
        assert_eq!(player.lives(), 5);
    }

    #[test]
    fn test_no_bonus_when_already_at_max() {
        let (mut player, _, mut tuning, _) = setup();
        tuning.starting_lives = 5;
        let viewport = Viewport::new(800.0, 600.0);
        player.reset(&viewport, &tuning);
        assert!(!player.add_score(150, &tuning));
        assert_eq!(player.lives(), 5);
    }

    #[test]
    fn test_projectile_leaves_through_top() {
        let (mut player, _, tuning, mut ids) = setup();
        player.fire(0.0, &mut ids, &tuning);
        // 450 px to the top edge at 300 px/s: gone in under 2 s
        let mut destroyed = Vec::new();
        for _ in 0..120 {
            destroyed = player.advance_projectiles(1.0 / 60.0);
            if !destroyed.is_empty() {
                break;
            }
        }
        assert_eq!(destroyed.len(), 1);
        assert!(player.projectiles.is_empty());
    }

    #[test]
    fn test_reset_restores_defaults() {
        let (mut player, viewport, tuning, mut ids) = setup();
        player.take_damage(10.0, &tuning);
        player.add_score(40, &tuning);
        player.fire(20.0, &mut ids, &tuning);
        player.reset(&viewport, &tuning);
        assert_eq!(player.lives(), 3);
        assert_eq!(player.score(), 0);
        assert!(player.projectiles.is_empty());
        assert!(!player.is_invulnerable(30.0));
        assert_eq!(player.damage_tier(), DamageTier::Intact);
    }

    #[test]
    #[should_panic]
    fn test_non_finite_projectile_is_rejected() {
        Projectile::new(1, Vec2::new(f32::NAN, 0.0), Vec2::new(0.0, -300.0));
    }
}
