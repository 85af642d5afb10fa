//! Data-driven game balance
//!
//! Every value a designer would iterate on lives here, with defaults
//! matching the shipped balance. A frontend may override any subset by
//! feeding partial JSON to [`Tuning::from_json`]; structural constants
//! (entity sizes, tile size, panel fraction) stay in [`crate::consts`].

use serde::{Deserialize, Serialize};

/// Tunable balance values for a game session
///
/// Speeds are in pixels per second; the original game authored them per
/// 60 Hz frame, so e.g. the meteor's 3 px/frame became 180 px/s.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Horizontal ship speed while a movement intent is held
    pub move_speed: f32,
    /// Upward projectile speed
    pub projectile_speed: f32,
    /// Downward meteor speed
    pub meteor_speed: f32,
    /// Downward background scroll speed
    pub scroll_speed: f32,

    /// Minimum time between shots in milliseconds
    pub fire_delay_ms: f64,
    /// Invulnerability window after taking damage, in milliseconds
    pub invulnerable_ms: f64,

    /// Lives at session start
    pub starting_lives: i32,
    /// Bonus lives never raise the count past this
    pub max_lives: i32,
    /// Score awarded per meteor destroyed by a projectile
    pub score_per_meteor: u32,
    /// A bonus life is granted each time the score crosses a multiple of this
    pub score_for_bonus_life: u32,

    /// Shortest gap between meteor spawns in milliseconds
    pub min_spawn_interval_ms: f64,
    /// Longest gap between meteor spawns in milliseconds
    pub max_spawn_interval_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            move_speed: 240.0,
            projectile_speed: 300.0,
            meteor_speed: 180.0,
            scroll_speed: 54.0,

            fire_delay_ms: 1.0,
            invulnerable_ms: 1000.0,

            starting_lives: 3,
            max_lives: 5,
            score_per_meteor: 10,
            score_for_bonus_life: 150,

            min_spawn_interval_ms: 400.0,
            max_spawn_interval_ms: 1500.0,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON; absent fields keep their defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_shipped_balance() {
        let t = Tuning::default();
        assert_eq!(t.starting_lives, 3);
        assert_eq!(t.max_lives, 5);
        assert_eq!(t.score_for_bonus_life, 150);
        assert!(t.min_spawn_interval_ms < t.max_spawn_interval_ms);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let t = Tuning::from_json(r#"{"meteor_speed": 220.0}"#).unwrap();
        assert_eq!(t.meteor_speed, 220.0);
        assert_eq!(t.projectile_speed, 300.0);
        assert_eq!(t.score_per_meteor, 10);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(Tuning::from_json("not json").is_err());
    }
}
