//! Axis-aligned collision geometry and per-tick pair resolution
//!
//! Collisions are resolved in two phases: [`resolve`] computes the set of
//! collision pairs from an immutable snapshot of entity bounds, and the
//! caller applies all destructions, damage, and scoring in one pass. No
//! collection is filtered mid-iteration, and the tie-break for a meteor
//! that overlaps both the ship and a projectile in the same tick is an
//! explicit rule: the ship collision wins.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box, stored as center + size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub center: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        assert!(
            center.is_finite() && size.is_finite(),
            "rect geometry must be finite"
        );
        Self { center, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.center.x - self.size.x / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.center.x + self.size.x / 2.0
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y - self.size.y / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y + self.size.y / 2.0
    }

    /// Overlap test. Shared edges count as touching, not overlapping.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

/// Collision pairs for one tick, expressed as indices into the snapshots
/// handed to [`resolve`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Meteors that struck the ship
    pub player_hits: Vec<usize>,
    /// `(meteor, projectile)` pairs destroyed together
    pub projectile_hits: Vec<(usize, usize)>,
}

/// Pair every meteor with at most one collision for this tick.
///
/// Meteors are visited in collection order. A meteor overlapping the ship
/// is a ship hit and is never also matched against a projectile. Otherwise
/// the first not-yet-consumed overlapping projectile claims it; each
/// projectile destroys at most one meteor per tick.
pub fn resolve(player: &Rect, projectiles: &[Rect], meteors: &[Rect]) -> Resolution {
    let mut out = Resolution::default();
    let mut consumed = vec![false; projectiles.len()];

    for (mi, meteor) in meteors.iter().enumerate() {
        if meteor.overlaps(player) {
            out.player_hits.push(mi);
            continue;
        }
        for (pi, projectile) in projectiles.iter().enumerate() {
            if !consumed[pi] && meteor.overlaps(projectile) {
                consumed[pi] = true;
                out.projectile_hits.push((mi, pi));
                break;
            }
        }
    }

    out
}
