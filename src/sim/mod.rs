//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Driven only by the frame clock's `(now_ms, delta_ms)` pairs
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod background;
pub mod collision;
pub mod player;
pub mod spawner;
pub mod state;
pub mod tick;

pub use background::{Background, Tile};
pub use collision::{Rect, Resolution, resolve};
pub use player::{DamageTier, Player, Projectile};
pub use spawner::{CollisionOutcome, Meteor, MeteorSpawner};
pub use state::{EntityIds, EntityKind, GameEvent, GamePhase, GameState, Viewport};
pub use tick::{TickInput, tick};
