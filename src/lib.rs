//! Meteor Strike - a vertical arcade shooter simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game state)
//! - `tuning`: Data-driven game balance
//!
//! The crate owns no window, renderer, or input device. An external frame
//! driver calls [`sim::tick`] once per frame with a monotonic timestamp and
//! frame delta, feeds it polled input intents, and translates the returned
//! [`sim::GameEvent`]s into sprites, text, and animations.

pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

/// Game configuration constants
///
/// Structural values baked into the playfield geometry. Balance values that
/// a designer would want to iterate on live in [`tuning::Tuning`] instead.
pub mod consts {
    /// Player ship bounding box (display size)
    pub const PLAYER_WIDTH: f32 = 48.0;
    pub const PLAYER_HEIGHT: f32 = 48.0;
    /// Vertical anchor of the ship as a fraction of viewport height
    pub const PLAYER_Y_FRACTION: f32 = 0.75;

    /// Projectile bounding box
    pub const PROJECTILE_WIDTH: f32 = 4.0;
    pub const PROJECTILE_HEIGHT: f32 = 12.0;

    /// Meteor bounding box
    pub const METEOR_WIDTH: f32 = 30.0;
    pub const METEOR_HEIGHT: f32 = 30.0;
    /// Meteors enter the playfield just above the top edge
    pub const METEOR_SPAWN_Y: f32 = -20.0;

    /// Bottom control-panel height as a fraction of viewport height.
    /// Meteors despawn when they reach the panel's top edge.
    pub const UI_PANEL_FRACTION: f32 = 0.2;

    /// Background star tile edge length
    pub const TILE_SIZE: f32 = 64.0;
    /// Number of star tile texture variants in the palette
    pub const TILE_VARIANTS: u8 = 9;

    /// Smallest viewport dimension the tiling math accepts; resize requests
    /// below this are clamped, not rejected.
    pub const MIN_VIEWPORT_DIM: f32 = 1.0;
}
