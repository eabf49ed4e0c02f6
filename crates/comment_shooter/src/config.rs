//! Game configuration constants.
//!
//! World units are pixels of the 360x640 reference window.

use bevy::prelude::Vec2;

// Movement
pub const BASE_SPEED: f32 = 120.0;
pub const SPEED_VARIATION: f32 = 0.25; // +/- fraction of the base speed
pub const FLOAT_AMPLITUDE: f32 = 6.0;
pub const FLOAT_FREQUENCY: f32 = 1.5; // Hz

// Viewport margins
pub const SPAWN_OFFSET: f32 = 60.0; // right of the visible area
pub const LEFT_BOUND_OFFSET: f32 = 60.0; // left of the visible area
pub const SPAWN_BAND: f32 = 180.0; // half height of the vertical spawn band

// Spawning
pub const SPAWN_INTERVAL: f32 = 2.0;
pub const SPAWN_INTERVAL_VARIATION: f32 = 0.5;
pub const MIN_SPAWN_INTERVAL: f32 = 0.1;
pub const MAX_ACTIVE_COMMENTS: usize = 10;
pub const POOL_SIZE: usize = 20;

// Interaction
pub const COMMENT_SIZE: Vec2 = Vec2::new(160.0, 28.0);
pub const TAP_RADIUS: f32 = 30.0;
pub const TROLL_TAP_DISTANCE: f32 = 60.0;
pub const CONFUSION_SHAKE: f32 = 6.0;
pub const CONFUSION_JITTER: f32 = 12.0;

// Round
pub const TIME_LIMIT: f32 = 60.0;
