//! Pixelfall - side-view action game core with pixel-destructible terrain
//!
//! Core modules:
//! - `sim`: deterministic simulation (terrain grid, raycasting, player, projectiles)
//! - `level`: level ingestion from raw buffers or PNG layers
//! - `config`: one-shot structured tuning for player and level
//!
//! Rendering, audio playback and input polling are external collaborators: the
//! host feeds [`sim::TickInput`] in and reads the terrain raster, the player
//! pose and drained sound triggers back out.

pub mod config;
pub mod level;
pub mod sim;

pub use config::{LevelConfig, PlayerConfig};
pub use sim::{PlayerController, ProjectileKind, TerrainGrid, TickInput, World};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default downward acceleration per tick
    pub const DEFAULT_GRAVITY: f32 = 0.275;

    /// Player locomotion defaults (overridable via [`crate::PlayerConfig`])
    pub const PLAYER_ACCELERATION: f32 = 0.1;
    pub const PLAYER_DRAG: f32 = 0.8;
    pub const PLAYER_MAX_SPEED: f32 = 0.8;
    pub const PLAYER_TURN_SPEED: f32 = 0.7;
    pub const PLAYER_MAX_FALL_SPEED: f32 = 13.0;
    pub const PLAYER_JUMP_VELOCITY: f32 = 5.5;
    /// Downward kick applied when the head band touches a ceiling
    pub const CEILING_BOUNCE: f32 = 0.5;

    /// Length of the rendered aim line, world units
    pub const AIM_LENGTH: f32 = 40.0;
    /// Dots the presentation layer draws along the aim line
    pub const AIMING_DOT_COUNT: u32 = 8;

    /// Walk cycle presentation
    pub const WALK_FRAMES: u32 = 4;
    pub const WALK_TICKS_PER_FRAME: u32 = 6;
    /// Horizontal speed below which the walk cycle rests on frame 0
    pub const WALK_ANIM_MIN_SPEED: f32 = 0.05;

    /// Projectile pool capacity, one slot per behavior kind
    pub const PROJECTILE_POOL_SIZE: usize = 3;

    /// Shot: fast, small crater on impact
    pub const SHOT_SPEED: f32 = 8.0;
    pub const SHOT_RADIUS: f32 = 1.0;
    pub const SHOT_BLAST_RADIUS: i32 = 6;
    pub const SHOT_RING_WIDTH: i32 = 2;

    /// Drill: burrows after first contact, carving shrinking craters
    pub const DRILL_SPEED: f32 = 5.0;
    pub const DRILL_RADIUS: f32 = 2.0;
    pub const DRILL_BLAST_RADIUS: i32 = 10;
    pub const DRILL_RING_WIDTH: i32 = 2;
    pub const DRILL_DAMPING: f32 = 0.8;
    /// Ticks the drill keeps carving after first contact
    pub const DRILL_TICK_BUDGET: u32 = 10;

    /// Grenade: bounces, then detonates on a fuse
    pub const GRENADE_SPEED: f32 = 4.0;
    pub const GRENADE_RADIUS: f32 = 2.0;
    pub const GRENADE_BLAST_RADIUS: i32 = 20;
    pub const GRENADE_RING_WIDTH: i32 = 4;
    pub const GRENADE_FUSE_TICKS: u32 = 260;
    pub const GRENADE_BOUNCE_DAMPING: f32 = 0.6;
    /// Range of the short axis probes used for bouncing and hang detection
    pub const GRENADE_PROBE_RANGE: f32 = 2.0;

    /// Color painted on crater rims
    pub const SCORCH_COLOR: u32 = 0x2b2b2b;
}

/// Pack an RGB triple into the `0x00RRGGBB` cell format
#[inline]
pub fn rgb(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

/// Returns a vector with the direction of `v` and length `len`
///
/// A zero `v` stays zero rather than going NaN.
#[inline]
pub fn vec_to_len(v: Vec2, len: f32) -> Vec2 {
    v.normalize_or_zero() * len
}
