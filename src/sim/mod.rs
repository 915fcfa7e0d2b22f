//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-stepped, single-threaded, strict caller-controlled ordering
//! - No RNG (the jump-sound pick is a parity function of player state)
//! - No rendering, audio or platform dependencies

pub mod events;
pub mod player;
pub mod projectile;
pub mod raycast;
pub mod terrain;
pub mod tick;

pub use events::SoundTrigger;
pub use player::PlayerController;
pub use projectile::{Projectile, ProjectileKind, ProjectilePool};
pub use raycast::{RAY_INVALID, raycast};
pub use terrain::TerrainGrid;
pub use tick::{TickInput, World, tick};
