//! Player kinematics: locomotion, gravity, jumping, aiming.
//!
//! The anchor point is feet-center with the head pointing up (negative y).
//! Collision works through short raycast probes at fixed offsets from the
//! anchor: the two foot offsets for horizontal travel, the anchor itself for
//! falling, and the head offset for ceilings.

use glam::Vec2;

use crate::config::PlayerConfig;
use crate::consts::*;
use crate::vec_to_len;

use super::events::SoundTrigger;
use super::raycast::raycast;
use super::terrain::TerrainGrid;

#[derive(Debug, Clone)]
pub struct PlayerController {
    /// World position of the feet-center anchor
    pub pos: Vec2,
    pub vel: Vec2,

    // Offsets derived from `size`; recomputed by `set_size`
    left_foot: Vec2,
    right_foot: Vec2,
    head: Vec2,
    to_center: Vec2,
    size: Vec2,

    // Tunables, loaded once via `apply_config`
    pub acceleration: f32,
    pub drag: f32,
    pub max_speed: f32,
    pub turn_speed: f32,
    pub max_fall_speed: f32,
    pub jump_velocity: f32,

    // Aim state, recomputed each tick from the cursor
    pub aim_direction: Vec2,
    pub aim_angle: f32,
    pub aim_length: f32,
    pub aiming_dot_count: u32,

    // Presentation outputs
    pub animation_frame: u32,
    pub animation_flip: bool,
    anim_ticks: u32,

    sounds: Vec<SoundTrigger>,
}

impl PlayerController {
    /// Create a player at `(x, y)` with a `w` x `h` hitbox and reference tuning.
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        let mut player = Self {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            left_foot: Vec2::ZERO,
            right_foot: Vec2::ZERO,
            head: Vec2::ZERO,
            to_center: Vec2::ZERO,
            size: Vec2::ZERO,
            acceleration: PLAYER_ACCELERATION,
            drag: PLAYER_DRAG,
            max_speed: PLAYER_MAX_SPEED,
            turn_speed: PLAYER_TURN_SPEED,
            max_fall_speed: PLAYER_MAX_FALL_SPEED,
            jump_velocity: PLAYER_JUMP_VELOCITY,
            aim_direction: Vec2::new(AIM_LENGTH, 0.0),
            aim_angle: 0.0,
            aim_length: AIM_LENGTH,
            aiming_dot_count: AIMING_DOT_COUNT,
            animation_frame: 0,
            animation_flip: false,
            anim_ticks: 0,
            sounds: Vec::new(),
        };
        player.set_size(w, h);
        player
    }

    /// Resize the hitbox and recompute the derived probe offsets.
    pub fn set_size(&mut self, w: f32, h: f32) {
        self.size = Vec2::new(w, h);
        self.left_foot = Vec2::new(-w / 2.0, 0.0);
        self.right_foot = Vec2::new(w / 2.0, 0.0);
        self.head = Vec2::new(0.0, -h);
        self.to_center = Vec2::new(0.0, -h / 2.0);
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    #[inline]
    pub fn left_foot(&self) -> Vec2 {
        self.left_foot
    }

    #[inline]
    pub fn right_foot(&self) -> Vec2 {
        self.right_foot
    }

    #[inline]
    pub fn head(&self) -> Vec2 {
        self.head
    }

    /// Offset from the anchor to the body center (aim origin, muzzle).
    #[inline]
    pub fn to_center(&self) -> Vec2 {
        self.to_center
    }

    /// Apply the flat numeric tuning the configuration loader produced.
    pub fn apply_config(&mut self, cfg: &PlayerConfig) {
        self.set_size(cfg.width, cfg.height);
        self.acceleration = cfg.acceleration;
        self.drag = cfg.drag;
        self.max_speed = cfg.max_speed;
        self.turn_speed = cfg.turn_speed;
        self.max_fall_speed = cfg.max_fallspeed;
        self.jump_velocity = cfg.jump_vel;
        log::info!(
            "player configured: size={}x{} accel={} drag={} max_speed={}",
            cfg.width,
            cfg.height,
            cfg.acceleration,
            cfg.drag,
            cfg.max_speed
        );
    }

    /// Horizontal movement. `dir` is the input direction signal (-1/0/1).
    ///
    /// No input applies exponential drag. Input accelerates, with a
    /// `turn_speed` braking penalty when reversing, then clamps to
    /// `max_speed`. A foot probe one unit above floor level checks the travel
    /// direction; a blocked probe retries one unit higher and either climbs a
    /// one-cell ledge or kills the horizontal velocity.
    pub fn move_horizontal(&mut self, grid: &TerrainGrid, dir: f32) {
        if dir == 0.0 {
            self.vel.x *= self.drag;
            return;
        }

        self.vel.x += self.acceleration * dir;
        if dir < 0.0 {
            if self.vel.x > 0.0 {
                self.vel.x *= self.turn_speed;
            }
            if self.vel.x < -self.max_speed {
                self.vel.x = -self.max_speed;
            }
        } else {
            if self.vel.x < 0.0 {
                self.vel.x *= self.turn_speed;
            }
            if self.vel.x > self.max_speed {
                self.vel.x = self.max_speed;
            }
        }

        let (foot, probe_dir) = if self.vel.x < 0.0 {
            (self.left_foot, -Vec2::X)
        } else if self.vel.x > 0.0 {
            (self.right_foot, Vec2::X)
        } else {
            return;
        };
        let probe = self.pos + Vec2::new(0.0, -1.0) + foot;
        if raycast(grid, probe, probe_dir) <= 1.0 {
            // One-cell ledge: retry a unit higher before killing momentum
            if raycast(grid, probe + Vec2::new(0.0, -1.0), probe_dir) > 1.0 {
                self.pos.y -= 1.0;
            } else {
                self.vel.x = 0.0;
            }
        }
    }

    /// Gravity and landing. Scans the foot band for solid ground; while
    /// airborne, accelerates downward (clamped to `max_fall_speed`) and snaps
    /// the landing to the raycast clear distance so a fast fall cannot tunnel
    /// through the floor in one tick. Position always advances by `vel`.
    pub fn fall(&mut self, grid: &TerrainGrid) {
        if !self.foot_band_solid(grid, self.pos.y as i32) {
            self.vel.y += grid.gravity();
            if self.vel.y > self.max_fall_speed {
                self.vel.y = self.max_fall_speed;
            }

            let dist_to_floor = raycast(grid, self.pos, Vec2::Y);
            if dist_to_floor >= 0.0 && dist_to_floor < self.vel.y {
                self.vel.y = 0.0;
                self.pos.y += dist_to_floor;
            }
        } else if self.vel.y > 0.0 {
            self.vel.y = 0.0;
        }

        self.pos += self.vel;
    }

    /// Ceiling check at head height. A solid head band bounces the player
    /// downward instead of letting it stick to the underside of terrain.
    pub fn jump_collide(&mut self, grid: &TerrainGrid) {
        if self.foot_band_solid(grid, (self.pos.y + self.head.y) as i32) {
            self.vel.y = CEILING_BOUNCE;
        }
    }

    /// True if any cell of the horizontal band at `y`, half a hitbox wide on
    /// each side of the anchor, is solid. Out-of-bounds cells are skipped.
    fn foot_band_solid(&self, grid: &TerrainGrid, y: i32) -> bool {
        let px = self.pos.x as i32;
        let half_w = (self.size.x / 2.0) as i32;
        for x in 0..half_w {
            if cell_solid(grid, px + x, y) || cell_solid(grid, px - x, y) {
                return true;
            }
        }
        false
    }

    /// Jump off the ground. Only takes effect while `vel.y` is exactly zero;
    /// picks one of the two jump sounds by parity of the current state so the
    /// choice is reproducible.
    pub fn jump(&mut self) {
        if self.vel.y == 0.0 {
            self.vel.y = -self.jump_velocity;
            let parity = (self.pos.x + self.pos.y + self.vel.x).abs() as u32 & 1;
            self.sounds.push(if parity == 0 {
                SoundTrigger::Jump1
            } else {
                SoundTrigger::Jump2
            });
        }
    }

    /// Recompute the aim vector from a cursor position in world coordinates.
    /// The sprite flip follows the strict sign of the aim, so a perfectly
    /// vertical aim keeps the previous facing.
    pub fn update_aim(&mut self, cursor_world: Vec2) {
        let center = self.pos + self.to_center;
        self.aim_direction = vec_to_len(cursor_world - center, self.aim_length);
        self.aim_angle = self.aim_direction.y.atan2(self.aim_direction.x);
        if self.aim_direction.x > 0.0 {
            self.animation_flip = false;
        } else if self.aim_direction.x < 0.0 {
            self.animation_flip = true;
        }
    }

    /// Advance the walk cycle while moving; rest on frame 0 otherwise.
    pub fn animate(&mut self) {
        if self.vel.x.abs() > WALK_ANIM_MIN_SPEED {
            self.anim_ticks += 1;
            self.animation_frame = (self.anim_ticks / WALK_TICKS_PER_FRAME) % WALK_FRAMES;
        } else {
            self.anim_ticks = 0;
            self.animation_frame = 0;
        }
    }

    /// Queue a sound trigger on this player (used by owned projectiles).
    pub fn push_sound(&mut self, sound: SoundTrigger) {
        self.sounds.push(sound);
    }

    /// Drain queued sound triggers for the audio collaborator.
    pub fn drain_sounds(&mut self) -> std::vec::Drain<'_, SoundTrigger> {
        self.sounds.drain(..)
    }
}

#[inline]
fn cell_solid(grid: &TerrainGrid, x: i32, y: i32) -> bool {
    grid.in_bounds(x, y) && grid.solid_at(x, y)
}
