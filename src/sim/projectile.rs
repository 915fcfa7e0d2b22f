//! Fixed pool of terrain-interacting projectiles.
//!
//! Three behavior kinds share one dispatch point: a shot detonates on first
//! impact, a drill burrows through terrain for a fixed budget of ticks, and a
//! grenade bounces around until its fuse runs out. The pool holds one slot per
//! kind; firing into an occupied slot is a silent no-op.

use glam::Vec2;

use crate::consts::*;
use crate::vec_to_len;

use super::events::SoundTrigger;
use super::player::PlayerController;
use super::raycast::raycast;
use super::terrain::TerrainGrid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileKind {
    Shot,
    Drill,
    Grenade,
}

impl ProjectileKind {
    #[inline]
    fn slot(self) -> usize {
        self as usize
    }

    pub fn speed(self) -> f32 {
        match self {
            ProjectileKind::Shot => SHOT_SPEED,
            ProjectileKind::Drill => DRILL_SPEED,
            ProjectileKind::Grenade => GRENADE_SPEED,
        }
    }

    pub fn radius(self) -> f32 {
        match self {
            ProjectileKind::Shot => SHOT_RADIUS,
            ProjectileKind::Drill => DRILL_RADIUS,
            ProjectileKind::Grenade => GRENADE_RADIUS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub active: bool,
    pub ticks_alive: u32,
    pub kind: ProjectileKind,
    /// Non-owning back-reference: index of the player that fired this. Used
    /// only to route sound triggers; a vanished owner just drops them.
    pub owner: usize,
}

impl Projectile {
    fn idle(kind: ProjectileKind) -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: kind.radius(),
            active: false,
            ticks_alive: 0,
            kind,
            owner: 0,
        }
    }
}

pub struct ProjectilePool {
    slots: [Projectile; PROJECTILE_POOL_SIZE],
}

impl Default for ProjectilePool {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectilePool {
    pub fn new() -> Self {
        Self {
            slots: [
                Projectile::idle(ProjectileKind::Shot),
                Projectile::idle(ProjectileKind::Drill),
                Projectile::idle(ProjectileKind::Grenade),
            ],
        }
    }

    /// Activate the slot for `kind`, launching from `pos` toward `dir` at the
    /// kind's muzzle speed. Returns false (and changes nothing) when the slot
    /// is already occupied.
    pub fn fire(&mut self, kind: ProjectileKind, pos: Vec2, dir: Vec2, owner: usize) -> bool {
        let slot = &mut self.slots[kind.slot()];
        if slot.active {
            return false;
        }
        *slot = Projectile {
            pos,
            vel: vec_to_len(dir, kind.speed()),
            radius: kind.radius(),
            active: true,
            ticks_alive: 0,
            kind,
            owner,
        };
        true
    }

    /// Slots in kind order, active or not; the presentation layer filters on
    /// `active` itself.
    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.slots.iter()
    }

    #[inline]
    pub fn get(&self, kind: ProjectileKind) -> &Projectile {
        &self.slots[kind.slot()]
    }

    /// Advance every active projectile by one tick. Inactive slots have no
    /// behavior invoked.
    pub fn advance_all(&mut self, grid: &mut TerrainGrid, players: &mut [PlayerController]) {
        for slot in &mut self.slots {
            if !slot.active {
                continue;
            }
            match slot.kind {
                ProjectileKind::Shot => advance_shot(slot, grid, players),
                ProjectileKind::Drill => advance_drill(slot, grid, players),
                ProjectileKind::Grenade => advance_grenade(slot, grid, players),
            }
        }
    }
}

fn owner_sound(players: &mut [PlayerController], owner: usize, sound: SoundTrigger) {
    if let Some(player) = players.get_mut(owner) {
        player.push_sound(sound);
    }
}

/// Shot: fly straight, detonate on the first thing ahead.
fn advance_shot(p: &mut Projectile, grid: &mut TerrainGrid, players: &mut [PlayerController]) {
    let dist = raycast(grid, p.pos, p.vel);
    if dist < p.vel.length() {
        // Negative sentinel means contact at zero range
        let impact = p.pos + vec_to_len(p.vel, dist.max(0.0));
        grid.explode(
            impact.x as i32,
            impact.y as i32,
            SHOT_BLAST_RADIUS,
            SHOT_RING_WIDTH,
            SCORCH_COLOR,
        );
        p.active = false;
        owner_sound(players, p.owner, SoundTrigger::Explode1);
    } else {
        p.pos += p.vel;
    }
    p.ticks_alive += 1;
}

/// Drill: fly until first contact (gated by `ticks_alive == 0`), then burrow,
/// carving a shrinking crater each tick while the velocity damps out.
fn advance_drill(p: &mut Projectile, grid: &mut TerrainGrid, players: &mut [PlayerController]) {
    if p.ticks_alive == 0 {
        let dist = raycast(grid, p.pos, p.vel);
        if dist < p.vel.length() {
            p.pos += vec_to_len(p.vel, dist.max(0.0));
            grid.explode(
                p.pos.x as i32,
                p.pos.y as i32,
                DRILL_BLAST_RADIUS,
                DRILL_RING_WIDTH,
                SCORCH_COLOR,
            );
            owner_sound(players, p.owner, SoundTrigger::Drill1);
            p.ticks_alive = 1;
        } else {
            p.pos += p.vel;
        }
    } else {
        p.vel *= DRILL_DAMPING;
        p.pos += p.vel;
        grid.explode(
            p.pos.x as i32,
            p.pos.y as i32,
            DRILL_BLAST_RADIUS - (p.ticks_alive / 2) as i32,
            DRILL_RING_WIDTH,
            SCORCH_COLOR,
        );
        p.ticks_alive += 1;
        if p.ticks_alive > DRILL_TICK_BUDGET {
            p.active = false;
            owner_sound(players, p.owner, SoundTrigger::Explode2);
        }
    }
}

/// Grenade: bounce off terrain per axis, fall under gravity while the floor
/// probe is clear, detonate when the fuse runs out.
fn advance_grenade(p: &mut Projectile, grid: &mut TerrainGrid, players: &mut [PlayerController]) {
    let pos = p.pos;
    let blocked = move |grid: &TerrainGrid, dir: Vec2| raycast(grid, pos, dir) <= GRENADE_PROBE_RANGE;

    let ahead = raycast(grid, p.pos, p.vel);
    if ahead < p.vel.length() {
        // Within one step of impact: test each axis on its own and reflect
        // only the component that is actually blocked
        if (p.vel.x > 0.0 && blocked(grid, Vec2::X)) || (p.vel.x < 0.0 && blocked(grid, -Vec2::X)) {
            p.vel.x = -p.vel.x * GRENADE_BOUNCE_DAMPING;
        }
        if (p.vel.y > 0.0 && blocked(grid, Vec2::Y)) || (p.vel.y < 0.0 && blocked(grid, -Vec2::Y)) {
            p.vel.y = -p.vel.y * GRENADE_BOUNCE_DAMPING;
        }
    }

    let dist_down = raycast(grid, p.pos, Vec2::Y);
    if dist_down > GRENADE_PROBE_RANGE {
        p.vel.y += grid.gravity();
    }

    p.pos += p.vel;
    p.ticks_alive += 1;
    if p.ticks_alive >= GRENADE_FUSE_TICKS {
        grid.explode(
            p.pos.x as i32,
            p.pos.y as i32,
            GRENADE_BLAST_RADIUS,
            GRENADE_RING_WIDTH,
            SCORCH_COLOR,
        );
        p.active = false;
        owner_sound(players, p.owner, SoundTrigger::Explode2);
    }
}
