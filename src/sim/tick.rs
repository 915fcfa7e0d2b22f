//! Frame-stepped world update.
//!
//! The host loop owns the frame cadence; the core functions correctly under
//! any call rate. Each tick runs a strict order: horizontal move, jump, fire,
//! gravity/landing, ceiling check, aim, animation, then projectile advance.

use glam::Vec2;

use super::player::PlayerController;
use super::projectile::{ProjectileKind, ProjectilePool};
use super::terrain::TerrainGrid;

/// Input commands for a single tick, captured by the input collaborator.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Horizontal direction signal: -1, 0 or 1
    pub dir: f32,
    /// Jump pressed this tick
    pub jump: bool,
    /// Fire the primary weapon (shot)
    pub fire_primary: bool,
    /// Fire the secondary weapon (grenade)
    pub fire_secondary: bool,
    /// Cursor position in viewport coordinates
    pub cursor: Vec2,
}

/// The complete simulation: one terrain grid, one player, the projectile pool.
pub struct World {
    pub terrain: TerrainGrid,
    pub player: PlayerController,
    pub projectiles: ProjectilePool,
}

impl World {
    pub fn new(terrain: TerrainGrid, player: PlayerController) -> Self {
        Self {
            terrain,
            player,
            projectiles: ProjectilePool::new(),
        }
    }
}

/// Advance the world by one tick.
pub fn tick(world: &mut World, input: &TickInput) {
    // The cursor arrives in viewport coordinates; scroll maps it into the world
    let cursor_world = input.cursor + world.terrain.scroll();

    world.player.move_horizontal(&world.terrain, input.dir);
    if input.jump {
        world.player.jump();
    }

    if input.fire_primary {
        let muzzle = world.player.pos + world.player.to_center();
        world
            .projectiles
            .fire(ProjectileKind::Shot, muzzle, world.player.aim_direction, 0);
    }
    if input.fire_secondary {
        let muzzle = world.player.pos + world.player.to_center();
        world.projectiles.fire(
            ProjectileKind::Grenade,
            muzzle,
            world.player.aim_direction,
            0,
        );
    }

    world.player.fall(&world.terrain);
    world.player.jump_collide(&world.terrain);
    world.player.update_aim(cursor_world);
    world.player.animate();

    world
        .projectiles
        .advance_all(&mut world.terrain, std::slice::from_mut(&mut world.player));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SoundTrigger;

    fn world_with_floor(floor_y: i32) -> World {
        let mut terrain = TerrainGrid::new(200, 200, 200, 200);
        for x in 0..200 {
            for y in floor_y..200 {
                terrain.set_solid(x, y, 0x7f5435, true);
            }
        }
        let player = PlayerController::new(100.0, floor_y as f32, 4.0, 8.0);
        World::new(terrain, player)
    }

    #[test]
    fn test_grounded_player_stays_on_floor() {
        let mut world = world_with_floor(100);
        let input = TickInput {
            dir: 1.0,
            cursor: Vec2::new(150.0, 50.0),
            ..TickInput::default()
        };
        for _ in 0..60 {
            tick(&mut world, &input);
        }
        assert_eq!(world.player.vel.y, 0.0);
        assert!(world.player.pos.y <= 101.0);
        assert!(world.player.pos.x > 100.0);
        assert_eq!(world.player.animation_frame, (60 / 6) % 4);
    }

    #[test]
    fn test_jump_then_land() {
        let mut world = world_with_floor(100);
        tick(
            &mut world,
            &TickInput {
                jump: true,
                ..TickInput::default()
            },
        );
        assert!(world.player.vel.y < 0.0);
        let sounds: Vec<_> = world.player.drain_sounds().collect();
        assert!(matches!(sounds[0], SoundTrigger::Jump1 | SoundTrigger::Jump2));
        // Gravity brings the player back down eventually
        for _ in 0..200 {
            tick(&mut world, &TickInput::default());
        }
        assert_eq!(world.player.vel.y, 0.0);
    }

    #[test]
    fn test_fire_primary_launches_shot() {
        let mut world = world_with_floor(150);
        // Aim right first so the muzzle velocity is horizontal
        tick(
            &mut world,
            &TickInput {
                cursor: Vec2::new(199.0, 146.0),
                ..TickInput::default()
            },
        );
        tick(
            &mut world,
            &TickInput {
                fire_primary: true,
                ..TickInput::default()
            },
        );
        let shot = world.projectiles.get(ProjectileKind::Shot);
        // Open air to the right: the shot is in flight after one tick
        assert!(shot.active);
        assert!(shot.vel.x > 0.0);
    }

    #[test]
    fn test_fire_both_weapons_same_tick() {
        let mut world = world_with_floor(150);
        tick(
            &mut world,
            &TickInput {
                fire_primary: true,
                fire_secondary: true,
                cursor: Vec2::new(199.0, 100.0),
                ..TickInput::default()
            },
        );
        assert!(world.projectiles.get(ProjectileKind::Shot).active);
        assert!(world.projectiles.get(ProjectileKind::Grenade).active);
    }

    #[test]
    fn test_cursor_maps_through_scroll() {
        let mut terrain = TerrainGrid::new(400, 300, 200, 150);
        for x in 0..400 {
            for y in 100..300 {
                terrain.set_solid(x, y, 0x7f5435, true);
            }
        }
        terrain.set_scroll(Vec2::new(100.0, 0.0));
        let player = PlayerController::new(150.0, 100.0, 4.0, 8.0);
        let mut world = World::new(terrain, player);
        // Viewport cursor (10, 96) is world (110, 96): left of the player
        tick(
            &mut world,
            &TickInput {
                cursor: Vec2::new(10.0, 96.0),
                ..TickInput::default()
            },
        );
        assert!(world.player.animation_flip);
        assert!(world.player.aim_direction.x < 0.0);
    }
}
