//! Pixelfall headless demo.
//!
//! Builds the procedural sine-hill level, drops the player onto the surface
//! with a raycast, then runs a scripted few hundred ticks: walk right, jump
//! now and then, fire a shot and a grenade at the hillside. Everything a real
//! host would render is logged instead.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use pixelfall::config::{LevelConfig, PlayerConfig};
use pixelfall::sim::{PlayerController, TerrainGrid, TickInput, World, raycast, tick};
use pixelfall::rgb;

const LEVEL_WIDTH: i32 = 800;
const LEVEL_HEIGHT: i32 = 600;
const DEMO_TICKS: u32 = 600;

fn main() {
    env_logger::init();
    log::info!("pixelfall demo starting");

    let mut terrain = TerrainGrid::new(LEVEL_WIDTH, LEVEL_HEIGHT, LEVEL_WIDTH, LEVEL_HEIGHT);
    terrain.configure(&LevelConfig { gravity: 0.245 });

    // Rolling dirt hills with a little color speckle
    let mut rng = Pcg32::seed_from_u64(7);
    for x in 0..LEVEL_WIDTH {
        let surface = LEVEL_HEIGHT / 2 + ((x as f32 / 100.0).sin() * 20.0) as i32;
        for y in surface..LEVEL_HEIGHT {
            let jitter: i32 = rng.random_range(-8..8);
            let c = rgb((0x7f + jitter) as u8, (0x54 + jitter) as u8, 0x35);
            terrain.set_solid(x, y, c, true);
        }
    }

    // Drop the player onto the surface
    let spawn_x = (LEVEL_WIDTH / 2) as f32;
    let drop = raycast(&terrain, Vec2::new(spawn_x, 0.0), Vec2::Y).max(0.0);
    let mut player = PlayerController::new(spawn_x, drop, 16.0, 28.0);
    player.apply_config(&PlayerConfig::default());
    log::info!("player spawned at ({spawn_x}, {drop})");

    let mut world = World::new(terrain, player);
    for frame in 0..DEMO_TICKS {
        let input = TickInput {
            dir: if frame < DEMO_TICKS / 2 { 1.0 } else { -1.0 },
            jump: frame % 120 == 0,
            fire_primary: frame == 150,
            fire_secondary: frame == 300,
            cursor: Vec2::new(600.0, 200.0),
        };
        tick(&mut world, &input);

        for sound in world.player.drain_sounds() {
            log::info!("t={frame} sound trigger: {}", sound.as_str());
        }
        if frame % 60 == 0 {
            log::info!(
                "t={frame} pos=({:.1}, {:.1}) vel=({:.2}, {:.2}) frame={} flip={}",
                world.player.pos.x,
                world.player.pos.y,
                world.player.vel.x,
                world.player.vel.y,
                world.player.animation_frame,
                world.player.animation_flip,
            );
        }
    }

    let solid_cells = world.terrain.solidity().iter().filter(|s| **s).count();
    log::info!("demo finished: {solid_cells} solid cells remain");
}
