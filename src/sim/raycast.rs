//! Ray-stepping collision primitive shared by locomotion and projectiles.

use glam::Vec2;

use super::terrain::TerrainGrid;

/// Sentinel for degenerate rays (zero-length direction or an origin that is
/// already outside the grid). Callers treat any negative distance as contact
/// at zero range.
pub const RAY_INVALID: f32 = -1.0;

/// Distance from `origin` along `dir` to the nearest solid cell.
///
/// The sample point advances by one full unit-length step per iteration; the
/// ray can skip terrain detail finer than one unit on non-axis-aligned
/// directions, which locomotion and projectile tuning rely on. Leaving the
/// grid counts as a collision reported at the last in-bounds sample.
/// Iterations are capped at the grid diagonal so every call terminates; a ray
/// that exhausts the cap reports the distance it covered.
///
/// Coordinates truncate toward zero when sampling cells.
pub fn raycast(grid: &TerrainGrid, origin: Vec2, dir: Vec2) -> f32 {
    let dir = dir.normalize_or_zero();
    if dir == Vec2::ZERO {
        log::debug!("raycast with zero-length direction from {origin:?}");
        return RAY_INVALID;
    }
    if !grid.in_bounds(origin.x as i32, origin.y as i32) {
        return RAY_INVALID;
    }
    if grid.solid_at(origin.x as i32, origin.y as i32) {
        return 0.0;
    }

    let max_steps = grid.diagonal().ceil() as u32;
    let mut pos = origin;
    for _ in 0..max_steps {
        pos += dir;
        if !grid.in_bounds(pos.x as i32, pos.y as i32) {
            return (pos - dir - origin).length();
        }
        if grid.solid_at(pos.x as i32, pos.y as i32) {
            return (pos - origin).length();
        }
    }
    (pos - origin).length()
}
