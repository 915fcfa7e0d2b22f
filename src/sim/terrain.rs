//! Destructible terrain: a per-pixel color raster plus a parallel solidity mask.
//!
//! The grid owns three equally sized buffers. `foreground` is what the host
//! displays, `solid` is what collision sees, and `background` is the art that
//! gets revealed wherever terrain is carved away. The invariant across all
//! mutations: a cell's foreground color is either the last explicitly painted
//! solid color or its background color, depending on the solid flag.

use glam::Vec2;

use crate::config::LevelConfig;
use crate::consts::DEFAULT_GRAVITY;

#[derive(Debug)]
pub struct TerrainGrid {
    width: i32,
    height: i32,
    viewport_w: i32,
    viewport_h: i32,
    foreground: Vec<u32>,
    solid: Vec<bool>,
    background: Vec<u32>,
    scroll: Vec2,
    gravity: f32,
}

impl TerrainGrid {
    /// Create an empty (all non-solid, black) grid.
    ///
    /// `viewport_w`/`viewport_h` bound the scroll window and never change.
    pub fn new(width: i32, height: i32, viewport_w: i32, viewport_h: i32) -> Self {
        let len = (width * height) as usize;
        Self {
            width,
            height,
            viewport_w,
            viewport_h,
            foreground: vec![0; len],
            solid: vec![false; len],
            background: vec![0; len],
            scroll: Vec2::ZERO,
            gravity: DEFAULT_GRAVITY,
        }
    }

    /// Assemble a grid from pre-validated layer buffers.
    ///
    /// All three buffers must be exactly `width * height` long; the level
    /// loader validates that before calling. Non-solid cells are forced to
    /// their background color so the display invariant holds from tick zero.
    pub fn from_parts(
        width: i32,
        height: i32,
        viewport_w: i32,
        viewport_h: i32,
        mut foreground: Vec<u32>,
        solid: Vec<bool>,
        background: Vec<u32>,
    ) -> Self {
        let len = (width * height) as usize;
        debug_assert_eq!(foreground.len(), len);
        debug_assert_eq!(solid.len(), len);
        debug_assert_eq!(background.len(), len);
        for i in 0..len {
            if !solid[i] {
                foreground[i] = background[i];
            }
        }
        Self {
            width,
            height,
            viewport_w,
            viewport_h,
            foreground,
            solid,
            background,
            scroll: Vec2::ZERO,
            gravity: DEFAULT_GRAVITY,
        }
    }

    /// Apply level tuning.
    pub fn configure(&mut self, cfg: &LevelConfig) {
        self.gravity = cfg.gravity;
        log::info!("terrain configured: gravity={}", self.gravity);
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    /// Visible raster, row-major, for the presentation collaborator.
    #[inline]
    pub fn raster(&self) -> &[u32] {
        &self.foreground
    }

    /// Solidity mask, row-major.
    #[inline]
    pub fn solidity(&self) -> &[bool] {
        &self.solid
    }

    #[inline]
    pub fn scroll(&self) -> Vec2 {
        self.scroll
    }

    /// Viewport rect `(x, y, w, h)` in grid coordinates.
    pub fn viewport_rect(&self) -> (i32, i32, i32, i32) {
        (
            self.scroll.x as i32,
            self.scroll.y as i32,
            self.viewport_w,
            self.viewport_h,
        )
    }

    #[inline]
    fn idx(&self, x: i32, y: i32) -> usize {
        (x + y * self.width) as usize
    }

    /// True iff `(x, y)` addresses a cell. Half-open on both axes: `width` and
    /// `height` are valid buffer strides but never in bounds, and raycasting
    /// relies on that to report boundary collisions.
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        !(x < 0 || x >= self.width || y < 0 || y >= self.height)
    }

    /// Set the visible color only, leaving solidity untouched.
    /// No bounds check; callers pre-validate with [`in_bounds`](Self::in_bounds).
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        let i = self.idx(x, y);
        self.foreground[i] = color;
    }

    /// Set a cell's solidity and color. Clearing a cell ignores the passed
    /// color and reveals the background art instead; erased terrain must never
    /// leave an arbitrary color behind. No bounds check.
    #[inline]
    pub fn set_solid(&mut self, x: i32, y: i32, color: u32, solid: bool) {
        let i = self.idx(x, y);
        self.foreground[i] = if solid { color } else { self.background[i] };
        self.solid[i] = solid;
    }

    /// Color at `(x, y)`. No bounds check.
    #[inline]
    pub fn color_at(&self, x: i32, y: i32) -> u32 {
        self.foreground[self.idx(x, y)]
    }

    /// Solid flag at `(x, y)`. No bounds check.
    #[inline]
    pub fn solid_at(&self, x: i32, y: i32) -> bool {
        self.solid[self.idx(x, y)]
    }

    /// Paint every in-bounds cell within Euclidean distance `r` (inclusive)
    /// of `(cx, cy)`. O(r²).
    pub fn paint_circle(&mut self, cx: i32, cy: i32, r: i32, color: u32, solid: bool) {
        for dx in -r..=r {
            for dy in -r..=r {
                if dx * dx + dy * dy <= r * r && self.in_bounds(cx + dx, cy + dy) {
                    self.set_solid(cx + dx, cy + dy, color, solid);
                }
            }
        }
    }

    /// Paint the axis-aligned box centered on `(cx, cy)` with half-extents
    /// `w / 2`, `h / 2` (floor division; the upper edge is excluded, so odd
    /// dimensions land one cell short on the high side).
    pub fn paint_rect(&mut self, cx: i32, cy: i32, w: i32, h: i32, color: u32, solid: bool) {
        for dx in -(w / 2)..(w / 2) {
            for dy in -(h / 2)..(h / 2) {
                if self.in_bounds(cx + dx, cy + dy) {
                    self.set_solid(cx + dx, cy + dy, color, solid);
                }
            }
        }
    }

    /// Carve an explosion crater: every solid cell within `radius` is scorched
    /// to `color` (and stays solid), then the inner disc of radius
    /// `radius - ring_width` is cleared down to the background. The net effect
    /// is a colored rim around an empty center.
    pub fn explode(&mut self, cx: i32, cy: i32, radius: i32, ring_width: i32, color: u32) {
        for dx in -radius..=radius {
            for dy in -radius..=radius {
                if dx * dx + dy * dy <= radius * radius
                    && self.in_bounds(cx + dx, cy + dy)
                    && self.solid_at(cx + dx, cy + dy)
                {
                    self.set_solid(cx + dx, cy + dy, color, true);
                }
            }
        }
        self.paint_circle(cx, cy, radius - ring_width, 0, false);
    }

    /// Move the viewport to an absolute position, clamped to the grid.
    pub fn set_scroll(&mut self, pos: Vec2) {
        self.scroll = pos;
        self.clamp_scroll();
    }

    /// Move the viewport by a delta, clamped to the grid.
    pub fn scroll_by(&mut self, delta: Vec2) {
        self.scroll += delta;
        self.clamp_scroll();
    }

    fn clamp_scroll(&mut self) {
        let max_x = (self.width - self.viewport_w).max(0) as f32;
        let max_y = (self.height - self.viewport_h).max(0) as f32;
        self.scroll.x = self.scroll.x.clamp(0.0, max_x);
        self.scroll.y = self.scroll.y.clamp(0.0, max_y);
    }

    /// Grid diagonal length; the raycast iteration cap.
    #[inline]
    pub(crate) fn diagonal(&self) -> f32 {
        (self.width as f32).hypot(self.height as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn grid_with_background() -> TerrainGrid {
        let len = 32 * 32;
        let background: Vec<u32> = (0..len as u32).collect();
        TerrainGrid::from_parts(32, 32, 32, 32, vec![0; len], vec![false; len], background)
    }

    #[test]
    fn test_set_solid_paints_and_flags() {
        let mut grid = TerrainGrid::new(16, 16, 16, 16);
        grid.set_solid(3, 4, 0x7f5435, true);
        assert!(grid.solid_at(3, 4));
        assert_eq!(grid.color_at(3, 4), 0x7f5435);
    }

    #[test]
    fn test_clearing_reveals_background() {
        let mut grid = grid_with_background();
        grid.set_solid(5, 5, 0xff0000, true);
        // The passed color must be ignored when clearing
        grid.set_solid(5, 5, 0x00ff00, false);
        assert!(!grid.solid_at(5, 5));
        assert_eq!(grid.color_at(5, 5), 5 + 5 * 32);
    }

    #[test]
    fn test_from_parts_forces_background_on_clear_cells() {
        let grid = grid_with_background();
        assert_eq!(grid.color_at(7, 2), 7 + 2 * 32);
    }

    #[test]
    fn test_set_pixel_leaves_solidity() {
        let mut grid = TerrainGrid::new(16, 16, 16, 16);
        grid.set_solid(2, 2, 0x111111, true);
        grid.set_pixel(2, 2, 0xabcdef);
        assert!(grid.solid_at(2, 2));
        assert_eq!(grid.color_at(2, 2), 0xabcdef);
    }

    #[test]
    fn test_in_bounds_half_open() {
        let grid = TerrainGrid::new(20, 10, 20, 10);
        assert!(!grid.in_bounds(20, 0));
        assert!(!grid.in_bounds(0, 10));
        assert!(!grid.in_bounds(-1, 0));
        assert!(!grid.in_bounds(0, -1));
        assert!(grid.in_bounds(0, 0));
        assert!(grid.in_bounds(19, 9));
    }

    #[test]
    fn test_paint_circle_radius_inclusive() {
        let mut grid = TerrainGrid::new(32, 32, 32, 32);
        grid.paint_circle(16, 16, 5, 0xffffff, true);
        assert!(grid.solid_at(21, 16)); // distance exactly r
        assert!(grid.solid_at(11, 16));
        assert!(grid.solid_at(16, 21));
        assert!(!grid.solid_at(22, 16)); // distance r + 1
    }

    #[test]
    fn test_paint_circle_clips_at_edges() {
        let mut grid = TerrainGrid::new(16, 16, 16, 16);
        grid.paint_circle(0, 0, 6, 0xffffff, true);
        assert!(grid.solid_at(0, 0));
        assert!(grid.solid_at(6, 0));
    }

    #[test]
    fn test_paint_rect_floor_semantics() {
        let mut grid = TerrainGrid::new(32, 32, 32, 32);
        grid.paint_rect(10, 10, 5, 4, 0xffffff, true);
        // dx in -2..2, so x spans 8..=11: odd width loses the high edge
        assert!(grid.solid_at(8, 10));
        assert!(grid.solid_at(11, 10));
        assert!(!grid.solid_at(12, 10));
        // dy in -2..2, so y spans 8..=11
        assert!(grid.solid_at(10, 8));
        assert!(grid.solid_at(10, 11));
        assert!(!grid.solid_at(10, 12));
    }

    #[test]
    fn test_explode_ring_and_cleared_core() {
        let mut grid = grid_with_background();
        for x in 0..32 {
            for y in 0..32 {
                grid.set_solid(x, y, 0x7f5435, true);
            }
        }
        let (cx, cy, r, w) = (16, 16, 10, 3);
        grid.explode(cx, cy, r, w, 0x2b2b2b);
        let inner = r - w;
        for x in 0..32 {
            for y in 0..32 {
                let d2 = (x - cx) * (x - cx) + (y - cy) * (y - cy);
                if d2 <= inner * inner {
                    assert!(!grid.solid_at(x, y), "core cell ({x},{y}) still solid");
                    assert_eq!(grid.color_at(x, y), (x + y * 32) as u32);
                } else if d2 <= r * r {
                    assert!(grid.solid_at(x, y), "rim cell ({x},{y}) not solid");
                    assert_eq!(grid.color_at(x, y), 0x2b2b2b);
                } else {
                    assert_eq!(grid.color_at(x, y), 0x7f5435);
                }
            }
        }
    }

    #[test]
    fn test_explode_skips_non_solid_cells() {
        let mut grid = grid_with_background();
        grid.explode(16, 16, 8, 2, 0x2b2b2b);
        // Nothing was solid, so the rim recolors nothing
        assert_eq!(grid.color_at(23, 16), 23 + 16 * 32);
        assert!(!grid.solid_at(23, 16));
    }

    #[test]
    fn test_scroll_clamps_to_grid() {
        let mut grid = TerrainGrid::new(100, 100, 50, 40);
        grid.set_scroll(Vec2::new(-10.0, 900.0));
        assert_eq!(grid.scroll(), Vec2::new(0.0, 60.0));
        grid.scroll_by(Vec2::new(200.0, -200.0));
        assert_eq!(grid.scroll(), Vec2::new(50.0, 0.0));
    }

    #[test]
    fn test_scroll_noop_when_viewport_covers_grid() {
        let mut grid = TerrainGrid::new(50, 50, 50, 50);
        grid.scroll_by(Vec2::new(30.0, 30.0));
        assert_eq!(grid.scroll(), Vec2::ZERO);
    }

    proptest! {
        #[test]
        fn prop_painters_never_escape_bounds(
            cx in -100i32..164,
            cy in -100i32..164,
            r in 0i32..50,
            solid: bool,
        ) {
            let mut grid = TerrainGrid::new(64, 64, 64, 64);
            grid.paint_circle(cx, cy, r, 0xdeadbe, solid);
            grid.paint_rect(cx, cy, r, r, 0xdeadbe, solid);
            grid.explode(cx, cy, r, 2, 0x2b2b2b);
        }

        #[test]
        fn prop_display_invariant_holds_after_paints(
            cx in 0i32..64,
            cy in 0i32..64,
            r in 0i32..20,
        ) {
            let len = 64 * 64;
            let background: Vec<u32> = (0..len as u32).rev().collect();
            let mut grid = TerrainGrid::from_parts(
                64, 64, 64, 64, vec![0; len], vec![false; len], background.clone(),
            );
            grid.paint_circle(cx, cy, r, 0x7f5435, true);
            grid.explode(cx, cy, r / 2, 1, 0x2b2b2b);
            for y in 0..64 {
                for x in 0..64 {
                    if !grid.solid_at(x, y) {
                        prop_assert_eq!(grid.color_at(x, y), background[(x + y * 64) as usize]);
                    }
                }
            }
        }
    }
}
