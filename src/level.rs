//! Level ingestion.
//!
//! Two entry points build a [`TerrainGrid`]: raw equal-length buffers
//! (`from_buffers`, the core's ingestion contract) and PNG layers decoded
//! with the `image` crate. In single-image mode the foreground's alpha
//! channel is the solidity mask and fully transparent cells load as black,
//! so a level author only needs one RGBA file.

use std::path::Path;

use image::RgbaImage;
use thiserror::Error;

use crate::rgb;
use crate::sim::TerrainGrid;

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to decode level image: {0}")]
    Image(#[from] image::ImageError),
    #[error("{layer} buffer holds {got} cells, expected {want} ({width}x{height})")]
    BufferSize {
        layer: &'static str,
        got: usize,
        want: usize,
        width: i32,
        height: i32,
    },
    #[error("{layer} layer is {got_w}x{got_h}, expected {want_w}x{want_h}")]
    LayerMismatch {
        layer: &'static str,
        want_w: u32,
        want_h: u32,
        got_w: u32,
        got_h: u32,
    },
}

/// Build a grid from raw row-major buffers.
///
/// `solid` defaults to all-clear and `background` to black when omitted.
/// Wherever a cell is non-solid its visible color is forced to the background,
/// regardless of what the foreground buffer held.
pub fn from_buffers(
    width: i32,
    height: i32,
    viewport_w: i32,
    viewport_h: i32,
    foreground: &[u32],
    solid: Option<&[bool]>,
    background: Option<&[u32]>,
) -> Result<TerrainGrid, LevelError> {
    let want = (width * height) as usize;
    check_len("foreground", foreground.len(), want, width, height)?;
    if let Some(solid) = solid {
        check_len("solid", solid.len(), want, width, height)?;
    }
    if let Some(background) = background {
        check_len("background", background.len(), want, width, height)?;
    }

    let solid = solid.map_or_else(|| vec![false; want], <[bool]>::to_vec);
    let background = background.map_or_else(|| vec![0; want], <[u32]>::to_vec);
    log::info!("level assembled from buffers: {width}x{height}");
    Ok(TerrainGrid::from_parts(
        width,
        height,
        viewport_w,
        viewport_h,
        foreground.to_vec(),
        solid,
        background,
    ))
}

fn check_len(
    layer: &'static str,
    got: usize,
    want: usize,
    width: i32,
    height: i32,
) -> Result<(), LevelError> {
    if got == want {
        Ok(())
    } else {
        Err(LevelError::BufferSize {
            layer,
            got,
            want,
            width,
            height,
        })
    }
}

/// Build a grid from a decoded RGBA foreground, using its alpha channel as
/// the solidity mask, plus an optional same-size background layer.
pub fn from_rgba_image(
    foreground: &RgbaImage,
    background: Option<&RgbaImage>,
    viewport_w: i32,
    viewport_h: i32,
) -> Result<TerrainGrid, LevelError> {
    let (w, h) = foreground.dimensions();
    if let Some(bg) = background {
        let (bw, bh) = bg.dimensions();
        if (bw, bh) != (w, h) {
            return Err(LevelError::LayerMismatch {
                layer: "background",
                want_w: w,
                want_h: h,
                got_w: bw,
                got_h: bh,
            });
        }
    }

    let len = (w * h) as usize;
    let mut colors = Vec::with_capacity(len);
    let mut solid = Vec::with_capacity(len);
    for pixel in foreground.pixels() {
        let [r, g, b, a] = pixel.0;
        solid.push(a != 0);
        // Transparent cells load as black
        colors.push(if a != 0 { rgb(r, g, b) } else { 0 });
    }
    let background = background.map_or_else(
        || vec![0; len],
        |bg| bg.pixels().map(|p| rgb(p.0[0], p.0[1], p.0[2])).collect(),
    );

    log::info!("level decoded from image: {w}x{h}");
    Ok(TerrainGrid::from_parts(
        w as i32,
        h as i32,
        viewport_w,
        viewport_h,
        colors,
        solid,
        background,
    ))
}

/// Load a level from PNG files on disk.
pub fn load_from_paths(
    foreground: &Path,
    background: Option<&Path>,
    viewport_w: i32,
    viewport_h: i32,
) -> Result<TerrainGrid, LevelError> {
    let fg = image::open(foreground)?.to_rgba8();
    let bg = background.map(|p| image::open(p).map(|i| i.to_rgba8())).transpose()?;
    from_rgba_image(&fg, bg.as_ref(), viewport_w, viewport_h)
}
