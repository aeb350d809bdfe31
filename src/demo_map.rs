// src/demo_map.rs

use std::collections::HashMap;

use image::{Rgba, RgbaImage};

use crate::engine_lib::map::Map;

pub const TEXTURE_SIZE: u32 = 64;

// Tile codes used by the demo layout.
const BRICK: u8 = 1;
const STONE: u8 = 2;
const GLASS: u8 = 3;

/// Atlas layer order; must match the image order of
/// `create_wall_textures()`.
const BRICK_LAYER: u32 = 0;
const STONE_LAYER: u32 = 1;
const GLASS_LAYER: u32 = 2;

pub fn create_demo_map() -> Map {
    let b = BRICK;
    let s = STONE;
    let g = GLASS;
    let layout = vec![
        vec![b, b, b, b, b, b, b, b, b, b, b, b],
        vec![b, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, b],
        vec![b, 0, 0, 0, 0, s, 0, 0, 0, 0, 0, b],
        vec![b, 0, 0, s, 0, 0, 0, 0, g, g, 0, b],
        vec![b, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, b],
        vec![b, 0, 0, 0, 0, b, b, 0, 0, 0, 0, b],
        vec![b, 0, s, 0, 0, b, 0, 0, 0, 0, 0, b],
        vec![b, 0, 0, 0, 0, b, 0, 0, 0, s, 0, b],
        vec![b, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, b],
        vec![b, 0, g, 0, 0, 0, 0, s, 0, 0, 0, b],
        vec![b, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, b],
        vec![b, b, b, b, b, b, b, b, b, b, b, b],
    ];
    let wall_layers = HashMap::from([
        (BRICK, BRICK_LAYER),
        (STONE, STONE_LAYER),
        (GLASS, GLASS_LAYER),
    ]);
    Map::new(layout, wall_layers)
}

/// The demo's wall atlas layers, generated rather than shipped as assets.
/// Index order is the layer order.
pub fn create_wall_textures() -> Vec<RgbaImage> {
    vec![brick_texture(), stone_texture(), glass_texture()]
}

fn brick_texture() -> RgbaImage {
    RgbaImage::from_fn(TEXTURE_SIZE, TEXTURE_SIZE, |x, y| {
        let course = y / 16;
        // Offset every other course by half a brick.
        let shifted_x = if course % 2 == 0 { x } else { x + 16 };
        let in_mortar = y % 16 < 2 || shifted_x % 32 < 2;
        if in_mortar {
            Rgba([180, 176, 168, 255])
        } else {
            let shade = 10 * ((shifted_x / 32 + course) % 3) as u8;
            Rgba([165 - shade, 68, 50, 255])
        }
    })
}

fn stone_texture() -> RgbaImage {
    RgbaImage::from_fn(TEXTURE_SIZE, TEXTURE_SIZE, |x, y| {
        let in_seam = y % 32 < 2 || x % 32 < 2;
        if in_seam {
            Rgba([70, 72, 76, 255])
        } else {
            // A little deterministic grain so blocks read as rock.
            let grain = ((x * 31 + y * 17) % 13) as u8;
            let base = 120 + grain;
            Rgba([base, base, base + 6, 255])
        }
    })
}

/// Deliberately written with near-zero alpha: the column stage forces every
/// wall fragment opaque, and this layer makes that visible in the demo.
fn glass_texture() -> RgbaImage {
    RgbaImage::from_fn(TEXTURE_SIZE, TEXTURE_SIZE, |x, y| {
        let on_frame = x < 3 || y < 3 || x >= TEXTURE_SIZE - 3 || y >= TEXTURE_SIZE - 3;
        if on_frame {
            Rgba([90, 110, 120, 255])
        } else {
            let streak = if (x + y) % 24 < 3 { 40 } else { 0 };
            Rgba([130 + streak, 180 + streak, 200, 0])
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn textures_share_atlas_dimensions() {
        for img in create_wall_textures() {
            assert_eq!(img.dimensions(), (TEXTURE_SIZE, TEXTURE_SIZE));
        }
    }

    #[test]
    fn every_map_code_has_an_atlas_layer() {
        let map = create_demo_map();
        let layers = create_wall_textures().len() as u32;
        for row in 0..map.rows() as i32 {
            for col in 0..map.cols() as i32 {
                if map.is_wall(row, col) {
                    let layer = map.wall_layer(row, col).expect("wall code without layer");
                    assert!(layer < layers);
                }
            }
        }
    }

    #[test]
    fn border_is_solid() {
        let map = create_demo_map();
        let last_row = map.rows() as i32 - 1;
        let last_col = map.cols() as i32 - 1;
        for col in 0..map.cols() as i32 {
            assert!(map.is_wall(0, col));
            assert!(map.is_wall(last_row, col));
        }
        for row in 0..map.rows() as i32 {
            assert!(map.is_wall(row, 0));
            assert!(map.is_wall(row, last_col));
        }
    }

    #[test]
    fn glass_really_carries_transparent_alpha() {
        // Guards the demo's point: the stage must render this opaque anyway.
        let glass = glass_texture();
        assert_eq!(glass.get_pixel(32, 32)[3], 0);
    }
}
