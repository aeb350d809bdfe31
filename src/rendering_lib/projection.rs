// src/rendering_lib/projection.rs

use glam::{vec2, vec4, Vec2, Vec4};

use super::vertex::ColumnInstance;

/// Logical resolution of the virtual screen. Every pixel-space column
/// attribute (`screen_x`, `top`, `height`) is expressed in this space no
/// matter how large the actual surface is; the viewport transform does the
/// rest once positions are in NDC.
pub const VIRTUAL_WIDTH: f32 = 854.0;
pub const VIRTUAL_HEIGHT: f32 = 480.0;

/// The `{ width, height }` pair the shader reads from its uniform. Kept as a
/// plain struct here so the math below stays independent of wgpu.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogicalScreen {
    pub width: f32,
    pub height: f32,
}

impl LogicalScreen {
    pub const VIRTUAL: LogicalScreen = LogicalScreen {
        width: VIRTUAL_WIDTH,
        height: VIRTUAL_HEIGHT,
    };
}

impl Default for LogicalScreen {
    fn default() -> Self {
        Self::VIRTUAL
    }
}

/// What `vs_main` hands to the rasterizer for one quad corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedCorner {
    pub clip_position: Vec4,
    pub tex_coords: Vec2,
    /// Flat-interpolated in the shader: every fragment of the quad sees the
    /// corner value unchanged.
    pub tex_layer: u32,
}

// CPU mirror of the WGSL in shader.rs. The two implementations must agree
// exactly; the tests below pin this one, and the shader is a transliteration
// of it.

/// Place a unit-quad corner in logical pixel space.
///
/// `corner.x` is 0 or 1 and selects the left/right edge of the one-pixel-wide
/// column; `corner.y` in [0, 1] is the fraction of the wall strip's height.
pub fn pixel_position(corner: Vec2, column: &ColumnInstance) -> Vec2 {
    vec2(
        column.screen_x + corner.x,
        column.top + corner.y * column.height,
    )
}

/// Logical pixel space to normalized device coordinates.
///
/// Pixel row 0 is the top of the screen while NDC +1 is the top, so the
/// vertical axis flips; x maps straight through.
pub fn to_ndc(pixel: Vec2, screen: LogicalScreen) -> Vec2 {
    vec2(
        (pixel.x / (screen.width / 2.0)) - 1.0,
        1.0 - (pixel.y / (screen.height / 2.0)),
    )
}

/// The whole vertex stage for one corner: projection plus texture-coordinate
/// pass-through. Pure; no corner depends on any other.
pub fn project_corner(corner: Vec2, column: &ColumnInstance, screen: LogicalScreen) -> ProjectedCorner {
    let ndc = to_ndc(pixel_position(corner, column), screen);
    ProjectedCorner {
        // z stays 0: columns never compete on depth, draw order decides.
        clip_position: vec4(ndc.x, ndc.y, 0.0, 1.0),
        // The horizontal coordinate is the precomputed wall-slice selector;
        // the vertical one reuses the corner's strip fraction, so the texture
        // stretches exactly to the strip.
        tex_coords: vec2(column.tex_u, corner.y),
        tex_layer: column.tex_layer,
    }
}

/// The fragment stage's compositing rule: keep the sampled rgb, force alpha
/// to fully opaque. Source alpha is discarded deliberately.
pub fn opaque(sampled: Vec4) -> Vec4 {
    vec4(sampled.x, sampled.y, sampled.z, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(screen_x: f32, top: f32, height: f32, tex_u: f32, tex_layer: u32) -> ColumnInstance {
        ColumnInstance {
            screen_x,
            top,
            height,
            tex_u,
            tex_layer,
        }
    }

    #[test]
    fn top_left_corner_of_screen() {
        let c = column(0.0, 0.0, 480.0, 0.0, 2);
        let out = project_corner(vec2(0.0, 0.0), &c, LogicalScreen::VIRTUAL);
        assert_eq!(out.clip_position, vec4(-1.0, 1.0, 0.0, 1.0));
        assert_eq!(out.tex_coords, vec2(0.0, 0.0));
        assert_eq!(out.tex_layer, 2);
    }

    #[test]
    fn bottom_right_corner_of_screen() {
        let c = column(853.0, 0.0, 480.0, 0.75, 0);
        let out = project_corner(vec2(1.0, 1.0), &c, LogicalScreen::VIRTUAL);
        assert_eq!(out.clip_position, vec4(1.0, -1.0, 0.0, 1.0));
        assert_eq!(out.tex_coords, vec2(0.75, 1.0));
    }

    #[test]
    fn mid_screen_strip() {
        let c = column(427.0, 100.0, 200.0, 0.5, 0);
        let out = project_corner(vec2(0.0, 0.5), &c, LogicalScreen::VIRTUAL);
        assert!(out.clip_position.x.abs() < 1e-3);
        assert!((out.clip_position.y - (1.0 - 200.0 / 240.0)).abs() < 1e-6);
    }

    #[test]
    fn ndc_stays_in_range_over_the_logical_screen() {
        let screen = LogicalScreen::VIRTUAL;
        for x in 0..=854 {
            let ndc = to_ndc(vec2(x as f32, 240.0), screen);
            assert!((-1.0..=1.0).contains(&ndc.x));
        }
        for y in 0..=480 {
            let ndc = to_ndc(vec2(427.0, y as f32), screen);
            assert!((-1.0..=1.0).contains(&ndc.y));
        }
    }

    #[test]
    fn projection_is_monotonic_per_axis() {
        let screen = LogicalScreen::VIRTUAL;
        let a = to_ndc(vec2(100.0, 100.0), screen);
        let b = to_ndc(vec2(101.0, 100.0), screen);
        let c = to_ndc(vec2(100.0, 101.0), screen);
        assert!(b.x > a.x);
        // y flips: lower on screen means smaller ndc_y.
        assert!(c.y < a.y);
        assert_eq!(b.y, a.y);
        assert_eq!(c.x, a.x);
    }

    #[test]
    fn projection_is_pure() {
        let c = column(321.0, 87.5, 133.0, 0.25, 1);
        let first = project_corner(vec2(1.0, 0.25), &c, LogicalScreen::VIRTUAL);
        let second = project_corner(vec2(1.0, 0.25), &c, LogicalScreen::VIRTUAL);
        assert_eq!(first, second);
    }

    #[test]
    fn all_corners_share_the_column_layer() {
        let c = column(12.0, 40.0, 200.0, 0.1, 7);
        let corners = [
            vec2(0.0, 0.0),
            vec2(1.0, 0.0),
            vec2(1.0, 1.0),
            vec2(0.0, 1.0),
        ];
        for corner in corners {
            assert_eq!(project_corner(corner, &c, LogicalScreen::VIRTUAL).tex_layer, 7);
        }
    }

    #[test]
    fn alpha_is_forced_opaque() {
        assert_eq!(opaque(vec4(0.3, 0.5, 0.7, 0.0)).w, 1.0);
        assert_eq!(opaque(vec4(0.3, 0.5, 0.7, 0.4)).w, 1.0);
        let out = opaque(vec4(0.3, 0.5, 0.7, 0.0));
        assert_eq!((out.x, out.y, out.z), (0.3, 0.5, 0.7));
    }
}
