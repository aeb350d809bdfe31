// src/rendering_lib/shader.rs

// The GPU form of the column stage. projection.rs holds the CPU mirror of
// vs_main and the opacity rule of fs_main; keep them in lockstep.

pub const WGSL_SHADER_SOURCE: &str = r#"
struct Screen {
    width: f32,
    height: f32,
    // Nonzero replaces every wall fragment with solid red; toggled from the
    // debug overlay.
    debug_columns: u32,
    _padding: u32,
}

@group(0) @binding(0)
var wall_atlas: texture_2d_array<f32>;
@group(0) @binding(1)
var wall_sampler: sampler;

@group(1) @binding(0)
var<uniform> screen: Screen;

struct VertexInput {
    @location(0) position: vec2<f32>, // Unit-quad corner: x in {0,1}, y in [0,1]
    @location(1) uv: vec2<f32>,
}

struct ColumnInput {
    @location(2) screen_x: f32,
    @location(3) top: f32,
    @location(4) height: f32,
    @location(5) tex_u: f32,
    @location(6) tex_layer: u32,
}

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) tex_coords: vec2<f32>,
    // flat: one layer per quad, never blended between fragments.
    @location(1) @interpolate(flat) tex_layer: u32,
}

@vertex
fn vs_main(model: VertexInput, column: ColumnInput) -> VertexOutput {
    var out: VertexOutput;

    // The corner's local x (0 or 1) offsets from the column's left edge, so
    // each quad is exactly one logical pixel wide; local y scales to the
    // strip's height and hangs from its top offset.
    let pixel_x = column.screen_x + model.position.x;
    let pixel_y = column.top + model.position.y * column.height;

    // Logical pixel space to NDC over the virtual screen.
    // pixel row 0 is top-of-screen and NDC +1 is top, so y flips.
    let ndc_x = (pixel_x / (screen.width / 2.0)) - 1.0;
    let ndc_y = 1.0 - (pixel_y / (screen.height / 2.0));

    out.clip_position = vec4<f32>(ndc_x, ndc_y, 0.0, 1.0);
    out.tex_coords = vec2<f32>(column.tex_u, model.position.y);
    out.tex_layer = column.tex_layer;

    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let sampled = textureSample(wall_atlas, wall_sampler, in.tex_coords, in.tex_layer);

    // Walls are always opaque; whatever alpha the atlas stores is dropped.
    var color = vec4<f32>(sampled.rgb, 1.0);
    if screen.debug_columns != 0u {
        color = vec4<f32>(1.0, 0.0, 0.0, 1.0);
    }
    return color;
}
"#;
