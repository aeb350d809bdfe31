// src/rendering_lib/vertex.rs

use bytemuck::{Pod, Zeroable};

/// One corner of the shared unit quad. `position` doubles as the corner
/// selector: x picks the column edge, y the strip fraction. `uv` is part of
/// the fixed attribute layout; the column stage only reads its y through
/// `position.y`, but the slot stays so the layout never shifts.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
}

/// The one quad every column shares, instanced once per screen column.
pub const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex {
        position: [0.0, 0.0],
        uv: [0.0, 0.0],
    },
    QuadVertex {
        position: [1.0, 0.0],
        uv: [1.0, 0.0],
    },
    QuadVertex {
        position: [1.0, 1.0],
        uv: [1.0, 1.0],
    },
    QuadVertex {
        position: [0.0, 1.0],
        uv: [0.0, 1.0],
    },
];

pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 2, 3, 0];

impl QuadVertex {
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// Per-column placement attributes, one instance per screen column, rebuilt
/// by the raycaster every frame. All pixel-space values are in the logical
/// 854x480 screen. A zeroed instance (the `Default`) is a degenerate,
/// invisible column — that is how misses are encoded.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Pod, Zeroable)]
pub struct ColumnInstance {
    /// Left edge of the column on the logical screen.
    pub screen_x: f32,
    /// Top edge of the wall strip, logical pixels.
    pub top: f32,
    /// Strip height in logical pixels.
    pub height: f32,
    /// Which vertical slice of the wall texture this column samples.
    pub tex_u: f32,
    /// Atlas layer of the wall type this column struck.
    pub tex_layer: u32,
}

impl ColumnInstance {
    const ATTRIBUTES: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        2 => Float32, 3 => Float32, 4 => Float32, 5 => Float32, 6 => Uint32
    ];

    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ColumnInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_corners_cover_the_unit_square() {
        for v in QUAD_VERTICES {
            assert!(v.position[0] == 0.0 || v.position[0] == 1.0);
            assert!((0.0..=1.0).contains(&v.position[1]));
        }
        let mut used = [false; 4];
        for i in QUAD_INDICES {
            used[i as usize] = true;
        }
        assert!(used.iter().all(|u| *u));
    }

    #[test]
    fn default_instance_is_degenerate() {
        let miss = ColumnInstance::default();
        assert_eq!(miss.height, 0.0);
    }

    #[test]
    fn instance_stride_matches_attribute_layout() {
        // f32 x4 + u32, tightly packed.
        assert_eq!(std::mem::size_of::<ColumnInstance>(), 20);
        let last = ColumnInstance::ATTRIBUTES.last().unwrap();
        assert_eq!(last.offset, 16);
        assert_eq!(last.format, wgpu::VertexFormat::Uint32);
    }
}
