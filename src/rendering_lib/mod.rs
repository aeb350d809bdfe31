// src/rendering_lib/mod.rs

pub mod projection;
pub mod renderer;
pub mod shader;
pub mod texture;
pub mod vertex;

pub use projection::{LogicalScreen, VIRTUAL_HEIGHT, VIRTUAL_WIDTH};
pub use renderer::Renderer;
pub use shader::WGSL_SHADER_SOURCE;
pub use texture::TextureArray;
pub use vertex::{ColumnInstance, QuadVertex};
