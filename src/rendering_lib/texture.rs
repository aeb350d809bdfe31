// src/rendering_lib/texture.rs

use anyhow::{bail, ensure, Result};
use image::RgbaImage;

/// A 2D texture array holding every wall type at a fixed layer index, plus
/// the sampler the column stage binds next to it. Built once at startup and
/// read-only for the rest of the program.
pub struct TextureArray {
    #[allow(unused)]
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    layer_count: u32,
}

impl TextureArray {
    /// Upload `images` as the layers of one array texture. Every image must
    /// share the same dimensions; layer order is the order given here, and
    /// it is the contract the map's wall codes are resolved against.
    pub fn from_images(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        images: &[RgbaImage],
        label: &str,
    ) -> Result<Self> {
        let (width, height, layers) = array_extent(images)?;

        let bytes_per_row = padded_bytes_per_row(width);
        let bytes_per_image = bytes_per_row * height;
        let unpadded_row = (width * 4) as usize;

        let mut padded_data = vec![0u8; (bytes_per_image * layers) as usize];
        for (layer, img) in images.iter().enumerate() {
            let raw = img.as_raw();
            for row in 0..height {
                let src = row as usize * unpadded_row;
                let dst = (layer as u32 * bytes_per_image + row * bytes_per_row) as usize;
                padded_data[dst..dst + unpadded_row].copy_from_slice(&raw[src..src + unpadded_row]);
            }
        }

        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: layers,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &padded_data,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(bytes_per_row),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor {
            dimension: Some(wgpu::TextureViewDimension::D2Array),
            array_layer_count: Some(layers),
            ..Default::default()
        });

        // Filtering policy lives here, not in the shader: the stage samples
        // through whatever this sampler is configured to do.
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Ok(Self {
            texture,
            view,
            sampler,
            layer_count: layers,
        })
    }

    pub fn layer_count(&self) -> u32 {
        self.layer_count
    }
}

/// Rows uploaded to the GPU must be aligned to COPY_BYTES_PER_ROW_ALIGNMENT.
fn padded_bytes_per_row(width: u32) -> u32 {
    let unpadded = width * 4;
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    ((unpadded + align - 1) / align) * align
}

fn array_extent(images: &[RgbaImage]) -> Result<(u32, u32, u32)> {
    if images.is_empty() {
        bail!("texture array needs at least one layer");
    }
    let (width, height) = images[0].dimensions();
    for img in images.iter().skip(1) {
        ensure!(
            img.dimensions() == (width, height),
            "texture array layers must all be {}x{}, got {}x{}",
            width,
            height,
            img.width(),
            img.height()
        );
    }
    Ok((width, height, images.len() as u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_padding_rounds_up_to_alignment() {
        let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
        assert_eq!(padded_bytes_per_row(64) % align, 0);
        assert_eq!(padded_bytes_per_row(64), 256);
        // 100 * 4 = 400 bytes, next multiple of 256 is 512.
        assert_eq!(padded_bytes_per_row(100), 512);
        // Already aligned widths pass through unchanged.
        assert_eq!(padded_bytes_per_row(128), 512);
    }

    #[test]
    fn extent_counts_layers() {
        let imgs = vec![RgbaImage::new(64, 64), RgbaImage::new(64, 64)];
        assert_eq!(array_extent(&imgs).unwrap(), (64, 64, 2));
    }

    #[test]
    fn empty_image_list_is_an_error() {
        assert!(array_extent(&[]).is_err());
    }

    #[test]
    fn mismatched_dimensions_are_an_error() {
        let imgs = vec![RgbaImage::new(64, 64), RgbaImage::new(32, 64)];
        assert!(array_extent(&imgs).is_err());
    }
}
