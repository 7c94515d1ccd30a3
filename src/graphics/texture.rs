mod sampler;
pub use sampler::*;

mod builder;
pub use builder::*;

mod pool;
pub use pool::*;

use crate::{GpuError, GpuHandle};

// Re-export TextureFormat
pub use wgpu::TextureFormat;

pub type D2 = (u32, u32);

/// Describes a color target: what the camera renders into and what scratch
/// targets are allocated from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TargetDescriptor {
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
    /// Bits of the depth channel. Zero means no depth attachment.
    pub depth_buffer_bits: u32,
    pub sample_count: u32,
}

impl TargetDescriptor {
    pub const fn new(width: u32, height: u32, format: TextureFormat) -> Self {
        Self {
            width,
            height,
            format,
            depth_buffer_bits: 0,
            sample_count: 1,
        }
    }

    pub const fn with_depth_bits(mut self, bits: u32) -> Self {
        self.depth_buffer_bits = bits;
        self
    }

    pub const fn size(&self) -> D2 {
        (self.width, self.height)
    }

    pub const fn extent(&self) -> wgpu::Extent3d {
        wgpu::Extent3d {
            width: self.width,
            height: self.height,
            depth_or_array_layers: 1,
        }
    }
}

/// How a target is filtered when it is sampled by a blit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FilterMode {
    Point,
    Bilinear,
}

impl FilterMode {
    pub const fn to_wgpu(self) -> wgpu::FilterMode {
        match self {
            FilterMode::Point => wgpu::FilterMode::Nearest,
            FilterMode::Bilinear => wgpu::FilterMode::Linear,
        }
    }
}

/// A 2D color texture with its default view.
pub struct Texture {
    pub(crate) gpu: GpuHandle,
    inner: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub format: wgpu::TextureFormat,
    pub size: D2,
    pub usage: wgpu::TextureUsages,
}

impl std::ops::Deref for Texture {
    type Target = wgpu::Texture;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Texture {
    /// Creates a single-sampled render target matching `desc`.
    /// The depth channel of `desc` is not allocated; color targets never carry depth.
    pub fn for_target(gpu: &GpuHandle, label: &str, desc: &TargetDescriptor) -> Self {
        gpu.new_texture(label)
            .with_format(desc.format)
            .with_usage(crate::SCRATCH_TARGET_USAGE)
            .create_empty(desc.size())
    }

    pub fn descriptor(&self) -> TargetDescriptor {
        TargetDescriptor {
            width: self.size.0,
            height: self.size.1,
            format: self.format,
            depth_buffer_bits: 0,
            sample_count: 1,
        }
    }

    pub fn write<T>(&self, data: &[T])
    where
        T: bytemuck::Pod,
    {
        let data_bytes = bytemuck::cast_slice::<_, u8>(data);
        self.gpu.queue.write_texture(
            self.inner.as_image_copy(),
            data_bytes,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: std::num::NonZeroU32::new(
                    self.size.0 * self.format.describe().block_size as u32,
                ),
                rows_per_image: None,
            },
            wgpu::Extent3d {
                width: self.size.0,
                height: self.size.1,
                depth_or_array_layers: 1,
            },
        )
    }

    /// Copies the texture back to the cpu, tightly packed row by row.
    /// # Errors
    /// Errors when the staging buffer cannot be mapped.
    pub fn read_immediately(&self) -> Result<Vec<u8>, GpuError> {
        let bytes_per_pixel = self.format.describe().block_size as u32;
        let unpadded_bytes_per_row = self.size.0 * bytes_per_pixel;
        let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
        let padded_bytes_per_row = unpadded_bytes_per_row + (align - unpadded_bytes_per_row % align) % align;

        let staging_buf = self
            .gpu
            .new_buffer("texture read staging buffer")
            .allow_copy_to()
            .allow_map_read()
            .create_uninit(u64::from(padded_bytes_per_row * self.size.1));

        {
            let mut enc = self
                .gpu
                .create_command_encoder("texture read immediately enc");
            enc.copy_texture_to_buffer(
                self.inner.as_image_copy(),
                wgpu::ImageCopyBuffer {
                    buffer: &staging_buf,
                    layout: wgpu::ImageDataLayout {
                        offset: 0,
                        bytes_per_row: std::num::NonZeroU32::new(padded_bytes_per_row),
                        rows_per_image: None,
                    },
                },
                wgpu::Extent3d {
                    width: self.size.0,
                    height: self.size.1,
                    depth_or_array_layers: 1,
                },
            );
        }

        let padded = staging_buf
            .download()
            .map_err(|_| GpuError::BufferAsyncError)?;

        Ok(padded
            .chunks(padded_bytes_per_row as usize)
            .flat_map(|row| &row[..unpadded_bytes_per_row as usize])
            .copied()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_builder_keeps_fields() {
        let desc = TargetDescriptor::new(640, 360, TextureFormat::Rgba8Unorm).with_depth_bits(24);
        assert_eq!(desc.size(), (640, 360));
        assert_eq!(desc.depth_buffer_bits, 24);
        assert_eq!(desc.sample_count, 1);
        assert_eq!(desc.extent().depth_or_array_layers, 1);
    }

    #[test]
    fn filter_modes_map_to_wgpu() {
        assert_eq!(FilterMode::Point.to_wgpu(), wgpu::FilterMode::Nearest);
        assert_eq!(FilterMode::Bilinear.to_wgpu(), wgpu::FilterMode::Linear);
    }

    #[test]
    #[ignore = "needs a gpu adapter"]
    fn texture_write_read() {
        let gpu = crate::Gpu::builder().build_headless().unwrap();
        let data = [0x11_22_33_44_u32; 64 * 4];
        let texture = gpu
            .new_texture("write read test")
            .with_format(TextureFormat::Rgba8Unorm)
            .allow_copy_from()
            .allow_copy_to()
            .create_empty((64, 4));
        texture.write(&data);

        let read = texture.read_immediately().unwrap();
        assert_eq!(bytemuck::cast_slice::<_, u8>(&data), &read[..]);
    }
}
