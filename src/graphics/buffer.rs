use bytemuck::Pod;
use futures::executor::block_on;
use wgpu::util::DeviceExt;

use crate::GpuHandle;
use std::ops::Deref;

pub struct Buffer {
    pub(crate) gpu: GpuHandle,
    pub(crate) inner: wgpu::Buffer,
    pub size: u64,
}

/// Allows you to use this as a reference to the inner `wgpu::Buffer`
impl Deref for Buffer {
    type Target = wgpu::Buffer;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Buffer {
    /// Blocks until the whole buffer has been read back from the gpu.
    /// # Errors
    /// Errors according to [`wgpu::BufferAsyncError`]
    pub fn download(&self) -> Result<wgpu::util::DownloadBuffer, wgpu::BufferAsyncError> {
        let fut = wgpu::util::DownloadBuffer::read_buffer(
            &self.gpu.device,
            &self.gpu.queue,
            &self.inner.slice(..),
        );
        self.gpu.poll(wgpu::Maintain::Wait);
        block_on(fut)
    }

    pub fn size(&self) -> usize {
        self.size as usize
    }

    pub fn write<T>(&self, data: &[T])
    where
        T: Pod,
    {
        self.gpu
            .queue
            .write_buffer(&self.inner, 0, bytemuck::cast_slice(data));
    }

    /// Bind the whole buffer as a uniform block.
    pub fn as_uniform_binding(&self) -> wgpu::BindingResource<'_> {
        self.inner.as_entire_binding()
    }
}

pub struct BufferBuilder<'a> {
    pub gpu: GpuHandle,
    pub label: Option<&'a str>,
    pub usage: wgpu::BufferUsages,
}

impl<'a> BufferBuilder<'a> {
    #[must_use]
    pub const fn new(gpu: GpuHandle, label: &'a str) -> Self {
        BufferBuilder {
            gpu,
            label: Some(label),
            usage: wgpu::BufferUsages::empty(),
        }
    }

    /// Allow a buffer to be a `BufferBindingType::Uniform` inside a bind group.
    pub fn as_uniform_buffer(mut self) -> Self {
        self.usage |= wgpu::BufferUsages::UNIFORM;
        self
    }

    /// Allow a buffer to be the destination buffer for a copy or write operation.
    pub fn allow_copy_to(mut self) -> Self {
        self.usage |= wgpu::BufferUsages::COPY_DST;
        self
    }

    /// Allow a buffer to be mapped for reading.
    pub fn allow_map_read(mut self) -> Self {
        self.usage |= wgpu::BufferUsages::MAP_READ;
        self
    }

    /// Create a buffer initialized with `data`
    pub fn create<T>(&self, data: &[T]) -> Buffer
    where
        T: Pod,
    {
        let contents = bytemuck::cast_slice(data);
        let inner = self
            .gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: self.label,
                contents,
                usage: self.usage,
            });
        Buffer {
            gpu: self.gpu.clone(),
            inner,
            size: contents.len() as u64,
        }
    }

    /// Create a zeroed buffer of `size` bytes
    pub fn create_uninit(&self, size: u64) -> Buffer {
        let inner = self.gpu.device.create_buffer(&wgpu::BufferDescriptor {
            label: self.label,
            size,
            usage: self.usage,
            mapped_at_creation: false,
        });
        Buffer {
            gpu: self.gpu.clone(),
            inner,
            size,
        }
    }
}
