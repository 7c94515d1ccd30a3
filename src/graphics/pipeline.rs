use crate::GpuHandle;

mod builder;
pub use builder::*;

/// A full-screen render pipeline, drawn as one triangle with no vertex buffers.
pub struct RenderPipeline {
    pub gpu: GpuHandle,
    pub inner: wgpu::RenderPipeline,
    pub format: wgpu::TextureFormat,
}
crate::wgpu_inner_deref!(RenderPipeline);
