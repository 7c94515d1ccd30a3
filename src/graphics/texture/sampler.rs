use crate::FilterMode;

// 'a: Label str
pub struct SamplerBuilder<'a, 'gpu> {
    pub gpu: &'gpu wgpu::Device,
    pub inner: wgpu::SamplerDescriptor<'a>,
}

impl SamplerBuilder<'_, '_> {
    pub fn create(&self) -> wgpu::Sampler {
        self.gpu.create_sampler(&self.inner)
    }

    /// Out of bounds accesses read the edge texel.
    /// This is the wgpu default but blits rely on it, so it is set explicitly.
    pub const fn clamp_to_edge(mut self) -> Self {
        self.inner.address_mode_u = wgpu::AddressMode::ClampToEdge;
        self.inner.address_mode_v = wgpu::AddressMode::ClampToEdge;
        self.inner.address_mode_w = wgpu::AddressMode::ClampToEdge;
        self
    }

    pub const fn lerp_filter(mut self) -> Self {
        self.inner.mag_filter = wgpu::FilterMode::Linear;
        self.inner.min_filter = wgpu::FilterMode::Linear;
        self.inner.mipmap_filter = wgpu::FilterMode::Linear;
        self
    }

    pub const fn with_filter(mut self, filter: FilterMode) -> Self {
        let filter = filter.to_wgpu();
        self.inner.mag_filter = filter;
        self.inner.min_filter = filter;
        self.inner.mipmap_filter = filter;
        self
    }
}

impl crate::Gpu {
    // Named new_sampler so not to shadow create_sampler
    pub fn new_sampler<'a, 'gpu>(&'gpu self, label: &'a str) -> SamplerBuilder<'a, 'gpu> {
        SamplerBuilder {
            gpu: &self.device,
            inner: wgpu::SamplerDescriptor {
                label: Some(label),
                ..Default::default()
            },
        }
    }
}
