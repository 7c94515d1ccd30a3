use std::borrow::Cow;

use wgpu::ShaderModuleDescriptor;
use wgpu::ShaderSource;

use crate::GpuHandle;
use crate::RenderPipeline;

/// Builds a pipeline from a single WGSL module holding both the shared vertex
/// stage and the fragment stage of one pass.
pub struct PipelineBuilder<'a> {
    /// Handle to the Gpu
    gpu: GpuHandle,
    label: Option<&'a str>,
    /// WGSL source; defaults to the built-in copy shader
    source: &'a str,
    vertex_entry: &'a str,
    fragment_entry: &'a str,
    /// Bind groups that this pipeline uses. The first entry will provide all the bindings for
    /// "group(0)", second entry will provide all the bindings for "group(1)" etc.
    bind_group_layouts: &'a [&'a wgpu::BindGroupLayout],
    format: wgpu::TextureFormat,
    blend: Option<wgpu::BlendState>,
    primitive: wgpu::PrimitiveState,
}

impl<'a> PipelineBuilder<'a> {
    pub const BLIT_SHADER: &'static str = include_str!("../../../shaders/blit.wgsl");

    pub fn new(gpu: GpuHandle, label: &'a str) -> Self {
        Self {
            gpu,
            label: Some(label),
            source: Self::BLIT_SHADER,
            vertex_entry: "vs_main",
            fragment_entry: "fs_main",
            bind_group_layouts: &[],
            format: wgpu::TextureFormat::Rgba8Unorm,
            blend: Some(wgpu::BlendState::REPLACE),
            // Full-screen triangles are never culled
            primitive: wgpu::PrimitiveState::default(),
        }
    }

    pub fn with_wgsl(mut self, source: &'a str) -> Self {
        self.source = source;
        self
    }

    pub fn with_vertex_entry(mut self, entry: &'a str) -> Self {
        self.vertex_entry = entry;
        self
    }

    pub fn with_fragment_entry(mut self, entry: &'a str) -> Self {
        self.fragment_entry = entry;
        self
    }

    pub fn with_bind_groups(mut self, bind_groups: &'a [&'a wgpu::BindGroupLayout]) -> Self {
        self.bind_group_layouts = bind_groups;
        self
    }

    /// Format of the single color target this pipeline writes to.
    pub fn with_target_format(mut self, format: wgpu::TextureFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_blend(mut self, blend: Option<wgpu::BlendState>) -> Self {
        self.blend = blend;
        self
    }

    #[must_use]
    pub fn create(&self) -> RenderPipeline {
        let module = self.gpu.device.create_shader_module(&ShaderModuleDescriptor {
            label: self.label_suffix("shader").as_deref(),
            source: ShaderSource::Wgsl(Cow::Borrowed(self.source)),
        });

        // The pipeline layout
        let layout = self
            .gpu
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: self.label_suffix("pipeline layout").as_deref(),
                bind_group_layouts: self.bind_group_layouts,
                push_constant_ranges: &[],
            });

        let targets = [wgpu::ColorTargetState {
            format: self.format,
            blend: self.blend,
            write_mask: wgpu::ColorWrites::ALL,
        }];

        let pipeline = self
            .gpu
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                layout: Some(&layout),
                label: self.label,
                vertex: wgpu::VertexState {
                    module: &module,
                    entry_point: self.vertex_entry,
                    buffers: &[],
                },
                primitive: self.primitive,
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                fragment: Some(wgpu::FragmentState {
                    module: &module,
                    entry_point: self.fragment_entry,
                    targets: &targets,
                }),
                multiview: None,
            });

        tracing::trace!(
            label = self.label.unwrap_or_default(),
            fragment = self.fragment_entry,
            format = ?self.format,
            "created pipeline"
        );

        RenderPipeline {
            gpu: self.gpu.clone(),
            inner: pipeline,
            format: self.format,
        }
    }

    /// Helper function to append a suffix to the label, if Some
    fn label_suffix(&self, suffix: &str) -> Option<String> {
        self.label.map(|label| format!("{} {}", label, suffix))
    }
}
