use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::material::Shader;
use crate::renderer::{CameraId, Command, CommandBuffer, MaterialBlit, RenderContext, RenderTargetId};
use crate::{
    FilterMode, GpuError, GpuHandle, PipelineBuilder, RenderPipeline, TargetDescriptor, Texture,
    TexturePool,
};

/// Pipelines are shared between blits writing the same format with the same
/// shader pass. Shaders compare by content, not by name. `None` is the
/// built-in copy shader.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct PipelineKey {
    shader: Option<Arc<Shader>>,
    pass: u32,
    format: wgpu::TextureFormat,
}

impl PipelineKey {
    fn new(material: Option<&MaterialBlit>, format: wgpu::TextureFormat) -> Self {
        Self {
            shader: material.map(|blit| Arc::clone(&blit.material.shader)),
            pass: material.map_or(0, |blit| blit.pass),
            format,
        }
    }
}

/// Runs command buffers on the gpu.
///
/// Camera targets are owned by the host and registered by id; temporary
/// targets come from an internal [`TexturePool`]. Each command buffer is
/// checked as a whole, then recorded into a single encoder and submitted once.
/// A buffer that fails the check changes nothing.
pub struct GpuRenderContext {
    gpu: GpuHandle,
    cameras: HashMap<CameraId, Texture>,
    pool: TexturePool,
    point_sampler: wgpu::Sampler,
    linear_sampler: wgpu::Sampler,
    copy_layout: wgpu::BindGroupLayout,
    material_layout: wgpu::BindGroupLayout,
    pipelines: HashMap<PipelineKey, RenderPipeline>,
}

impl GpuRenderContext {
    pub fn new(gpu: &GpuHandle) -> Self {
        let point_sampler = gpu
            .new_sampler("Point sampler")
            .clamp_to_edge()
            .with_filter(FilterMode::Point)
            .create();
        let linear_sampler = gpu
            .new_sampler("Bilinear sampler")
            .clamp_to_edge()
            .lerp_filter()
            .create();

        let copy_layout = gpu.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Blit bind group layout"),
            entries: &[texture_entry(0), sampler_entry(1)],
        });
        let material_layout = gpu.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Material bind group layout"),
            entries: &[
                texture_entry(0),
                sampler_entry(1),
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        Self {
            gpu: gpu.clone(),
            cameras: HashMap::new(),
            pool: TexturePool::new(gpu.clone()),
            point_sampler,
            linear_sampler,
            copy_layout,
            material_layout,
            pipelines: HashMap::new(),
        }
    }

    /// Make `texture` the color target of camera `id`, replacing any previous one.
    /// The texture must allow render attachment and texture binding.
    pub fn register_camera_target(&mut self, id: CameraId, texture: Texture) {
        self.cameras.insert(id, texture);
    }

    /// Allocate and register a color target for camera `id`.
    pub fn create_camera_target(&mut self, id: CameraId, desc: &TargetDescriptor) -> &Texture {
        let texture = Texture::for_target(&self.gpu, "Camera color target", desc);
        self.cameras.insert(id, texture);
        &self.cameras[&id]
    }

    pub fn camera_target(&self, id: CameraId) -> Option<&Texture> {
        self.cameras.get(&id)
    }

    pub fn remove_camera_target(&mut self, id: CameraId) -> Option<Texture> {
        self.cameras.remove(&id)
    }

    pub fn pool(&self) -> &TexturePool {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut TexturePool {
        &mut self.pool
    }

    fn target(&self, id: RenderTargetId) -> Result<(&Texture, FilterMode), GpuError> {
        let target = match id {
            RenderTargetId::Camera(camera) => self
                .cameras
                .get(&camera)
                .map(|texture| (texture, FilterMode::Bilinear)),
            RenderTargetId::Temporary(_) => self
                .pool
                .get(id)
                .map(|target| (&target.texture, target.filter)),
        };
        target.ok_or(GpuError::UnknownTarget(id))
    }

    fn sampler(&self, filter: FilterMode) -> &wgpu::Sampler {
        match filter {
            FilterMode::Point => &self.point_sampler,
            FilterMode::Bilinear => &self.linear_sampler,
        }
    }

    /// Every target a command may reference before the buffer runs.
    fn live_targets(&self) -> HashSet<RenderTargetId> {
        self.cameras
            .keys()
            .map(|id| RenderTargetId::Camera(*id))
            .chain(self.pool.active_ids())
            .collect()
    }

    fn create_pipeline(&self, key: &PipelineKey) -> Result<RenderPipeline, GpuError> {
        let (label, source, entry, layout) = match key.shader.as_deref() {
            Some(shader) => {
                let entry = shader
                    .fragment_entry(key.pass)
                    .ok_or_else(|| GpuError::InvalidPass {
                        shader: shader.name.clone(),
                        pass: key.pass,
                    })?;
                (shader.name.as_str(), shader.source.as_str(), entry, &self.material_layout)
            }
            None => (
                "Blit",
                PipelineBuilder::BLIT_SHADER,
                Shader::DEFAULT_FRAGMENT_ENTRY,
                &self.copy_layout,
            ),
        };

        Ok(self
            .gpu
            .new_pipeline(label)
            .with_wgsl(source)
            .with_vertex_entry(Shader::VERTEX_ENTRY)
            .with_fragment_entry(entry)
            .with_bind_groups(&[layout])
            .with_target_format(key.format)
            .create())
    }

    fn blit(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        source: RenderTargetId,
        dest: RenderTargetId,
        material: Option<&MaterialBlit>,
    ) -> Result<(), GpuError> {
        if source == dest {
            tracing::trace!(?source, "skipping blit onto itself");
            return Ok(());
        }

        let format = self.target(dest)?.0.format;
        let key = PipelineKey::new(material, format);
        if !self.pipelines.contains_key(&key) {
            let pipeline = self.create_pipeline(&key)?;
            self.pipelines.insert(key.clone(), pipeline);
        }

        let (source_texture, filter) = self.target(source)?;
        let (dest_texture, _) = self.target(dest)?;
        let sampler = self.sampler(filter);

        let uniforms = material.map(|blit| {
            self.gpu
                .new_buffer("Material properties")
                .as_uniform_buffer()
                .create(&blit.material.pack(&blit.properties))
        });

        let bind_group = match &uniforms {
            Some(uniforms) => self.gpu.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Material bind group"),
                layout: &self.material_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(&source_texture.view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(sampler),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: uniforms.as_uniform_binding(),
                    },
                ],
            }),
            None => self.gpu.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Blit bind group"),
                layout: &self.copy_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(&source_texture.view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(sampler),
                    },
                ],
            }),
        };

        let pipeline = self
            .pipelines
            .get(&key)
            .ok_or(GpuError::UnknownTarget(dest))?;

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Blit pass"),
            color_attachments: &[wgpu::RenderPassColorAttachment {
                view: &dest_texture.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: true,
                },
            }],
            depth_stencil_attachment: None,
        });
        pass.set_pipeline(pipeline);
        pass.set_bind_group(0, &bind_group, &[]);
        pass.draw(0..3, 0..1);
        Ok(())
    }
}

impl RenderContext for GpuRenderContext {
    fn execute_command_buffer(&mut self, cmd: &mut CommandBuffer) -> Result<(), GpuError> {
        let commands: Vec<Command> = cmd.drain().collect();
        if commands.is_empty() {
            return Ok(());
        }

        if let Err(e) = validate(&commands, self.live_targets()) {
            tracing::warn!(name = cmd.name(), error = %e, "rejected command buffer");
            return Err(e);
        }

        tracing::trace!(name = cmd.name(), count = commands.len(), "executing command buffer");
        let mut encoder = self.gpu.create_command_encoder(cmd.name());

        for command in &commands {
            match command {
                Command::GetTemporaryRt { id, desc, filter } => {
                    self.pool.acquire(*id, desc, *filter)?;
                }
                Command::ReleaseTemporaryRt { id } => {
                    if !self.pool.release(*id) {
                        tracing::warn!(?id, "released a target that was never acquired");
                    }
                }
                Command::Blit {
                    source,
                    dest,
                    material,
                } => self.blit(&mut encoder, *source, *dest, material.as_ref())?,
            }
        }
        Ok(())
    }

    /// Evict pooled targets no frame has asked for lately.
    fn end_frame(&mut self) {
        self.pool.end_frame();
    }
}

/// Check `commands` against the targets that are `live` before they run:
/// targets must be known when used, temporaries are not acquired twice and
/// material passes exist.
fn validate(commands: &[Command], mut live: HashSet<RenderTargetId>) -> Result<(), GpuError> {
    for command in commands {
        match command {
            Command::GetTemporaryRt { id, .. } => {
                if !live.insert(*id) {
                    return Err(GpuError::TargetInUse(*id));
                }
            }
            Command::ReleaseTemporaryRt { id } => {
                live.remove(id);
            }
            Command::Blit {
                source,
                dest,
                material,
            } => {
                if source == dest {
                    continue;
                }
                if let Some(unknown) = [*source, *dest].into_iter().find(|id| !live.contains(id)) {
                    return Err(GpuError::UnknownTarget(unknown));
                }
                if let Some(blit) = material {
                    let shader = &blit.material.shader;
                    if shader.fragment_entry(blit.pass).is_none() {
                        return Err(GpuError::InvalidPass {
                            shader: shader.name.clone(),
                            pass: blit.pass,
                        });
                    }
                }
            }
        }
    }
    Ok(())
}

fn texture_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
            view_dimension: wgpu::TextureViewDimension::D2,
            multisampled: false,
        },
        count: None,
    }
}

fn sampler_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
    }
}
