#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use postfx::prelude::*;
use postfx::renderer::{CameraId, Command};
use postfx_vhs::{VhsMaterialProvider, VhsMaterials, VhsRendererFeature, VhsSettings};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

/// What a target holds: the names of the materials applied to the scene, in order.
pub type Image = Vec<String>;

#[derive(Clone, Debug)]
pub struct BlitRecord {
    pub source: RenderTargetId,
    pub dest: RenderTargetId,
    pub material: Option<String>,
    pub properties: PropertyBlock,
}

/// Render context that tracks symbolic images instead of pixels.
#[derive(Default)]
pub struct SimContext {
    pub images: HashMap<RenderTargetId, Image>,
    pub active: HashMap<RenderTargetId, TargetDescriptor>,
    pub acquired: Vec<RenderTargetId>,
    pub released: Vec<RenderTargetId>,
    pub blits: Vec<BlitRecord>,
    pub submissions: usize,
}

impl SimContext {
    pub fn with_camera(camera: CameraId) -> Self {
        let mut context = Self::default();
        context
            .images
            .insert(RenderTargetId::Camera(camera), vec!["scene".to_string()]);
        context
    }

    pub fn image(&self, id: RenderTargetId) -> &[String] {
        self.images.get(&id).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn material_blits(&self) -> Vec<&BlitRecord> {
        self.blits
            .iter()
            .filter(|blit| blit.material.is_some())
            .collect()
    }

    fn known(&self, id: RenderTargetId) -> bool {
        match id {
            RenderTargetId::Camera(_) => self.images.contains_key(&id),
            RenderTargetId::Temporary(_) => self.active.contains_key(&id),
        }
    }
}

impl RenderContext for SimContext {
    fn execute_command_buffer(&mut self, cmd: &mut CommandBuffer) -> Result<(), GpuError> {
        self.submissions += 1;
        for command in cmd.drain() {
            match command {
                Command::GetTemporaryRt { id, desc, .. } => {
                    if self.active.contains_key(&id) {
                        return Err(GpuError::TargetInUse(id));
                    }
                    self.active.insert(id, desc);
                    self.images.insert(id, Vec::new());
                    self.acquired.push(id);
                }
                Command::ReleaseTemporaryRt { id } => {
                    self.active.remove(&id);
                    self.images.remove(&id);
                    self.released.push(id);
                }
                Command::Blit {
                    source,
                    dest,
                    material,
                } => {
                    for id in [source, dest] {
                        if !self.known(id) {
                            return Err(GpuError::UnknownTarget(id));
                        }
                    }
                    if source == dest {
                        continue;
                    }
                    let mut image = self.images[&source].clone();
                    if let Some(blit) = &material {
                        image.push(blit.material.name.clone());
                    }
                    self.images.insert(dest, image);
                    self.blits.push(BlitRecord {
                        source,
                        dest,
                        material: material.as_ref().map(|blit| blit.material.name.clone()),
                        properties: material.map(|blit| blit.properties).unwrap_or_default(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Counts error events.
#[derive(Clone, Default)]
pub struct ErrorCounter(Arc<AtomicUsize>);

impl ErrorCounter {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl<S: Subscriber> Layer<S> for ErrorCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::ERROR {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

pub const CAMERA: CameraId = 0;

pub fn descriptor() -> TargetDescriptor {
    TargetDescriptor::new(1920, 1080, TextureFormat::Rgba8Unorm).with_depth_bits(24)
}

pub fn vhs_materials() -> VhsMaterials {
    VhsMaterials::from_shader(Arc::new(Shader::from_wgsl("vhs", "")))
}

/// A renderer with the VHS feature, its materials registered or not.
pub fn renderer(with_materials: bool) -> Renderer {
    let mut resources = Resources::new();
    if with_materials {
        resources.insert(VhsMaterials::ASSET_NAME, vhs_materials());
    }
    let provider = Arc::new(VhsMaterialProvider::new(Arc::new(resources)));
    let mut renderer = Renderer::new();
    renderer.add_feature(Box::new(VhsRendererFeature::new(provider)));
    renderer
}

/// A volume stack resolving the VHS settings to `intensity` and `color`.
pub fn stack(intensity: f32, color: Color) -> VolumeStack {
    let mut manager = VolumeManager::new();
    manager.register::<VhsSettings>();
    manager.add_volume(Volume::new(
        "global",
        VolumeProfile::new().with(VhsSettings::new(intensity, color)),
    ));
    manager.create_stack()
}
