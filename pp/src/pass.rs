use std::sync::Arc;

use postfx::prelude::*;

use crate::{VhsMaterialProvider, VhsSettings, INTENSITY_PROPERTY, OVERLAY_COLOR_PROPERTY};

const INTENSITY_ID: PropertyId = PropertyId::from_name(INTENSITY_PROPERTY);
const OVERLAY_COLOR_ID: PropertyId = PropertyId::from_name(OVERLAY_COLOR_PROPERTY);

/// The two scratch targets blits ping-pong between.
pub const SCRATCH_TARGETS: [RenderTargetId; 2] = [
    RenderTargetId::temporary("_TempRT"),
    RenderTargetId::temporary("_TempRTB"),
];

/// Draws the VHS effect over the camera target.
///
/// Every frame the pass borrows two scratch targets, blits the camera image
/// through its effects alternating between them, then copies the last result
/// back onto the camera target.
pub struct VhsPass {
    provider: Arc<VhsMaterialProvider>,
    event: RenderPassEvent,
    cmd: CommandBuffer,
    properties: PropertyBlock,
    /// The camera color target of the current frame
    source: RenderTargetId,
    /// Where the latest blit wrote
    cursor: RenderTargetId,
    /// Index into `SCRATCH_TARGETS` of the next blit destination
    toggle: usize,
    scratch_acquired: bool,
}

impl VhsPass {
    pub fn new(provider: Arc<VhsMaterialProvider>) -> Self {
        Self {
            provider,
            event: RenderPassEvent::BeforeRenderingPostProcessing,
            cmd: CommandBuffer::new("VHS"),
            properties: PropertyBlock::new(),
            source: RenderTargetId::Camera(0),
            cursor: RenderTargetId::Camera(0),
            toggle: 0,
            scratch_acquired: false,
        }
    }

    pub fn with_event(mut self, event: RenderPassEvent) -> Self {
        self.event = event;
        self
    }

    /// The target holding the latest result.
    pub fn cursor(&self) -> RenderTargetId {
        self.cursor
    }

    /// Record a blit of the current result through `material` into the next
    /// scratch target, which becomes the current result.
    ///
    /// Destinations strictly alternate between the two scratch targets,
    /// starting over with the first one every frame.
    pub fn blit_to(&mut self, material: &Arc<Material>, pass: u32) {
        let prev = self.cursor;
        let next = SCRATCH_TARGETS[self.toggle];
        self.toggle = 1 - self.toggle;
        self.cmd
            .blit_material(prev, next, material, &self.properties, pass);
        self.cursor = next;
    }

    fn render(&mut self, context: &mut dyn RenderContext, data: &RenderingData) {
        let materials = match self.provider.instance() {
            Some(materials) => materials,
            None => {
                tracing::error!(
                    asset = crate::VhsMaterials::ASSET_NAME,
                    "VHS materials not found, skipping effect"
                );
                return;
            }
        };

        self.cmd.clear();
        self.cursor = self.source;
        self.toggle = 0;

        match data.volume_stack.get::<VhsSettings>() {
            Some(settings) if settings.is_active() => {
                self.properties.set_float(INTENSITY_ID, settings.intensity());
                self.properties
                    .set_color(OVERLAY_COLOR_ID, settings.overlay_color());
                self.blit_to(&materials.custom_effect, 0);
            }
            Some(_) => {}
            None => tracing::trace!("no VhsSettings in the volume stack"),
        }

        self.cmd.blit(self.cursor, self.source);

        if let Err(e) = context.execute_command_buffer(&mut self.cmd) {
            tracing::error!(error = %e, "VHS pass submission failed");
        }
        self.cmd.clear();
    }
}

impl FramePass for VhsPass {
    fn name(&self) -> &str {
        "VHS"
    }

    fn event(&self) -> RenderPassEvent {
        self.event
    }

    fn on_camera_setup(&mut self, cmd: &mut CommandBuffer, data: &RenderingData) {
        let mut desc = data.camera.target_descriptor;
        desc.depth_buffer_bits = 0;
        for id in SCRATCH_TARGETS {
            cmd.get_temporary_rt(id, desc, FilterMode::Bilinear);
        }
        self.scratch_acquired = true;
        self.source = data.camera.color_target();
        self.cursor = self.source;
    }

    fn execute(&mut self, context: &mut dyn RenderContext, data: &RenderingData) {
        if data.camera.is_editor_camera() {
            tracing::trace!(camera = data.camera.id, "skipping VHS for editor camera");
            return;
        }
        self.render(context, data);
    }

    fn on_camera_cleanup(&mut self, cmd: &mut CommandBuffer) {
        if std::mem::take(&mut self.scratch_acquired) {
            for id in SCRATCH_TARGETS {
                cmd.release_temporary_rt(id);
            }
        }
    }
}
