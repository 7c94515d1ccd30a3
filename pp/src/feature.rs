use std::sync::Arc;

use postfx::prelude::*;

use crate::{VhsMaterialProvider, VhsPass};

/// Adds the VHS pass to every camera a renderer draws.
pub struct VhsRendererFeature {
    provider: Arc<VhsMaterialProvider>,
    event: RenderPassEvent,
    pass: Option<VhsPass>,
}

impl VhsRendererFeature {
    pub fn new(provider: Arc<VhsMaterialProvider>) -> Self {
        Self {
            provider,
            event: RenderPassEvent::BeforeRenderingPostProcessing,
            pass: None,
        }
    }

    /// Schedule the pass at another slot of the frame.
    pub fn with_event(mut self, event: RenderPassEvent) -> Self {
        self.event = event;
        self
    }
}

impl RendererFeature for VhsRendererFeature {
    fn name(&self) -> &str {
        "VHS Feature"
    }

    fn create(&mut self) {
        self.pass = Some(VhsPass::new(Arc::clone(&self.provider)).with_event(self.event));
    }

    fn add_render_passes<'a>(&'a mut self, queue: &mut PassQueue<'a>, _data: &RenderingData) {
        match self.pass.as_mut() {
            Some(pass) => queue.enqueue_pass(pass),
            None => tracing::warn!("VHS feature used before create"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feature() -> VhsRendererFeature {
        VhsRendererFeature::new(Arc::new(VhsMaterialProvider::new(Arc::new(Resources::new()))))
    }

    #[test]
    fn enqueues_only_after_create() {
        let stack = VolumeStack::default();
        let desc = TargetDescriptor::new(8, 8, TextureFormat::Rgba8Unorm);
        let data = RenderingData::new(CameraData::game(0, desc), &stack);
        let mut feature = feature();

        {
            let mut queue = PassQueue::new();
            feature.add_render_passes(&mut queue, &data);
            assert!(queue.is_empty());
        }

        feature.create();
        let mut queue = PassQueue::new();
        feature.add_render_passes(&mut queue, &data);
        let passes = queue.sorted();
        assert_eq!(passes.len(), 1);
        assert_eq!(passes[0].name(), "VHS");
        assert_eq!(passes[0].event(), RenderPassEvent::BeforeRenderingPostProcessing);
    }

    #[test]
    fn event_is_configurable() {
        let stack = VolumeStack::default();
        let desc = TargetDescriptor::new(8, 8, TextureFormat::Rgba8Unorm);
        let data = RenderingData::new(CameraData::game(0, desc), &stack);
        let mut feature = feature().with_event(RenderPassEvent::AfterRendering);
        feature.create();
        let mut queue = PassQueue::new();
        feature.add_render_passes(&mut queue, &data);
        assert_eq!(queue.sorted()[0].event(), RenderPassEvent::AfterRendering);
    }
}
