use super::{CommandBuffer, RenderContext, RenderingData};

/// Slots in the frame a pass can be scheduled at, in execution order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RenderPassEvent {
    BeforeRendering,
    BeforeRenderingOpaques,
    AfterRenderingOpaques,
    BeforeRenderingTransparents,
    AfterRenderingTransparents,
    BeforeRenderingPostProcessing,
    AfterRenderingPostProcessing,
    AfterRendering,
}

/// A unit of work inside one camera's frame.
///
/// For every camera and frame the renderer calls, in order:
/// 1. `on_camera_setup` on every queued pass,
/// 2. `execute` on every queued pass, ordered by `event`,
/// 3. `on_camera_cleanup` on every pass that was set up, even if an earlier
///    step returned early or unwound.
pub trait FramePass {
    fn name(&self) -> &str;

    fn event(&self) -> RenderPassEvent;

    /// Acquire per-frame resources. Commands recorded here run before any pass executes.
    fn on_camera_setup(&mut self, _cmd: &mut CommandBuffer, _data: &RenderingData) {}

    fn execute(&mut self, context: &mut dyn RenderContext, data: &RenderingData);

    /// Release what `on_camera_setup` acquired.
    fn on_camera_cleanup(&mut self, _cmd: &mut CommandBuffer) {}
}

/// Passes enqueued for the camera currently being rendered.
#[derive(Default)]
pub struct PassQueue<'a> {
    passes: Vec<&'a mut dyn FramePass>,
}

impl<'a> PassQueue<'a> {
    pub fn new() -> Self {
        Self { passes: Vec::new() }
    }

    pub fn enqueue_pass(&mut self, pass: &'a mut dyn FramePass) {
        self.passes.push(pass);
    }

    pub fn len(&self) -> usize {
        self.passes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    /// Sort by event. Passes sharing an event keep their enqueue order.
    pub fn sorted(mut self) -> Vec<&'a mut dyn FramePass> {
        self.passes.sort_by_key(|pass| pass.event());
        self.passes
    }
}
