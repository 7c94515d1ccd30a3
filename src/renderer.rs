//! Frame orchestration: features enqueue passes, passes record commands,
//! a [`RenderContext`] runs them.

mod camera;
pub use camera::*;

mod command;
pub use command::*;

mod context;
pub use context::*;

mod feature;
pub use feature::*;

mod pass;
pub use pass::*;

use crate::GpuError;

/// Renders cameras through the passes of its features.
#[derive(Default)]
pub struct Renderer {
    features: Vec<Box<dyn RendererFeature>>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a feature, calling its `create` once.
    pub fn add_feature(&mut self, mut feature: Box<dyn RendererFeature>) {
        feature.create();
        tracing::debug!(feature = feature.name(), "added renderer feature");
        self.features.push(feature);
    }

    pub fn features(&self) -> impl Iterator<Item = &dyn RendererFeature> {
        self.features.iter().map(|feature| feature.as_ref())
    }

    /// Render one camera for one frame.
    ///
    /// Every enqueued pass is set up, then executed in event order, then
    /// cleaned up. Cleanup runs for every pass that was set up regardless of
    /// how the frame ends.
    /// # Errors
    /// Errors when the setup commands cannot be executed. Cleanup has still run.
    pub fn render_camera(
        &mut self,
        context: &mut dyn RenderContext,
        data: &RenderingData,
    ) -> Result<(), GpuError> {
        let mut queue = PassQueue::new();
        for feature in self.features.iter_mut() {
            feature.add_render_passes(&mut queue, data);
        }

        let mut frame = CameraFrame {
            context,
            passes: queue.sorted(),
            set_up: 0,
        };
        frame.setup(data)?;
        frame.execute(data);
        Ok(())
    }

    /// Render every camera of one frame, then end the frame on `context`.
    ///
    /// A camera that fails does not stop the others.
    /// # Errors
    /// The first camera error, after every camera has been rendered.
    pub fn render_frame(
        &mut self,
        context: &mut dyn RenderContext,
        cameras: &[RenderingData],
    ) -> Result<(), GpuError> {
        let mut result = Ok(());
        for data in cameras {
            if let Err(e) = self.render_camera(&mut *context, data) {
                tracing::error!(camera = data.camera.id, error = %e, "camera failed to render");
                if result.is_ok() {
                    result = Err(e);
                }
            }
        }
        context.end_frame();
        result
    }
}

/// One camera's frame. Dropping it cleans up every pass that was set up.
struct CameraFrame<'c, 'p> {
    context: &'c mut dyn RenderContext,
    passes: Vec<&'p mut dyn FramePass>,
    set_up: usize,
}

impl CameraFrame<'_, '_> {
    fn setup(&mut self, data: &RenderingData) -> Result<(), GpuError> {
        let mut cmd = CommandBuffer::new("Camera setup");
        for pass in self.passes.iter_mut() {
            pass.on_camera_setup(&mut cmd, data);
            self.set_up += 1;
        }
        self.context.execute_command_buffer(&mut cmd)
    }

    fn execute(&mut self, data: &RenderingData) {
        for pass in self.passes.iter_mut() {
            tracing::trace!(pass = pass.name(), event = ?pass.event(), "executing pass");
            pass.execute(&mut *self.context, data);
        }
    }
}

impl Drop for CameraFrame<'_, '_> {
    fn drop(&mut self) {
        let mut cmd = CommandBuffer::new("Camera cleanup");
        for pass in self.passes.iter_mut().take(self.set_up) {
            pass.on_camera_cleanup(&mut cmd);
        }
        if let Err(e) = self.context.execute_command_buffer(&mut cmd) {
            tracing::error!(error = %e, "camera cleanup failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::volume::VolumeStack;
    use crate::{TargetDescriptor, TextureFormat};
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    struct LoggingPass {
        name: &'static str,
        event: RenderPassEvent,
        log: Log,
    }

    impl FramePass for LoggingPass {
        fn name(&self) -> &str {
            self.name
        }

        fn event(&self) -> RenderPassEvent {
            self.event
        }

        fn on_camera_setup(&mut self, cmd: &mut CommandBuffer, _data: &RenderingData) {
            self.log.borrow_mut().push(format!("setup {}", self.name));
            cmd.get_temporary_rt(
                RenderTargetId::temporary(self.name),
                TargetDescriptor::new(4, 4, TextureFormat::Rgba8Unorm),
                crate::FilterMode::Point,
            );
        }

        fn execute(&mut self, _context: &mut dyn RenderContext, _data: &RenderingData) {
            self.log.borrow_mut().push(format!("execute {}", self.name));
        }

        fn on_camera_cleanup(&mut self, cmd: &mut CommandBuffer) {
            self.log.borrow_mut().push(format!("cleanup {}", self.name));
            cmd.release_temporary_rt(RenderTargetId::temporary(self.name));
        }
    }

    struct SinglePassFeature {
        name: &'static str,
        event: RenderPassEvent,
        log: Log,
        pass: Option<LoggingPass>,
    }

    impl RendererFeature for SinglePassFeature {
        fn name(&self) -> &str {
            self.name
        }

        fn create(&mut self) {
            self.log.borrow_mut().push(format!("create {}", self.name));
            self.pass = Some(LoggingPass {
                name: self.name,
                event: self.event,
                log: Rc::clone(&self.log),
            });
        }

        fn add_render_passes<'a>(&'a mut self, queue: &mut PassQueue<'a>, _data: &RenderingData) {
            if let Some(pass) = self.pass.as_mut() {
                queue.enqueue_pass(pass);
            }
        }
    }

    #[derive(Default)]
    struct CountingContext {
        executed: Vec<String>,
        commands: usize,
        fail_named: Option<&'static str>,
        frames: usize,
    }

    impl RenderContext for CountingContext {
        fn execute_command_buffer(&mut self, cmd: &mut CommandBuffer) -> Result<(), GpuError> {
            self.executed.push(cmd.name().to_string());
            self.commands += cmd.drain().count();
            match self.fail_named {
                Some(name) if name == cmd.name() => {
                    Err(GpuError::UnknownTarget(RenderTargetId::Camera(0)))
                }
                _ => Ok(()),
            }
        }

        fn end_frame(&mut self) {
            self.frames += 1;
        }
    }

    fn feature(name: &'static str, event: RenderPassEvent, log: &Log) -> Box<SinglePassFeature> {
        Box::new(SinglePassFeature {
            name,
            event,
            log: Rc::clone(log),
            pass: None,
        })
    }

    fn rendering_data(stack: &VolumeStack) -> RenderingData<'_> {
        let desc = TargetDescriptor::new(4, 4, TextureFormat::Rgba8Unorm);
        RenderingData::new(CameraData::game(0, desc), stack)
    }

    #[test]
    fn passes_run_in_phase_then_event_order() {
        let log = Log::default();
        let mut renderer = Renderer::new();
        renderer.add_feature(feature("late", RenderPassEvent::AfterRendering, &log));
        renderer.add_feature(feature(
            "post",
            RenderPassEvent::BeforeRenderingPostProcessing,
            &log,
        ));
        assert_eq!(renderer.features().count(), 2);

        let stack = VolumeStack::default();
        let mut context = CountingContext::default();
        renderer
            .render_camera(&mut context, &rendering_data(&stack))
            .unwrap();

        assert_eq!(
            *log.borrow(),
            vec![
                "create late",
                "create post",
                "setup post",
                "setup late",
                "execute post",
                "execute late",
                "cleanup post",
                "cleanup late",
            ]
        );
        assert_eq!(context.executed, vec!["Camera setup", "Camera cleanup"]);
        assert_eq!(context.commands, 4);
    }

    #[test]
    fn cleanup_runs_when_setup_submission_fails() {
        let log = Log::default();
        let mut renderer = Renderer::new();
        renderer.add_feature(feature(
            "post",
            RenderPassEvent::BeforeRenderingPostProcessing,
            &log,
        ));

        let stack = VolumeStack::default();
        let mut context = CountingContext {
            fail_named: Some("Camera setup"),
            ..Default::default()
        };
        let result = renderer.render_camera(&mut context, &rendering_data(&stack));

        assert!(result.is_err());
        assert_eq!(
            *log.borrow(),
            vec!["create post", "setup post", "cleanup post"]
        );
        assert_eq!(context.executed, vec!["Camera setup", "Camera cleanup"]);
    }

    #[test]
    fn create_runs_once_and_pass_is_reused() {
        let log = Log::default();
        let mut renderer = Renderer::new();
        renderer.add_feature(feature("post", RenderPassEvent::BeforeRendering, &log));

        let stack = VolumeStack::default();
        let mut context = CountingContext::default();
        for _ in 0..3 {
            renderer
                .render_camera(&mut context, &rendering_data(&stack))
                .unwrap();
        }
        let log = log.borrow();
        assert_eq!(log.iter().filter(|line| line.starts_with("create")).count(), 1);
        assert_eq!(log.iter().filter(|line| line.starts_with("execute")).count(), 3);
        assert_eq!(renderer.features().count(), 1);
    }

    #[test]
    fn frame_renders_every_camera_then_ends_once() {
        let log = Log::default();
        let mut renderer = Renderer::new();
        renderer.add_feature(feature("post", RenderPassEvent::BeforeRendering, &log));

        let stack = VolumeStack::default();
        let desc = TargetDescriptor::new(4, 4, TextureFormat::Rgba8Unorm);
        let cameras = [
            RenderingData::new(CameraData::game(0, desc), &stack),
            RenderingData::new(CameraData::game(1, desc), &stack),
        ];
        let mut context = CountingContext {
            fail_named: Some("Camera setup"),
            ..Default::default()
        };
        let result = renderer.render_frame(&mut context, &cameras);

        assert!(result.is_err());
        assert_eq!(context.frames, 1);
        assert_eq!(
            context.executed,
            vec!["Camera setup", "Camera cleanup", "Camera setup", "Camera cleanup"]
        );
    }
}
