use super::{PassQueue, RenderingData};

/// Plugs passes into a [`Renderer`](super::Renderer).
pub trait RendererFeature {
    fn name(&self) -> &str;

    /// Build the feature's passes. Called once when the feature is added to a renderer.
    fn create(&mut self);

    /// Enqueue passes for the camera being rendered. Called every frame, per camera.
    fn add_render_passes<'a>(&'a mut self, queue: &mut PassQueue<'a>, data: &RenderingData);
}
