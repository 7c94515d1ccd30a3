use super::CommandBuffer;
use crate::GpuError;

/// Executes recorded command buffers.
pub trait RenderContext {
    /// Run every command in `cmd` as one submission and leave `cmd` empty.
    /// A buffer that fails has no effect.
    /// # Errors
    /// Errors when a command references a target the context does not know,
    /// acquires a temporary target twice or names a missing shader pass.
    fn execute_command_buffer(&mut self, cmd: &mut CommandBuffer) -> Result<(), GpuError>;

    /// Called once every camera of a frame has been rendered.
    fn end_frame(&mut self) {}
}
