use crate::renderer::RenderTargetId;

#[non_exhaustive]
#[derive(Debug)]
pub enum GpuError {
    AdapterNone,
    ShaderParseError,
    ShaderRead(std::io::Error),
    RequestDeviceError(wgpu::RequestDeviceError),
    BufferAsyncError,
    /// A command referenced a target that was never registered or acquired
    UnknownTarget(RenderTargetId),
    /// A temporary target was requested again before being released
    TargetInUse(RenderTargetId),
    /// The material's shader has no pass with this index
    InvalidPass { shader: String, pass: u32 },
}

impl std::fmt::Display for GpuError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        match self {
            GpuError::UnknownTarget(id) => write!(f, "unknown render target {:?}", id),
            GpuError::TargetInUse(id) => write!(f, "render target {:?} is already in use", id),
            GpuError::InvalidPass { shader, pass } => {
                write!(f, "shader `{}` has no pass {}", shader, pass)
            }
            other => write!(f, "{:?}", other),
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::ShaderRead(e) => Some(e),
            GpuError::RequestDeviceError(e) => Some(e),
            _ => None,
        }
    }
}

/// Generic error type for any error.
/// Recommended to use with terminal errors only, which are expected to be displayed and not handled.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
