use futures::executor::block_on;

use crate::graphics::{Gpu, GpuError, GpuHandle};

#[derive(Clone)]
/// Builder for `Gpu`.
/// By default this is initialized with sensible values for offscreen post-processing.
pub struct GpuBuilder<'a> {
    /// The backends that wgpu should use.
    /// By default, this is only the PRIMARY backends, which have first-class support.
    /// You can alternatively specify individual backends such as `VULKAN` or `DX12`.
    backends: wgpu::Backends,
    /// The power preference for the adapter.
    /// This defaults to `HighPerformance` but can be set to use `LowPower`.
    power_preference: wgpu::PowerPreference,
    /// Use the software fallback adapter when available.
    force_fallback_adapter: bool,
    /// The label for this context.
    label: Option<&'a str>,
}

impl Default for GpuBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl GpuBuilder<'_> {
    /// Create a `GpuBuilder` with sensible defaults.
    pub fn new() -> Self {
        Self {
            backends: wgpu::Backends::PRIMARY,
            power_preference: wgpu::PowerPreference::HighPerformance,
            force_fallback_adapter: false,
            label: None,
        }
    }
}

impl<'a> GpuBuilder<'a> {
    /// Sets the backends that wgpu should use.
    pub fn with_backends(mut self, backends: wgpu::Backends) -> Self {
        self.backends = backends;
        self
    }

    /// Sets the power preference for the adapter.
    pub fn with_power_preference(mut self, power_preference: wgpu::PowerPreference) -> Self {
        self.power_preference = power_preference;
        self
    }

    /// Request the fallback (software) adapter.
    pub fn with_fallback_adapter(mut self) -> Self {
        self.force_fallback_adapter = true;
        self
    }

    /// Sets the label for the device.
    /// The argument must outlive the builder.
    pub fn with_label(mut self, label: &'a str) -> Self {
        self.label = Some(label);
        self
    }

    /// Blocking version of `build_impl()`.
    /// # Errors
    /// Errors when the inner build fails.
    pub fn build_headless(self) -> Result<GpuHandle, GpuError> {
        block_on(self.build_impl())
    }

    /// Build the `Gpu` from the builder.
    /// # Errors
    /// Errors when a connection to the GPU could not be established.
    pub async fn build_impl(self) -> Result<GpuHandle, GpuError> {
        let instance = wgpu::Instance::new(self.backends);

        // Initialize the adapter (physical device).
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: self.power_preference,
                compatible_surface: None,
                force_fallback_adapter: self.force_fallback_adapter,
            })
            .await
            .ok_or(GpuError::AdapterNone)?;

        // Create the `device` (and get the handle for the command queue `queue`)
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    limits: wgpu::Limits::downlevel_defaults(),
                    label: self.label,
                    features: wgpu::Features::empty(),
                },
                None,
            )
            .await
            .map_err(GpuError::RequestDeviceError)?;

        tracing::debug!(adapter = ?adapter.get_info(), "created headless gpu");

        let gpu = Gpu {
            instance,
            adapter,
            device,
            queue,
        };

        Ok(gpu.into_handle())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_primary_high_performance() {
        let builder = GpuBuilder::new();
        assert_eq!(builder.backends, wgpu::Backends::PRIMARY);
        assert_eq!(builder.power_preference, wgpu::PowerPreference::HighPerformance);
        assert!(!builder.force_fallback_adapter);
        assert!(builder.label.is_none());
    }

    #[test]
    fn setters_override_defaults() {
        let builder = Gpu::builder()
            .with_backends(wgpu::Backends::VULKAN)
            .with_power_preference(wgpu::PowerPreference::LowPower)
            .with_fallback_adapter()
            .with_label("offscreen");
        assert_eq!(builder.backends, wgpu::Backends::VULKAN);
        assert_eq!(builder.power_preference, wgpu::PowerPreference::LowPower);
        assert!(builder.force_fallback_adapter);
        assert_eq!(builder.label, Some("offscreen"));
    }
}
