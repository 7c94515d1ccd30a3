//! Materials: a shader plus the named values it reads.
//!
//! Shaders are WGSL modules following one binding convention:
//! - group 0, binding 0: the source texture,
//! - group 0, binding 1: its sampler,
//! - group 0, binding 2: a uniform block holding the material properties,
//!   in the order the material declares them.
//!
//! The vertex stage is always `vs_main` drawing one full-screen triangle.
//! Each pass of a shader is a fragment entry point.

mod property;
pub use property::*;

use std::path::Path;
use std::sync::Arc;

use crate::GpuError;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Shader {
    pub name: String,
    pub source: String,
    passes: Vec<String>,
}

impl Shader {
    pub const VERTEX_ENTRY: &'static str = "vs_main";
    pub const DEFAULT_FRAGMENT_ENTRY: &'static str = "fs_main";

    /// A single pass shader with the `fs_main` fragment entry point.
    pub fn from_wgsl(name: &str, source: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            source: source.into(),
            passes: vec![Self::DEFAULT_FRAGMENT_ENTRY.to_string()],
        }
    }

    /// Load WGSL source from a file at runtime.
    /// # Errors
    /// Errors when the file cannot be read or is not UTF-8.
    pub fn load(name: &str, path: impl AsRef<Path>) -> Result<Self, GpuError> {
        let source = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::InvalidData => GpuError::ShaderParseError,
            _ => GpuError::ShaderRead(e),
        })?;
        Ok(Self::from_wgsl(name, source))
    }

    /// Replace the passes with the given fragment entry points, in pass order.
    pub fn with_passes(mut self, entries: &[&str]) -> Self {
        self.passes = entries.iter().map(|entry| entry.to_string()).collect();
        self
    }

    pub fn pass_count(&self) -> u32 {
        self.passes.len() as u32
    }

    pub fn fragment_entry(&self, pass: u32) -> Option<&str> {
        self.passes.get(pass as usize).map(String::as_str)
    }
}

/// A shader with a declared property layout and default values.
/// Materials are immutable once built; per-draw values go in a [`PropertyBlock`].
#[derive(Clone, Debug)]
pub struct Material {
    pub name: String,
    pub shader: Arc<Shader>,
    layout: PropertyLayout,
    defaults: PropertyBlock,
}

impl Material {
    pub fn new(name: &str, shader: Arc<Shader>) -> Self {
        Self {
            name: name.to_string(),
            shader,
            layout: PropertyLayout::default(),
            defaults: PropertyBlock::default(),
        }
    }

    /// Declare a float property and its default value.
    pub fn with_float(mut self, name: &str, default: f32) -> Self {
        let id = self.layout.push(name, PropertyKind::Float).id;
        self.defaults.set_float(id, default);
        self
    }

    /// Declare a color property and its default value.
    pub fn with_color(mut self, name: &str, default: Color) -> Self {
        let id = self.layout.push(name, PropertyKind::Color).id;
        self.defaults.set_color(id, default);
        self
    }

    pub fn layout(&self) -> &PropertyLayout {
        &self.layout
    }

    pub fn defaults(&self) -> &PropertyBlock {
        &self.defaults
    }

    pub fn has_property(&self, id: PropertyId) -> bool {
        self.layout.entry(id).is_some()
    }

    /// Pack the uniform block, taking each value from `overrides` when present
    /// there with the declared kind, otherwise from the material defaults.
    /// Values in `overrides` the material does not declare are ignored.
    pub fn pack(&self, overrides: &PropertyBlock) -> Vec<u8> {
        let mut bytes = vec![0_u8; self.layout.size() as usize];
        for entry in self.layout.entries() {
            let value = match overrides.get(entry.id) {
                Some(value) if value.kind() == entry.kind => Some(value),
                Some(value) => {
                    tracing::warn!(
                        material = %self.name,
                        property = %entry.name,
                        expected = ?entry.kind,
                        found = ?value.kind(),
                        "property type mismatch, using default"
                    );
                    self.defaults.get(entry.id)
                }
                None => self.defaults.get(entry.id),
            };
            if let Some(value) = value {
                self.layout.write(&mut bytes, entry, &value);
            }
        }
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTENSITY: PropertyId = PropertyId::from_name("_Intensity");
    const OVERLAY: PropertyId = PropertyId::from_name("_OverlayColor");

    fn overlay_material() -> Material {
        let shader = Arc::new(Shader::from_wgsl("overlay", ""));
        Material::new("overlay", shader)
            .with_float("_Intensity", 0.0)
            .with_color("_OverlayColor", Color::WHITE)
    }

    fn floats(bytes: &[u8]) -> Vec<f32> {
        bytes
            .chunks_exact(4)
            .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
            .collect()
    }

    #[test]
    fn pack_uses_defaults_without_overrides() {
        let bytes = overlay_material().pack(&PropertyBlock::new());
        assert_eq!(bytes.len(), 32);
        assert_eq!(floats(&bytes), &[0.0_f32, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn pack_prefers_overrides() {
        let mut block = PropertyBlock::new();
        block.set_float(INTENSITY, 0.5);
        block.set_color(OVERLAY, Color::CYAN);
        let bytes = overlay_material().pack(&block);
        assert_eq!(floats(&bytes), &[0.5_f32, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn pack_ignores_mismatched_and_unknown_values() {
        let mut block = PropertyBlock::new();
        block.set_color(INTENSITY, Color::CYAN);
        block.set_float(PropertyId::from_name("_Unused"), 3.0);
        let bytes = overlay_material().pack(&block);
        assert_eq!(floats(&bytes)[0], 0.0);
        assert_eq!(bytes.len(), 32);
    }

    #[test]
    fn shader_passes_map_to_entry_points() {
        let shader = Shader::from_wgsl("multi", "").with_passes(&["fs_main", "fs_blur"]);
        assert_eq!(shader.pass_count(), 2);
        assert_eq!(shader.fragment_entry(1), Some("fs_blur"));
        assert_eq!(shader.fragment_entry(2), None);
    }

    #[test]
    fn missing_shader_file_is_an_error() {
        let err = Shader::load("missing", "/definitely/not/here.wgsl").unwrap_err();
        assert!(matches!(err, GpuError::ShaderRead(_)));
    }
}
