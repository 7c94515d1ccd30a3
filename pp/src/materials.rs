use std::sync::{Arc, OnceLock};

use postfx::prelude::*;

/// Shader property holding the effect strength.
pub const INTENSITY_PROPERTY: &str = "_Intensity";
/// Shader property holding the overlay tint.
pub const OVERLAY_COLOR_PROPERTY: &str = "_OverlayColor";

/// The materials the VHS pass draws with, registered as one asset.
pub struct VhsMaterials {
    pub custom_effect: Arc<Material>,
}

impl VhsMaterials {
    pub const ASSET_NAME: &'static str = "VHSMaterials";

    pub fn new(custom_effect: Arc<Material>) -> Self {
        Self { custom_effect }
    }

    /// Wrap `shader` in a material declaring the effect's properties.
    pub fn from_shader(shader: Arc<Shader>) -> Self {
        let material = Material::new("VHS", shader)
            .with_float(INTENSITY_PROPERTY, 0.0)
            .with_color(OVERLAY_COLOR_PROPERTY, Color::CYAN);
        Self::new(Arc::new(material))
    }
}

/// Resolves [`VhsMaterials`] from an asset source and keeps them.
///
/// The first successful lookup is cached for the life of the provider and
/// never reloaded. Failed lookups are not cached, so a later call retries.
pub struct VhsMaterialProvider {
    source: Arc<dyn AssetSource>,
    cached: OnceLock<Arc<VhsMaterials>>,
}

impl VhsMaterialProvider {
    pub fn new(source: Arc<dyn AssetSource>) -> Self {
        Self {
            source,
            cached: OnceLock::new(),
        }
    }

    /// The resolved materials, or `None` while the asset cannot be found.
    pub fn instance(&self) -> Option<Arc<VhsMaterials>> {
        if let Some(materials) = self.cached.get() {
            return Some(Arc::clone(materials));
        }

        let asset = self.source.load(VhsMaterials::ASSET_NAME)?;
        let materials = match asset.downcast::<VhsMaterials>() {
            Ok(materials) => materials,
            Err(_) => {
                tracing::warn!(
                    name = VhsMaterials::ASSET_NAME,
                    "asset is not a VhsMaterials"
                );
                return None;
            }
        };
        tracing::debug!(name = VhsMaterials::ASSET_NAME, "resolved VHS materials");
        Some(Arc::clone(self.cached.get_or_init(|| materials)))
    }

    pub fn is_resolved(&self) -> bool {
        self.cached.get().is_some()
    }
}
