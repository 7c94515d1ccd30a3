//! VHS post-processing for postfx.
//!
//! The effect is driven by a [`VhsSettings`] volume component and drawn by
//! [`VhsPass`] right before the renderer's own post-processing. The pass is
//! plugged into a renderer through [`VhsRendererFeature`]:
//!
//! ```ignore
//! let provider = Arc::new(VhsMaterialProvider::new(assets));
//! renderer.add_feature(Box::new(VhsRendererFeature::new(provider)));
//! ```
//!
//! The shader is an external asset registered under [`VhsMaterials::ASSET_NAME`].
//! It reads `_Intensity` and `_OverlayColor` from its uniform block.

mod feature;
pub use feature::*;

mod materials;
pub use materials::*;

mod pass;
pub use pass::*;

mod settings;
pub use settings::*;
