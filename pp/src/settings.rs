use postfx::prelude::*;
use std::any::Any;

/// Volume component exposing the VHS effect to artists.
#[derive(Clone, Debug)]
pub struct VhsSettings {
    /// Strength of the effect. Zero disables it.
    pub intensity: ClampedFloatParameter,
    pub overlay_color: NoInterpColorParameter,
}

impl Default for VhsSettings {
    fn default() -> Self {
        Self {
            intensity: ClampedFloatParameter::new(0.0, 0.0, 1.0, true),
            overlay_color: NoInterpColorParameter::new(Color::CYAN, false),
        }
    }
}

impl VhsSettings {
    /// Settings overriding both parameters, for use in a volume profile.
    pub fn new(intensity: f32, overlay_color: Color) -> Self {
        Self {
            intensity: ClampedFloatParameter::new(intensity, 0.0, 1.0, true),
            overlay_color: NoInterpColorParameter::new(overlay_color, true),
        }
    }

    pub fn intensity(&self) -> f32 {
        self.intensity.value()
    }

    pub fn overlay_color(&self) -> Color {
        self.overlay_color.value()
    }
}

impl PostProcessComponent for VhsSettings {
    fn is_active(&self) -> bool {
        self.intensity() > 0.0
    }

    fn is_tile_compatible(&self) -> bool {
        true
    }
}

impl VolumeComponent for VhsSettings {
    fn display_name(&self) -> &'static str {
        "Tesi/VHSComponent"
    }

    fn override_from(&mut self, other: &dyn VolumeComponent, t: f32) {
        if let Some(other) = other.as_any().downcast_ref::<Self>() {
            self.intensity.override_from(&other.intensity, t);
            self.overlay_color.override_from(&other.overlay_color, t);
        }
    }

    fn boxed_clone(&self) -> Box<dyn VolumeComponent> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
