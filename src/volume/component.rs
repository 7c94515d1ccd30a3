use std::any::Any;

/// A group of volume parameters that is blended as one unit.
pub trait VolumeComponent: Any + Send + Sync {
    /// Menu path shown by editors, e.g. `"Post/Bloom"`
    fn display_name(&self) -> &'static str;

    /// Blend every overridden parameter of `other` into `self` with factor `t`.
    /// `other` is always the same concrete type as `self`.
    fn override_from(&mut self, other: &dyn VolumeComponent, t: f32);

    fn boxed_clone(&self) -> Box<dyn VolumeComponent>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// A volume component that drives a post-processing effect.
pub trait PostProcessComponent {
    /// Whether the effect has any visible result with the current values
    fn is_active(&self) -> bool;

    fn is_tile_compatible(&self) -> bool {
        false
    }
}
