use crate::material::Color;

/// A blendable value inside a volume component.
///
/// A parameter only takes part in blending when its override state is set.
pub trait VolumeParameter {
    type Value: Copy;

    fn value(&self) -> Self::Value;

    fn set_value(&mut self, value: Self::Value);

    fn override_state(&self) -> bool;

    fn set_override_state(&mut self, state: bool);

    /// Blend between two values, `t` in `[0, 1]`.
    fn interp(&self, from: Self::Value, to: Self::Value, t: f32) -> Self::Value;

    /// Blend `other` into `self` with factor `t` if `other` is overridden.
    fn override_from(&mut self, other: &Self, t: f32) {
        if other.override_state() {
            let value = self.interp(self.value(), other.value(), t);
            self.set_value(value);
            self.set_override_state(true);
        }
    }
}

/// Float restricted to `[min, max]`. Values are clamped on every write.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ClampedFloatParameter {
    value: f32,
    pub min: f32,
    pub max: f32,
    override_state: bool,
}

impl ClampedFloatParameter {
    /// A reversed range is swapped. `value` is clamped like any later write.
    pub fn new(value: f32, min: f32, max: f32, override_state: bool) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let mut param = Self {
            value: min,
            min,
            max,
            override_state,
        };
        param.set_value(value);
        param
    }
}

impl VolumeParameter for ClampedFloatParameter {
    type Value = f32;

    fn value(&self) -> f32 {
        self.value
    }

    fn set_value(&mut self, value: f32) {
        // NaN falls back to the lower bound
        self.value = if value.is_nan() {
            self.min
        } else {
            value.max(self.min).min(self.max)
        };
    }

    fn override_state(&self) -> bool {
        self.override_state
    }

    fn set_override_state(&mut self, state: bool) {
        self.override_state = state;
    }

    fn interp(&self, from: f32, to: f32, t: f32) -> f32 {
        from + (to - from) * t
    }
}

/// Color that snaps to the overriding value instead of blending.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NoInterpColorParameter {
    value: Color,
    override_state: bool,
}

impl NoInterpColorParameter {
    pub fn new(value: Color, override_state: bool) -> Self {
        Self {
            value,
            override_state,
        }
    }
}

impl VolumeParameter for NoInterpColorParameter {
    type Value = Color;

    fn value(&self) -> Color {
        self.value
    }

    fn set_value(&mut self, value: Color) {
        self.value = value;
    }

    fn override_state(&self) -> bool {
        self.override_state
    }

    fn set_override_state(&mut self, state: bool) {
        self.override_state = state;
    }

    fn interp(&self, from: Color, to: Color, t: f32) -> Color {
        if t > 0.0 {
            to
        } else {
            from
        }
    }
}
