use std::any::TypeId;
use std::collections::HashMap;

use super::VolumeComponent;

/// A set of component overrides, at most one per component type.
#[derive(Default)]
pub struct VolumeProfile {
    components: Vec<Box<dyn VolumeComponent>>,
}

impl VolumeProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `component`, replacing any component of the same type.
    pub fn with<T: VolumeComponent>(mut self, component: T) -> Self {
        self.add(component);
        self
    }

    pub fn add<T: VolumeComponent>(&mut self, component: T) {
        match self.position(TypeId::of::<T>()) {
            Some(index) => self.components[index] = Box::new(component),
            None => self.components.push(Box::new(component)),
        }
    }

    pub fn get<T: VolumeComponent>(&self) -> Option<&T> {
        self.components
            .iter()
            .find_map(|component| component.as_any().downcast_ref::<T>())
    }

    pub fn get_mut<T: VolumeComponent>(&mut self) -> Option<&mut T> {
        self.components
            .iter_mut()
            .find_map(|component| component.as_any_mut().downcast_mut::<T>())
    }

    pub fn components(&self) -> impl Iterator<Item = &dyn VolumeComponent> {
        self.components.iter().map(|component| component.as_ref())
    }

    fn position(&self, type_id: TypeId) -> Option<usize> {
        self.components
            .iter()
            .position(|component| component.as_any().type_id() == type_id)
    }
}

/// A global volume: a profile applied with a weight, ordered by priority.
pub struct Volume {
    pub name: String,
    pub profile: VolumeProfile,
    /// Higher priorities are applied later and win
    pub priority: f32,
    /// Blend factor in `[0, 1]`
    pub weight: f32,
    pub enabled: bool,
}

impl Volume {
    pub fn new(name: &str, profile: VolumeProfile) -> Self {
        Self {
            name: name.to_string(),
            profile,
            priority: 0.0,
            weight: 1.0,
            enabled: true,
        }
    }

    pub fn with_priority(mut self, priority: f32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }
}

/// Resolved component values for one camera.
#[derive(Default)]
pub struct VolumeStack {
    components: HashMap<TypeId, Box<dyn VolumeComponent>>,
}

impl VolumeStack {
    pub fn get<T: VolumeComponent>(&self) -> Option<&T> {
        self.components
            .get(&TypeId::of::<T>())
            .and_then(|component| component.as_any().downcast_ref::<T>())
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

/// Owns the registered component defaults and the scene's volumes.
#[derive(Default)]
pub struct VolumeManager {
    defaults: Vec<Box<dyn VolumeComponent>>,
    volumes: Vec<Volume>,
}

impl VolumeManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `T` resolvable through stacks created by this manager.
    pub fn register<T: VolumeComponent + Default>(&mut self) {
        let type_id = TypeId::of::<T>();
        if self
            .defaults
            .iter()
            .any(|component| component.as_any().type_id() == type_id)
        {
            return;
        }
        self.defaults.push(Box::new(T::default()));
    }

    pub fn add_volume(&mut self, volume: Volume) -> &mut Volume {
        self.volumes.push(volume);
        let last = self.volumes.len() - 1;
        &mut self.volumes[last]
    }

    pub fn volumes_mut(&mut self) -> impl Iterator<Item = &mut Volume> {
        self.volumes.iter_mut()
    }

    pub fn create_stack(&self) -> VolumeStack {
        let mut stack = VolumeStack::default();
        self.update(&mut stack);
        stack
    }

    /// Reset `stack` to the registered defaults, then blend every enabled
    /// volume into it in ascending priority.
    pub fn update(&self, stack: &mut VolumeStack) {
        stack.components.clear();
        for component in &self.defaults {
            stack
                .components
                .insert(component.as_any().type_id(), component.boxed_clone());
        }

        let mut volumes: Vec<&Volume> = self
            .volumes
            .iter()
            .filter(|volume| volume.enabled && volume.weight > 0.0)
            .collect();
        volumes.sort_by(|a, b| a.priority.total_cmp(&b.priority));

        for volume in volumes {
            let t = volume.weight.clamp(0.0, 1.0);
            for component in volume.profile.components() {
                match stack.components.get_mut(&component.as_any().type_id()) {
                    Some(state) => state.override_from(component, t),
                    None => tracing::warn!(
                        volume = %volume.name,
                        component = component.display_name(),
                        "volume overrides an unregistered component"
                    ),
                }
            }
        }
    }
}
