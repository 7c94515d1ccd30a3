//! Named asset lookup.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

pub type Asset = Arc<dyn Any + Send + Sync>;

/// Resolves assets by name. A missing name is not an error, just `None`.
pub trait AssetSource: Send + Sync {
    fn load(&self, name: &str) -> Option<Asset>;
}

/// In-memory asset registry.
#[derive(Default)]
pub struct Resources {
    assets: HashMap<String, Asset>,
}

impl Resources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `asset` under `name`, replacing what was there.
    pub fn insert<T: Any + Send + Sync>(&mut self, name: &str, asset: T) {
        self.assets.insert(name.to_string(), Arc::new(asset));
    }

    pub fn with<T: Any + Send + Sync>(mut self, name: &str, asset: T) -> Self {
        self.insert(name, asset);
        self
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.assets.remove(name).is_some()
    }

    /// Typed lookup; `None` when missing or of another type.
    pub fn get<T: Any + Send + Sync>(&self, name: &str) -> Option<Arc<T>> {
        self.load(name)?.downcast::<T>().ok()
    }
}

impl AssetSource for Resources {
    fn load(&self, name: &str) -> Option<Asset> {
        self.assets.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_lookup_checks_the_type() {
        let resources = Resources::new().with("answer", 42_u32);
        assert_eq!(resources.get::<u32>("answer").as_deref(), Some(&42));
        assert!(resources.get::<String>("answer").is_none());
        assert!(resources.get::<u32>("question").is_none());
    }

    #[test]
    fn insert_replaces_and_remove_forgets() {
        let mut resources = Resources::new();
        resources.insert("name", 1_u8);
        resources.insert("name", 2_u8);
        assert_eq!(resources.get::<u8>("name").as_deref(), Some(&2));
        assert!(resources.remove("name"));
        assert!(!resources.remove("name"));
        assert!(resources.load("name").is_none());
    }
}
