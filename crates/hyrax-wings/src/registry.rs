//! Legacy types known to the application, by fully-qualified name.

use std::collections::BTreeMap;
use std::sync::Arc;

use hyrax_core::legacy::{EMBARGO_MODEL, LEASE_MODEL};
use hyrax_core::{LegacyModel, ResourceSchema};

use crate::cache::ResourceClassCache;
use crate::derive::derive_schema;

#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    models: BTreeMap<String, Arc<LegacyModel>>,
}

impl ModelRegistry {
    /// Registry pre-populated with the embargo and lease types.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::default();
        registry.register(LegacyModel::builder(EMBARGO_MODEL).build());
        registry.register(LegacyModel::builder(LEASE_MODEL).build());
        registry
    }

    /// Register a type. Re-registering a name replaces the earlier model.
    pub fn register(&mut self, model: Arc<LegacyModel>) {
        self.models.insert(model.name().to_string(), model);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<LegacyModel>> {
        self.models.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }

    /// Resolve an internal resource name to its (cached) schema.
    #[must_use]
    pub fn schema_for_name(
        &self,
        name: &str,
        cache: &ResourceClassCache,
    ) -> Option<Arc<ResourceSchema>> {
        let model = self.get(name)?;
        Some(cache.fetch(model, || derive_schema(model)))
    }
}
