//! Memoized legacy-type → resource-schema mapping.

use std::sync::Arc;

use dashmap::DashMap;
use hyrax_core::{LegacyModel, ResourceSchema};

/// Append-only cache of derived schemas keyed by legacy type name.
///
/// Concurrent first access for one type may run the generator more than
/// once; the first insert wins and every caller gets that same `Arc`.
#[derive(Debug, Default)]
pub struct ResourceClassCache {
    schemas: DashMap<String, Arc<ResourceSchema>>,
}

impl ResourceClassCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached schema for `model`, generating it on first use.
    pub fn fetch<F>(&self, model: &LegacyModel, generate: F) -> Arc<ResourceSchema>
    where
        F: FnOnce() -> ResourceSchema,
    {
        if let Some(schema) = self.schemas.get(model.name()) {
            return Arc::clone(schema.value());
        }

        // Generate outside the shard lock; a racing insert may beat us.
        let generated = Arc::new(generate());
        let entry = self
            .schemas
            .entry(model.name().to_string())
            .or_insert(generated);
        tracing::trace!(model = model.name(), "cached resource schema");
        Arc::clone(entry.value())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<ResourceSchema>> {
        self.schemas.get(name).map(|entry| Arc::clone(entry.value()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    use hyrax_core::enums::BaseKind;

    use super::*;
    use crate::derive::derive_schema;

    #[test]
    fn repeated_fetch_returns_identical_schema() {
        let cache = ResourceClassCache::new();
        let model = LegacyModel::builder("Monograph").property("title").build();
        let calls = AtomicUsize::new(0);

        let first = cache.fetch(&model, || {
            calls.fetch_add(1, Ordering::SeqCst);
            derive_schema(&model)
        });
        let second = cache.fetch(&model, || {
            calls.fetch_add(1, Ordering::SeqCst);
            derive_schema(&model)
        });

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn distinct_types_get_distinct_entries() {
        let cache = ResourceClassCache::new();
        let a = LegacyModel::builder("A").build();
        let b = LegacyModel::builder("B").build();

        let schema_a = cache.fetch(&a, || derive_schema(&a));
        let schema_b = cache.fetch(&b, || derive_schema(&b));

        assert!(!Arc::ptr_eq(&schema_a, &schema_b));
        assert_eq!(cache.len(), 2);
        assert!(cache.get("A").is_some());
        assert!(cache.get("C").is_none());
    }

    #[test]
    fn concurrent_first_access_converges() {
        let cache = Arc::new(ResourceClassCache::new());
        let model = LegacyModel::builder("Dataset").property("title").build();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let model = Arc::clone(&model);
                thread::spawn(move || cache.fetch(&model, || derive_schema(&model)))
            })
            .collect();
        let schemas: Vec<_> = handles
            .into_iter()
            .map(|h| h.join().expect("fetch thread panicked"))
            .collect();

        let cached = cache.get("Dataset").expect("schema cached");
        assert!(schemas.iter().all(|s| Arc::ptr_eq(s, &cached)));
        assert_eq!(cached.base(), BaseKind::Resource);
        assert_eq!(cache.len(), 1);
    }
}
