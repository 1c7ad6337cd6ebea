#[cfg(test)]
pub(crate) mod helpers {
    use std::sync::Arc;

    use hyrax_core::enums::Behavior;
    use hyrax_core::{Id, LegacyModel, Resource};
    use hyrax_services::memory::MemoryResourceStore;
    use hyrax_wings::derive_schema;

    use crate::container::StepServices;

    /// A new, empty work with the standard work attributes.
    pub fn work(id: &str) -> Resource {
        let model = LegacyModel::builder("GenericWork")
            .property("title")
            .behavior(Behavior::Work)
            .build();
        Resource::new(Arc::new(derive_schema(&model)), Id::new(id), true, Default::default())
            .unwrap()
    }

    pub fn services() -> StepServices {
        let store = Arc::new(MemoryResourceStore::new());
        StepServices {
            query_service: store.clone(),
            persister: store,
            default_admin_set_id: Id::new("admin_set/default"),
        }
    }
}
