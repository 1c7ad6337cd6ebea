#[cfg(test)]
pub(crate) mod helpers {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use hyrax_core::{Id, IdMinter, PersistError, QueryService, Resource};

    use crate::cache::ResourceClassCache;
    use crate::model_transformer::ModelTransformer;

    /// Minter producing `t-1`, `t-2`, ... and counting calls.
    #[derive(Default)]
    pub struct CountingMinter {
        pub calls: AtomicUsize,
    }

    impl IdMinter for CountingMinter {
        fn mint(&self) -> Result<String, PersistError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(format!("t-{n}"))
        }
    }

    /// Query service over a fixed set of resources.
    #[derive(Default)]
    pub struct StubQuery {
        resources: Vec<Resource>,
    }

    impl StubQuery {
        pub fn with(resources: impl IntoIterator<Item = Resource>) -> Self {
            Self {
                resources: resources.into_iter().collect(),
            }
        }
    }

    impl QueryService for StubQuery {
        fn find_by(&self, id: &Id) -> Result<Option<Resource>, PersistError> {
            Ok(self
                .resources
                .iter()
                .find(|r| r.alternate_ids().contains(id))
                .cloned())
        }

        fn find_inverse_references_by(
            &self,
            id: &Id,
            property: &str,
        ) -> Result<Vec<Resource>, PersistError> {
            Ok(self
                .resources
                .iter()
                .filter(|r| r.ids(property).contains(id))
                .cloned()
                .collect())
        }
    }

    pub struct FailingQuery;

    impl QueryService for FailingQuery {
        fn find_by(&self, _id: &Id) -> Result<Option<Resource>, PersistError> {
            Err(PersistError::Backend("query service unavailable".into()))
        }

        fn find_inverse_references_by(
            &self,
            _id: &Id,
            _property: &str,
        ) -> Result<Vec<Resource>, PersistError> {
            Err(PersistError::Backend("query service unavailable".into()))
        }
    }

    pub fn transformer_with(
        minter: Arc<dyn IdMinter>,
        query: Arc<dyn QueryService>,
    ) -> ModelTransformer {
        ModelTransformer::new(Arc::new(ResourceClassCache::new()), minter, query)
    }

    pub fn transformer() -> ModelTransformer {
        transformer_with(
            Arc::new(CountingMinter::default()),
            Arc::new(StubQuery::default()),
        )
    }
}
