//! Id-based lookup on either side of the persistence split.

use std::sync::Arc;

use hyrax_core::{Id, LegacyObject, PersistError, QueryService, Resource};
use hyrax_wings::{LegacyConverter, TransformError};

/// Finds resources by id through the query service.
#[derive(Clone)]
pub struct ResourceFinder {
    query_service: Arc<dyn QueryService>,
}

impl ResourceFinder {
    #[must_use]
    pub fn new(query_service: Arc<dyn QueryService>) -> Self {
        Self { query_service }
    }

    /// `Ok(None)` when nothing has this id.
    ///
    /// # Errors
    ///
    /// Query-service errors are returned unchanged.
    pub fn find(&self, id: &str) -> Result<Option<Resource>, PersistError> {
        self.query_service.find_by(&Id::new(id))
    }
}

/// Finds a resource and hands it back as a legacy object.
pub struct ActiveFedoraFinder {
    resources: ResourceFinder,
    converter: LegacyConverter,
}

impl ActiveFedoraFinder {
    #[must_use]
    pub const fn new(resources: ResourceFinder, converter: LegacyConverter) -> Self {
        Self {
            resources,
            converter,
        }
    }

    /// `Ok(None)` when nothing has this id; never an error for a missing object.
    ///
    /// # Errors
    ///
    /// Returns `TransformError` if the query fails or the found resource's
    /// type is not registered.
    pub fn find(&self, id: &str) -> Result<Option<LegacyObject>, TransformError> {
        match self.resources.find(id)? {
            Some(resource) => Ok(Some(self.converter.convert(&resource)?)),
            None => Ok(None),
        }
    }
}
