use std::sync::Arc;

use hyrax_core::enums::BaseKind;
use hyrax_core::{AttributeValue, Persister, QueryService, Resource};

use super::set_attribute;
use crate::step::{Failure, Step};

/// Deletes the work's member file sets. Child works are left in place.
pub struct CleanupFileSetsStep {
    query_service: Arc<dyn QueryService>,
    persister: Arc<dyn Persister>,
}

impl CleanupFileSetsStep {
    #[must_use]
    pub fn new(query_service: Arc<dyn QueryService>, persister: Arc<dyn Persister>) -> Self {
        Self {
            query_service,
            persister,
        }
    }
}

impl Step for CleanupFileSetsStep {
    fn call(&self, work: Resource, _args: Option<&serde_json::Value>) -> Result<Resource, Failure> {
        let failed = |e: hyrax_core::PersistError| {
            Failure::new("file_set_cleanup_failed").with_message(e.to_string())
        };
        let file_sets: Vec<_> = self
            .query_service
            .find_members(&work)
            .map_err(failed)?
            .into_iter()
            .filter(|member| member.base() == BaseKind::FileSet)
            .collect();
        for file_set in &file_sets {
            self.persister.delete(file_set).map_err(failed)?;
        }
        tracing::debug!(work = %work.id(), deleted = file_sets.len(), "cleaned up file sets");
        Ok(work)
    }
}

/// Removes the work from every parent that lists it in `member_ids`.
pub struct RemoveFromCollectionsStep {
    query_service: Arc<dyn QueryService>,
    persister: Arc<dyn Persister>,
}

impl RemoveFromCollectionsStep {
    #[must_use]
    pub fn new(query_service: Arc<dyn QueryService>, persister: Arc<dyn Persister>) -> Self {
        Self {
            query_service,
            persister,
        }
    }
}

impl Step for RemoveFromCollectionsStep {
    fn call(&self, work: Resource, _args: Option<&serde_json::Value>) -> Result<Resource, Failure> {
        let failed = |e: hyrax_core::PersistError| {
            Failure::new("collection_update_failed").with_message(e.to_string())
        };
        let parents = self
            .query_service
            .find_inverse_references_by(work.id(), "member_ids")
            .map_err(failed)?;

        for parent in parents {
            let remaining: Vec<_> = parent
                .member_ids()
                .into_iter()
                .filter(|id| id != work.id())
                .collect();
            let parent = set_attribute(&parent, "member_ids", AttributeValue::ids(remaining))?;
            self.persister.save(&parent).map_err(failed)?;
        }
        Ok(work)
    }
}

pub struct DeleteWorkStep {
    persister: Arc<dyn Persister>,
}

impl DeleteWorkStep {
    #[must_use]
    pub fn new(persister: Arc<dyn Persister>) -> Self {
        Self { persister }
    }
}

impl Step for DeleteWorkStep {
    fn call(&self, work: Resource, _args: Option<&serde_json::Value>) -> Result<Resource, Failure> {
        self.persister.delete(&work).map_err(|e| {
            tracing::error!(work = %work.id(), error = %e, "failed to delete work");
            Failure::new("delete_failed").with_message(e.to_string())
        })?;
        Ok(work)
    }
}
