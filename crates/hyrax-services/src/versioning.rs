//! Version bookkeeping for ingested and reverted files.

use std::sync::Arc;

use chrono::Utc;
use hyrax_core::entities::{FileNode, VersionRecord};
use hyrax_core::{Id, LegacyStore, PersistError, VersionCommitter};

#[derive(Clone)]
pub struct VersioningService {
    legacy_store: Arc<dyn LegacyStore>,
    committer: Arc<dyn VersionCommitter>,
}

impl VersioningService {
    #[must_use]
    pub fn new(legacy_store: Arc<dyn LegacyStore>, committer: Arc<dyn VersionCommitter>) -> Self {
        Self {
            legacy_store,
            committer,
        }
    }

    /// Snapshot a legacy file and record `user` as the committer.
    ///
    /// # Errors
    ///
    /// Returns `PersistError` if the snapshot or the record fails.
    pub fn create_for_file(&self, file_id: &Id, user: &str) -> Result<VersionRecord, PersistError> {
        let version_id = self.legacy_store.create_version(file_id)?;
        self.commit(file_id.clone(), version_id, user)
    }

    /// Record a new version of a file node. Nodes are versioned by their
    /// storage identifiers, so only the committer record is written.
    ///
    /// # Errors
    ///
    /// Returns `PersistError` if the node is unsaved or the record fails.
    pub fn create_for_node(&self, node: &FileNode, user: &str) -> Result<VersionRecord, PersistError> {
        let file_id = node
            .id
            .clone()
            .ok_or_else(|| PersistError::Backend("cannot version an unsaved file node".into()))?;
        let version_id = format!("version{}", self.committer.versions_for(&file_id).len() + 1);
        self.commit(file_id, version_id, user)
    }

    #[must_use]
    pub fn versions_for(&self, file_id: &Id) -> Vec<VersionRecord> {
        self.committer.versions_for(file_id)
    }

    fn commit(
        &self,
        file_id: Id,
        version_id: String,
        user: &str,
    ) -> Result<VersionRecord, PersistError> {
        let record = VersionRecord {
            file_id,
            version_id,
            committer: user.to_string(),
            created_at: Utc::now(),
        };
        self.committer.record(record.clone())?;
        tracing::debug!(file = %record.file_id, version = %record.version_id, committer = user, "recorded version");
        Ok(record)
    }
}
