//! Collaborator interfaces for the two persistence back-ends.
//!
//! The core never talks to a concrete store. It receives these traits as
//! `Arc<dyn ...>` handles; `hyrax-services` ships in-memory adapters.

use thiserror::Error;

use crate::entities::{FileNode, VersionRecord};
use crate::errors::CoreError;
use crate::ids::Id;
use crate::jobs::{Job, JobReceipt};
use crate::legacy::LegacyObject;
use crate::resource::Resource;

/// Errors surfaced by persistence collaborators.
#[derive(Debug, Error)]
pub enum PersistError {
    /// The back-end rejected or failed the write.
    #[error("Persistence failed: {0}")]
    Backend(String),

    /// A referenced object does not exist.
    #[error("Object not found: {0}")]
    NotFound(Id),

    /// The job queue refused the job.
    #[error("Job queue error: {0}")]
    Queue(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Read side of the resource store.
pub trait QueryService: Send + Sync {
    /// Find a resource by any of its alternate ids. `Ok(None)` when absent.
    ///
    /// # Errors
    ///
    /// Returns `PersistError` if the back-end fails.
    fn find_by(&self, id: &Id) -> Result<Option<Resource>, PersistError>;

    /// Resources that list `id` under `property` (e.g. collections whose
    /// `member_ids` contain a work).
    ///
    /// # Errors
    ///
    /// Returns `PersistError` if the back-end fails.
    fn find_inverse_references_by(
        &self,
        id: &Id,
        property: &str,
    ) -> Result<Vec<Resource>, PersistError>;

    /// Resolve many ids, preserving input order and skipping missing ones.
    ///
    /// # Errors
    ///
    /// Returns `PersistError` if the back-end fails.
    fn find_many_by_ids(&self, ids: &[Id]) -> Result<Vec<Resource>, PersistError> {
        let mut found = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(resource) = self.find_by(id)? {
                found.push(resource);
            }
        }
        Ok(found)
    }

    /// Members of `resource` in member order.
    ///
    /// # Errors
    ///
    /// Returns `PersistError` if the back-end fails.
    fn find_members(&self, resource: &Resource) -> Result<Vec<Resource>, PersistError> {
        self.find_many_by_ids(&resource.member_ids())
    }
}

/// Write side of the resource store.
pub trait Persister: Send + Sync {
    /// Persist a resource, returning the stored copy.
    ///
    /// # Errors
    ///
    /// Returns `PersistError` if the write fails.
    fn save(&self, resource: &Resource) -> Result<Resource, PersistError>;

    /// Persist a file node, assigning an id to unsaved nodes.
    ///
    /// # Errors
    ///
    /// Returns `PersistError` if the write fails.
    fn save_file_node(&self, node: FileNode) -> Result<FileNode, PersistError>;

    /// Remove a resource.
    ///
    /// # Errors
    ///
    /// Returns `PersistError` if the delete fails.
    fn delete(&self, resource: &Resource) -> Result<(), PersistError>;
}

/// Where uploaded bytes end up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub id: Id,
    pub size: u64,
}

/// Binary storage used by the resource store.
pub trait StorageAdapter: Send + Sync {
    /// Store `content` for a file set.
    ///
    /// # Errors
    ///
    /// Returns `PersistError` if the upload fails.
    fn upload(
        &self,
        file_set_id: &Id,
        original_filename: &str,
        content: &[u8],
    ) -> Result<StoredFile, PersistError>;
}

/// The legacy triple-store facade.
pub trait LegacyStore: Send + Sync {
    /// # Errors
    ///
    /// Returns `PersistError` if the back-end fails.
    fn find(&self, id: &str) -> Result<Option<LegacyObject>, PersistError>;

    /// Persist the object and mark it as no longer new.
    ///
    /// # Errors
    ///
    /// Returns `PersistError` if the save is rejected.
    fn save(&self, object: &mut LegacyObject) -> Result<(), PersistError>;

    /// Snapshot the stored content of a file as a new version; returns its label.
    ///
    /// # Errors
    ///
    /// Returns `PersistError::NotFound` if no stored file has `file_id`.
    fn create_version(&self, file_id: &Id) -> Result<String, PersistError>;

    /// Content of a stored version, `Ok(None)` if the label is unknown.
    ///
    /// # Errors
    ///
    /// Returns `PersistError` if the back-end fails.
    fn version_content(
        &self,
        file_id: &Id,
        version_id: &str,
    ) -> Result<Option<Vec<u8>>, PersistError>;
}

/// Identifier minting service.
pub trait IdMinter: Send + Sync {
    /// # Errors
    ///
    /// Returns `PersistError` if no identifier can be produced.
    fn mint(&self) -> Result<String, PersistError>;
}

/// Fire-and-forget asynchronous job queue (at-least-once).
pub trait JobQueue: Send + Sync {
    /// # Errors
    ///
    /// Returns `PersistError::Queue` if the job cannot be enqueued.
    fn perform_later(&self, job: Job) -> Result<JobReceipt, PersistError>;
}

/// Records who committed which file version.
pub trait VersionCommitter: Send + Sync {
    /// # Errors
    ///
    /// Returns `PersistError` if the record cannot be stored.
    fn record(&self, record: VersionRecord) -> Result<(), PersistError>;

    fn versions_for(&self, file_id: &Id) -> Vec<VersionRecord>;
}
