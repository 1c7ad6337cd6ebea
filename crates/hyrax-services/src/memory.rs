//! In-memory adapters for every persistence collaborator.
//!
//! Used by the test suites and by the `hyx` CLI. Each adapter can be told to
//! fail its writes, which is how the failure paths of the actors are tested.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use chrono::Utc;
use dashmap::DashMap;
use hyrax_core::entities::{FileNode, VersionRecord};
use hyrax_core::{
    Id, LegacyObject, LegacyStore, PersistError, Persister, QueryService, Resource,
    StorageAdapter, StoredFile, VersionCommitter,
};
use parking_lot::{Mutex, RwLock};

// ---------------------------------------------------------------------------
// Resource store
// ---------------------------------------------------------------------------

/// Query service and persister over one shared map.
#[derive(Debug, Default)]
pub struct MemoryResourceStore {
    resources: DashMap<Id, Resource>,
    file_nodes: DashMap<Id, FileNode>,
    next_node: AtomicU64,
    fail_writes: AtomicBool,
}

impl MemoryResourceStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail (or succeed again).
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    #[must_use]
    pub fn file_node(&self, id: &Id) -> Option<FileNode> {
        self.file_nodes.get(id).map(|n| n.value().clone())
    }

    #[must_use]
    pub fn file_node_count(&self) -> usize {
        self.file_nodes.len()
    }

    fn check_writable(&self) -> Result<(), PersistError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(PersistError::Backend("resource store is read-only".into()));
        }
        Ok(())
    }
}

impl QueryService for MemoryResourceStore {
    fn find_by(&self, id: &Id) -> Result<Option<Resource>, PersistError> {
        Ok(self.resources.get(id).map(|r| r.value().clone()))
    }

    fn find_inverse_references_by(
        &self,
        id: &Id,
        property: &str,
    ) -> Result<Vec<Resource>, PersistError> {
        let mut found: Vec<Resource> = self
            .resources
            .iter()
            .filter(|entry| entry.value().ids(property).contains(id))
            .map(|entry| entry.value().clone())
            .collect();
        found.sort_by(|a, b| a.id().cmp(b.id()));
        Ok(found)
    }
}

impl Persister for MemoryResourceStore {
    fn save(&self, resource: &Resource) -> Result<Resource, PersistError> {
        self.check_writable()?;
        let saved = resource.persisted();
        self.resources.insert(saved.id().clone(), saved.clone());
        Ok(saved)
    }

    fn save_file_node(&self, mut node: FileNode) -> Result<FileNode, PersistError> {
        self.check_writable()?;
        let now = Utc::now();
        if node.id.is_none() {
            let n = self.next_node.fetch_add(1, Ordering::SeqCst) + 1;
            node.id = Some(Id::new(format!("node-{n}")));
            node.created_at = Some(now);
        }
        node.updated_at = Some(now);
        if let Some(id) = &node.id {
            self.file_nodes.insert(id.clone(), node.clone());
        }
        Ok(node)
    }

    fn delete(&self, resource: &Resource) -> Result<(), PersistError> {
        self.check_writable()?;
        self.resources
            .remove(resource.id())
            .map(|_| ())
            .ok_or_else(|| PersistError::NotFound(resource.id().clone()))
    }
}

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct MemoryStorageAdapter {
    blobs: DashMap<Id, Vec<u8>>,
    next: AtomicU64,
    fail_uploads: AtomicBool,
}

impl MemoryStorageAdapter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_uploads(&self, fail: bool) {
        self.fail_uploads.store(fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn content(&self, id: &Id) -> Option<Vec<u8>> {
        self.blobs.get(id).map(|b| b.value().clone())
    }
}

impl StorageAdapter for MemoryStorageAdapter {
    fn upload(
        &self,
        file_set_id: &Id,
        original_filename: &str,
        content: &[u8],
    ) -> Result<StoredFile, PersistError> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(PersistError::Backend("storage unavailable".into()));
        }
        let n = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        let id = Id::new(format!("memory://{file_set_id}/{original_filename}/{n}"));
        self.blobs.insert(id.clone(), content.to_vec());
        Ok(StoredFile {
            id,
            size: content.len() as u64,
        })
    }
}

// ---------------------------------------------------------------------------
// Legacy store
// ---------------------------------------------------------------------------

/// Legacy objects plus per-file version snapshots, labelled `version1`, `version2`, ...
#[derive(Debug, Default)]
pub struct MemoryLegacyStore {
    objects: RwLock<BTreeMap<String, LegacyObject>>,
    versions: Mutex<BTreeMap<Id, Vec<Vec<u8>>>>,
    fail_saves: AtomicBool,
}

impl MemoryLegacyStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Seed an object as if it had been saved earlier.
    pub fn insert(&self, mut object: LegacyObject) {
        if let Some(id) = object.id().map(str::to_string) {
            object.mark_persisted();
            self.objects.write().insert(id, object);
        }
    }

    fn stored_content(&self, file_id: &Id) -> Option<Vec<u8>> {
        self.objects.read().values().find_map(|object| {
            object
                .files()
                .values()
                .find(|file| &file.id == file_id)
                .map(|file| file.content.clone())
        })
    }
}

impl LegacyStore for MemoryLegacyStore {
    fn find(&self, id: &str) -> Result<Option<LegacyObject>, PersistError> {
        Ok(self.objects.read().get(id).cloned())
    }

    fn save(&self, object: &mut LegacyObject) -> Result<(), PersistError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(PersistError::Backend("legacy store rejected save".into()));
        }
        let id = object
            .id()
            .map(str::to_string)
            .ok_or_else(|| PersistError::Backend("cannot save an object without an id".into()))?;
        object.mark_persisted();
        self.objects.write().insert(id, object.clone());
        Ok(())
    }

    fn create_version(&self, file_id: &Id) -> Result<String, PersistError> {
        let content = self
            .stored_content(file_id)
            .ok_or_else(|| PersistError::NotFound(file_id.clone()))?;
        let mut versions = self.versions.lock();
        let history = versions.entry(file_id.clone()).or_default();
        history.push(content);
        Ok(format!("version{}", history.len()))
    }

    fn version_content(
        &self,
        file_id: &Id,
        version_id: &str,
    ) -> Result<Option<Vec<u8>>, PersistError> {
        let Some(index) = version_id
            .strip_prefix("version")
            .and_then(|n| n.parse::<usize>().ok())
            .and_then(|n| n.checked_sub(1))
        else {
            return Ok(None);
        };
        Ok(self
            .versions
            .lock()
            .get(file_id)
            .and_then(|history| history.get(index).cloned()))
    }
}

// ---------------------------------------------------------------------------
// Version committer
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct MemoryVersionCommitter {
    records: Mutex<Vec<VersionRecord>>,
}

impl MemoryVersionCommitter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn all(&self) -> Vec<VersionRecord> {
        self.records.lock().clone()
    }
}

impl VersionCommitter for MemoryVersionCommitter {
    fn record(&self, record: VersionRecord) -> Result<(), PersistError> {
        self.records.lock().push(record);
        Ok(())
    }

    fn versions_for(&self, file_id: &Id) -> Vec<VersionRecord> {
        self.records
            .lock()
            .iter()
            .filter(|r| &r.file_id == file_id)
            .cloned()
            .collect()
    }
}
