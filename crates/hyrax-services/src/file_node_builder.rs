use std::sync::Arc;

use hyrax_core::entities::FileNode;
use hyrax_core::{Id, PersistError, Persister, StorageAdapter};

use crate::io::JobIoWrapper;

/// Uploads content through the storage adapter and persists the node that
/// describes it.
#[derive(Clone)]
pub struct FileNodeBuilder {
    storage_adapter: Arc<dyn StorageAdapter>,
    persister: Arc<dyn Persister>,
}

impl FileNodeBuilder {
    #[must_use]
    pub fn new(storage_adapter: Arc<dyn StorageAdapter>, persister: Arc<dyn Persister>) -> Self {
        Self {
            storage_adapter,
            persister,
        }
    }

    /// Upload the content, then save the node once with its file identifier.
    /// A failed upload leaves nothing in the store.
    ///
    /// # Errors
    ///
    /// Returns `PersistError` if the upload or the node save fails.
    pub fn create(
        &self,
        io: &JobIoWrapper,
        mut node: FileNode,
        file_set_id: &Id,
    ) -> Result<FileNode, PersistError> {
        let stored = self
            .storage_adapter
            .upload(file_set_id, io.original_name(), io.content())?;
        tracing::debug!(file_set = %file_set_id, file = %stored.id, size = stored.size, "uploaded file content");

        node.file_set_id = Some(file_set_id.clone());
        node.file_identifiers.push(stored.id);
        node.size = stored.size;
        self.persister.save_file_node(node)
    }
}

#[cfg(test)]
mod tests {
    use hyrax_core::enums::UseRelation;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::memory::{MemoryResourceStore, MemoryStorageAdapter};

    #[test]
    fn create_uploads_and_links_content() {
        let storage = Arc::new(MemoryStorageAdapter::new());
        let store = Arc::new(MemoryResourceStore::new());
        let builder = FileNodeBuilder::new(storage.clone(), store.clone());
        let io = JobIoWrapper::from_bytes(b"pixels".to_vec(), "scan.tiff", "image/tiff");

        let node = builder
            .create(&io, io.to_file_node(UseRelation::OriginalFile), &Id::new("fs-1"))
            .unwrap();

        assert!(node.is_persisted());
        assert_eq!(node.file_set_id, Some(Id::new("fs-1")));
        assert_eq!(node.size, 6);
        assert_eq!(
            storage.content(&node.file_identifiers[0]),
            Some(b"pixels".to_vec())
        );
        assert_eq!(store.file_node(node.id.as_ref().unwrap()), Some(node));
    }

    #[test]
    fn upload_failure_is_returned() {
        let storage = Arc::new(MemoryStorageAdapter::new());
        storage.fail_uploads(true);
        let store = Arc::new(MemoryResourceStore::new());
        let builder = FileNodeBuilder::new(storage, store.clone());
        let io = JobIoWrapper::from_bytes(b"x".to_vec(), "x.txt", "text/plain");

        let result = builder.create(&io, io.to_file_node(UseRelation::OriginalFile), &Id::new("fs-1"));
        assert!(matches!(result, Err(PersistError::Backend(_))));
        assert_eq!(store.file_node_count(), 0);
    }
}
