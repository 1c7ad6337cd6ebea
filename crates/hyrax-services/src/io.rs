//! File content handed to ingestion.

use std::path::{Path, PathBuf};

use hyrax_core::entities::FileNode;
use hyrax_core::enums::UseRelation;

/// Bytes to ingest plus where they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobIoWrapper {
    content: Vec<u8>,
    original_name: String,
    mime_type: String,
    uploaded_file_path: Option<PathBuf>,
    path: Option<PathBuf>,
}

impl JobIoWrapper {
    #[must_use]
    pub fn from_bytes(
        content: impl Into<Vec<u8>>,
        original_name: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            content: content.into(),
            original_name: original_name.into(),
            mime_type: mime_type.into(),
            uploaded_file_path: None,
            path: None,
        }
    }

    /// Read a local file; its file name becomes the original name.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the file cannot be read.
    pub fn from_path(path: &Path, mime_type: impl Into<String>) -> std::io::Result<Self> {
        let content = std::fs::read(path)?;
        let original_name = path
            .file_name()
            .map_or_else(String::new, |n| n.to_string_lossy().into_owned());
        Ok(Self {
            content,
            original_name,
            mime_type: mime_type.into(),
            uploaded_file_path: None,
            path: Some(path.to_path_buf()),
        })
    }

    /// Record the path of the upload this content came from.
    #[must_use]
    pub fn with_uploaded_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.uploaded_file_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    #[must_use]
    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Where a worker on the same filesystem can find the content: the
    /// uploaded file if there is one, else the io's own path.
    #[must_use]
    pub fn path_hint(&self) -> Option<PathBuf> {
        self.uploaded_file_path.clone().or_else(|| self.path.clone())
    }

    #[must_use]
    pub fn to_file_node(&self, relation: UseRelation) -> FileNode {
        let mut node = FileNode::unsaved(relation, &self.original_name, &self.mime_type);
        node.size = self.content.len() as u64;
        node
    }
}
