use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::UseRelation;
use crate::ids::Id;

/// A single physical or derivative file record belonging to a file set.
///
/// Unsaved nodes have no `id`; the persister assigns one.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FileNode {
    pub id: Option<Id>,
    pub file_set_id: Option<Id>,
    pub use_relation: UseRelation,
    pub original_filename: String,
    pub mime_type: String,
    pub size: u64,
    /// Storage-adapter identifiers of the uploaded content, newest last.
    pub file_identifiers: Vec<Id>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl FileNode {
    /// An unsaved node for `original_filename`, tagged with `use_relation`.
    #[must_use]
    pub fn unsaved(
        use_relation: UseRelation,
        original_filename: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            file_set_id: None,
            use_relation,
            original_filename: original_filename.into(),
            mime_type: mime_type.into(),
            size: 0,
            file_identifiers: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }

    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}
