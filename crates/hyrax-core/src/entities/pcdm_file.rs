use crate::ids::Id;

/// A file attached to a legacy file set under a use relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcdmFile {
    pub id: Id,
    pub content: Vec<u8>,
    pub mime_type: String,
    pub original_name: String,
}

impl PcdmFile {
    #[must_use]
    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }
}
