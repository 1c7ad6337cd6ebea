//! Asynchronous follow-up jobs emitted by file ingestion.

use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ids::Id;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(tag = "job", rename_all = "snake_case")]
pub enum Job {
    /// Inspect file content and produce derivatives/metadata.
    Characterize {
        file_set_id: Id,
        file_id: Id,
        /// Local path of the content, when the worker may share the filesystem.
        path_hint: Option<PathBuf>,
    },
}

impl Job {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Characterize { .. } => "characterize",
        }
    }
}

/// Acknowledgement returned by a job queue.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct JobReceipt {
    pub job_id: String,
    pub job: Job,
}
