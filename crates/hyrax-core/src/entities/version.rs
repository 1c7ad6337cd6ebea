use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ids::Id;

/// Who committed which version of a file, and when.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct VersionRecord {
    pub file_id: Id,
    pub version_id: String,
    pub committer: String,
    pub created_at: DateTime<Utc>,
}
