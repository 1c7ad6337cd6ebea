//! File entities shared by both persistence back-ends.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for JSON
//! roundtrip and schema validation, except `PcdmFile`, which carries raw bytes.

mod file_node;
mod pcdm_file;
mod version;

pub use file_node::FileNode;
pub use pcdm_file::PcdmFile;
pub use version::VersionRecord;
