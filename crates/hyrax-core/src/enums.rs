//! Base kinds, behaviors, value types, use relations, visibility, and modes.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`
//! unless they mirror an external vocabulary.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// BaseKind
// ---------------------------------------------------------------------------

/// The base type a derived resource schema specializes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum BaseKind {
    Resource,
    Embargo,
    Lease,
    Collection,
    Work,
    FileSet,
}

impl BaseKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Resource => "resource",
            Self::Embargo => "embargo",
            Self::Lease => "lease",
            Self::Collection => "collection",
            Self::Work => "work",
            Self::FileSet => "file_set",
        }
    }
}

impl fmt::Display for BaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Behavior
// ---------------------------------------------------------------------------

/// Mixin-like behaviors a legacy type may include.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Behavior {
    Collection,
    Work,
    FileSet,
}

impl Behavior {
    /// The base kind this behavior specializes a generic resource into.
    #[must_use]
    pub const fn base_kind(self) -> BaseKind {
        match self {
            Self::Collection => BaseKind::Collection,
            Self::Work => BaseKind::Work,
            Self::FileSet => BaseKind::FileSet,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Collection => "collection",
            Self::Work => "work",
            Self::FileSet => "file_set",
        }
    }
}

impl fmt::Display for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ValueType
// ---------------------------------------------------------------------------

/// Declared type of a resource schema attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    /// Free text; multi-valued properties hold a list of strings.
    String,
    /// A single identifier (singular foreign key).
    Id,
    /// Unordered set of identifiers.
    IdSet,
    /// Ordered list of identifiers (ordered members).
    IdList,
    StringList,
    DateTime,
    Boolean,
    /// A nested resource (embargo, lease).
    Resource,
}

impl ValueType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Id => "id",
            Self::IdSet => "id_set",
            Self::IdList => "id_list",
            Self::StringList => "string_list",
            Self::DateTime => "date_time",
            Self::Boolean => "boolean",
            Self::Resource => "resource",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// UseRelation
// ---------------------------------------------------------------------------

/// Base of the PCDM use vocabulary.
pub const PCDM_USE_NAMESPACE: &str = "http://pcdm.org/use#";

/// Role of a file within a file set.
///
/// Legacy persistence addresses files by symbol (`original_file`); resource
/// persistence addresses them by vocabulary URI (`http://pcdm.org/use#OriginalFile`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum UseRelation {
    OriginalFile,
    ExtractedFile,
    ThumbnailFile,
}

impl UseRelation {
    pub const ALL: [Self; 3] = [Self::OriginalFile, Self::ExtractedFile, Self::ThumbnailFile];

    /// Symbol-like name used by the legacy layer.
    #[must_use]
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::OriginalFile => "original_file",
            Self::ExtractedFile => "extracted_file",
            Self::ThumbnailFile => "thumbnail_file",
        }
    }

    /// Vocabulary URI used by the resource layer.
    #[must_use]
    pub const fn uri(self) -> &'static str {
        match self {
            Self::OriginalFile => "http://pcdm.org/use#OriginalFile",
            Self::ExtractedFile => "http://pcdm.org/use#ExtractedText",
            Self::ThumbnailFile => "http://pcdm.org/use#ThumbnailImage",
        }
    }

    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_symbol() == symbol)
    }

    /// Match a vocabulary URI, ignoring ASCII case.
    #[must_use]
    pub fn from_uri(uri: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.uri().eq_ignore_ascii_case(uri))
    }
}

impl fmt::Display for UseRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

// ---------------------------------------------------------------------------
// Visibility
// ---------------------------------------------------------------------------

/// Access visibility of a work, collection, or file set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Open,
    Authenticated,
    Restricted,
    Embargo,
    Lease,
}

impl Visibility {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Authenticated => "authenticated",
            Self::Restricted => "restricted",
            Self::Embargo => "embargo",
            Self::Lease => "lease",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "open" => Some(Self::Open),
            "authenticated" => Some(Self::Authenticated),
            "restricted" => Some(Self::Restricted),
            "embargo" => Some(Self::Embargo),
            "lease" => Some(Self::Lease),
            _ => None,
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// PersistenceMode / RelationPolicy
// ---------------------------------------------------------------------------

/// Which persistence back-end file ingestion is routed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PersistenceMode {
    /// Triple-store-backed legacy object layer.
    Legacy,
    /// Resource-mapping persistence abstraction.
    #[default]
    Resource,
}

impl PersistenceMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Resource => "resource",
        }
    }
}

impl fmt::Display for PersistenceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to do with a use-relation value outside the vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RelationPolicy {
    /// Fall back to `original_file` and log a warning.
    #[default]
    DefaultToOriginal,
    /// Reject the value with a validation error.
    Strict,
}
