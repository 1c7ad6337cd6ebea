//! Attribute values on both sides of the transformation.
//!
//! [`LegacyValue`] is what a legacy object exposes for a property or
//! relationship; it may embed another legacy object. [`AttributeValue`] is
//! what a resource holds; embedded legacy objects have become resources.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::ids::Id;
use crate::legacy::LegacyObject;
use crate::resource::Resource;

/// A value read from a legacy object.
#[derive(Debug, Clone, PartialEq)]
pub enum LegacyValue {
    Null,
    Bool(bool),
    Int(i64),
    Text(String),
    Date(DateTime<Utc>),
    Id(Id),
    List(Vec<LegacyValue>),
    Object(Box<LegacyObject>),
}

impl LegacyValue {
    /// Build a value from loosely-typed JSON (fixture files, CLI input).
    ///
    /// Strings that parse as RFC 3339 become dates. JSON objects have no
    /// legacy counterpart and are kept as their serialized text.
    #[must_use]
    pub fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map_or_else(|| Self::Text(n.to_string()), Self::Int),
            serde_json::Value::String(s) => DateTime::parse_from_rfc3339(&s)
                .map_or(Self::Text(s), |dt| Self::Date(dt.with_timezone(&Utc))),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Self::from_json).collect())
            }
            object @ serde_json::Value::Object(_) => Self::Text(object.to_string()),
        }
    }

    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    #[must_use]
    pub fn texts<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(values.into_iter().map(|v| Self::Text(v.into())).collect())
    }
}

/// A value held by a resource attribute.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Null,
    Bool(bool),
    Int(i64),
    Text(String),
    Date(DateTime<Utc>),
    Id(Id),
    List(Vec<AttributeValue>),
    Resource(Box<Resource>),
}

impl AttributeValue {
    /// Short name of the variant, used in coercion errors.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Text(_) => "text",
            Self::Date(_) => "date",
            Self::Id(_) => "id",
            Self::List(_) => "list",
            Self::Resource(_) => "resource",
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn ids<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = Id>,
    {
        Self::List(ids.into_iter().map(Self::Id).collect())
    }

    #[must_use]
    pub fn texts<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(values.into_iter().map(|v| Self::Text(v.into())).collect())
    }

    /// Identifier carried by this value, if it is id-like.
    #[must_use]
    pub fn as_id(&self) -> Option<Id> {
        match self {
            Self::Id(id) => Some(id.clone()),
            Self::Text(s) if !s.is_empty() => Some(Id::new(s.as_str())),
            Self::Resource(resource) => Some(resource.id().clone()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Id(id) => Some(id.as_str()),
            _ => None,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Id> for AttributeValue {
    fn from(value: Id) -> Self {
        Self::Id(value)
    }
}

impl From<DateTime<Utc>> for AttributeValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Date(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Resource> for AttributeValue {
    fn from(value: Resource) -> Self {
        Self::Resource(Box::new(value))
    }
}

impl<T: Into<Self>> From<Option<T>> for AttributeValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
