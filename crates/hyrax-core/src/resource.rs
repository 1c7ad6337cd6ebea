//! Schema-parameterized resource records.
//!
//! A [`Resource`] is immutable once built: every value has been coerced to
//! the type its schema declares. Changes go through [`Resource::with_attribute`],
//! which returns a new record.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use crate::enums::{BaseKind, ValueType, Visibility};
use crate::errors::CoreError;
use crate::ids::Id;
use crate::schema::ResourceSchema;
use crate::value::AttributeValue;

pub type AttributeMap = BTreeMap<String, AttributeValue>;

#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    schema: Arc<ResourceSchema>,
    alternate_ids: Vec<Id>,
    new_record: bool,
    attributes: AttributeMap,
}

impl Resource {
    /// Build a resource, coercing every attribute to its declared type.
    ///
    /// Keys the schema does not declare are dropped.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Coercion` if any value cannot be coerced.
    pub fn new(
        schema: Arc<ResourceSchema>,
        id: Id,
        new_record: bool,
        attributes: AttributeMap,
    ) -> Result<Self, CoreError> {
        let mut coerced = AttributeMap::new();
        for (name, value) in attributes {
            match schema.attribute_type(&name) {
                Some(value_type) => {
                    let value = coerce(&name, value_type, value)?;
                    coerced.insert(name, value);
                }
                None => tracing::debug!(
                    attribute = %name,
                    resource = schema.internal_resource(),
                    "dropping attribute not declared by schema"
                ),
            }
        }

        Ok(Self {
            schema,
            alternate_ids: vec![id],
            new_record,
            attributes: coerced,
        })
    }

    /// Primary identifier (the first alternate id).
    #[must_use]
    pub fn id(&self) -> &Id {
        &self.alternate_ids[0]
    }

    #[must_use]
    pub fn alternate_ids(&self) -> &[Id] {
        &self.alternate_ids
    }

    #[must_use]
    pub const fn schema(&self) -> &Arc<ResourceSchema> {
        &self.schema
    }

    #[must_use]
    pub fn internal_resource(&self) -> &str {
        self.schema.internal_resource()
    }

    #[must_use]
    pub fn base(&self) -> BaseKind {
        self.schema.base()
    }

    #[must_use]
    pub const fn is_new_record(&self) -> bool {
        self.new_record
    }

    #[must_use]
    pub const fn attributes(&self) -> &AttributeMap {
        &self.attributes
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    /// Identifiers held by an id, id-set, or id-list attribute.
    #[must_use]
    pub fn ids(&self, name: &str) -> Vec<Id> {
        match self.attributes.get(name) {
            Some(AttributeValue::List(items)) => {
                items.iter().filter_map(AttributeValue::as_id).collect()
            }
            Some(value) => value.as_id().into_iter().collect(),
            None => Vec::new(),
        }
    }

    #[must_use]
    pub fn id_attribute(&self, name: &str) -> Option<Id> {
        self.attributes.get(name).and_then(AttributeValue::as_id)
    }

    /// Ordered member ids.
    #[must_use]
    pub fn member_ids(&self) -> Vec<Id> {
        self.ids("member_ids")
    }

    #[must_use]
    pub fn visibility(&self) -> Option<Visibility> {
        self.attributes
            .get("visibility")
            .and_then(AttributeValue::as_text)
            .and_then(Visibility::parse)
    }

    #[must_use]
    pub fn nested(&self, name: &str) -> Option<&Self> {
        match self.attributes.get(name) {
            Some(AttributeValue::Resource(resource)) => Some(resource),
            _ => None,
        }
    }

    /// A copy of this resource with one attribute replaced.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnknownAttribute` if the schema does not declare
    /// `name`, or `CoreError::Coercion` if the value does not fit its type.
    pub fn with_attribute(
        &self,
        name: &str,
        value: impl Into<AttributeValue>,
    ) -> Result<Self, CoreError> {
        let value_type =
            self.schema
                .attribute_type(name)
                .ok_or_else(|| CoreError::UnknownAttribute {
                    internal_resource: self.internal_resource().to_string(),
                    attribute: name.to_string(),
                })?;
        let mut next = self.clone();
        next.attributes
            .insert(name.to_string(), coerce(name, value_type, value.into())?);
        Ok(next)
    }

    /// A copy of this resource with the attribute removed.
    #[must_use]
    pub fn without_attribute(&self, name: &str) -> Self {
        let mut next = self.clone();
        next.attributes.remove(name);
        next
    }

    /// A copy flagged as persisted.
    #[must_use]
    pub fn persisted(&self) -> Self {
        let mut next = self.clone();
        next.new_record = false;
        next
    }
}

#[derive(Serialize)]
struct ResourceRepr<'a> {
    id: &'a Id,
    internal_resource: &'a str,
    alternate_ids: &'a [Id],
    new_record: bool,
    attributes: &'a AttributeMap,
}

impl Serialize for Resource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ResourceRepr {
            id: self.id(),
            internal_resource: self.internal_resource(),
            alternate_ids: &self.alternate_ids,
            new_record: self.new_record,
            attributes: &self.attributes,
        }
        .serialize(serializer)
    }
}

// ---------------------------------------------------------------------------
// Coercion
// ---------------------------------------------------------------------------

fn mismatch(attribute: &str, expected: ValueType, found: &AttributeValue) -> CoreError {
    CoreError::Coercion {
        attribute: attribute.to_string(),
        expected,
        found: found.kind(),
    }
}

fn coerce(
    attribute: &str,
    value_type: ValueType,
    value: AttributeValue,
) -> Result<AttributeValue, CoreError> {
    match value_type {
        ValueType::String => coerce_string(attribute, value),
        ValueType::Id => coerce_id(attribute, value),
        ValueType::IdSet => {
            let mut ids = coerce_id_list(attribute, value)?;
            let mut seen = std::collections::HashSet::new();
            ids.retain(|id| seen.insert(id.clone()));
            Ok(AttributeValue::ids(ids))
        }
        ValueType::IdList => Ok(AttributeValue::ids(coerce_id_list(attribute, value)?)),
        ValueType::StringList => coerce_string_list(attribute, value),
        ValueType::DateTime => coerce_datetime(attribute, value),
        ValueType::Boolean => match value {
            AttributeValue::Null | AttributeValue::Bool(_) => Ok(value),
            AttributeValue::Text(ref s) if s == "true" => Ok(AttributeValue::Bool(true)),
            AttributeValue::Text(ref s) if s == "false" => Ok(AttributeValue::Bool(false)),
            other => Err(mismatch(attribute, ValueType::Boolean, &other)),
        },
        ValueType::Resource => match value {
            AttributeValue::Null | AttributeValue::Resource(_) => Ok(value),
            other => Err(mismatch(attribute, ValueType::Resource, &other)),
        },
    }
}

fn coerce_string(attribute: &str, value: AttributeValue) -> Result<AttributeValue, CoreError> {
    Ok(match value {
        AttributeValue::Null | AttributeValue::Text(_) | AttributeValue::Resource(_) => value,
        AttributeValue::Bool(b) => AttributeValue::Text(b.to_string()),
        AttributeValue::Int(i) => AttributeValue::Text(i.to_string()),
        AttributeValue::Date(dt) => AttributeValue::Text(dt.to_rfc3339()),
        AttributeValue::Id(id) => AttributeValue::Text(id.into_string()),
        AttributeValue::List(items) => AttributeValue::List(
            items
                .into_iter()
                .map(|item| coerce_string(attribute, item))
                .collect::<Result<_, _>>()?,
        ),
    })
}

fn coerce_id(attribute: &str, value: AttributeValue) -> Result<AttributeValue, CoreError> {
    match value {
        AttributeValue::Null => Ok(value),
        AttributeValue::List(mut items) if items.len() <= 1 => {
            items.pop().map_or(Ok(AttributeValue::Null), |item| coerce_id(attribute, item))
        }
        other => other
            .as_id()
            .map(AttributeValue::Id)
            .ok_or_else(|| mismatch(attribute, ValueType::Id, &other)),
    }
}

fn coerce_id_list(attribute: &str, value: AttributeValue) -> Result<Vec<Id>, CoreError> {
    match value {
        AttributeValue::Null => Ok(Vec::new()),
        AttributeValue::List(items) => {
            let mut ids = Vec::with_capacity(items.len());
            for item in items {
                if item.is_null() {
                    continue;
                }
                ids.push(
                    item.as_id()
                        .ok_or_else(|| mismatch(attribute, ValueType::IdSet, &item))?,
                );
            }
            Ok(ids)
        }
        other => other
            .as_id()
            .map(|id| vec![id])
            .ok_or_else(|| mismatch(attribute, ValueType::IdSet, &other)),
    }
}

fn coerce_string_list(attribute: &str, value: AttributeValue) -> Result<AttributeValue, CoreError> {
    match value {
        AttributeValue::Null => Ok(AttributeValue::List(Vec::new())),
        AttributeValue::Text(_) => Ok(AttributeValue::List(vec![value])),
        AttributeValue::List(items) => items
            .into_iter()
            .map(|item| match item {
                AttributeValue::Text(_) => Ok(item),
                AttributeValue::Id(id) => Ok(AttributeValue::Text(id.into_string())),
                other => Err(mismatch(attribute, ValueType::StringList, &other)),
            })
            .collect::<Result<_, _>>()
            .map(AttributeValue::List),
        other => Err(mismatch(attribute, ValueType::StringList, &other)),
    }
}

fn coerce_datetime(attribute: &str, value: AttributeValue) -> Result<AttributeValue, CoreError> {
    match value {
        AttributeValue::Null | AttributeValue::Date(_) => Ok(value),
        AttributeValue::Text(ref s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| AttributeValue::Date(dt.with_timezone(&Utc)))
            .map_err(|_| mismatch(attribute, ValueType::DateTime, &value)),
        AttributeValue::List(mut items) if items.len() <= 1 => items
            .pop()
            .map_or(Ok(AttributeValue::Null), |item| coerce_datetime(attribute, item)),
        other => Err(mismatch(attribute, ValueType::DateTime, &other)),
    }
}
