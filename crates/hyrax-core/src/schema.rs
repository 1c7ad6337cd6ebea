//! Data-described resource schemas.
//!
//! A [`ResourceSchema`] replaces a generated resource class: it names the
//! internal resource type, tags the base kind, and lists typed attributes in
//! definition order.

use serde::Serialize;

use crate::enums::{BaseKind, ValueType};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeDef {
    pub name: String,
    pub value_type: ValueType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceSchema {
    internal_resource: String,
    base: BaseKind,
    attributes: Vec<AttributeDef>,
}

impl ResourceSchema {
    #[must_use]
    pub fn builder(internal_resource: impl Into<String>, base: BaseKind) -> SchemaBuilder {
        SchemaBuilder {
            internal_resource: internal_resource.into(),
            base,
            attributes: Vec::new(),
        }
    }

    /// Name of the legacy type this schema mirrors.
    #[must_use]
    pub fn internal_resource(&self) -> &str {
        &self.internal_resource
    }

    #[must_use]
    pub const fn base(&self) -> BaseKind {
        self.base
    }

    #[must_use]
    pub fn attributes(&self) -> &[AttributeDef] {
        &self.attributes
    }

    #[must_use]
    pub fn attribute_type(&self, name: &str) -> Option<ValueType> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value_type)
    }

    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute_type(name).is_some()
    }

    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|a| a.name.as_str())
    }
}

pub struct SchemaBuilder {
    internal_resource: String,
    base: BaseKind,
    attributes: Vec<AttributeDef>,
}

impl SchemaBuilder {
    /// Declare an attribute. Redefining a name replaces its type in place.
    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>, value_type: ValueType) -> Self {
        let name = name.into();
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.value_type = value_type,
            None => self.attributes.push(AttributeDef { name, value_type }),
        }
        self
    }

    #[must_use]
    pub fn build(self) -> ResourceSchema {
        ResourceSchema {
            internal_resource: self.internal_resource,
            base: self.base,
            attributes: self.attributes,
        }
    }
}
