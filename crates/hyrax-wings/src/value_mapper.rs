//! Per-value mapping from legacy values to resource attribute values.

use hyrax_core::{AttributeValue, LegacyValue};

use crate::error::TransformError;
use crate::model_transformer::ModelTransformer;

/// Maps one legacy value. Nested legacy objects are built into resources
/// through the owning [`ModelTransformer`]; everything else passes through.
pub struct TransformerValueMapper<'a> {
    transformer: &'a ModelTransformer,
}

impl<'a> TransformerValueMapper<'a> {
    #[must_use]
    pub const fn new(transformer: &'a ModelTransformer) -> Self {
        Self { transformer }
    }

    /// Map `value`. Takes `&mut` because building a nested object may mint
    /// and assign its id.
    ///
    /// # Errors
    ///
    /// Returns `TransformError` if a nested object cannot be built.
    pub fn map(&self, value: &mut LegacyValue) -> Result<AttributeValue, TransformError> {
        Ok(match value {
            LegacyValue::Null => AttributeValue::Null,
            LegacyValue::Bool(b) => AttributeValue::Bool(*b),
            LegacyValue::Int(i) => AttributeValue::Int(*i),
            LegacyValue::Text(s) => AttributeValue::Text(s.clone()),
            LegacyValue::Date(d) => AttributeValue::Date(*d),
            LegacyValue::Id(id) => AttributeValue::Id(id.clone()),
            LegacyValue::List(items) => AttributeValue::List(
                items
                    .iter_mut()
                    .map(|item| self.map(item))
                    .collect::<Result<_, _>>()?,
            ),
            LegacyValue::Object(object) => {
                AttributeValue::Resource(Box::new(self.transformer.build(object)?))
            }
        })
    }
}
