//! # hyrax-wings
//!
//! Transformation between the legacy object layer and the resource layer.
//!
//! - [`derive_schema`] turns a legacy type descriptor into a [`hyrax_core::ResourceSchema`]
//! - [`ResourceClassCache`] memoizes derived schemas per legacy type
//! - [`ModelTransformer`] builds resources from legacy objects, minting ids
//!   through an [`hyrax_core::IdMinter`] such as [`PrefixMinter`]
//! - [`LegacyConverter`] goes the other way, using a [`ModelRegistry`]

pub mod attribute_transformer;
pub mod cache;
pub mod converter;
pub mod derive;
pub mod error;
pub mod minter;
pub mod model_transformer;
pub mod registry;
pub mod value_mapper;

mod test_support;

pub use attribute_transformer::AttributeTransformer;
pub use cache::ResourceClassCache;
pub use converter::LegacyConverter;
pub use derive::{base_kind_for, derive_schema};
pub use error::TransformError;
pub use minter::PrefixMinter;
pub use model_transformer::ModelTransformer;
pub use registry::ModelRegistry;
pub use value_mapper::TransformerValueMapper;
