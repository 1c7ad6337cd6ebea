//! Concrete steps registered by [`crate::Container::standard`].

mod admin_set;
mod creation;
mod dates;
mod delete;
mod save_work;
mod validate_files;

pub use admin_set::{EnsureAdminSetStep, SetDefaultAdminSetStep};
pub use creation::{AddCreationDataStep, FindCollectionIdStep};
pub use dates::{SetModifiedDateStep, SetUploadedDateStep};
pub use delete::{CleanupFileSetsStep, DeleteWorkStep, RemoveFromCollectionsStep};
pub use save_work::SaveWorkStep;
pub use validate_files::ValidateFilesStep;

use hyrax_core::{AttributeValue, Resource};

use crate::step::Failure;

/// Set an attribute, turning a schema mismatch into an `invalid_attribute` failure.
fn set_attribute(
    work: &Resource,
    name: &str,
    value: impl Into<AttributeValue>,
) -> Result<Resource, Failure> {
    work.with_attribute(name, value)
        .map_err(|e| Failure::new("invalid_attribute").with_message(e.to_string()))
}

fn is_blank(work: &Resource, name: &str) -> bool {
    match work.get(name) {
        None | Some(AttributeValue::Null) => true,
        Some(AttributeValue::Text(s)) => s.is_empty(),
        Some(AttributeValue::List(items)) => items.is_empty(),
        Some(_) => false,
    }
}
