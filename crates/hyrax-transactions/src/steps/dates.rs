use chrono::Utc;
use hyrax_core::Resource;

use super::{is_blank, set_attribute};
use crate::step::{Failure, Step};

pub struct SetModifiedDateStep;

impl Step for SetModifiedDateStep {
    fn call(&self, work: Resource, _args: Option<&serde_json::Value>) -> Result<Resource, Failure> {
        set_attribute(&work, "date_modified", Utc::now())
    }
}

/// Stamps `date_uploaded` once; an existing value is left alone.
pub struct SetUploadedDateStep;

impl Step for SetUploadedDateStep {
    fn call(&self, work: Resource, _args: Option<&serde_json::Value>) -> Result<Resource, Failure> {
        if !is_blank(&work, "date_uploaded") {
            return Ok(work);
        }
        set_attribute(&work, "date_uploaded", Utc::now())
    }
}
