use hyrax_core::{Id, Resource};

use super::{is_blank, set_attribute};
use crate::step::{Failure, Step};

/// Fails with `no_admin_set_id` unless the work names its admin set.
pub struct EnsureAdminSetStep;

impl Step for EnsureAdminSetStep {
    fn call(&self, work: Resource, _args: Option<&serde_json::Value>) -> Result<Resource, Failure> {
        if work.id_attribute("admin_set_id").is_none() {
            return Err(Failure::new("no_admin_set_id")
                .with_message(format!("{} has no admin set", work.id())));
        }
        Ok(work)
    }
}

/// Fills `admin_set_id` with the configured default when it is absent.
pub struct SetDefaultAdminSetStep {
    default_admin_set_id: Id,
}

impl SetDefaultAdminSetStep {
    #[must_use]
    pub const fn new(default_admin_set_id: Id) -> Self {
        Self {
            default_admin_set_id,
        }
    }
}

impl Step for SetDefaultAdminSetStep {
    fn call(&self, work: Resource, _args: Option<&serde_json::Value>) -> Result<Resource, Failure> {
        if !is_blank(&work, "admin_set_id") {
            return Ok(work);
        }
        tracing::debug!(work = %work.id(), admin_set = %self.default_admin_set_id, "assigning default admin set");
        set_attribute(&work, "admin_set_id", self.default_admin_set_id.clone())
    }
}
