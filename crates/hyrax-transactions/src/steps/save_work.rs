use std::sync::Arc;

use hyrax_core::{Persister, Resource};

use crate::step::{Failure, Step};

pub struct SaveWorkStep {
    persister: Arc<dyn Persister>,
}

impl SaveWorkStep {
    #[must_use]
    pub fn new(persister: Arc<dyn Persister>) -> Self {
        Self { persister }
    }
}

impl Step for SaveWorkStep {
    fn call(&self, work: Resource, _args: Option<&serde_json::Value>) -> Result<Resource, Failure> {
        self.persister.save(&work).map_err(|e| {
            tracing::error!(work = %work.id(), error = %e, "failed to save work");
            Failure::new("save_failed").with_message(e.to_string())
        })
    }
}
