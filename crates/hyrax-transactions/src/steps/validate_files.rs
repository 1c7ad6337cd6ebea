use hyrax_core::Resource;

use crate::step::{Failure, Step};

/// Checks the `files` argument: every entry must be an object with a
/// non-empty string `id`. No argument means no files, which is valid.
pub struct ValidateFilesStep;

impl Step for ValidateFilesStep {
    fn call(&self, work: Resource, args: Option<&serde_json::Value>) -> Result<Resource, Failure> {
        let Some(files) = args.and_then(|a| a.get("files")) else {
            return Ok(work);
        };
        let Some(files) = files.as_array() else {
            return Err(Failure::new("invalid_files").with_message("files must be a list"));
        };
        for (index, file) in files.iter().enumerate() {
            let has_id = file
                .get("id")
                .and_then(serde_json::Value::as_str)
                .is_some_and(|id| !id.is_empty());
            if !has_id {
                return Err(Failure::new("invalid_files")
                    .with_message(format!("file at position {index} has no id")));
            }
        }
        Ok(work)
    }
}
