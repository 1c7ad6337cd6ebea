use hyrax_core::{AttributeValue, Id, Resource};

use super::set_attribute;
use crate::step::{Failure, Step, string_arg};

/// Records the depositor from the `user` argument and grants them edit access.
pub struct AddCreationDataStep;

impl Step for AddCreationDataStep {
    fn call(&self, work: Resource, args: Option<&serde_json::Value>) -> Result<Resource, Failure> {
        let Some(user) = string_arg(args, "user") else {
            return Err(Failure::new("no_depositor")
                .with_message(format!("no depositor given for {}", work.id())));
        };

        let mut edit_users: Vec<String> = match work.get("edit_users") {
            Some(AttributeValue::List(items)) => items
                .iter()
                .filter_map(AttributeValue::as_text)
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        };
        if !edit_users.iter().any(|u| u == user) {
            edit_users.push(user.to_string());
        }

        let work = set_attribute(&work, "depositor", user)?;
        set_attribute(&work, "edit_users", AttributeValue::texts(edit_users))
    }
}

/// Adds the `collection_id` argument to `member_of_collection_ids`.
pub struct FindCollectionIdStep;

impl Step for FindCollectionIdStep {
    fn call(&self, work: Resource, args: Option<&serde_json::Value>) -> Result<Resource, Failure> {
        let Some(collection_id) = string_arg(args, "collection_id") else {
            return Ok(work);
        };
        let mut ids = work.ids("member_of_collection_ids");
        ids.push(Id::new(collection_id));
        set_attribute(&work, "member_of_collection_ids", AttributeValue::ids(ids))
    }
}
