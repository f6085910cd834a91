use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::resourceid::trailing_segment;

use super::Entity;

/// A batch mutation result. Entries arrive in no particular order, each
/// keyed by an entity-specific result field.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MutateResponse {
    #[serde(default, alias = "results", skip_serializing_if = "Vec::is_empty")]
    pub mutate_operation_responses: Vec<MutateOperationResponse>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct MutateOperationResponse(pub serde_json::Map<String, Value>);

impl MutateOperationResponse {
    pub fn result_for(&self, entity: Entity) -> Option<MutateResult> {
        let value = self.0.get(entity.result_key())?;
        serde_json::from_value(value.clone()).ok()
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutateResult {
    pub resource_name: String,
}

/// Recovers the generated identifier of the first result entry matching the
/// requested entity kind. `None` means the batch was accepted but the
/// identifier is unrecoverable, which callers must treat as a distinct
/// failure from an outright rejection.
pub fn extract_resource_id(response: &MutateResponse, entity: Entity) -> Option<String> {
    response
        .mutate_operation_responses
        .iter()
        .find_map(|entry| entry.result_for(entity))
        .and_then(|result| trailing_segment(&result.resource_name).map(str::to_owned))
}
