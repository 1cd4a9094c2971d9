use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::null_as_empty;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowSummary {
    pub id: String,
    pub name: String,
}

/// Server-defined workflow document. The controller never looks inside it,
/// it only checks that there is something to send back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkflowDefinition(Value);

impl WorkflowDefinition {
    pub fn new(document: Value) -> Self {
        Self(document)
    }

    /// Whether the document counts as present at all. `false`, `0` and `""`
    /// are treated like a missing definition; objects and arrays always count.
    pub fn is_present(&self) -> bool {
        match &self.0 {
            Value::Null => false,
            Value::Bool(flag) => *flag,
            Value::Number(number) => number.as_f64().map_or(true, |n| n != 0.0),
            Value::String(text) => !text.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        }
    }

    /// A definition is empty when it has no enumerable keys: null, scalars,
    /// and empty objects, arrays or strings.
    pub fn is_empty(&self) -> bool {
        match &self.0 {
            Value::Object(map) => map.is_empty(),
            Value::Array(items) => items.is_empty(),
            Value::String(text) => text.is_empty(),
            Value::Null | Value::Bool(_) | Value::Number(_) => true,
        }
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for WorkflowDefinition {
    fn from(document: Value) -> Self {
        Self(document)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkflowListResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub workflows: Vec<WorkflowSummary>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkflowDetailResponse {
    #[serde(default)]
    pub workflow: Option<WorkflowDefinition>,
}

impl WorkflowDetailResponse {
    pub fn into_definition(self) -> Option<WorkflowDefinition> {
        self.workflow.filter(WorkflowDefinition::is_present)
    }
}
