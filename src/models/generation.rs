use serde::{Deserialize, Serialize};

use super::common::{null_as_empty, null_as_false};
use super::workflow::WorkflowDefinition;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub workflow: WorkflowDefinition,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    #[serde(default, deserialize_with = "null_as_false")]
    pub success: bool,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub image_paths: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerationResult {
    /// The image to show, if the server reported success with at least one path.
    pub fn first_image(&self) -> Option<&str> {
        if !self.success {
            return None;
        }
        self.image_paths.first().map(String::as_str)
    }
}

/// Suggested save name for a result path: everything after the last `/`.
pub fn download_filename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
