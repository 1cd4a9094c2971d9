use crate::{
    error::Result,
    models::{GenerationRequest, GenerationResult, WorkflowDefinition, WorkflowSummary},
};
use async_trait::async_trait;

/// Server endpoints consumed by the generation page.
#[async_trait]
pub trait WorkflowApi: Send + Sync {
    /// `GET /api/workflows`, in server order.
    async fn list_workflows(&self) -> Result<Vec<WorkflowSummary>>;

    /// `GET /api/workflows/{id}`. A response without a `workflow` field is an error.
    async fn get_workflow(&self, id: &str) -> Result<WorkflowDefinition>;

    /// `POST /api/image-generation`. Business failures come back as `Ok`
    /// with `success == false`; only transport and parse failures are `Err`.
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult>;

    async fn health_check(&self) -> Result<bool>;
}
