pub mod http_client;
pub mod traits;

pub use http_client::HttpWorkflowApi;
pub use traits::WorkflowApi;
