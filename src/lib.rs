//! Page controller for workflow-based image generation.
//!
//! [`GenerationPageController`] lists the workflows a server offers, loads the
//! one the user picks, submits it for generation and hands the resulting
//! image to a [`PageView`]. The server is reached through [`WorkflowApi`];
//! [`HttpWorkflowApi`] talks to the JSON endpoints under `/api`.

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod logger;
pub mod models;
pub mod view;

pub use api::{HttpWorkflowApi, WorkflowApi};
pub use config::StudioConfig;
pub use controller::{GenerationPageController, ListOutcome, SelectOutcome, SubmitOutcome};
pub use error::{Result, StudioError};
pub use models::*;
pub use view::{ConsoleView, MemoryView, PageView};
