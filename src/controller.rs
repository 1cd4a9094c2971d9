use crate::{
    api::WorkflowApi,
    models::{download_filename, GenerationRequest, SelectOption, WorkflowDefinition},
    view::PageView,
};

pub const SELECT_PLACEHOLDER: &str = "Select a workflow";
pub const NO_WORKFLOWS: &str = "No workflows available";
pub const WORKFLOWS_ERROR: &str = "Error loading workflows";
pub const WORKFLOW_READY: &str = "This workflow is ready to use. Click Generate to create an image.";
pub const WORKFLOW_DETAIL_ERROR: &str = "Error loading workflow details. Please try again.";
pub const INVALID_WORKFLOW: &str = "Please select a valid workflow";
pub const GENERATE_LABEL: &str = "Generate Image";
pub const GENERATING_LABEL: &str = "Generating...";
pub const GENERATION_FAILED: &str = "Failed to generate image";
pub const SERVER_UNREACHABLE: &str = "Error communicating with the server. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListOutcome {
    Loaded(usize),
    Empty,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    Cleared,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Generated { image_path: String },
    NoWorkflow,
    Rejected { message: String },
    Failed,
}

/// Submit-in-progress state of the form. Acquiring it puts the submit button
/// into its busy look; dropping it restores the idle look on every exit path.
struct BusyGuard<'a, V: PageView> {
    view: &'a V,
}

impl<'a, V: PageView> BusyGuard<'a, V> {
    fn acquire(view: &'a V) -> Self {
        view.set_submit_enabled(false);
        view.set_spinner_visible(true);
        view.set_submit_label(GENERATING_LABEL);
        Self { view }
    }
}

impl<V: PageView> Drop for BusyGuard<'_, V> {
    fn drop(&mut self) {
        self.view.set_submit_enabled(true);
        self.view.set_spinner_visible(false);
        self.view.set_submit_label(GENERATE_LABEL);
    }
}

/// Drives the image generation page: workflow selector, generation form and
/// result view.
pub struct GenerationPageController<A, V> {
    api: A,
    view: V,
    workflow: Option<WorkflowDefinition>,
    result_path: Option<String>,
}

impl<A: WorkflowApi, V: PageView> GenerationPageController<A, V> {
    pub fn new(api: A, view: V) -> Self {
        Self {
            api,
            view,
            workflow: None,
            result_path: None,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn workflow(&self) -> Option<&WorkflowDefinition> {
        self.workflow.as_ref()
    }

    pub fn result_path(&self) -> Option<&str> {
        self.result_path.as_deref()
    }

    /// Fills the workflow selector. Runs once when the page is ready; a failure
    /// leaves a single error entry and is not retried.
    pub async fn load_workflows(&mut self) -> ListOutcome {
        match self.api.list_workflows().await {
            Ok(workflows) if workflows.is_empty() => {
                log::warn!("Server reported no workflows");
                self.view
                    .set_workflow_options(&[SelectOption::placeholder(NO_WORKFLOWS).disabled()]);
                ListOutcome::Empty
            }
            Ok(workflows) => {
                let options: Vec<SelectOption> =
                    std::iter::once(SelectOption::placeholder(SELECT_PLACEHOLDER))
                        .chain(
                            workflows
                                .iter()
                                .map(|workflow| SelectOption::new(&workflow.id, &workflow.name)),
                        )
                        .collect();
                self.view.set_workflow_options(&options);
                ListOutcome::Loaded(workflows.len())
            }
            Err(e) => {
                log::error!("❌ Error loading workflows: {}", e);
                self.view
                    .set_workflow_options(&[SelectOption::placeholder(WORKFLOWS_ERROR)]);
                ListOutcome::Failed
            }
        }
    }

    /// Handles a selector change. The empty value is the placeholder.
    pub async fn select_workflow(&mut self, workflow_id: &str) -> SelectOutcome {
        if workflow_id.is_empty() {
            self.workflow = None;
            self.view.set_form_visible(false);
            return SelectOutcome::Cleared;
        }

        match self.api.get_workflow(workflow_id).await {
            Ok(definition) => {
                log::info!("Workflow {} loaded", workflow_id);
                self.workflow = Some(definition);
                // no per-workflow parameter fields yet
                self.view.set_params_message(WORKFLOW_READY);
                self.view.set_form_visible(true);
                SelectOutcome::Loaded
            }
            Err(e) => {
                log::error!("❌ Error loading workflow details for {}: {}", workflow_id, e);
                self.view.alert(WORKFLOW_DETAIL_ERROR);
                SelectOutcome::Failed
            }
        }
    }

    /// Handles a form submission.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let workflow = match &self.workflow {
            Some(workflow) if !workflow.is_empty() => workflow.clone(),
            _ => {
                self.view.alert(INVALID_WORKFLOW);
                return SubmitOutcome::NoWorkflow;
            }
        };

        let _busy = BusyGuard::acquire(&self.view);
        let request = GenerationRequest { workflow };

        let result = match self.api.generate(&request).await {
            Ok(result) => result,
            Err(e) => {
                log::error!("❌ Error generating image: {}", e);
                self.view.alert(SERVER_UNREACHABLE);
                return SubmitOutcome::Failed;
            }
        };

        match result.first_image().map(str::to_string) {
            Some(image_path) => {
                log::info!("🎨 Image generated: {}", image_path);
                self.view.set_result_image(&image_path);
                self.view.set_result_visible(true);
                self.result_path = Some(image_path.clone());
                SubmitOutcome::Generated { image_path }
            }
            None => {
                let message = result
                    .error
                    .filter(|error| !error.is_empty())
                    .unwrap_or_else(|| GENERATION_FAILED.to_string());
                log::warn!("Generation rejected: {}", message);
                self.view.alert(&message);
                SubmitOutcome::Rejected { message }
            }
        }
    }

    /// Download button handler. Always targets the latest generated image.
    pub fn download(&self) -> bool {
        match &self.result_path {
            Some(path) => {
                self.view.trigger_download(path, download_filename(path));
                true
            }
            None => {
                log::debug!("Download requested before any image was generated");
                false
            }
        }
    }

    /// "New image" button handler. The selected workflow stays loaded.
    pub fn new_image(&mut self) {
        self.view.set_result_visible(false);
    }
}
