use std::sync::{Mutex, MutexGuard};

use super::PageView;
use crate::models::SelectOption;

/// Snapshot of every element a [`MemoryView`] tracks.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub options: Vec<SelectOption>,
    pub form_visible: bool,
    pub params_message: Option<String>,
    pub submit_enabled: bool,
    pub spinner_visible: bool,
    pub submit_label: String,
    pub result_image: Option<String>,
    pub result_visible: bool,
    pub alerts: Vec<String>,
    pub downloads: Vec<(String, String)>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            options: vec![SelectOption::placeholder("Loading workflows...")],
            form_visible: false,
            params_message: None,
            submit_enabled: true,
            spinner_visible: false,
            submit_label: crate::controller::GENERATE_LABEL.to_string(),
            result_image: None,
            result_visible: false,
            alerts: Vec::new(),
            downloads: Vec::new(),
        }
    }
}

/// Headless page: records element state instead of rendering it.
#[derive(Debug, Default)]
pub struct MemoryView {
    state: Mutex<ViewState>,
}

impl MemoryView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> ViewState {
        self.lock().clone()
    }

    pub fn take_alerts(&self) -> Vec<String> {
        std::mem::take(&mut self.lock().alerts)
    }

    fn lock(&self) -> MutexGuard<'_, ViewState> {
        // a poisoned view still holds the last rendered state
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl PageView for MemoryView {
    fn set_workflow_options(&self, options: &[SelectOption]) {
        self.lock().options = options.to_vec();
    }

    fn set_form_visible(&self, visible: bool) {
        self.lock().form_visible = visible;
    }

    fn set_params_message(&self, message: &str) {
        self.lock().params_message = Some(message.to_string());
    }

    fn set_submit_enabled(&self, enabled: bool) {
        self.lock().submit_enabled = enabled;
    }

    fn set_spinner_visible(&self, visible: bool) {
        self.lock().spinner_visible = visible;
    }

    fn set_submit_label(&self, label: &str) {
        self.lock().submit_label = label.to_string();
    }

    fn set_result_image(&self, src: &str) {
        self.lock().result_image = Some(src.to_string());
    }

    fn set_result_visible(&self, visible: bool) {
        self.lock().result_visible = visible;
    }

    fn alert(&self, message: &str) {
        self.lock().alerts.push(message.to_string());
    }

    fn trigger_download(&self, href: &str, filename: &str) {
        self.lock()
            .downloads
            .push((href.to_string(), filename.to_string()));
    }
}
