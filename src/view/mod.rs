pub mod console;
pub mod memory;

pub use console::ConsoleView;
pub use memory::{MemoryView, ViewState};

use crate::models::SelectOption;

/// Handles to the page elements the controller drives.
///
/// Methods take `&self`; implementations hold their element state behind
/// interior mutability, the way DOM handles do.
pub trait PageView: Send + Sync {
    /// Replaces every option of the workflow selector.
    fn set_workflow_options(&self, options: &[SelectOption]);

    fn set_form_visible(&self, visible: bool);

    /// Content of the workflow parameters area inside the form.
    fn set_params_message(&self, message: &str);

    fn set_submit_enabled(&self, enabled: bool);
    fn set_spinner_visible(&self, visible: bool);
    fn set_submit_label(&self, label: &str);

    fn set_result_image(&self, src: &str);
    fn set_result_visible(&self, visible: bool);

    /// Blocking user-facing message.
    fn alert(&self, message: &str);

    /// Starts a file download of `href`, proposing `filename` as the save name.
    fn trigger_download(&self, href: &str, filename: &str);
}

impl<V: PageView + ?Sized> PageView for std::sync::Arc<V> {
    fn set_workflow_options(&self, options: &[SelectOption]) {
        (**self).set_workflow_options(options)
    }
    fn set_form_visible(&self, visible: bool) {
        (**self).set_form_visible(visible)
    }
    fn set_params_message(&self, message: &str) {
        (**self).set_params_message(message)
    }
    fn set_submit_enabled(&self, enabled: bool) {
        (**self).set_submit_enabled(enabled)
    }
    fn set_spinner_visible(&self, visible: bool) {
        (**self).set_spinner_visible(visible)
    }
    fn set_submit_label(&self, label: &str) {
        (**self).set_submit_label(label)
    }
    fn set_result_image(&self, src: &str) {
        (**self).set_result_image(src)
    }
    fn set_result_visible(&self, visible: bool) {
        (**self).set_result_visible(visible)
    }
    fn alert(&self, message: &str) {
        (**self).alert(message)
    }
    fn trigger_download(&self, href: &str, filename: &str) {
        (**self).trigger_download(href, filename)
    }
}
