use colored::*;
use std::sync::Mutex;

use super::PageView;
use crate::models::SelectOption;

/// A download the console host still has to carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub href: String,
    pub filename: String,
}

/// Renders page changes as terminal output.
pub struct ConsoleView {
    show_colors: bool,
    pending_download: Mutex<Option<DownloadRequest>>,
}

impl ConsoleView {
    pub fn new(show_colors: bool) -> Self {
        Self {
            show_colors,
            pending_download: Mutex::new(None),
        }
    }

    pub fn take_download(&self) -> Option<DownloadRequest> {
        self.pending_download.lock().ok().and_then(|mut slot| slot.take())
    }

    fn line(&self, tag: &str, text: &str, color: Color) {
        if self.show_colors {
            println!("{} {}", format!("[{}]", tag).color(color).bold(), text);
        } else {
            println!("[{}] {}", tag, text);
        }
    }
}

impl PageView for ConsoleView {
    fn set_workflow_options(&self, options: &[SelectOption]) {
        self.line("select", "workflows:", Color::Cyan);
        for option in options {
            let marker = if option.disabled { " (disabled)" } else { "" };
            if option.value.is_empty() {
                println!("    -- {}{}", option.label, marker);
            } else {
                println!("    {:<24} {}{}", option.value, option.label, marker);
            }
        }
    }

    fn set_form_visible(&self, visible: bool) {
        if visible {
            self.line("form", "generation form ready", Color::Cyan);
        }
    }

    fn set_params_message(&self, message: &str) {
        self.line("form", message, Color::White);
    }

    fn set_submit_enabled(&self, _enabled: bool) {}

    fn set_spinner_visible(&self, _visible: bool) {}

    fn set_submit_label(&self, label: &str) {
        self.line("submit", label, Color::Yellow);
    }

    fn set_result_image(&self, src: &str) {
        self.line("result", src, Color::Green);
    }

    fn set_result_visible(&self, _visible: bool) {}

    fn alert(&self, message: &str) {
        self.line("alert", message, Color::Red);
    }

    fn trigger_download(&self, href: &str, filename: &str) {
        self.line("download", filename, Color::Magenta);
        if let Ok(mut slot) = self.pending_download.lock() {
            *slot = Some(DownloadRequest {
                href: href.to_string(),
                filename: filename.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_is_taken_once() {
        let view = ConsoleView::new(false);
        assert!(view.take_download().is_none());

        view.trigger_download("/generated/a.png", "a.png");
        view.trigger_download("/generated/b.png", "b.png");

        assert_eq!(
            view.take_download(),
            Some(DownloadRequest {
                href: "/generated/b.png".to_string(),
                filename: "b.png".to_string(),
            })
        );
        assert!(view.take_download().is_none());
    }
}
