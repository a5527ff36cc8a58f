//! Terminal implementation of the router's application chrome

use crate::app::viewport::Viewport;
use colored::Colorize;
use nivoxar_core::router::{ErrorPanel, RecoveryAction, RoutePath, Shell};
use tracing::debug;

/// Draws loading state, error panels and body state into the viewport
pub struct TerminalShell {
    viewport: Viewport,
}

impl TerminalShell {
    pub fn new(viewport: Viewport) -> Self {
        Self { viewport }
    }
}

impl Shell for TerminalShell {
    fn begin_transition(&self, path: &RoutePath) {
        debug!("Loading {}", path);
        self.viewport.set_loading(Some(path.to_string()));
    }

    fn end_transition(&self) {
        self.viewport.set_loading(None);
    }

    fn show_error(&self, panel: &ErrorPanel) {
        let mut lines = vec![
            panel.title.red().bold().to_string(),
            panel.message.clone(),
        ];
        for action in &panel.actions {
            let hint = match action {
                RecoveryAction::Reload { path } => format!("reload: go {}", path),
                RecoveryAction::GoHome { path } => format!("home:   go {}", path),
            };
            lines.push(hint.dimmed().to_string());
        }
        self.viewport.mount(lines);
    }

    fn reset_modal_state(&self) {
        self.viewport.unlock_body();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_panel_replaces_content() {
        colored::control::set_override(false);
        let viewport = Viewport::new();
        viewport.mount(vec!["Calendar".to_string()]);
        let shell = TerminalShell::new(viewport.clone());

        shell.show_error(&ErrorPanel::new(
            "/calendar".into(),
            "tasks unavailable",
            "/dashboard".into(),
        ));

        let content = viewport.content();
        assert_eq!(content[0], "Something went wrong");
        assert_eq!(content[1], "tasks unavailable");
        assert_eq!(content[2], "reload: go /calendar");
        assert_eq!(content[3], "home:   go /dashboard");
    }

    #[test]
    fn test_transition_toggles_loading() {
        let viewport = Viewport::new();
        let shell = TerminalShell::new(viewport.clone());

        shell.begin_transition(&"/analytics".into());
        assert_eq!(viewport.loading(), Some("/analytics".to_string()));
        shell.end_transition();
        assert_eq!(viewport.loading(), None);
    }
}
