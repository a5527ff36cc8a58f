//! Application chrome the router drives between views

use super::route::RoutePath;
use serde::{Deserialize, Serialize};

/// What the user can do from an error panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecoveryAction {
    /// Reload the page that failed
    Reload { path: RoutePath },
    /// Go back to the default route
    GoHome { path: RoutePath },
}

/// Generic error display replacing a view that failed to render
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPanel {
    /// Path whose view failed
    pub path: RoutePath,
    pub title: String,
    /// Message of the underlying error
    pub message: String,
    pub actions: Vec<RecoveryAction>,
}

impl ErrorPanel {
    pub fn new(path: RoutePath, message: impl Into<String>, home: RoutePath) -> Self {
        Self {
            title: "Something went wrong".to_string(),
            message: message.into(),
            actions: vec![
                RecoveryAction::Reload { path: path.clone() },
                RecoveryAction::GoHome { path: home },
            ],
            path,
        }
    }
}

/// Global navigation chrome: loading transition, error panel, body state
pub trait Shell: Send + Sync {
    /// Start the loading transition towards `path`
    fn begin_transition(&self, path: &RoutePath);

    /// Clear the loading transition
    fn end_transition(&self);

    /// Replace the view container with an error panel
    fn show_error(&self, panel: &ErrorPanel);

    /// Strip modal classes and scroll locks left on the document body
    fn reset_modal_state(&self) {}
}

/// Shell that draws nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NullShell;

impl Shell for NullShell {
    fn begin_transition(&self, _path: &RoutePath) {}

    fn end_transition(&self) {}

    fn show_error(&self, _panel: &ErrorPanel) {}
}
