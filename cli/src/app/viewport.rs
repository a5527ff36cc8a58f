//! Text viewport standing in for the browser document

use colored::Colorize;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Screen {
    /// Active link in the navbar, `None` when the navbar is hidden
    navbar: Option<String>,
    /// Page content rendered by the current view
    content: Vec<String>,
    /// Overlays drawn on top of the content
    overlays: Vec<String>,
    /// Body class set while an overlay holds the page
    modal_open: bool,
    loading: Option<String>,
}

/// Shared view container; clones draw on the same screen
#[derive(Debug, Clone, Default)]
pub struct Viewport {
    screen: Arc<Mutex<Screen>>,
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the page content
    pub fn mount(&self, lines: Vec<String>) {
        self.lock().content = lines;
    }

    pub fn open_overlay(&self, label: impl Into<String>) {
        let mut screen = self.lock();
        screen.overlays.push(label.into());
        screen.modal_open = true;
    }

    pub fn close_overlay(&self, label: &str) {
        let mut screen = self.lock();
        screen.overlays.retain(|o| o != label);
    }

    pub fn unlock_body(&self) {
        self.lock().modal_open = false;
    }

    pub fn set_navbar(&self, active: Option<String>) {
        self.lock().navbar = active;
    }

    pub fn set_loading(&self, target: Option<String>) {
        self.lock().loading = target;
    }

    pub fn content(&self) -> Vec<String> {
        self.lock().content.clone()
    }

    pub fn overlays(&self) -> Vec<String> {
        self.lock().overlays.clone()
    }

    pub fn navbar(&self) -> Option<String> {
        self.lock().navbar.clone()
    }

    pub fn is_modal_open(&self) -> bool {
        self.lock().modal_open
    }

    pub fn loading(&self) -> Option<String> {
        self.lock().loading.clone()
    }

    /// Draw the screen for the terminal
    pub fn render(&self, routes: &[&str]) -> String {
        let screen = self.lock();
        let mut out = String::new();

        if let Some(active) = &screen.navbar {
            let links: Vec<String> = routes
                .iter()
                .map(|route| {
                    if *route == active.as_str() {
                        format!("[{}]", route).bold().cyan().to_string()
                    } else {
                        route.dimmed().to_string()
                    }
                })
                .collect();
            out.push_str(&links.join(" "));
            out.push('\n');
        }

        for line in &screen.content {
            out.push_str(line);
            out.push('\n');
        }

        for overlay in &screen.overlays {
            out.push_str(&format!("  ┌ {} ┐\n", overlay).yellow().to_string());
        }

        out
    }

    fn lock(&self) -> MutexGuard<'_, Screen> {
        self.screen
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlays_and_modal_state() {
        let viewport = Viewport::new();
        viewport.open_overlay("day-popup");
        assert!(viewport.is_modal_open());

        viewport.close_overlay("day-popup");
        assert!(viewport.overlays().is_empty());
        // Closing an overlay does not unlock the body on its own
        assert!(viewport.is_modal_open());

        viewport.unlock_body();
        assert!(!viewport.is_modal_open());
    }

    #[test]
    fn test_render_hides_navbar_when_unset() {
        colored::control::set_override(false);
        let viewport = Viewport::new();
        viewport.mount(vec!["Sign in".to_string()]);

        assert_eq!(viewport.render(&["/dashboard"]), "Sign in\n");

        viewport.set_navbar(Some("/dashboard".to_string()));
        let drawn = viewport.render(&["/dashboard", "/calendar"]);
        assert!(drawn.starts_with("[/dashboard] /calendar\n"), "{}", drawn);
    }
}
