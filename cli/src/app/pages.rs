//! Placeholder pages for the application routes
//!
//! Each page writes a title and a short summary into the viewport. Pages
//! that open overlays register them as transients so the router tears
//! them down on the next navigation.

use super::viewport::Viewport;
use async_trait::async_trait;
use colored::Colorize;
use nivoxar_core::router::{View, ViewContext};

/// Paths of the application pages, in navbar order
pub const APP_ROUTES: &[&str] = &[
    "/dashboard",
    "/calendar",
    "/categories",
    "/shared-tasks",
    "/analytics",
    "/profile",
];

/// A page that renders static text and optionally opens an overlay
pub struct PageView {
    viewport: Viewport,
    title: &'static str,
    summary: &'static str,
    overlay: Option<&'static str>,
}

impl PageView {
    pub fn new(viewport: Viewport, title: &'static str, summary: &'static str) -> Self {
        Self {
            viewport,
            title,
            summary,
            overlay: None,
        }
    }

    /// Open `label` on top of the page every time it renders
    pub fn with_overlay(mut self, label: &'static str) -> Self {
        self.overlay = Some(label);
        self
    }
}

#[async_trait]
impl View for PageView {
    async fn render(&self, cx: &ViewContext) -> anyhow::Result<()> {
        let mut lines = vec![self.title.bold().to_string(), self.summary.to_string()];
        if let Some((_, query)) = cx.path().as_str().split_once('?') {
            lines.push(format!("filters: {}", query).dimmed().to_string());
        }
        self.viewport.mount(lines);

        if let Some(label) = self.overlay {
            self.viewport.open_overlay(label);
            let viewport = self.viewport.clone();
            cx.transients()
                .track(label, move || viewport.close_overlay(label));
        }

        Ok(())
    }
}

/// Build the views for every route, keyed by path
pub fn pages(viewport: &Viewport, login_route: &str) -> Vec<(String, PageView)> {
    let login = PageView::new(
        viewport.clone(),
        "Sign in to Nivoxar",
        "Type `login` to start a session.",
    );

    let app_pages = vec![
        (
            "/dashboard",
            PageView::new(
                viewport.clone(),
                "Dashboard",
                "Today's tasks, overdue items and recent activity.",
            )
            .with_overlay("notification-panel"),
        ),
        (
            "/calendar",
            PageView::new(
                viewport.clone(),
                "Calendar",
                "Month grid with tasks placed on their due dates.",
            )
            .with_overlay("day-popup"),
        ),
        (
            "/categories",
            PageView::new(
                viewport.clone(),
                "Categories",
                "Group tasks by color-coded category.",
            ),
        ),
        (
            "/shared-tasks",
            PageView::new(
                viewport.clone(),
                "Shared tasks",
                "Tasks friends have shared with you.",
            ),
        ),
        (
            "/analytics",
            PageView::new(
                viewport.clone(),
                "Analytics",
                "Completion rate and productivity trends.",
            ),
        ),
        (
            "/profile",
            PageView::new(
                viewport.clone(),
                "Profile",
                "Account details and notification preferences.",
            ),
        ),
    ];

    let mut all = vec![(login_route.to_string(), login)];
    all.extend(
        app_pages
            .into_iter()
            .map(|(path, page)| (path.to_string(), page)),
    );
    all
}
