//! Application bootstrap: router, pages, hooks and session wired together

pub mod pages;
pub mod session;
pub mod viewport;

use crate::output::TerminalShell;
use anyhow::{Context, Result};
use nivoxar_core::router::Subscription;
use nivoxar_core::{
    MemoryHistory, NavigationJournal, NavigationOutcome, RoutePath, Router, RouterSettings,
};
use pages::pages;
use session::Session;
use std::sync::Arc;
use tracing::warn;
use viewport::Viewport;

/// The running application
pub struct App {
    pub router: Router,
    pub history: Arc<MemoryHistory>,
    pub viewport: Viewport,
    pub session: Arc<Session>,
    _hooks: Vec<Subscription>,
}

impl App {
    /// Construct the router and register every page and hook
    pub fn build(
        settings: RouterSettings,
        session: Arc<Session>,
        journal: Option<Arc<NavigationJournal>>,
    ) -> Self {
        let viewport = Viewport::new();
        let history = Arc::new(MemoryHistory::new(settings.root_path.as_str()));
        let login_route = settings.login_route.clone();

        let mut builder = Router::builder(settings)
            .history(history.clone())
            .shell(Arc::new(TerminalShell::new(viewport.clone())));
        if let Some(journal) = journal {
            builder = builder.journal(journal);
        }
        for (path, page) in pages(&viewport, &login_route) {
            builder = builder.route(path, page);
        }
        let router = builder.build();

        let hooks = vec![
            auth_guard(&router, session.clone()),
            navbar(&router, viewport.clone()),
        ];

        Self {
            router,
            history,
            viewport,
            session,
            _hooks: hooks,
        }
    }

    /// Show the first page, honoring the session
    pub async fn boot(&self) -> Result<NavigationOutcome> {
        self.router
            .start(self.session.as_ref())
            .await
            .context("Failed to start router")
    }
}

/// Keep signed-out sessions on the login page
fn auth_guard(router: &Router, session: Arc<Session>) -> Subscription {
    let login = router.settings().login_route.clone();
    router.before_navigate(move |path: RoutePath| {
        let allowed = session.is_signed_in() || path.route_key() == login;
        async move {
            if !allowed {
                warn!("Sign in to open {}", path);
            }
            allowed
        }
    })
}

/// Hide the navbar on the login page, otherwise highlight the active link
fn navbar(router: &Router, viewport: Viewport) -> Subscription {
    let login = router.settings().login_route.clone();
    router.after_navigate(move |path: RoutePath| {
        let active = if path.route_key() == login {
            None
        } else {
            Some(path.route_key().to_string())
        };
        viewport.set_navbar(active);
        async {}
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(signed_in: bool) -> App {
        App::build(
            RouterSettings::instant(),
            Arc::new(Session::new(signed_in)),
            None,
        )
    }

    #[tokio::test]
    async fn test_anonymous_boot_lands_on_login() {
        let app = app(false);
        app.boot().await.unwrap();

        assert_eq!(app.router.current_route(), Some(RoutePath::from("/login")));
        assert_eq!(app.viewport.navbar(), None);
    }

    #[tokio::test]
    async fn test_signed_in_boot_lands_on_dashboard() {
        let app = app(true);
        app.boot().await.unwrap();

        assert_eq!(app.router.current_route(), Some(RoutePath::from("/dashboard")));
        assert_eq!(app.viewport.navbar(), Some("/dashboard".to_string()));
        assert_eq!(app.viewport.overlays(), vec!["notification-panel"]);
    }

    #[tokio::test]
    async fn test_signed_out_navigation_is_vetoed() {
        let app = app(false);
        app.boot().await.unwrap();

        let outcome = app.router.navigate("/analytics", false).await.unwrap();
        assert_eq!(outcome, NavigationOutcome::Cancelled { path: "/analytics".into() });
        assert_eq!(app.router.current_route(), Some(RoutePath::from("/login")));
    }

    #[tokio::test]
    async fn test_overlays_are_torn_down_between_pages() {
        let app = app(true);
        app.boot().await.unwrap();
        app.router.navigate("/calendar", false).await.unwrap();
        assert_eq!(app.viewport.overlays(), vec!["day-popup"]);
        assert!(app.viewport.is_modal_open());

        app.router.navigate("/profile", false).await.unwrap();
        assert!(app.viewport.overlays().is_empty());
        assert!(!app.viewport.is_modal_open());
        assert_eq!(app.viewport.navbar(), Some("/profile".to_string()));
    }
}
