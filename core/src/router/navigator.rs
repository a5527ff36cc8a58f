//! Navigation state machine
//!
//! [`Router`] turns programmatic navigation requests, intercepted link
//! clicks and browser back/forward events into exactly one rendered view.
//! At most one navigation is in flight at a time; requests arriving while
//! the router is busy are dropped, not queued.

use super::gate::AuthGate;
use super::history::{History, MemoryHistory};
use super::hooks::{AfterHook, BeforeHook, HookList, Subscription};
use super::link::{resolve_against, LinkClick};
use super::route::{RoutePath, RouteTable};
use super::shell::{ErrorPanel, NullShell, Shell};
use super::transient::TransientRegistry;
use super::view::{FnView, View, ViewContext};
use crate::config::RouterSettings;
use crate::error::{Result, RouterError};
use crate::journal::{EntryType, NavigationJournal};
use futures::FutureExt;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Whether a navigation is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationPhase {
    Idle,
    Navigating,
}

/// How a navigation request ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The view rendered and after-hooks ran
    Completed { path: RoutePath },
    /// The requested path was unknown; the default route was shown instead
    Redirected {
        requested: RoutePath,
        path: RoutePath,
    },
    /// The view failed and an error panel replaced it
    Failed { path: RoutePath, message: String },
    /// A before-hook vetoed the navigation
    Cancelled { path: RoutePath },
    /// Another navigation was in flight; this one was dropped
    Busy { path: RoutePath },
}

impl NavigationOutcome {
    /// Path the user ends up looking at, if the navigation went ahead
    pub fn rendered_path(&self) -> Option<&RoutePath> {
        match self {
            NavigationOutcome::Completed { path }
            | NavigationOutcome::Redirected { path, .. }
            | NavigationOutcome::Failed { path, .. } => Some(path),
            NavigationOutcome::Cancelled { .. } | NavigationOutcome::Busy { .. } => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, NavigationOutcome::Completed { .. })
    }
}

/// Result of rendering a single route
#[derive(Debug, Clone, PartialEq, Eq)]
enum RenderOutcome {
    Rendered,
    Failed(String),
    NotFound,
}

enum Pipeline {
    Finished(NavigationOutcome),
    NotFound,
}

#[derive(Debug)]
struct NavState {
    phase: NavigationPhase,
    in_flight: Option<RoutePath>,
    current_route: Option<RoutePath>,
    started: bool,
}

struct Inner {
    settings: RouterSettings,
    routes: RwLock<RouteTable>,
    history: Arc<dyn History>,
    shell: Arc<dyn Shell>,
    transients: TransientRegistry,
    before: HookList<BeforeHook>,
    after: HookList<AfterHook>,
    state: Mutex<NavState>,
    journal: Option<Arc<NavigationJournal>>,
}

/// Holds the router in [`NavigationPhase::Navigating`] until dropped
///
/// Dropping a navigation future half way also lands here, so the router
/// can never get stuck busy because a caller lost interest.
struct NavigationGuard<'a> {
    inner: &'a Inner,
}

impl Drop for NavigationGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.inner.lock_state();
        state.phase = NavigationPhase::Idle;
        state.in_flight = None;
    }
}

impl Inner {
    fn lock_state(&self) -> MutexGuard<'_, NavState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn routes(&self) -> std::sync::RwLockReadGuard<'_, RouteTable> {
        self.routes
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Enter the navigating phase, or report what is already in flight
    fn begin(&self, path: &RoutePath) -> std::result::Result<NavigationGuard<'_>, Option<RoutePath>> {
        let mut state = self.lock_state();
        if state.phase == NavigationPhase::Navigating {
            return Err(state.in_flight.clone());
        }
        state.phase = NavigationPhase::Navigating;
        state.in_flight = Some(path.clone());
        Ok(NavigationGuard { inner: self })
    }
}

/// Single-page application router
///
/// Cheap to clone; every clone drives the same navigation state. Construct
/// one with [`RouterBuilder`] when the app boots and hand clones to
/// whatever needs to navigate.
#[derive(Clone)]
pub struct Router {
    inner: Arc<Inner>,
}

impl Router {
    /// Router with in-memory history and no chrome
    pub fn new(settings: RouterSettings) -> Self {
        RouterBuilder::new(settings).build()
    }

    pub fn builder(settings: RouterSettings) -> RouterBuilder {
        RouterBuilder::new(settings)
    }

    /// Register the view for a path; a later registration for the same path wins
    pub fn register(&self, path: impl Into<RoutePath>, view: impl View + 'static) {
        self.register_arc(path.into(), Arc::new(view));
    }

    /// Register an async closure as the view for a path
    pub fn register_fn<F, Fut>(&self, path: impl Into<RoutePath>, render: F)
    where
        F: Fn(ViewContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.register(path, FnView::new(render));
    }

    fn register_arc(&self, path: RoutePath, view: Arc<dyn View>) {
        if self.inner.lock_state().started {
            warn!("Route '{}' registered after the router started", path);
        }

        let replaced = self
            .inner
            .routes
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(&path, view);

        if replaced.is_some() {
            debug!("Route '{}' re-registered, previous view replaced", path);
        }
    }

    /// Run `hook` before every navigation; returning `false` cancels it
    pub fn before_navigate<F, Fut>(&self, hook: F) -> Subscription
    where
        F: Fn(RoutePath) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        let hook: BeforeHook = Arc::new(move |path| hook(path).boxed());
        self.inner.before.push(hook)
    }

    /// Run `hook` after every navigation that rendered a view
    pub fn after_navigate<F, Fut>(&self, hook: F) -> Subscription
    where
        F: Fn(RoutePath) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let hook: AfterHook = Arc::new(move |path| hook(path).boxed());
        self.inner.after.push(hook)
    }

    /// Navigate to `path`, pushing a history entry or replacing the current one
    pub async fn navigate(
        &self,
        path: impl Into<RoutePath>,
        replace: bool,
    ) -> Result<NavigationOutcome> {
        let requested = path.into();
        let Some(guard) = self.acquire(&requested).await else {
            return Ok(NavigationOutcome::Busy { path: requested });
        };

        match self.run_pipeline(&guard, requested.clone(), replace).await? {
            Pipeline::Finished(outcome) => Ok(outcome),
            // The fallback runs under the same guard, so no other request can land first
            Pipeline::NotFound => self.redirect_to_default(&guard, requested).await,
        }
    }

    /// Enter the navigating phase, or record the request as dropped
    async fn acquire(&self, path: &RoutePath) -> Option<NavigationGuard<'_>> {
        match self.inner.begin(path) {
            Ok(guard) => Some(guard),
            Err(in_flight) => {
                debug!(
                    "Navigation to '{}' dropped, '{}' already in progress",
                    path,
                    in_flight.as_ref().map(|p| p.as_str()).unwrap_or("?")
                );
                self.record(EntryType::NavigationDropped {
                    path: path.to_string(),
                    in_flight: in_flight.map(|p| p.to_string()),
                })
                .await;
                None
            }
        }
    }

    async fn run_pipeline(
        &self,
        _guard: &NavigationGuard<'_>,
        path: RoutePath,
        replace: bool,
    ) -> Result<Pipeline> {
        let inner = &*self.inner;

        let started_at = Instant::now();
        debug!("Navigating to '{}' (replace: {})", path, replace);
        self.record(EntryType::NavigationStarted {
            path: path.to_string(),
            replace,
        })
        .await;

        for (index, hook) in inner.before.snapshot().into_iter().enumerate() {
            if !hook(path.clone()).await {
                debug!("Navigation to '{}' cancelled by before-hook #{}", path, index);
                self.record(EntryType::NavigationCancelled {
                    path: path.to_string(),
                    hook_index: index,
                })
                .await;
                return Ok(Pipeline::Finished(NavigationOutcome::Cancelled { path }));
            }
        }

        inner.shell.begin_transition(&path);

        let pushed = if replace {
            inner.history.replace(&path)
        } else {
            inner.history.push(&path)
        };
        if let Err(e) = pushed {
            inner.shell.end_transition();
            return Err(e);
        }

        pause(inner.settings.exit_delay()).await;
        let rendered = self.render_view(&path).await;
        pause(inner.settings.settle_delay()).await;
        inner.shell.end_transition();

        let outcome = match rendered {
            RenderOutcome::Rendered => NavigationOutcome::Completed { path: path.clone() },
            RenderOutcome::Failed(message) => NavigationOutcome::Failed {
                path: path.clone(),
                message,
            },
            RenderOutcome::NotFound => return Ok(Pipeline::NotFound),
        };

        for hook in inner.after.snapshot() {
            hook(path.clone()).await;
        }

        let duration_ms = elapsed_ms(started_at);
        info!("Navigated to '{}' in {} ms", path, duration_ms);
        self.record(EntryType::NavigationCompleted {
            path: path.to_string(),
            duration_ms,
        })
        .await;

        Ok(Pipeline::Finished(outcome))
    }

    async fn redirect_to_default(
        &self,
        guard: &NavigationGuard<'_>,
        requested: RoutePath,
    ) -> Result<NavigationOutcome> {
        let default = RoutePath::from(self.inner.settings.default_route.as_str());
        if !self.inner.routes().contains(&default) {
            error!("Default route '{}' is not registered", default);
            return Err(RouterError::DefaultRouteMissing(default.to_string()).into());
        }

        warn!("No route registered for '{}', redirecting to '{}'", requested, default);
        self.record(EntryType::Redirected {
            from: requested.to_string(),
            to: default.to_string(),
        })
        .await;

        match self.run_pipeline(guard, default.clone(), true).await? {
            Pipeline::Finished(NavigationOutcome::Completed { path }) => {
                Ok(NavigationOutcome::Redirected { requested, path })
            }
            Pipeline::Finished(outcome) => Ok(outcome),
            Pipeline::NotFound => Err(RouterError::DefaultRouteMissing(default.to_string()).into()),
        }
    }

    /// Render the view for `path` without touching history or hooks
    ///
    /// Unknown paths are redirected to the default route.
    pub async fn render_route(&self, path: impl Into<RoutePath>) -> Result<NavigationOutcome> {
        let path = path.into();
        match self.render_view(&path).await {
            RenderOutcome::Rendered => Ok(NavigationOutcome::Completed { path }),
            RenderOutcome::Failed(message) => Ok(NavigationOutcome::Failed { path, message }),
            RenderOutcome::NotFound => {
                let Some(guard) = self.acquire(&path).await else {
                    return Ok(NavigationOutcome::Busy { path });
                };
                self.redirect_to_default(&guard, path).await
            }
        }
    }

    async fn render_view(&self, path: &RoutePath) -> RenderOutcome {
        let inner = &*self.inner;
        inner.lock_state().current_route = Some(path.clone());

        self.cleanup().await;

        let Some(view) = inner.routes().resolve(path) else {
            return RenderOutcome::NotFound;
        };

        let started_at = Instant::now();
        let cx = ViewContext::new(path.clone(), inner.transients.clone());
        let attempt = AssertUnwindSafe(view.render(&cx)).catch_unwind();

        let result = match inner.settings.view_timeout() {
            Some(limit) => match tokio::time::timeout(limit, attempt).await {
                Ok(result) => result,
                Err(_) => Ok(Err(anyhow::anyhow!(
                    "View did not finish rendering within {} ms",
                    limit.as_millis()
                ))),
            },
            None => attempt.await,
        };

        let failure = match result {
            Ok(Ok(())) => None,
            Ok(Err(e)) => Some(format!("{:#}", e)),
            Err(panic) => Some(panic_message(panic)),
        };

        match failure {
            None => {
                let duration_ms = elapsed_ms(started_at);
                debug!("Rendered '{}' in {} ms", path, duration_ms);
                self.record(EntryType::ViewRendered {
                    path: path.to_string(),
                    duration_ms,
                })
                .await;
                RenderOutcome::Rendered
            }
            Some(message) => {
                error!("View for '{}' failed: {}", path, message);
                let home = RoutePath::from(inner.settings.default_route.as_str());
                inner
                    .shell
                    .show_error(&ErrorPanel::new(path.clone(), message.clone(), home));
                self.record(EntryType::ViewFailed {
                    path: path.to_string(),
                    error: message.clone(),
                })
                .await;
                RenderOutcome::Failed(message)
            }
        }
    }

    /// Tear down transient UI left by the previous view
    ///
    /// Returns how many tracked elements were disposed.
    pub async fn cleanup(&self) -> usize {
        let count = self.inner.transients.sweep();
        self.inner.shell.reset_modal_state();

        if count > 0 {
            debug!("Swept {} transient element(s)", count);
            self.record(EntryType::TransientsSwept { count }).await;
        }
        count
    }

    /// Re-render after the browser moved back or forward
    pub async fn handle_pop_state(&self) -> Result<NavigationOutcome> {
        let path = self.inner.history.current_path();
        debug!("Pop state to '{}'", path);
        self.record(EntryType::PopState {
            path: path.to_string(),
        })
        .await;
        self.render_route(path).await
    }

    /// Route an anchor click through the router if it points inside the app
    ///
    /// Returns `None` when the click was left to the browser.
    pub async fn handle_link_click(
        &self,
        click: &mut LinkClick,
    ) -> Result<Option<NavigationOutcome>> {
        let Some(path) = click.internal_path() else {
            return Ok(None);
        };
        click.prevent_default();

        let path = resolve_against(&self.inner.history.current_path(), path);
        self.navigate(path, false).await.map(Some)
    }

    /// Show the route for the current location when the app starts
    pub async fn init(&self) -> Result<NavigationOutcome> {
        self.inner.lock_state().started = true;

        let current = self.inner.history.current_path();
        if current.route_key() == self.inner.settings.root_path {
            let default = self.inner.settings.default_route.clone();
            self.navigate(default, true).await
        } else {
            self.render_route(current).await
        }
    }

    /// Start through an auth gate
    ///
    /// Anonymous sessions land on the login route; signed-in sessions
    /// sitting on the login route move on to the default route.
    pub async fn start(&self, gate: &dyn AuthGate) -> Result<NavigationOutcome> {
        let settings = &self.inner.settings;
        let current = self.inner.history.current_path();

        if !gate.is_authenticated().await {
            let login = RoutePath::from(settings.login_route.as_str());
            if !self.inner.routes().contains(&login) {
                return Err(RouterError::LoginRouteMissing(login.to_string()).into());
            }
            self.inner.lock_state().started = true;
            info!("No session, showing '{}'", login);
            return self.navigate(login, true).await;
        }

        if current.route_key() == settings.login_route {
            self.inner.lock_state().started = true;
            let default = settings.default_route.clone();
            return self.navigate(default, true).await;
        }

        self.init().await
    }

    /// Path most recently handed to a view
    pub fn current_route(&self) -> Option<RoutePath> {
        self.inner.lock_state().current_route.clone()
    }

    pub fn phase(&self) -> NavigationPhase {
        self.inner.lock_state().phase
    }

    pub fn is_navigating(&self) -> bool {
        self.phase() == NavigationPhase::Navigating
    }

    pub fn settings(&self) -> &RouterSettings {
        &self.inner.settings
    }

    pub fn transients(&self) -> &TransientRegistry {
        &self.inner.transients
    }

    pub fn history(&self) -> Arc<dyn History> {
        self.inner.history.clone()
    }

    pub fn journal(&self) -> Option<Arc<NavigationJournal>> {
        self.inner.journal.clone()
    }

    /// Registered route paths, sorted
    pub fn routes(&self) -> Vec<String> {
        self.inner.routes().paths()
    }

    pub fn has_route(&self, path: impl Into<RoutePath>) -> bool {
        self.inner.routes().contains(&path.into())
    }

    async fn record(&self, entry: EntryType) {
        if let Some(journal) = &self.inner.journal {
            if let Err(e) = journal.record(entry).await {
                warn!("Failed to record navigation journal entry: {}", e);
            }
        }
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes())
            .field("state", &*self.inner.lock_state())
            .finish()
    }
}

fn elapsed_ms(started_at: Instant) -> u64 {
    u64::try_from(started_at.elapsed().as_millis()).unwrap_or(u64::MAX)
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("View panicked: {}", message)
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("View panicked: {}", message)
    } else {
        "View panicked".to_string()
    }
}

/// Builder for creating routers with their collaborators
pub struct RouterBuilder {
    settings: RouterSettings,
    history: Option<Arc<dyn History>>,
    shell: Option<Arc<dyn Shell>>,
    journal: Option<Arc<NavigationJournal>>,
    routes: RouteTable,
}

impl RouterBuilder {
    pub fn new(settings: RouterSettings) -> Self {
        Self {
            settings,
            history: None,
            shell: None,
            journal: None,
            routes: RouteTable::new(),
        }
    }

    /// Use the given history instead of a fresh in-memory one
    pub fn history(mut self, history: Arc<dyn History>) -> Self {
        self.history = Some(history);
        self
    }

    pub fn shell(mut self, shell: Arc<dyn Shell>) -> Self {
        self.shell = Some(shell);
        self
    }

    /// Record navigation events into `journal`
    pub fn journal(mut self, journal: Arc<NavigationJournal>) -> Self {
        self.journal = Some(journal);
        self
    }

    /// Add a route with its view
    pub fn route(mut self, path: impl Into<RoutePath>, view: impl View + 'static) -> Self {
        self.routes.insert(&path.into(), Arc::new(view));
        self
    }

    /// Add a route rendered by an async closure
    pub fn route_fn<F, Fut>(self, path: impl Into<RoutePath>, render: F) -> Self
    where
        F: Fn(ViewContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.route(path, FnView::new(render))
    }

    pub fn build(self) -> Router {
        let history = self
            .history
            .unwrap_or_else(|| Arc::new(MemoryHistory::new(self.settings.root_path.as_str())));
        let shell = self.shell.unwrap_or_else(|| Arc::new(NullShell));

        Router {
            inner: Arc::new(Inner {
                settings: self.settings,
                routes: RwLock::new(self.routes),
                history,
                shell,
                transients: TransientRegistry::new(),
                before: HookList::new(),
                after: HookList::new(),
                state: Mutex::new(NavState {
                    phase: NavigationPhase::Idle,
                    in_flight: None,
                    current_route: None,
                    started: false,
                }),
                journal: self.journal,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_ms_for_recent_start() {
        let started_at = Instant::now();
        assert!(elapsed_ms(started_at) < 60_000);
    }

    #[test]
    fn test_elapsed_ms_for_old_start() {
        let Some(started_at) = Instant::now().checked_sub(Duration::from_secs(90)) else {
            return;
        };
        assert!(elapsed_ms(started_at) >= 90_000);
    }
}
