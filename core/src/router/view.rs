//! View contract between the router and page renderers

use super::route::RoutePath;
use super::transient::TransientRegistry;
use async_trait::async_trait;
use std::future::Future;

/// A page renderer registered for one route
///
/// A view renders its page into the shared view container and returns.
/// Any error it returns is shown to the user as an error panel; it never
/// propagates past the router.
#[async_trait]
pub trait View: Send + Sync {
    async fn render(&self, cx: &ViewContext) -> anyhow::Result<()>;
}

/// Everything a view gets to see while rendering
#[derive(Debug, Clone)]
pub struct ViewContext {
    path: RoutePath,
    transients: TransientRegistry,
}

impl ViewContext {
    pub(crate) fn new(path: RoutePath, transients: TransientRegistry) -> Self {
        Self { path, transients }
    }

    /// The path being rendered, including any query or fragment
    pub fn path(&self) -> &RoutePath {
        &self.path
    }

    /// Registry for modals, popups and panels that must go away with the view
    pub fn transients(&self) -> &TransientRegistry {
        &self.transients
    }
}

/// Adapter turning an async closure into a [`View`]
pub struct FnView<F> {
    render: F,
}

impl<F> FnView<F> {
    pub fn new(render: F) -> Self {
        Self { render }
    }
}

#[async_trait]
impl<F, Fut> View for FnView<F>
where
    F: Fn(ViewContext) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<()>> + Send,
{
    async fn render(&self, cx: &ViewContext) -> anyhow::Result<()> {
        (self.render)(cx.clone()).await
    }
}
