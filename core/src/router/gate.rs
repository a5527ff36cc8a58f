//! Authentication gate consulted when the app boots

use async_trait::async_trait;

/// Decides whether the session may see the app or only the login page
#[async_trait]
pub trait AuthGate: Send + Sync {
    async fn is_authenticated(&self) -> bool;
}

/// Gate with a fixed answer
#[derive(Debug, Clone, Copy)]
pub struct StaticGate(pub bool);

#[async_trait]
impl AuthGate for StaticGate {
    async fn is_authenticated(&self) -> bool {
        self.0
    }
}
