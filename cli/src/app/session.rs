//! Sign-in state backing the auth gate

use async_trait::async_trait;
use nivoxar_core::router::AuthGate;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;

/// Whether someone is signed in to this terminal session
#[derive(Debug, Default)]
pub struct Session {
    signed_in: AtomicBool,
}

impl Session {
    pub fn new(signed_in: bool) -> Self {
        Self {
            signed_in: AtomicBool::new(signed_in),
        }
    }

    pub fn sign_in(&self) {
        info!("Session started");
        self.signed_in.store(true, Ordering::SeqCst);
    }

    pub fn sign_out(&self) {
        info!("Session ended");
        self.signed_in.store(false, Ordering::SeqCst);
    }

    pub fn is_signed_in(&self) -> bool {
        self.signed_in.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthGate for Session {
    async fn is_authenticated(&self) -> bool {
        self.is_signed_in()
    }
}
