//! # Nivoxar Core
//!
//! Core library for Nivoxar - the navigation layer of the Nivoxar task manager.
//!
//! This library provides the single-page application router: a route table,
//! a guarded navigation pipeline with before/after hooks, history
//! integration, and teardown of per-view transient UI between pages.

// Core modules
pub mod config;
pub mod error;
pub mod journal;
pub mod router;

// Re-export commonly used types
pub use config::RouterSettings;
pub use error::{Error, Result};
pub use journal::NavigationJournal;
pub use router::{
    AuthGate, History, LinkClick, MemoryHistory, NavigationOutcome, NavigationPhase, RoutePath,
    Router, RouterBuilder, Shell, View, ViewContext,
};

/// Current version of the nivoxar-core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Install the fmt subscriber on stderr, at `debug` when verbose and `warn` otherwise
///
/// `RUST_LOG` takes precedence when set.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
