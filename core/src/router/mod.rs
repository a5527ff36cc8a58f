//! Router module for single-page navigation
//!
//! This module provides the navigation state machine together with the
//! contracts it expects from its collaborators: views, browser history,
//! application chrome and the auth gate.

pub mod gate;
pub mod history;
pub mod hooks;
pub mod link;
pub mod navigator;
pub mod route;
pub mod shell;
pub mod transient;
pub mod view;


// Re-export commonly used types
pub use gate::{AuthGate, StaticGate};
pub use history::{History, MemoryHistory};
pub use hooks::Subscription;
pub use link::{classify_href, LinkClick, LinkTarget, Modifiers};
pub use navigator::{NavigationOutcome, NavigationPhase, Router, RouterBuilder};
pub use route::{RoutePath, RouteTable};
pub use shell::{ErrorPanel, NullShell, RecoveryAction, Shell};
pub use transient::{TransientId, TransientRegistry};
pub use view::{FnView, View, ViewContext};
