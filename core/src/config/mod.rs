//! Minimal configuration module for Nivoxar core
//!
//! Only exports pure data types. All loading logic is in CLI layer.

pub mod types;

pub use types::RouterSettings;
