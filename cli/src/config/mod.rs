//! CLI configuration discovery

pub mod loader;

pub use loader::{expand_path, CliConfigLoader};
