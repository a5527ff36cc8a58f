//! CLI command implementations

pub mod routes;
pub mod shell;

pub use routes::routes_command;
pub use shell::{shell_command, ShellOptions};
