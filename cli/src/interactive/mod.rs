//! Line-oriented shell for driving the app from a terminal or script

pub mod command;
pub mod repl;

pub use command::{ParseError, ShellCommand};
pub use repl::{Reply, Repl};
