//! Parsing of shell input lines into commands

use thiserror::Error;

/// A command typed at the `nivoxar>` prompt or read from a script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Navigate to a path, optionally replacing the current history entry
    Go { path: String, replace: bool },
    /// Simulate clicking an anchor with the given href
    Click { href: String, new_tab: bool },
    Back,
    Forward,
    /// Print the active route
    Where,
    /// List registered routes
    Routes,
    /// Print the history stack
    History,
    Login,
    Logout,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown command: {0} (type `help` for a list)")]
    UnknownCommand(String),

    #[error("`{command}` needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("Unexpected argument for `{command}`: {argument}")]
    UnexpectedArgument {
        command: &'static str,
        argument: String,
    },
}

impl ShellCommand {
    /// Parse one input line
    ///
    /// Blank lines and `#` comments yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let mut words = line.split_whitespace();
        let name = words.next().unwrap_or_default().to_lowercase();
        let args: Vec<&str> = words.collect();

        let command = match name.as_str() {
            "go" | "navigate" => {
                let (path, replace) = single_with_flag("go", "a path", "--replace", &args)?;
                ShellCommand::Go { path, replace }
            }
            "click" => {
                let (href, new_tab) = single_with_flag("click", "an href", "--new-tab", &args)?;
                ShellCommand::Click { href, new_tab }
            }
            "back" => no_args("back", &args, ShellCommand::Back)?,
            "forward" => no_args("forward", &args, ShellCommand::Forward)?,
            "where" | "pwd" => no_args("where", &args, ShellCommand::Where)?,
            "routes" => no_args("routes", &args, ShellCommand::Routes)?,
            "history" => no_args("history", &args, ShellCommand::History)?,
            "login" => no_args("login", &args, ShellCommand::Login)?,
            "logout" => no_args("logout", &args, ShellCommand::Logout)?,
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" => ShellCommand::Quit,
            _ => return Err(ParseError::UnknownCommand(name)),
        };

        Ok(Some(command))
    }

    /// Whether running this command may change the active view
    pub fn navigates(&self) -> bool {
        matches!(
            self,
            ShellCommand::Go { .. }
                | ShellCommand::Click { .. }
                | ShellCommand::Back
                | ShellCommand::Forward
                | ShellCommand::Login
                | ShellCommand::Logout
        )
    }
}

fn no_args(
    command: &'static str,
    args: &[&str],
    parsed: ShellCommand,
) -> Result<ShellCommand, ParseError> {
    match args.first() {
        Some(extra) => Err(ParseError::UnexpectedArgument {
            command,
            argument: extra.to_string(),
        }),
        None => Ok(parsed),
    }
}

fn single_with_flag(
    command: &'static str,
    argument: &'static str,
    flag: &str,
    args: &[&str],
) -> Result<(String, bool), ParseError> {
    let mut value = None;
    let mut flagged = false;

    for arg in args {
        if *arg == flag {
            flagged = true;
        } else if value.is_none() {
            value = Some(arg.to_string());
        } else {
            return Err(ParseError::UnexpectedArgument {
                command,
                argument: arg.to_string(),
            });
        }
    }

    value
        .map(|value| (value, flagged))
        .ok_or(ParseError::MissingArgument { command, argument })
}

/// Text printed by the `help` command
pub const HELP: &str = "\
Commands:
  go <path> [--replace]     navigate to an in-app path
  click <href> [--new-tab]  click a link, internal links are routed in place
  back / forward            move through history
  where                     show the active route
  routes                    list registered routes
  history                   show the history stack
  login / logout            toggle the session
  help                      show this text
  quit                      leave the shell";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_and_comment_lines_are_skipped() {
        assert_eq!(ShellCommand::parse("").unwrap(), None);
        assert_eq!(ShellCommand::parse("   ").unwrap(), None);
        assert_eq!(ShellCommand::parse("# open the calendar").unwrap(), None);
    }

    #[test]
    fn test_go_with_and_without_replace() {
        assert_eq!(
            ShellCommand::parse("go /calendar").unwrap(),
            Some(ShellCommand::Go {
                path: "/calendar".to_string(),
                replace: false
            })
        );
        assert_eq!(
            ShellCommand::parse("navigate --replace /profile").unwrap(),
            Some(ShellCommand::Go {
                path: "/profile".to_string(),
                replace: true
            })
        );
    }

    #[test]
    fn test_click_new_tab() {
        assert_eq!(
            ShellCommand::parse("click https://example.com --new-tab").unwrap(),
            Some(ShellCommand::Click {
                href: "https://example.com".to_string(),
                new_tab: true
            })
        );
    }

    #[test]
    fn test_commands_are_case_insensitive() {
        assert_eq!(ShellCommand::parse("BACK").unwrap(), Some(ShellCommand::Back));
        assert_eq!(ShellCommand::parse("Exit").unwrap(), Some(ShellCommand::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            ShellCommand::parse("go").unwrap_err(),
            ParseError::MissingArgument {
                command: "go",
                argument: "a path"
            }
        );
        assert_eq!(
            ShellCommand::parse("back twice").unwrap_err(),
            ParseError::UnexpectedArgument {
                command: "back",
                argument: "twice".to_string()
            }
        );
        assert_eq!(
            ShellCommand::parse("go /a /b").unwrap_err(),
            ParseError::UnexpectedArgument {
                command: "go",
                argument: "/b".to_string()
            }
        );
        assert!(matches!(
            ShellCommand::parse("teleport /a"),
            Err(ParseError::UnknownCommand(name)) if name == "teleport"
        ));
    }

    #[test]
    fn test_navigating_commands() {
        assert!(ShellCommand::Back.navigates());
        assert!(ShellCommand::Login.navigates());
        assert!(!ShellCommand::Where.navigates());
        assert!(!ShellCommand::Help.navigates());
    }
}
