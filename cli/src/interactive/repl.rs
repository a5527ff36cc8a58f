//! The command loop driving the app from stdin or a script file

use super::command::{ShellCommand, HELP};
use crate::app::pages::APP_ROUTES;
use crate::app::App;
use crate::output::describe_outcome;
use anyhow::{Context, Result};
use colored::Colorize;
use nivoxar_core::router::LinkClick;
use nivoxar_core::{History, NavigationOutcome};
use std::io::Write;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

const PROMPT: &str = "nivoxar> ";

/// What a single command produced
#[derive(Debug, Default)]
pub struct Reply {
    pub lines: Vec<String>,
    pub quit: bool,
}

impl Reply {
    fn lines(lines: Vec<String>) -> Self {
        Self { lines, quit: false }
    }

    fn line(line: impl Into<String>) -> Self {
        Self::lines(vec![line.into()])
    }
}

/// Executes shell commands against a booted [`App`]
pub struct Repl {
    app: App,
}

impl Repl {
    pub fn new(app: App) -> Self {
        Self { app }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    /// Print the screen as it stands after boot
    pub fn banner(&self) -> String {
        self.app.viewport.render(APP_ROUTES)
    }

    /// Parse and run one line
    pub async fn execute_line(&self, line: &str) -> Result<Reply> {
        match ShellCommand::parse(line) {
            Ok(Some(command)) => self.execute(command).await,
            Ok(None) => Ok(Reply::default()),
            Err(e) => Ok(Reply::line(e.to_string().red().to_string())),
        }
    }

    pub async fn execute(&self, command: ShellCommand) -> Result<Reply> {
        debug!("Executing {:?}", command);
        let router = &self.app.router;
        let settings = router.settings();

        let outcome = match command {
            ShellCommand::Go { path, replace } => router.navigate(path, replace).await?,
            ShellCommand::Click { href, new_tab } => {
                let mut click = LinkClick::new(href.clone());
                if new_tab {
                    click = click.with_target("_blank");
                }
                match router.handle_link_click(&mut click).await? {
                    Some(outcome) => outcome,
                    None => return Ok(Reply::line(format!("{} opened outside the app", href))),
                }
            }
            ShellCommand::Back => match self.app.history.back() {
                Some(_) => router.handle_pop_state().await?,
                None => return Ok(Reply::line("Already at the oldest entry")),
            },
            ShellCommand::Forward => match self.app.history.forward() {
                Some(_) => router.handle_pop_state().await?,
                None => return Ok(Reply::line("Already at the newest entry")),
            },
            ShellCommand::Login => {
                if self.app.session.is_signed_in() {
                    return Ok(Reply::line("Already signed in"));
                }
                self.app.session.sign_in();
                router.navigate(settings.default_route.clone(), true).await?
            }
            ShellCommand::Logout => {
                if !self.app.session.is_signed_in() {
                    return Ok(Reply::line("Not signed in"));
                }
                self.app.session.sign_out();
                router.navigate(settings.login_route.clone(), true).await?
            }
            ShellCommand::Where => {
                let current = router
                    .current_route()
                    .map(|path| path.to_string())
                    .unwrap_or_else(|| "(nothing rendered yet)".to_string());
                return Ok(Reply::line(current));
            }
            ShellCommand::Routes => return Ok(Reply::lines(router.routes())),
            ShellCommand::History => return Ok(Reply::lines(self.history_lines())),
            ShellCommand::Help => {
                return Ok(Reply::lines(HELP.lines().map(str::to_string).collect()))
            }
            ShellCommand::Quit => {
                return Ok(Reply {
                    lines: Vec::new(),
                    quit: true,
                })
            }
        };

        Ok(self.screen_after(&outcome))
    }

    fn screen_after(&self, outcome: &NavigationOutcome) -> Reply {
        let mut lines = vec![describe_outcome(outcome)];
        if outcome.rendered_path().is_some() {
            lines.extend(
                self.app
                    .viewport
                    .render(APP_ROUTES)
                    .lines()
                    .map(str::to_string),
            );
        }
        Reply::lines(lines)
    }

    fn history_lines(&self) -> Vec<String> {
        let current = self.app.history.index();
        self.app
            .history
            .entries()
            .iter()
            .enumerate()
            .map(|(i, path)| {
                let marker = if i == current { ">" } else { " " };
                format!("{} {}", marker, path)
            })
            .collect()
    }

    /// Run commands from a script file, one per line
    pub async fn run_script(&self, path: &Path) -> Result<()> {
        let script = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read script {}", path.display()))?;

        print!("{}", self.banner());
        for line in script.lines() {
            let reply = self.execute_line(line).await?;
            print_lines(&reply.lines);
            if reply.quit {
                break;
            }
        }
        Ok(())
    }

    /// Read commands from stdin until `quit` or end of input
    pub async fn run_interactive(&self) -> Result<()> {
        print!("{}", self.banner());
        println!("{}", "Type `help` for commands.".dimmed());

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            print!("{}", PROMPT.bold());
            std::io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                println!();
                break;
            };
            let reply = self.execute_line(&line).await?;
            print_lines(&reply.lines);
            if reply.quit {
                break;
            }
        }

        debug!("Leaving shell at {}", self.app.history.current_path());
        Ok(())
    }
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::session::Session;
    use nivoxar_core::RouterSettings;
    use std::sync::Arc;

    async fn repl(signed_in: bool) -> Repl {
        colored::control::set_override(false);
        let app = App::build(
            RouterSettings::instant(),
            Arc::new(Session::new(signed_in)),
            None,
        );
        app.boot().await.unwrap();
        Repl::new(app)
    }

    #[tokio::test]
    async fn test_go_prints_outcome_and_screen() {
        let repl = repl(true).await;
        let reply = repl.execute_line("go /categories").await.unwrap();

        assert_eq!(reply.lines[0], "→ /categories");
        assert!(reply.lines.iter().any(|line| line == "Categories"));
        assert!(!reply.quit);
    }

    #[tokio::test]
    async fn test_back_and_forward_follow_history() {
        let repl = repl(true).await;
        repl.execute_line("go /calendar").await.unwrap();
        repl.execute_line("go /profile").await.unwrap();

        repl.execute_line("back").await.unwrap();
        assert_eq!(repl.execute_line("where").await.unwrap().lines, vec!["/calendar"]);

        repl.execute_line("forward").await.unwrap();
        assert_eq!(repl.execute_line("where").await.unwrap().lines, vec!["/profile"]);

        let reply = repl.execute_line("forward").await.unwrap();
        assert_eq!(reply.lines, vec!["Already at the newest entry"]);
    }

    #[tokio::test]
    async fn test_external_click_leaves_the_app() {
        let repl = repl(true).await;
        let reply = repl
            .execute_line("click https://nivoxar.app/privacy")
            .await
            .unwrap();

        assert_eq!(reply.lines, vec!["https://nivoxar.app/privacy opened outside the app"]);
        assert_eq!(repl.execute_line("where").await.unwrap().lines, vec!["/dashboard"]);
    }

    #[tokio::test]
    async fn test_new_tab_click_is_not_routed() {
        let repl = repl(true).await;
        let reply = repl.execute_line("click /analytics --new-tab").await.unwrap();

        assert_eq!(reply.lines, vec!["/analytics opened outside the app"]);
    }

    #[tokio::test]
    async fn test_login_and_logout_move_between_routes() {
        let repl = repl(false).await;
        assert_eq!(repl.execute_line("where").await.unwrap().lines, vec!["/login"]);

        repl.execute_line("login").await.unwrap();
        assert_eq!(repl.execute_line("where").await.unwrap().lines, vec!["/dashboard"]);

        repl.execute_line("logout").await.unwrap();
        assert_eq!(repl.execute_line("where").await.unwrap().lines, vec!["/login"]);
        assert!(repl.app().viewport.navbar().is_none());
    }

    #[tokio::test]
    async fn test_history_marks_current_entry() {
        let repl = repl(true).await;
        repl.execute_line("go /calendar").await.unwrap();
        repl.execute_line("back").await.unwrap();

        let lines = repl.execute_line("history").await.unwrap().lines;
        assert_eq!(lines, vec!["> /dashboard", "  /calendar"]);
    }

    #[tokio::test]
    async fn test_parse_error_is_reported_not_fatal() {
        let repl = repl(true).await;
        let reply = repl.execute_line("teleport").await.unwrap();

        assert_eq!(reply.lines, vec!["Unknown command: teleport (type `help` for a list)"]);
    }

    #[tokio::test]
    async fn test_quit() {
        let repl = repl(true).await;
        assert!(repl.execute_line("quit").await.unwrap().quit);
    }
}
