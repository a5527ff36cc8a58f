//! Interactive and scripted shell command

use crate::app::session::Session;
use crate::app::App;
use crate::interactive::Repl;
use anyhow::{Context, Result};
use nivoxar_core::{NavigationJournal, RouterSettings};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Options for a shell session
#[derive(Debug, Default)]
pub struct ShellOptions {
    pub signed_in: bool,
    pub journal_file: Option<PathBuf>,
    pub script: Option<PathBuf>,
}

/// Boot the app and hand it to the command loop
pub async fn shell_command(settings: RouterSettings, options: ShellOptions) -> Result<()> {
    let journal = options.journal_file.as_ref().map(|path| {
        debug!("Journal file: {}", path.display());
        Arc::new(NavigationJournal::with_file(path.clone()))
    });

    let session = Arc::new(Session::new(options.signed_in));
    let app = App::build(settings, session, journal.clone());
    app.boot().await?;

    let repl = Repl::new(app);
    let result = match &options.script {
        Some(script) => {
            info!("Running script {}", script.display());
            repl.run_script(script).await
        }
        None => repl.run_interactive().await,
    };

    if let Some(journal) = journal {
        journal
            .save()
            .await
            .context("Failed to save navigation journal")?;
        if let Some(path) = journal.file_path() {
            info!("Journal saved to {}", path.display());
        }
    }

    result
}
