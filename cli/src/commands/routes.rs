//! Route listing command

use crate::app::session::Session;
use crate::app::App;
use anyhow::Result;
use colored::Colorize;
use nivoxar_core::RouterSettings;
use std::sync::Arc;
use tracing::info;

/// Show every registered route and which ones the settings point at
pub async fn routes_command(settings: RouterSettings) -> Result<()> {
    info!("Listing registered routes");

    let default_route = settings.default_route.clone();
    let login_route = settings.login_route.clone();
    let app = App::build(settings, Arc::new(Session::new(false)), None);

    println!("{}", "Registered routes".bold());
    for route in app.router.routes() {
        let note = if route == default_route {
            " (default)"
        } else if route == login_route {
            " (login)"
        } else {
            ""
        };
        println!("  {}{}", route, note.dimmed());
    }

    Ok(())
}
