//! `roster-console`: an HR console of paginated, filterable listings.

mod app;
mod cli;
mod logging;
mod records;
mod seed;
mod settings;
mod tabs;

use anyhow::Context;
use clap::Parser;
use roster::listing::{ApiClient, Session};
use roster::ProgramOptions;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let _log_guard = logging::init(&cli.log_file, cli.verbose)?;
    let settings = settings::load(&cli)?;

    let session = Session::new();
    if let Some(token) = &cli.token {
        session.sign_in(token.clone());
    }
    let client = Arc::new(
        ApiClient::new(&settings.api, session.clone()).context("failed to build API client")?,
    );
    tracing::info!(api = %settings.api.base_url, signed_in = session.is_signed_in(), "starting");

    let flags = app::Flags {
        settings,
        attendance: client.clone(),
        payroll: client,
    };
    let outcome = roster::run_with::<app::Console>(
        flags,
        ProgramOptions {
            title: Some("Roster".into()),
            ..Default::default()
        },
    )
    .await;

    session.sign_out();
    let console = outcome.context("console exited with an error")?;
    tracing::info!(tab = console.tab().title(), "exited");
    Ok(())
}
