//! File logging for the console.
//!
//! The UI owns stdout, so events go to a plain file through a non-blocking
//! `tracing-appender` writer. Keep the returned guard alive until exit or
//! buffered lines are lost.

use anyhow::Context;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const CRATES: &[&str] = &[
    "roster",
    "roster_core",
    "roster_listing",
    "roster_widgets",
    "roster_console",
];

/// Filter directives for `-v` counts: 1 is debug, 2 or more is trace.
fn directives(verbosity: u8) -> String {
    let level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    std::iter::once("warn".to_owned())
        .chain(CRATES.iter().map(|krate| format!("{krate}={level}")))
        .collect::<Vec<_>>()
        .join(",")
}

fn filter(verbosity: u8) -> EnvFilter {
    if verbosity == 0 {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives(0)))
    } else {
        EnvFilter::new(directives(verbosity))
    }
}

pub fn init(path: &Path, verbosity: u8) -> anyhow::Result<WorkerGuard> {
    let directory = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .with_context(|| format!("log file path {} has no file name", path.display()))?;

    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter(verbosity))
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .context("failed to install the log subscriber")?;

    tracing::info!(path = %path.display(), verbosity, "logging initialized");
    Ok(guard)
}
