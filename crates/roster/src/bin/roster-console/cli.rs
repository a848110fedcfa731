//! Command-line flags for `roster-console`.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "roster-console",
    version,
    about = "Browse employees, attendance and payroll in the terminal",
    long_about = "Browse employees, attendance and payroll in the terminal.\n\n\
                  Employees and the activity log are served from memory; attendance \
                  and payroll are fetched page by page from the REST API."
)]
pub struct Cli {
    /// Settings file (TOML). Defaults are used when omitted.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Base URL of the REST API, overriding `api.base_url`.
    #[arg(long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,

    /// Bearer token to sign in with.
    #[arg(long, value_name = "TOKEN")]
    pub token: Option<String>,

    /// Where to write logs. The terminal belongs to the UI.
    #[arg(long = "log-file", value_name = "PATH", default_value = "roster-console.log")]
    pub log_file: PathBuf,

    /// More log detail (-v debug, -vv trace). Without it `RUST_LOG` applies.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
