use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "alerts", author, version, about = "Browse public CAP alerts from the terminal", long_about = None)]
pub struct Args {
    /// RON config file (default: ./alerts.ron when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Base URL of the cap-get / cap-search functions
    #[arg(long)]
    pub api_base: Option<String>,

    /// Base URL of the mirrored alert resources
    #[arg(long)]
    pub resource_base: Option<String>,

    /// Log level: off, error, warn, info, debug or trace
    #[arg(long, value_name = "LEVEL")]
    pub log: Option<String>,

    /// Keep reading commands from stdin after the first render
    #[arg(short, long)]
    pub interactive: bool,

    #[command(subcommand)]
    pub action: Option<Action>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// List alerts matching the given search parameters
    Search {
        /// Search parameters, e.g. `q=fire size=20 from=40`
        #[arg(value_name = "KEY=VALUE")]
        params: Vec<String>,

        /// Do not show the loading indicator
        #[arg(long)]
        no_loader: bool,
    },
    /// Show one alert by `<alert_id>:<info_index>`
    Show {
        id: String,

        /// Export the rendered alert once it has loaded
        #[arg(long)]
        export: bool,
    },
}

impl Default for Action {
    fn default() -> Self {
        Action::Search {
            params: Vec::new(),
            no_loader: false,
        }
    }
}
