use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "modex",
    version,
    about = "Extract product modules from documentation URLs",
    long_about = "modex collects documentation URLs, sends them to a module extraction \
                  service and shows the modules and submodules it finds."
)]
pub struct Cli {
    /// Config file (RON). Defaults to ./modex.ron when present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the extraction service, e.g. http://localhost:8000
    #[arg(long, global = true)]
    pub backend: Option<String>,

    /// Directory that `export` writes extracted_modules.json into.
    #[arg(long, global = true)]
    pub export_dir: Option<PathBuf>,

    /// Log at debug level and mirror logs to the terminal.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Edit URLs interactively (default).
    Repl,

    /// Submit the given URLs once and print the result.
    ///
    /// Example: modex extract https://docs.example.com https://docs.example.com/api
    Extract {
        /// Documentation URLs, one per row.
        #[arg(required = true)]
        urls: Vec<String>,

        /// Print the modules as JSON instead of the formatted listing.
        #[arg(long)]
        json: bool,

        /// Also write the modules to extracted_modules.json.
        #[arg(long)]
        export: bool,
    },

    /// Check whether the extraction service is reachable.
    Ping,
}
