//! CLI argument definitions

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};

#[derive(Parser)]
#[command(
    name = "idsync",
    version,
    about = "Keep a list of open item ids in sync with a URL's query parameters",
    long_about = "Add, remove and list identifiers carried in a repeatable query key.\n\n\
                  Each command starts from the given URL, applies the operations in order\n\
                  and reports the resulting URL."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// JSON configuration file.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Query key carrying the ids (overrides the config file).
    #[arg(long, value_name = "NAME", global = true)]
    pub key: Option<String>,

    /// Print a JSON result envelope instead of plain text.
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Append ids that are not already present.
    Add(IdArgs),

    /// Remove every occurrence of the given ids.
    Delete(IdArgs),

    /// List the ids carried by a URL.
    Ids(IdsArgs),
}

impl Command {
    pub fn url(&self) -> &str {
        match self {
            Command::Add(args) | Command::Delete(args) => &args.url,
            Command::Ids(args) => &args.url,
        }
    }
}

#[derive(Args)]
pub struct IdArgs {
    /// Starting URL.
    #[arg(value_name = "URL")]
    pub url: String,

    /// Ids to apply, in order.
    #[arg(value_name = "ID", required = true)]
    pub ids: Vec<String>,
}

#[derive(Args)]
pub struct IdsArgs {
    /// URL to read.
    #[arg(value_name = "URL")]
    pub url: String,

    /// Give up after this many milliseconds (overrides the config file).
    #[arg(long = "timeout-ms", value_name = "MS")]
    pub timeout_ms: Option<u64>,
}
