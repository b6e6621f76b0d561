use clap::Parser;
use std::path::PathBuf;

use depsnap::application::dto::OutputFormat;

/// Replay a recorded dependency change log into project snapshots
#[derive(Parser, Debug)]
#[command(name = "depsnap")]
#[command(version)]
#[command(
    about = "Replay a recorded dependency change log and print the resulting snapshot",
    long_about = None
)]
pub struct Args {
    /// Change log to replay (JSON, YAML or TOML)
    #[arg(value_name = "CHANGE_LOG", default_value = "changes.json")]
    pub change_log: PathBuf,

    /// Project path the snapshot belongs to (overrides the change log)
    #[arg(short, long)]
    pub project: Option<String>,

    /// Config file (defaults to depsnap.config.yml next to the change log)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format: tree or json
    #[arg(short, long, default_value = "tree")]
    pub format: OutputFormat,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Active target framework after the last batch
    #[arg(short = 't', long = "target-framework", value_name = "MONIKER")]
    pub target_framework: Option<String>,

    /// Explicitly referenced items, for batches that carry none.
    /// Can be specified multiple times: -i "Newtonsoft.Json" -i "Serilog"
    #[arg(short = 'i', long = "item-spec", value_name = "ITEM")]
    pub item_specs: Vec<String>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored tree output
    #[arg(long)]
    pub no_color: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
