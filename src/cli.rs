use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// SuperMAG geomagnetic data client.
#[derive(Parser)]
#[command(
    name = "supermag",
    version,
    about = "Fetch and convert SuperMAG geomagnetic data"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Fetch geomagnetic indices from the SuperMAG web service.
    Fetch(FetchArgs),
    /// Convert a locally stored SuperMAG ASCII file.
    Convert(ConvertArgs),
}

/// Arguments for the `fetch` subcommand.
#[derive(clap::Args)]
pub struct FetchArgs {
    /// Start of the query window (YYYY-MM-DDTHH:MM).
    #[arg(long)]
    pub start: String,

    /// End of the query window, inclusive (YYYY-MM-DDTHH:MM).
    #[arg(long)]
    pub end: String,

    /// SuperMAG logon name.
    #[arg(long)]
    pub logon: String,

    /// Output path.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value = "ascii")]
    pub format: OutputFormat,

    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Skip the auroral-electrojet family (SME/SML/SMU).
    #[arg(long)]
    pub no_sme: bool,

    /// Skip the ring-current family (SMR).
    #[arg(long)]
    pub no_smr: bool,
}

/// Arguments for the `convert` subcommand.
#[derive(clap::Args)]
pub struct ConvertArgs {
    /// Path to the vendor ASCII input file.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output path.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Kind of vendor file being read.
    #[arg(long, value_enum, default_value = "index")]
    pub kind: InputKind,

    /// Output format.
    #[arg(long, value_enum, default_value = "netcdf")]
    pub format: OutputFormat,

    /// Drop an incomplete trailing row instead of failing.
    #[arg(long)]
    pub tolerant: bool,

    /// Station-information file for station metadata and local time.
    #[arg(long)]
    pub station_info: Option<PathBuf>,
}

/// Supported output formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Self-describing tagged-ASCII text.
    Ascii,
    /// NetCDF binary container.
    Netcdf,
}

/// Kinds of vendor ASCII input file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum InputKind {
    /// Geomagnetic index file.
    Index,
    /// Per-station magnetometer file.
    Stations,
}
