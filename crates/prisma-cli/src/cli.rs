use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Diego Barquero Morera",
    version,
    about = "MolPrisma - Fast inspection of PDB molecular files inside the terminal.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file. The interactive viewer logs nowhere else.
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    /// Defaults to `config.toml` in the user's configuration directory, if present.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Path to a TOML table of column constants replacing the built-in PDB layout.
    #[arg(long, global = true, value_name = "PATH")]
    pub schema: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S display.show-meta=true
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", global = true)]
    pub set_values: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open a structure file in the interactive viewer.
    View(ViewArgs),
    /// Print the column layout used to split records into fields.
    Fields(FieldsArgs),
    /// Print the distinct values a field takes over the atoms of a structure.
    Values(ValuesArgs),
}

impl Commands {
    /// Whether the command takes over the terminal.
    pub fn is_interactive(&self) -> bool {
        matches!(self, Commands::View(_))
    }
}

/// Arguments for the `view` subcommand.
#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Path to the input structure file (e.g., 1abc.pdb).
    #[arg(required = true, value_name = "PATH")]
    pub input: PathBuf,
}

/// Arguments for the `fields` subcommand.
#[derive(Args, Debug)]
pub struct FieldsArgs {
    /// Optional structure file; adds the number of distinct values per field.
    #[arg(value_name = "PATH")]
    pub input: Option<PathBuf>,
}

/// Arguments for the `values` subcommand.
#[derive(Args, Debug)]
pub struct ValuesArgs {
    /// Path to the input structure file.
    #[arg(required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Field name as listed by `fields` (e.g., CHAIN_ID).
    #[arg(required = true, value_name = "FIELD")]
    pub field: String,
}
