use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

const PLOT_AFTER_HELP: &str = "\
The plot is written as an SVG file and is not displayed; open it in a web browser or image viewer.";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Ramachandran CLI - Extract backbone phi/psi angles from PDB structures, classify them into favorability regions, and write CSV reports and an annotated Ramachandran plot.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze one PDB file and write the reports and the plot.
    #[command(after_help = PLOT_AFTER_HELP)]
    Plot(PlotArgs),
    /// Print the favorability region of a single (phi, psi) pair in degrees.
    Classify(ClassifyArgs),
    /// Read PDB paths from standard input, one per line, and analyze each in turn.
    Session(SessionArgs),
}

/// Arguments for the `plot` subcommand.
#[derive(Args, Debug)]
pub struct PlotArgs {
    /// Path to the input PDB file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: RunOverrides,
}

/// Arguments for the `session` subcommand.
#[derive(Args, Debug)]
pub struct SessionArgs {
    /// Optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: RunOverrides,
}

/// Arguments for the `classify` subcommand.
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Phi angle in degrees.
    #[arg(allow_negative_numbers = true, value_name = "PHI")]
    pub phi: f64,

    /// Psi angle in degrees.
    #[arg(allow_negative_numbers = true, value_name = "PSI")]
    pub psi: f64,
}

/// Per-run overrides shared by `plot` and `session`; they take precedence over the config file.
#[derive(Args, Debug, Default, Clone)]
pub struct RunOverrides {
    // --- Output Overrides ---
    /// Path of the per-residue angle table (CSV).
    #[arg(long = "report", value_name = "PATH")]
    pub report_path: Option<PathBuf>,

    /// Path of the per-region summary table (CSV).
    #[arg(long = "summary", value_name = "PATH")]
    pub summary_path: Option<PathBuf>,

    /// Path of the rendered plot (SVG).
    #[arg(long = "plot", value_name = "PATH")]
    pub plot_path: Option<PathBuf>,

    /// Skip plot rendering and write only the CSV tables.
    #[arg(long)]
    pub no_plot: bool,

    // --- Structure Overrides ---
    /// Largest C-N distance (Angstroms) still treated as a peptide bond.
    #[arg(long, value_name = "FLOAT")]
    pub max_peptide_bond: Option<f64>,

    /// Keep non-standard residues that have a CA atom inside peptide segments.
    #[arg(long)]
    pub include_nonstandard: bool,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S plot.dpi=150
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}
