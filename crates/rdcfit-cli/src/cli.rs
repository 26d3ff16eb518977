use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "rdcfit - back-calculate residual dipolar couplings from MD trajectories and fit them against experimental measurements.",
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

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fit an alignment tensor to experimental RDCs and back-calculate
    /// predicted couplings from a trajectory.
    Fit(FitArgs),
}

/// Arguments for the `fit` subcommand.
#[derive(Args, Debug)]
pub struct FitArgs {
    /// Path to the experimental RDC table (NMRPipe-like columns:
    /// resid_i name_i atom_i resid_j name_j atom_j rdc).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub rdc: PathBuf,

    /// Path to the plain-text atom table, one atom per line:
    /// 'name resname resid' (resid 1-based), '#' comments allowed.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub atoms: PathBuf,

    /// Path to the plain-text trajectory: per frame, an atom-count line
    /// followed by that many 'x y z' lines.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub trajectory: PathBuf,

    /// Output shape of the predicted couplings.
    #[arg(short, long, value_enum, default_value_t = ModeArg::Average)]
    pub mode: ModeArg,

    /// Rigid-alignment policy applied before geometry extraction.
    #[arg(long, value_enum, default_value_t = AlignmentArg::MinimizeRmsd)]
    pub alignment: AlignmentArg,

    /// Reconstruct amide N-H directions from backbone C, N, and CA atoms
    /// (for trajectories without hydrogens).
    #[arg(long)]
    pub amide: bool,

    /// Stream the trajectory one frame at a time instead of loading it
    /// whole; disables RMSD-minimizing alignment.
    #[arg(long)]
    pub streamed: bool,

    /// Path for the result arrays; defaults to standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeArg {
    /// One prediction per bond from the frame-averaged geometry.
    Average,
    /// One prediction per bond per frame.
    Full,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlignmentArg {
    /// Superpose onto the frame minimizing the summed C-alpha RMSD.
    MinimizeRmsd,
    /// Superpose onto frame 0.
    FirstFrame,
    /// Use the frames exactly as provided.
    None,
}
