use crate::cli::{AlignmentArg, FitArgs, ModeArg};
use crate::error::Result;
use crate::io::{self, TextFrameSource};
use crate::ui::CliProgress;
use rdcfit::core::io::rdc_table;
use rdcfit::core::models::trajectory::Trajectory;
use rdcfit::engine::config::{AlignmentPolicy, BondMode, FitConfig, OutputMode};
use rdcfit::engine::progress::ProgressReporter;
use rdcfit::workflows::fit;
use std::fs::File;
use std::io::{BufWriter, Write};
use tracing::info;

pub fn execute(args: FitArgs) -> Result<()> {
    let dataset = rdc_table::read_from_path(&args.rdc)?;
    info!(bonds = dataset.len(), "Loaded experimental RDC table");

    let topology = io::load_atom_table(&args.atoms)?;
    info!(atoms = topology.len(), "Loaded atom table");

    let config = FitConfig::builder()
        .mode(match args.mode {
            ModeArg::Average => OutputMode::Average,
            ModeArg::Full => OutputMode::Full,
        })
        .alignment(match args.alignment {
            AlignmentArg::MinimizeRmsd => AlignmentPolicy::MinimizeRmsd,
            AlignmentArg::FirstFrame => AlignmentPolicy::FirstFrame,
            AlignmentArg::None => AlignmentPolicy::None,
        })
        .bond_mode(if args.amide {
            BondMode::AmideReconstructed
        } else {
            BondMode::Direct
        })
        .build();

    let progress = CliProgress::new();
    let reporter = ProgressReporter::with_callback(progress.callback());

    let outcome = if args.streamed {
        let source = TextFrameSource::new(args.trajectory.clone());
        fit::run_streamed(&topology, &source, &dataset, &config, &reporter)?
    } else {
        let frames = io::load_frames(&args.trajectory)?;
        let mut trajectory = Trajectory::new(topology, frames)?;
        fit::run(&mut trajectory, &dataset, &config, &reporter)?
    };

    match &args.output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            io::write_outcome(&outcome, &mut writer)?;
            writer.flush()?;
            info!(path = %path.display(), "Wrote fit results");
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            io::write_outcome(&outcome, &mut handle)?;
        }
    }
    Ok(())
}
