use crate::core::models::dataset::ExperimentalDataset;
use crate::core::models::selection::BondSelection;
use crate::core::models::topology::Topology;
use crate::core::models::trajectory::Trajectory;
use crate::engine::average::{
    FrameSource, average_geometry_matrix, average_geometry_matrix_streamed,
};
use crate::engine::config::{AlignmentPolicy, FitConfig, OutputMode};
use crate::engine::error::EngineError;
use crate::engine::matrix::build_geometry_matrix;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::reference::select_reference_frame;
use crate::engine::resolve::resolve_selections;
use crate::engine::solver::{back_calculate, solve_alignment_tensor};
use crate::engine::superpose::superpose_all;
use nalgebra::{DMatrix, DVector, RowDVector};
use tracing::{info, instrument, warn};

/// Back-calculated couplings in the requested output shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicted {
    /// One value per bond, from the frame-averaged geometry matrix.
    Average(DVector<f64>),
    /// One row per frame, one column per bond.
    Full(DMatrix<f64>),
}

/// The result pair of a fit: the experimental couplings exactly as parsed
/// and the predictions, index-aligned bond by bond.
#[derive(Debug, Clone, PartialEq)]
pub struct FitOutcome {
    pub experimental: DVector<f64>,
    pub predicted: Predicted,
}

/// Runs the full RDC fit on an in-memory trajectory.
///
/// Pipeline: resolve bonds to atom indices, rigidly align the trajectory
/// per the configured policy (this is the single in-place mutation of the
/// coordinate buffer), average the geometry matrix over all frames, solve
/// the alignment tensor, and back-calculate predictions in the configured
/// output shape.
#[instrument(skip_all, name = "rdc_fit")]
pub fn run(
    trajectory: &mut Trajectory,
    dataset: &ExperimentalDataset,
    config: &FitConfig,
    reporter: &ProgressReporter,
) -> Result<FitOutcome, EngineError> {
    if dataset.is_empty() {
        return Err(EngineError::EmptyDataset);
    }
    if trajectory.n_frames() == 0 {
        return Err(EngineError::EmptyTrajectory);
    }

    reporter.report(Progress::PhaseStart {
        name: "Resolving bonds",
    });
    let selections = resolve_selections(dataset, trajectory.topology(), config.bond_mode)?;
    reporter.report(Progress::PhaseFinish);

    match config.alignment {
        AlignmentPolicy::MinimizeRmsd => {
            reporter.report(Progress::PhaseStart {
                name: "Selecting reference frame",
            });
            let reference = select_reference_frame(trajectory, reporter)?;
            info!(reference, "Superposing trajectory onto the minimal-RMSD frame");
            superpose_all(trajectory, reference, None)?;
            reporter.report(Progress::PhaseFinish);
        }
        AlignmentPolicy::FirstFrame => {
            info!("Superposing trajectory onto frame 0");
            superpose_all(trajectory, 0, None)?;
        }
        AlignmentPolicy::None => {}
    }

    reporter.report(Progress::PhaseStart {
        name: "Averaging geometry",
    });
    let f_avg = average_geometry_matrix(trajectory, &selections, reporter)?;
    reporter.report(Progress::PhaseFinish);

    let measured = dataset.couplings();
    let tensor = solve_alignment_tensor(&f_avg, &measured)?;

    let predicted = match config.mode {
        OutputMode::Average => Predicted::Average(back_calculate(&f_avg, &tensor)),
        OutputMode::Full => {
            reporter.report(Progress::PhaseStart {
                name: "Back-calculating per frame",
            });
            let mut rows = Vec::with_capacity(trajectory.n_frames());
            for frame in trajectory.frames() {
                let f = build_geometry_matrix(&selections, frame)?;
                rows.push(back_calculate(&f, &tensor).transpose());
            }
            reporter.report(Progress::PhaseFinish);
            Predicted::Full(DMatrix::from_rows(&rows))
        }
    };

    info!(
        bonds = selections.len(),
        frames = trajectory.n_frames(),
        "Fit complete"
    );
    Ok(FitOutcome {
        experimental: measured,
        predicted,
    })
}

/// Runs the RDC fit on a streamed trajectory with bounded memory.
///
/// RMSD-minimizing alignment needs the whole trajectory in memory and is not
/// available here: the input frames are used as provided, and a requested
/// alignment degrades to an advisory. In `Full` output mode the source is
/// opened a second time for the back-calculation pass.
#[instrument(skip_all, name = "rdc_fit_streamed")]
pub fn run_streamed<S: FrameSource>(
    topology: &Topology,
    source: &S,
    dataset: &ExperimentalDataset,
    config: &FitConfig,
    reporter: &ProgressReporter,
) -> Result<FitOutcome, EngineError> {
    if dataset.is_empty() {
        return Err(EngineError::EmptyDataset);
    }

    reporter.report(Progress::PhaseStart {
        name: "Resolving bonds",
    });
    let selections = resolve_selections(dataset, topology, config.bond_mode)?;
    reporter.report(Progress::PhaseFinish);

    if config.alignment != AlignmentPolicy::None {
        warn!(
            "Rigid alignment is unavailable for streamed trajectories; supply an already superposed trajectory"
        );
    }

    reporter.report(Progress::PhaseStart {
        name: "Averaging geometry",
    });
    let (f_avg, n_frames) =
        average_geometry_matrix_streamed(source, topology.len(), &selections)?;
    reporter.report(Progress::PhaseFinish);

    let measured = dataset.couplings();
    let tensor = solve_alignment_tensor(&f_avg, &measured)?;

    let predicted = match config.mode {
        OutputMode::Average => Predicted::Average(back_calculate(&f_avg, &tensor)),
        OutputMode::Full => {
            reporter.report(Progress::PhaseStart {
                name: "Back-calculating per frame",
            });
            let mut rows: Vec<RowDVector<f64>> = Vec::with_capacity(n_frames);
            for (index, frame) in source.open()?.enumerate() {
                let frame = frame?;
                if frame.len() != topology.len() {
                    return Err(EngineError::FrameSizeMismatch {
                        frame: index,
                        found: frame.len(),
                        expected: topology.len(),
                    });
                }
                let f = build_geometry_matrix(&selections, &frame)?;
                rows.push(back_calculate(&f, &tensor).transpose());
            }
            reporter.report(Progress::PhaseFinish);
            if rows.len() != n_frames {
                return Err(EngineError::FrameSource(format!(
                    "Frame count changed between passes: {} then {}",
                    n_frames,
                    rows.len()
                )));
            }
            Predicted::Full(DMatrix::from_rows(&rows))
        }
    };

    info!(
        bonds = selections.len(),
        frames = n_frames,
        "Streamed fit complete"
    );
    Ok(FitOutcome {
        experimental: measured,
        predicted,
    })
}
