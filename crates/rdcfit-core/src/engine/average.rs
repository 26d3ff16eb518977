use super::error::EngineError;
use super::matrix::build_geometry_matrix;
use super::progress::{Progress, ProgressReporter};
use crate::core::models::selection::BondSelection;
use crate::core::models::trajectory::{Frame, Trajectory};
use nalgebra::DMatrix;

/// A reopenable source of trajectory frames for streamed processing.
///
/// Each call to `open` yields a fresh iterator over the full trajectory, one
/// frame per item with bounded memory. An iterator is never rewound: the
/// `Full` output mode performs two passes, and each pass opens its own
/// iterator.
pub trait FrameSource {
    type Iter: Iterator<Item = Result<Frame, EngineError>>;

    fn open(&self) -> Result<Self::Iter, EngineError>;
}

/// An in-memory trajectory acts as a trivially reopenable frame source.
impl FrameSource for Trajectory {
    type Iter = std::vec::IntoIter<Result<Frame, EngineError>>;

    fn open(&self) -> Result<Self::Iter, EngineError> {
        let frames: Vec<_> = self.frames().iter().cloned().map(Ok).collect();
        Ok(frames.into_iter())
    }
}

/// Averages the geometry matrix over all frames of an in-memory trajectory.
pub fn average_geometry_matrix(
    trajectory: &Trajectory,
    selections: &[BondSelection],
    reporter: &ProgressReporter,
) -> Result<DMatrix<f64>, EngineError> {
    let n_frames = trajectory.n_frames();
    if n_frames == 0 {
        return Err(EngineError::EmptyTrajectory);
    }

    reporter.report(Progress::TaskStart {
        total_steps: n_frames as u64,
    });
    let mut sum = DMatrix::zeros(selections.len(), 5);
    for frame in trajectory.frames() {
        sum += build_geometry_matrix(selections, frame)?;
        reporter.report(Progress::TaskIncrement);
    }
    reporter.report(Progress::TaskFinish);

    Ok(sum / n_frames as f64)
}

/// Averages the geometry matrix over a streamed trajectory, one frame in
/// memory at a time. Returns the average and the number of frames consumed.
pub fn average_geometry_matrix_streamed<S: FrameSource>(
    source: &S,
    n_atoms: usize,
    selections: &[BondSelection],
) -> Result<(DMatrix<f64>, usize), EngineError> {
    let mut sum = DMatrix::zeros(selections.len(), 5);
    let mut n_frames = 0usize;
    for frame in source.open()? {
        let frame = frame?;
        if frame.len() != n_atoms {
            return Err(EngineError::FrameSizeMismatch {
                frame: n_frames,
                found: frame.len(),
                expected: n_atoms,
            });
        }
        sum += build_geometry_matrix(selections, &frame)?;
        n_frames += 1;
    }
    if n_frames == 0 {
        return Err(EngineError::EmptyTrajectory);
    }
    Ok((sum / n_frames as f64, n_frames))
}
