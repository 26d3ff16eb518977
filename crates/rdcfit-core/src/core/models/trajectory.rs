use super::topology::Topology;
use nalgebra::Point3;
use thiserror::Error;

/// Cartesian coordinates of every atom for a single time step.
pub type Frame = Vec<Point3<f64>>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrajectoryError {
    #[error("Frame {frame} has {found} atoms but the topology defines {expected}")]
    FrameSizeMismatch {
        frame: usize,
        found: usize,
        expected: usize,
    },
}

/// An in-memory trajectory: an atom table plus one coordinate buffer per
/// frame.
///
/// The coordinate buffer is mutated at most once, by rigid superposition
/// onto a reference frame, before any geometry extraction reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    topology: Topology,
    frames: Vec<Frame>,
}

impl Trajectory {
    /// Builds a trajectory, checking that every frame matches the topology's
    /// atom count.
    pub fn new(topology: Topology, frames: Vec<Frame>) -> Result<Self, TrajectoryError> {
        let expected = topology.len();
        for (index, frame) in frames.iter().enumerate() {
            if frame.len() != expected {
                return Err(TrajectoryError::FrameSizeMismatch {
                    frame: index,
                    found: frame.len(),
                    expected,
                });
            }
        }
        Ok(Self { topology, frames })
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn n_frames(&self) -> usize {
        self.frames.len()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub(crate) fn frames_mut(&mut self) -> &mut [Frame] {
        &mut self.frames
    }

    /// Collects the coordinates of the given atoms in the given frame.
    pub fn atom_subset(&self, frame: usize, atom_indices: &[usize]) -> Vec<Point3<f64>> {
        let coords = &self.frames[frame];
        atom_indices.iter().map(|&index| coords[index]).collect()
    }
}
