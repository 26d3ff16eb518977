use super::error::EngineError;
use super::progress::{Progress, ProgressReporter};
use super::superpose::superposed_rmsd;
use crate::core::models::trajectory::Trajectory;
use nalgebra::DMatrix;
use tracing::debug;

/// Selects the superposition reference frame: the frame minimizing the
/// summed alpha-carbon RMSD to every other frame (Olsson et al. 2017).
///
/// The full pairwise RMSD matrix is symmetric, so only the upper triangle is
/// evaluated and mirrored. Ties break to the first index attaining the
/// minimum, which makes the choice independent of traversal order.
pub fn select_reference_frame(
    trajectory: &Trajectory,
    reporter: &ProgressReporter,
) -> Result<usize, EngineError> {
    let n_frames = trajectory.n_frames();
    if n_frames == 0 {
        return Err(EngineError::EmptyTrajectory);
    }

    let alpha_carbons = trajectory.topology().alpha_carbons();
    if alpha_carbons.is_empty() {
        return Err(EngineError::NoAlphaCarbons);
    }

    let subsets: Vec<_> = (0..n_frames)
        .map(|frame| trajectory.atom_subset(frame, &alpha_carbons))
        .collect();

    let pair_count = n_frames * (n_frames + 1) / 2;
    reporter.report(Progress::TaskStart {
        total_steps: pair_count as u64,
    });

    let mut rmsd = DMatrix::zeros(n_frames, n_frames);
    for i in 0..n_frames {
        for j in i..n_frames {
            let value = superposed_rmsd(&subsets[i], &subsets[j])?;
            rmsd[(i, j)] = value;
            rmsd[(j, i)] = value;
            reporter.report(Progress::TaskIncrement);
        }
    }
    reporter.report(Progress::TaskFinish);

    let mut best_index = 0;
    let mut best_sum = f64::INFINITY;
    for i in 0..n_frames {
        let row_sum: f64 = (0..n_frames).map(|j| rmsd[(i, j)]).sum();
        if row_sum < best_sum {
            best_sum = row_sum;
            best_index = i;
        }
    }

    debug!(
        reference_frame = best_index,
        summed_rmsd = best_sum,
        "Selected superposition reference frame"
    );
    Ok(best_index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::topology::{Topology, TopologyAtom};
    use nalgebra::Point3;

    fn ca_topology(n_atoms: usize) -> Topology {
        Topology::new(
            (0..n_atoms)
                .map(|i| TopologyAtom::new("CA", i, "ALA"))
                .collect(),
        )
    }

    fn linear_frame(n_atoms: usize, spacing: f64) -> Vec<Point3<f64>> {
        (0..n_atoms)
            .map(|i| Point3::new(i as f64 * spacing, 0.0, 0.0))
            .collect()
    }

    #[test]
    fn picks_the_frame_closest_to_all_others() {
        // Chains with increasing inter-atom spacing; the middle spacing has
        // the smallest summed pairwise deviation.
        let frames = vec![
            linear_frame(4, 1.0),
            linear_frame(4, 1.1),
            linear_frame(4, 1.3),
        ];
        let trajectory = Trajectory::new(ca_topology(4), frames).unwrap();
        let reporter = ProgressReporter::new();
        assert_eq!(select_reference_frame(&trajectory, &reporter).unwrap(), 1);
    }

    #[test]
    fn ties_break_to_the_first_minimum() {
        let frames = vec![
            linear_frame(4, 1.1),
            linear_frame(4, 1.1),
            linear_frame(4, 1.4),
        ];
        let trajectory = Trajectory::new(ca_topology(4), frames).unwrap();
        let reporter = ProgressReporter::new();
        assert_eq!(select_reference_frame(&trajectory, &reporter).unwrap(), 0);
    }

    #[test]
    fn empty_trajectory_is_rejected() {
        let trajectory = Trajectory::new(ca_topology(4), Vec::new()).unwrap();
        let reporter = ProgressReporter::new();
        assert!(matches!(
            select_reference_frame(&trajectory, &reporter),
            Err(EngineError::EmptyTrajectory)
        ));
    }

    #[test]
    fn topology_without_alpha_carbons_is_rejected() {
        let topology = Topology::new(vec![TopologyAtom::new("N", 0, "ALA")]);
        let trajectory =
            Trajectory::new(topology, vec![vec![Point3::new(0.0, 0.0, 0.0)]]).unwrap();
        let reporter = ProgressReporter::new();
        assert!(matches!(
            select_reference_frame(&trajectory, &reporter),
            Err(EngineError::NoAlphaCarbons)
        ));
    }
}
