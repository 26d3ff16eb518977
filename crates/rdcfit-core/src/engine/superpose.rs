use super::error::EngineError;
use crate::core::models::trajectory::Trajectory;
use nalgebra::{Matrix3, Point3, Vector3};

fn centroid(points: &[Point3<f64>]) -> Point3<f64> {
    let mut acc = Vector3::zeros();
    for point in points {
        acc += point.coords;
    }
    Point3::from(acc / points.len() as f64)
}

fn centered(points: &[Point3<f64>]) -> (Vec<Vector3<f64>>, Point3<f64>) {
    let center = centroid(points);
    (points.iter().map(|point| point - center).collect(), center)
}

/// Optimal rotation mapping the centered `moving` set onto the centered
/// `reference` set (Kabsch: SVD of the covariance matrix, with the
/// reflection case corrected through the determinant sign).
fn kabsch_rotation(
    moving: &[Vector3<f64>],
    reference: &[Vector3<f64>],
) -> Result<Matrix3<f64>, EngineError> {
    let mut covariance = Matrix3::zeros();
    for (m, r) in moving.iter().zip(reference.iter()) {
        covariance += *m * r.transpose();
    }

    let svd = covariance.svd(true, true);
    let (u, v_t) = match (svd.u, svd.v_t) {
        (Some(u), Some(v_t)) => (u, v_t),
        _ => {
            return Err(EngineError::Internal(
                "SVD of the covariance matrix did not converge".to_string(),
            ));
        }
    };

    let mut v = v_t.transpose();
    if (v * u.transpose()).determinant() < 0.0 {
        v.column_mut(2).neg_mut();
    }
    Ok(v * u.transpose())
}

/// RMSD between two equal-length coordinate sets after optimal rigid
/// superposition of the first onto the second.
pub fn superposed_rmsd(a: &[Point3<f64>], b: &[Point3<f64>]) -> Result<f64, EngineError> {
    if a.len() != b.len() || a.is_empty() {
        return Err(EngineError::Internal(format!(
            "RMSD requires two equally sized, non-empty coordinate sets (got {} and {})",
            a.len(),
            b.len()
        )));
    }

    let (a_centered, _) = centered(a);
    let (b_centered, _) = centered(b);
    let rotation = kabsch_rotation(&a_centered, &b_centered)?;

    let squared_sum: f64 = a_centered
        .iter()
        .zip(b_centered.iter())
        .map(|(m, r)| (rotation * *m - *r).norm_squared())
        .sum();
    Ok((squared_sum / a.len() as f64).sqrt())
}

/// Rigidly superposes every frame onto `reference_frame`, in place.
///
/// The rotation and translation are fitted on `fit_atoms` (all atoms when
/// `None`) and applied to the whole frame. This is the single permitted
/// mutation of the trajectory's coordinate buffer; all geometry extraction
/// reads the superposed coordinates afterwards.
pub fn superpose_all(
    trajectory: &mut Trajectory,
    reference_frame: usize,
    fit_atoms: Option<&[usize]>,
) -> Result<(), EngineError> {
    if reference_frame >= trajectory.n_frames() {
        return Err(EngineError::Internal(format!(
            "Reference frame {reference_frame} out of range for {} frames",
            trajectory.n_frames()
        )));
    }

    let all_atoms: Vec<usize>;
    let fit: &[usize] = match fit_atoms {
        Some(atoms) => atoms,
        None => {
            all_atoms = (0..trajectory.topology().len()).collect();
            &all_atoms
        }
    };
    if fit.is_empty() {
        return Err(EngineError::Internal(
            "Superposition fit selection is empty".to_string(),
        ));
    }

    let (reference_centered, reference_center) =
        centered(&trajectory.atom_subset(reference_frame, fit));

    for frame in 0..trajectory.n_frames() {
        let (moving_centered, moving_center) = centered(&trajectory.atom_subset(frame, fit));
        let rotation = kabsch_rotation(&moving_centered, &reference_centered)?;
        for point in trajectory.frames_mut()[frame].iter_mut() {
            *point = reference_center + rotation * (*point - moving_center);
        }
    }
    Ok(())
}
