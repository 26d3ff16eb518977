use nalgebra::{Point3, Vector3};
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    #[error("Cannot normalize a zero-length vector")]
    DegenerateVector,
}

/// Returns `v / ||v||`, rejecting zero-length input.
pub fn normalize(v: Vector3<f64>) -> Result<Vector3<f64>, GeometryError> {
    let norm = v.norm();
    if norm == 0.0 {
        return Err(GeometryError::DegenerateVector);
    }
    Ok(v / norm)
}

/// Normalized direction from atom `i` to atom `j` in the given frame.
pub fn bond_vector(i: usize, j: usize, frame: &[Point3<f64>]) -> Result<Vector3<f64>, GeometryError> {
    normalize(frame[j] - frame[i])
}

/// The symmetric-traceless bilinear basis of a unit vector.
///
/// Column order {x^2 - z^2, y^2 - z^2, 2xy, 2xz, 2yz} is dot-producted
/// against the solved alignment tensor later, so order and sign must not
/// change.
pub fn bilinear_terms(v: &Vector3<f64>) -> [f64; 5] {
    [
        v.x * v.x - v.z * v.z,
        v.y * v.y - v.z * v.z,
        2.0 * v.x * v.y,
        2.0 * v.x * v.z,
        2.0 * v.y * v.z,
    ]
}

/// Approximates the amide N-H direction from backbone atoms when the
/// trajectory carries no hydrogens: the unit C->N and CA->N vectors are
/// added first and the sum normalized.
pub fn reconstruct_amide_nh(
    c: usize,
    n: usize,
    ca: usize,
    frame: &[Point3<f64>],
) -> Result<Vector3<f64>, GeometryError> {
    let cn = bond_vector(c, n, frame)?;
    let can = bond_vector(ca, n, frame)?;
    normalize(cn + can)
}
