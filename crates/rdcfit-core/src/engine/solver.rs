use super::error::EngineError;
use nalgebra::{DMatrix, DVector};

/// Solves `F · A ≈ measured` for the 5-component alignment tensor by
/// ordinary least squares.
///
/// The SVD cutoff is zero: every nonzero singular value participates, with
/// no rank truncation.
pub fn solve_alignment_tensor(
    f_avg: &DMatrix<f64>,
    measured: &DVector<f64>,
) -> Result<DVector<f64>, EngineError> {
    if f_avg.nrows() != measured.len() {
        return Err(EngineError::Internal(format!(
            "Geometry matrix has {} rows but {} couplings were measured",
            f_avg.nrows(),
            measured.len()
        )));
    }

    let svd = f_avg.clone().svd(true, true);
    svd.solve(measured, 0.0).map_err(EngineError::Solve)
}

/// Back-calculates predicted couplings: `F · A`, elementwise per bond.
pub fn back_calculate(f: &DMatrix<f64>, tensor: &DVector<f64>) -> DVector<f64> {
    f * tensor
}
