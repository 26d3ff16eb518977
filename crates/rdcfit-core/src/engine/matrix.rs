use super::error::EngineError;
use crate::core::models::selection::BondSelection;
use crate::core::utils::geometry;
use nalgebra::{DMatrix, Point3};

/// Builds the per-frame geometry matrix: one bilinear-terms row per resolved
/// bond, in selection order, shape `(selections.len(), 5)`.
///
/// Pure function of the frame coordinates and the selection list; the row
/// order must match the dataset order established at parse time.
pub fn build_geometry_matrix(
    selections: &[BondSelection],
    frame: &[Point3<f64>],
) -> Result<DMatrix<f64>, EngineError> {
    let mut matrix = DMatrix::zeros(selections.len(), 5);
    for (row, selection) in selections.iter().enumerate() {
        let direction = match *selection {
            BondSelection::Direct { i, j } => geometry::bond_vector(i, j, frame)?,
            BondSelection::AmideReconstructed { c, n, ca } => {
                geometry::reconstruct_amide_nh(c, n, ca, frame)?
            }
        };
        let terms = geometry::bilinear_terms(&direction);
        for (column, term) in terms.iter().enumerate() {
            matrix[(row, column)] = *term;
        }
    }
    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-12;

    #[test]
    fn rows_follow_selection_order() {
        // Atom 0 at the origin, atom 1 on +x, atom 2 on +y.
        let frame = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(0.0, 3.0, 0.0),
        ];
        let selections = vec![
            BondSelection::Direct { i: 0, j: 1 },
            BondSelection::Direct { i: 0, j: 2 },
        ];

        let matrix = build_geometry_matrix(&selections, &frame).unwrap();
        assert_eq!(matrix.nrows(), 2);
        assert_eq!(matrix.ncols(), 5);

        // +x bond: {1, 0, 0, 0, 0}; +y bond: {0, 1, 0, 0, 0}.
        let expected = [[1.0, 0.0, 0.0, 0.0, 0.0], [0.0, 1.0, 0.0, 0.0, 0.0]];
        for (row, row_expected) in expected.iter().enumerate() {
            for (column, value) in row_expected.iter().enumerate() {
                assert!((matrix[(row, column)] - value).abs() < TOLERANCE);
            }
        }
    }

    #[test]
    fn amide_selection_uses_reconstructed_direction() {
        // Frame layout: [C, N, CA].
        let frame = vec![
            Point3::new(-1.0, 0.5, 0.0),
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, -0.8, 0.3),
        ];
        let selections = vec![BondSelection::AmideReconstructed { c: 0, n: 1, ca: 2 }];

        let matrix = build_geometry_matrix(&selections, &frame).unwrap();
        let direction = geometry::reconstruct_amide_nh(0, 1, 2, &frame).unwrap();
        let terms = geometry::bilinear_terms(&direction);
        for (column, term) in terms.iter().enumerate() {
            assert!((matrix[(0, column)] - term).abs() < TOLERANCE);
        }
    }

    #[test]
    fn coincident_atoms_surface_a_geometry_error() {
        let origin = Point3::new(0.0, 0.0, 0.0);
        let frame = vec![origin, origin];
        let selections = vec![BondSelection::Direct { i: 0, j: 1 }];
        assert!(matches!(
            build_geometry_matrix(&selections, &frame),
            Err(EngineError::Geometry { .. })
        ));
    }
}
