/// A bond record resolved to concrete 0-based trajectory atom indices.
///
/// `Direct` holds both bond atoms explicitly; `AmideReconstructed` holds the
/// backbone triple used to approximate an N-H direction when the trajectory
/// carries no hydrogens: C of the preceding residue, then N and CA of the
/// residue the coupling belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BondSelection {
    Direct { i: usize, j: usize },
    AmideReconstructed { c: usize, n: usize, ca: usize },
}
