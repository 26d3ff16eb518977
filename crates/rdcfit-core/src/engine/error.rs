use crate::core::io::rdc_table::RdcTableError;
use crate::core::utils::geometry::GeometryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to read RDC table: {source}")]
    RdcTable {
        #[from]
        source: RdcTableError,
    },

    #[error("Geometry failure: {source}")]
    Geometry {
        #[from]
        source: GeometryError,
    },

    #[error("No atom named '{atom}' in residue {residue} (0-based)")]
    AtomNotFound { residue: usize, atom: String },

    #[error(
        "Atom query for '{atom}' in residue {residue} (0-based) matched {count} atoms; expected exactly one"
    )]
    AmbiguousAtom {
        residue: usize,
        atom: String,
        count: usize,
    },

    #[error("Bond entry for residues {resid_i}/{resid_j} is unusable: {reason}")]
    MalformedBond {
        resid_i: i32,
        resid_j: i32,
        reason: &'static str,
    },

    #[error(
        "Amide reconstruction is not supported for the first residue (residue id {resid}); use a trajectory with hydrogens"
    )]
    UnsupportedResidue { resid: i32 },

    #[error("Experimental dataset contains no bond entries")]
    EmptyDataset,

    #[error("Trajectory contains no frames")]
    EmptyTrajectory,

    #[error("Trajectory topology contains no alpha carbons for reference-frame selection")]
    NoAlphaCarbons,

    #[error("Frame {frame} has {found} atoms but the topology defines {expected}")]
    FrameSizeMismatch {
        frame: usize,
        found: usize,
        expected: usize,
    },

    #[error("Frame source error: {0}")]
    FrameSource(String),

    #[error("Least-squares solve failed: {0}")]
    Solve(&'static str),

    #[error("Internal logic error: {0}")]
    Internal(String),
}
