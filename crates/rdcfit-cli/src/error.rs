use rdcfit::core::io::rdc_table::RdcTableError;
use rdcfit::core::models::trajectory::TrajectoryError;
use rdcfit::engine::error::EngineError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Failed to read RDC table: {0}")]
    Table(#[from] RdcTableError),

    #[error(transparent)]
    Trajectory(#[from] TrajectoryError),

    #[error("Failed to parse file '{path}' at line {line}: {message}", path = path.display())]
    FileParsing {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
