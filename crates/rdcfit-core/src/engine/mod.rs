//! # Engine Module
//!
//! The stateful pipeline stages behind RDC back-calculation.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Output mode, alignment policy, bond mode
//! - **Error Handling** ([`error`]) - Pipeline error type and propagation
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//! - **Resolution** ([`resolve`]) - Bond records to trajectory atom indices
//! - **Superposition** ([`superpose`]) - Kabsch rigid alignment and RMSD
//! - **Reference Selection** ([`reference`]) - All-pairs RMSD minimization
//! - **Matrix Assembly** ([`matrix`]) - Per-frame bilinear geometry matrices
//! - **Averaging** ([`average`]) - In-memory and streamed frame averaging
//! - **Solver** ([`solver`]) - Alignment-tensor least squares and
//!   back-calculation

pub mod average;
pub mod config;
pub mod error;
pub mod matrix;
pub mod progress;
pub mod reference;
pub mod resolve;
pub mod solver;
pub mod superpose;
