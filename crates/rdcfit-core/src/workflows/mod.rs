//! # Workflows Module
//!
//! High-level entry points that execute the complete RDC back-calculation:
//! resolve bonds, align the trajectory, average the geometry matrix, solve
//! the alignment tensor, and back-calculate predicted couplings.
//!
//! - [`fit`] - In-memory and streamed trajectory fits.

pub mod fit;
