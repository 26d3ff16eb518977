//! # rdcfit Core Library
//!
//! A library for back-calculating Residual Dipolar Couplings (RDCs) from
//! molecular-dynamics trajectories and fitting them against experimental
//! measurements via the alignment-tensor least-squares procedure.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict three-layer architecture to ensure a
//! clear separation of concerns, making it modular, testable, and extensible.
//!
//! - **[`core`]: The Foundation.** Contains stateless data models
//!   (`BondRecord`, `ExperimentalDataset`, `Topology`, `Trajectory`), the
//!   experimental RDC table reader, and the pure geometry kernel
//!   (bond vectors, bilinear tensor terms, amide N-H reconstruction).
//!
//! - **[`engine`]: The Pipeline.** This stateful layer implements the
//!   numerical stages: bond-to-atom resolution, reference-frame selection by
//!   all-pairs RMSD minimization, rigid superposition, per-frame geometry
//!   matrix assembly, frame averaging (in-memory and streamed), and the
//!   alignment-tensor solver.
//!
//! - **[`workflows`]: The Public API.** This is the highest-level,
//!   user-facing layer. It ties the `engine` and `core` together to execute
//!   the complete fit: parse, resolve, align, average, solve, back-calculate.

pub mod core;
pub mod engine;
pub mod workflows;
