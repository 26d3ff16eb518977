//! # Core Module
//!
//! Stateless building blocks for RDC back-calculation: the data models shared
//! by the whole pipeline, the experimental-file reader, and the geometry
//! kernel.
//!
//! ## Architecture
//!
//! - **Data Models** ([`models`]) - Bond records, experimental datasets,
//!   resolved atom selections, topologies, and trajectories
//! - **File I/O** ([`io`]) - Parsing of the NMRPipe-like experimental RDC
//!   table format
//! - **Mathematical Utilities** ([`utils`]) - Vector normalization, bond
//!   vectors, bilinear tensor terms, and amide N-H reconstruction

pub mod io;
pub mod models;
pub mod utils;
