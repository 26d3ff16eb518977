//! Mathematical utilities shared across the pipeline.

pub mod geometry;
