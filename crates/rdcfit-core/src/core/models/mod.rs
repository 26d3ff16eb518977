//! # Core Models Module
//!
//! Fundamental data structures for the RDC pipeline.
//!
//! ## Key Components
//!
//! - [`bond`] - One experimental bond entry as read from the RDC table
//! - [`dataset`] - The ordered sequence of bond entries and measured couplings
//! - [`selection`] - A bond resolved to concrete trajectory atom indices
//! - [`topology`] - The atom table and its selection query
//! - [`trajectory`] - Per-frame Cartesian coordinates tied to a topology

pub mod bond;
pub mod dataset;
pub mod selection;
pub mod topology;
pub mod trajectory;
