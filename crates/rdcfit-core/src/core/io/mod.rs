//! Input parsing for the experimental RDC table format.
//!
//! The table is NMRPipe-like but not identical; see [`rdc_table`] for the
//! line grammar and the permissive-parsing policy.

pub mod rdc_table;
