//! Input/output helpers.
//!
//! - tolerant monitoring-CSV ingest (`ingest`)
//! - curve CSV export (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
