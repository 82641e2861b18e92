//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - measurement samples (`Sample`) and the 9-component `ParamVector`
//! - fit/curve request settings (`FitSettings`, `CurveSettings`)
//! - service result types (`FitResponse`, `CurveResponse`, `ParamEstimate`)
//! - resolution of raw user input into validated settings (`resolve`)

pub mod resolve;
pub mod types;

pub use resolve::*;
pub use types::*;
