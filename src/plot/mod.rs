//! Plot projection and terminal rendering.
//!
//! - `series` maps fit/curve results into renderer-ready datasets
//! - `ascii` draws those datasets on a fixed character grid

pub mod ascii;
pub mod series;

pub use ascii::*;
pub use series::*;
