//! Remote estimation-service integration.

pub mod api;

pub use api::*;
