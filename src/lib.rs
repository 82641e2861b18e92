//! `pilefit` library crate.
//!
//! The binary (`pilefit`) is a thin wrapper around this library so that:
//!
//! - core logic (ingestion, config resolution, wire contracts, projection)
//!   is testable without spawning processes
//! - modules are reusable (e.g., a future GUI front-end)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod plot;
pub mod report;
