//! Command-line parsing for the hydration-heat curve client.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the pipeline code.
//!
//! Numeric options are accepted as raw strings on purpose: resolution with
//! per-field fallback (including decimal-comma tolerance) belongs to the
//! configuration model, not to clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "pilefit",
    version,
    about = "Hydration-heat curve fitting client for instrumented foundation piles"
)]
pub struct Cli {
    /// Base URL of the estimation service (overrides PILEFIT_API_URL).
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit the 9-parameter thermal model to monitoring data from a CSV upload.
    Fit(FitArgs),
    /// Sample a synthetic curve at an explicit 9-parameter vector (no fitting).
    Curve(CurveArgs),
}

/// Options for `pilefit fit`.
#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// Monitoring CSV with (time_h, temperature_C) rows.
    #[arg(long, value_name = "CSV")]
    pub csv: PathBuf,

    /// Initial temperature T_ini (°C). Default 25.
    #[arg(long)]
    pub t_ini: Option<String>,

    /// Pile diameter (m). Default 0.9.
    #[arg(long)]
    pub diameter: Option<String>,

    /// Cement content C_cim (kg/m³). Default 300.
    #[arg(long)]
    pub cement: Option<String>,

    /// Confidence level as a percentage. Default 95.
    #[arg(long)]
    pub confidence: Option<String>,

    /// Relative convergence tolerance. Default 1e-4.
    #[arg(long)]
    pub eps_rel: Option<String>,

    /// Lower bounds, 9 comma-separated values (all-or-nothing).
    #[arg(long, value_delimiter = ',', value_name = "B1,..,B9")]
    pub bounds_inf: Vec<String>,

    /// Upper bounds, 9 comma-separated values (all-or-nothing).
    #[arg(long, value_delimiter = ',', value_name = "B1,..,B9")]
    pub bounds_sup: Vec<String>,

    /// Initial guess, 9 comma-separated values
    /// (dT_adi1,dT_adi2,tau1,beta1,tau2,beta2,k_rel,alpha1,alpha2).
    /// Omit to let the service choose its own.
    #[arg(long, value_delimiter = ',', value_name = "P1,..,P9")]
    pub guess: Vec<String>,

    /// Render a terminal plot of the fit (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}

/// Options for `pilefit curve`.
#[derive(Debug, Parser, Clone)]
pub struct CurveArgs {
    /// Parameter vector, 9 comma-separated values
    /// (dT_adi1,dT_adi2,tau1,beta1,tau2,beta2,k_rel,alpha1,alpha2).
    #[arg(long, value_delimiter = ',', value_name = "P1,..,P9")]
    pub params: Vec<String>,

    /// Initial temperature T_ini (°C). Default 25.
    #[arg(long)]
    pub t_ini: Option<String>,

    /// Pile diameter (m). Default 0.9.
    #[arg(long)]
    pub diameter: Option<String>,

    /// Cement content C_cim (kg/m³). Default 300.
    #[arg(long)]
    pub cement: Option<String>,

    /// Sampling window start (h). Default 0.1.
    #[arg(long)]
    pub t_min: Option<String>,

    /// Sampling window end (h). Default 100.
    #[arg(long)]
    pub t_max: Option<String>,

    /// Number of grid points, clamped to [50, 2000]. Default 300.
    #[arg(long)]
    pub n_points: Option<String>,

    /// Export the generated curve as CSV (tempo_h,temperatura_C).
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Render a terminal plot of the curve (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}
