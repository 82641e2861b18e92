//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - resolves raw inputs into validated settings
//! - runs the fit or curve pipeline against the remote service
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;

use crate::cli::{Cli, Command, CurveArgs, FitArgs};
use crate::data::ApiClient;
use crate::domain::{
    RawCurveInputs, RawFitInputs, resolve_curve_settings, resolve_fit_settings, resolve_guess,
    resolve_window,
};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `pilefit` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let client = ApiClient::from_env(cli.api_url.clone());

    match cli.command {
        Command::Fit(args) => handle_fit(&client, args),
        Command::Curve(args) => handle_curve(&client, args),
    }
}

fn handle_fit(client: &ApiClient, args: FitArgs) -> Result<(), AppError> {
    let samples = crate::io::ingest::load_samples(&args.csv)?;

    let raw = RawFitInputs {
        t_ini: args.t_ini.clone(),
        diametro: args.diameter.clone(),
        c_cim: args.cement.clone(),
        confianca_pct: args.confidence.clone(),
        eps_rel: args.eps_rel.clone(),
        bounds_inf: args.bounds_inf.clone(),
        bounds_sup: args.bounds_sup.clone(),
    };
    let settings = resolve_fit_settings(&raw);
    // An omitted --guess means "let the service choose its own starting
    // point"; a supplied-but-unparsable one degrades the same way.
    let guess = resolve_guess(&args.guess, !args.guess.is_empty());

    let output = pipeline::run_fit(client, &samples, settings, guess)?;

    println!("{}", crate::report::format_fit_summary(&output));
    if args.plot && !args.no_plot {
        let datasets = crate::plot::project_fit_series(&output);
        println!(
            "{}",
            crate::plot::render_ascii(&datasets, args.width, args.height)
        );
    }

    Ok(())
}

fn handle_curve(client: &ApiClient, args: CurveArgs) -> Result<(), AppError> {
    // Validated locally; an incomplete vector never reaches the network.
    let Some(params) = resolve_guess(&args.params, true) else {
        return Err(AppError::data(
            "--params must supply all 9 parameters as finite numbers.",
        ));
    };

    let raw = RawCurveInputs {
        t_ini: args.t_ini.clone(),
        diametro: args.diameter.clone(),
        c_cim: args.cement.clone(),
    };
    let settings = resolve_curve_settings(&raw);
    let window = resolve_window(
        args.t_min.as_deref(),
        args.t_max.as_deref(),
        args.n_points.as_deref(),
    );

    let curve = pipeline::run_curve(client, params, settings, window)?;

    println!("{}", crate::report::format_curve_summary(&curve, &window));
    if args.plot && !args.no_plot {
        let dataset = crate::plot::project_curve_series(&curve);
        println!(
            "{}",
            crate::plot::render_ascii(&[dataset], args.width, args.height)
        );
    }

    if let Some(path) = &args.export {
        crate::io::export::write_curve_csv(path, &curve)?;
        println!("Curve CSV written to '{}'.", path.display());
    }

    Ok(())
}
