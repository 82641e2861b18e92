//! Resolution of raw user input into validated settings.
//!
//! Every numeric field arrives as a raw string (CLI flag, form field) and is
//! resolved independently: a value that fails to parse falls back to its
//! documented default instead of failing the whole operation. The two
//! exceptions are the bounds arrays, which revert to their default vectors
//! all-or-nothing, and the initial guess, which degrades to "no guess
//! supplied" unless all 9 components parse.

use crate::domain::types::{
    CurveSettings, FitSettings, N_PARAMS, ParamVector, SampleWindow,
};

pub const DEFAULT_T_INI: f64 = 25.0;
pub const DEFAULT_DIAMETRO: f64 = 0.9;
pub const DEFAULT_C_CIM: f64 = 300.0;
pub const DEFAULT_CONFIANCA: f64 = 0.95;
pub const DEFAULT_EPS_REL: f64 = 1e-4;

pub const DEFAULT_T_MIN: f64 = 0.1;
pub const DEFAULT_T_MAX: f64 = 100.0;
pub const DEFAULT_N_POINTS: usize = 300;
pub const MIN_N_POINTS: usize = 50;
pub const MAX_N_POINTS: usize = 2000;

/// Raw fit-configuration input, prior to resolution.
///
/// `confianca_pct` is the confidence level as entered (a percentage); the
/// percentage-to-fraction conversion happens exactly once, here.
#[derive(Debug, Clone, Default)]
pub struct RawFitInputs {
    pub t_ini: Option<String>,
    pub diametro: Option<String>,
    pub c_cim: Option<String>,
    pub confianca_pct: Option<String>,
    pub eps_rel: Option<String>,
    pub bounds_inf: Vec<String>,
    pub bounds_sup: Vec<String>,
}

/// Raw physical settings for curve sampling.
#[derive(Debug, Clone, Default)]
pub struct RawCurveInputs {
    pub t_ini: Option<String>,
    pub diametro: Option<String>,
    pub c_cim: Option<String>,
}

/// Lenient numeric parsing shared by all raw inputs.
///
/// Strips surrounding whitespace and stray quote characters, normalizes a
/// decimal comma to a decimal point, and requires the result to be finite.
pub fn parse_num(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '"' | '\''))
        .collect();
    let normalized = cleaned.trim().replacen(',', ".", 1);
    let v = normalized.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

fn resolve_field(raw: Option<&str>, default: f64) -> f64 {
    raw.and_then(parse_num).unwrap_or(default)
}

/// Resolve a bounds array all-or-nothing: anything other than exactly 9
/// finite-parsing entries reverts the whole array to `default`.
fn resolve_bounds(raw: &[String], default: ParamVector) -> ParamVector {
    if raw.len() != N_PARAMS {
        return default;
    }
    let parsed: Option<Vec<f64>> = raw.iter().map(|s| parse_num(s)).collect();
    parsed
        .and_then(|values| ParamVector::from_slice(&values))
        .unwrap_or(default)
}

/// Resolve global fit settings. Total: never fails, always fully populated.
pub fn resolve_fit_settings(raw: &RawFitInputs) -> FitSettings {
    let confianca = raw
        .confianca_pct
        .as_deref()
        .and_then(parse_num)
        .map(|pct| pct / 100.0)
        .unwrap_or(DEFAULT_CONFIANCA);

    FitSettings {
        t_ini: resolve_field(raw.t_ini.as_deref(), DEFAULT_T_INI),
        diametro: resolve_field(raw.diametro.as_deref(), DEFAULT_DIAMETRO),
        c_cim: resolve_field(raw.c_cim.as_deref(), DEFAULT_C_CIM),
        confianca,
        eps_rel: resolve_field(raw.eps_rel.as_deref(), DEFAULT_EPS_REL),
        bounds_inf: resolve_bounds(&raw.bounds_inf, ParamVector::default_bounds_inf()),
        bounds_sup: resolve_bounds(&raw.bounds_sup, ParamVector::default_bounds_sup()),
    }
}

/// Resolve the physical settings for a curve request.
pub fn resolve_curve_settings(raw: &RawCurveInputs) -> CurveSettings {
    CurveSettings {
        t_ini: resolve_field(raw.t_ini.as_deref(), DEFAULT_T_INI),
        diametro: resolve_field(raw.diametro.as_deref(), DEFAULT_DIAMETRO),
        c_cim: resolve_field(raw.c_cim.as_deref(), DEFAULT_C_CIM),
    }
}

/// Resolve an optional initial guess.
///
/// When `enabled` is false the result is absent regardless of field contents
/// (the service then chooses its own default guess). When enabled, the guess
/// is present only if all 9 fields parse to finite numbers; a single bad
/// field degrades silently to "no guess supplied" rather than failing the
/// request.
pub fn resolve_guess(raw: &[String], enabled: bool) -> Option<ParamVector> {
    if !enabled || raw.len() != N_PARAMS {
        return None;
    }
    let parsed: Option<Vec<f64>> = raw.iter().map(|s| parse_num(s)).collect();
    parsed.and_then(|values| ParamVector::from_slice(&values))
}

/// Resolve the curve sampling window.
///
/// `t_min`/`t_max` default to 0.1/100 when unparsable; `n` defaults to 300
/// and is clamped to `[50, 2000]`, which also guarantees `n >= 2` for the
/// grid denominator.
pub fn resolve_window(
    t_min: Option<&str>,
    t_max: Option<&str>,
    n_points: Option<&str>,
) -> SampleWindow {
    let n = n_points
        .and_then(parse_num)
        .map(|v| v.trunc() as i64)
        .filter(|&v| v > 0)
        .unwrap_or(DEFAULT_N_POINTS as i64);
    let n = (n.max(MIN_N_POINTS as i64) as usize).min(MAX_N_POINTS);

    SampleWindow {
        t_min: resolve_field(t_min, DEFAULT_T_MIN),
        t_max: resolve_field(t_max, DEFAULT_T_MAX),
        n,
    }
}
