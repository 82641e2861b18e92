//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - built from raw CLI input and CSV uploads
//! - sent over the wire to the estimation service unchanged
//! - projected into plot series and exports
//!
//! Wire field names follow the service contract (Portuguese keys such as
//! `T_ini`, `diametro`, `chute`); Rust-side names stay snake_case via
//! `#[serde(rename)]`.

use serde::{Deserialize, Serialize};

/// Number of model parameters; every parameter vector and bounds array has
/// exactly this many components.
pub const N_PARAMS: usize = 9;

/// Canonical parameter order shared with the service.
pub const PARAM_NAMES: [&str; N_PARAMS] = [
    "dT_adi1", "dT_adi2", "tau1", "beta1", "tau2", "beta2", "k_rel", "alpha1", "alpha2",
];

/// One (time, temperature) measurement pair from monitoring data.
///
/// `t` is elapsed time in hours, `temp` in °C. Sequences keep upload order;
/// they are not required to be sorted and may contain duplicates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub t: f64,
    pub temp: f64,
}

/// Fixed-length vector of the 9 model parameters, in canonical order.
///
/// Invariant: all components are finite. Construction through
/// [`ParamVector::from_slice`] enforces it; a vector that cannot satisfy it
/// is treated as absent by callers rather than partially filled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamVector(pub [f64; N_PARAMS]);

impl ParamVector {
    /// Build from a slice; `None` unless it has exactly 9 finite components.
    pub fn from_slice(values: &[f64]) -> Option<Self> {
        if values.len() != N_PARAMS || values.iter().any(|v| !v.is_finite()) {
            return None;
        }
        let mut out = [0.0; N_PARAMS];
        out.copy_from_slice(values);
        Some(Self(out))
    }

    /// Default initial guess (alpha components in physical units, m²/h).
    pub fn default_guess() -> Self {
        Self([45.0, 40.0, 10.0, 3.0, 25.0, 1.5, 2.9, 0.0040, 0.0030])
    }

    /// Default lower bounds for the fit search.
    pub fn default_bounds_inf() -> Self {
        Self([5.0, 5.0, 1.0, 0.5, 1.0, 0.5, 0.5, 0.0005, 0.0003])
    }

    /// Default upper bounds for the fit search.
    pub fn default_bounds_sup() -> Self {
        Self([90.0, 90.0, 500.0, 10.0, 500.0, 10.0, 10.0, 0.0100, 0.0050])
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }
}

/// Global fit settings sent as the `config` object of a fit request.
///
/// Always fully populated: raw input that fails numeric parsing falls back to
/// its per-field default (see `resolve`). `confianca` is a fraction in (0, 1)
/// even though users enter a percentage. Bound ordering (`inf <= sup`) is not
/// enforced client-side; the service owns that check.
#[derive(Debug, Clone, Serialize)]
pub struct FitSettings {
    #[serde(rename = "T_ini")]
    pub t_ini: f64,
    pub diametro: f64,
    #[serde(rename = "C_cim")]
    pub c_cim: f64,
    pub confianca: f64,
    pub eps_rel: f64,
    pub bounds_inf: ParamVector,
    pub bounds_sup: ParamVector,
}

/// Physical settings sent as the `config` object of a curve request.
#[derive(Debug, Clone, Serialize)]
pub struct CurveSettings {
    #[serde(rename = "T_ini")]
    pub t_ini: f64,
    pub diametro: f64,
    #[serde(rename = "C_cim")]
    pub c_cim: f64,
}

/// Sampling window for synthetic curve generation.
///
/// Invariant: `n >= 2` (resolution clamps it to `[50, 2000]`), so the linear
/// grid denominator `n - 1` is never zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleWindow {
    pub t_min: f64,
    pub t_max: f64,
    pub n: usize,
}

/// Per-parameter estimate returned by the fit service.
#[derive(Debug, Clone, Deserialize)]
pub struct ParamEstimate {
    pub nome: String,
    pub estimado: f64,
    pub se: f64,
    pub ic_inf: f64,
    pub ic_sup: f64,
    /// Coefficient of variation, percent. Values above 30 indicate a weakly
    /// identified parameter and are highlighted in reports.
    pub cv: f64,
}

/// Successful fit response body.
///
/// Immutable once received; each new fit replaces the previous result
/// wholesale. `v_plot` (temperature rate) is returned by the service but not
/// plotted by this client.
#[derive(Debug, Clone, Deserialize)]
pub struct FitResponse {
    pub erro_mae: Option<f64>,
    #[serde(rename = "cond_FtF")]
    pub cond_ftf: Option<f64>,
    pub stats_aviso: Option<String>,
    pub confianca: Option<f64>,
    #[serde(default)]
    pub parametros: Vec<ParamEstimate>,
    pub t_plot: Vec<f64>,
    #[serde(rename = "T_plot")]
    pub temp_plot: Vec<f64>,
    pub v_plot: Option<Vec<f64>>,
    #[serde(rename = "CI_lwr")]
    pub ci_lwr: Vec<f64>,
    #[serde(rename = "CI_upr")]
    pub ci_upr: Vec<f64>,
}

impl FitResponse {
    /// Confidence level as a display percentage, falling back to 95 when the
    /// service omitted it.
    pub fn confidence_pct(&self) -> f64 {
        self.confianca.map(|c| c * 100.0).unwrap_or(95.0)
    }
}

/// A fit response augmented with the observed samples it was fitted from,
/// which the service does not echo back.
#[derive(Debug, Clone)]
pub struct FitOutput {
    pub response: FitResponse,
    pub t_obs: Vec<f64>,
    pub temp_obs: Vec<f64>,
}

/// Successful curve-sampling response body.
///
/// Invariant: `t_plot.len() == temp_plot.len()`.
#[derive(Debug, Clone, Deserialize)]
pub struct CurveResponse {
    pub t_plot: Vec<f64>,
    #[serde(rename = "T_plot")]
    pub temp_plot: Vec<f64>,
}

impl CurveResponse {
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.t_plot.iter().copied().zip(self.temp_plot.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn param_vector_rejects_wrong_length_and_non_finite() {
        assert!(ParamVector::from_slice(&[1.0; 8]).is_none());
        assert!(ParamVector::from_slice(&[1.0; 10]).is_none());

        let mut nine = [1.0; 9];
        assert!(ParamVector::from_slice(&nine).is_some());
        nine[4] = f64::NAN;
        assert!(ParamVector::from_slice(&nine).is_none());
        nine[4] = f64::INFINITY;
        assert!(ParamVector::from_slice(&nine).is_none());
    }

    #[test]
    fn param_vector_serializes_as_plain_array() {
        let v = ParamVector::default_bounds_inf();
        let json = serde_json::to_string(&v).unwrap();
        assert!(json.starts_with('['));
        let back: ParamVector = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }

    #[test]
    fn fit_settings_uses_wire_keys() {
        let settings = FitSettings {
            t_ini: 25.0,
            diametro: 0.9,
            c_cim: 300.0,
            confianca: 0.95,
            eps_rel: 1e-4,
            bounds_inf: ParamVector::default_bounds_inf(),
            bounds_sup: ParamVector::default_bounds_sup(),
        };
        let json = serde_json::to_value(&settings).unwrap();
        assert!(json.get("T_ini").is_some());
        assert!(json.get("C_cim").is_some());
        assert!(json.get("t_ini").is_none());
    }

    #[test]
    fn fit_response_parses_service_shape() {
        let body = r#"{
            "erro_mae": 0.42,
            "cond_FtF": 1.5e6,
            "parametros": [
                {"nome": "dT_adi1", "estimado": 45.1, "se": 1.2, "ic_inf": 42.7, "ic_sup": 47.5, "cv": 2.7}
            ],
            "t_plot": [0.5, 1.0],
            "T_plot": [26.0, 30.0],
            "v_plot": [1.0, 2.0],
            "CI_lwr": [25.0, 29.0],
            "CI_upr": [27.0, 31.0]
        }"#;
        let res: FitResponse = serde_json::from_str(body).unwrap();
        assert_eq!(res.parametros.len(), 1);
        assert_eq!(res.temp_plot, vec![26.0, 30.0]);
        assert!(res.confianca.is_none());
        assert_eq!(res.confidence_pct(), 95.0);
    }
}
