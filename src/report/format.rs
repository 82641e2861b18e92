//! Terminal report formatting.

use crate::domain::{CurveResponse, FitOutput, SampleWindow};

/// CV% above this marks a weakly identified parameter in the table.
const CV_WARN_PCT: f64 = 30.0;

/// Format the full fit summary: dataset size, fit error, conditioning
/// diagnostics, and the per-parameter estimate table.
pub fn format_fit_summary(output: &FitOutput) -> String {
    let res = &output.response;
    let mut out = String::new();

    out.push_str("=== pilefit - hydration-heat fit ===\n");
    out.push_str(&format!("Observed samples: n={}\n", output.t_obs.len()));
    out.push_str(&format!(
        "RMSE / MAE of fit: {} °C\n",
        fmt_opt(res.erro_mae, 4)
    ));

    if let Some(aviso) = &res.stats_aviso {
        match res.cond_ftf {
            Some(cond) => out.push_str(&format!("Warning: {aviso} [cond(F'F) = {cond:.2e}]\n")),
            None => out.push_str(&format!("Warning: {aviso}\n")),
        }
    } else if let Some(cond) = res.cond_ftf {
        out.push_str(&format!("cond(F'F) = {cond:.2e}\n"));
    }

    let pct = res.confidence_pct();
    out.push_str(&format!(
        "\nParameter estimates (CI at {pct:.0}%):\n"
    ));
    out.push_str(&format!(
        "{:<10} {:>12} {:>10} {:>12} {:>12} {:>8}\n",
        "param", "estimate", "SE", "CI lo", "CI hi", "CV%"
    ));
    for p in &res.parametros {
        let flag = if p.cv > CV_WARN_PCT { " !" } else { "" };
        out.push_str(&format!(
            "{:<10} {:>12.4} {:>10.4} {:>12.4} {:>12.4} {:>7.1}{flag}\n",
            p.nome, p.estimado, p.se, p.ic_inf, p.ic_sup, p.cv
        ));
    }

    out
}

/// Format the curve-generation summary.
pub fn format_curve_summary(curve: &CurveResponse, window: &SampleWindow) -> String {
    let mut out = String::new();
    out.push_str("=== pilefit - synthetic curve ===\n");
    out.push_str(&format!(
        "Window: t=[{:.2}, {:.2}] h, {} points\n",
        window.t_min, window.t_max, window.n
    ));

    let (temp_min, temp_max) = curve
        .temp_plot
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if temp_min.is_finite() {
        out.push_str(&format!("T range: [{temp_min:.2}, {temp_max:.2}] °C\n"));
    }

    out
}

fn fmt_opt(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.decimals$}"),
        _ => "—".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FitResponse, ParamEstimate};

    fn output_with(parametros: Vec<ParamEstimate>) -> FitOutput {
        FitOutput {
            response: FitResponse {
                erro_mae: Some(0.4321),
                cond_ftf: Some(1.5e6),
                stats_aviso: None,
                confianca: Some(0.95),
                parametros,
                t_plot: vec![],
                temp_plot: vec![],
                v_plot: None,
                ci_lwr: vec![],
                ci_upr: vec![],
            },
            t_obs: vec![0.0, 1.0, 2.0],
            temp_obs: vec![20.0, 30.0, 40.0],
        }
    }

    #[test]
    fn summary_includes_error_and_conditioning() {
        let text = format_fit_summary(&output_with(vec![]));
        assert!(text.contains("n=3"));
        assert!(text.contains("0.4321"));
        assert!(text.contains("cond(F'F) = 1.50e6"));
    }

    #[test]
    fn high_cv_parameters_are_flagged() {
        let estimates = vec![
            ParamEstimate {
                nome: "tau1".to_string(),
                estimado: 10.0,
                se: 0.5,
                ic_inf: 9.0,
                ic_sup: 11.0,
                cv: 5.0,
            },
            ParamEstimate {
                nome: "alpha2".to_string(),
                estimado: 0.003,
                se: 0.002,
                ic_inf: -0.001,
                ic_sup: 0.007,
                cv: 66.7,
            },
        ];
        let text = format_fit_summary(&output_with(estimates));
        let flagged: Vec<&str> = text.lines().filter(|l| l.ends_with('!')).collect();
        assert_eq!(flagged.len(), 1);
        assert!(flagged[0].contains("alpha2"));
    }

    #[test]
    fn missing_error_renders_dash() {
        let mut output = output_with(vec![]);
        output.response.erro_mae = None;
        let text = format_fit_summary(&output);
        assert!(text.contains("— °C"));
    }

    #[test]
    fn curve_summary_reports_window_and_range() {
        let curve = CurveResponse {
            t_plot: vec![0.1, 50.0, 100.0],
            temp_plot: vec![25.0, 61.2, 40.0],
        };
        let window = SampleWindow {
            t_min: 0.1,
            t_max: 100.0,
            n: 3,
        };
        let text = format_curve_summary(&curve, &window);
        assert!(text.contains("t=[0.10, 100.00] h, 3 points"));
        assert!(text.contains("[25.00, 61.20] °C"));
    }
}
