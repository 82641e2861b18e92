//! Projection of service results into renderer-ready series.
//!
//! A fit projects to four datasets whose order is load-bearing for the
//! confidence band: renderers fill the region between consecutive series, so
//! the invisible upper bound must be declared immediately before the lower
//! bound that fills up to it. Legend suppression of the invisible ceiling is
//! carried as a flag, not by dropping the dataset.

use crate::domain::{CurveResponse, FitOutput};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// One renderer series.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub label: String,
    pub points: Vec<Point>,
    /// Connect points with a line (false = markers only).
    pub draw_line: bool,
    /// Fill the region between this series and the previous one.
    pub fill_to_previous: bool,
    pub show_in_legend: bool,
}

impl Dataset {
    fn line(label: impl Into<String>, points: Vec<Point>) -> Self {
        Self {
            label: label.into(),
            points,
            draw_line: true,
            fill_to_previous: false,
            show_in_legend: true,
        }
    }
}

/// Build the four fit datasets, in draw order:
///
/// 1. upper confidence bound (invisible fill ceiling, hidden from legend)
/// 2. lower confidence bound, filling up to the previous series
/// 3. the fitted analytic curve
/// 4. observed samples as unconnected points
pub fn project_fit_series(output: &FitOutput) -> Vec<Dataset> {
    let res = &output.response;
    let pct = res.confidence_pct();

    let upper = Dataset {
        show_in_legend: false,
        ..Dataset::line(
            format!("CI {pct:.0}% upper"),
            zip_points(&res.t_plot, &res.ci_upr),
        )
    };
    let lower = Dataset {
        fill_to_previous: true,
        ..Dataset::line(
            format!("Confidence band {pct:.0}%"),
            zip_points(&res.t_plot, &res.ci_lwr),
        )
    };
    let analytic = Dataset::line(
        "Fitted curve (regression)",
        zip_points(&res.t_plot, &res.temp_plot),
    );
    let observed = Dataset {
        draw_line: false,
        ..Dataset::line(
            "Observed data",
            zip_points(&output.t_obs, &output.temp_obs),
        )
    };

    vec![upper, lower, analytic, observed]
}

/// Build the single curve dataset: one line, no band, no observed overlay.
pub fn project_curve_series(curve: &CurveResponse) -> Dataset {
    Dataset::line(
        "Temperature (°C)",
        zip_points(&curve.t_plot, &curve.temp_plot),
    )
}

fn zip_points(xs: &[f64], ys: &[f64]) -> Vec<Point> {
    xs.iter()
        .zip(ys.iter())
        .map(|(&x, &y)| Point { x, y })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FitResponse;

    fn sample_output() -> FitOutput {
        FitOutput {
            response: FitResponse {
                erro_mae: Some(0.4),
                cond_ftf: None,
                stats_aviso: None,
                confianca: Some(0.90),
                parametros: vec![],
                t_plot: vec![0.5, 1.0, 2.0],
                temp_plot: vec![26.0, 30.0, 38.0],
                v_plot: None,
                ci_lwr: vec![25.0, 29.0, 36.5],
                ci_upr: vec![27.0, 31.0, 39.5],
            },
            t_obs: vec![0.5, 2.0],
            temp_obs: vec![25.8, 38.2],
        }
    }

    #[test]
    fn band_ceiling_comes_immediately_before_fill() {
        let datasets = project_fit_series(&sample_output());
        assert_eq!(datasets.len(), 4);

        assert!(!datasets[0].show_in_legend);
        assert!(!datasets[0].fill_to_previous);
        assert_eq!(datasets[0].points[0].y, 27.0);

        assert!(datasets[1].fill_to_previous);
        assert!(datasets[1].show_in_legend);
        assert_eq!(datasets[1].points[0].y, 25.0);
    }

    #[test]
    fn confidence_label_uses_response_level() {
        let datasets = project_fit_series(&sample_output());
        assert_eq!(datasets[1].label, "Confidence band 90%");
    }

    #[test]
    fn observed_points_are_markers_only() {
        let datasets = project_fit_series(&sample_output());
        let observed = &datasets[3];
        assert!(!observed.draw_line);
        assert_eq!(observed.points.len(), 2);
        assert_eq!(observed.points[1], Point { x: 2.0, y: 38.2 });
    }

    #[test]
    fn curve_projection_is_a_single_line_series() {
        let curve = CurveResponse {
            t_plot: vec![0.1, 1.0],
            temp_plot: vec![25.0, 40.0],
        };
        let dataset = project_curve_series(&curve);
        assert!(dataset.draw_line);
        assert!(!dataset.fill_to_previous);
        assert_eq!(dataset.points.len(), 2);
    }
}
