//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - observed points: `o`
//! - curve lines: `-`
//! - confidence band fill: `.`
//!
//! Datasets are drawn in projection order. A dataset marked
//! `fill_to_previous` fills the region between itself and the dataset just
//! before it; that preceding ceiling series draws no line of its own.

use crate::plot::series::{Dataset, Point};

/// Render datasets on a character grid of the given size.
pub fn render_ascii(datasets: &[Dataset], width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let Some((x_min, x_max, y_min, y_max)) = ranges(datasets) else {
        return "(no data to plot)\n".to_string();
    };
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    for (idx, dataset) in datasets.iter().enumerate() {
        let cols = column_values(&dataset.points, x_min, x_max, width);

        if dataset.fill_to_previous {
            if let Some(prev) = idx.checked_sub(1).map(|p| {
                column_values(&datasets[p].points, x_min, x_max, width)
            }) {
                fill_between(&mut grid, &cols, &prev, y_min, y_max);
            }
            continue;
        }

        // The ceiling of a band is transparent; only its fill is visible.
        let is_band_ceiling = datasets
            .get(idx + 1)
            .is_some_and(|next| next.fill_to_previous);
        if is_band_ceiling {
            continue;
        }

        let marker = if dataset.draw_line { '-' } else { 'o' };
        for (col, y) in cols.iter().enumerate() {
            let Some(y) = y else { continue };
            if let Some(row) = row_for(*y, y_min, y_max, height) {
                grid[row][col] = marker;
            }
        }
    }

    let mut out = String::new();
    for row in &grid {
        out.push_str(&row.iter().collect::<String>());
        out.push('\n');
    }
    out.push_str(&format!(
        "t: [{x_min:.2}, {x_max:.2}] h   T: [{y_min:.2}, {y_max:.2}] °C\n"
    ));
    for dataset in datasets {
        if dataset.show_in_legend {
            out.push_str(&format!("  - {}\n", dataset.label));
        }
    }
    out
}

fn ranges(datasets: &[Dataset]) -> Option<(f64, f64, f64, f64)> {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;

    for dataset in datasets {
        for p in &dataset.points {
            if !(p.x.is_finite() && p.y.is_finite()) {
                continue;
            }
            x_min = x_min.min(p.x);
            x_max = x_max.max(p.x);
            y_min = y_min.min(p.y);
            y_max = y_max.max(p.y);
        }
    }

    if x_min.is_finite() && x_max > x_min && y_min.is_finite() {
        Some((x_min, x_max, y_min, y_max))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs().max(1e-9);
    (min - span * frac, max + span * frac)
}

/// Map points to one y value per column (last point mapped to a column wins).
fn column_values(points: &[Point], x_min: f64, x_max: f64, width: usize) -> Vec<Option<f64>> {
    let mut cols = vec![None; width];
    let span = x_max - x_min;
    for p in points {
        if !(p.x.is_finite() && p.y.is_finite()) {
            continue;
        }
        let frac = (p.x - x_min) / span;
        if !(0.0..=1.0).contains(&frac) {
            continue;
        }
        let col = (frac * (width - 1) as f64).round() as usize;
        cols[col.min(width - 1)] = Some(p.y);
    }
    cols
}

fn fill_between(
    grid: &mut [Vec<char>],
    a: &[Option<f64>],
    b: &[Option<f64>],
    y_min: f64,
    y_max: f64,
) {
    let height = grid.len();
    for (col, (ya, yb)) in a.iter().zip(b.iter()).enumerate() {
        let (Some(ya), Some(yb)) = (ya, yb) else { continue };
        let (Some(ra), Some(rb)) = (
            row_for(*ya, y_min, y_max, height),
            row_for(*yb, y_min, y_max, height),
        ) else {
            continue;
        };
        for row in ra.min(rb)..=ra.max(rb) {
            if grid[row][col] == ' ' {
                grid[row][col] = '.';
            }
        }
    }
}

fn row_for(y: f64, y_min: f64, y_max: f64, height: usize) -> Option<usize> {
    if y_max <= y_min || !y.is_finite() {
        return None;
    }
    let frac = (y_max - y) / (y_max - y_min);
    if !(0.0..=1.0).contains(&frac) {
        return None;
    }
    Some(((frac * (height - 1) as f64).round() as usize).min(height - 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::series::Dataset;

    fn line(points: &[(f64, f64)]) -> Vec<Point> {
        points.iter().map(|&(x, y)| Point { x, y }).collect()
    }

    #[test]
    fn empty_input_renders_placeholder() {
        assert_eq!(render_ascii(&[], 40, 10), "(no data to plot)\n");
    }

    #[test]
    fn band_fill_appears_between_bounds() {
        let upper = Dataset {
            label: "upper".to_string(),
            points: line(&[(0.0, 10.0), (1.0, 10.0), (2.0, 10.0)]),
            draw_line: true,
            fill_to_previous: false,
            show_in_legend: false,
        };
        let lower = Dataset {
            label: "band".to_string(),
            points: line(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]),
            draw_line: true,
            fill_to_previous: true,
            show_in_legend: true,
        };
        let rendered = render_ascii(&[upper, lower], 30, 12);
        let canvas: Vec<&str> = rendered.lines().take(12).collect();
        assert!(canvas.iter().any(|row| row.contains('.')));
        // The transparent ceiling draws no line.
        assert!(canvas.iter().all(|row| !row.contains('-')));
    }

    #[test]
    fn hidden_datasets_stay_out_of_legend() {
        let visible = Dataset {
            label: "visible".to_string(),
            points: line(&[(0.0, 1.0), (5.0, 2.0)]),
            draw_line: true,
            fill_to_previous: false,
            show_in_legend: true,
        };
        let hidden = Dataset {
            label: "ceiling".to_string(),
            points: line(&[(0.0, 3.0), (5.0, 3.0)]),
            draw_line: true,
            fill_to_previous: false,
            show_in_legend: false,
        };
        let rendered = render_ascii(&[visible, hidden], 30, 8);
        assert!(rendered.contains("  - visible"));
        assert!(!rendered.contains("ceiling"));
    }

    #[test]
    fn markers_only_dataset_uses_point_glyph() {
        let observed = Dataset {
            label: "obs".to_string(),
            points: line(&[(0.0, 1.0), (1.0, 2.0), (2.0, 3.0)]),
            draw_line: false,
            fill_to_previous: false,
            show_in_legend: true,
        };
        let rendered = render_ascii(&[observed], 20, 8);
        assert!(rendered.contains('o'));
    }
}
