//! Export a generated curve to CSV.
//!
//! The format is fixed and spreadsheet-friendly: a `tempo_h,temperatura_C`
//! header plus one comma-separated `t,T` line per point, no quoting.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::CurveResponse;
use crate::error::AppError;

/// Render the curve CSV as a string.
pub fn curve_csv(curve: &CurveResponse) -> String {
    let mut out = String::from("tempo_h,temperatura_C\n");
    for (t, temp) in curve.points() {
        out.push_str(&format!("{t},{temp}\n"));
    }
    out
}

/// Write the curve CSV to a file.
pub fn write_curve_csv(path: &Path, curve: &CurveResponse) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::input(format!(
            "Failed to create export CSV '{}': {e}",
            path.display()
        ))
    })?;
    file.write_all(curve_csv(curve).as_bytes())
        .map_err(|e| AppError::input(format!("Failed to write export CSV: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_csv_has_header_and_rows() {
        let curve = CurveResponse {
            t_plot: vec![0.1, 2.5],
            temp_plot: vec![25.0, 47.25],
        };
        let csv = curve_csv(&curve);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "tempo_h,temperatura_C");
        assert_eq!(lines[1], "0.1,25");
        assert_eq!(lines[2], "2.5,47.25");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn exported_curve_reimports_through_ingest() {
        let curve = CurveResponse {
            t_plot: vec![0.5, 1.0, 1.5],
            temp_plot: vec![20.0, 30.0, 35.5],
        };
        let rows = crate::io::ingest::parse_samples(&curve_csv(&curve)).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].temp, 35.5);
    }
}
