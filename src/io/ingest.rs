//! CSV ingest and normalization.
//!
//! Turns raw monitoring-CSV text into an ordered sequence of `(t, temp)`
//! samples, tolerant of the heterogeneous formats lab exports produce:
//!
//! - delimiter may be `;`, tab, or `,` (detected, not configured)
//! - decimal commas (`"1,5"`) are normalized to decimal points
//! - quoted fields and header rows are handled without special-casing:
//!   a header simply fails numeric parsing and is dropped
//! - malformed rows are skipped silently, never fatal
//!
//! Design goals mirror the rest of the pipeline: row-level tolerance,
//! deterministic behavior, and no fitting logic here.

use std::fs;
use std::path::Path;

use crate::domain::Sample;
use crate::error::AppError;

/// Parse raw CSV text into samples, in file order.
///
/// Returns `None` when the input has fewer than 2 non-blank lines or when no
/// line yields two finite numbers.
pub fn parse_samples(text: &str) -> Option<Vec<Sample>> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if lines.len() < 2 {
        return None;
    }

    // The second line is the first data-bearing line regardless of whether
    // line 1 is a header, so it alone decides the delimiter. A header whose
    // own delimiter usage differs is tolerated by construction; a decoy
    // delimiter inside the sole data row of a one-row file is a known,
    // accepted limitation.
    let delimiter = detect_delimiter(lines[1]);

    let joined = lines.join("\n");
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(joined.as_bytes());

    let mut samples = Vec::new();
    for record in reader.records() {
        let Ok(record) = record else { continue };
        if record.len() < 2 {
            continue;
        }
        // Extra columns beyond the first two are ignored.
        let (Some(t), Some(temp)) = (
            record.get(0).and_then(parse_field),
            record.get(1).and_then(parse_field),
        ) else {
            continue;
        };
        samples.push(Sample { t, temp });
    }

    if samples.is_empty() { None } else { Some(samples) }
}

/// Load samples from a file, mapping the absent cases to user-facing errors.
pub fn load_samples(path: &Path) -> Result<Vec<Sample>, AppError> {
    let text = fs::read_to_string(path)
        .map_err(|e| AppError::input(format!("Failed to read CSV '{}': {e}", path.display())))?;
    parse_samples(&text).ok_or_else(|| {
        AppError::data(format!(
            "CSV '{}' has no numeric (t, T) rows.",
            path.display()
        ))
    })
}

fn detect_delimiter(data_line: &str) -> u8 {
    if data_line.contains(';') {
        b';'
    } else if data_line.contains('\t') {
        b'\t'
    } else {
        b','
    }
}

fn parse_field(raw: &str) -> Option<f64> {
    crate::domain::parse_num(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fewer_than_two_lines_is_absent() {
        assert!(parse_samples("").is_none());
        assert!(parse_samples("0,20").is_none());
        assert!(parse_samples("\n\n  \n0,20\n\n").is_none());
    }

    #[test]
    fn header_rows_are_dropped_by_failed_parsing() {
        let rows = parse_samples("tempo,temperatura\n0,20\n1,35").unwrap();
        assert_eq!(rows, vec![
            Sample { t: 0.0, temp: 20.0 },
            Sample { t: 1.0, temp: 35.0 },
        ]);
    }

    #[test]
    fn delimiter_detected_from_second_line_only() {
        // Header uses commas; data uses semicolons. The second line wins.
        let rows = parse_samples("tempo,temperatura\n0;20\n1;35").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], Sample { t: 1.0, temp: 35.0 });
    }

    #[test]
    fn tab_delimiter_is_supported() {
        let rows = parse_samples("t\tT\n0.5\t21.5\n1\t30").unwrap();
        assert_eq!(rows[0], Sample { t: 0.5, temp: 21.5 });
    }

    #[test]
    fn decimal_comma_equals_decimal_point() {
        let a = parse_samples("t;T\n1,5;30,25\n2;40").unwrap();
        let b = parse_samples("t;T\n1.5;30.25\n2;40").unwrap();
        assert_eq!(a, b);
        assert_eq!(a[0], Sample { t: 1.5, temp: 30.25 });
    }

    #[test]
    fn quoted_fields_are_accepted() {
        let rows = parse_samples("t;T\n\"1,5\";\"35\"\n2;50").unwrap();
        assert_eq!(rows[0], Sample { t: 1.5, temp: 35.0 });
    }

    #[test]
    fn mixed_malformed_line_is_skipped() {
        // Third line uses the wrong delimiter and collapses to one field.
        let rows = parse_samples("t,T\n0,20\n1,35\n2;50").unwrap();
        assert_eq!(rows, vec![
            Sample { t: 0.0, temp: 20.0 },
            Sample { t: 1.0, temp: 35.0 },
        ]);
    }

    #[test]
    fn extra_columns_are_ignored() {
        let rows = parse_samples("0,20,999,x\n1,35,888").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], Sample { t: 1.0, temp: 35.0 });
    }

    #[test]
    fn reparse_of_accepted_output_is_idempotent() {
        let text = "tempo;temperatura\n0,5;20\n1;35,5\n2;50\njunk;row";
        let first = parse_samples(text).unwrap();
        let serialized: String = first
            .iter()
            .map(|s| format!("{},{}\n", s.t, s.temp))
            .collect();
        let second = parse_samples(&serialized).unwrap();
        assert_eq!(first, second);
    }
}
