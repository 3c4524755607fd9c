//! Contour CSV persistence.
//!
//! One frame per row: `time,frequency` with an optional third `confidence`
//! column. `#` starts a comment, blank lines are skipped, and a leading row
//! with no numeric field is treated as a header.

use std::fmt::Write as _;
use std::path::Path;

use melosynth_core::{Contour, RawContour};

use crate::{Error, Result};

fn csv_err(line: usize, reason: impl Into<String>) -> Error {
    Error::Csv {
        line,
        reason: reason.into(),
    }
}

/// A header row has no field that parses as a number.
fn is_header(fields: &[&str]) -> bool {
    fields.iter().all(|f| f.parse::<f64>().is_err())
}

/// Parse contour rows from CSV text.
///
/// Returns raw (unvalidated) frames; map them with
/// [`RawContour::into_contour`] to apply the unvoiced encoding and gating.
pub fn parse_contour_csv(text: &str) -> Result<RawContour> {
    let mut times = Vec::new();
    let mut frequencies = Vec::new();
    let mut confidences = Vec::new();
    let mut columns: Option<usize> = None;
    let mut seen_row = false;

    for (idx, raw_line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let parsed: std::result::Result<Vec<f64>, _> =
            fields.iter().map(|f| f.parse::<f64>()).collect();
        let values = match parsed {
            Ok(values) => values,
            Err(_) if !seen_row && is_header(&fields) => {
                seen_row = true;
                continue;
            }
            Err(e) => return Err(csv_err(line_no, format!("invalid number: {e}"))),
        };
        seen_row = true;

        if !(2..=3).contains(&values.len()) {
            return Err(csv_err(
                line_no,
                format!("expected 2 or 3 columns, found {}", values.len()),
            ));
        }
        match columns {
            None => columns = Some(values.len()),
            Some(n) if n != values.len() => {
                return Err(csv_err(
                    line_no,
                    format!("expected {n} columns like previous rows, found {}", values.len()),
                ));
            }
            Some(_) => {}
        }

        times.push(values[0]);
        frequencies.push(values[1]);
        if let Some(&c) = values.get(2) {
            confidences.push(c);
        }
    }

    let raw = RawContour::new(times, frequencies);
    Ok(if columns == Some(3) {
        raw.with_confidences(confidences)
    } else {
        raw
    })
}

/// Read contour rows from a CSV file.
pub fn read_contour_csv<P: AsRef<Path>>(path: P) -> Result<RawContour> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let raw = parse_contour_csv(&text)?;
    tracing::debug!(path = %path.display(), frames = raw.times.len(), "read contour CSV");
    Ok(raw)
}

/// Format a contour as `time,frequency` rows; unvoiced points are written as 0.
pub fn format_contour_csv(contour: &Contour) -> String {
    let mut out = String::with_capacity(contour.len() * 24);
    for point in contour.points() {
        let _ = writeln!(out, "{},{}", point.time, point.frequency.hz());
    }
    out
}

/// Write a contour to a CSV file.
pub fn write_contour_csv<P: AsRef<Path>>(path: P, contour: &Contour) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, format_contour_csv(contour))?;
    tracing::debug!(path = %path.display(), points = contour.len(), "wrote contour CSV");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_two_columns_with_comments_and_blanks() {
        let text = "# melody\n0.0,0\n\n0.04, 220.5  # onset\n0.08,-221\n";
        let raw = parse_contour_csv(text).unwrap();
        assert_eq!(raw.times, vec![0.0, 0.04, 0.08]);
        assert_eq!(raw.frequencies, vec![0.0, 220.5, -221.0]);
        assert_eq!(raw.confidences, None);
    }

    #[test]
    fn parses_confidence_column() {
        let raw = parse_contour_csv("0.0,440,0.9\n0.1,441,0.2\n").unwrap();
        assert_eq!(raw.confidences, Some(vec![0.9, 0.2]));
    }

    #[test]
    fn skips_header_row() {
        let raw = parse_contour_csv("time,frequency\n0.0,100\n").unwrap();
        assert_eq!(raw.times, vec![0.0]);
    }

    #[test]
    fn mistyped_first_row_is_not_a_header() {
        let err = parse_contour_csv("0.0,44O\n0.1,440\n").unwrap_err();
        assert!(matches!(err, Error::Csv { line: 1, .. }), "got {err:?}");

        let err = parse_contour_csv("# comment\n\ntime,440\n").unwrap_err();
        assert!(matches!(err, Error::Csv { line: 3, .. }), "got {err:?}");
    }

    #[test]
    fn header_only_once() {
        let err = parse_contour_csv("time,frequency\nt,f\n0.0,100\n").unwrap_err();
        assert!(matches!(err, Error::Csv { line: 2, .. }), "got {err:?}");
    }

    #[test]
    fn scientific_notation_from_numpy() {
        let raw =
            parse_contour_csv("2.902494331065759e-02,0.000000000000000000e+00\n").unwrap();
        assert!((raw.times[0] - 0.029024943).abs() < 1e-8);
        assert_eq!(raw.frequencies[0], 0.0);
    }

    #[test]
    fn bad_number_reports_line() {
        let err = parse_contour_csv("0.0,100\n0.1,abc\n").unwrap_err();
        assert!(matches!(err, Error::Csv { line: 2, .. }), "got {err:?}");
    }

    #[test]
    fn wrong_column_count_reports_line() {
        let err = parse_contour_csv("0.0,100\n0.1\n").unwrap_err();
        assert!(matches!(err, Error::Csv { line: 2, .. }));

        let err = parse_contour_csv("0.0,100\n0.1,100,0.5\n").unwrap_err();
        assert!(matches!(err, Error::Csv { line: 2, .. }));
    }

    #[test]
    fn format_writes_unvoiced_as_zero() {
        let contour = Contour::from_pairs(&[0.0, 0.5], &[0.0, 440.0]).unwrap();
        assert_eq!(format_contour_csv(&contour), "0,0\n0.5,440\n");
    }
}
