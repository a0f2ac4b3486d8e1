//! Fixed-format text export.
//!
//! One format serves both a single extraction and a full batch: a header
//! line, then one row per coordinate with latitude and longitude at six
//! decimal places, newline-terminated, no trailing framing.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::batch::BatchResultRow;
use crate::engine::Coordinate;
use crate::error::ExtractionError;

pub const EXPORT_HEADER: &str = "serial no, Img name, lat, long";

/// Write the header and one line per row.
pub fn write_rows<W: Write>(out: &mut W, rows: &[BatchResultRow]) -> Result<(), ExtractionError> {
    writeln!(out, "{EXPORT_HEADER}")?;
    for row in rows {
        writeln!(
            out,
            "{}, {}, {:.6}, {:.6}",
            row.serial, row.image_id, row.latitude, row.longitude
        )?;
    }
    Ok(())
}

/// Write rows to a file. On failure the error is terminal for this call; no
/// partial-file cleanup is attempted.
pub fn export_rows_to_path(path: &Path, rows: &[BatchResultRow]) -> Result<(), ExtractionError> {
    let mut out = BufWriter::new(File::create(path)?);
    write_rows(&mut out, rows)?;
    out.flush()?;
    Ok(())
}

/// Number a single extraction's coordinates 1..N for export.
pub fn rows_for_outcome(image_id: &str, coordinates: &[Coordinate]) -> Vec<BatchResultRow> {
    coordinates
        .iter()
        .enumerate()
        .map(|(i, coordinate)| BatchResultRow {
            serial: i as u32 + 1,
            image_id: image_id.to_string(),
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
        })
        .collect()
}

/// Default export filename, e.g. `batch_coordinates_20260805_142233.txt`.
pub fn timestamped_filename(prefix: &str) -> String {
    format!("{prefix}_{}.txt", chrono::Local::now().format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(serial: u32, image_id: &str, lat: f64, lon: f64) -> BatchResultRow {
        BatchResultRow {
            serial,
            image_id: image_id.to_string(),
            latitude: lat,
            longitude: lon,
        }
    }

    #[test]
    fn writes_header_and_six_decimal_rows() {
        let rows = vec![
            row(1, "IMG_0042", 30.045977, 73.604948),
            row(2, "field-7", -33.8688, 151.2093),
        ];
        let mut out = Vec::new();
        write_rows(&mut out, &rows).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "serial no, Img name, lat, long\n\
             1, IMG_0042, 30.045977, 73.604948\n\
             2, field-7, -33.868800, 151.209300\n"
        );
    }

    #[test]
    fn empty_rows_export_header_only() {
        let mut out = Vec::new();
        write_rows(&mut out, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "serial no, Img name, lat, long\n");
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("coords.txt");
        let rows = vec![row(1, "a", 30.045977, 73.604948)];

        export_rows_to_path(&path, &rows).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with(EXPORT_HEADER));
        assert!(text.ends_with("30.045977, 73.604948\n"));
    }

    #[test]
    fn export_to_unwritable_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-subdir").join("coords.txt");
        let err = export_rows_to_path(&path, &[]).unwrap_err();
        assert!(matches!(err, ExtractionError::Export(_)));
    }

    #[test]
    fn single_outcome_rows_are_numbered_from_one() {
        let coords = vec![
            Coordinate::new("Lat/Long", 30.045977, 73.604948),
            Coordinate::new("DMS", 40.7128, -74.0061),
        ];
        let rows = rows_for_outcome("IMG_0042", &coords);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].serial, 1);
        assert_eq!(rows[1].serial, 2);
        assert!(rows.iter().all(|r| r.image_id == "IMG_0042"));
    }

    #[test]
    fn timestamped_filename_has_prefix_and_extension() {
        let name = timestamped_filename("batch_coordinates");
        assert!(name.starts_with("batch_coordinates_"));
        assert!(name.ends_with(".txt"));
        // prefix + '_' + YYYYMMDD_HHMMSS + ".txt"
        assert_eq!(name.len(), "batch_coordinates".len() + 1 + 15 + 4);
    }
}
