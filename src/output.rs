//! Sweep writers: a whitespace-separated text table, or JSON when the output
//! path ends in `.json`.

use std::{fs::File, io::BufWriter, path::Path};

use anyhow::{Context, Result};
use itertools::Itertools;
use log::info;
use std::io::Write;

use crate::sweep::SweepPoint;

#[cfg(test)]
mod tests {
    use super::*;

    fn points() -> Vec<SweepPoint> {
        vec![
            SweepPoint {
                analyzer_deg: 0.0,
                intensity: 1.0,
                stokes: [1.0, 1.0, 0.0, 0.0],
            },
            SweepPoint {
                analyzer_deg: 90.0,
                intensity: 0.0,
                stokes: [0.0, 0.0, 0.0, 0.0],
            },
        ]
    }

    #[test]
    fn table_layout() {
        let table = format_table(&points(), 2);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "# analyzer_deg intensity s0 s1 s2 s3");
        assert_eq!(lines[1], "0.00 1.00 1.00 1.00 0.00 0.00");
        assert_eq!(lines[2], "90.00 0.00 0.00 0.00 0.00 0.00");
    }

    #[test]
    fn json_file_roundtrip() {
        let path = std::env::temp_dir().join(format!("polarcore-sweep-{}.json", std::process::id()));
        write_sweep(&path, &points(), 4).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let read: Vec<SweepPoint> = serde_json::from_str(&text).unwrap();
        assert_eq!(read, points());
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn table_file() {
        let path = std::env::temp_dir().join(format!("polarcore-sweep-{}.dat", std::process::id()));
        write_sweep(&path, &points(), 1).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("# analyzer_deg"));
        assert_eq!(text.lines().count(), 3);
        std::fs::remove_file(&path).unwrap();
    }
}

/// Formats a sweep as a whitespace-separated table with a `#` header line.
pub fn format_table(points: &[SweepPoint], precision: usize) -> String {
    let mut table = String::from("# analyzer_deg intensity s0 s1 s2 s3\n");
    for point in points {
        let row = [point.analyzer_deg, point.intensity]
            .iter()
            .chain(point.stokes.iter())
            .map(|value| format!("{:.*}", precision, value))
            .join(" ");
        table.push_str(&row);
        table.push('\n');
    }
    table
}

/// Writes a sweep to `path`: JSON for a `.json` extension, otherwise a text table.
pub fn write_sweep(path: impl AsRef<Path>, points: &[SweepPoint], precision: usize) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("failed to create {:?}", path))?;
    let mut writer = BufWriter::new(file);

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        serde_json::to_writer_pretty(&mut writer, points)?;
    } else {
        writer.write_all(format_table(points, precision).as_bytes())?;
    }
    writer.flush()?;

    info!("wrote {} sweep points to {:?}", points.len(), path);
    Ok(())
}
