//! Schedule export: CSV for spreadsheets, JSON for tooling.
//!
//! Both formats index days from 1, the way rota sheets are read.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::model::{Schedule, Supervisor};

/// Byte-order mark so spreadsheet tools pick up UTF-8.
const BOM: &str = "\u{feff}";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, ExportError>;

/// Render the schedule as CSV, one row per day.
pub fn to_csv(schedule: &Schedule) -> String {
    let mut out = String::from("Day");
    for supervisor in Supervisor::ALL {
        out.push(',');
        out.push_str(supervisor.title());
    }
    out.push_str(",Drilling (#P)\n");

    for day in 0..schedule.days() {
        let _ = write!(out, "{}", day + 1);
        for supervisor in Supervisor::ALL {
            let _ = write!(out, ",{}", schedule.timeline(supervisor)[day]);
        }
        let _ = writeln!(out, ",{}", schedule.drilling_count(day));
    }

    out
}

#[derive(Serialize)]
struct Export<'a> {
    #[serde(flatten)]
    schedule: &'a Schedule,
    fingerprint: String,
}

/// Render the schedule as pretty JSON with its fingerprint attached.
pub fn to_json(schedule: &Schedule) -> Result<String> {
    let export = Export {
        schedule,
        fingerprint: fingerprint(schedule)?,
    };
    Ok(serde_json::to_string_pretty(&export)?)
}

/// Hex SHA-256 over the three timelines and the violation list.
///
/// Two runs with the same cadence produce the same fingerprint.
pub fn fingerprint(schedule: &Schedule) -> Result<String> {
    let mut hasher = Sha256::new();
    hasher.update(serde_json::to_vec(&schedule.anchor)?);
    hasher.update(serde_json::to_vec(&schedule.second)?);
    hasher.update(serde_json::to_vec(&schedule.third)?);
    hasher.update(serde_json::to_vec(&schedule.violations)?);
    Ok(hex::encode(hasher.finalize()))
}

/// Write CSV to a file, prefixed with a byte-order mark.
pub fn write_csv(path: &Path, schedule: &Schedule) -> Result<()> {
    fs::write(path, format!("{BOM}{}", to_csv(schedule)))?;
    Ok(())
}

/// Suggested file name, e.g. `supervisor_schedule_40d.csv`.
pub fn default_file_name(schedule: &Schedule) -> String {
    format!("supervisor_schedule_{}d.csv", schedule.cadence.horizon_days)
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    use crate::model::Cadence;
    use crate::roster;

    fn schedule() -> Schedule {
        roster::run(&Cadence::new(14, 7, 5, 40))
    }

    #[test]
    fn csv_header_and_rows() {
        let csv = to_csv(&schedule());
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "Day,Supervisor 1,Supervisor 2,Supervisor 3,Drilling (#P)"
        );
        assert_eq!(lines.len(), 41);
        assert_eq!(lines[1], "1,S,S,D,0");
        assert_eq!(lines[15], "15,P,B,P,2");
    }

    #[test]
    fn csv_file_starts_with_bom() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rota.csv");
        write_csv(&path, &schedule()).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with('\u{feff}'));
        assert!(written[BOM.len()..].starts_with("Day,"));
    }

    #[test]
    fn json_carries_fingerprint() {
        let schedule = schedule();
        let json = to_json(&schedule).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["fingerprint"], fingerprint(&schedule).unwrap());
        assert_eq!(value["anchor"][0], "S");
        assert_eq!(value["cadence"]["work-days"], 14);
        assert_eq!(value["violations"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn fingerprint_is_stable_and_sensitive() {
        let a = schedule();
        let b = schedule();
        assert_eq!(fingerprint(&a).unwrap(), fingerprint(&b).unwrap());
        assert_eq!(fingerprint(&a).unwrap().len(), 64);

        let other = roster::run(&Cadence::new(14, 7, 5, 41));
        assert_ne!(fingerprint(&a).unwrap(), fingerprint(&other).unwrap());
    }

    #[test]
    fn file_name_uses_horizon() {
        assert_eq!(default_file_name(&schedule()), "supervisor_schedule_40d.csv");
    }
}
