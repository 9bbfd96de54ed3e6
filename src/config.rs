//! Loading jurisdiction tax schedules from JSON files.

use crate::calc::TaxSchedule;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to open tax schedule {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed tax schedule: {0}")]
    Json(#[from] serde_json::Error),
}

impl TaxSchedule {
    /// Parses and validates a schedule; bracket errors surface as [`ConfigError::Json`]
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ConfigError> {
        let schedule: TaxSchedule = serde_json::from_reader(reader)?;
        log::debug!(
            "Loaded tax schedule '{}' with {} brackets",
            schedule.name(),
            schedule.brackets().len()
        );
        Ok(schedule)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }
}

/// The schedule at `path`, or the built-in default when none is given
pub fn load_tax_schedule(path: Option<&Path>) -> Result<TaxSchedule, ConfigError> {
    match path {
        Some(path) => TaxSchedule::from_path(path),
        None => Ok(TaxSchedule::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_schedule_json() {
        let json = r#"{
            "name": "Toronto municipal",
            "first_time_buyer_rebate": "4475",
            "brackets": [
                { "threshold": "0", "rate": "0.005" },
                { "threshold": "55000", "rate": "0.01" },
                { "threshold": 250000, "rate": 0.015 }
            ]
        }"#;
        let schedule = TaxSchedule::from_reader(json.as_bytes()).unwrap();

        assert_eq!(schedule.name(), "Toronto municipal");
        assert_eq!(schedule.first_time_buyer_rebate(), dec!(4475));
        assert_eq!(schedule.brackets().len(), 3);
        assert_eq!(schedule.brackets()[2].rate, dec!(0.015));
        assert_eq!(schedule.land_transfer_tax(dec!(250000), false).unwrap(), dec!(2225));
    }

    #[test]
    fn rebate_defaults_to_zero() {
        let json = r#"{ "name": "n", "brackets": [ { "threshold": "0", "rate": "0.01" } ] }"#;
        let schedule = TaxSchedule::from_reader(json.as_bytes()).unwrap();
        assert_eq!(schedule.first_time_buyer_rebate(), dec!(0));
    }

    #[test]
    fn rejects_invalid_schedule() {
        let json = r#"{ "name": "n", "brackets": [ { "threshold": "10", "rate": "0.01" } ] }"#;
        let err = TaxSchedule::from_reader(json.as_bytes()).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
        assert!(err.to_string().contains("first bracket must start at 0"));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            TaxSchedule::from_reader("{ not json".as_bytes()),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_tax_schedule(Some(Path::new("does/not/exist.json"))).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.json"));
    }

    #[test]
    fn default_when_no_path() {
        let schedule = load_tax_schedule(None).unwrap();
        assert_eq!(schedule, TaxSchedule::ontario());
    }
}
