//! Load and save of the two JSON artifacts.
//!
//! Both files are pretty-printed with a trailing newline so that re-running
//! an analysis over unchanged input produces byte-identical artifacts.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::intent::MigrationIntent;
use crate::types::AnalysisReport;

/// File name of the raw extraction artifact.
pub const ANALYSIS_FILE: &str = "struts_analysis.json";
/// File name of the migration intent artifact.
pub const INTENT_FILE: &str = "migration_intent.json";

/// Errors while reading or writing an artifact.
#[derive(Debug, thiserror::Error)]
pub enum InterchangeError {
    #[error("could not read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON or does not have the expected shape.
    #[error("invalid JSON in '{path}': {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub fn load_intent(path: &Path) -> Result<MigrationIntent, InterchangeError> {
    load_json(path)
}

pub fn save_intent(intent: &MigrationIntent, path: &Path) -> Result<(), InterchangeError> {
    save_json(intent, path)
}

pub fn load_analysis(path: &Path) -> Result<AnalysisReport, InterchangeError> {
    load_json(path)
}

pub fn save_analysis(report: &AnalysisReport, path: &Path) -> Result<(), InterchangeError> {
    save_json(report, path)
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, InterchangeError> {
    let content = std::fs::read_to_string(path).map_err(|source| InterchangeError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| InterchangeError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn save_json<T: Serialize>(value: &T, path: &Path) -> Result<(), InterchangeError> {
    let mut json = serde_json::to_string_pretty(value).map_err(|source| InterchangeError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    json.push('\n');
    std::fs::write(path, json).map_err(|source| InterchangeError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FormBean, ValidationMarker};

    #[test]
    fn test_analysis_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(ANALYSIS_FILE);

        let mut bean = FormBean::new("applicantForm", "com.trucklease.beans.ApplicantForm");
        bean.properties = vec!["firstName".to_string(), "email".to_string()];
        bean.validations = vec![ValidationMarker::ServerSideValidation];
        let report = AnalysisReport {
            action_mappings: vec![],
            form_beans: vec![bean],
            view_pages: vec![],
        };

        save_analysis(&report, &path).unwrap();
        let loaded = load_analysis(&path).unwrap();
        assert_eq!(loaded, report);

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.ends_with('\n'));
        assert!(text.contains("\"type\": \"com.trucklease.beans.ApplicantForm\""));
    }

    #[test]
    fn test_load_intent_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_intent(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, InterchangeError::Read { .. }));
    }

    #[test]
    fn test_load_intent_reports_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(INTENT_FILE);
        std::fs::write(&path, "{\"react_components\": 3}").unwrap();
        let err = load_intent(&path).unwrap_err();
        assert!(matches!(err, InterchangeError::Json { .. }));
        assert!(err.to_string().contains("invalid JSON"));
    }
}
