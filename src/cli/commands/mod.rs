//! Command implementations.

pub mod show;
pub mod validate;

use crate::error::{Result, StepTreeError};
use crate::model::Feature;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Read a Cucumber JSON report (an array of features).
///
/// # Errors
///
/// Returns `ReportNotFound` if the file is missing, or an I/O or JSON error
/// if it cannot be read or parsed.
pub fn load_report(path: &Path) -> Result<Vec<Feature>> {
    if !path.is_file() {
        return Err(StepTreeError::ReportNotFound {
            path: path.to_path_buf(),
        });
    }

    debug!(path = %path.display(), "Reading report");
    let contents = fs::read_to_string(path)
        .map_err(|e| StepTreeError::with_context(format!("reading {}", path.display()), e))?;
    let features: Vec<Feature> = serde_json::from_str(&contents)?;

    info!(
        path = %path.display(),
        features = features.len(),
        elements = features.iter().map(|f| f.elements.len()).sum::<usize>(),
        "Loaded report"
    );
    Ok(features)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_report_missing_file() {
        let temp = TempDir::new().expect("tempdir");
        let err = load_report(&temp.path().join("cucumber.json")).unwrap_err();
        assert!(matches!(err, StepTreeError::ReportNotFound { .. }));
    }

    #[test]
    fn load_report_rejects_non_array() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("cucumber.json");
        fs::write(&path, r#"{"name": "not an array"}"#).expect("write");
        assert!(matches!(load_report(&path), Err(StepTreeError::Json(_))));
    }

    #[test]
    fn load_report_parses_features() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("cucumber.json");
        fs::write(
            &path,
            r#"[{"name": "Login", "elements": [{"name": "ok", "steps": []}]}]"#,
        )
        .expect("write");
        let features = load_report(&path).expect("load");
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].elements[0].name, "ok");
    }
}
