//! Configuration types for the attendance pipeline.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for reading entered rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Title-case student names on entry (e.g. "ann lee" -> "Ann Lee")
    #[serde(default = "default_title_case_names")]
    pub title_case_names: bool,
}

fn default_title_case_names() -> bool {
    true
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            title_case_names: default_title_case_names(),
        }
    }
}

/// Configuration for the missing-data stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImputationConfig {
    /// Replace zero totals with the batch mean. When disabled, zero totals
    /// are rejected.
    #[serde(default = "default_imputation_enabled")]
    pub enabled: bool,
}

fn default_imputation_enabled() -> bool {
    true
}

impl Default for ImputationConfig {
    fn default() -> Self {
        Self {
            enabled: default_imputation_enabled(),
        }
    }
}

/// What to do with a record whose attended count exceeds its total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverAttendancePolicy {
    /// Keep the counts; the percentage may exceed 100.
    #[default]
    Accept,
    /// Lower the attended count to the total.
    Clamp,
    /// Fail the batch.
    Reject,
}

impl std::str::FromStr for OverAttendancePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "accept" => Ok(OverAttendancePolicy::Accept),
            "clamp" => Ok(OverAttendancePolicy::Clamp),
            "reject" => Ok(OverAttendancePolicy::Reject),
            other => Err(format!(
                "unknown over-attendance policy '{}' (expected accept, clamp or reject)",
                other
            )),
        }
    }
}

/// Configuration for record validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationConfig {
    #[serde(default)]
    pub over_attendance: OverAttendancePolicy,
}

/// Configuration for the CSV export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Default report file name
    #[serde(default = "default_export_file_name")]
    pub file_name: String,
}

fn default_export_file_name() -> String {
    "attendance_report.csv".to_string()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_name: default_export_file_name(),
        }
    }
}

/// Main pipeline configuration combining all sub-configs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub input: InputConfig,

    #[serde(default)]
    pub imputation: ImputationConfig,

    #[serde(default)]
    pub validation: ValidationConfig,

    #[serde(default)]
    pub export: ExportConfig,
}

impl PipelineConfig {
    /// Load configuration from a YAML file.
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: PipelineConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a YAML file.
    pub fn to_yaml<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_pipeline_config() {
        let config = PipelineConfig::default();
        assert!(config.input.title_case_names);
        assert!(config.imputation.enabled);
        assert_eq!(config.validation.over_attendance, OverAttendancePolicy::Accept);
        assert_eq!(config.export.file_name, "attendance_report.csv");
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = "validation:\n  over_attendance: clamp\n";
        let config: PipelineConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.validation.over_attendance, OverAttendancePolicy::Clamp);
        assert!(config.imputation.enabled);
        assert_eq!(config.export.file_name, "attendance_report.csv");
    }

    #[test]
    fn test_yaml_file_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("attendance.yaml");

        let mut config = PipelineConfig::default();
        config.imputation.enabled = false;
        config.validation.over_attendance = OverAttendancePolicy::Reject;
        config.to_yaml(&path).unwrap();

        let loaded = PipelineConfig::from_yaml(&path).unwrap();
        assert!(!loaded.imputation.enabled);
        assert_eq!(loaded.validation.over_attendance, OverAttendancePolicy::Reject);
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("Clamp".parse::<OverAttendancePolicy>(), Ok(OverAttendancePolicy::Clamp));
        assert!("ignore".parse::<OverAttendancePolicy>().is_err());
    }
}
