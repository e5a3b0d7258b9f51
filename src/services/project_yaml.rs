use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::project::{Complexity, ProjectDescriptor};
use crate::services::timeline_prediction::{TimelineError, parse_start_date, today};

#[derive(Error, Debug)]
pub enum ProjectYamlError {
    #[error("failed to read project yaml: {0}")]
    Read(#[from] io::Error),
    #[error("failed to parse project yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// On-disk project description; omitted fields take the request defaults.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectRecord {
    #[serde(default = "default_project_type")]
    pub project_type: String,
    #[serde(default = "default_length_km")]
    pub length_km: f64,
    #[serde(default = "default_country_code")]
    pub country_code: String,
    #[serde(default = "default_complexity")]
    pub complexity: String,
    #[serde(default)]
    pub start_date: Option<String>,
}

fn default_project_type() -> String {
    "road_widening".to_string()
}

fn default_length_km() -> f64 {
    1.0
}

fn default_country_code() -> String {
    "IN".to_string()
}

fn default_complexity() -> String {
    "medium".to_string()
}

impl Default for ProjectRecord {
    fn default() -> Self {
        Self {
            project_type: default_project_type(),
            length_km: default_length_km(),
            country_code: default_country_code(),
            complexity: default_complexity(),
            start_date: None,
        }
    }
}

impl ProjectRecord {
    pub fn into_descriptor(self) -> Result<ProjectDescriptor, TimelineError> {
        let start_date = match self.start_date.as_deref() {
            Some(value) => parse_start_date(value)?,
            None => today(),
        };
        Ok(ProjectDescriptor::new(
            self.project_type,
            self.length_km,
            self.country_code,
            Complexity::from_name_or_default(&self.complexity),
            start_date,
        ))
    }
}

/// Reads the raw record so callers can overlay their own values before
/// resolving the start date.
pub fn load_project_record_from_yaml_file(path: &str) -> Result<ProjectRecord, ProjectYamlError> {
    let contents = std::fs::read_to_string(path)?;
    deserialize_project_record_from_yaml_str(&contents)
}

fn deserialize_project_record_from_yaml_str(input: &str) -> Result<ProjectRecord, ProjectYamlError> {
    if input.trim().is_empty() {
        return Ok(ProjectRecord::default());
    }
    Ok(serde_yaml::from_str(input)?)
}
