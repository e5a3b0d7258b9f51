use std::io;
use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;

use crate::commands::base_commands::{Commands, ReportFormat};
use crate::commands::report_format::format_timeline_report;
use crate::domain::tables::TimelineTables;
use crate::services::gantt_diagram::generate_gantt_diagram;
use crate::services::histogram::write_histogram_png;
use crate::services::project_yaml::{ProjectRecord, ProjectYamlError, load_project_record_from_yaml_file};
use crate::services::simulation_types::TimelineReport;
use crate::services::timeline_prediction::{TimelineError, predict};
use crate::services::timeline_tables_yaml::{
    TimelineTablesYamlError, load_timeline_tables_from_yaml_file,
};

#[derive(Error, Debug)]
pub enum PredictCommandError {
    #[error(transparent)]
    Project(#[from] ProjectYamlError),
    #[error(transparent)]
    Tables(#[from] TimelineTablesYamlError),
    #[error(transparent)]
    Prediction(#[from] TimelineError),
    #[error("failed to serialize timeline report: {0}")]
    Serialize(String),
    #[error("failed to write timeline report {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

pub fn predict_command(cmd: Commands) -> Result<(), PredictCommandError> {
    let Commands::Predict {
        input,
        project_type,
        length_km,
        country_code,
        complexity,
        start_date,
        trials,
        seed,
        output,
        format,
        tables,
    } = cmd
    else {
        return Ok(());
    };

    let mut record = match &input {
        Some(path) => load_project_record_from_yaml_file(path)?,
        None => ProjectRecord::default(),
    };
    if let Some(value) = project_type {
        record.project_type = value;
    }
    if let Some(value) = length_km {
        record.length_km = value;
    }
    if let Some(value) = country_code {
        record.country_code = value;
    }
    if let Some(value) = complexity {
        record.complexity = value;
    }
    if start_date.is_some() {
        record.start_date = start_date;
    }
    let project = record.into_descriptor()?;

    let tables = match &tables {
        Some(path) => load_timeline_tables_from_yaml_file(path)?,
        None => TimelineTables::default(),
    };

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let simulation = predict(&project, trials, &tables, &mut rng)?;

    let histogram_path = format!("{output}.png");
    if let Err(e) = write_histogram_png(&histogram_path, &simulation.results) {
        tracing::warn!(path = %histogram_path, error = %e, "histogram not written");
        eprintln!("Failed to write timeline histogram: {e}");
    }

    let gantt_path = format!("{output}.gantt.md");
    if let Err(e) = std::fs::write(&gantt_path, generate_gantt_diagram(&simulation.report)) {
        tracing::warn!(path = %gantt_path, error = %e, "gantt diagram not written");
        eprintln!("Failed to write gantt diagram: {e}");
    }

    let contents = serialize_report(&simulation.report, format)?;
    std::fs::write(&output, contents).map_err(|source| PredictCommandError::Write {
        path: PathBuf::from(&output),
        source,
    })?;

    println!("{}", format_timeline_report(&simulation.report));
    println!();
    println!("Timeline report written to {output}");
    println!("Timeline histogram written to {histogram_path}");
    println!("Gantt diagram written to {gantt_path}");
    Ok(())
}

fn serialize_report(
    report: &TimelineReport,
    format: ReportFormat,
) -> Result<String, PredictCommandError> {
    match format {
        ReportFormat::Yaml => {
            serde_yaml::to_string(report).map_err(|e| PredictCommandError::Serialize(e.to_string()))
        }
        ReportFormat::Json => serde_json::to_string_pretty(report)
            .map_err(|e| PredictCommandError::Serialize(e.to_string())),
    }
}
