use chrono::{NaiveDate, NaiveDateTime};
use rand::Rng;
use thiserror::Error;

use crate::domain::project::{Complexity, ProjectDescriptor};
use crate::domain::tables::TimelineTables;
use crate::services::annotations::{acceleration_options, confidence_level, summarize_risks};
use crate::services::duration_sampler::{DurationSampler, RandomSampler};
use crate::services::gantt_diagram::build_gantt_chart_data;
use crate::services::monte_carlo::{
    TrialInputs, TrialStatistics, base_construction_months, run_trials,
};
use crate::services::phase_schedule::{
    DAYS_PER_MONTH, add_days, build_phase_schedule, identify_critical_path, phase_graph,
};
use crate::services::simulation_types::{
    CompletionDates, SimulationOutput, TimelineMonths, TimelineReport,
};

pub const DEFAULT_TRIAL_COUNT: usize = 1000;

/// All variants but `InvalidScheduleOrder` are invalid-input errors;
/// unknown categories never fail.
#[derive(Error, Debug, PartialEq)]
pub enum TimelineError {
    #[error("invalid input: length_km must be greater than zero, got {0}")]
    InvalidLength(f64),
    #[error("invalid input: length_km {0} is too large to simulate")]
    LengthTooLarge(f64),
    #[error("invalid input: trial count must be at least 1")]
    InvalidTrialCount,
    #[error("invalid input: start date {0} is not an ISO-8601 date")]
    InvalidStartDate(String),
    #[error("phase schedule order violates phase dependencies")]
    InvalidScheduleOrder,
}

/// Predicts a project timeline by Monte Carlo simulation.
pub fn predict<R: Rng + ?Sized>(
    project: &ProjectDescriptor,
    trial_count: usize,
    tables: &TimelineTables,
    rng: &mut R,
) -> Result<SimulationOutput, TimelineError> {
    let mut sampler = RandomSampler::new(rng);
    predict_with_sampler(project, trial_count, tables, &mut sampler)
}

/// String-typed entry point, mirroring the request body of the timeline endpoint.
#[allow(clippy::too_many_arguments)]
pub fn predict_timeline<R: Rng + ?Sized>(
    project_type: &str,
    length_km: f64,
    country_code: &str,
    complexity: &str,
    start_date: Option<&str>,
    trial_count: usize,
    tables: &TimelineTables,
    rng: &mut R,
) -> Result<TimelineReport, TimelineError> {
    let start_date = match start_date {
        Some(value) => parse_start_date(value)?,
        None => today(),
    };
    let project = ProjectDescriptor::new(
        project_type,
        length_km,
        country_code,
        Complexity::from_name_or_default(complexity),
        start_date,
    );
    Ok(predict(&project, trial_count, tables, rng)?.report)
}

pub fn predict_with_sampler<S: DurationSampler + ?Sized>(
    project: &ProjectDescriptor,
    trial_count: usize,
    tables: &TimelineTables,
    sampler: &mut S,
) -> Result<SimulationOutput, TimelineError> {
    if !(project.length_km > 0.0) || !project.length_km.is_finite() {
        return Err(TimelineError::InvalidLength(project.length_km));
    }
    if trial_count == 0 {
        return Err(TimelineError::InvalidTrialCount);
    }

    let country = project.country_code.as_str();
    let base_construction = base_construction_months(
        tables,
        &project.project_type,
        project.length_km,
        project.complexity,
        country,
    );
    if !base_construction.is_finite() {
        return Err(TimelineError::LengthTooLarge(project.length_km));
    }
    let graph = phase_graph().ok_or(TimelineError::InvalidScheduleOrder)?;

    let inputs = TrialInputs::resolve(tables, country, base_construction);
    let samples = run_trials(&inputs, trial_count, sampler);
    let stats = TrialStatistics::from_sorted(&samples.totals);
    let summary = [stats.mean, stats.p10, stats.p50, stats.p90, stats.std_dev];
    if summary.iter().any(|value| !value.is_finite()) {
        return Err(TimelineError::LengthTooLarge(project.length_km));
    }

    let phases = build_phase_schedule(tables, graph, country, base_construction, project.start_date);
    let critical_path = identify_critical_path(&phases);
    let gantt_chart_data = build_gantt_chart_data(&phases);

    let report = TimelineReport {
        project_type: project.project_type.clone(),
        length_km: project.length_km,
        country_code: project.country_code.clone(),
        complexity: project.complexity,
        start_date: project.start_date,
        trial_count,
        timeline_months: TimelineMonths {
            estimated: stats.mean,
            best_case: stats.p10,
            most_likely: stats.p50,
            worst_case: stats.p90,
            standard_deviation: stats.std_dev,
        },
        completion_dates: completion_dates(project.start_date, &stats),
        phases,
        critical_path,
        bottlenecks: tables.bottlenecks(country),
        risks: summarize_risks(tables.risks(country)),
        acceleration_options: acceleration_options(tables, country),
        gantt_chart_data,
        confidence_level: confidence_level(tables, country, &project.project_type),
        similar_projects: tables.similar_projects(country, &project.project_type),
    };

    tracing::info!(
        project_type = %project.project_type,
        country,
        trial_count,
        estimated_months = stats.mean,
        p10 = stats.p10,
        p90 = stats.p90,
        "timeline prediction complete"
    );

    Ok(SimulationOutput {
        report,
        results: samples.totals,
        construction_samples: samples.construction,
        base_construction_months: base_construction,
    })
}

fn completion_dates(start_date: NaiveDate, stats: &TrialStatistics) -> CompletionDates {
    let offset = |months: f64| add_days(start_date, (months * DAYS_PER_MONTH).trunc());
    CompletionDates {
        estimated: offset(stats.mean),
        best_case: offset(stats.p10),
        worst_case: offset(stats.p90),
    }
}

/// Accepts `YYYY-MM-DD` or a full ISO-8601 date-time, keeping only the date.
pub fn parse_start_date(value: &str) -> Result<NaiveDate, TimelineError> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(date_time) = chrono::DateTime::parse_from_rfc3339(trimmed) {
        return Ok(date_time.date_naive());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(date_time) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(date_time.date());
        }
    }
    Err(TimelineError::InvalidStartDate(value.to_string()))
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
