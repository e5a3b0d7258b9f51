use chrono::NaiveDate;
use serde::{Serialize, Serializer};

use crate::domain::phase::Phase;
use crate::domain::project::Complexity;
use crate::domain::risk::Bottleneck;
use crate::domain::tables::SimilarProject;

/// Month values are kept at full precision and rounded to one decimal when serialized.
fn one_decimal<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_one_decimal(*value))
}

pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TimelineMonths {
    #[serde(serialize_with = "one_decimal")]
    pub estimated: f64,
    #[serde(serialize_with = "one_decimal")]
    pub best_case: f64,
    #[serde(serialize_with = "one_decimal")]
    pub most_likely: f64,
    #[serde(serialize_with = "one_decimal")]
    pub worst_case: f64,
    #[serde(serialize_with = "one_decimal")]
    pub standard_deviation: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CompletionDates {
    pub estimated: NaiveDate,
    pub best_case: NaiveDate,
    pub worst_case: NaiveDate,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PhaseScheduleEntry {
    pub phase: Phase,
    pub name: String,
    #[serde(serialize_with = "one_decimal")]
    pub duration_months: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_critical: bool,
    pub dependencies: Vec<Phase>,
    pub resources: Vec<String>,
    pub milestones: Vec<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CriticalPath {
    pub phases: Vec<String>,
    #[serde(serialize_with = "one_decimal")]
    pub total_duration_months: f64,
    pub bottleneck_phase: String,
    pub float_available: bool,
    pub description: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RiskSummary {
    pub name: String,
    pub probability_pct: String,
    pub impact_text: String,
    pub mitigation: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct AccelerationOption {
    pub strategy: String,
    pub time_saved_months: f64,
    pub cost_increase_percent: f64,
    pub risk: String,
    pub applicable_phases: Vec<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct GanttTask {
    pub id: usize,
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    #[serde(serialize_with = "one_decimal")]
    pub duration: f64,
    pub critical: bool,
    pub progress: u8,
    pub dependencies: Vec<usize>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct GanttMilestone {
    pub name: String,
    pub phase: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct GanttChartData {
    pub tasks: Vec<GanttTask>,
    pub milestones: Vec<GanttMilestone>,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    pub fn from_score(score: i32) -> Self {
        if score >= 80 {
            ConfidenceTier::High
        } else if score >= 60 {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConfidenceTier::High => "HIGH",
            ConfidenceTier::Medium => "MEDIUM",
            ConfidenceTier::Low => "LOW",
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ConfidenceLevel {
    pub level: ConfidenceTier,
    pub score: i32,
    pub factors: Vec<String>,
}

#[derive(Serialize, Debug, Clone)]
pub struct TimelineReport {
    pub project_type: String,
    pub length_km: f64,
    pub country_code: String,
    pub complexity: Complexity,
    pub start_date: NaiveDate,
    pub trial_count: usize,
    pub timeline_months: TimelineMonths,
    pub completion_dates: CompletionDates,
    pub phases: Vec<PhaseScheduleEntry>,
    pub critical_path: CriticalPath,
    pub bottlenecks: Vec<Bottleneck>,
    pub risks: Vec<RiskSummary>,
    pub acceleration_options: Vec<AccelerationOption>,
    pub gantt_chart_data: GanttChartData,
    pub confidence_level: ConfidenceLevel,
    pub similar_projects: Vec<SimilarProject>,
}

/// Full result of a prediction: the report plus the raw trial samples.
#[derive(Serialize, Debug, Clone)]
pub struct SimulationOutput {
    pub report: TimelineReport,
    /// Trial totals in months, sorted ascending.
    pub results: Vec<f64>,
    /// Sampled construction durations, one per trial, in trial order.
    #[serde(skip)]
    pub construction_samples: Vec<f64>,
    #[serde(skip)]
    pub base_construction_months: f64,
}
