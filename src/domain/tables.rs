use std::collections::HashMap;

use serde::Serialize;

use crate::domain::phase::Phase;
use crate::domain::risk::{Bottleneck, PhaseRisk, Severity};

/// Country whose entries are used when a country is missing from a table.
pub const DEFAULT_COUNTRY: &str = "IN";
/// Rate entry used for unknown project types.
pub const DEFAULT_PROJECT_TYPE: &str = "road_widening";
pub const DEFAULT_EFFICIENCY: f64 = 0.7;
pub const DEFAULT_CONFIDENCE_SCORE: i32 = 65;
/// Bounds used when neither the country nor the default country has an entry.
pub const GENERIC_PHASE_BOUNDS: PhaseBounds = PhaseBounds {
    min_months: 2.0,
    max_months: 6.0,
};

/// Inclusive duration range of a phase in months.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseBounds {
    pub min_months: f64,
    pub max_months: f64,
}

impl PhaseBounds {
    /// Returns `None` unless `0 < min <= max`.
    pub fn new(min_months: f64, max_months: f64) -> Option<Self> {
        if min_months > 0.0 && min_months <= max_months && max_months.is_finite() {
            Some(Self {
                min_months,
                max_months,
            })
        } else {
            None
        }
    }

    pub fn midpoint(&self) -> f64 {
        (self.min_months + self.max_months) / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConstructionRate {
    /// Linear in project length, split across sections built in parallel.
    PerKm {
        months_per_km: f64,
        parallel_sections: u32,
    },
    /// Area-type projects whose duration does not depend on length.
    Fixed { months_total: f64 },
}

impl ConstructionRate {
    pub fn base_months(&self, length_km: f64) -> f64 {
        match *self {
            ConstructionRate::PerKm {
                months_per_km,
                parallel_sections,
            } => months_per_km * length_km / f64::from(parallel_sections.max(1)),
            ConstructionRate::Fixed { months_total } => months_total,
        }
    }
}

/// A completed project used as a historical comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarProject {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length_km: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_months: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl SimilarProject {
    pub fn completed(name: &str, length_km: f64, actual_months: f64, year: i32) -> Self {
        Self {
            name: name.to_string(),
            length_km: Some(length_km),
            actual_months: Some(actual_months),
            year: Some(year),
            note: None,
        }
    }

    pub fn placeholder() -> Self {
        Self {
            name: "Generic comparison project".to_string(),
            length_km: None,
            actual_months: None,
            year: None,
            note: Some("Limited historical data for this region".to_string()),
        }
    }
}

/// Read-only country and project-type parameters used by the predictor.
///
/// Every lookup resolves to a value: exact match first, then the default
/// country (or project type), then a generic constant.
#[derive(Debug, Clone)]
pub struct TimelineTables {
    default_country: String,
    phase_durations: HashMap<(Phase, String), PhaseBounds>,
    construction_rates: HashMap<String, ConstructionRate>,
    efficiency_factors: HashMap<String, f64>,
    country_risks: HashMap<String, Vec<PhaseRisk>>,
    bottlenecks: HashMap<String, Vec<Bottleneck>>,
    confidence_scores: HashMap<String, i32>,
    similar_projects: HashMap<(String, String), Vec<SimilarProject>>,
    priority_countries: Vec<String>,
}

impl TimelineTables {
    pub fn empty(default_country: &str) -> Self {
        Self {
            default_country: default_country.to_string(),
            phase_durations: HashMap::new(),
            construction_rates: HashMap::new(),
            efficiency_factors: HashMap::new(),
            country_risks: HashMap::new(),
            bottlenecks: HashMap::new(),
            confidence_scores: HashMap::new(),
            similar_projects: HashMap::new(),
            priority_countries: Vec::new(),
        }
    }

    pub fn default_country(&self) -> &str {
        &self.default_country
    }

    pub fn set_default_country(&mut self, country: &str) {
        self.default_country = country.to_string();
    }

    pub fn insert_phase_bounds(&mut self, phase: Phase, country: &str, bounds: PhaseBounds) {
        self.phase_durations
            .insert((phase, country.to_string()), bounds);
    }

    pub fn insert_construction_rate(&mut self, project_type: &str, rate: ConstructionRate) {
        self.construction_rates
            .insert(project_type.to_string(), rate);
    }

    pub fn insert_efficiency(&mut self, country: &str, factor: f64) {
        self.efficiency_factors.insert(country.to_string(), factor);
    }

    pub fn insert_risks(&mut self, country: &str, risks: Vec<PhaseRisk>) {
        self.country_risks.insert(country.to_string(), risks);
    }

    pub fn insert_bottlenecks(&mut self, country: &str, bottlenecks: Vec<Bottleneck>) {
        self.bottlenecks.insert(country.to_string(), bottlenecks);
    }

    pub fn insert_confidence_score(&mut self, country: &str, score: i32) {
        self.confidence_scores.insert(country.to_string(), score);
    }

    pub fn insert_similar_projects(
        &mut self,
        country: &str,
        project_type: &str,
        projects: Vec<SimilarProject>,
    ) {
        self.similar_projects
            .insert((country.to_string(), project_type.to_string()), projects);
    }

    pub fn add_priority_country(&mut self, country: &str) {
        self.priority_countries.push(country.to_string());
    }

    /// Duration bounds for `phase` in `country`.
    ///
    /// Fallback order: exact match, default country, [`GENERIC_PHASE_BOUNDS`].
    pub fn phase_bounds(&self, phase: Phase, country: &str) -> PhaseBounds {
        if let Some(bounds) = self.phase_durations.get(&(phase, country.to_string())) {
            return *bounds;
        }
        if let Some(bounds) = self
            .phase_durations
            .get(&(phase, self.default_country.clone()))
        {
            tracing::debug!(%phase, country, "no phase bounds for country, using default country");
            return *bounds;
        }
        tracing::debug!(%phase, country, "no phase bounds, using generic range");
        GENERIC_PHASE_BOUNDS
    }

    pub fn construction_rate(&self, project_type: &str) -> ConstructionRate {
        if let Some(rate) = self.construction_rates.get(project_type) {
            return *rate;
        }
        tracing::debug!(project_type, "unknown project type, using default rate");
        self.construction_rates
            .get(DEFAULT_PROJECT_TYPE)
            .copied()
            .unwrap_or(ConstructionRate::PerKm {
                months_per_km: 1.2,
                parallel_sections: 3,
            })
    }

    pub fn efficiency(&self, country: &str) -> f64 {
        self.efficiency_factors
            .get(country)
            .copied()
            .unwrap_or_else(|| {
                tracing::debug!(country, "no efficiency factor, using default");
                DEFAULT_EFFICIENCY
            })
    }

    /// Risks for a country; countries without a catalog carry no risk events.
    pub fn risks(&self, country: &str) -> &[PhaseRisk] {
        match self.country_risks.get(country) {
            Some(risks) => risks,
            None => {
                tracing::debug!(country, "no risk catalog for country, using none");
                &[]
            }
        }
    }

    pub fn bottlenecks(&self, country: &str) -> Vec<Bottleneck> {
        self.bottlenecks.get(country).cloned().unwrap_or_else(|| {
            tracing::debug!(country, "no bottlenecks for country, using generic bottleneck");
            vec![Bottleneck::new(
                "Approvals",
                "Regulatory clearances",
                Severity::Medium,
            )]
        })
    }

    pub fn confidence_score(&self, country: &str) -> i32 {
        self.confidence_scores
            .get(country)
            .copied()
            .unwrap_or_else(|| {
                tracing::debug!(country, "no confidence score, using default");
                DEFAULT_CONFIDENCE_SCORE
            })
    }

    pub fn similar_projects(&self, country: &str, project_type: &str) -> Vec<SimilarProject> {
        self.similar_projects
            .get(&(country.to_string(), project_type.to_string()))
            .cloned()
            .unwrap_or_else(|| {
                tracing::debug!(country, project_type, "no similar projects, using placeholder");
                vec![SimilarProject::placeholder()]
            })
    }

    /// Countries where projects can be designated as government priority.
    pub fn is_priority_country(&self, country: &str) -> bool {
        self.priority_countries.iter().any(|c| c == country)
    }
}

impl Default for TimelineTables {
    fn default() -> Self {
        crate::domain::reference_tables::reference_tables()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables_with_planning() -> TimelineTables {
        let mut tables = TimelineTables::empty("IN");
        tables.insert_phase_bounds(Phase::Planning, "IN", PhaseBounds::new(3.0, 8.0).unwrap());
        tables.insert_phase_bounds(Phase::Planning, "DE", PhaseBounds::new(4.0, 8.0).unwrap());
        tables
    }

    #[test]
    fn phase_bounds_resolve_exact_then_default_then_generic() {
        let tables = tables_with_planning();

        assert_eq!(
            tables.phase_bounds(Phase::Planning, "DE"),
            PhaseBounds::new(4.0, 8.0).unwrap()
        );
        assert_eq!(
            tables.phase_bounds(Phase::Planning, "ZZ"),
            PhaseBounds::new(3.0, 8.0).unwrap()
        );
        assert_eq!(tables.phase_bounds(Phase::Design, "DE"), GENERIC_PHASE_BOUNDS);
    }

    #[test]
    fn country_lookup_is_case_sensitive() {
        let tables = tables_with_planning();
        assert_eq!(
            tables.phase_bounds(Phase::Planning, "de"),
            PhaseBounds::new(3.0, 8.0).unwrap()
        );
    }

    #[test]
    fn phase_bounds_reject_inverted_or_non_positive_ranges() {
        assert!(PhaseBounds::new(5.0, 4.0).is_none());
        assert!(PhaseBounds::new(0.0, 4.0).is_none());
        assert!(PhaseBounds::new(-1.0, 4.0).is_none());
        assert!(PhaseBounds::new(4.0, 4.0).is_some());
    }

    #[test]
    fn construction_rate_base_months() {
        let per_km = ConstructionRate::PerKm {
            months_per_km: 1.2,
            parallel_sections: 3,
        };
        assert!((per_km.base_months(10.0) - 4.0).abs() < 1e-9);

        let fixed = ConstructionRate::Fixed { months_total: 24.0 };
        assert_eq!(fixed.base_months(1.0), 24.0);
        assert_eq!(fixed.base_months(50.0), 24.0);
    }

    #[test]
    fn unknown_values_fall_back_to_defaults() {
        let tables = TimelineTables::empty("IN");
        assert_eq!(tables.efficiency("ZZ"), DEFAULT_EFFICIENCY);
        assert_eq!(tables.confidence_score("ZZ"), DEFAULT_CONFIDENCE_SCORE);
        assert!(tables.risks("ZZ").is_empty());
        assert_eq!(tables.bottlenecks("ZZ").len(), 1);
        assert_eq!(
            tables.similar_projects("ZZ", "bridge"),
            vec![SimilarProject::placeholder()]
        );
        assert_eq!(
            tables.construction_rate("bogus"),
            ConstructionRate::PerKm {
                months_per_km: 1.2,
                parallel_sections: 3
            }
        );
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn every_fallback_is_logged_at_debug() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let tables = TimelineTables::empty("IN");
        tracing::subscriber::with_default(subscriber, || {
            tables.risks("ZZ");
            tables.bottlenecks("ZZ");
            tables.confidence_score("ZZ");
            tables.similar_projects("ZZ", "bridge");
        });

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        for message in [
            "no risk catalog for country",
            "no bottlenecks for country",
            "no confidence score",
            "no similar projects",
        ] {
            assert!(output.contains(message), "missing {message:?} in {output}");
        }
    }
}
