use crate::domain::phase::{PRE_CONSTRUCTION_PHASES, Phase};
use crate::domain::project::Complexity;
use crate::domain::risk::PhaseRisk;
use crate::domain::tables::{PhaseBounds, TimelineTables};
use crate::services::duration_sampler::DurationSampler;
use crate::services::percentiles;

/// Spread of the construction draw relative to the base duration.
pub const CONSTRUCTION_STD_DEV_RATIO: f64 = 0.2;
/// Construction draws are never shorter than this share of the base duration.
pub const CONSTRUCTION_FLOOR_RATIO: f64 = 0.7;
/// Share of a risk's stated impact realized when it fires, drawn uniformly.
pub const RISK_IMPACT_RANGE: (f64, f64) = (0.5, 1.0);

/// Expected construction duration in months, before any sampling.
pub fn base_construction_months(
    tables: &TimelineTables,
    project_type: &str,
    length_km: f64,
    complexity: Complexity,
    country_code: &str,
) -> f64 {
    let rate = tables.construction_rate(project_type);
    let months = rate.base_months(length_km) * complexity.multiplier();
    months / tables.efficiency(country_code)
}

/// Table values a trial needs, resolved once per prediction.
#[derive(Debug, Clone)]
pub struct TrialInputs {
    pub pre_construction: Vec<(Phase, PhaseBounds)>,
    pub base_construction_months: f64,
    pub commissioning: PhaseBounds,
    pub risks: Vec<PhaseRisk>,
}

impl TrialInputs {
    pub fn resolve(
        tables: &TimelineTables,
        country_code: &str,
        base_construction_months: f64,
    ) -> Self {
        let pre_construction = PRE_CONSTRUCTION_PHASES
            .into_iter()
            .map(|phase| (phase, tables.phase_bounds(phase, country_code)))
            .collect();
        Self {
            pre_construction,
            base_construction_months,
            commissioning: tables.phase_bounds(Phase::Commissioning, country_code),
            risks: tables.risks(country_code).to_vec(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TrialSamples {
    /// Total project duration per trial, sorted ascending.
    pub totals: Vec<f64>,
    /// Construction duration per trial, in trial order.
    pub construction: Vec<f64>,
}

pub fn run_trials<S: DurationSampler + ?Sized>(
    inputs: &TrialInputs,
    trial_count: usize,
    sampler: &mut S,
) -> TrialSamples {
    let mut totals = Vec::with_capacity(trial_count);
    let mut construction = Vec::with_capacity(trial_count);
    for _ in 0..trial_count {
        let (total, construction_months) = simulate_single_run(inputs, sampler);
        totals.push(total);
        construction.push(construction_months);
    }
    totals.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    TrialSamples {
        totals,
        construction,
    }
}

fn simulate_single_run<S: DurationSampler + ?Sized>(
    inputs: &TrialInputs,
    sampler: &mut S,
) -> (f64, f64) {
    let mut total = 0.0_f64;

    for (_, bounds) in &inputs.pre_construction {
        total += sampler.triangular(bounds.min_months, bounds.midpoint(), bounds.max_months);
    }

    let base = inputs.base_construction_months;
    let construction = sampler
        .normal(base, base * CONSTRUCTION_STD_DEV_RATIO)
        .max(base * CONSTRUCTION_FLOOR_RATIO);
    total += construction;

    total += sampler.uniform(
        inputs.commissioning.min_months,
        inputs.commissioning.max_months,
    );

    for risk in &inputs.risks {
        if sampler.occurs(risk.probability) {
            let (low, high) = RISK_IMPACT_RANGE;
            total += risk.impact_months * sampler.uniform(low, high);
        }
    }

    (total, construction)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialStatistics {
    pub mean: f64,
    pub p10: f64,
    pub p50: f64,
    pub p90: f64,
    pub std_dev: f64,
}

impl TrialStatistics {
    /// `sorted_totals` must be sorted ascending.
    pub fn from_sorted(sorted_totals: &[f64]) -> Self {
        Self {
            mean: percentiles::mean(sorted_totals),
            p10: percentiles::value_sorted(sorted_totals, 10.0).unwrap_or(0.0),
            p50: percentiles::value_sorted(sorted_totals, 50.0).unwrap_or(0.0),
            p90: percentiles::value_sorted(sorted_totals, 90.0).unwrap_or(0.0),
            std_dev: percentiles::std_dev(sorted_totals),
        }
    }
}
