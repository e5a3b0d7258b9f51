use crate::domain::risk::PhaseRisk;
use crate::domain::tables::TimelineTables;
use crate::services::simulation_types::{
    AccelerationOption, ConfidenceLevel, ConfidenceTier, RiskSummary,
};

const CONFIDENCE_PENALTY_TYPES: [&str; 2] = ["tunnel", "interchange"];
const CONFIDENCE_BONUS_TYPE: &str = "resurfacing";
const PREDICTABLE_REGULATION_COUNTRIES: [&str; 3] = ["DE", "JP", "US"];

pub fn summarize_risks(risks: &[PhaseRisk]) -> Vec<RiskSummary> {
    risks
        .iter()
        .map(|risk| RiskSummary {
            name: risk.name.clone(),
            probability_pct: format!("{:.0}%", risk.probability * 100.0),
            impact_text: format!("+{} months", risk.impact_months),
            mitigation: risk.mitigation.clone(),
        })
        .collect()
}

fn option(
    strategy: &str,
    time_saved_months: f64,
    cost_increase_percent: f64,
    risk: &str,
    applicable_phases: &[&str],
) -> AccelerationOption {
    AccelerationOption {
        strategy: strategy.to_string(),
        time_saved_months,
        cost_increase_percent,
        risk: risk.to_string(),
        applicable_phases: applicable_phases.iter().map(|p| p.to_string()).collect(),
    }
}

pub fn acceleration_options(tables: &TimelineTables, country_code: &str) -> Vec<AccelerationOption> {
    let mut options = vec![
        option(
            "Fast-track design and approvals",
            3.0,
            10.0,
            "Design changes during construction",
            &["Design", "Approvals"],
        ),
        option(
            "Pre-qualification of contractors",
            2.0,
            0.0,
            "Limited competition",
            &["Tendering"],
        ),
        option(
            "Multiple work fronts",
            4.0,
            15.0,
            "Coordination complexity",
            &["Construction"],
        ),
        option(
            "Night shift construction",
            2.0,
            20.0,
            "Quality control, noise complaints",
            &["Construction"],
        ),
        option(
            "Pre-cast elements",
            3.0,
            8.0,
            "Transportation logistics",
            &["Construction"],
        ),
    ];

    if tables.is_priority_country(country_code) {
        options.push(option(
            "Government priority designation",
            6.0,
            0.0,
            "Political dependency",
            &["Approvals", "Land Acquisition"],
        ));
    }

    options
}

pub fn confidence_level(
    tables: &TimelineTables,
    country_code: &str,
    project_type: &str,
) -> ConfidenceLevel {
    let mut score = tables.confidence_score(country_code);
    if CONFIDENCE_PENALTY_TYPES.contains(&project_type) {
        score -= 10;
    } else if project_type == CONFIDENCE_BONUS_TYPE {
        score += 5;
    }

    let data_quality = if score >= 75 { "Good" } else { "Limited" };
    let predictability = if PREDICTABLE_REGULATION_COUNTRIES.contains(&country_code) {
        "High"
    } else {
        "Variable"
    };

    ConfidenceLevel {
        level: ConfidenceTier::from_score(score),
        score,
        factors: vec![
            format!("Historical data quality: {data_quality}"),
            format!("Project complexity: {}", title_case(project_type)),
            format!("Regulatory predictability: {predictability}"),
        ],
    }
}

/// `road_widening` => `Road Widening`
pub fn title_case(value: &str) -> String {
    value
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
