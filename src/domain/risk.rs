use serde::{Deserialize, Serialize};

/// A schedule risk that may or may not materialize during a project.
///
/// Each risk is evaluated as an independent Bernoulli trial per simulation
/// run. When it fires, only part of `impact_months` is realized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseRisk {
    pub name: String,
    pub probability: f64,
    pub impact_months: f64,
    pub mitigation: String,
}

impl PhaseRisk {
    pub fn new(name: &str, probability: f64, impact_months: f64, mitigation: &str) -> Self {
        Self {
            name: name.to_string(),
            probability,
            impact_months,
            mitigation: mitigation.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// A known schedule bottleneck for a country.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bottleneck {
    pub phase: String,
    pub issue: String,
    pub severity: Severity,
}

impl Bottleneck {
    pub fn new(phase: &str, issue: &str, severity: Severity) -> Self {
        Self {
            phase: phase.to_string(),
            issue: issue.to_string(),
            severity,
        }
    }
}
