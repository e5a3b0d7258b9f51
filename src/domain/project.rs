use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Low,
    #[default]
    Medium,
    High,
    VeryHigh,
}

impl Complexity {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "low" => Some(Complexity::Low),
            "medium" => Some(Complexity::Medium),
            "high" => Some(Complexity::High),
            "very_high" => Some(Complexity::VeryHigh),
            _ => None,
        }
    }

    /// Unknown tiers are resolved to `Medium`, whose multiplier is 1.0.
    pub fn from_name_or_default(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            tracing::debug!(complexity = name, "unknown complexity tier, using medium");
            Complexity::default()
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Complexity::Low => "low",
            Complexity::Medium => "medium",
            Complexity::High => "high",
            Complexity::VeryHigh => "very_high",
        }
    }

    pub fn multiplier(self) -> f64 {
        match self {
            Complexity::Low => 0.8,
            Complexity::Medium => 1.0,
            Complexity::High => 1.3,
            Complexity::VeryHigh => 1.6,
        }
    }
}

/// Input to a timeline prediction.
///
/// `project_type` and `country_code` are kept as given; they are matched
/// case-sensitively against the lookup tables and fall back to defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDescriptor {
    pub project_type: String,
    pub length_km: f64,
    pub country_code: String,
    pub complexity: Complexity,
    pub start_date: NaiveDate,
}

impl ProjectDescriptor {
    pub fn new(
        project_type: impl Into<String>,
        length_km: f64,
        country_code: impl Into<String>,
        complexity: Complexity,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            project_type: project_type.into(),
            length_km,
            country_code: country_code.into(),
            complexity,
            start_date,
        }
    }
}
