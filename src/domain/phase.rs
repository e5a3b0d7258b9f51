use serde::{Deserialize, Serialize};

/// A phase of a road construction project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Planning,
    Design,
    Approvals,
    LandAcquisition,
    Tendering,
    Mobilization,
    Construction,
    Commissioning,
}

/// Phases sampled from the triangular distribution before construction starts.
pub const PRE_CONSTRUCTION_PHASES: [Phase; 5] = [
    Phase::Planning,
    Phase::Design,
    Phase::Approvals,
    Phase::LandAcquisition,
    Phase::Tendering,
];

/// Order in which the deterministic schedule is laid out.
pub const SCHEDULE_ORDER: [Phase; 8] = [
    Phase::Planning,
    Phase::Design,
    Phase::Approvals,
    Phase::LandAcquisition,
    Phase::Tendering,
    Phase::Mobilization,
    Phase::Construction,
    Phase::Commissioning,
];

pub const MOBILIZATION_MONTHS: f64 = 1.5;

impl Phase {
    pub fn key(self) -> &'static str {
        match self {
            Phase::Planning => "planning",
            Phase::Design => "design",
            Phase::Approvals => "approvals",
            Phase::LandAcquisition => "land_acquisition",
            Phase::Tendering => "tendering",
            Phase::Mobilization => "mobilization",
            Phase::Construction => "construction",
            Phase::Commissioning => "commissioning",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        SCHEDULE_ORDER.into_iter().find(|phase| phase.key() == key)
    }

    /// Human readable title, e.g. `Land Acquisition`.
    pub fn title(self) -> &'static str {
        match self {
            Phase::Planning => "Planning",
            Phase::Design => "Design",
            Phase::Approvals => "Approvals",
            Phase::LandAcquisition => "Land Acquisition",
            Phase::Tendering => "Tendering",
            Phase::Mobilization => "Mobilization",
            Phase::Construction => "Construction",
            Phase::Commissioning => "Commissioning",
        }
    }

    /// Critical phases are fixed, they are not derived from durations.
    pub fn is_critical(self) -> bool {
        matches!(
            self,
            Phase::Approvals | Phase::LandAcquisition | Phase::Construction
        )
    }

    pub fn dependencies(self) -> &'static [Phase] {
        match self {
            Phase::Planning => &[],
            Phase::Design => &[Phase::Planning],
            Phase::Approvals => &[Phase::Design],
            Phase::LandAcquisition => &[Phase::Approvals],
            Phase::Tendering => &[Phase::Design, Phase::Approvals],
            Phase::Mobilization => &[Phase::Tendering, Phase::LandAcquisition],
            Phase::Construction => &[Phase::Mobilization],
            Phase::Commissioning => &[Phase::Construction],
        }
    }

    pub fn resources(self) -> &'static [&'static str] {
        match self {
            Phase::Planning => &["Project Manager", "Planning Team", "Surveyors"],
            Phase::Design => &["Civil Engineers", "Structural Engineers", "CAD Operators"],
            Phase::Approvals => &[
                "Legal Team",
                "Environmental Consultants",
                "Government Liaisons",
            ],
            Phase::LandAcquisition => &["Land Officers", "Legal Team", "Valuers"],
            Phase::Tendering => &["Procurement Team", "Technical Evaluators"],
            Phase::Mobilization => &["Site Manager", "Equipment", "Initial Workforce"],
            Phase::Construction => &["Full Construction Team", "Heavy Equipment", "Materials"],
            Phase::Commissioning => &["Testing Team", "Quality Inspectors", "Handover Team"],
        }
    }

    pub fn milestones(self) -> &'static [&'static str] {
        match self {
            Phase::Planning => &["Feasibility Study Complete", "Detailed Project Report Approved"],
            Phase::Design => &["30% Design Review", "100% Design Complete"],
            Phase::Approvals => &["Environmental Clearance", "All Permits Obtained"],
            Phase::LandAcquisition => &["Compensation Disbursed", "Possession Taken"],
            Phase::Tendering => &["Bid Opening", "Contract Award"],
            Phase::Mobilization => &["Site Handover", "Equipment Ready"],
            Phase::Construction => &[
                "Foundation Complete",
                "Superstructure Complete",
                "Finishing",
            ],
            Phase::Commissioning => &["Testing Complete", "Final Inspection", "Opening Ceremony"],
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}
