//! Built-in reference data for fifteen countries and seven project types.

use crate::domain::phase::Phase;
use crate::domain::risk::{Bottleneck, PhaseRisk, Severity};
use crate::domain::tables::{
    ConstructionRate, DEFAULT_COUNTRY, PhaseBounds, SimilarProject, TimelineTables,
};

type BoundsRow = (&'static str, f64, f64);

const PLANNING: &[BoundsRow] = &[
    ("IN", 3.0, 8.0),
    ("US", 6.0, 12.0),
    ("DE", 4.0, 8.0),
    ("NG", 2.0, 12.0),
    ("BR", 4.0, 10.0),
    ("AU", 5.0, 10.0),
    ("JP", 4.0, 8.0),
    ("CN", 2.0, 5.0),
    ("UK", 5.0, 10.0),
    ("FR", 4.0, 9.0),
    ("AE", 2.0, 5.0),
    ("MX", 3.0, 9.0),
    ("ZA", 4.0, 10.0),
    ("ID", 3.0, 10.0),
    ("SA", 2.0, 6.0),
];

const DESIGN: &[BoundsRow] = &[
    ("IN", 3.0, 6.0),
    ("US", 4.0, 8.0),
    ("DE", 4.0, 7.0),
    ("NG", 2.0, 8.0),
    ("BR", 3.0, 7.0),
    ("AU", 4.0, 7.0),
    ("JP", 3.0, 6.0),
    ("CN", 2.0, 5.0),
    ("UK", 4.0, 7.0),
    ("FR", 3.0, 6.0),
    ("AE", 2.0, 4.0),
    ("MX", 2.0, 6.0),
    ("ZA", 3.0, 7.0),
    ("ID", 2.0, 7.0),
    ("SA", 2.0, 5.0),
];

const APPROVALS: &[BoundsRow] = &[
    ("IN", 6.0, 18.0),
    ("US", 8.0, 24.0),
    ("DE", 4.0, 10.0),
    ("NG", 4.0, 30.0),
    ("BR", 8.0, 20.0),
    ("AU", 6.0, 14.0),
    ("JP", 4.0, 10.0),
    ("CN", 2.0, 6.0),
    ("UK", 6.0, 15.0),
    ("FR", 5.0, 12.0),
    ("AE", 2.0, 5.0),
    ("MX", 4.0, 14.0),
    ("ZA", 5.0, 16.0),
    ("ID", 4.0, 18.0),
    ("SA", 2.0, 6.0),
];

const LAND_ACQUISITION: &[BoundsRow] = &[
    ("IN", 6.0, 24.0),
    ("US", 3.0, 12.0),
    ("DE", 2.0, 8.0),
    ("NG", 3.0, 18.0),
    ("BR", 4.0, 15.0),
    ("AU", 2.0, 8.0),
    ("JP", 4.0, 12.0),
    ("CN", 1.0, 4.0),
    ("UK", 3.0, 10.0),
    ("FR", 3.0, 10.0),
    ("AE", 1.0, 3.0),
    ("MX", 3.0, 12.0),
    ("ZA", 4.0, 15.0),
    ("ID", 4.0, 18.0),
    ("SA", 1.0, 4.0),
];

const TENDERING: &[BoundsRow] = &[
    ("IN", 2.0, 4.0),
    ("US", 3.0, 6.0),
    ("DE", 2.0, 5.0),
    ("NG", 2.0, 6.0),
    ("BR", 2.0, 5.0),
    ("AU", 2.0, 5.0),
    ("JP", 2.0, 4.0),
    ("CN", 1.0, 3.0),
    ("UK", 2.0, 5.0),
    ("FR", 2.0, 4.0),
    ("AE", 1.0, 3.0),
    ("MX", 2.0, 4.0),
    ("ZA", 2.0, 5.0),
    ("ID", 2.0, 5.0),
    ("SA", 1.0, 3.0),
];

const COMMISSIONING: &[BoundsRow] = &[
    ("IN", 1.0, 3.0),
    ("US", 2.0, 4.0),
    ("DE", 1.0, 3.0),
    ("NG", 1.0, 4.0),
    ("BR", 1.0, 3.0),
    ("AU", 1.0, 3.0),
    ("JP", 1.0, 2.0),
    ("CN", 1.0, 2.0),
    ("UK", 1.0, 3.0),
    ("FR", 1.0, 2.0),
    ("AE", 1.0, 2.0),
    ("MX", 1.0, 3.0),
    ("ZA", 1.0, 4.0),
    ("ID", 1.0, 4.0),
    ("SA", 1.0, 2.0),
];

const EFFICIENCY: &[(&str, f64)] = &[
    ("IN", 0.75),
    ("US", 0.85),
    ("DE", 0.95),
    ("NG", 0.55),
    ("BR", 0.70),
    ("AU", 0.90),
    ("JP", 0.98),
    ("CN", 0.92),
    ("UK", 0.85),
    ("FR", 0.88),
    ("AE", 0.90),
    ("MX", 0.65),
    ("ZA", 0.60),
    ("ID", 0.60),
    ("SA", 0.85),
];

const CONFIDENCE: &[(&str, i32)] = &[
    ("IN", 75),
    ("US", 92),
    ("DE", 95),
    ("NG", 50),
    ("BR", 70),
    ("AU", 90),
    ("JP", 95),
    ("CN", 70),
    ("UK", 90),
    ("FR", 88),
];

pub fn reference_tables() -> TimelineTables {
    let mut tables = TimelineTables::empty(DEFAULT_COUNTRY);

    let phase_rows = [
        (Phase::Planning, PLANNING),
        (Phase::Design, DESIGN),
        (Phase::Approvals, APPROVALS),
        (Phase::LandAcquisition, LAND_ACQUISITION),
        (Phase::Tendering, TENDERING),
        (Phase::Commissioning, COMMISSIONING),
    ];
    for (phase, rows) in phase_rows {
        for &(country, min, max) in rows {
            if let Some(bounds) = PhaseBounds::new(min, max) {
                tables.insert_phase_bounds(phase, country, bounds);
            }
        }
    }

    let per_km = |months_per_km: f64, parallel_sections: u32| ConstructionRate::PerKm {
        months_per_km,
        parallel_sections,
    };
    tables.insert_construction_rate("road_widening", per_km(1.2, 3));
    tables.insert_construction_rate("flyover", per_km(4.5, 2));
    tables.insert_construction_rate("bridge", per_km(6.0, 1));
    tables.insert_construction_rate("tunnel", per_km(12.0, 1));
    tables.insert_construction_rate(
        "interchange",
        ConstructionRate::Fixed { months_total: 24.0 },
    );
    tables.insert_construction_rate("resurfacing", per_km(0.3, 5));
    tables.insert_construction_rate("brt_corridor", per_km(2.0, 3));

    for &(country, factor) in EFFICIENCY {
        tables.insert_efficiency(country, factor);
    }
    for &(country, score) in CONFIDENCE {
        tables.insert_confidence_score(country, score);
    }

    tables.insert_risks(
        "IN",
        vec![
            PhaseRisk::new("Monsoon delays", 0.8, 3.0, "Schedule work outside monsoon season"),
            PhaseRisk::new("Land disputes", 0.4, 6.0, "Pre-emptive legal clearances"),
            PhaseRisk::new("Political changes", 0.2, 4.0, "Multi-party consensus building"),
            PhaseRisk::new("Labor shortages", 0.3, 2.0, "Contract with multiple vendors"),
        ],
    );
    tables.insert_risks(
        "US",
        vec![
            PhaseRisk::new("Environmental lawsuits", 0.3, 12.0, "Early stakeholder engagement"),
            PhaseRisk::new("Labor strikes", 0.15, 2.0, "Union negotiations"),
            PhaseRisk::new("Material supply chain", 0.2, 3.0, "Diversified suppliers"),
            PhaseRisk::new("Regulatory changes", 0.1, 4.0, "Legal buffer in contracts"),
        ],
    );
    tables.insert_risks(
        "BR",
        vec![
            PhaseRisk::new("Rain season delays", 0.7, 4.0, "Seasonal scheduling"),
            PhaseRisk::new(
                "Environmental licensing",
                0.5,
                8.0,
                "Pre-filing environmental studies",
            ),
            PhaseRisk::new("Corruption investigations", 0.2, 6.0, "Compliance programs"),
            PhaseRisk::new("Economic instability", 0.3, 3.0, "Currency hedging"),
        ],
    );
    tables.insert_risks(
        "NG",
        vec![
            PhaseRisk::new("Funding delays", 0.6, 8.0, "Escrow arrangements"),
            PhaseRisk::new("Security issues", 0.4, 4.0, "Security protocols"),
            PhaseRisk::new("Equipment import delays", 0.5, 3.0, "Pre-position equipment"),
            PhaseRisk::new("Fuel shortages", 0.3, 2.0, "Backup fuel storage"),
        ],
    );

    tables.insert_bottlenecks(
        "IN",
        vec![
            Bottleneck::new("Land Acquisition", "Compensation disputes", Severity::High),
            Bottleneck::new("Approvals", "Multiple agency clearances", Severity::High),
            Bottleneck::new("Construction", "Monsoon season (Jun-Sep)", Severity::Medium),
        ],
    );
    tables.insert_bottlenecks(
        "US",
        vec![
            Bottleneck::new("Approvals", "Environmental Impact Statement", Severity::High),
            Bottleneck::new("Planning", "Public consultation requirements", Severity::Medium),
        ],
    );
    tables.insert_bottlenecks(
        "BR",
        vec![
            Bottleneck::new("Approvals", "Environmental licensing (IBAMA)", Severity::High),
            Bottleneck::new("Construction", "Rainy season (Nov-Mar)", Severity::Medium),
        ],
    );
    tables.insert_bottlenecks(
        "NG",
        vec![
            Bottleneck::new("Approvals", "Bureaucratic delays", Severity::High),
            Bottleneck::new("Construction", "Funding disbursement", Severity::High),
            Bottleneck::new("Mobilization", "Equipment import", Severity::Medium),
        ],
    );

    tables.insert_similar_projects(
        "IN",
        "flyover",
        vec![
            SimilarProject::completed("Hyderabad PVNR Expressway", 11.6, 42.0, 2020),
            SimilarProject::completed("Chennai Port-Maduravoyal Elevated", 19.0, 54.0, 2021),
        ],
    );
    tables.insert_similar_projects(
        "IN",
        "road_widening",
        vec![
            SimilarProject::completed("NH-44 Hyderabad-Bangalore", 85.0, 36.0, 2022),
            SimilarProject::completed("Mumbai-Pune Expressway Widening", 15.0, 24.0, 2023),
        ],
    );
    tables.insert_similar_projects(
        "BR",
        "road_widening",
        vec![SimilarProject::completed(
            "Marginal Pinheiros Widening",
            12.0,
            30.0,
            2021,
        )],
    );

    for country in ["AE", "SA", "CN"] {
        tables.add_priority_country(country);
    }

    tables
}
