use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::domain::phase::{PRE_CONSTRUCTION_PHASES, Phase};
use crate::domain::risk::PhaseRisk;
use crate::domain::tables::{ConstructionRate, PhaseBounds, TimelineTables};

#[derive(Error, Debug)]
pub enum TimelineTablesYamlError {
    #[error("failed to read tables yaml file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: io::Error,
    },
    #[error("failed to parse tables yaml file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("unknown phase in {path}: {value} (expected one of planning, design, approvals, land_acquisition, tendering, commissioning)")]
    UnknownPhase { path: PathBuf, value: String },
    #[error(
        "invalid duration range in {path} for {phase}/{country}: [{min_months}, {max_months}] (expected 0 < min <= max)"
    )]
    InvalidBounds {
        path: PathBuf,
        phase: Phase,
        country: String,
        min_months: f64,
        max_months: f64,
    },
    #[error("invalid construction rate in {path} for {project_type}: months must be positive")]
    InvalidRate { path: PathBuf, project_type: String },
    #[error("invalid construction rate in {path} for {project_type}: parallel_sections must be at least 1")]
    InvalidParallelSections { path: PathBuf, project_type: String },
    #[error("invalid efficiency factor in {path} for {country}: {value} (expected 0 < factor <= 1)")]
    InvalidEfficiency {
        path: PathBuf,
        country: String,
        value: f64,
    },
    #[error(
        "invalid risk in {path} for {country}: {name} (probability must be in [0, 1] and impact positive)"
    )]
    InvalidRisk {
        path: PathBuf,
        country: String,
        name: String,
    },
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TablesRecord {
    default_country: Option<String>,
    #[serde(default)]
    phase_durations: BTreeMap<String, BTreeMap<String, [f64; 2]>>,
    #[serde(default)]
    construction_rates: BTreeMap<String, ConstructionRateRecord>,
    #[serde(default)]
    efficiency_factors: BTreeMap<String, f64>,
    #[serde(default)]
    country_risks: BTreeMap<String, Vec<PhaseRisk>>,
    #[serde(default)]
    confidence_scores: BTreeMap<String, i32>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ConstructionRateRecord {
    PerKm(PerKmRateRecord),
    Fixed(FixedRateRecord),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PerKmRateRecord {
    months_per_km: f64,
    #[serde(default = "default_parallel_sections")]
    parallel_sections: u32,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FixedRateRecord {
    months_total: f64,
}

fn default_parallel_sections() -> u32 {
    1
}

/// Loads a table-override file and applies it on top of the built-in
/// reference tables.
///
/// Every section is optional. Entries replace the built-in entry with the
/// same key and add new keys otherwise.
///
/// # Errors
/// - Returns an error on I/O or parse failures.
/// - Returns an error when a phase key is not a pre-construction phase or
///   `commissioning`.
/// - Returns an error when a duration range, rate, efficiency factor or risk
///   is out of range.
pub fn load_timeline_tables_from_yaml_file<P: AsRef<Path>>(
    path: P,
) -> Result<TimelineTables, TimelineTablesYamlError> {
    let path = path.as_ref();
    let contents =
        std::fs::read_to_string(path).map_err(|source| TimelineTablesYamlError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
    let mut tables = TimelineTables::default();
    apply_overrides_from_yaml_str(&mut tables, &contents, path)?;
    Ok(tables)
}

pub fn apply_overrides_from_yaml_str(
    tables: &mut TimelineTables,
    input: &str,
    origin_path: &Path,
) -> Result<(), TimelineTablesYamlError> {
    // An empty document deserializes to unit, not to an empty mapping.
    let record: TablesRecord = if input.trim().is_empty() {
        TablesRecord::default()
    } else {
        serde_yaml::from_str(input).map_err(|source| TimelineTablesYamlError::Parse {
            path: origin_path.to_path_buf(),
            source,
        })?
    };

    if let Some(country) = record.default_country {
        tables.set_default_country(&country);
    }

    for (phase_key, by_country) in record.phase_durations {
        let phase = parse_table_phase(&phase_key, origin_path)?;
        for (country, [min_months, max_months]) in by_country {
            let bounds = PhaseBounds::new(min_months, max_months).ok_or_else(|| {
                TimelineTablesYamlError::InvalidBounds {
                    path: origin_path.to_path_buf(),
                    phase,
                    country: country.clone(),
                    min_months,
                    max_months,
                }
            })?;
            tables.insert_phase_bounds(phase, &country, bounds);
        }
    }

    for (project_type, record) in record.construction_rates {
        let rate = construction_rate_from_record(&project_type, record, origin_path)?;
        tables.insert_construction_rate(&project_type, rate);
    }

    for (country, value) in record.efficiency_factors {
        if !(value > 0.0 && value <= 1.0) {
            return Err(TimelineTablesYamlError::InvalidEfficiency {
                path: origin_path.to_path_buf(),
                country,
                value,
            });
        }
        tables.insert_efficiency(&country, value);
    }

    for (country, risks) in record.country_risks {
        if let Some(risk) = risks.iter().find(|risk| !is_valid_risk(risk)) {
            return Err(TimelineTablesYamlError::InvalidRisk {
                path: origin_path.to_path_buf(),
                country,
                name: risk.name.clone(),
            });
        }
        tables.insert_risks(&country, risks);
    }

    for (country, score) in record.confidence_scores {
        tables.insert_confidence_score(&country, score);
    }

    Ok(())
}

fn parse_table_phase(value: &str, origin_path: &Path) -> Result<Phase, TimelineTablesYamlError> {
    Phase::from_key(value)
        .filter(|phase| PRE_CONSTRUCTION_PHASES.contains(phase) || *phase == Phase::Commissioning)
        .ok_or_else(|| TimelineTablesYamlError::UnknownPhase {
            path: origin_path.to_path_buf(),
            value: value.to_string(),
        })
}

fn construction_rate_from_record(
    project_type: &str,
    record: ConstructionRateRecord,
    origin_path: &Path,
) -> Result<ConstructionRate, TimelineTablesYamlError> {
    let invalid_rate = || TimelineTablesYamlError::InvalidRate {
        path: origin_path.to_path_buf(),
        project_type: project_type.to_string(),
    };
    match record {
        ConstructionRateRecord::PerKm(PerKmRateRecord {
            months_per_km,
            parallel_sections,
        }) => {
            if parallel_sections == 0 {
                return Err(TimelineTablesYamlError::InvalidParallelSections {
                    path: origin_path.to_path_buf(),
                    project_type: project_type.to_string(),
                });
            }
            if !(months_per_km > 0.0 && months_per_km.is_finite()) {
                return Err(invalid_rate());
            }
            Ok(ConstructionRate::PerKm {
                months_per_km,
                parallel_sections,
            })
        }
        ConstructionRateRecord::Fixed(FixedRateRecord { months_total }) => {
            if !(months_total > 0.0 && months_total.is_finite()) {
                return Err(invalid_rate());
            }
            Ok(ConstructionRate::Fixed { months_total })
        }
    }
}

fn is_valid_risk(risk: &PhaseRisk) -> bool {
    (0.0..=1.0).contains(&risk.probability)
        && risk.impact_months > 0.0
        && risk.impact_months.is_finite()
}

#[cfg(test)]
mod tests {
    use super::*;

    use assert_fs::prelude::*;

    use crate::services::timeline_prediction::predict_with_sampler;
    use crate::test_support::{MockSampler, build_project};

    fn load(contents: &str) -> Result<TimelineTables, TimelineTablesYamlError> {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("tables.yaml");
        file.write_str(contents).unwrap();
        load_timeline_tables_from_yaml_file(file.path())
    }

    #[test]
    fn returns_error_when_file_does_not_exist() {
        let temp = assert_fs::TempDir::new().unwrap();
        let missing = temp.path().join("tables.yaml");

        let err = load_timeline_tables_from_yaml_file(&missing).unwrap_err();
        assert!(matches!(err, TimelineTablesYamlError::ReadFile { path, .. } if path == missing));
    }

    #[test]
    fn empty_file_keeps_reference_tables() {
        let tables = load("").unwrap();
        let reference = TimelineTables::default();

        assert_eq!(tables.default_country(), reference.default_country());
        assert_eq!(
            tables.phase_bounds(Phase::Approvals, "IN"),
            reference.phase_bounds(Phase::Approvals, "IN")
        );
        assert_eq!(tables.efficiency("DE"), reference.efficiency("DE"));
    }

    #[test]
    fn returns_error_on_invalid_yaml_syntax() {
        let err = load("phase_durations: [planning\n").unwrap_err();
        assert!(matches!(err, TimelineTablesYamlError::Parse { .. }));
    }

    #[test]
    fn returns_error_on_unknown_section() {
        let err = load("phase_duration: {}\n").unwrap_err();
        assert!(matches!(err, TimelineTablesYamlError::Parse { .. }));
    }

    #[test]
    fn overrides_replace_and_extend_entries() {
        let tables = load(
            "default_country: US\n\
             phase_durations:\n  approvals:\n    IN: [4, 10]\n    KE: [6, 14]\n\
             construction_rates:\n  bridge:\n    months_per_km: 9\n    parallel_sections: 3\n  \
             station:\n    months_total: 20\n\
             efficiency_factors:\n  KE: 0.5\n\
             country_risks:\n  KE:\n    - name: Rainy season\n      probability: 0.6\n      \
             impact_months: 2\n      mitigation: Plan earthworks for dry months\n\
             confidence_scores:\n  KE: 55\n",
        )
        .unwrap();

        assert_eq!(tables.default_country(), "US");
        assert_eq!(
            tables.phase_bounds(Phase::Approvals, "IN"),
            PhaseBounds::new(4.0, 10.0).unwrap()
        );
        assert_eq!(
            tables.phase_bounds(Phase::Approvals, "KE"),
            PhaseBounds::new(6.0, 14.0).unwrap()
        );
        assert_eq!(tables.construction_rate("bridge").base_months(3.0), 9.0);
        assert_eq!(tables.construction_rate("station").base_months(50.0), 20.0);
        assert_eq!(tables.efficiency("KE"), 0.5);
        assert_eq!(tables.risks("KE").len(), 1);
        assert_eq!(tables.risks("KE")[0].name, "Rainy season");
        assert_eq!(tables.confidence_score("KE"), 55);

        // untouched entries survive
        let reference = TimelineTables::default();
        assert_eq!(
            tables.phase_bounds(Phase::Design, "IN"),
            reference.phase_bounds(Phase::Design, "IN")
        );
        assert_eq!(tables.risks("IN"), reference.risks("IN"));
    }

    #[test]
    fn parallel_sections_default_to_one() {
        let tables = load("construction_rates:\n  bridge:\n    months_per_km: 4\n").unwrap();
        assert_eq!(tables.construction_rate("bridge").base_months(2.0), 8.0);
    }

    #[test]
    fn rejects_rates_mixing_per_km_and_fixed_fields() {
        let err = load(
            "construction_rates:\n  bridge:\n    months_per_km: 2\n    months_total: 30\n",
        )
        .unwrap_err();
        assert!(matches!(err, TimelineTablesYamlError::Parse { .. }));
    }

    #[test]
    fn overridden_default_country_drives_fallback_in_prediction() {
        let tables = load("default_country: DE\n").unwrap();
        let reference = TimelineTables::default();
        let output = predict_with_sampler(
            &build_project("road_widening", 4.0, "ZZ"),
            10,
            &tables,
            &mut MockSampler,
        )
        .unwrap();

        for entry in &output.report.phases {
            if PRE_CONSTRUCTION_PHASES.contains(&entry.phase) || entry.phase == Phase::Commissioning {
                let de = reference.phase_bounds(entry.phase, "DE").midpoint();
                assert_eq!(entry.duration_months, de, "{}", entry.phase);
            }
        }
        let in_approvals = reference.phase_bounds(Phase::Approvals, "IN").midpoint();
        let zz_approvals = tables.phase_bounds(Phase::Approvals, "ZZ").midpoint();
        assert_ne!(zz_approvals, in_approvals);
    }

    #[test]
    fn rejects_phases_without_duration_tables() {
        for phase in ["construction", "mobilization", "excavation"] {
            let err = load(&format!("phase_durations:\n  {phase}:\n    IN: [1, 2]\n")).unwrap_err();
            assert!(
                matches!(&err, TimelineTablesYamlError::UnknownPhase { value, .. } if value == phase),
                "{phase}: {err}"
            );
        }
    }

    #[test]
    fn rejects_inverted_or_non_positive_bounds() {
        for range in ["[8, 4]", "[0, 4]", "[-1, 2]"] {
            let err = load(&format!("phase_durations:\n  design:\n    IN: {range}\n")).unwrap_err();
            assert!(
                matches!(err, TimelineTablesYamlError::InvalidBounds { phase: Phase::Design, .. }),
                "{range}"
            );
        }
    }

    #[test]
    fn rejects_invalid_construction_rates() {
        let err = load("construction_rates:\n  bridge:\n    months_per_km: 2\n    parallel_sections: 0\n")
            .unwrap_err();
        assert!(matches!(err, TimelineTablesYamlError::InvalidParallelSections { .. }));

        let err = load("construction_rates:\n  station:\n    months_total: 0\n").unwrap_err();
        assert!(matches!(err, TimelineTablesYamlError::InvalidRate { .. }));
    }

    #[test]
    fn rejects_out_of_range_efficiency() {
        for value in ["0", "1.5", "-0.2"] {
            let err = load(&format!("efficiency_factors:\n  KE: {value}\n")).unwrap_err();
            assert!(matches!(err, TimelineTablesYamlError::InvalidEfficiency { .. }), "{value}");
        }
        assert_eq!(load("efficiency_factors:\n  KE: 1.0\n").unwrap().efficiency("KE"), 1.0);
    }

    #[test]
    fn rejects_invalid_risks() {
        let err = load(
            "country_risks:\n  KE:\n    - name: Floods\n      probability: 1.2\n      \
             impact_months: 2\n      mitigation: Drainage\n",
        )
        .unwrap_err();
        assert!(matches!(err, TimelineTablesYamlError::InvalidRisk { name, .. } if name == "Floods"));

        let err = load(
            "country_risks:\n  KE:\n    - name: Strikes\n      probability: 0.2\n      \
             impact_months: 0\n      mitigation: Negotiate\n",
        )
        .unwrap_err();
        assert!(matches!(err, TimelineTablesYamlError::InvalidRisk { .. }));
    }
}
