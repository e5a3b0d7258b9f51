use std::collections::HashMap;
use std::sync::OnceLock;

use chrono::{NaiveDate, TimeDelta};
use petgraph::Direction;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::domain::phase::{MOBILIZATION_MONTHS, Phase, SCHEDULE_ORDER};
use crate::domain::tables::TimelineTables;
use crate::services::simulation_types::{CriticalPath, PhaseScheduleEntry};

/// Calendar days per month used for every date computation.
pub const DAYS_PER_MONTH: f64 = 30.0;

const CRITICAL_PATH_DESCRIPTION: &str = "Any delay in these phases will delay the entire project";

/// Dependency graph between phases, edges point from prerequisite to dependent.
pub struct PhaseGraph {
    graph: DiGraph<Phase, ()>,
    indices: HashMap<Phase, NodeIndex>,
}

impl PhaseGraph {
    pub fn new() -> Self {
        let mut graph: DiGraph<Phase, ()> = DiGraph::new();
        let mut indices = HashMap::new();
        for phase in SCHEDULE_ORDER {
            indices.insert(phase, graph.add_node(phase));
        }
        for phase in SCHEDULE_ORDER {
            for dependency in phase.dependencies() {
                if let (Some(from), Some(to)) = (indices.get(dependency), indices.get(&phase)) {
                    graph.add_edge(*from, *to, ());
                }
            }
        }
        Self { graph, indices }
    }

    /// Direct prerequisites of `phase`, in schedule order.
    pub fn dependencies(&self, phase: Phase) -> Vec<Phase> {
        let Some(index) = self.indices.get(&phase) else {
            return Vec::new();
        };
        let mut dependencies: Vec<Phase> = self
            .graph
            .neighbors_directed(*index, Direction::Incoming)
            .map(|neighbor| self.graph[neighbor])
            .collect();
        dependencies.sort_by_key(|dependency| schedule_position(*dependency));
        dependencies
    }

    /// True when the graph is acyclic and `order` never places a phase
    /// before one of its prerequisites.
    pub fn is_valid_order(&self, order: &[Phase]) -> bool {
        if toposort(&self.graph, None).is_err() {
            return false;
        }
        let position: HashMap<Phase, usize> = order
            .iter()
            .enumerate()
            .map(|(idx, phase)| (*phase, idx))
            .collect();
        self.graph.edge_indices().all(|edge| {
            let Some((from, to)) = self.graph.edge_endpoints(edge) else {
                return false;
            };
            match (position.get(&self.graph[from]), position.get(&self.graph[to])) {
                (Some(from), Some(to)) => from < to,
                _ => true,
            }
        })
    }
}

static PHASE_GRAPH: OnceLock<Option<PhaseGraph>> = OnceLock::new();

/// The phase graph, built and checked against [`SCHEDULE_ORDER`] on first use.
///
/// `None` when the static phase dependencies form a cycle or the schedule
/// order places a phase before one of its prerequisites.
pub fn phase_graph() -> Option<&'static PhaseGraph> {
    PHASE_GRAPH
        .get_or_init(|| {
            let graph = PhaseGraph::new();
            if graph.is_valid_order(&SCHEDULE_ORDER) {
                Some(graph)
            } else {
                tracing::error!("schedule order violates phase dependencies");
                None
            }
        })
        .as_ref()
}

impl Default for PhaseGraph {
    fn default() -> Self {
        Self::new()
    }
}

fn schedule_position(phase: Phase) -> usize {
    SCHEDULE_ORDER
        .iter()
        .position(|candidate| *candidate == phase)
        .unwrap_or(SCHEDULE_ORDER.len())
}

/// Best-estimate duration of a phase, without sampling.
pub fn expected_phase_months(
    tables: &TimelineTables,
    phase: Phase,
    country_code: &str,
    base_construction_months: f64,
) -> f64 {
    match phase {
        Phase::Construction => base_construction_months,
        Phase::Mobilization => MOBILIZATION_MONTHS,
        _ => tables.phase_bounds(phase, country_code).midpoint(),
    }
}

/// Lays out phases back to back starting at `start_date`.
pub fn build_phase_schedule(
    tables: &TimelineTables,
    graph: &PhaseGraph,
    country_code: &str,
    base_construction_months: f64,
    start_date: NaiveDate,
) -> Vec<PhaseScheduleEntry> {
    let mut schedule = Vec::with_capacity(SCHEDULE_ORDER.len());
    let mut current = start_date;

    for phase in SCHEDULE_ORDER {
        let duration = expected_phase_months(tables, phase, country_code, base_construction_months);
        let end_date = add_days(current, (duration * DAYS_PER_MONTH).round());

        schedule.push(PhaseScheduleEntry {
            phase,
            name: phase.title().to_string(),
            duration_months: duration,
            start_date: current,
            end_date,
            is_critical: phase.is_critical(),
            dependencies: graph.dependencies(phase),
            resources: phase.resources().iter().map(|r| r.to_string()).collect(),
            milestones: phase.milestones().iter().map(|m| m.to_string()).collect(),
        });
        current = end_date;
    }

    schedule
}

pub fn identify_critical_path(schedule: &[PhaseScheduleEntry]) -> CriticalPath {
    let critical: Vec<&PhaseScheduleEntry> =
        schedule.iter().filter(|entry| entry.is_critical).collect();
    let total: f64 = critical.iter().map(|entry| entry.duration_months).sum();

    // First entry wins on ties.
    let mut bottleneck: Option<&PhaseScheduleEntry> = None;
    for entry in critical.iter().copied() {
        if bottleneck.is_none_or(|current| entry.duration_months > current.duration_months) {
            bottleneck = Some(entry);
        }
    }

    CriticalPath {
        phases: critical.iter().map(|entry| entry.name.clone()).collect(),
        total_duration_months: total,
        bottleneck_phase: bottleneck.map(|entry| entry.name.clone()).unwrap_or_default(),
        float_available: false,
        description: CRITICAL_PATH_DESCRIPTION.to_string(),
    }
}

/// Adds a whole number of days, saturating at the last representable date.
pub fn add_days(date: NaiveDate, days: f64) -> NaiveDate {
    let days = days.max(0.0) as i64;
    TimeDelta::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::on_date;

    fn schedule_for(country: &str, base: f64) -> Vec<PhaseScheduleEntry> {
        build_phase_schedule(
            &TimelineTables::default(),
            &PhaseGraph::new(),
            country,
            base,
            on_date(2026, 1, 1),
        )
    }

    #[test]
    fn fixed_schedule_order_respects_dependencies() {
        let graph = PhaseGraph::new();
        assert!(graph.is_valid_order(&SCHEDULE_ORDER));

        let mut swapped = SCHEDULE_ORDER;
        swapped.swap(5, 6); // construction before mobilization
        assert!(!graph.is_valid_order(&swapped));
    }

    #[test]
    fn shared_graph_is_validated_once_and_reused() {
        let first = phase_graph().unwrap();
        let second = phase_graph().unwrap();
        assert!(std::ptr::eq(first, second));
        assert!(first.is_valid_order(&SCHEDULE_ORDER));
    }

    #[test]
    fn graph_dependencies_match_phase_table() {
        let graph = PhaseGraph::new();
        assert_eq!(
            graph.dependencies(Phase::Mobilization),
            vec![Phase::LandAcquisition, Phase::Tendering]
        );
        assert_eq!(
            graph.dependencies(Phase::Tendering),
            vec![Phase::Design, Phase::Approvals]
        );
        assert!(graph.dependencies(Phase::Planning).is_empty());
    }

    #[test]
    fn schedule_entries_chain_start_to_end() {
        let schedule = schedule_for("IN", 12.0);
        assert_eq!(schedule.len(), SCHEDULE_ORDER.len());
        assert_eq!(schedule[0].start_date, on_date(2026, 1, 1));
        for pair in schedule.windows(2) {
            assert_eq!(pair[1].start_date, pair[0].end_date);
        }
    }

    #[test]
    fn schedule_uses_midpoints_and_fixed_mobilization() {
        let schedule = schedule_for("DE", 4.2);
        let durations: Vec<f64> = schedule.iter().map(|e| e.duration_months).collect();
        assert_eq!(durations, vec![6.0, 5.5, 7.0, 5.0, 3.5, 1.5, 4.2, 2.0]);

        // 5.5 months => 165 days
        let design = &schedule[1];
        assert_eq!(design.end_date - design.start_date, TimeDelta::days(165));
        // 4.2 months => 126 days
        let construction = &schedule[6];
        assert_eq!(
            construction.end_date - construction.start_date,
            TimeDelta::days(126)
        );
    }

    #[test]
    fn critical_path_is_approvals_land_and_construction() {
        let schedule = schedule_for("IN", 4.0);
        let path = identify_critical_path(&schedule);
        assert_eq!(
            path.phases,
            vec!["Approvals", "Land Acquisition", "Construction"]
        );
        // IN: approvals 12, land 15, construction 4
        assert!((path.total_duration_months - 31.0).abs() < 1e-9);
        assert_eq!(path.bottleneck_phase, "Land Acquisition");
        assert!(!path.float_available);
    }

    #[test]
    fn long_construction_becomes_bottleneck() {
        let schedule = schedule_for("DE", 60.0);
        let path = identify_critical_path(&schedule);
        assert_eq!(path.bottleneck_phase, "Construction");
    }

    #[test]
    fn add_days_saturates_instead_of_overflowing() {
        assert_eq!(add_days(on_date(2026, 1, 1), 1e18), NaiveDate::MAX);
        assert_eq!(add_days(on_date(2026, 1, 1), 31.0), on_date(2026, 2, 1));
    }
}
