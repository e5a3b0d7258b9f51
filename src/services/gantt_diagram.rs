use crate::services::simulation_types::{
    GanttChartData, GanttMilestone, GanttTask, PhaseScheduleEntry, TimelineReport,
};

/// Converts the phase schedule into chart-ready tasks with 1-based ids.
pub fn build_gantt_chart_data(schedule: &[PhaseScheduleEntry]) -> GanttChartData {
    let tasks = schedule
        .iter()
        .enumerate()
        .map(|(idx, entry)| GanttTask {
            id: idx + 1,
            name: entry.name.clone(),
            start: entry.start_date,
            end: entry.end_date,
            duration: entry.duration_months,
            critical: entry.is_critical,
            progress: 0,
            dependencies: entry
                .dependencies
                .iter()
                .filter_map(|dependency| {
                    schedule
                        .iter()
                        .position(|candidate| candidate.phase == *dependency)
                        .map(|position| position + 1)
                })
                .collect(),
        })
        .collect();

    let milestones = schedule
        .iter()
        .flat_map(|entry| {
            entry.milestones.iter().map(|milestone| GanttMilestone {
                name: milestone.clone(),
                phase: entry.name.clone(),
            })
        })
        .collect();

    GanttChartData { tasks, milestones }
}

/// Renders the deterministic schedule as a Mermaid gantt chart.
pub fn generate_gantt_diagram(report: &TimelineReport) -> String {
    let mut lines = Vec::new();
    lines.push("".to_string());
    lines.push(format!(
        "# {} ({} km, {}) Timeline",
        report.project_type, report.length_km, report.country_code
    ));
    lines.push("```mermaid".to_string());
    lines.push("gantt".to_string());
    lines.push("    dateFormat  DD-MM-YYYY".to_string());

    for entry in &report.phases {
        let tag = if entry.is_critical {
            format!("crit, {}", entry.phase)
        } else {
            entry.phase.to_string()
        };
        lines.push(format!(
            "    {name} :{tag}, {}, {}",
            entry.start_date.format("%d-%m-%Y"),
            entry.end_date.format("%d-%m-%Y"),
            name = entry.name,
        ));
    }
    lines.push("```".to_string());
    lines.push(String::new());
    lines.push(format!(
        "Estimated completion: {} (best case {}, worst case {})",
        report.completion_dates.estimated,
        report.completion_dates.best_case,
        report.completion_dates.worst_case
    ));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::phase::Phase;
    use crate::test_support::on_date;

    fn entry(phase: Phase, start: u32, end: u32, dependencies: Vec<Phase>) -> PhaseScheduleEntry {
        PhaseScheduleEntry {
            phase,
            name: phase.title().to_string(),
            duration_months: 1.0,
            start_date: on_date(2026, 1, start),
            end_date: on_date(2026, 1, end),
            is_critical: phase.is_critical(),
            dependencies,
            resources: vec![],
            milestones: phase.milestones().iter().map(|m| m.to_string()).collect(),
        }
    }

    #[test]
    fn gantt_tasks_reference_dependencies_by_id() {
        let schedule = vec![
            entry(Phase::Planning, 1, 5, vec![]),
            entry(Phase::Design, 5, 10, vec![Phase::Planning]),
            entry(Phase::Approvals, 10, 20, vec![Phase::Design]),
        ];
        let data = build_gantt_chart_data(&schedule);

        let ids: Vec<usize> = data.tasks.iter().map(|task| task.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(data.tasks[0].dependencies.is_empty());
        assert_eq!(data.tasks[1].dependencies, vec![1]);
        assert_eq!(data.tasks[2].dependencies, vec![2]);
        assert!(data.tasks[2].critical);
        assert!(data.tasks.iter().all(|task| task.progress == 0));
    }

    #[test]
    fn gantt_milestones_are_flattened_with_phase_names() {
        let schedule = vec![
            entry(Phase::Planning, 1, 5, vec![]),
            entry(Phase::Commissioning, 5, 10, vec![]),
        ];
        let data = build_gantt_chart_data(&schedule);

        let expected = Phase::Planning.milestones().len() + Phase::Commissioning.milestones().len();
        assert_eq!(data.milestones.len(), expected);
        assert_eq!(data.milestones[0].phase, "Planning");
        assert_eq!(data.milestones.last().map(|m| m.phase.as_str()), Some("Commissioning"));
    }

    #[test]
    fn dependencies_missing_from_schedule_are_skipped() {
        let schedule = vec![entry(Phase::Design, 1, 5, vec![Phase::Planning])];
        let data = build_gantt_chart_data(&schedule);
        assert!(data.tasks[0].dependencies.is_empty());
    }
}
