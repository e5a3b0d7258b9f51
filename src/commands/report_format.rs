use crate::services::simulation_types::{PhaseScheduleEntry, TimelineReport};

pub fn format_timeline_report(report: &TimelineReport) -> String {
    let months = &report.timeline_months;
    let dates = &report.completion_dates;

    let mut lines = Vec::new();
    lines.push("Timeline Report".to_string());
    lines.push(format!(
        "Project: {} ({} km, {}, {} complexity)",
        report.project_type,
        report.length_km,
        report.country_code,
        report.complexity.as_str()
    ));
    lines.push(format!("Start date: {}", report.start_date));
    lines.push(format!("Trials: {}", report.trial_count));
    lines.push(format!(
        "Confidence: {} ({})",
        report.confidence_level.level.as_str(),
        report.confidence_level.score
    ));
    lines.push(String::new());
    lines.push("Estimate | Months | Date".to_string());
    lines.push("---------|--------|-----".to_string());
    lines.push(format!("Best case | {:.1} | {}", months.best_case, dates.best_case));
    lines.push(format!("Estimated | {:.1} | {}", months.estimated, dates.estimated));
    lines.push(format!("Most likely | {:.1} | -", months.most_likely));
    lines.push(format!("Worst case | {:.1} | {}", months.worst_case, dates.worst_case));
    lines.push(format!("Standard deviation: {:.1} months", months.standard_deviation));
    lines.push(String::new());
    lines.push("Phases:".to_string());
    lines.extend(report.phases.iter().map(format_phase_row));
    lines.push(String::new());
    lines.push(format!(
        "Critical path: {} ({:.1} months)",
        report.critical_path.phases.join(" -> "),
        report.critical_path.total_duration_months
    ));
    lines.push(format!("Bottleneck: {}", report.critical_path.bottleneck_phase));

    lines.join("\n")
}

fn format_phase_row(entry: &PhaseScheduleEntry) -> String {
    let marker = if entry.is_critical { " *" } else { "" };
    format!(
        "{name}{marker} | {months:.1} | {start} - {end}",
        name = entry.name,
        months = entry.duration_months,
        start = entry.start_date,
        end = entry.end_date
    )
}
