use std::collections::BTreeMap;

use plotters::prelude::*;
use thiserror::Error;

use crate::services::percentiles;

#[derive(Error, Debug)]
pub enum HistogramError {
    #[error("failed to render histogram: {0}")]
    Render(String),
}

/// Percentile markers drawn over the bars.
const MARKERS: [(f64, &str); 3] = [(10.0, "P10"), (50.0, "P50"), (90.0, "P90")];

/// A histogram bin over `[start, start + width)` months.
#[derive(Debug, Clone, Copy, PartialEq)]
struct MonthBin {
    start: f64,
    width: f64,
    trials: usize,
}

/// Writes the distribution of simulated totals (sorted, in months) as PNG,
/// with the best-case, most-likely and worst-case percentiles marked.
pub fn write_histogram_png(output_path: &str, sorted_totals: &[f64]) -> Result<(), HistogramError> {
    let bins = month_bins(sorted_totals);
    let (Some(first), Some(last)) = (bins.first(), bins.last()) else {
        return Ok(());
    };
    let x_range = first.start..(last.start + last.width);
    let max_trials = bins.iter().map(|bin| bin.trials).max().unwrap_or(1);
    let render = |e: &dyn std::fmt::Display| HistogramError::Render(e.to_string());

    let root = BitMapBackend::new(output_path, (900, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| render(&e))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(
            format!("Project timeline ({} trials)", sorted_totals.len()),
            ("sans-serif", 28),
        )
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, 0..(max_trials + 1))
        .map_err(|e| render(&e))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Total duration (months)")
        .y_desc("Trials")
        .x_label_formatter(&|months| format!("{months:.0}"))
        .draw()
        .map_err(|e| render(&e))?;

    let bar_style = ShapeStyle::from(&RGBColor(46, 110, 160)).filled();
    chart
        .draw_series(bins.iter().map(|bin| {
            Rectangle::new(
                [(bin.start, 0), (bin.start + bin.width, bin.trials)],
                bar_style,
            )
        }))
        .map_err(|e| render(&e))?;

    for (percentile, label) in MARKERS {
        let Some(months) = percentiles::value_sorted(sorted_totals, percentile) else {
            continue;
        };
        chart
            .draw_series(LineSeries::new(
                [(months, 0), (months, max_trials)],
                RED.stroke_width(2),
            ))
            .map_err(|e| render(&e))?
            .label(format!("{label}: {months:.1} months"))
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &RED));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(|e| render(&e))?;

    root.present().map_err(|e| render(&e))?;
    Ok(())
}

/// Square-root rule; a single distinct value gets a one-month bin.
fn bin_width(totals: &[f64]) -> f64 {
    let min_value = totals.iter().cloned().fold(f64::INFINITY, f64::min);
    let max_value = totals.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let range = max_value - min_value;
    if !range.is_finite() || range < f64::EPSILON {
        return 1.0;
    }
    range / (totals.len() as f64).sqrt()
}

fn month_bins(totals: &[f64]) -> Vec<MonthBin> {
    let width = bin_width(totals);
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for total in totals.iter().filter(|total| total.is_finite()) {
        *counts.entry((total / width).floor() as i64).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(index, trials)| MonthBin {
            start: index as f64 * width,
            width,
            trials,
        })
        .collect()
}
