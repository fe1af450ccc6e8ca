//! SVG progress chart rendering (enabled with the `charts` feature)
//!
//! Draws the per-session estimated one-rep max series as a scatter plot
//! with the fitted trend line extended one session forward, mirroring the
//! numbers the suggestion engine works from.

use anyhow::{bail, Result};
use plotters::prelude::*;
use std::path::Path;
use tracing::warn;

use crate::models::{ExerciseLog, RegressionConfig};
use crate::onerm::OneRmCalculator;
use crate::trend::{chronological, TrendCalculator};

/// Chart rendering options
#[derive(Debug, Clone)]
pub struct ChartOptions {
    /// Output width in pixels
    pub width: u32,

    /// Output height in pixels
    pub height: u32,

    /// Trailing sessions to display; 0 shows all. Display-only, the
    /// regression applies its own window on top.
    pub view_window: usize,

    /// Chart caption, usually the exercise name
    pub caption: String,
}

impl Default for ChartOptions {
    fn default() -> Self {
        ChartOptions {
            width: 800,
            height: 600,
            view_window: 0,
            caption: "Progress".to_string(),
        }
    }
}

/// Render the estimated one-rep max history of an exercise to an SVG file.
///
/// Sets the strength formula cannot evaluate are skipped with a warning.
/// When no trend can be fitted the scatter is drawn alone.
pub fn render_progress_chart(
    logs: &[ExerciseLog],
    regression: RegressionConfig,
    options: &ChartOptions,
    path: &Path,
) -> Result<()> {
    let kept = chronological(logs, options.view_window);

    let mut series: Vec<(f64, f64)> = Vec::with_capacity(kept.len());
    for (i, log) in kept.iter().enumerate() {
        match OneRmCalculator::estimate(log.weight, log.reps) {
            Ok(one_rm) => series.push((i as f64, one_rm)),
            Err(err) => warn!(log_id = log.id, "skipping set on chart: {}", err),
        }
    }
    if series.is_empty() {
        bail!("no plottable sets for {}", options.caption);
    }

    // Trend over the displayed sessions; its ordinals may cover only the
    // trailing part when the regression window is narrower than the view
    let trend = TrendCalculator::with_config(regression).fit(&kept).ok();
    let trend_points = trend.map(|fit| {
        let offset = (kept.len() - fit.sessions) as f64;
        let x_project = fit.sessions as f64;
        vec![
            (offset, fit.line.value_at(0.0)),
            (offset + x_project, fit.line.value_at(x_project)),
        ]
    });

    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for (_, y) in series
        .iter()
        .chain(trend_points.iter().flatten())
    {
        y_min = y_min.min(*y);
        y_max = y_max.max(*y);
    }
    let y_pad = ((y_max - y_min) * 0.1).max(1.0);
    let x_max = kept.len() as f64;

    let root = SVGBackend::new(path, (options.width, options.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&options.caption, ("sans-serif", 24))
        .margin(20)
        .set_label_area_size(LabelAreaPosition::Left, 50)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .build_cartesian_2d(-0.5..(x_max + 0.5), (y_min - y_pad)..(y_max + y_pad))?;

    chart
        .configure_mesh()
        .x_desc("session")
        .y_desc("estimated 1RM")
        .x_label_formatter(&|v| format!("{:.0}", v))
        .y_label_formatter(&|v| format!("{:.1}", v))
        .draw()?;

    chart
        .draw_series(
            series
                .iter()
                .map(|(x, y)| Circle::new((*x, *y), 4, BLUE.filled())),
        )?
        .label("estimated 1RM")
        .legend(|(x, y)| Circle::new((x + 10, y), 4, BLUE.filled()));

    if let Some(points) = trend_points {
        chart
            .draw_series(LineSeries::new(points, &RED))?
            .label("trend")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));
    }

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()?;

    root.present()?;
    Ok(())
}
