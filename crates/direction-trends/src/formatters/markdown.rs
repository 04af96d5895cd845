//! Markdown output formatting.

use crate::aggregate::{LoadOutcome, RankedEntry};
use crate::dashboard::{HeatmapView, RankingView, RefreshReport};
use crate::error::DataUnavailable;
use crate::models::{Direction, Series, lookup};

/// Format the tracked directions as Markdown.
#[must_use]
pub fn format_directions_markdown(directions: &[Direction]) -> String {
    if directions.is_empty() {
        return "No directions configured.".to_string();
    }

    let mut output = format!("# Research Directions ({})\n\n", directions.len());
    output.push_str("| # | Direction | Slug |\n|---|---|---|\n");

    for (i, direction) in directions.iter().enumerate() {
        let name = lookup(direction.as_str())
            .map_or_else(|| direction.display_name(), |info| info.name.to_string());
        output.push_str(&format!("| {} | {} | `{}` |\n", i + 1, name, direction));
    }

    output
}

/// Format one direction's series as Markdown.
#[must_use]
pub fn format_series_markdown(direction: &Direction, series: &Series) -> String {
    let mut output = format!("# Trend: {}\n\n", direction.display_name());

    if series.is_empty() {
        output.push_str("No years in the requested range.\n");
        return output;
    }

    let mut meta = vec![format!("**Total**: {}", series.total())];
    if let Some(peak) = series.peak().filter(|p| p.count > 0) {
        meta.push(format!("**Peak**: {} ({})", peak.year, peak.count));
    }
    if let Some(last) = series.last_active_year() {
        meta.push(format!("**Last active**: {last}"));
    }
    output.push_str(&format!("{}\n\n", meta.join(" | ")));

    output.push_str("| Year | Count |\n|---|---|\n");
    for point in series {
        output.push_str(&format!("| {} | {} |\n", point.year, point.count));
    }

    output
}

/// Format every loaded series as a summary table.
#[must_use]
pub fn format_trends_markdown(directions: &[Direction], outcome: &LoadOutcome) -> String {
    let mut output = format!(
        "# All Trends ({} of {} directions)\n\n",
        outcome.series.len(),
        directions.len()
    );

    if !outcome.series.is_empty() {
        output.push_str("| Direction | Total | Peak | Last active |\n|---|---|---|---|\n");
        for direction in directions {
            let Some(series) = outcome.series.get(direction.as_str()) else {
                continue;
            };
            let peak = series
                .peak()
                .filter(|p| p.count > 0)
                .map_or_else(|| "-".to_string(), |p| format!("{} ({})", p.year, p.count));
            let last = series.last_active_year().map_or_else(|| "-".to_string(), |y| y.to_string());
            output.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                direction.display_name(),
                series.total(),
                peak,
                last
            ));
        }
        output.push('\n');
    }

    output.push_str(&format_failures_markdown(&outcome.failures));
    output
}

/// Format a year ranking as Markdown.
#[must_use]
pub fn format_ranking_markdown(view: &RankingView) -> String {
    let mut output = format!("# Top Directions in {}\n\n", view.year);

    if view.entries.is_empty() {
        output.push_str("No directions to rank.\n\n");
    } else {
        output.push_str(&format_ranked_entries(&view.entries));
        if view.precomputed {
            output.push_str("\n*Ranked by the data backend.*\n");
        }
        output.push('\n');
    }

    output.push_str(&format_failures_markdown(&view.failures));
    output
}

fn format_ranked_entries(entries: &[RankedEntry]) -> String {
    let mut output = String::from("| Rank | Direction | Publications |\n|---|---|---|\n");
    for (i, entry) in entries.iter().enumerate() {
        output.push_str(&format!(
            "| {} | {} | {} |\n",
            i + 1,
            entry.direction.display_name(),
            entry.count
        ));
    }
    output
}

/// Format heatmap data as a year × direction table of raw counts.
#[must_use]
pub fn format_heatmap_markdown(view: &HeatmapView) -> String {
    let matrix = &view.matrix;
    let mut output = format!(
        "# Direction Heatmap ({} years × {} directions)\n\n**Scale**: {}\n\n",
        matrix.years.len(),
        matrix.directions.len(),
        view.transform.label()
    );

    if matrix.is_empty() {
        output.push_str("No data in the requested range.\n\n");
        output.push_str(&format_failures_markdown(&view.failures));
        return output;
    }

    output.push_str("| Year |");
    for direction in &matrix.directions {
        output.push_str(&format!(" {direction} |"));
    }
    output.push_str("\n|---|");
    output.push_str(&"---|".repeat(matrix.directions.len()));
    output.push('\n');

    for (year, row) in matrix.years.iter().zip(&matrix.rows) {
        output.push_str(&format!("| {year} |"));
        for cell in row {
            output.push_str(&format!(" {} |", cell.raw));
        }
        output.push('\n');
    }
    output.push('\n');

    output.push_str(&format_failures_markdown(&view.failures));
    output
}

/// List directions that could not be loaded. Empty when there are none.
#[must_use]
pub fn format_failures_markdown(failures: &[DataUnavailable]) -> String {
    if failures.is_empty() {
        return String::new();
    }

    let mut output = format!("## Unavailable ({})\n\n", failures.len());
    for failure in failures {
        output.push_str(&format!("- **{}**: {}\n", failure.direction, failure.reason()));
    }
    output
}

/// Format a refresh report.
#[must_use]
pub fn format_refresh_markdown(report: &RefreshReport) -> String {
    format!(
        "# Data Refreshed\n\n**Status**: {} | **Cleared**: {} cached series | **Updated**: {}\n",
        report.status,
        report.cleared,
        report.updated_at.to_rfc3339()
    )
}
