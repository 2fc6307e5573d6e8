use std::fmt::Write;

use chrono::NaiveDate;

use crate::models::{Metric, MetricValues, PlayerSeries, PlotPoint, TeamSnapshot, TrailingWindow};

/// Rating shown rounded to the nearest integer; the stored value keeps
/// full precision. Null renders as `-`.
fn fmt_metric(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.0}", v),
        None => "-".to_string(),
    }
}

fn fmt_date(date: NaiveDate) -> String {
    date.format("%d %b %Y").to_string()
}

pub fn render_dates(dates: &[NaiveDate]) -> String {
    let mut output = String::new();
    if dates.is_empty() {
        let _ = writeln!(output, "No dated records in the source.");
        return output;
    }
    let _ = writeln!(output, "Selectable dates:");
    for date in dates {
        let _ = writeln!(output, "- {} ({})", date, fmt_date(*date));
    }
    output
}

pub fn render_players(players: &[String]) -> String {
    let mut output = String::new();
    if players.is_empty() {
        let _ = writeln!(output, "No players in the source.");
        return output;
    }
    let _ = writeln!(output, "Players:");
    for player in players {
        let _ = writeln!(output, "- {player}");
    }
    output
}

fn metric_header_row(first_column: &str, width: usize) -> String {
    let mut row = format!("{first_column:<width$}");
    for metric in Metric::ALL {
        row.push_str(&format!("  {:>13}", metric.name()));
    }
    row.push_str("  Other");
    row
}

fn metric_value_cells(metrics: &MetricValues) -> String {
    let mut cells = String::new();
    for metric in Metric::ALL {
        cells.push_str(&format!("  {:>13}", fmt_metric(metrics.get(metric))));
    }
    cells
}

pub fn render_snapshot(snapshot: &TeamSnapshot) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Team data - {}", fmt_date(snapshot.date));
    let _ = writeln!(output);

    let width = snapshot
        .rows
        .iter()
        .map(|row| row.player.len())
        .max()
        .unwrap_or(6)
        .max("Player".len());

    let _ = writeln!(output, "{}", metric_header_row("Player", width));
    for row in &snapshot.rows {
        if row.is_team_average() {
            let _ = writeln!(output);
        }
        let _ = writeln!(
            output,
            "{:<width$}{}  {}",
            row.player,
            metric_value_cells(&row.metrics),
            row.other
        );
    }

    if snapshot.rows.len() == 1 {
        let _ = writeln!(output);
        let _ = writeln!(output, "No player records for this date.");
    }
    output
}

/// Chart data as text: one row per date, jitter already applied to each
/// plotted value. Raw values stay untouched in the tables below it.
fn render_trend(player: &str, points: &[PlotPoint]) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Performance trend - {player}");
    let _ = writeln!(output);

    let _ = writeln!(output, "{}", {
        let mut row = format!("{:<11}", "Date");
        for metric in Metric::ALL {
            row.push_str(&format!("  {:>13}", metric.name()));
        }
        row
    });

    // points arrive entry-major, one per metric
    for chunk in points.chunks(Metric::ALL.len()) {
        let mut row = format!("{:<11}", fmt_date(chunk[0].date));
        for point in chunk {
            let cell = match point.value {
                Some(v) => format!("{:.2}", v + point.jitter),
                None => "-".to_string(),
            };
            row.push_str(&format!("  {cell:>13}"));
        }
        let _ = writeln!(output, "{row}");
    }
    output
}

pub fn render_history(
    series: &PlayerSeries,
    points: &[PlotPoint],
    window: &TrailingWindow,
    averages: &MetricValues,
) -> String {
    let mut output = String::new();

    if series.entries.is_empty() {
        let _ = writeln!(output, "No dated records for {}.", series.player);
        return output;
    }

    output.push_str(&render_trend(&series.player, points));

    let _ = writeln!(output);
    let _ = writeln!(output, "Last 7 days overview");
    let _ = writeln!(output);
    let _ = writeln!(output, "{}", metric_header_row("Date", 11));
    for entry in &window.entries {
        let _ = writeln!(
            output,
            "{:<11}{}  {}",
            fmt_date(entry.date),
            metric_value_cells(&entry.metrics),
            entry.other
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "Average values");
    for metric in Metric::ALL {
        let _ = writeln!(
            output,
            "- {}: {}",
            metric.name(),
            fmt_metric(averages.get(metric))
        );
    }
    output
}
