use chrono::NaiveDate;

use crate::models::{
    mean, Dataset, Metric, MetricValues, SnapshotRow, TeamSnapshot, TEAM_AVERAGE,
};

/// Distinct dates with at least one record, ascending. This is the set a
/// caller may pick a snapshot date from.
pub fn selectable_dates(dataset: &Dataset) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = dataset.records().iter().filter_map(|r| r.date).collect();
    dates.sort();
    dates.dedup();
    dates
}

/// Cross-player comparison for one date: every matching record in source
/// order, then the synthetic team-average row.
///
/// Each metric's average is the mean over non-null coerced values for that
/// date; a metric nobody reported stays null rather than reading as zero.
pub fn snapshot(dataset: &Dataset, date: NaiveDate) -> TeamSnapshot {
    let mut rows: Vec<SnapshotRow> = dataset
        .records()
        .iter()
        .filter(|r| r.date == Some(date))
        .map(|r| SnapshotRow {
            player: r.player.clone(),
            metrics: MetricValues::from_record(r),
            other: r.other.clone(),
        })
        .collect();

    let mut averages = MetricValues::default();
    for metric in Metric::ALL {
        let values: Vec<f64> = rows.iter().filter_map(|row| row.metrics.get(metric)).collect();
        averages.set(metric, mean(&values));
    }

    rows.push(SnapshotRow {
        player: TEAM_AVERAGE.to_string(),
        metrics: averages,
        other: String::new(),
    });

    TeamSnapshot { date, rows }
}
