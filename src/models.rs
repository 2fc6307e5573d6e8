use chrono::NaiveDate;
use serde::Serialize;

/// Label used for the synthetic row appended to every team snapshot.
pub const TEAM_AVERAGE: &str = "TEAM AVERAGE";

/// One self-reported wellness observation as loaded from the source.
///
/// Metric fields keep the raw source text; numeric coercion happens per
/// view so one bad cell never invalidates the row.
#[derive(Debug, Clone, Serialize)]
pub struct WellnessRecord {
    pub player: String,
    pub date: Option<NaiveDate>,
    pub physical: Option<String>,
    pub psychological: Option<String>,
    pub nutrition: Option<String>,
    pub sleep: Option<String>,
    pub other: String,
}

/// The four rated wellness dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Metric {
    Physical,
    Psychological,
    Nutrition,
    Sleep,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Physical,
        Metric::Psychological,
        Metric::Nutrition,
        Metric::Sleep,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Metric::Physical => "Physical",
            Metric::Psychological => "Psychological",
            Metric::Nutrition => "Nutrition",
            Metric::Sleep => "Sleep",
        }
    }

    /// Raw source text for this metric on one record.
    pub fn raw(self, record: &WellnessRecord) -> Option<&str> {
        match self {
            Metric::Physical => record.physical.as_deref(),
            Metric::Psychological => record.psychological.as_deref(),
            Metric::Nutrition => record.nutrition.as_deref(),
            Metric::Sleep => record.sleep.as_deref(),
        }
    }
}

/// Parse-or-null combinator applied uniformly wherever a metric is read.
/// Blank or non-numeric text becomes `None`, never an error.
pub fn coerce_numeric(raw: Option<&str>) -> Option<f64> {
    let text = raw?.trim();
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok()
}

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Numeric-or-null values for all four metrics. Used both for a single
/// record's coerced readings and for computed averages.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MetricValues {
    pub physical: Option<f64>,
    pub psychological: Option<f64>,
    pub nutrition: Option<f64>,
    pub sleep: Option<f64>,
}

impl MetricValues {
    pub fn from_record(record: &WellnessRecord) -> Self {
        MetricValues {
            physical: coerce_numeric(Metric::Physical.raw(record)),
            psychological: coerce_numeric(Metric::Psychological.raw(record)),
            nutrition: coerce_numeric(Metric::Nutrition.raw(record)),
            sleep: coerce_numeric(Metric::Sleep.raw(record)),
        }
    }

    pub fn get(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Physical => self.physical,
            Metric::Psychological => self.psychological,
            Metric::Nutrition => self.nutrition,
            Metric::Sleep => self.sleep,
        }
    }

    pub fn set(&mut self, metric: Metric, value: Option<f64>) {
        match metric {
            Metric::Physical => self.physical = value,
            Metric::Psychological => self.psychological = value,
            Metric::Nutrition => self.nutrition = value,
            Metric::Sleep => self.sleep = value,
        }
    }
}

/// The records of one load, in source row order. Immutable after load;
/// every view derives a fresh collection from it.
#[derive(Debug, Default)]
pub struct Dataset {
    records: Vec<WellnessRecord>,
}

impl Dataset {
    pub fn new(records: Vec<WellnessRecord>) -> Self {
        Dataset { records }
    }

    pub fn records(&self) -> &[WellnessRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct player names, sorted, for selection.
    pub fn players(&self) -> Vec<String> {
        let mut players: Vec<String> = self
            .records
            .iter()
            .filter(|r| !r.player.is_empty())
            .map(|r| r.player.clone())
            .collect();
        players.sort();
        players.dedup();
        players
    }
}

/// One row of the per-date comparison table.
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotRow {
    pub player: String,
    pub metrics: MetricValues,
    pub other: String,
}

impl SnapshotRow {
    pub fn is_team_average(&self) -> bool {
        self.player == TEAM_AVERAGE
    }
}

/// All players' rows for one date plus the synthetic team-average row,
/// which is always last.
#[derive(Debug, Serialize)]
pub struct TeamSnapshot {
    pub date: NaiveDate,
    pub rows: Vec<SnapshotRow>,
}

/// One dated entry of a player's history, metrics already coerced.
#[derive(Debug, Clone, Serialize)]
pub struct SeriesEntry {
    pub date: NaiveDate,
    pub metrics: MetricValues,
    pub other: String,
}

/// One player's records with parseable dates, ascending.
#[derive(Debug, Serialize)]
pub struct PlayerSeries {
    pub player: String,
    pub entries: Vec<SeriesEntry>,
}

/// Chart datum: the stored value plus a display-only jitter offset.
/// The offset never feeds back into any stored value or statistic.
#[derive(Debug, Clone, Serialize)]
pub struct PlotPoint {
    pub date: NaiveDate,
    pub metric: Metric,
    pub value: Option<f64>,
    pub jitter: f64,
}

/// The chronologically last (up to) seven entries of a series, ascending.
#[derive(Debug, Serialize)]
pub struct TrailingWindow {
    pub entries: Vec<SeriesEntry>,
}
