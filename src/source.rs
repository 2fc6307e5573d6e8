use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;

use crate::models::{Dataset, WellnessRecord};

/// Fatal ingestion failure: the source is missing, unreadable, or empty.
/// Everything row-local (bad dates, bad numbers) is recovered to null
/// instead and never surfaces here.
#[derive(Debug, thiserror::Error)]
pub enum DataUnavailable {
    #[error("wellness data unavailable: cannot read {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("wellness data unavailable: {path} has no rows")]
    Empty { path: String },
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"];

/// Tolerant date parse: unparsable text yields `None`, the row stays.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let text = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
}

/// Canonical header form: trimmed, first letter upper, rest lower, so
/// ` PHYSICAL ` and `physical` both address the `Physical` column.
pub fn canonical_header(raw: &str) -> String {
    let text = raw.trim();
    let mut chars = text.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
    }
}

#[derive(Debug, Default)]
struct Columns {
    player: Option<usize>,
    date: Option<usize>,
    physical: Option<usize>,
    psychological: Option<usize>,
    nutrition: Option<usize>,
    sleep: Option<usize>,
    other: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Self {
        let mut columns = Columns::default();
        for (index, header) in headers.iter().enumerate() {
            match canonical_header(header).as_str() {
                "Player" => columns.player = Some(index),
                "Date" => columns.date = Some(index),
                "Physical" => columns.physical = Some(index),
                "Psychological" => columns.psychological = Some(index),
                "Nutrition" => columns.nutrition = Some(index),
                "Sleep" => columns.sleep = Some(index),
                "Other" => columns.other = Some(index),
                _ => {}
            }
        }
        columns
    }
}

fn field<'a>(row: &'a csv::StringRecord, index: Option<usize>) -> Option<&'a str> {
    index.and_then(|i| row.get(i))
}

/// Load the wellness source from a CSV file on disk.
pub fn load_csv(path: &Path) -> Result<Dataset, DataUnavailable> {
    let reader = csv::Reader::from_path(path).map_err(|source| DataUnavailable::Unreadable {
        path: path.display().to_string(),
        source,
    })?;

    let dataset = read_rows(reader).map_err(|source| DataUnavailable::Unreadable {
        path: path.display().to_string(),
        source,
    })?;

    if dataset.is_empty() {
        return Err(DataUnavailable::Empty {
            path: path.display().to_string(),
        });
    }

    Ok(dataset)
}

/// Normalize raw tabular rows into a [`Dataset`]. Split from [`load_csv`]
/// so tests and other front ends can feed in-memory data.
pub fn read_rows<R: Read>(mut reader: csv::Reader<R>) -> Result<Dataset, csv::Error> {
    let columns = Columns::from_headers(reader.headers()?);
    let mut records = Vec::new();

    for result in reader.records() {
        let row = result?;
        records.push(WellnessRecord {
            player: field(&row, columns.player).unwrap_or("").trim().to_string(),
            date: field(&row, columns.date).and_then(parse_date),
            physical: field(&row, columns.physical).map(str::to_string),
            psychological: field(&row, columns.psychological).map(str::to_string),
            nutrition: field(&row, columns.nutrition).map(str::to_string),
            sleep: field(&row, columns.sleep).map(str::to_string),
            other: field(&row, columns.other).unwrap_or("").trim().to_string(),
        });
    }

    Ok(Dataset::new(records))
}
