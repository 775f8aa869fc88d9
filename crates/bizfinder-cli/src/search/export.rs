//! File exports: CSV for spreadsheets, JSON for other tools.
//!
//! The Excel workbook lives in [`super::xlsx`] and shares [`EXPORT_COLUMNS`].

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use bizfinder_core::{display_or_unspecified, BusinessRecord, UNSPECIFIED};
use chrono::{DateTime, Local};
use serde::Serialize;

/// Byte-order mark so spreadsheet tools detect UTF-8 (Thai text included).
const UTF8_BOM: &str = "\u{FEFF}";

/// Column order of every tabular export; matches the field order of [`CsvRow`].
pub(super) const EXPORT_COLUMNS: [&str; 11] = [
    "name",
    "address",
    "phone",
    "email",
    "website",
    "category",
    "rating",
    "review_count",
    "hours_status",
    "latitude",
    "longitude",
];

/// One CSV row. Missing values are written as [`UNSPECIFIED`].
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    name: &'a str,
    address: &'a str,
    phone: &'a str,
    email: &'a str,
    website: &'a str,
    category: &'a str,
    rating: String,
    review_count: String,
    hours_status: &'a str,
    latitude: String,
    longitude: String,
}

impl<'a> From<&'a BusinessRecord> for CsvRow<'a> {
    fn from(record: &'a BusinessRecord) -> Self {
        let text = |v: &'a Option<String>| v.as_deref().unwrap_or(UNSPECIFIED);
        Self {
            name: text(&record.name),
            address: text(&record.address),
            phone: text(&record.phone),
            email: text(&record.email),
            website: text(&record.website),
            category: text(&record.category),
            rating: display_or_unspecified(record.rating.as_ref()),
            review_count: display_or_unspecified(record.review_count.as_ref()),
            hours_status: text(&record.hours_status),
            latitude: display_or_unspecified(record.latitude.as_ref()),
            longitude: display_or_unspecified(record.longitude.as_ref()),
        }
    }
}

/// `business_search_YYYYMMDD_HHMMSS.{extension}` in the working directory.
pub(super) fn default_export_path(now: DateTime<Local>, extension: &str) -> PathBuf {
    PathBuf::from(format!(
        "business_search_{}.{extension}",
        now.format("%Y%m%d_%H%M%S")
    ))
}

pub(super) fn write_csv<W: Write>(mut writer: W, records: &[BusinessRecord]) -> anyhow::Result<()> {
    writer.write_all(UTF8_BOM.as_bytes())?;
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv.write_record(EXPORT_COLUMNS)?;
    for record in records {
        csv.serialize(CsvRow::from(record))?;
    }
    csv.flush()?;
    Ok(())
}

pub(super) fn export_csv(path: &Path, records: &[BusinessRecord]) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create CSV file {}", path.display()))?;
    write_csv(BufWriter::new(file), records)
        .with_context(|| format!("failed to write CSV file {}", path.display()))
}

pub(super) fn export_json(path: &Path, records: &[BusinessRecord]) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create JSON file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, records)
        .with_context(|| format!("failed to write JSON file {}", path.display()))?;
    writer.flush()?;
    Ok(())
}
