//! Excel workbook export.
//!
//! Same columns and [`UNSPECIFIED`] filling as the CSV export, except that
//! rating, review count and coordinates are written as numbers when present
//! so they sort and filter correctly.

use std::path::Path;

use anyhow::Context;
use bizfinder_core::{BusinessRecord, UNSPECIFIED};
use rust_xlsxwriter::{Format, Workbook, XlsxError};

use super::export::EXPORT_COLUMNS;

const SHEET_NAME: &str = "Businesses";

#[derive(Debug, Clone, Copy, PartialEq)]
enum Cell<'a> {
    Text(&'a str),
    Number(f64),
}

/// One worksheet row in [`EXPORT_COLUMNS`] order.
#[allow(clippy::cast_precision_loss)]
fn row_cells<'a>(record: &'a BusinessRecord) -> [Cell<'a>; 11] {
    let text = |v: &'a Option<String>| Cell::Text(v.as_deref().unwrap_or(UNSPECIFIED));
    let number = |v: Option<f64>| v.map_or(Cell::Text(UNSPECIFIED), Cell::Number);
    [
        text(&record.name),
        text(&record.address),
        text(&record.phone),
        text(&record.email),
        text(&record.website),
        text(&record.category),
        number(record.rating),
        number(record.review_count.map(|n| n as f64)),
        text(&record.hours_status),
        number(record.latitude),
        number(record.longitude),
    ]
}

fn build_workbook(records: &[BusinessRecord]) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, title) in (0u16..).zip(EXPORT_COLUMNS) {
        sheet.write_string_with_format(0, col, title, &header)?;
    }
    for (row, record) in (1u32..).zip(records) {
        for (col, cell) in (0u16..).zip(row_cells(record)) {
            match cell {
                Cell::Text(s) => sheet.write_string(row, col, s)?,
                Cell::Number(n) => sheet.write_number(row, col, n)?,
            };
        }
    }
    sheet.set_freeze_panes(1, 0)?;

    Ok(workbook)
}

/// Serializes the workbook into memory.
pub(super) fn write_xlsx_to_buffer(records: &[BusinessRecord]) -> anyhow::Result<Vec<u8>> {
    let mut workbook = build_workbook(records)?;
    Ok(workbook.save_to_buffer()?)
}

pub(super) fn export_xlsx(path: &Path, records: &[BusinessRecord]) -> anyhow::Result<()> {
    let buffer = write_xlsx_to_buffer(records)
        .with_context(|| format!("failed to build Excel workbook for {}", path.display()))?;
    std::fs::write(path, buffer)
        .with_context(|| format!("failed to write Excel file {}", path.display()))
}
