//! Stdout renderings of a result set.

use std::io::{self, Write};

use bizfinder_core::{display_or_unspecified, BusinessRecord, UNSPECIFIED};

/// Longest name printed in the table before it is cut with `…`.
const NAME_WIDTH: usize = 40;

pub(super) fn write_table<W: Write>(out: &mut W, records: &[BusinessRecord]) -> io::Result<()> {
    writeln!(
        out,
        "{:<4}{:<42}{:<16}{:<8}{:<9}CATEGORY",
        "#", "NAME", "PHONE", "RATING", "REVIEWS"
    )?;
    for (i, record) in records.iter().enumerate() {
        writeln!(
            out,
            "{:<4}{:<42}{:<16}{:<8}{:<9}{}",
            i + 1,
            truncate(record.display_name(), NAME_WIDTH),
            record.phone.as_deref().unwrap_or(UNSPECIFIED),
            record
                .rating
                .map_or_else(|| UNSPECIFIED.to_string(), |r| format!("{r:.1}")),
            display_or_unspecified(record.review_count.as_ref()),
            record.category.as_deref().unwrap_or(UNSPECIFIED),
        )?;
    }
    Ok(())
}

pub(super) fn write_details<W: Write>(out: &mut W, records: &[BusinessRecord]) -> io::Result<()> {
    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        writeln!(out, "{}. {}", i + 1, record.display_name())?;
        let text = |v: &Option<String>| v.as_deref().unwrap_or(UNSPECIFIED).to_owned();
        let fields = [
            ("address", text(&record.address)),
            ("phone", text(&record.phone)),
            ("email", text(&record.email)),
            ("website", text(&record.website)),
            ("category", text(&record.category)),
            ("rating", display_or_unspecified(record.rating.as_ref())),
            ("reviews", display_or_unspecified(record.review_count.as_ref())),
            ("hours", text(&record.hours_status)),
            ("location", coordinates(record)),
        ];
        for (label, value) in fields {
            writeln!(out, "   {label:<9}{value}")?;
        }
    }
    Ok(())
}

pub(super) fn write_json<W: Write>(out: &mut W, records: &[BusinessRecord]) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, records)?;
    writeln!(out)
}

/// `"lat, lng"` when both axes are present; a lone axis is not shown.
fn coordinates(record: &BusinessRecord) -> String {
    record
        .coordinates()
        .map_or_else(|| UNSPECIFIED.to_owned(), |(lat, lng)| format!("{lat:.6}, {lng:.6}"))
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_owned();
    }
    let mut cut: String = s.chars().take(max_chars - 1).collect();
    cut.push('…');
    cut
}
