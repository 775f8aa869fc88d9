//! Normalization from raw SerpApi listings to [`bizfinder_core::BusinessRecord`].
//!
//! Field decoding is delegated to [`RawLocalResult::from_value`]; this module
//! maps the decoded fields onto the record and runs email extraction.

use bizfinder_core::BusinessRecord;
use serde_json::Value;

use crate::email::extract_email;
use crate::types::RawLocalResult;

/// Why a listing produced no record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The listing was not a JSON object; `found` names the JSON type.
    NotAnObject { found: &'static str },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NotAnObject { found } => {
                write!(f, "listing is a JSON {found}, expected an object")
            }
        }
    }
}

/// Result of normalizing one listing: a record, or a skip.
#[derive(Debug, Clone, PartialEq)]
#[allow(clippy::large_enum_variant)]
pub enum Normalized {
    Record(BusinessRecord),
    Skip(SkipReason),
}

/// Normalizes one raw listing.
///
/// Never fails on missing or oddly typed fields; those become `None`. Only a
/// listing that is not an object at all is skipped.
#[must_use]
pub fn normalize(raw: &Value) -> Normalized {
    let Some(listing) = RawLocalResult::from_value(raw) else {
        return Normalized::Skip(SkipReason::NotAnObject {
            found: json_type_name(raw),
        });
    };

    let email = listing.snippet.as_deref().and_then(extract_email);

    Normalized::Record(BusinessRecord {
        name: listing.title,
        address: listing.address,
        phone: listing.phone,
        website: listing.website,
        category: listing.kind,
        rating: listing.rating,
        review_count: listing.reviews,
        hours_status: listing.hours,
        latitude: listing.latitude,
        longitude: listing.longitude,
        email,
    })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
