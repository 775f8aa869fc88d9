use serde::{Deserialize, Serialize};

/// Label shown in place of any field the provider did not supply.
///
/// Only used when rendering or exporting; inside a [`BusinessRecord`] an
/// unspecified field is `None`, which stays distinct from `Some("")`.
pub const UNSPECIFIED: &str = "ไม่ระบุ";

/// One local business listing, normalized from a single provider result.
///
/// Every field is optional: `None` means the provider result did not carry
/// the field (or carried it in an unusable shape).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusinessRecord {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    /// Provider business type, e.g. `"Coffee shop"`.
    pub category: Option<String>,
    /// Average review score, typically `1.0..=5.0`.
    pub rating: Option<f64>,
    pub review_count: Option<u64>,
    /// Free-text opening status, e.g. `"Open ⋅ Closes 10 PM"`.
    pub hours_status: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// First email address found in the listing snippet.
    pub email: Option<String>,
}

impl BusinessRecord {
    /// Returns `(latitude, longitude)` when both axes are present.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }

    /// Returns the display name, or [`UNSPECIFIED`].
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNSPECIFIED)
    }
}

/// Renders an optional value, substituting [`UNSPECIFIED`] for `None`.
#[must_use]
pub fn display_or_unspecified<T: std::fmt::Display>(value: Option<&T>) -> String {
    value.map_or_else(|| UNSPECIFIED.to_string(), ToString::to_string)
}
