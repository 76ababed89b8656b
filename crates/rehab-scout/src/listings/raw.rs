use chrono::{DateTime, NaiveDate};

/// Untrusted listing record as delivered by the listing provider.
///
/// Every field is optional. Feed parsers only fill a field when the source value could be
/// read; the valuation engine substitutes defaults for whatever is left empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawListing {
    pub property_id: Option<String>,
    pub address_line: Option<String>,
    pub city: Option<String>,
    pub state_code: Option<String>,
    pub postal_code: Option<String>,
    pub price: Option<f64>,
    pub beds: Option<f64>,
    pub baths: Option<f64>,
    pub building_size: Option<f64>,
    pub year_built: Option<f64>,
    pub lot_size: Option<f64>,
    pub garage_spaces: Option<f64>,
    pub has_basement: Option<bool>,
    pub has_fireplace: Option<bool>,
    pub has_pool: Option<bool>,
    pub cooling_type: Option<String>,
    pub description: Option<String>,
    pub photos: Vec<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub list_date: Option<String>,
}

pub(crate) fn parse_number(value: &str) -> Option<f64> {
    let trimmed = value.trim().trim_start_matches('$').replace(',', "");
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

pub(crate) fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

pub(crate) fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Provider list dates arrive either as RFC 3339 timestamps or bare dates.
pub(crate) fn parse_list_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc().date());
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}
