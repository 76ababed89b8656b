use std::io::Read;

use serde_json::Value;
use tracing::warn;

use super::super::raw::{non_empty, parse_flag, parse_number, RawListing};
use super::FeedImportError;

pub(crate) fn parse_payload<R: Read>(reader: R) -> Result<Vec<RawListing>, FeedImportError> {
    let payload: Value = serde_json::from_reader(reader)?;

    let records: &[Value] = match &payload {
        Value::Array(records) => records.as_slice(),
        Value::Object(_) => match payload.get("properties") {
            Some(Value::Array(records)) => records.as_slice(),
            _ => {
                warn!("listing payload has no properties array; treating as empty batch");
                &[]
            }
        },
        _ => {
            warn!("listing payload is neither an object nor an array; treating as empty batch");
            &[]
        }
    };

    Ok(from_provider_records(records))
}

/// Map provider-shaped JSON records into raw listings, skipping entries that are not
/// objects.
pub fn from_provider_records(records: &[Value]) -> Vec<RawListing> {
    records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| {
            let raw = raw_from_provider(record);
            if raw.is_none() {
                warn!(index, "skipping listing record that is not a JSON object");
            }
            raw
        })
        .collect()
}

fn raw_from_provider(record: &Value) -> Option<RawListing> {
    if !record.is_object() {
        return None;
    }

    Some(RawListing {
        property_id: text(field(record, &["property_id"])),
        address_line: text(field(record, &["address", "line"])),
        city: text(field(record, &["address", "city"])),
        state_code: text(field(record, &["address", "state_code"])),
        postal_code: text(field(record, &["address", "postal_code"])),
        price: number(field(record, &["price"])),
        beds: number(field(record, &["beds"])),
        baths: number(field(record, &["baths"])),
        building_size: number(field(record, &["building_size", "size"])),
        year_built: number(field(record, &["year_built"])),
        lot_size: number(field(record, &["lot_size", "size"])),
        garage_spaces: number(field(record, &["garage_spaces"])),
        has_basement: flag(field(record, &["has_basement"])),
        has_fireplace: flag(field(record, &["has_fireplace"])),
        has_pool: flag(field(record, &["has_pool"])),
        cooling_type: text(field(record, &["cooling_type"])),
        description: text(field(record, &["description"])),
        photos: photos(field(record, &["photos"])),
        lat: number(field(record, &["address", "lat"])),
        lon: number(field(record, &["address", "lon"])),
        list_date: text(field(record, &["list_date"])),
    })
}

fn field<'a>(record: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(record, |value, key| value.get(*key))
}

fn number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(number) => number.as_f64().filter(|number| number.is_finite()),
        Value::String(raw) => parse_number(raw),
        _ => None,
    }
}

fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(raw) => non_empty(raw),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn flag(value: Option<&Value>) -> Option<bool> {
    match value? {
        Value::Bool(flag) => Some(*flag),
        Value::String(raw) => parse_flag(raw),
        Value::Number(number) => number.as_f64().map(|number| number != 0.0),
        _ => None,
    }
}

fn photos(value: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(entries)) = value else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| match entry {
            Value::String(href) => non_empty(href),
            Value::Object(_) => text(entry.get("href")),
            _ => None,
        })
        .collect()
}
