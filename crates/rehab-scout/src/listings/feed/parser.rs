use serde::Deserialize;
use std::io::Read;
use tracing::warn;

use super::super::raw::{non_empty, parse_flag, parse_number, RawListing};

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<RawListing>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    csv_reader.headers()?;
    let mut records = Vec::new();

    for (index, record) in csv_reader.deserialize::<ListingRow>().enumerate() {
        match record {
            Ok(row) => records.push(row.into_raw()),
            Err(err) => warn!(row = index + 1, error = %err, "skipping unreadable listing row"),
        }
    }

    Ok(records)
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ListingRow {
    property_id: Option<String>,
    address_line: Option<String>,
    city: Option<String>,
    state_code: Option<String>,
    postal_code: Option<String>,
    price: Option<String>,
    beds: Option<String>,
    baths: Option<String>,
    building_size: Option<String>,
    year_built: Option<String>,
    lot_size: Option<String>,
    garage_spaces: Option<String>,
    has_basement: Option<String>,
    has_fireplace: Option<String>,
    has_pool: Option<String>,
    cooling_type: Option<String>,
    description: Option<String>,
    /// Pipe-separated photo URLs.
    photos: Option<String>,
    lat: Option<String>,
    lon: Option<String>,
    list_date: Option<String>,
}

impl ListingRow {
    fn into_raw(self) -> RawListing {
        let text = |value: Option<String>| value.as_deref().and_then(non_empty);
        let number = |value: Option<String>| value.as_deref().and_then(parse_number);
        let flag = |value: Option<String>| value.as_deref().and_then(parse_flag);

        RawListing {
            property_id: text(self.property_id),
            address_line: text(self.address_line),
            city: text(self.city),
            state_code: text(self.state_code),
            postal_code: text(self.postal_code),
            price: number(self.price),
            beds: number(self.beds),
            baths: number(self.baths),
            building_size: number(self.building_size),
            year_built: number(self.year_built),
            lot_size: number(self.lot_size),
            garage_spaces: number(self.garage_spaces),
            has_basement: flag(self.has_basement),
            has_fireplace: flag(self.has_fireplace),
            has_pool: flag(self.has_pool),
            cooling_type: text(self.cooling_type),
            description: text(self.description),
            photos: self
                .photos
                .as_deref()
                .map(|joined| joined.split('|').filter_map(non_empty).collect())
                .unwrap_or_default(),
            lat: number(self.lat),
            lon: number(self.lon),
            list_date: text(self.list_date),
        }
    }
}
