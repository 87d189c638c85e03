//! Inventory file format handling
//!
//! This module centralizes all inventory format concerns, providing:
//! - Parsing of `id, brand, model, year, pricePerDay, status` lines into car records
//! - In-place status updates that leave every other byte of the file untouched
//!
//! Fields are separated by `", "` and are never quoted or escaped, so a bare
//! comma inside a field (`Mercedes,Benz`) belongs to that field. Blank lines
//! are ignored; any other malformed line fails the whole read so the store is
//! never loaded partially.

use crate::types::{CarRecord, CarStatus, RentalError};
use csv::StringRecord;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Number of fields on every inventory line
pub const FIELD_COUNT: usize = 6;

/// Separator between fields on an inventory line
pub const FIELD_SEPARATOR: &str = ", ";

/// Raw inventory line, fields in file order
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvCarRecord {
    pub id: String,
    pub brand: String,
    pub model: String,
    pub year: String,
    pub price: String,
    pub status: String,
}

/// Convert one inventory line to a CarRecord
///
/// # Arguments
///
/// * `record` - The fields of the line, as returned by [`split_fields`]
/// * `line` - Line number used in error messages
///
/// # Returns
///
/// * `Ok(CarRecord)` - Successfully converted line
/// * `Err(RentalError::ParseError)` - Wrong field count, bad price or unknown status
pub fn convert_csv_record(record: &StringRecord, line: u64) -> Result<CarRecord, RentalError> {
    if record.len() != FIELD_COUNT {
        return Err(RentalError::parse_error(
            Some(line),
            format!("expected {} fields, found {}", FIELD_COUNT, record.len()),
        ));
    }

    let raw: CsvCarRecord = record
        .deserialize(None)
        .map_err(|e| RentalError::parse_error(Some(line), e.to_string()))?;

    if raw.id.is_empty() {
        return Err(RentalError::parse_error(Some(line), "empty car id"));
    }

    // Prices are whole NPR amounts; "50.0" or "-5" are rejected
    let price_per_day = raw.price.parse::<u64>().map(Decimal::from).map_err(|_| {
        RentalError::parse_error(
            Some(line),
            format!("invalid price per day '{}' for car {}", raw.price, raw.id),
        )
    })?;

    let status = CarStatus::parse(&raw.status).ok_or_else(|| {
        RentalError::parse_error(
            Some(line),
            format!("invalid status '{}' for car {}", raw.status, raw.id),
        )
    })?;

    Ok(CarRecord {
        id: raw.id,
        brand: raw.brand,
        model: raw.model,
        year: raw.year,
        price_per_day,
        status,
    })
}

/// Split one inventory line into trimmed fields
///
/// Lines written without the space after each comma (`CAR1,Toyota,...`)
/// are accepted when a plain comma split yields exactly six fields.
pub fn split_fields(line: &str) -> StringRecord {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();

    let mut record = if fields.len() != FIELD_COUNT && line.split(',').count() == FIELD_COUNT {
        StringRecord::from(line.split(',').collect::<Vec<_>>())
    } else {
        StringRecord::from(fields)
    };
    record.trim();
    record
}

/// Parse one inventory line
///
/// Blank lines yield `Ok(None)`.
pub fn parse_car_line(line: &str, line_number: u64) -> Result<Option<CarRecord>, RentalError> {
    if line.trim().is_empty() {
        return Ok(None);
    }
    convert_csv_record(&split_fields(line), line_number).map(Some)
}

/// Read every car record from an inventory text
///
/// Either the full ordered list is returned or the first error is.
pub fn read_inventory(text: &str) -> Result<Vec<CarRecord>, RentalError> {
    let mut cars = Vec::new();
    for (index, line) in text.lines().enumerate() {
        if let Some(car) = parse_car_line(line, index as u64 + 1)? {
            cars.push(car);
        }
    }
    Ok(cars)
}

/// Swap the status field of one raw line, whitespace and line ending included
fn with_status(line: &str, status: CarStatus) -> String {
    let start = line.rfind(',').map_or(0, |pos| pos + 1);
    let field = &line[start..];
    let value_start = start + (field.len() - field.trim_start().len());
    let value_end = start + field.trim_end().len();

    format!("{}{}{}", &line[..value_start], status.as_str(), &line[value_end..])
}

/// Rewrite the status of `car_id` in an inventory text
///
/// Every line is validated first. Only the status field of matching lines
/// changes; other lines, blank lines and line endings are copied verbatim.
///
/// # Returns
///
/// * `Ok(Some(text))` - The updated inventory text
/// * `Ok(None)` - No line carries `car_id`
/// * `Err(RentalError::ParseError)` - A line is malformed
pub fn replace_status(
    text: &str,
    car_id: &str,
    status: CarStatus,
) -> Result<Option<String>, RentalError> {
    let mut updated = String::with_capacity(text.len() + 4);
    let mut found = false;

    for (index, line) in text.split_inclusive('\n').enumerate() {
        match parse_car_line(line, index as u64 + 1)? {
            Some(car) if car.id == car_id => {
                updated.push_str(&with_status(line, status));
                found = true;
            }
            _ => updated.push_str(line),
        }
    }

    Ok(found.then_some(updated))
}
