//! Invoice artifact format handling
//!
//! Renders invoice records to the fixed ten-line text layout and parses them
//! back. All functions are pure (no I/O) for easy testing.
//!
//! ```text
//! Rent Invoice
//! Car ID: CAR1
//! Brand: Toyota
//! Model: Corolla
//! Manufactured Year: 2020
//! Price Per Day: NPR 50
//! Customer Name: Alice
//! Date and Time of rent: 2026-10-16 10:22:05.123456
//! Duration of Rent: 3 days
//! Total Amount: NPR 150
//! ```

use crate::types::{InvoiceId, InvoiceRecord, RentalError, TransactionKind};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use std::fmt::Write;
use std::path::Path;
use std::str::FromStr;

/// Display unit prefixed to every amount
pub const CURRENCY: &str = "NPR";

/// File extension of invoice artifacts
pub const INVOICE_EXTENSION: &str = "txt";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";
const LINE_COUNT: usize = 10;

/// File name of the artifact for an invoice identity
pub fn invoice_file_name(id: &InvoiceId) -> String {
    format!("{}.{}", id, INVOICE_EXTENSION)
}

/// Recover the invoice identity from an artifact path
///
/// # Returns
///
/// * `Some(InvoiceId)` - If the file name matches the invoice naming pattern
/// * `None` - For any other file (inventory, logs, unrelated text files)
pub fn invoice_id_from_path(path: &Path) -> Option<InvoiceId> {
    if path.extension()?.to_str()? != INVOICE_EXTENSION {
        return None;
    }
    path.file_stem()?.to_str()?.parse().ok()
}

/// Render an invoice record to its text form
pub fn render_invoice(invoice: &InvoiceRecord) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = writeln!(out, "{} Invoice", invoice.kind.title());
    let _ = writeln!(out, "Car ID: {}", invoice.car_id);
    let _ = writeln!(out, "Brand: {}", invoice.brand);
    let _ = writeln!(out, "Model: {}", invoice.model);
    let _ = writeln!(out, "Manufactured Year: {}", invoice.year);
    let _ = writeln!(out, "Price Per Day: {} {}", CURRENCY, invoice.price_per_day);
    let _ = writeln!(out, "Customer Name: {}", invoice.customer_name);
    let _ = writeln!(
        out,
        "Date and Time of {}: {}",
        invoice.kind,
        invoice.timestamp.format(TIMESTAMP_FORMAT)
    );
    let _ = writeln!(out, "Duration of Rent: {} days", invoice.duration_days);
    let _ = writeln!(out, "Total Amount: {} {}", CURRENCY, invoice.total_amount);
    out
}

/// Parse the text form of an invoice back into a record
///
/// # Errors
///
/// Returns `RentalError::ParseError` (with the 1-based line number) if the
/// text does not have exactly ten lines in the expected order and format.
pub fn parse_invoice(text: &str) -> Result<InvoiceRecord, RentalError> {
    let lines: Vec<&str> = text.lines().collect();
    if lines.len() != LINE_COUNT {
        return Err(RentalError::parse_error(
            None,
            format!("expected {} lines, found {}", LINE_COUNT, lines.len()),
        ));
    }
    let mut lines = lines.into_iter().zip(1u64..);

    let mut next = || lines.next().unwrap_or_default();

    let (header, n) = next();
    let kind = header
        .strip_suffix(" Invoice")
        .and_then(TransactionKind::parse)
        .ok_or_else(|| RentalError::parse_error(Some(n), format!("invalid header '{}'", header)))?;

    let car_id = labelled(next(), "Car ID")?.to_string();
    let brand = labelled(next(), "Brand")?.to_string();
    let model = labelled(next(), "Model")?.to_string();
    let year = labelled(next(), "Manufactured Year")?.to_string();
    let price_per_day = amount(next(), "Price Per Day")?;
    let customer_name = labelled(next(), "Customer Name")?.to_string();

    let line = next();
    let date_label = format!("Date and Time of {}", kind);
    let raw = labelled(line, &date_label)?;
    let timestamp = NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT).map_err(|e| {
        RentalError::parse_error(Some(line.1), format!("invalid timestamp '{}': {}", raw, e))
    })?;

    let line = next();
    let raw = labelled(line, "Duration of Rent")?;
    let duration_days = raw
        .strip_suffix(" days")
        .and_then(|days| days.parse::<u32>().ok())
        .ok_or_else(|| RentalError::parse_error(Some(line.1), format!("invalid duration '{}'", raw)))?;

    let total_amount = amount(next(), "Total Amount")?;

    Ok(InvoiceRecord {
        kind,
        car_id,
        brand,
        model,
        year,
        price_per_day,
        customer_name,
        timestamp,
        duration_days,
        total_amount,
    })
}

fn labelled<'a>((line, n): (&'a str, u64), label: &str) -> Result<&'a str, RentalError> {
    line.strip_prefix(label)
        .and_then(|rest| rest.strip_prefix(": "))
        .map(str::trim)
        .ok_or_else(|| RentalError::parse_error(Some(n), format!("expected '{}: ...'", label)))
}

fn amount(line: (&str, u64), label: &str) -> Result<Decimal, RentalError> {
    let raw = labelled(line, label)?;
    raw.strip_prefix(CURRENCY)
        .map(str::trim_start)
        .and_then(|value| Decimal::from_str(value).ok())
        .ok_or_else(|| RentalError::parse_error(Some(line.1), format!("invalid amount '{}'", raw)))
}
