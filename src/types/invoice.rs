//! Transaction and invoice types for the car rental ledger
//!
//! This module defines the rent/return request handed to the rental engine,
//! the immutable invoice record it produces, and the invoice identity used
//! to name invoice artifacts.

use super::car::CarId;
use chrono::{NaiveDateTime, Timelike};
use rust_decimal::Decimal;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Kind of rental transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    /// Hand a car over to a customer
    ///
    /// Requires the car to be available and marks it as not available.
    Rent,

    /// Take a car back from a customer
    ///
    /// Marks the car as available, whatever its previous status.
    Return,
}

impl TransactionKind {
    /// Lowercase name used in invoice identities and log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Rent => "rent",
            TransactionKind::Return => "return",
        }
    }

    /// Capitalised name used in the invoice header line
    pub fn title(&self) -> &'static str {
        match self {
            TransactionKind::Rent => "Rent",
            TransactionKind::Return => "Return",
        }
    }

    /// Parse a kind name, ignoring ASCII case
    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("rent") {
            Some(TransactionKind::Rent)
        } else if value.eq_ignore_ascii_case("return") {
            Some(TransactionKind::Return)
        } else {
            None
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rent or return request as entered by the operator
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRequest {
    /// Rent or return
    pub kind: TransactionKind,

    /// Car to rent or return
    pub car_id: CarId,

    /// Number of rental days
    ///
    /// Positive for rentals; returns are entered with 0.
    pub duration_days: u32,

    /// Customer renting or returning the car
    pub customer_name: String,
}

impl TransactionRequest {
    /// Build a rent request
    pub fn rent(car_id: impl Into<CarId>, duration_days: u32, customer_name: impl Into<String>) -> Self {
        TransactionRequest {
            kind: TransactionKind::Rent,
            car_id: car_id.into(),
            duration_days,
            customer_name: customer_name.into(),
        }
    }

    /// Build a return request (duration is always 0)
    pub fn return_car(car_id: impl Into<CarId>, customer_name: impl Into<String>) -> Self {
        TransactionRequest {
            kind: TransactionKind::Return,
            car_id: car_id.into(),
            duration_days: 0,
            customer_name: customer_name.into(),
        }
    }
}

/// Identity of an emitted invoice artifact
///
/// Rendered as `{kind}_invoice_{YYYY-MM-DD_HH-MM-SS}`, with a `_{seq}` suffix
/// when more than one invoice of the same kind is emitted within one second.
/// Ordering follows emission order: timestamp first, then suffix.
///
/// The timestamp is local wall-clock time, as it appears in the file name.
/// Invoices emitted during the hour repeated when daylight saving time ends
/// can therefore sort before invoices emitted in the first pass of that
/// hour; replay order is only exact while the local clock moves forward.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InvoiceId {
    /// Kind of the transaction the invoice documents
    pub kind: TransactionKind,

    /// Emission time, truncated to whole seconds
    pub issued_at: NaiveDateTime,

    /// Collision suffix, 0 for the first invoice in a given second
    pub seq: u32,
}

impl InvoiceId {
    /// Create an identity for an invoice issued at `issued_at`
    ///
    /// Sub-second precision is dropped.
    pub fn new(kind: TransactionKind, issued_at: NaiveDateTime, seq: u32) -> Self {
        let issued_at = issued_at.with_nanosecond(0).unwrap_or(issued_at);
        InvoiceId {
            kind,
            issued_at,
            seq,
        }
    }

    /// Same identity with a different collision suffix
    pub fn with_seq(&self, seq: u32) -> Self {
        InvoiceId { seq, ..self.clone() }
    }
}

impl Ord for InvoiceId {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.issued_at
            .cmp(&other.issued_at)
            .then(self.seq.cmp(&other.seq))
            .then(self.kind.as_str().cmp(other.kind.as_str()))
    }
}

impl PartialOrd for InvoiceId {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

const ID_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

impl fmt::Display for InvoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_invoice_{}",
            self.kind,
            self.issued_at.format(ID_TIMESTAMP_FORMAT)
        )?;
        if self.seq > 0 {
            write!(f, "_{}", self.seq)?;
        }
        Ok(())
    }
}

impl FromStr for InvoiceId {
    type Err = String;

    /// Parse `{kind}_invoice_{YYYY-MM-DD_HH-MM-SS}[_{seq}]`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, rest) = s
            .split_once("_invoice_")
            .ok_or_else(|| format!("'{}' is not an invoice identity", s))?;
        let kind = match kind {
            "rent" => TransactionKind::Rent,
            "return" => TransactionKind::Return,
            _ => return Err(format!("Unknown transaction kind '{}' in '{}'", kind, s)),
        };

        // The timestamp has a fixed width of 19 characters
        let (timestamp, suffix) = if rest.len() > 19 && rest.is_char_boundary(19) {
            rest.split_at(19)
        } else {
            (rest, "")
        };
        let issued_at = NaiveDateTime::parse_from_str(timestamp, ID_TIMESTAMP_FORMAT)
            .map_err(|e| format!("Invalid timestamp '{}' in '{}': {}", timestamp, s, e))?;
        let seq = match suffix {
            "" => 0,
            _ => suffix
                .strip_prefix('_')
                .and_then(|n| n.parse::<u32>().ok())
                .filter(|n| *n > 0)
                .ok_or_else(|| format!("Invalid suffix '{}' in '{}'", suffix, s))?,
        };

        Ok(InvoiceId {
            kind,
            issued_at,
            seq,
        })
    }
}

/// Completed transaction as written to an invoice artifact
///
/// Invoice records are immutable once written.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceRecord {
    /// Rent or return
    pub kind: TransactionKind,

    /// Car the transaction applied to
    pub car_id: CarId,

    /// Car brand at the time of the transaction
    pub brand: String,

    /// Car model at the time of the transaction
    pub model: String,

    /// Manufacture year at the time of the transaction
    pub year: String,

    /// Day rate charged, in NPR
    pub price_per_day: Decimal,

    /// Customer renting or returning the car
    pub customer_name: String,

    /// Wall-clock time of the transaction
    ///
    /// Captured independently of the identity timestamp, so the two may
    /// differ by a fraction of a second.
    pub timestamp: NaiveDateTime,

    /// Number of rental days charged
    pub duration_days: u32,

    /// Total charged, in NPR
    pub total_amount: Decimal,
}

/// Invoice artifact on disk together with its parsed content
#[derive(Debug, Clone, PartialEq)]
pub struct StoredInvoice {
    /// Identity recovered from the artifact name
    pub id: InvoiceId,

    /// Location of the artifact
    pub path: PathBuf,

    /// Parsed invoice content
    pub record: InvoiceRecord,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[rstest]
    #[case::rent("rent", Some(TransactionKind::Rent))]
    #[case::return_kind("return", Some(TransactionKind::Return))]
    #[case::header_case("Return", Some(TransactionKind::Return))]
    #[case::unknown("lease", None)]
    fn test_kind_parse(#[case] input: &str, #[case] expected: Option<TransactionKind>) {
        assert_eq!(TransactionKind::parse(input), expected);
    }

    #[test]
    fn test_invoice_id_drops_subsecond_precision() {
        let precise = at(10, 0, 5).with_nanosecond(123_456_789).unwrap();
        let id = InvoiceId::new(TransactionKind::Rent, precise, 0);
        assert_eq!(id.issued_at, at(10, 0, 5));
    }

    #[test]
    fn test_invoice_id_orders_by_time_then_seq() {
        let early = InvoiceId::new(TransactionKind::Return, at(9, 0, 0), 3);
        let same_second = InvoiceId::new(TransactionKind::Rent, at(10, 0, 0), 0);
        let collision = same_second.with_seq(1);

        let mut ids = vec![collision.clone(), same_second.clone(), early.clone()];
        ids.sort();
        assert_eq!(ids, vec![early, same_second, collision]);
    }

    #[test]
    fn test_invoice_id_orders_by_local_wall_clock() {
        // 01:45 emitted first, then the clock falls back and 01:30 is emitted
        let first_pass = InvoiceId::new(TransactionKind::Rent, at(1, 45, 0), 0);
        let repeated_hour = InvoiceId::new(TransactionKind::Rent, at(1, 30, 0), 0);

        let mut ids = vec![first_pass.clone(), repeated_hour.clone()];
        ids.sort();
        assert_eq!(ids, vec![repeated_hour, first_pass]);
    }

    #[rstest]
    #[case::first_in_second(0, "rent_invoice_2026-10-16_10-00-05")]
    #[case::collision(2, "rent_invoice_2026-10-16_10-00-05_2")]
    fn test_invoice_id_display(#[case] seq: u32, #[case] expected: &str) {
        let id = InvoiceId::new(TransactionKind::Rent, at(10, 0, 5), seq);
        assert_eq!(id.to_string(), expected);
        assert_eq!(expected.parse::<InvoiceId>().unwrap(), id);
    }

    #[rstest]
    #[case::not_an_invoice("carstore")]
    #[case::unknown_kind("lease_invoice_2026-10-16_10-00-05")]
    #[case::bad_timestamp("rent_invoice_2026-13-16_10-00-05")]
    #[case::zero_suffix("rent_invoice_2026-10-16_10-00-05_0")]
    #[case::junk_suffix("return_invoice_2026-10-16_10-00-05-copy")]
    fn test_invoice_id_parse_errors(#[case] input: &str) {
        assert!(input.parse::<InvoiceId>().is_err());
    }

    #[test]
    fn test_return_request_has_zero_duration() {
        let request = TransactionRequest::return_car("CAR1", "Alice");
        assert_eq!(request.kind, TransactionKind::Return);
        assert_eq!(request.duration_days, 0);
    }
}
