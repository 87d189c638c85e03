//! Car inventory types for the car rental ledger
//!
//! This module defines the car record kept in the inventory store and its
//! availability status.

use rust_decimal::Decimal;
use std::fmt;

/// Car identifier
///
/// Stable, unique key of a car in the inventory (e.g. `CAR1`).
pub type CarId = String;

/// Availability of a car
///
/// The inventory file stores these as the literal strings `Available`
/// and `Not Available`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarStatus {
    /// The car can be rented
    Available,

    /// The car is currently rented out
    NotAvailable,
}

impl CarStatus {
    /// The literal used for this status in the inventory file
    pub fn as_str(&self) -> &'static str {
        match self {
            CarStatus::Available => "Available",
            CarStatus::NotAvailable => "Not Available",
        }
    }

    /// Parse the inventory file literal into a status
    ///
    /// # Returns
    ///
    /// * `Some(CarStatus)` - For `Available` or `Not Available`
    /// * `None` - For anything else
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Available" => Some(CarStatus::Available),
            "Not Available" => Some(CarStatus::NotAvailable),
            _ => None,
        }
    }
}

impl fmt::Display for CarStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One physical vehicle in the inventory
///
/// Records are created out-of-band (inventory seeding) and only their
/// `status` is ever changed by the ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct CarRecord {
    /// Unique car identifier
    pub id: CarId,

    /// Display brand (e.g. `Toyota`)
    pub brand: String,

    /// Display model (e.g. `Corolla`)
    pub model: String,

    /// Manufacture year, kept verbatim as written in the inventory
    pub year: String,

    /// Price per rental day in NPR
    ///
    /// Always a non-negative whole number.
    pub price_per_day: Decimal,

    /// Current availability
    pub status: CarStatus,
}

impl CarRecord {
    /// Whether the car can currently be rented
    pub fn is_available(&self) -> bool {
        self.status == CarStatus::Available
    }
}
