//! Core traits for inventory storage, invoice emission and time
//!
//! These seams let the rental engine run against the file-backed
//! implementations in production and against test doubles in unit tests.

use crate::types::{CarRecord, CarStatus, InvoiceRecord, RentalError, StoredInvoice};
use chrono::NaiveDateTime;

/// Trait for the car inventory table
///
/// Implementations are not indexed: lookups scan the full record list.
pub trait RecordStore {
    /// Read every car record, in stored order
    ///
    /// Either the complete list is returned or an error is; never a prefix.
    fn list_all(&self) -> Result<Vec<CarRecord>, RentalError>;

    /// Replace the status of one car, keeping every other record untouched
    ///
    /// An unknown `car_id` leaves the store unchanged and is not an error;
    /// callers validate existence first.
    fn set_status(&mut self, car_id: &str, status: CarStatus) -> Result<(), RentalError>;
}

/// Trait for writing invoice artifacts
pub trait InvoiceEmitter {
    /// Persist a completed transaction as a new, uniquely named artifact
    ///
    /// Never overwrites an existing artifact.
    fn emit(&mut self, invoice: &InvoiceRecord) -> Result<StoredInvoice, RentalError>;
}

/// Source of wall-clock time
pub trait Clock {
    /// Current local time
    fn now(&self) -> NaiveDateTime;
}

/// Clock backed by the system's local time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}
