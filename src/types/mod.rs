//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `car`: Car inventory records and availability
//! - `invoice`: Transaction requests, invoice records and identities
//! - `error`: Error types for the rental ledger

pub mod car;
pub mod error;
pub mod invoice;

pub use car::{CarId, CarRecord, CarStatus};
pub use error::RentalError;
pub use invoice::{
    InvoiceId, InvoiceRecord, StoredInvoice, TransactionKind, TransactionRequest,
};
