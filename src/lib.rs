//! Car Rental Ledger Library
//! # Overview
//!
//! This library keeps a flat-file car inventory and a directory of invoice
//! artifacts. Renting or returning a car flips its status in the inventory
//! and writes one invoice; the invoices alone are enough to rebuild who
//! currently holds which car.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (CarRecord, InvoiceRecord, RentalError, etc.)
//! - [`cli`] - CLI arguments, operator session and interactive menu
//! - [`core`] - Business logic components:
//!   - [`core::engine`] - Rent/return transaction orchestration
//!   - [`core::record_store`] - File-backed inventory with atomic rewrites
//!   - [`core::invoice_emitter`] - Collision-free invoice artifacts
//!   - [`core::assignments`] - Rental assignments replayed from invoices
//! - [`io`] - Inventory and invoice formats, invoice readers
//! - [`strategy`] - Pluggable invoice scan strategies (sync and async)
//! - [`logging`] - Append-only diagnostic log
//!
//! # Inventory Format
//!
//! One car per line, six fields separated by `", "`:
//!
//! ```text
//! CAR1, Toyota, Corolla, 2020, 50, Available
//! CAR2, Honda, Civic, 2019, 45, Not Available
//! ```

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod logging;
pub mod strategy;
pub mod types;

pub use core::{
    Assignments, FileInvoiceEmitter, FileRecordStore, InvoiceReporter, PricingPolicy,
    RentalEngine, ReturnPricing,
};
pub use types::{
    CarId, CarRecord, CarStatus, InvoiceId, InvoiceRecord, RentalError, StoredInvoice,
    TransactionKind, TransactionRequest,
};
