//! Core business logic module
//!
//! This module contains the rental transaction components:
//! - `traits` - Seams for the inventory store, invoice emitter and clock
//! - `record_store` - File-backed car inventory
//! - `invoice_emitter` - Invoice artifact writer
//! - `pricing` - Total amount computation and return pricing policy
//! - `engine` - Rent/return transaction orchestration
//! - `assignments` - Rental assignments rebuilt from invoice history

pub mod assignments;
pub mod engine;
pub mod invoice_emitter;
pub mod pricing;
pub mod record_store;
pub mod traits;

pub use assignments::{Assignment, Assignments, InvoiceReporter};
pub use engine::RentalEngine;
pub use invoice_emitter::FileInvoiceEmitter;
pub use pricing::{PricingPolicy, ReturnPricing};
pub use record_store::FileRecordStore;
pub use traits::{Clock, InvoiceEmitter, RecordStore, SystemClock};
