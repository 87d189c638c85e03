//! I/O module
//!
//! Handles the inventory file format and invoice artifacts.
//!
//! # Components
//!
//! - `csv_format` - Inventory line format (parsing, in-place status updates)
//! - `invoice_format` - Invoice text layout and artifact naming
//! - `sync_reader` - Synchronous invoice reader with iterator interface
//! - `async_reader` - Asynchronous invoice reader with bounded concurrency

pub mod async_reader;
pub mod csv_format;
pub mod invoice_format;
pub mod sync_reader;

pub use async_reader::AsyncReader;
pub use csv_format::{read_inventory, replace_status};
pub use invoice_format::{parse_invoice, render_invoice};
pub use sync_reader::SyncReader;
