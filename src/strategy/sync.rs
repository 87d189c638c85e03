//! Synchronous scan strategy
//!
//! Reads invoice artifacts one after another on the calling thread through
//! the `SyncReader` iterator.

use crate::io::sync_reader::SyncReader;
use crate::strategy::ScanStrategy;
use crate::types::{RentalError, StoredInvoice};
use std::path::Path;

/// Synchronous scan strategy
///
/// # Examples
///
/// ```no_run
/// use car_rental_ledger::strategy::{ScanStrategy, SyncScanStrategy};
/// use std::path::Path;
///
/// let invoices = SyncScanStrategy.scan(Path::new(".")).expect("Scan failed");
/// println!("{} invoices", invoices.len());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SyncScanStrategy;

impl ScanStrategy for SyncScanStrategy {
    fn scan(&self, dir: &Path) -> Result<Vec<StoredInvoice>, RentalError> {
        SyncReader::new(dir)?.collect()
    }
}
