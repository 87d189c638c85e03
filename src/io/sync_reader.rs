//! Synchronous invoice reader with iterator interface
//!
//! Lists the invoice artifacts of a directory and yields them parsed, one at
//! a time, in emission order. Delegates format concerns to the
//! invoice_format module.
//!
//! # Ordering
//!
//! Files are discovered with `read_dir`, whose order is platform-defined.
//! The reader sorts them by [`InvoiceId`] (timestamp, then collision suffix)
//! so every replay sees invoices in the order they were emitted.
//!
//! # Error Handling
//!
//! - Directory listing errors are returned from `new()`
//! - Read and parse errors are yielded as Err variants in the iterator;
//!   callers that need an all-or-nothing view stop at the first one

use crate::io::invoice_format::{invoice_id_from_path, parse_invoice};
use crate::types::{InvoiceId, RentalError, StoredInvoice};
use std::fs;
use std::path::{Path, PathBuf};

/// List the invoice artifacts of a directory, sorted by identity
///
/// Files whose names do not follow the invoice naming pattern are ignored.
pub fn list_invoices(dir: &Path) -> Result<Vec<(InvoiceId, PathBuf)>, RentalError> {
    let entries = fs::read_dir(dir).map_err(|e| RentalError::IoError {
        message: format!("Failed to list invoices in '{}': {}", dir.display(), e),
    })?;

    let mut invoices = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if let Some(id) = invoice_id_from_path(&path) {
            invoices.push((id, path));
        }
    }
    invoices.sort_by(|a, b| a.0.cmp(&b.0));

    Ok(invoices)
}

/// Parse the text of one artifact, naming the file in any error
pub fn load_invoice(id: InvoiceId, path: PathBuf, text: &str) -> Result<StoredInvoice, RentalError> {
    match parse_invoice(text) {
        Ok(record) => Ok(StoredInvoice { id, path, record }),
        Err(RentalError::ParseError { line, message }) => Err(RentalError::ParseError {
            line,
            message: format!("{}: {}", path.display(), message),
        }),
        Err(e) => Err(e),
    }
}

/// Read an artifact's raw text
pub fn read_invoice_text(path: &Path) -> Result<String, RentalError> {
    fs::read_to_string(path).map_err(|e| RentalError::IoError {
        message: format!("Failed to read invoice '{}': {}", path.display(), e),
    })
}

/// Synchronous invoice reader
///
/// # Examples
///
/// ```no_run
/// use car_rental_ledger::io::sync_reader::SyncReader;
/// use std::path::Path;
///
/// let reader = SyncReader::new(Path::new(".")).unwrap();
/// for result in reader {
///     match result {
///         Ok(invoice) => println!("{}: {}", invoice.id, invoice.record.customer_name),
///         Err(e) => eprintln!("Error: {}", e),
///     }
/// }
/// ```
#[derive(Debug)]
pub struct SyncReader {
    pending: std::vec::IntoIter<(InvoiceId, PathBuf)>,
}

impl SyncReader {
    /// Create a new SyncReader over the invoices of a directory
    ///
    /// # Returns
    ///
    /// * `Ok(SyncReader)` if the directory could be listed
    /// * `Err(RentalError::IoError)` otherwise
    pub fn new(dir: &Path) -> Result<Self, RentalError> {
        Ok(Self {
            pending: list_invoices(dir)?.into_iter(),
        })
    }
}

impl Iterator for SyncReader {
    type Item = Result<StoredInvoice, RentalError>;

    fn next(&mut self) -> Option<Self::Item> {
        let (id, path) = self.pending.next()?;
        Some(read_invoice_text(&path).and_then(|text| load_invoice(id, path, &text)))
    }
}
