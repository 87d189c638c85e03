//! Asynchronous invoice reader
//!
//! Reads every invoice artifact of a directory with `tokio::fs`, keeping up
//! to `max_concurrent` reads in flight.
//!
//! # Architecture
//!
//! ```text
//! list_invoices (sorted ids) → buffered tokio::fs reads → parse → Vec<StoredInvoice>
//!                                                          ↓
//!                                                 invoice_format module
//! ```
//!
//! `buffered` yields results in input order, so the output keeps the
//! emission order established by `list_invoices` no matter which read
//! finishes first. The first failure (in that order) aborts the whole read.

use crate::io::sync_reader::{list_invoices, load_invoice};
use crate::types::{RentalError, StoredInvoice};
use futures::stream::{self, StreamExt, TryStreamExt};
use std::path::{Path, PathBuf};

/// Asynchronous invoice reader
#[derive(Debug, Clone)]
pub struct AsyncReader {
    dir: PathBuf,
    max_concurrent: usize,
}

impl AsyncReader {
    /// Create a new AsyncReader over the invoices of a directory
    ///
    /// A `max_concurrent` of zero is treated as one.
    pub fn new(dir: &Path, max_concurrent: usize) -> Self {
        Self {
            dir: dir.to_path_buf(),
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Read and parse every invoice, in emission order
    pub async fn read_all(&self) -> Result<Vec<StoredInvoice>, RentalError> {
        let listing = {
            let dir = self.dir.clone();
            tokio::task::spawn_blocking(move || list_invoices(&dir))
                .await
                .map_err(|e| RentalError::IoError {
                    message: format!("Invoice listing task failed: {}", e),
                })??
        };

        stream::iter(listing)
            .map(|(id, path)| async move {
                let text = tokio::fs::read_to_string(&path)
                    .await
                    .map_err(|e| RentalError::IoError {
                        message: format!("Failed to read invoice '{}': {}", path.display(), e),
                    })?;
                load_invoice(id, path, &text)
            })
            .buffered(self.max_concurrent)
            .try_collect()
            .await
    }
}
