//! Invoice artifact emission
//!
//! This module provides the FileInvoiceEmitter that writes one text artifact
//! per completed transaction into an invoice directory.
//!
//! # Identity
//!
//! The artifact name is `{kind}_invoice_{YYYY-MM-DD_HH-MM-SS}.txt`, taken from
//! the emitter's clock at one-second resolution. The body is first written
//! and synced to a hidden temporary file in the invoice directory, then
//! published under its name without replacing an existing file; if the name
//! is already taken (two transactions of the same kind within one second)
//! the emitter retries with `_1`, `_2`, ... until a free name is found.
//!
//! A failed write never leaves a partial artifact under an invoice name.

use crate::core::traits::{Clock, InvoiceEmitter, SystemClock};
use crate::io::invoice_format::{invoice_file_name, render_invoice};
use crate::types::{InvoiceId, InvoiceRecord, RentalError, StoredInvoice};
use std::fs::File;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Upper bound on collision suffixes tried for a single second
const MAX_SEQ: u32 = 10_000;

/// Writes invoice artifacts into a directory
#[derive(Debug, Clone)]
pub struct FileInvoiceEmitter<C: Clock = SystemClock> {
    dir: PathBuf,
    clock: C,
}

impl FileInvoiceEmitter<SystemClock> {
    /// Create an emitter writing into `dir`, named after the system clock
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_clock(dir, SystemClock)
    }
}

impl<C: Clock> FileInvoiceEmitter<C> {
    /// Create an emitter with an explicit clock
    pub fn with_clock(dir: impl Into<PathBuf>, clock: C) -> Self {
        FileInvoiceEmitter {
            dir: dir.into(),
            clock,
        }
    }

    /// Directory the artifacts are written to
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn io_error(&self, path: &Path, e: io::Error) -> RentalError {
        RentalError::IoError {
            message: format!("Failed to write invoice '{}': {}", path.display(), e),
        }
    }
}

/// Fill a temporary file in `dir`
///
/// The file is deleted when dropped, so nothing is left behind if `fill`
/// fails.
fn stage(
    dir: &Path,
    fill: impl FnOnce(&mut File) -> io::Result<()>,
) -> io::Result<NamedTempFile> {
    let mut temp = NamedTempFile::new_in(dir)?;
    fill(temp.as_file_mut())?;
    Ok(temp)
}

impl<C: Clock> InvoiceEmitter for FileInvoiceEmitter<C> {
    fn emit(&mut self, invoice: &InvoiceRecord) -> Result<StoredInvoice, RentalError> {
        let base = InvoiceId::new(invoice.kind, self.clock.now(), 0);
        let body = render_invoice(invoice);

        let mut staged = stage(&self.dir, |file| {
            file.write_all(body.as_bytes())?;
            file.sync_all()
        })
        .map_err(|e| self.io_error(&self.dir, e))?;

        for seq in 0..=MAX_SEQ {
            let id = base.with_seq(seq);
            let path = self.dir.join(invoice_file_name(&id));

            match staged.persist_noclobber(&path) {
                Ok(_) => {
                    info!(invoice_id = %id, "Generated {} invoice", invoice.kind);
                    return Ok(StoredInvoice {
                        id,
                        path,
                        record: invoice.clone(),
                    });
                }
                Err(e) if e.error.kind() == ErrorKind::AlreadyExists => {
                    debug!(invoice_id = %id, "Invoice name taken, trying next suffix");
                    staged = e.file;
                }
                Err(e) => return Err(self.io_error(&path, e.error)),
            }
        }

        Err(RentalError::IoError {
            message: format!("No free invoice name left for {}", base),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::invoice_format::parse_invoice;
    use crate::types::TransactionKind;
    use chrono::{NaiveDate, NaiveDateTime};
    use rust_decimal::Decimal;
    use std::fs;
    use tempfile::TempDir;

    /// Clock frozen at one instant
    #[derive(Debug, Clone, Copy)]
    struct FixedClock(NaiveDateTime);

    impl Clock for FixedClock {
        fn now(&self) -> NaiveDateTime {
            self.0
        }
    }

    fn frozen() -> FixedClock {
        FixedClock(
            NaiveDate::from_ymd_opt(2026, 10, 16)
                .unwrap()
                .and_hms_milli_opt(10, 22, 5, 700)
                .unwrap(),
        )
    }

    fn invoice(kind: TransactionKind, customer: &str) -> InvoiceRecord {
        InvoiceRecord {
            kind,
            car_id: "CAR1".to_string(),
            brand: "Toyota".to_string(),
            model: "Corolla".to_string(),
            year: "2020".to_string(),
            price_per_day: Decimal::from(50),
            customer_name: customer.to_string(),
            timestamp: frozen().0,
            duration_days: 3,
            total_amount: Decimal::from(150),
        }
    }

    #[test]
    fn test_emit_writes_named_artifact() {
        let dir = TempDir::new().unwrap();
        let mut emitter = FileInvoiceEmitter::with_clock(dir.path(), frozen());

        let stored = emitter.emit(&invoice(TransactionKind::Rent, "Alice")).unwrap();

        assert_eq!(stored.id.to_string(), "rent_invoice_2026-10-16_10-22-05");
        assert_eq!(
            stored.path,
            dir.path().join("rent_invoice_2026-10-16_10-22-05.txt")
        );
        let text = fs::read_to_string(&stored.path).unwrap();
        assert_eq!(parse_invoice(&text).unwrap(), stored.record);
    }

    #[test]
    fn test_emit_same_second_never_overwrites() {
        let dir = TempDir::new().unwrap();
        let mut emitter = FileInvoiceEmitter::with_clock(dir.path(), frozen());

        let first = emitter.emit(&invoice(TransactionKind::Rent, "Alice")).unwrap();
        let second = emitter.emit(&invoice(TransactionKind::Rent, "Bob")).unwrap();
        let third = emitter.emit(&invoice(TransactionKind::Rent, "Carol")).unwrap();

        assert_eq!(second.id.to_string(), "rent_invoice_2026-10-16_10-22-05_1");
        assert_eq!(third.id.to_string(), "rent_invoice_2026-10-16_10-22-05_2");
        assert!(first.id < second.id && second.id < third.id);

        let first_text = fs::read_to_string(&first.path).unwrap();
        assert!(first_text.contains("Customer Name: Alice"));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 3);
    }

    #[test]
    fn test_emit_keeps_existing_file_under_taken_name() {
        let dir = TempDir::new().unwrap();
        let taken = dir.path().join("rent_invoice_2026-10-16_10-22-05.txt");
        fs::write(&taken, "not ours").unwrap();
        let mut emitter = FileInvoiceEmitter::with_clock(dir.path(), frozen());

        let stored = emitter.emit(&invoice(TransactionKind::Rent, "Alice")).unwrap();

        assert_eq!(stored.id.seq, 1);
        assert_eq!(fs::read_to_string(&taken).unwrap(), "not ours");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_failed_write_leaves_no_artifact() {
        let dir = TempDir::new().unwrap();

        let result = stage(dir.path(), |file| {
            file.write_all(b"Rent Invoice\nCar ID: CAR1\n")?;
            Err(io::Error::new(ErrorKind::Other, "no space left on device"))
        });

        assert!(result.is_err());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_emit_different_kinds_do_not_collide() {
        let dir = TempDir::new().unwrap();
        let mut emitter = FileInvoiceEmitter::with_clock(dir.path(), frozen());

        let rent = emitter.emit(&invoice(TransactionKind::Rent, "Alice")).unwrap();
        let ret = emitter.emit(&invoice(TransactionKind::Return, "Alice")).unwrap();

        assert_eq!(rent.id.seq, 0);
        assert_eq!(ret.id.seq, 0);
        assert_eq!(ret.id.to_string(), "return_invoice_2026-10-16_10-22-05");
    }

    #[test]
    fn test_emit_missing_directory_is_io_error() {
        let dir = TempDir::new().unwrap();
        let mut emitter = FileInvoiceEmitter::with_clock(dir.path().join("missing"), frozen());

        let result = emitter.emit(&invoice(TransactionKind::Rent, "Alice"));
        assert!(matches!(result, Err(RentalError::IoError { .. })));
    }
}
