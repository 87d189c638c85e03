//! Rental assignments derived from invoice history
//!
//! This module provides the Assignments view ("who currently holds which
//! car") and the InvoiceReporter that rebuilds it by replaying every emitted
//! invoice. The view is independent of the live inventory; the two can
//! disagree if an invoice write failed after an inventory update.
//!
//! # Replay Rule
//!
//! - A rent invoice always replaces the entry for its car
//! - A return invoice is recorded only if the car has no entry yet; it never
//!   overwrites an existing one

use crate::strategy::ScanStrategy;
use crate::types::{CarId, InvoiceRecord, RentalError, TransactionKind};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;

/// Last known holder of a car
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// Customer named on the invoice that set this entry
    pub customer_name: String,

    /// Kind of that invoice
    pub kind: TransactionKind,
}

/// Car ID to assignment mapping, ordered by car ID
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignments {
    entries: BTreeMap<CarId, Assignment>,
}

impl Assignments {
    /// Create an empty view
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one invoice into the view
    pub fn apply(&mut self, invoice: &InvoiceRecord) {
        let assignment = Assignment {
            customer_name: invoice.customer_name.clone(),
            kind: invoice.kind,
        };

        match invoice.kind {
            TransactionKind::Rent => {
                self.entries.insert(invoice.car_id.clone(), assignment);
            }
            TransactionKind::Return => {
                self.entries
                    .entry(invoice.car_id.clone())
                    .or_insert(assignment);
            }
        }
    }

    /// Assignment for a car, if any invoice mentions it
    pub fn get(&self, car_id: &str) -> Option<&Assignment> {
        self.entries.get(car_id)
    }

    /// Iterate over all entries in car ID order
    pub fn iter(&self) -> impl Iterator<Item = (&CarId, &Assignment)> {
        self.entries.iter()
    }

    /// Number of cars with an entry
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no invoice has been replayed
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> FromIterator<&'a InvoiceRecord> for Assignments {
    fn from_iter<I: IntoIterator<Item = &'a InvoiceRecord>>(iter: I) -> Self {
        let mut assignments = Assignments::new();
        for invoice in iter {
            assignments.apply(invoice);
        }
        assignments
    }
}

/// Rebuilds assignments from the artifacts in an invoice directory
pub struct InvoiceReporter {
    dir: PathBuf,
    strategy: Box<dyn ScanStrategy>,
}

impl InvoiceReporter {
    /// Create a reporter over `dir` using the given scan strategy
    pub fn new(dir: impl Into<PathBuf>, strategy: Box<dyn ScanStrategy>) -> Self {
        InvoiceReporter {
            dir: dir.into(),
            strategy,
        }
    }

    /// Invoice directory being scanned
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Replay every invoice, in emission order, into a fresh view
    ///
    /// Fails on the first unreadable or malformed artifact.
    pub fn rebuild_assignments(&self) -> Result<Assignments, RentalError> {
        let invoices = self.strategy.scan(&self.dir)?;
        let assignments: Assignments = invoices.iter().map(|stored| &stored.record).collect();

        info!(
            invoices = invoices.len(),
            cars = assignments.len(),
            "Rebuilt rental information from invoices"
        );
        Ok(assignments)
    }
}

impl std::fmt::Debug for InvoiceReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvoiceReporter")
            .field("dir", &self.dir)
            .finish_non_exhaustive()
    }
}
