//! Operator session
//!
//! Wires the file-backed store, invoice emitter and reporter together from
//! the CLI configuration, and implements the operations offered to the
//! operator. Each operation writes its result to the given output and logs
//! its own failures; callers only show [`RentalError::operator_message`].

use crate::cli::args::{CliArgs, Command};
use crate::core::{
    Assignments, FileInvoiceEmitter, FileRecordStore, InvoiceReporter, PricingPolicy,
    RentalEngine,
};
use crate::io::sync_reader::{list_invoices, read_invoice_text};
use crate::strategy::{create_strategy, ScanStrategy};
use crate::types::{CarRecord, InvoiceId, RentalError, StoredInvoice, TransactionKind, TransactionRequest};
use std::io::Write;
use std::path::{Path, PathBuf};
use tabled::builder::Builder;
use tabled::settings::Style;
use tracing::{error, info, warn};

/// One operator's view of the ledger
#[derive(Debug)]
pub struct Session {
    engine: RentalEngine<FileRecordStore, FileInvoiceEmitter>,
    reporter: InvoiceReporter,
}

impl Session {
    /// Create a session over an inventory file and an invoice directory
    pub fn new(
        inventory: impl Into<PathBuf>,
        invoice_dir: impl Into<PathBuf>,
        pricing: PricingPolicy,
        strategy: Box<dyn ScanStrategy>,
    ) -> Self {
        let invoice_dir = invoice_dir.into();
        let engine = RentalEngine::new(
            FileRecordStore::new(inventory),
            FileInvoiceEmitter::new(invoice_dir.clone()),
        )
        .with_pricing(pricing);

        Session {
            engine,
            reporter: InvoiceReporter::new(invoice_dir, strategy),
        }
    }

    /// Create a session from parsed command-line arguments
    pub fn from_args(args: &CliArgs) -> Self {
        let config = Some(args.to_scan_config());
        Self::new(
            args.inventory.clone(),
            args.invoice_dir.clone(),
            PricingPolicy::new(args.return_pricing),
            create_strategy(args.scan_strategy.clone(), config),
        )
    }

    /// Directory holding the invoice artifacts
    pub fn invoice_dir(&self) -> &Path {
        self.reporter.dir()
    }

    /// Print every car with its status
    pub fn show_cars(&self, output: &mut dyn Write) -> Result<(), RentalError> {
        let cars = self
            .engine
            .cars()
            .inspect_err(|e| error!(error = %e, "Error displaying available cars"))?;

        writeln!(output, "{}", cars_table(&cars))?;
        info!(count = cars.len(), "Displayed available cars");
        Ok(())
    }

    /// Run a rent or return request and print the outcome
    ///
    /// Succeeds once the invoice is written, even if the confirmation line
    /// cannot be printed.
    pub fn transact(
        &mut self,
        request: &TransactionRequest,
        output: &mut dyn Write,
    ) -> Result<StoredInvoice, RentalError> {
        let stored = self.engine.execute(request)?;

        let verb = match request.kind {
            TransactionKind::Rent => "rented to",
            TransactionKind::Return => "returned by",
        };
        // The transaction is complete; a failed confirmation is only logged
        if let Err(e) = writeln!(
            output,
            "Success: Car {} has been {} {}. Invoice generated: {}",
            request.car_id,
            verb,
            request.customer_name,
            stored.path.display()
        ) {
            warn!(invoice_id = %stored.id, error = %e, "Could not print transaction confirmation");
        }
        Ok(stored)
    }

    /// Generated invoices, oldest first
    pub fn invoices(&self) -> Result<Vec<(InvoiceId, PathBuf)>, RentalError> {
        list_invoices(self.invoice_dir())
            .inspect_err(|e| error!(error = %e, "Error viewing invoices"))
    }

    /// Print the numbered list of generated invoices
    ///
    /// Returns the listed invoices so the caller can offer a selection.
    pub fn show_invoices(
        &self,
        output: &mut dyn Write,
    ) -> Result<Vec<(InvoiceId, PathBuf)>, RentalError> {
        let invoices = self.invoices()?;

        writeln!(output, "\nList of Generated Invoices:")?;
        if invoices.is_empty() {
            writeln!(output, "No invoices found.")?;
        }
        for (number, (id, _)) in invoices.iter().enumerate() {
            writeln!(output, "{}. {}", number + 1, id)?;
        }
        info!(count = invoices.len(), "Listed invoices");
        Ok(invoices)
    }

    /// Print the raw content of one invoice
    pub fn show_invoice(&self, path: &Path, output: &mut dyn Write) -> Result<(), RentalError> {
        let text = read_invoice_text(path)
            .inspect_err(|e| error!(error = %e, "Error viewing invoices"))?;

        writeln!(output, "\nInvoice Content:")?;
        write!(output, "{}", text)?;
        info!(invoice = %path.display(), "Displayed invoice");
        Ok(())
    }

    /// Rebuild the rental assignments from the invoices
    pub fn assignments(&self) -> Result<Assignments, RentalError> {
        self.reporter.rebuild_assignments().inspect_err(|e| {
            error!(error = %e, "Error retrieving rental information from invoices")
        })
    }

    /// Print who holds each car according to the invoices
    pub fn show_report(&self, output: &mut dyn Write) -> Result<(), RentalError> {
        let assignments = self.assignments()?;

        if assignments.is_empty() {
            writeln!(output, "No rental information found in invoices.")?;
            return Ok(());
        }

        writeln!(output, "\nRental Information from Invoices:")?;
        for (car_id, assignment) in assignments.iter() {
            writeln!(
                output,
                "Car ID: {}, Rented by: {}, Transaction Type: {}",
                car_id, assignment.customer_name, assignment.kind
            )?;
        }
        Ok(())
    }

    /// Run one non-interactive command
    pub fn run_command(
        &mut self,
        command: &Command,
        output: &mut dyn Write,
    ) -> Result<(), RentalError> {
        match command {
            Command::List => self.show_cars(output),
            Command::Rent {
                car_id,
                days,
                customer,
            } => self
                .transact(&TransactionRequest::rent(car_id.as_str(), *days, customer.as_str()), output)
                .map(|_| ()),
            Command::Return { car_id, customer } => self
                .transact(&TransactionRequest::return_car(car_id.as_str(), customer.as_str()), output)
                .map(|_| ()),
            Command::Invoices => self.show_invoices(output).map(|_| ()),
            Command::Report => self.show_report(output),
        }
    }
}

/// Render the inventory as a table
pub fn cars_table(cars: &[CarRecord]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Car ID", "Brand", "Model", "Manufactured Year", "Price/Day", "Status"]);
    for car in cars {
        builder.push_record([
            car.id.clone(),
            car.brand.clone(),
            car.model.clone(),
            car.year.clone(),
            car.price_per_day.to_string(),
            car.status.to_string(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::psql());
    table.to_string()
}
