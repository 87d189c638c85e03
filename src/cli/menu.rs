//! Interactive operator menu
//!
//! Reads choices line by line from any `BufRead` and writes prompts and
//! results to any `Write`, so the loop runs the same against a terminal or
//! an in-memory script. End of input behaves like the Exit choice.

use crate::cli::session::Session;
use crate::types::{RentalError, TransactionKind, TransactionRequest};
use std::io::{self, BufRead, Write};
use tracing::{error, info};

const MENU: &str = "
Car Rental System
1. Display Available Cars
2. Rent Car
3. Return Car
4. View Invoices
5. Quick View Rented Cars info.
6. Exit";

/// Interactive menu loop
#[derive(Debug)]
pub struct Menu<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    /// Create a menu reading from `input` and writing to `output`
    pub fn new(input: R, output: W) -> Self {
        Menu { input, output }
    }

    /// Consume the menu, returning its output
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run until the operator exits or input ends
    ///
    /// Operation failures are reported to the operator and the loop goes
    /// on; only a failure to read input or write output ends it early.
    pub fn run(&mut self, session: &mut Session) -> io::Result<()> {
        loop {
            writeln!(self.output, "{}", MENU)?;
            let Some(choice) = self.prompt("Enter your choice: ")? else {
                break;
            };

            match choice.as_str() {
                "1" => {
                    writeln!(self.output, "\nAvailable Cars:")?;
                    let result = session.show_cars(&mut self.output);
                    self.report(result)?;
                }
                "2" => self.transaction(session, TransactionKind::Rent)?,
                "3" => self.transaction(session, TransactionKind::Return)?,
                "4" => self.view_invoices(session)?,
                "5" => {
                    let result = session.show_report(&mut self.output);
                    self.report(result)?;
                }
                "6" => break,
                _ => {
                    writeln!(
                        self.output,
                        "Error: Invalid choice. Please enter a valid option."
                    )?;
                    error!(choice = %choice, "Invalid choice entered");
                }
            }
        }

        writeln!(self.output, "\nExiting...")?;
        info!("Exiting the Car Rental System");
        Ok(())
    }

    /// Prompt for one line of input
    ///
    /// Returns `None` at end of input; the line is trimmed otherwise.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Show the operator message for a failed operation
    fn report<T>(&mut self, result: Result<T, RentalError>) -> io::Result<()> {
        if let Err(e) = result {
            writeln!(self.output, "{}", e.operator_message())?;
        }
        Ok(())
    }

    fn transaction(&mut self, session: &mut Session, kind: TransactionKind) -> io::Result<()> {
        let Some(request) = self.read_request(kind)? else {
            return Ok(());
        };

        let request = match request {
            Ok(request) => request,
            Err(e) => {
                error!(kind = %kind, error = %e, "Rejected transaction input");
                return self.report::<()>(Err(e));
            }
        };

        let result = session.transact(&request, &mut self.output);
        self.report(result)
    }

    /// Collect a transaction request from the operator
    ///
    /// Returns `None` if input ends midway.
    fn read_request(
        &mut self,
        kind: TransactionKind,
    ) -> io::Result<Option<Result<TransactionRequest, RentalError>>> {
        let Some(car_id) = self.prompt(&format!("Enter Car ID to {}: ", kind))? else {
            return Ok(None);
        };

        let duration = match kind {
            TransactionKind::Rent => {
                let Some(raw) = self.prompt("Enter duration of rent (in days): ")? else {
                    return Ok(None);
                };
                match raw.parse::<u32>() {
                    Ok(days) if days > 0 => Ok(days),
                    _ => Err(RentalError::invalid_input(format!(
                        "Duration must be a positive whole number of days, got '{}'",
                        raw
                    ))),
                }
            }
            TransactionKind::Return => Ok(0),
        };

        let Some(customer_name) = self.prompt("Enter customer name: ")? else {
            return Ok(None);
        };

        // Names are validated by the engine
        let request = duration.map(|duration_days| TransactionRequest {
            kind,
            car_id,
            duration_days,
            customer_name,
        });

        Ok(Some(request))
    }

    fn view_invoices(&mut self, session: &Session) -> io::Result<()> {
        let invoices = match session.show_invoices(&mut self.output) {
            Ok(invoices) => invoices,
            Err(e) => return self.report::<()>(Err(e)),
        };
        if invoices.is_empty() {
            return Ok(());
        }

        let Some(choice) = self.prompt(
            "Enter the number of the invoice to view its content, or enter '0' to return to the main menu: ",
        )?
        else {
            return Ok(());
        };

        match choice.parse::<usize>() {
            Ok(0) => Ok(()),
            Ok(number) => match invoices.get(number - 1) {
                Some((_, path)) => {
                    let result = session.show_invoice(path, &mut self.output);
                    self.report(result)
                }
                None => writeln!(self.output, "Invalid choice."),
            },
            Err(_) => writeln!(self.output, "Invalid input."),
        }
    }
}
