//! Car Rental Ledger CLI
//!
//! Operator front end for renting and returning cars.
//!
//! # Usage
//!
//! ```bash
//! cargo run                                    # interactive menu
//! cargo run -- list
//! cargo run -- rent CAR1 3 Alice
//! cargo run -- return CAR1 Alice
//! cargo run -- --scan-strategy async --max-concurrent 8 report
//! ```
//!
//! Without a subcommand the program shows the interactive menu on
//! stdin/stdout. Diagnostics go to the log file, not the terminal.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (inventory unreadable, car not found, invoice write failed, etc.)
//! - 130: Interrupted with Ctrl-C

use car_rental_ledger::cli::{self, Menu, Session};
use car_rental_ledger::logging;
use car_rental_ledger::types::RentalError;
use std::io;
use std::process::{self, ExitCode};
use std::thread;
use tracing::{error, info, warn};

/// Exit cleanly on Ctrl-C while the menu is blocked on input
fn spawn_interrupt_handler() {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            warn!(error = %e, "Could not install Ctrl-C handler");
            return;
        }
    };

    thread::spawn(move || {
        if runtime.block_on(tokio::signal::ctrl_c()).is_ok() {
            println!("\nExiting...");
            info!("Exiting the Car Rental System");
            process::exit(130);
        }
    });
}

fn main() -> ExitCode {
    // Parse command-line arguments using clap
    let args = cli::parse_args();

    if let Err(e) = logging::init(&args.log_file) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let mut session = Session::from_args(&args);

    let result = match &args.command {
        Some(command) => {
            let mut output = io::stdout();
            session.run_command(command, &mut output)
        }
        None => {
            spawn_interrupt_handler();
            let stdin = io::stdin();
            let mut menu = Menu::new(stdin.lock(), io::stdout());
            menu.run(&mut session).map_err(|e| {
                error!(error = %e, "Terminal I/O failed");
                RentalError::from(e)
            })
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.operator_message());
            ExitCode::FAILURE
        }
    }
}
