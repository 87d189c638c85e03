use crate::core::ReturnPricing;
use crate::strategy::ScanConfig;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Car rental ledger: rent and return cars, keep invoices
#[derive(Parser, Debug)]
#[command(name = "car-rental")]
#[command(about = "Rent and return cars from a flat-file inventory", long_about = None)]
pub struct CliArgs {
    /// Inventory file with one car per line
    #[arg(
        long = "inventory",
        value_name = "PATH",
        default_value = "carstore.txt",
        help = "Path to the car inventory file"
    )]
    pub inventory: PathBuf,

    /// Directory invoices are written to and read from
    #[arg(
        long = "invoice-dir",
        value_name = "DIR",
        default_value = ".",
        help = "Directory holding invoice files"
    )]
    pub invoice_dir: PathBuf,

    /// Append-only diagnostic log
    #[arg(
        long = "log-file",
        value_name = "PATH",
        default_value = "car_rental_system.log",
        help = "Path to the diagnostic log file"
    )]
    pub log_file: PathBuf,

    /// How return transactions are priced
    #[arg(
        long = "return-pricing",
        value_name = "POLICY",
        default_value = "day-rate",
        help = "Return pricing: 'day-rate' charges price/day x duration, 'no-charge' charges nothing"
    )]
    pub return_pricing: ReturnPricing,

    /// Strategy used to read invoices for the rental report
    #[arg(
        long = "scan-strategy",
        value_name = "STRATEGY",
        default_value = "sync",
        help = "Invoice scan strategy: 'sync' or 'async'"
    )]
    pub scan_strategy: StrategyType,

    /// Maximum number of concurrent invoice reads (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Maximum number of invoice reads in flight (default: CPU cores)"
    )]
    pub max_concurrent: Option<usize>,

    /// Run a single operation instead of the interactive menu
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available invoice scan strategies
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

/// Non-interactive operations
#[derive(Subcommand, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Display every car and its status
    List,

    /// Rent a car
    Rent {
        /// Car to rent
        car_id: String,
        /// Rental duration in days
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        days: u32,
        /// Customer renting the car
        customer: String,
    },

    /// Return a car
    Return {
        /// Car to return
        car_id: String,
        /// Customer returning the car
        customer: String,
    },

    /// List generated invoices
    Invoices,

    /// Show who holds each car according to the invoices
    Report,
}

impl CliArgs {
    /// Create a ScanConfig from CLI arguments
    ///
    /// Falls back to the default (one read per CPU core) when
    /// `--max-concurrent` is absent or zero.
    pub fn to_scan_config(&self) -> ScanConfig {
        match self.max_concurrent {
            Some(max_concurrent) => ScanConfig::new(max_concurrent),
            None => ScanConfig::default(),
        }
    }
}
