//! Error types for the car rental ledger
//!
//! This module defines all error types that can occur while reading the
//! inventory, running a rent/return transaction, or emitting and scanning
//! invoices.
//!
//! # Error Categories
//!
//! - **Store Errors**: Inventory file missing, unreadable or unwritable
//! - **Transaction Errors**: Unknown car, car already rented, price overflow
//! - **Invoice Errors**: Invoice write or invoice directory scan failures
//! - **Parse Errors**: Malformed inventory lines or invoice artifacts
//!
//! Every variant carries the underlying cause for the diagnostic log; the
//! text shown to the operator comes from [`RentalError::operator_message`],
//! which never leaks paths or OS error details.

use thiserror::Error;

/// Main error type for the rental ledger
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RentalError {
    /// Inventory file is missing, unreadable or unwritable
    ///
    /// Aborts the current operation; nothing is written.
    #[error("Inventory store unavailable at {path}: {message}")]
    StoreUnavailable {
        /// Path of the inventory file
        path: String,
        /// Description of the underlying I/O failure
        message: String,
    },

    /// No inventory record exists for the requested car
    #[error("Car {car_id} not found")]
    CarNotFound {
        /// The car ID that was not found
        car_id: String,
    },

    /// Rent requested for a car that is already rented out
    #[error("Car {car_id} is currently not available for rent")]
    CarUnavailable {
        /// The car ID that is not available
        car_id: String,
    },

    /// Invoice artifact write or invoice directory scan failed
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// Malformed inventory line or invoice artifact
    ///
    /// The whole read fails; malformed lines are never skipped.
    #[error("Parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// Total amount does not fit in the price representation
    #[error("Arithmetic overflow pricing {days} days of car {car_id}")]
    ArithmeticOverflow {
        /// Car being priced
        car_id: String,
        /// Requested duration
        days: u32,
    },

    /// Operator input rejected before reaching the ledger
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Description of what was wrong with the input
        message: String,
    },
}

// Conversion from io::Error to RentalError
impl From<std::io::Error> for RentalError {
    fn from(error: std::io::Error) -> Self {
        RentalError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to RentalError
impl From<csv::Error> for RentalError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        RentalError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl RentalError {
    /// Create a StoreUnavailable error
    pub fn store_unavailable(path: &std::path::Path, cause: impl std::fmt::Display) -> Self {
        RentalError::StoreUnavailable {
            path: path.display().to_string(),
            message: cause.to_string(),
        }
    }

    /// Create a CarNotFound error
    pub fn car_not_found(car_id: &str) -> Self {
        RentalError::CarNotFound {
            car_id: car_id.to_string(),
        }
    }

    /// Create a CarUnavailable error
    pub fn car_unavailable(car_id: &str) -> Self {
        RentalError::CarUnavailable {
            car_id: car_id.to_string(),
        }
    }

    /// Create a ParseError error
    pub fn parse_error(line: Option<u64>, message: impl Into<String>) -> Self {
        RentalError::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(car_id: &str, days: u32) -> Self {
        RentalError::ArithmeticOverflow {
            car_id: car_id.to_string(),
            days,
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        RentalError::InvalidInput {
            message: message.into(),
        }
    }

    /// Message shown to the operator at the terminal
    ///
    /// Business rule failures are reported precisely; infrastructure
    /// failures get a generic message and the cause goes to the log only.
    pub fn operator_message(&self) -> String {
        match self {
            RentalError::CarNotFound { car_id } => format!("Error: Car {} not found.", car_id),
            RentalError::CarUnavailable { car_id } => {
                format!("Error: Car {} is currently not available for rent.", car_id)
            }
            RentalError::InvalidInput { message } => format!("Error: {}.", message),
            RentalError::StoreUnavailable { .. } => {
                "Error: Unable to access the car inventory. Please contact support for assistance."
                    .to_string()
            }
            RentalError::IoError { .. } => {
                "Error: Unable to read or write invoices. Please contact support for assistance."
                    .to_string()
            }
            RentalError::ParseError { .. } => {
                "Error: Stored rental data is malformed. Please contact support for assistance."
                    .to_string()
            }
            RentalError::ArithmeticOverflow { .. } => {
                "Error: Unable to price this rental. Please contact support for assistance."
                    .to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::path::Path;

    #[rstest]
    #[case::store_unavailable(
        RentalError::StoreUnavailable { path: "carstore.txt".to_string(), message: "No such file".to_string() },
        "Inventory store unavailable at carstore.txt: No such file"
    )]
    #[case::car_not_found(
        RentalError::CarNotFound { car_id: "CAR9".to_string() },
        "Car CAR9 not found"
    )]
    #[case::car_unavailable(
        RentalError::CarUnavailable { car_id: "CAR1".to_string() },
        "Car CAR1 is currently not available for rent"
    )]
    #[case::io_error(
        RentalError::IoError { message: "Permission denied".to_string() },
        "I/O error: Permission denied"
    )]
    #[case::parse_error_with_line(
        RentalError::ParseError { line: Some(3), message: "expected 6 fields".to_string() },
        "Parse error at line 3: expected 6 fields"
    )]
    #[case::parse_error_without_line(
        RentalError::ParseError { line: None, message: "bad header".to_string() },
        "Parse error: bad header"
    )]
    #[case::arithmetic_overflow(
        RentalError::ArithmeticOverflow { car_id: "CAR1".to_string(), days: 7 },
        "Arithmetic overflow pricing 7 days of car CAR1"
    )]
    fn test_error_display(#[case] error: RentalError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::car_not_found(
        RentalError::car_not_found("CAR9"),
        RentalError::CarNotFound { car_id: "CAR9".to_string() }
    )]
    #[case::car_unavailable(
        RentalError::car_unavailable("CAR1"),
        RentalError::CarUnavailable { car_id: "CAR1".to_string() }
    )]
    #[case::store_unavailable(
        RentalError::store_unavailable(Path::new("carstore.txt"), "gone"),
        RentalError::StoreUnavailable { path: "carstore.txt".to_string(), message: "gone".to_string() }
    )]
    fn test_helper_functions(#[case] result: RentalError, #[case] expected: RentalError) {
        assert_eq!(result, expected);
    }

    #[rstest]
    #[case::car_not_found(RentalError::car_not_found("CAR9"), "Error: Car CAR9 not found.")]
    #[case::car_unavailable(
        RentalError::car_unavailable("CAR1"),
        "Error: Car CAR1 is currently not available for rent."
    )]
    #[case::invalid_input(
        RentalError::invalid_input("Customer name cannot be empty"),
        "Error: Customer name cannot be empty."
    )]
    #[case::parse_error(
        RentalError::parse_error(Some(2), "expected 6 fields"),
        "Error: Stored rental data is malformed. Please contact support for assistance."
    )]
    fn test_operator_message(#[case] error: RentalError, #[case] expected: &str) {
        assert_eq!(error.operator_message(), expected);
    }

    #[test]
    fn test_operator_message_does_not_leak_paths() {
        let error = RentalError::store_unavailable(Path::new("/srv/secret/carstore.txt"), "EACCES");
        let message = error.operator_message();
        assert!(!message.contains("/srv/secret"));
        assert!(!message.contains("EACCES"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: RentalError = io_error.into();
        assert!(matches!(error, RentalError::IoError { .. }));
        assert_eq!(error.to_string(), "I/O error: Permission denied");
    }
}
