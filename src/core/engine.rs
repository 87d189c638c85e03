//! Rental transaction engine
//!
//! This module provides the RentalEngine that runs a rent or return request
//! against the inventory store and emits its invoice.
//!
//! The engine enforces business rules such as:
//! - The customer name must be non-empty and free of line breaks or other
//!   control characters (it is written verbatim into the invoice)
//! - The car must exist in the inventory
//! - Only available cars can be rented (any car can be returned)
//! - The inventory is updated before the invoice is written, and a failed
//!   update means no invoice
//!
//! # Failure Semantics
//!
//! Failures while loading the inventory, looking up the car, validating or
//! pricing leave no side effects. A failed invoice write after a successful
//! inventory update fails the transaction without reverting the inventory;
//! the mismatch is logged.

use crate::core::pricing::PricingPolicy;
use crate::core::traits::{Clock, InvoiceEmitter, RecordStore, SystemClock};
use crate::types::{
    CarRecord, CarStatus, InvoiceRecord, RentalError, StoredInvoice, TransactionKind,
    TransactionRequest,
};
use tracing::{error, info};

/// Check a request before anything is read or written
fn validate_request(request: &TransactionRequest) -> Result<(), RentalError> {
    if request.car_id.trim().is_empty() {
        return Err(RentalError::invalid_input("Car ID cannot be empty"));
    }
    if request.car_id.chars().any(char::is_control) {
        return Err(RentalError::invalid_input(
            "Car ID cannot contain line breaks or control characters",
        ));
    }
    if request.customer_name.trim().is_empty() {
        return Err(RentalError::invalid_input("Customer name cannot be empty"));
    }
    if request.customer_name.chars().any(char::is_control) {
        return Err(RentalError::invalid_input(
            "Customer name cannot contain line breaks or control characters",
        ));
    }
    if request.kind == TransactionKind::Rent && request.duration_days == 0 {
        return Err(RentalError::invalid_input(
            "Duration must be a positive whole number of days",
        ));
    }
    Ok(())
}

/// Rental transaction engine
///
/// Orchestrates validation, lookup, pricing, inventory update and invoice
/// emission for one request at a time. Invoice timestamps come from the
/// engine's clock.
#[derive(Debug)]
pub struct RentalEngine<S: RecordStore, E: InvoiceEmitter, C: Clock = SystemClock> {
    store: S,
    emitter: E,
    pricing: PricingPolicy,
    clock: C,
}

impl<S: RecordStore, E: InvoiceEmitter> RentalEngine<S, E, SystemClock> {
    /// Create a new RentalEngine with the default pricing policy
    pub fn new(store: S, emitter: E) -> Self {
        RentalEngine {
            store,
            emitter,
            pricing: PricingPolicy::default(),
            clock: SystemClock,
        }
    }
}

impl<S: RecordStore, E: InvoiceEmitter, C: Clock> RentalEngine<S, E, C> {
    /// Replace the clock used to stamp invoices
    pub fn with_clock<K: Clock>(self, clock: K) -> RentalEngine<S, E, K> {
        RentalEngine {
            store: self.store,
            emitter: self.emitter,
            pricing: self.pricing,
            clock,
        }
    }

    /// Replace the pricing policy
    pub fn with_pricing(mut self, pricing: PricingPolicy) -> Self {
        self.pricing = pricing;
        self
    }

    /// The inventory store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The invoice emitter
    pub fn emitter(&self) -> &E {
        &self.emitter
    }

    /// All cars in inventory order
    pub fn cars(&self) -> Result<Vec<CarRecord>, RentalError> {
        self.store.list_all()
    }

    /// Execute a rent or return request
    ///
    /// # Arguments
    ///
    /// * `request` - The transaction to run
    ///
    /// # Returns
    ///
    /// * `Ok(StoredInvoice)` - The emitted invoice and its identity
    /// * `Err(RentalError)` - If the transaction failed
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The car ID or customer name is empty or contains control
    ///   characters, or a rent has zero days (`InvalidInput`)
    /// - The inventory cannot be read or written (`StoreUnavailable`, `ParseError`)
    /// - The car does not exist (`CarNotFound`)
    /// - A rent targets a car that is not available (`CarUnavailable`)
    /// - The total does not fit (`ArithmeticOverflow`)
    /// - The invoice cannot be written (`IoError`)
    pub fn execute(&mut self, request: &TransactionRequest) -> Result<StoredInvoice, RentalError> {
        let result = self.run(request);

        match &result {
            Ok(stored) => info!(
                kind = %request.kind,
                car_id = %request.car_id,
                customer = %request.customer_name,
                invoice_id = %stored.id,
                total = %stored.record.total_amount,
                "Car {} {} by {}",
                request.car_id,
                match request.kind {
                    TransactionKind::Rent => "rented",
                    TransactionKind::Return => "returned",
                },
                request.customer_name
            ),
            Err(e) => error!(
                kind = %request.kind,
                car_id = %request.car_id,
                error = %e,
                "Error {}ing car",
                request.kind
            ),
        }

        result
    }

    fn run(&mut self, request: &TransactionRequest) -> Result<StoredInvoice, RentalError> {
        validate_request(request)?;

        let car = self
            .store
            .list_all()?
            .into_iter()
            .find(|car| car.id == request.car_id)
            .ok_or_else(|| RentalError::car_not_found(&request.car_id))?;

        if request.kind == TransactionKind::Rent && !car.is_available() {
            return Err(RentalError::car_unavailable(&car.id));
        }

        let total_amount = self
            .pricing
            .total(request.kind, &car, request.duration_days)?;

        let new_status = match request.kind {
            TransactionKind::Rent => CarStatus::NotAvailable,
            TransactionKind::Return => CarStatus::Available,
        };
        self.store.set_status(&car.id, new_status)?;

        let invoice = InvoiceRecord {
            kind: request.kind,
            car_id: car.id,
            brand: car.brand,
            model: car.model,
            year: car.year,
            price_per_day: car.price_per_day,
            customer_name: request.customer_name.clone(),
            timestamp: self.clock.now(),
            duration_days: request.duration_days,
            total_amount,
        };

        self.emitter.emit(&invoice).inspect_err(|_| {
            error!(
                car_id = %invoice.car_id,
                status = %new_status,
                "Inventory updated but no invoice was written"
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pricing::ReturnPricing;
    use crate::types::InvoiceId;
    use chrono::{NaiveDate, NaiveDateTime};
    use rstest::rstest;
    use rust_decimal::Decimal;
    use std::path::PathBuf;

    /// In-memory store counting writes
    #[derive(Debug, Default)]
    struct MemoryStore {
        cars: Vec<CarRecord>,
        writes: usize,
        unavailable: bool,
        fail_writes: bool,
    }

    impl RecordStore for MemoryStore {
        fn list_all(&self) -> Result<Vec<CarRecord>, RentalError> {
            if self.unavailable {
                return Err(RentalError::StoreUnavailable {
                    path: "memory".to_string(),
                    message: "offline".to_string(),
                });
            }
            Ok(self.cars.clone())
        }

        fn set_status(&mut self, car_id: &str, status: CarStatus) -> Result<(), RentalError> {
            if self.fail_writes {
                return Err(RentalError::StoreUnavailable {
                    path: "memory".to_string(),
                    message: "read-only".to_string(),
                });
            }
            self.writes += 1;
            if let Some(car) = self.cars.iter_mut().find(|car| car.id == car_id) {
                car.status = status;
            }
            Ok(())
        }
    }

    /// Emitter collecting invoices in memory
    #[derive(Debug, Default)]
    struct MemoryEmitter {
        invoices: Vec<InvoiceRecord>,
        fail: bool,
    }

    impl InvoiceEmitter for MemoryEmitter {
        fn emit(&mut self, invoice: &InvoiceRecord) -> Result<StoredInvoice, RentalError> {
            if self.fail {
                return Err(RentalError::IoError {
                    message: "disk full".to_string(),
                });
            }
            self.invoices.push(invoice.clone());
            let seq = self.invoices.len() as u32;
            Ok(StoredInvoice {
                id: InvoiceId::new(invoice.kind, invoice.timestamp, seq),
                path: PathBuf::from(format!("invoice-{}", seq)),
                record: invoice.clone(),
            })
        }
    }

    fn car(id: &str, price: i64, status: CarStatus) -> CarRecord {
        CarRecord {
            id: id.to_string(),
            brand: "Toyota".to_string(),
            model: "Corolla".to_string(),
            year: "2020".to_string(),
            price_per_day: Decimal::from(price),
            status,
        }
    }

    fn engine_with(cars: Vec<CarRecord>) -> RentalEngine<MemoryStore, MemoryEmitter> {
        RentalEngine::new(
            MemoryStore {
                cars,
                ..Default::default()
            },
            MemoryEmitter::default(),
        )
    }

    fn status_of(engine: &RentalEngine<MemoryStore, MemoryEmitter>, id: &str) -> CarStatus {
        engine
            .store()
            .cars
            .iter()
            .find(|car| car.id == id)
            .unwrap()
            .status
    }

    #[test]
    fn test_rent_available_car() {
        let mut engine = engine_with(vec![car("CAR1", 50, CarStatus::Available)]);

        let stored = engine
            .execute(&TransactionRequest::rent("CAR1", 3, "Alice"))
            .unwrap();

        assert_eq!(stored.record.kind, TransactionKind::Rent);
        assert_eq!(stored.record.car_id, "CAR1");
        assert_eq!(stored.record.brand, "Toyota");
        assert_eq!(stored.record.customer_name, "Alice");
        assert_eq!(stored.record.duration_days, 3);
        assert_eq!(stored.record.price_per_day, Decimal::from(50));
        assert_eq!(stored.record.total_amount, Decimal::from(150));
        assert_eq!(status_of(&engine, "CAR1"), CarStatus::NotAvailable);
        assert_eq!(engine.emitter().invoices.len(), 1);
    }

    #[test]
    fn test_rent_unavailable_car_has_no_side_effects() {
        let mut engine = engine_with(vec![car("CAR1", 50, CarStatus::NotAvailable)]);

        let result = engine.execute(&TransactionRequest::rent("CAR1", 3, "Bob"));

        assert_eq!(result.unwrap_err(), RentalError::car_unavailable("CAR1"));
        assert_eq!(engine.store().writes, 0);
        assert!(engine.emitter().invoices.is_empty());
    }

    #[test]
    fn test_unknown_car_has_no_side_effects() {
        let mut engine = engine_with(vec![car("CAR1", 50, CarStatus::Available)]);

        for request in [
            TransactionRequest::rent("CAR9", 3, "Alice"),
            TransactionRequest::return_car("CAR9", "Alice"),
        ] {
            let result = engine.execute(&request);
            assert_eq!(result.unwrap_err(), RentalError::car_not_found("CAR9"));
        }
        assert_eq!(engine.store().writes, 0);
        assert!(engine.emitter().invoices.is_empty());
    }

    #[test]
    fn test_rent_twice_fails_second_time() {
        let mut engine = engine_with(vec![car("CAR1", 50, CarStatus::Available)]);

        engine
            .execute(&TransactionRequest::rent("CAR1", 3, "Alice"))
            .unwrap();
        let result = engine.execute(&TransactionRequest::rent("CAR1", 1, "Bob"));

        assert!(matches!(result, Err(RentalError::CarUnavailable { .. })));
        assert_eq!(engine.emitter().invoices.len(), 1);
    }

    #[test]
    fn test_return_marks_available_with_day_rate_formula() {
        let mut engine = engine_with(vec![car("CAR1", 50, CarStatus::NotAvailable)]);

        let stored = engine
            .execute(&TransactionRequest::return_car("CAR1", "Alice"))
            .unwrap();

        assert_eq!(stored.record.kind, TransactionKind::Return);
        assert_eq!(stored.record.duration_days, 0);
        assert_eq!(stored.record.total_amount, Decimal::ZERO);
        assert_eq!(status_of(&engine, "CAR1"), CarStatus::Available);
    }

    #[test]
    fn test_return_with_duration_uses_rent_formula() {
        let mut engine = engine_with(vec![car("CAR1", 40, CarStatus::NotAvailable)]);
        let request = TransactionRequest {
            duration_days: 2,
            ..TransactionRequest::return_car("CAR1", "Alice")
        };

        let stored = engine.execute(&request).unwrap();
        assert_eq!(stored.record.total_amount, Decimal::from(80));
    }

    #[test]
    fn test_return_no_charge_policy() {
        let mut engine = engine_with(vec![car("CAR1", 40, CarStatus::NotAvailable)])
            .with_pricing(PricingPolicy::new(ReturnPricing::NoCharge));
        let request = TransactionRequest {
            duration_days: 2,
            ..TransactionRequest::return_car("CAR1", "Alice")
        };

        let stored = engine.execute(&request).unwrap();
        assert_eq!(stored.record.total_amount, Decimal::ZERO);
    }

    #[test]
    fn test_return_already_available_car() {
        let mut engine = engine_with(vec![car("CAR1", 50, CarStatus::Available)]);

        let result = engine.execute(&TransactionRequest::return_car("CAR1", "Alice"));

        assert!(result.is_ok());
        assert_eq!(status_of(&engine, "CAR1"), CarStatus::Available);
    }

    #[test]
    fn test_store_unavailable() {
        let mut engine = engine_with(vec![]);
        engine.store.unavailable = true;

        let result = engine.execute(&TransactionRequest::rent("CAR1", 3, "Alice"));

        assert!(matches!(result, Err(RentalError::StoreUnavailable { .. })));
        assert!(engine.emitter().invoices.is_empty());
    }

    #[test]
    fn test_failed_store_update_emits_no_invoice() {
        let mut engine = engine_with(vec![car("CAR1", 50, CarStatus::Available)]);
        engine.store.fail_writes = true;

        let result = engine.execute(&TransactionRequest::rent("CAR1", 3, "Alice"));

        assert!(matches!(result, Err(RentalError::StoreUnavailable { .. })));
        assert!(engine.emitter().invoices.is_empty());
        assert_eq!(status_of(&engine, "CAR1"), CarStatus::Available);
    }

    #[test]
    fn test_failed_invoice_fails_transaction_without_rollback() {
        let mut engine = engine_with(vec![car("CAR1", 50, CarStatus::Available)]);
        engine.emitter.fail = true;

        let result = engine.execute(&TransactionRequest::rent("CAR1", 3, "Alice"));

        assert!(matches!(result, Err(RentalError::IoError { .. })));
        assert_eq!(status_of(&engine, "CAR1"), CarStatus::NotAvailable);
    }

    #[test]
    fn test_other_cars_untouched() {
        let mut engine = engine_with(vec![
            car("CAR1", 50, CarStatus::Available),
            car("CAR2", 45, CarStatus::Available),
        ]);

        engine
            .execute(&TransactionRequest::rent("CAR2", 1, "Alice"))
            .unwrap();

        assert_eq!(status_of(&engine, "CAR1"), CarStatus::Available);
        assert_eq!(status_of(&engine, "CAR2"), CarStatus::NotAvailable);
    }

    /// Clock frozen at one instant
    #[derive(Debug, Clone, Copy)]
    struct FixedClock(NaiveDateTime);

    impl Clock for FixedClock {
        fn now(&self) -> NaiveDateTime {
            self.0
        }
    }

    #[test]
    fn test_invoice_stamped_by_engine_clock() {
        let at = NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_micro_opt(9, 30, 15, 250_000)
            .unwrap();
        let mut engine =
            engine_with(vec![car("CAR1", 50, CarStatus::Available)]).with_clock(FixedClock(at));

        let stored = engine
            .execute(&TransactionRequest::rent("CAR1", 2, "Alice"))
            .unwrap();

        assert_eq!(stored.record.timestamp, at);
        assert_eq!(engine.emitter().invoices[0].timestamp, at);
    }

    #[rstest]
    #[case::empty_customer(TransactionRequest::rent("CAR1", 2, ""), "Customer name cannot be empty")]
    #[case::blank_customer(TransactionRequest::return_car("CAR1", "   "), "Customer name cannot be empty")]
    #[case::newline_in_customer(
        TransactionRequest::rent("CAR1", 2, "Alice\nSmith"),
        "Customer name cannot contain line breaks or control characters"
    )]
    #[case::carriage_return_in_customer(
        TransactionRequest::return_car("CAR1", "Alice\r"),
        "Customer name cannot contain line breaks or control characters"
    )]
    #[case::tab_in_customer(
        TransactionRequest::rent("CAR1", 2, "Alice\tSmith"),
        "Customer name cannot contain line breaks or control characters"
    )]
    #[case::empty_car_id(TransactionRequest::rent("", 2, "Alice"), "Car ID cannot be empty")]
    #[case::zero_day_rent(
        TransactionRequest::rent("CAR1", 0, "Alice"),
        "Duration must be a positive whole number of days"
    )]
    fn test_invalid_request_has_no_side_effects(
        #[case] request: TransactionRequest,
        #[case] message: &str,
    ) {
        let mut engine = engine_with(vec![car("CAR1", 50, CarStatus::Available)]);

        let result = engine.execute(&request);

        assert_eq!(result.unwrap_err(), RentalError::invalid_input(message));
        assert_eq!(engine.store().writes, 0);
        assert!(engine.emitter().invoices.is_empty());
        assert_eq!(status_of(&engine, "CAR1"), CarStatus::Available);
    }
}
