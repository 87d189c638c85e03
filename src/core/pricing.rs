//! Rental pricing
//!
//! Rent is charged `price_per_day * duration_days`. Returns are priced with
//! the same formula by default (a return entered at the terminal carries a
//! duration of 0 and therefore costs nothing); `ReturnPricing::NoCharge`
//! zeroes returns regardless of the duration.

use crate::types::{CarRecord, RentalError, TransactionKind};
use clap::ValueEnum;
use rust_decimal::Decimal;

/// How return transactions are priced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReturnPricing {
    /// Charge the day rate times the entered duration, like a rental
    #[default]
    DayRate,

    /// Returns are never charged
    NoCharge,
}

/// Pricing rules applied by the rental engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PricingPolicy {
    /// Pricing of return transactions
    pub return_pricing: ReturnPricing,
}

impl PricingPolicy {
    /// Create a policy with the given return pricing
    pub fn new(return_pricing: ReturnPricing) -> Self {
        PricingPolicy { return_pricing }
    }

    /// Total amount for a transaction on `car` lasting `duration_days`
    ///
    /// # Errors
    ///
    /// Returns `RentalError::ArithmeticOverflow` if the product does not fit.
    pub fn total(
        &self,
        kind: TransactionKind,
        car: &CarRecord,
        duration_days: u32,
    ) -> Result<Decimal, RentalError> {
        if kind == TransactionKind::Return && self.return_pricing == ReturnPricing::NoCharge {
            return Ok(Decimal::ZERO);
        }

        car.price_per_day
            .checked_mul(Decimal::from(duration_days))
            .ok_or_else(|| RentalError::arithmetic_overflow(&car.id, duration_days))
    }
}
