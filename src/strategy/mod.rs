//! Invoice scan strategies
//!
//! This module defines the Strategy pattern for loading every invoice
//! artifact of a directory. Different implementations (synchronous,
//! asynchronous with bounded concurrency) can be selected at runtime; all of
//! them return invoices in emission order and stop at the first failure.

use crate::cli::StrategyType;
use crate::types::{RentalError, StoredInvoice};
use std::path::Path;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncScanStrategy, ScanConfig};
pub use sync::SyncScanStrategy;

/// Scan strategy trait for loading invoice artifacts
pub trait ScanStrategy: Send + Sync {
    /// Read and parse every invoice artifact in `dir`
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<StoredInvoice>)` - All invoices, sorted by identity
    /// * `Err(RentalError)` - The first listing, read or parse failure
    fn scan(&self, dir: &Path) -> Result<Vec<StoredInvoice>, RentalError>;
}

/// Create a scan strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - The type of scan strategy to create (Sync or Async)
/// * `config` - Optional configuration for async scanning (ignored for sync)
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<ScanConfig>,
) -> Box<dyn ScanStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncScanStrategy),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncScanStrategy::new(config))
        }
    }
}
