//! Asynchronous scan strategy
//!
//! Reads invoice artifacts concurrently on a tokio multi-threaded runtime.
//!
//! # Architecture
//!
//! ```text
//! AsyncScanStrategy
//!     ├── ScanConfig (max_concurrent)
//!     └── AsyncReader (buffered tokio::fs reads, order preserving)
//! ```
//!
//! Scanning is read-only, so running reads in parallel never races with the
//! single-threaded rental engine.

use crate::io::async_reader::AsyncReader;
use crate::strategy::ScanStrategy;
use crate::types::{RentalError, StoredInvoice};
use std::path::Path;
use tracing::warn;

/// Configuration for asynchronous scanning
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanConfig {
    /// Maximum number of invoice reads in flight
    pub max_concurrent: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_concurrent: num_cpus::get(),
        }
    }
}

impl ScanConfig {
    /// Create a new ScanConfig, falling back to the default for zero
    pub fn new(max_concurrent: usize) -> Self {
        let default = Self::default();

        let max_concurrent = if max_concurrent == 0 {
            warn!(
                "Invalid max_concurrent ({}), using default ({})",
                max_concurrent, default.max_concurrent
            );
            default.max_concurrent
        } else {
            max_concurrent
        };

        Self { max_concurrent }
    }
}

/// Asynchronous scan strategy
#[derive(Debug, Clone)]
pub struct AsyncScanStrategy {
    config: ScanConfig,
}

impl AsyncScanStrategy {
    /// Create a new AsyncScanStrategy with the specified configuration
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }
}

impl ScanStrategy for AsyncScanStrategy {
    fn scan(&self, dir: &Path) -> Result<Vec<StoredInvoice>, RentalError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent)
            .enable_all()
            .build()
            .map_err(|e| RentalError::IoError {
                message: format!("Failed to create tokio runtime: {}", e),
            })?;

        let reader = AsyncReader::new(dir, self.config.max_concurrent);
        runtime.block_on(reader.read_all())
    }
}
