//! File-backed car inventory store
//!
//! This module provides the FileRecordStore that keeps the car inventory in
//! a line-oriented text file (see [`crate::io::csv_format`]).
//!
//! # Update Strategy
//!
//! Every update reads the whole file, swaps the status field of the target
//! line and writes the whole text back; every other byte is kept as read.
//! The new text is written to a temporary file in the same directory and
//! renamed over the inventory, so a crash mid-update leaves either the old or
//! the new file, never a truncated one.
//!
//! # Concurrency
//!
//! There is no locking. The store assumes a single process is the only
//! reader and writer of the inventory file.

use crate::core::traits::RecordStore;
use crate::io::csv_format::{read_inventory, replace_status};
use crate::types::{CarRecord, CarStatus, RentalError};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// Inventory store backed by a text file
#[derive(Debug, Clone)]
pub struct FileRecordStore {
    /// Path of the inventory file
    path: PathBuf,
}

impl FileRecordStore {
    /// Create a store over the inventory file at `path`
    ///
    /// The file is not touched until the first operation.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileRecordStore { path: path.into() }
    }

    /// Path of the inventory file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Find a car by ID with a linear scan
    pub fn find(&self, car_id: &str) -> Result<Option<CarRecord>, RentalError> {
        Ok(self.list_all()?.into_iter().find(|car| car.id == car_id))
    }

    fn read(&self) -> Result<String, RentalError> {
        fs::read_to_string(&self.path).map_err(|e| RentalError::store_unavailable(&self.path, e))
    }

    /// Atomically replace the inventory file with `content`
    fn write_all(&self, content: &str) -> Result<(), RentalError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let unavailable = |e: &dyn std::fmt::Display| RentalError::store_unavailable(&self.path, e);

        let mut temp = NamedTempFile::new_in(dir).map_err(|e| unavailable(&e))?;
        temp.write_all(content.as_bytes())
            .and_then(|()| temp.as_file().sync_all())
            .map_err(|e| unavailable(&e))?;
        temp.persist(&self.path).map_err(|e| unavailable(&e.error))?;

        Ok(())
    }
}

impl RecordStore for FileRecordStore {
    fn list_all(&self) -> Result<Vec<CarRecord>, RentalError> {
        let cars = read_inventory(&self.read()?)?;
        debug!(path = %self.path.display(), count = cars.len(), "Loaded inventory");
        Ok(cars)
    }

    fn set_status(&mut self, car_id: &str, status: CarStatus) -> Result<(), RentalError> {
        match replace_status(&self.read()?, car_id, status)? {
            Some(updated) => {
                self.write_all(&updated)?;
                info!(car_id, %status, "Updated inventory after transaction");
            }
            None => warn!(car_id, "Status update for unknown car, inventory left unchanged"),
        }
        Ok(())
    }
}
