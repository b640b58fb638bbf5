//! JSON file ticket store
//!
//! The whole record list is read, modified and rewritten on every
//! operation. Rewrites go through a sibling temp file and a rename so a
//! crash mid-write leaves the previous list in place.

use super::record::{self, TicketRecord};
use super::TicketStore;
use crate::error::{Error, Result};
use crate::slots::Size;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Ticket store backed by a JSON array file
#[derive(Debug, Clone)]
pub struct JsonFileTicketStore {
    /// Path to the ticket file
    path: PathBuf,
    /// Scratch file used for atomic rewrites
    temp_path: PathBuf,
}

impl JsonFileTicketStore {
    /// Open a ticket file, creating it as `[]` if missing
    ///
    /// Safe to call on every startup: an existing file is left untouched.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file_name = path
            .file_name()
            .ok_or_else(|| Error::Storage(format!("Invalid ticket file path: {:?}", path)))?;

        let mut temp_name = file_name.to_os_string();
        temp_name.push(".tmp");
        let temp_path = path.with_file_name(temp_name);

        let store = Self { path, temp_path };
        store.init_storage()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn init_storage(&self) -> Result<()> {
        if self.path.exists() {
            debug!(path = ?self.path, "Using existing ticket file");
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    Error::Storage(format!("Failed to create ticket directory: {}", e))
                })?;
            }
        }

        fs::write(&self.path, b"[]")
            .map_err(|e| Error::Storage(format!("Failed to initialize ticket file: {}", e)))?;
        info!(path = ?self.path, "Initialized empty ticket file");
        Ok(())
    }

    fn read_records(&self) -> Result<Vec<TicketRecord>> {
        let bytes = fs::read(&self.path)
            .map_err(|e| Error::Storage(format!("Failed to read ticket file: {}", e)))?;
        record::from_bytes(&bytes)
    }

    fn write_records(&self, records: &[TicketRecord]) -> Result<()> {
        let bytes = record::to_bytes(records)?;

        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.temp_path)
            .map_err(|e| Error::Storage(format!("Failed to create temp ticket file: {}", e)))?;

        file.write_all(&bytes)
            .map_err(|e| Error::Storage(format!("Failed to write tickets: {}", e)))?;
        file.sync_all()
            .map_err(|e| Error::Storage(format!("Failed to sync tickets: {}", e)))?;

        fs::rename(&self.temp_path, &self.path)
            .map_err(|e| Error::Storage(format!("Failed to replace ticket file: {}", e)))?;

        debug!(records = records.len(), "Wrote ticket file");
        Ok(())
    }
}

impl TicketStore for JsonFileTicketStore {
    fn save(&self, ticket_id: &str, slot_size: Size) -> Result<()> {
        let mut records = self.read_records()?;
        records.push(TicketRecord::new(ticket_id, slot_size));
        self.write_records(&records)
    }

    fn retrieve_and_remove(&self, ticket_id: &str, slot_size: Size) -> Result<bool> {
        let mut records = self.read_records()?;
        match records.iter().position(|r| r.matches(ticket_id, slot_size)) {
            Some(i) => {
                records.remove(i);
                self.write_records(&records)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn records(&self) -> Result<Vec<TicketRecord>> {
        self.read_records()
    }
}
