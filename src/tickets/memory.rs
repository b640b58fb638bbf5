//! In-memory ticket store
//!
//! Same contract as the file store, without touching disk. Writes can be
//! switched to fail, which is how the best-effort park path is exercised.

use super::record::TicketRecord;
use super::TicketStore;
use crate::error::{Error, Result};
use crate::slots::Size;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// Ticket store held in memory
///
/// Clones share the same records.
#[derive(Debug, Clone, Default)]
pub struct MemoryTicketStore {
    records: Arc<Mutex<Vec<TicketRecord>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryTicketStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes always fail
    pub fn failing() -> Self {
        let store = Self::new();
        store.set_fail_writes(true);
        store
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of open tickets
    pub fn len(&self) -> usize {
        self.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<TicketRecord>>> {
        self.records
            .lock()
            .map_err(|_| Error::Storage("Ticket store lock poisoned".to_string()))
    }

    fn check_writable(&self) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::Storage("Ticket store is not writable".to_string()));
        }
        Ok(())
    }
}

impl TicketStore for MemoryTicketStore {
    fn save(&self, ticket_id: &str, slot_size: Size) -> Result<()> {
        self.check_writable()?;
        self.lock()?.push(TicketRecord::new(ticket_id, slot_size));
        Ok(())
    }

    fn retrieve_and_remove(&self, ticket_id: &str, slot_size: Size) -> Result<bool> {
        let mut records = self.lock()?;
        match records.iter().position(|r| r.matches(ticket_id, slot_size)) {
            Some(i) => {
                self.check_writable()?;
                records.remove(i);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn records(&self) -> Result<Vec<TicketRecord>> {
        Ok(self.lock()?.clone())
    }
}
