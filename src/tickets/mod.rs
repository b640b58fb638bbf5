//! Ticket storage
//!
//! Open tickets live in a durable record list. The store, not the
//! in-memory slot pool, decides whether a ticket is currently valid.
//!
//! # Layout
//!
//! ```text
//! tickets.json
//! [
//!     { "date": "2024-05-01 09:12:44.118204", "ticket_id": "1d89…", "slot_size": 1 },
//!     { "date": "2024-05-01 09:30:02.775019", "ticket_id": "7f3a…", "slot_size": 3 }
//! ]
//! ```
//!
//! Every write rewrites the whole list. There is no locking: two processes
//! sharing one file can lose records.

pub mod json;
pub mod memory;
pub mod record;

pub use json::JsonFileTicketStore;
pub use memory::MemoryTicketStore;
pub use record::TicketRecord;

use crate::error::Result;
use crate::slots::Size;

/// Storage for open parking tickets
pub trait TicketStore: Send + Sync {
    /// Append a ticket and persist the whole list
    fn save(&self, ticket_id: &str, slot_size: Size) -> Result<()>;

    /// Remove the first record matching both id and size
    ///
    /// Returns `false` when no record matches.
    fn retrieve_and_remove(&self, ticket_id: &str, slot_size: Size) -> Result<bool>;

    /// Open tickets in stored order
    fn records(&self) -> Result<Vec<TicketRecord>>;
}
