//! Ticket record encoding

use crate::error::{Error, Result};
use crate::slots::Size;
use chrono::Local;
use serde::{Deserialize, Serialize};

/// Local time, microsecond precision
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// One open ticket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketRecord {
    /// Issue time, human readable
    pub date: String,
    pub ticket_id: String,
    /// Size of the occupied slot
    pub slot_size: Size,
}

impl TicketRecord {
    /// Create a record stamped with the current local time
    pub fn new(ticket_id: impl Into<String>, slot_size: Size) -> Self {
        Self {
            date: Local::now().format(DATE_FORMAT).to_string(),
            ticket_id: ticket_id.into(),
            slot_size,
        }
    }

    pub fn matches(&self, ticket_id: &str, slot_size: Size) -> bool {
        self.ticket_id == ticket_id && self.slot_size == slot_size
    }
}

/// Serialize a record list as a pretty JSON array (4-space indent)
pub fn to_bytes(records: &[TicketRecord]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(64 + records.len() * 128);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    records
        .serialize(&mut ser)
        .map_err(|e| Error::Serialization(format!("Failed to serialize tickets: {}", e)))?;
    Ok(out)
}

/// Parse a record list
pub fn from_bytes(bytes: &[u8]) -> Result<Vec<TicketRecord>> {
    serde_json::from_slice(bytes)
        .map_err(|e| Error::Serialization(format!("Failed to deserialize tickets: {}", e)))
}
