//! Park and return actions
//!
//! Thin layer between a front end (the `valet` binary) and a [`Valet`]:
//! parses the requested action, cleans up ticket ids typed by hand and
//! turns results into messages for the driver.

use crate::error::{Error, Result};
use crate::slots::Size;
use crate::valet::{ParkingTicket, Valet};
use std::fmt;
use std::str::FromStr;

/// What the driver asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Park,
    Return,
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "park" => Ok(Action::Park),
            "return" => Ok(Action::Return),
            other => Err(Error::InvalidArgument(format!(
                "Unknown action '{}', expected park or return",
                other
            ))),
        }
    }
}

/// Result of one action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Parked(ParkingTicket),
    Returned,
    NotReturned,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Parked(ticket) => {
                writeln!(f, "Your car is successfully parked!")?;
                writeln!(f, "Your ticket_id is: {}", ticket.ticket_id)?;
                write!(f, "Your parking_slot_size is: {}", ticket.slot_size)?;
                if !ticket.persisted {
                    write!(
                        f,
                        "\nWarning: the ticket could not be recorded, keep it safe and contact the attendant"
                    )?;
                }
                Ok(())
            }
            Outcome::Returned => write!(f, "Your car is successfully returned!"),
            Outcome::NotReturned => write!(f, "Something went wrong. Try again later!"),
        }
    }
}

/// Strip everything except Latin and Cyrillic letters, digits and `-`
pub fn sanitize_ticket_id(raw: &str) -> String {
    raw.chars()
        .filter(|&c| c.is_ascii_alphanumeric() || c == '-' || ('А'..='я').contains(&c))
        .collect()
}

/// Run one action against a valet
///
/// `ticket_id` is required for [`Action::Return`] and ignored otherwise.
pub fn manage_car(
    valet: &mut dyn Valet,
    action: Action,
    size: Size,
    ticket_id: Option<&str>,
) -> Result<Outcome> {
    match action {
        Action::Park => valet.park_car(size).map(Outcome::Parked),
        Action::Return => {
            let raw = ticket_id.ok_or_else(|| {
                Error::InvalidArgument("A ticket id is required to return a car".to_string())
            })?;
            let ticket_id = sanitize_ticket_id(raw);
            if valet.return_car(&ticket_id, size) {
                Ok(Outcome::Returned)
            } else {
                Ok(Outcome::NotReturned)
            }
        }
    }
}
