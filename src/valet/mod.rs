//! Valet policies
//!
//! A [`Valet`] decides which slot a car goes to and keeps the slot pool in
//! step with the ticket store. [`CarParking`] is the only policy today;
//! other vehicle classes (trucks, motorbikes) plug in as sibling
//! implementations behind a new [`ParkingClass`] variant.

pub mod car;

pub use car::CarParking;

use crate::error::Result;
use crate::slots::{Size, SlotPool};
use crate::tickets::TicketStore;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ticket handed to the driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParkingTicket {
    pub ticket_id: String,
    /// Size of the slot assigned, not the size of the car
    pub slot_size: Size,
    /// Whether the ticket record reached the store
    ///
    /// When `false` the slot was not reserved either, so the ticket cannot
    /// be redeemed later.
    pub persisted: bool,
}

/// Parking policy
pub trait Valet {
    /// Park a car in the smallest free slot that fits it
    ///
    /// Fails with [`Error::Sizing`](crate::error::Error::Sizing) when no
    /// slot of the requested size or larger is free.
    fn park_car(&mut self, car_size: Size) -> Result<ParkingTicket>;

    /// Redeem a ticket and free its slot
    ///
    /// Returns `false` if the store holds no ticket with this id and size.
    fn return_car(&mut self, ticket_id: &str, slot_size: Size) -> bool;

    /// Current slot counters
    fn slots(&self) -> &SlotPool;
}

/// Available parking policies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParkingClass {
    #[default]
    Car,
}

impl fmt::Display for ParkingClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParkingClass::Car => f.write_str("car"),
        }
    }
}

/// Build the valet for a parking class
pub fn parking_init(
    slots: SlotPool,
    class: ParkingClass,
    store: Box<dyn TicketStore>,
) -> Box<dyn Valet> {
    match class {
        ParkingClass::Car => Box::new(CarParking::new(slots, store)),
    }
}
