//! Car parking policy

use super::{ParkingTicket, Valet};
use crate::error::{Error, Result};
use crate::slots::{Size, SlotPool};
use crate::tickets::TicketStore;
use tracing::{info, warn};
use uuid::Uuid;

/// Valet for passenger cars
///
/// A car takes the smallest free slot at least as large as itself.
pub struct CarParking {
    slots: SlotPool,
    store: Box<dyn TicketStore>,
}

impl CarParking {
    pub fn new(slots: SlotPool, store: Box<dyn TicketStore>) -> Self {
        Self { slots, store }
    }

    fn generate_ticket_id() -> String {
        Uuid::new_v4().to_string()
    }
}

impl std::fmt::Debug for CarParking {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CarParking")
            .field("slots", &self.slots)
            .finish_non_exhaustive()
    }
}

impl Valet for CarParking {
    fn park_car(&mut self, car_size: Size) -> Result<ParkingTicket> {
        let slot_size = car_size
            .at_least()
            .find(|&s| self.slots.get(s) > 0)
            .ok_or_else(|| {
                warn!(car_size = %car_size, "Failed to park car: no suitable slots found");
                Error::Sizing {
                    requested: car_size,
                }
            })?;

        let ticket_id = Self::generate_ticket_id();

        // A failed save still hands the ticket out, without reserving the slot.
        let persisted = match self.store.save(&ticket_id, slot_size) {
            Ok(()) => {
                self.slots.occupy(slot_size)?;
                info!(
                    car_size = %car_size,
                    slot_size = %slot_size,
                    ticket = %ticket_id,
                    "Parked car"
                );
                true
            }
            Err(e) => {
                warn!(
                    ticket = %ticket_id,
                    slot_size = %slot_size,
                    error = %e,
                    "Ticket not saved, slot left unreserved"
                );
                false
            }
        };

        Ok(ParkingTicket {
            ticket_id,
            slot_size,
            persisted,
        })
    }

    fn return_car(&mut self, ticket_id: &str, slot_size: Size) -> bool {
        match self.store.retrieve_and_remove(ticket_id, slot_size) {
            Ok(true) => {
                self.slots.release(slot_size);
                info!(ticket = %ticket_id, slot_size = %slot_size, "Returned car, slot freed");
                true
            }
            Ok(false) => {
                warn!(ticket = %ticket_id, slot_size = %slot_size, "Failed to return car: ticket not found");
                false
            }
            Err(e) => {
                warn!(ticket = %ticket_id, error = %e, "Failed to return car: ticket store unavailable");
                false
            }
        }
    }

    fn slots(&self) -> &SlotPool {
        &self.slots
    }
}
