// Valet - Parking Slot Allocator
// Size-class slot pool with a durable ticket store

#![warn(rust_2018_idioms)]

pub mod config;
pub mod manage;
pub mod slots;
pub mod tickets;
pub mod valet;

// Re-exports for convenience
pub use config::ParkingConfig;
pub use slots::{Size, SlotPool};
pub use tickets::{JsonFileTicketStore, MemoryTicketStore, TicketRecord, TicketStore};
pub use valet::{parking_init, CarParking, ParkingClass, ParkingTicket, Valet};

/// Valet error types
pub mod error {
    use crate::slots::Size;
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum Error {
        #[error("Configuration error: {0}")]
        Configuration(String),

        #[error("No suitable slot for a {requested} car")]
        Sizing { requested: Size },

        #[error("Storage error: {0}")]
        Storage(String),

        #[error("Serialization error: {0}")]
        Serialization(String),

        #[error("Invalid argument: {0}")]
        InvalidArgument(String),
    }

    impl From<::config::ConfigError> for Error {
        fn from(err: ::config::ConfigError) -> Self {
            Error::Configuration(err.to_string())
        }
    }

    pub type Result<T> = std::result::Result<T, Error>;
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
