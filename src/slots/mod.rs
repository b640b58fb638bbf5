//! Parking slots
//!
//! Free capacity is tracked per size class. A larger slot may host a
//! smaller car, so the classes are totally ordered.
//!
//! # Architecture
//!
//! ```text
//! SlotPool
//!   ├─→ SMALL  (capacity 10) → free 7
//!   ├─→ MEDIUM (capacity 20) → free 20
//!   └─→ LARGE  (capacity 30) → free 29
//! ```

pub mod pool;
pub mod size;

pub use pool::{SlotCapacities, SlotClassStats, SlotPool};
pub use size::Size;
