//! Free slot counters per size class

use super::size::Size;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Configured number of slots per size class
///
/// Signed on purpose: values come straight from configuration and are
/// validated when the pool is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotCapacities {
    pub small: i64,
    pub medium: i64,
    pub large: i64,
}

impl SlotCapacities {
    pub fn new(small: i64, medium: i64, large: i64) -> Self {
        Self {
            small,
            medium,
            large,
        }
    }

    fn get(&self, size: Size) -> i64 {
        match size {
            Size::Small => self.small,
            Size::Medium => self.medium,
            Size::Large => self.large,
        }
    }
}

impl Default for SlotCapacities {
    fn default() -> Self {
        Self::new(10, 20, 30)
    }
}

/// Remaining capacity per size class
///
/// Capacity is fixed at construction, only the free count moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotPool {
    capacity: [u32; 3],
    free: [u32; 3],
}

impl SlotPool {
    /// Build a pool with every slot free
    ///
    /// Fails with [`Error::Configuration`] if any capacity is negative.
    pub fn new(capacities: SlotCapacities) -> Result<Self> {
        let mut capacity = [0u32; 3];
        for size in Size::ALL {
            let value = capacities.get(size);
            capacity[size.index()] = u32::try_from(value).map_err(|_| {
                Error::Configuration(format!(
                    "{} slot count must be a non-negative 32-bit integer, got {}",
                    size, value
                ))
            })?;
        }

        debug!(?capacity, "Slot pool initialized");
        Ok(Self {
            capacity,
            free: capacity,
        })
    }

    /// Free slots of the given size
    pub fn get(&self, size: Size) -> u32 {
        self.free[size.index()]
    }

    /// Overwrite the free count of a size class
    pub fn set(&mut self, size: Size, count: u32) {
        self.free[size.index()] = count;
    }

    /// Configured total for a size class
    pub fn capacity(&self, size: Size) -> u32 {
        self.capacity[size.index()]
    }

    /// Take one slot of the given size
    pub fn occupy(&mut self, size: Size) -> Result<()> {
        let free = &mut self.free[size.index()];
        if *free == 0 {
            return Err(Error::Sizing { requested: size });
        }
        *free -= 1;
        Ok(())
    }

    /// Give one slot of the given size back
    ///
    /// May go past capacity when the ticket was issued by an earlier run.
    pub fn release(&mut self, size: Size) {
        let idx = size.index();
        self.free[idx] = self.free[idx].saturating_add(1);
        if self.free[idx] > self.capacity[idx] {
            warn!(
                size = %size,
                free = self.free[idx],
                capacity = self.capacity[idx],
                "Free slots exceed configured capacity"
            );
        }
    }

    /// Size classes, smallest first
    pub fn sizes(&self) -> [Size; 3] {
        Size::ALL
    }

    /// Number of size classes
    pub fn len(&self) -> usize {
        Size::ALL.len()
    }

    /// Per-class statistics
    pub fn stats(&self) -> Vec<SlotClassStats> {
        Size::ALL
            .iter()
            .map(|&size| {
                let capacity = self.capacity(size);
                let free = self.get(size);
                SlotClassStats {
                    size,
                    capacity,
                    free,
                    occupied: capacity.saturating_sub(free),
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotClassStats {
    pub size: Size,
    pub capacity: u32,
    pub free: u32,
    pub occupied: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_creation() -> Result<()> {
        let pool = SlotPool::new(SlotCapacities::new(5, 10, 15))?;
        assert_eq!(pool.get(Size::Small), 5);
        assert_eq!(pool.get(Size::Medium), 10);
        assert_eq!(pool.get(Size::Large), 15);
        assert_eq!(pool.capacity(Size::Large), 15);
        Ok(())
    }

    #[test]
    fn test_negative_capacity_rejected() {
        for caps in [
            SlotCapacities::new(-1, 10, 10),
            SlotCapacities::new(10, -1, 10),
            SlotCapacities::new(10, 10, -1),
        ] {
            assert!(matches!(
                SlotPool::new(caps),
                Err(Error::Configuration(_))
            ));
        }
    }

    #[test]
    fn test_zero_capacity_allowed() -> Result<()> {
        let pool = SlotPool::new(SlotCapacities::new(0, 0, 0))?;
        assert!(Size::ALL.iter().all(|&s| pool.get(s) == 0));
        Ok(())
    }

    #[test]
    fn test_set() -> Result<()> {
        let mut pool = SlotPool::new(SlotCapacities::default())?;
        pool.set(Size::Small, 5);
        pool.set(Size::Medium, 15);
        pool.set(Size::Large, 25);
        assert_eq!(pool.get(Size::Small), 5);
        assert_eq!(pool.get(Size::Medium), 15);
        assert_eq!(pool.get(Size::Large), 25);
        // capacity stays as configured
        assert_eq!(pool.capacity(Size::Small), 10);
        Ok(())
    }

    #[test]
    fn test_occupy_and_release() -> Result<()> {
        let mut pool = SlotPool::new(SlotCapacities::new(1, 0, 0))?;

        pool.occupy(Size::Small)?;
        assert_eq!(pool.get(Size::Small), 0);

        // Never goes below zero
        assert!(matches!(
            pool.occupy(Size::Small),
            Err(Error::Sizing { requested: Size::Small })
        ));
        assert_eq!(pool.get(Size::Small), 0);

        pool.release(Size::Small);
        assert_eq!(pool.get(Size::Small), 1);
        Ok(())
    }

    #[test]
    fn test_release_past_capacity() -> Result<()> {
        let mut pool = SlotPool::new(SlotCapacities::new(0, 0, 0))?;
        pool.release(Size::Medium);
        assert_eq!(pool.get(Size::Medium), 1);
        assert_eq!(pool.stats()[1].occupied, 0);
        Ok(())
    }

    #[test]
    fn test_sizes_and_len() -> Result<()> {
        let pool = SlotPool::new(SlotCapacities::default())?;
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.sizes(), [Size::Small, Size::Medium, Size::Large]);
        Ok(())
    }

    #[test]
    fn test_stats() -> Result<()> {
        let mut pool = SlotPool::new(SlotCapacities::new(2, 1, 1))?;
        pool.occupy(Size::Small)?;

        let stats = pool.stats();
        assert_eq!(stats.len(), 3);
        assert_eq!(
            stats[0],
            SlotClassStats {
                size: Size::Small,
                capacity: 2,
                free: 1,
                occupied: 1,
            }
        );
        assert_eq!(stats[2].occupied, 0);
        Ok(())
    }
}
