//! Slot allocation strategies.
//!
//! An allocation strategy is a pure selection over the floor set: it returns
//! the address of the chosen slot and leaves reservation to the caller, so
//! selection and occupation happen under one exclusive borrow of the
//! facility and no stale-scan window exists.

mod nearest;

pub use nearest::NearestSlot;

use crate::domain::{ParkingFloor, Vehicle};

/// Position of a slot within the facility's floor list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotAddress {
    /// Position of the floor in the facility's floor list.
    pub floor_pos: usize,
    /// Position of the slot within that floor.
    pub slot_pos: usize,
}

/// Chooses one slot for a vehicle across all floors.
pub trait AllocationStrategy: Send + Sync {
    /// Returns the address of the selected slot, or `None` when no
    /// compatible slot exists. Absence is a normal outcome, never an error.
    fn allocate(
        &self,
        vehicle: &Vehicle,
        floors: &[ParkingFloor],
        origin_floor: u32,
    ) -> Option<SlotAddress>;
}
