//! Nearest-slot allocation.

use tracing::debug;

use super::{AllocationStrategy, SlotAddress};
use crate::domain::{ParkingFloor, Vehicle};

/// Picks the compatible slot closest to the entry gate's floor.
///
/// Distance is `|slot.floor − origin| * 100 + slot_number`: floor proximity
/// dominates, the slot number breaks ties within a floor. Equal distances
/// resolve to the first candidate in scan order, which is deterministic
/// because floor and slot ordering are stable.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestSlot;

impl AllocationStrategy for NearestSlot {
    fn allocate(
        &self,
        vehicle: &Vehicle,
        floors: &[ParkingFloor],
        origin_floor: u32,
    ) -> Option<SlotAddress> {
        let mut best: Option<(u32, SlotAddress)> = None;
        for (floor_pos, floor) in floors.iter().enumerate() {
            for (slot_pos, slot) in floor.compatible_slots(vehicle) {
                let distance = slot.distance_from(origin_floor);
                if best.map_or(true, |(shortest, _)| distance < shortest) {
                    best = Some((
                        distance,
                        SlotAddress {
                            floor_pos,
                            slot_pos,
                        },
                    ));
                }
            }
        }

        if let Some((distance, address)) = best {
            debug!(
                vehicle = %vehicle.id,
                slot = %floors[address.floor_pos].slots()[address.slot_pos].id(),
                distance,
                "nearest slot selected"
            );
        }
        best.map(|(_, address)| address)
    }
}

// ── Tests ──────────────────────────────────────────────────────
