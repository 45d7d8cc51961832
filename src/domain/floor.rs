//! Parking floor: an ordered collection of slots.

use std::collections::HashMap;

use rand::Rng;

use crate::domain::slot::{ParkingSlot, SlotClass, SlotStatus};
use crate::domain::vehicle::Vehicle;
use crate::error::{DomainError, DomainResult};

/// A floor owning its slots in insertion order, with a secondary index by
/// capacity class for per-class scans.
///
/// Invariant: every slot's floor number equals this floor's index.
#[derive(Debug, Clone)]
pub struct ParkingFloor {
    index: u32,
    slots: Vec<ParkingSlot>,
    by_class: HashMap<SlotClass, Vec<usize>>,
}

impl ParkingFloor {
    pub fn new(index: u32) -> Self {
        Self {
            index,
            slots: Vec::new(),
            by_class: SlotClass::ALL.iter().map(|c| (*c, Vec::new())).collect(),
        }
    }

    /// Builds a floor with `small`/`medium`/`large` slots numbered
    /// sequentially from 1. Each slot gets charging hardware with probability
    /// `charging_percent / 100`.
    pub fn with_layout(
        index: u32,
        small: u32,
        medium: u32,
        large: u32,
        charging_percent: f64,
        rng: &mut impl Rng,
    ) -> Self {
        let mut floor = Self::new(index);
        let p = (charging_percent / 100.0).clamp(0.0, 1.0);
        let mut number = 1u32;
        for (class, count) in [
            (SlotClass::Small, small),
            (SlotClass::Medium, medium),
            (SlotClass::Large, large),
        ] {
            for _ in 0..count {
                floor.push_slot(ParkingSlot::new(class, rng.gen_bool(p), index, number));
                number += 1;
            }
        }
        floor
    }

    /// Adds a slot; the slot's floor number must match this floor's index.
    pub fn add_slot(&mut self, slot: ParkingSlot) -> DomainResult<()> {
        if slot.floor() != self.index {
            return Err(DomainError::Invariant(format!(
                "slot {} belongs to floor {}, not floor {}",
                slot.id(),
                slot.floor(),
                self.index
            )));
        }
        self.push_slot(slot);
        Ok(())
    }

    fn push_slot(&mut self, slot: ParkingSlot) {
        self.by_class
            .entry(slot.class())
            .or_default()
            .push(self.slots.len());
        self.slots.push(slot);
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn slots(&self) -> &[ParkingSlot] {
        &self.slots
    }

    pub(crate) fn slot_mut(&mut self, pos: usize) -> Option<&mut ParkingSlot> {
        self.slots.get_mut(pos)
    }

    pub(crate) fn slot_by_id_mut(&mut self, slot_id: &str) -> Option<&mut ParkingSlot> {
        self.slots.iter_mut().find(|s| s.id() == slot_id)
    }

    /// Positions and slots currently able to take `vehicle`.
    pub fn compatible_slots<'a>(
        &'a self,
        vehicle: &'a Vehicle,
    ) -> impl Iterator<Item = (usize, &'a ParkingSlot)> {
        self.slots
            .iter()
            .enumerate()
            .filter(move |(_, slot)| slot.can_accommodate(vehicle))
    }

    pub fn has_capacity_for(&self, vehicle: &Vehicle) -> bool {
        self.compatible_slots(vehicle).next().is_some()
    }

    pub fn total_slots(&self) -> usize {
        self.slots.len()
    }

    pub fn available_count(&self) -> usize {
        self.count_with_status(SlotStatus::Empty)
    }

    pub fn occupied_count(&self) -> usize {
        self.count_with_status(SlotStatus::Occupied)
    }

    pub fn out_of_service_count(&self) -> usize {
        self.count_with_status(SlotStatus::OutOfService)
    }

    fn count_with_status(&self, status: SlotStatus) -> usize {
        self.slots.iter().filter(|s| s.status() == status).count()
    }

    /// Empty slots of one capacity class, served by the secondary index.
    pub fn available_count_for(&self, class: SlotClass) -> usize {
        self.by_class.get(&class).map_or(0, |positions| {
            positions
                .iter()
                .filter(|&&pos| self.slots[pos].is_empty())
                .count()
        })
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::vehicle::{FuelCategory, VehicleCategory};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample_floor() -> ParkingFloor {
        let mut floor = ParkingFloor::new(1);
        floor
            .add_slot(ParkingSlot::new(SlotClass::Small, false, 1, 1))
            .unwrap();
        floor
            .add_slot(ParkingSlot::new(SlotClass::Medium, true, 1, 2))
            .unwrap();
        floor
            .add_slot(ParkingSlot::new(SlotClass::Large, false, 1, 3))
            .unwrap();
        floor
    }

    #[test]
    fn add_slot_rejects_floor_mismatch() {
        let mut floor = ParkingFloor::new(0);
        let misplaced = ParkingSlot::new(SlotClass::Small, false, 3, 1);
        assert!(matches!(
            floor.add_slot(misplaced),
            Err(DomainError::Invariant(_))
        ));
        assert_eq!(floor.total_slots(), 0);
    }

    #[test]
    fn compatible_slots_filters_by_size_and_charging() {
        let floor = sample_floor();
        let bus = Vehicle::new("B1", VehicleCategory::Bus, FuelCategory::Petrol);
        let ev = Vehicle::new("E1", VehicleCategory::Car, FuelCategory::Electric);

        let for_bus: Vec<_> = floor.compatible_slots(&bus).map(|(_, s)| s.id()).collect();
        assert_eq!(for_bus, vec!["F1L3"]);

        let for_ev: Vec<_> = floor.compatible_slots(&ev).map(|(_, s)| s.id()).collect();
        assert_eq!(for_ev, vec!["F1M2"]);
    }

    #[test]
    fn counts_track_occupancy() {
        let mut floor = sample_floor();
        assert_eq!(floor.available_count(), 3);
        assert_eq!(floor.occupied_count(), 0);

        let car = Vehicle::new("C1", VehicleCategory::Car, FuelCategory::Petrol);
        floor.slot_mut(1).unwrap().park(car).unwrap();
        assert_eq!(floor.available_count(), 2);
        assert_eq!(floor.occupied_count(), 1);
        assert_eq!(floor.available_count_for(SlotClass::Medium), 0);
        assert_eq!(floor.available_count_for(SlotClass::Small), 1);
    }

    #[test]
    fn layout_builder_numbers_slots_sequentially() {
        let mut rng = StdRng::seed_from_u64(7);
        let floor = ParkingFloor::with_layout(2, 2, 2, 1, 50.0, &mut rng);
        assert_eq!(floor.total_slots(), 5);
        let ids: Vec<_> = floor.slots().iter().map(|s| s.id().to_string()).collect();
        assert_eq!(ids, vec!["F2S1", "F2S2", "F2M3", "F2M4", "F2L5"]);
        assert_eq!(floor.available_count_for(SlotClass::Medium), 2);
    }

    #[test]
    fn layout_builder_charging_extremes() {
        let mut rng = StdRng::seed_from_u64(1);
        let none = ParkingFloor::with_layout(0, 3, 0, 0, 0.0, &mut rng);
        assert!(none.slots().iter().all(|s| !s.charging_capable()));

        let all = ParkingFloor::with_layout(0, 3, 0, 0, 100.0, &mut rng);
        assert!(all.slots().iter().all(|s| s.charging_capable()));
    }

    #[test]
    fn out_of_service_excluded_from_availability() {
        let mut floor = sample_floor();
        floor.slot_mut(0).unwrap().set_out_of_service().unwrap();
        assert_eq!(floor.available_count(), 2);
        assert_eq!(floor.out_of_service_count(), 1);

        let bike = Vehicle::new("BK1", VehicleCategory::Bike, FuelCategory::Petrol);
        // The small slot is gone; the bike falls through to the larger ones.
        let ids: Vec<_> = floor.compatible_slots(&bike).map(|(_, s)| s.id()).collect();
        assert_eq!(ids, vec!["F1M2", "F1L3"]);
    }
}
