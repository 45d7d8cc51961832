//! Parking slot state machine.

use std::fmt;

use crate::domain::vehicle::{Vehicle, VehicleCategory};
use crate::error::{DomainError, DomainResult};

/// Capacity class of a slot, in the same units as vehicle sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotClass {
    Small,
    Medium,
    Large,
}

impl SlotClass {
    pub const ALL: [SlotClass; 3] = [Self::Small, Self::Medium, Self::Large];

    /// Capacity units this class can host.
    pub fn size_units(self) -> u8 {
        match self {
            Self::Small => 1,
            Self::Medium => 2,
            Self::Large => 4,
        }
    }

    /// Whether a vehicle of `category` fits in this class.
    pub fn can_fit(self, category: VehicleCategory) -> bool {
        self.size_units() >= category.size_units()
    }

    /// Single-letter code used in slot identifiers.
    pub fn letter(self) -> char {
        match self {
            Self::Small => 'S',
            Self::Medium => 'M',
            Self::Large => 'L',
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Small => "Small",
            Self::Medium => "Medium",
            Self::Large => "Large",
        }
    }
}

impl fmt::Display for SlotClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Occupancy state of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStatus {
    Empty,
    Occupied,
    /// Withdrawn from allocation by maintenance; no automatic way back.
    OutOfService,
}

impl Default for SlotStatus {
    fn default() -> Self {
        Self::Empty
    }
}

impl fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Empty"),
            Self::Occupied => write!(f, "Occupied"),
            Self::OutOfService => write!(f, "OutOfService"),
        }
    }
}

/// A single physical parking space.
///
/// Invariant: `occupant` is `Some` iff the status is `Occupied`, and an
/// occupant always fits the slot's capacity class.
#[derive(Debug, Clone)]
pub struct ParkingSlot {
    id: String,
    class: SlotClass,
    status: SlotStatus,
    charging_capable: bool,
    occupant: Option<Vehicle>,
    floor: u32,
    slot_number: u32,
}

impl ParkingSlot {
    /// Creates an empty slot. The id is derived from floor, class and slot
    /// number (`F0S1`, `F2L14`, …) and is stable for the process lifetime.
    pub fn new(class: SlotClass, charging_capable: bool, floor: u32, slot_number: u32) -> Self {
        Self {
            id: format!("F{}{}{}", floor, class.letter(), slot_number),
            class,
            status: SlotStatus::Empty,
            charging_capable,
            occupant: None,
            floor,
            slot_number,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn class(&self) -> SlotClass {
        self.class
    }

    pub fn status(&self) -> SlotStatus {
        self.status
    }

    pub fn charging_capable(&self) -> bool {
        self.charging_capable
    }

    pub fn occupant(&self) -> Option<&Vehicle> {
        self.occupant.as_ref()
    }

    pub fn floor(&self) -> u32 {
        self.floor
    }

    /// 1-based position within the floor, used by the distance metric.
    pub fn slot_number(&self) -> u32 {
        self.slot_number
    }

    pub fn is_empty(&self) -> bool {
        self.status == SlotStatus::Empty
    }

    /// Whether `vehicle` could be parked here right now: the slot is empty,
    /// the capacity class fits, and charging hardware is present if the
    /// vehicle needs it.
    pub fn can_accommodate(&self, vehicle: &Vehicle) -> bool {
        self.status == SlotStatus::Empty
            && self.class.can_fit(vehicle.category)
            && (!vehicle.needs_charging() || self.charging_capable)
    }

    /// Occupies the slot. The compatibility check is re-evaluated at call
    /// time; on rejection the vehicle is handed back unchanged.
    pub fn park(&mut self, vehicle: Vehicle) -> Result<(), Vehicle> {
        if !self.can_accommodate(&vehicle) {
            return Err(vehicle);
        }
        self.occupant = Some(vehicle);
        self.status = SlotStatus::Occupied;
        Ok(())
    }

    /// Clears the slot and returns the previous occupant.
    ///
    /// Releasing an empty slot is a no-op returning `None`; an out-of-service
    /// slot keeps its status.
    pub fn release(&mut self) -> Option<Vehicle> {
        let vehicle = self.occupant.take()?;
        self.status = SlotStatus::Empty;
        Some(vehicle)
    }

    /// Withdraws the slot from allocation. Refused while occupied.
    pub fn set_out_of_service(&mut self) -> DomainResult<()> {
        if self.status == SlotStatus::Occupied {
            return Err(DomainError::Conflict(format!(
                "slot {} is occupied and cannot be taken out of service",
                self.id
            )));
        }
        self.status = SlotStatus::OutOfService;
        Ok(())
    }

    /// Explicit inverse of [`set_out_of_service`](Self::set_out_of_service);
    /// there is no automatic transition back to `Empty`.
    pub fn return_to_service(&mut self) {
        if self.status == SlotStatus::OutOfService {
            self.status = SlotStatus::Empty;
        }
    }

    /// Distance metric for nearest-slot search: floor proximity dominates,
    /// the slot number breaks ties within a floor.
    pub fn distance_from(&self, origin_floor: u32) -> u32 {
        self.floor.abs_diff(origin_floor) * 100 + self.slot_number
    }
}

// ── Tests ──────────────────────────────────────────────────────
