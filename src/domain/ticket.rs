//! Parking ticket issued at entry.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::slot::{ParkingSlot, SlotClass};
use crate::domain::vehicle::Vehicle;

/// Record of an active stay.
///
/// Carries the vehicle and a handle to the assigned slot (`slot_id`) plus a
/// snapshot of the slot facts pricing needs. Class and charging capability
/// are fixed for a slot's lifetime, so the snapshot cannot go stale.
#[derive(Debug, Clone)]
pub struct Ticket {
    pub id: Uuid,
    pub vehicle: Vehicle,
    pub slot_id: String,
    pub floor: u32,
    pub slot_class: SlotClass,
    pub slot_has_charging: bool,
    pub entered_at: DateTime<Utc>,
    pub entry_gate_id: String,
}

impl Ticket {
    pub fn issue(
        vehicle: Vehicle,
        slot: &ParkingSlot,
        entry_gate_id: impl Into<String>,
        entered_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            vehicle,
            slot_id: slot.id().to_string(),
            floor: slot.floor(),
            slot_class: slot.class(),
            slot_has_charging: slot.charging_capable(),
            entered_at,
            entry_gate_id: entry_gate_id.into(),
        }
    }

    /// Minutes elapsed since entry, never negative.
    pub fn minutes_parked(&self, now: DateTime<Utc>) -> i64 {
        (now - self.entered_at).num_minutes().max(0)
    }

    /// Whether the vehicle is drawing charge in this slot.
    pub fn charging_in_use(&self) -> bool {
        self.vehicle.needs_charging() && self.slot_has_charging
    }
}

// ── Tests ──────────────────────────────────────────────────────
