//! Facility orchestration: parking, exits, queries, maintenance.

use std::collections::HashMap;

use chrono::Utc;
use rand::Rng;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use crate::allocation::{AllocationStrategy, NearestSlot};
use crate::config::FacilityConfig;
use crate::domain::{Bill, Gate, ParkingFloor, ParkingSlot, PaymentMethod, Ticket, Vehicle};
use crate::error::{ConfigError, DomainError, DomainResult};
use crate::payment::{InstantPayment, PaymentProcessor};
use crate::pricing::{DynamicPricing, PricingStrategy, RateTable};

/// Facility-wide occupancy counts, a pure read over current state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapacitySummary {
    pub total_slots: usize,
    pub available: usize,
    pub occupied: usize,
    pub out_of_service: usize,
    pub occupancy_pct: f64,
    pub per_floor: Vec<FloorSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloorSummary {
    pub floor: u32,
    pub available: usize,
    pub total: usize,
}

/// The parking facility aggregate.
///
/// Owns the floors, the gate lists and the active-ticket index, and holds
/// the pluggable allocation, pricing and payment strategies. All mutation
/// goes through `&mut self`, so allocate-and-occupy is a single exclusive
/// step: no two park calls can race for the same slot, and no vehicle can
/// hold two tickets.
///
/// Central invariant: a vehicle id is a key in the active-ticket index iff
/// exactly one slot is occupied by that vehicle.
pub struct ParkingFacility {
    floors: Vec<ParkingFloor>,
    entry_gates: Vec<Gate>,
    exit_gates: Vec<Gate>,
    allocation: Box<dyn AllocationStrategy>,
    pricing: Box<dyn PricingStrategy>,
    payment: Box<dyn PaymentProcessor>,
    active_tickets: HashMap<String, Ticket>,
}

impl ParkingFacility {
    /// An empty facility with the given strategies and instant payment.
    pub fn new(
        allocation: Box<dyn AllocationStrategy>,
        pricing: Box<dyn PricingStrategy>,
    ) -> Self {
        Self {
            floors: Vec::new(),
            entry_gates: Vec::new(),
            exit_gates: Vec::new(),
            allocation,
            pricing,
            payment: Box::new(InstantPayment),
            active_tickets: HashMap::new(),
        }
    }

    /// Builds a facility from configuration with the standard strategies:
    /// nearest-slot allocation, dynamic pricing, instant payment.
    pub fn from_config(config: &FacilityConfig) -> Result<Self, ConfigError> {
        Self::from_config_with_rng(config, &mut rand::thread_rng())
    }

    /// Like [`from_config`](Self::from_config) but with a caller-supplied
    /// RNG for the charging-hardware assignment, so layouts can be seeded.
    pub fn from_config_with_rng(
        config: &FacilityConfig,
        rng: &mut impl Rng,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut facility = Self::new(Box::new(NearestSlot), Box::new(DynamicPricing::new()));
        for floor in &config.floors {
            facility.floors.push(ParkingFloor::with_layout(
                floor.index,
                floor.small,
                floor.medium,
                floor.large,
                floor.charging_percent,
                rng,
            ));
        }
        for gate in &config.entry_gates {
            facility.entry_gates.push(Gate::new(gate.id.clone(), gate.floor));
        }
        for gate in &config.exit_gates {
            facility.exit_gates.push(Gate::new(gate.id.clone(), gate.floor));
        }

        info!(
            floors = facility.floors.len(),
            slots = facility.floors.iter().map(|f| f.total_slots()).sum::<usize>(),
            "facility initialized"
        );
        Ok(facility)
    }

    pub fn add_floor(&mut self, floor: ParkingFloor) {
        self.floors.push(floor);
    }

    pub fn add_entry_gate(&mut self, gate: Gate) {
        self.entry_gates.push(gate);
    }

    pub fn add_exit_gate(&mut self, gate: Gate) {
        self.exit_gates.push(gate);
    }

    pub fn set_allocation_strategy(&mut self, strategy: Box<dyn AllocationStrategy>) {
        self.allocation = strategy;
    }

    pub fn set_pricing_strategy(&mut self, strategy: Box<dyn PricingStrategy>) {
        self.pricing = strategy;
    }

    pub fn set_payment_processor(&mut self, processor: Box<dyn PaymentProcessor>) {
        self.payment = processor;
    }

    pub fn floors(&self) -> &[ParkingFloor] {
        &self.floors
    }

    pub fn entry_gates(&self) -> &[Gate] {
        &self.entry_gates
    }

    pub fn exit_gates(&self) -> &[Gate] {
        &self.exit_gates
    }

    fn entry_gate(&self, id: &str) -> Option<&Gate> {
        self.entry_gates.iter().find(|g| g.id == id)
    }

    fn exit_gate(&self, id: &str) -> Option<&Gate> {
        self.exit_gates.iter().find(|g| g.id == id)
    }

    /// Parks `vehicle`, issuing a time-stamped ticket.
    ///
    /// The ticket is created and the slot occupied as one step; on any error
    /// nothing has changed.
    pub fn park(&mut self, vehicle: Vehicle, entry_gate_id: &str) -> DomainResult<Ticket> {
        let origin_floor = self
            .entry_gate(entry_gate_id)
            .ok_or_else(|| DomainError::NotFound {
                entity: "entry gate",
                field: "id",
                value: entry_gate_id.to_string(),
            })?
            .floor;

        if self.active_tickets.contains_key(&vehicle.id) {
            return Err(DomainError::Conflict(format!(
                "vehicle {} is already parked",
                vehicle.id
            )));
        }

        let address = self
            .allocation
            .allocate(&vehicle, &self.floors, origin_floor)
            .ok_or_else(|| {
                DomainError::Unavailable(format!(
                    "no compatible slot for vehicle {} ({}, {})",
                    vehicle.id, vehicle.category, vehicle.fuel
                ))
            })?;

        let slot = self
            .floors
            .get_mut(address.floor_pos)
            .and_then(|floor| floor.slot_mut(address.slot_pos))
            .ok_or_else(|| {
                DomainError::Invariant(format!(
                    "allocation returned dangling address {:?}",
                    address
                ))
            })?;

        // The strategy already filtered on compatibility; a rejection here
        // means the scan and the occupation disagree.
        if let Err(rejected) = slot.park(vehicle.clone()) {
            return Err(DomainError::Invariant(format!(
                "slot {} rejected vehicle {} after allocation",
                slot.id(),
                rejected.id
            )));
        }

        let ticket = Ticket::issue(vehicle, slot, entry_gate_id, Utc::now());
        info!(
            vehicle = %ticket.vehicle.id,
            slot = %ticket.slot_id,
            floor = ticket.floor,
            ticket = %ticket.id,
            "vehicle parked"
        );
        self.active_tickets
            .insert(ticket.vehicle.id.clone(), ticket.clone());
        Ok(ticket)
    }

    /// Settles the stay and frees the slot.
    ///
    /// Payment must confirm before any state changes; a declined payment
    /// leaves the vehicle parked and the ticket active. On success the bill
    /// is paid, the slot released and the ticket removed together.
    pub fn exit(
        &mut self,
        vehicle_id: &str,
        exit_gate_id: &str,
        payment_method: PaymentMethod,
    ) -> DomainResult<Bill> {
        if self.exit_gate(exit_gate_id).is_none() {
            return Err(DomainError::NotFound {
                entity: "exit gate",
                field: "id",
                value: exit_gate_id.to_string(),
            });
        }

        let ticket = self
            .active_tickets
            .get(vehicle_id)
            .ok_or_else(|| DomainError::NotFound {
                entity: "active ticket",
                field: "vehicle",
                value: vehicle_id.to_string(),
            })?;

        let now = Utc::now();
        let amount = self.pricing.price(ticket, now);
        let mut bill = Bill::new(ticket.clone(), amount, payment_method, exit_gate_id, now);

        if let Err(err) = self.payment.process(&bill) {
            warn!(vehicle = vehicle_id, error = %err, "payment declined, vehicle stays parked");
            return Err(match err {
                declined @ DomainError::PaymentFailed(_) => declined,
                other => DomainError::PaymentFailed(other.to_string()),
            });
        }
        bill.mark_paid();

        let ticket = self.active_tickets.remove(vehicle_id).ok_or_else(|| {
            DomainError::Invariant(format!(
                "ticket for vehicle {} vanished during exit",
                vehicle_id
            ))
        })?;
        self.release_slot(&ticket)?;

        info!(
            vehicle = vehicle_id,
            bill = %bill.id,
            amount = %bill.amount,
            slot = %ticket.slot_id,
            "vehicle exited"
        );
        Ok(bill)
    }

    fn release_slot(&mut self, ticket: &Ticket) -> DomainResult<()> {
        let slot = self
            .floors
            .iter_mut()
            .find(|floor| floor.index() == ticket.floor)
            .and_then(|floor| floor.slot_by_id_mut(&ticket.slot_id))
            .ok_or_else(|| {
                DomainError::Invariant(format!(
                    "slot {} on floor {} is missing",
                    ticket.slot_id, ticket.floor
                ))
            })?;

        match slot.release() {
            Some(_) => Ok(()),
            None => Err(DomainError::Invariant(format!(
                "slot {} was not occupied at exit",
                ticket.slot_id
            ))),
        }
    }

    /// Read-only fare preview at the current elapsed time.
    pub fn quote(&self, vehicle_id: &str) -> DomainResult<Decimal> {
        let ticket = self
            .active_tickets
            .get(vehicle_id)
            .ok_or_else(|| DomainError::NotFound {
                entity: "active ticket",
                field: "vehicle",
                value: vehicle_id.to_string(),
            })?;
        Ok(self.pricing.price(ticket, Utc::now()))
    }

    /// Active ticket for a vehicle, if any.
    pub fn ticket_for(&self, vehicle_id: &str) -> Option<&Ticket> {
        self.active_tickets.get(vehicle_id)
    }

    pub fn active_ticket_count(&self) -> usize {
        self.active_tickets.len()
    }

    pub fn is_full(&self) -> bool {
        self.floors.iter().all(|floor| floor.available_count() == 0)
    }

    /// Whether any slot could take `vehicle` right now, without reserving it.
    pub fn has_capacity_for(&self, vehicle: &Vehicle) -> bool {
        self.floors.iter().any(|floor| floor.has_capacity_for(vehicle))
    }

    pub fn capacity_summary(&self) -> CapacitySummary {
        let total_slots: usize = self.floors.iter().map(|f| f.total_slots()).sum();
        let available: usize = self.floors.iter().map(|f| f.available_count()).sum();
        let occupied: usize = self.floors.iter().map(|f| f.occupied_count()).sum();
        let out_of_service: usize = self.floors.iter().map(|f| f.out_of_service_count()).sum();
        let occupancy_pct = if total_slots == 0 {
            0.0
        } else {
            occupied as f64 * 100.0 / total_slots as f64
        };

        CapacitySummary {
            total_slots,
            available,
            occupied,
            out_of_service,
            occupancy_pct,
            per_floor: self
                .floors
                .iter()
                .map(|floor| FloorSummary {
                    floor: floor.index(),
                    available: floor.available_count(),
                    total: floor.total_slots(),
                })
                .collect(),
        }
    }

    /// Static rate sheet of the current pricing strategy, for display.
    pub fn rate_table(&self) -> RateTable {
        self.pricing.rate_table()
    }

    /// Withdraws a slot from allocation. Refused while the slot is occupied.
    pub fn set_slot_out_of_service(&mut self, slot_id: &str) -> DomainResult<()> {
        let slot = self.slot_by_id_mut(slot_id).ok_or_else(|| DomainError::NotFound {
            entity: "slot",
            field: "id",
            value: slot_id.to_string(),
        })?;
        slot.set_out_of_service()?;
        info!(slot = slot_id, "slot taken out of service");
        Ok(())
    }

    /// Returns an out-of-service slot to allocation.
    pub fn return_slot_to_service(&mut self, slot_id: &str) -> DomainResult<()> {
        let slot = self.slot_by_id_mut(slot_id).ok_or_else(|| DomainError::NotFound {
            entity: "slot",
            field: "id",
            value: slot_id.to_string(),
        })?;
        slot.return_to_service();
        info!(slot = slot_id, "slot returned to service");
        Ok(())
    }

    fn slot_by_id_mut(&mut self, slot_id: &str) -> Option<&mut ParkingSlot> {
        self.floors
            .iter_mut()
            .find_map(|floor| floor.slot_by_id_mut(slot_id))
    }
}

// ── Tests ──────────────────────────────────────────────────────
