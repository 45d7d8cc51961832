//! # Parking Facility Core
//!
//! Slot allocation, pricing and lifecycle state machine for a multi-floor
//! parking facility: vehicles enter through gates, get a slot from an
//! allocation strategy and a time-stamped ticket, and on exit are billed by
//! a pricing strategy before the slot is released.
//!
//! The interactive front end (menus, input parsing, console formatting,
//! process bootstrapping) is an external collaborator and talks to this
//! crate only through [`facility::ParkingFacility`]. All state is in-memory
//! for the process lifetime.
//!
//! ## Architecture
//!
//! - **domain**: core entities — vehicles, slots, floors, gates, tickets,
//!   bills
//! - **allocation**: pluggable slot-selection strategies
//! - **pricing**: pluggable fare policies and their rate sheets
//! - **payment**: the payment-confirmation seam
//! - **facility**: the orchestrating aggregate and its queries
//! - **config**: TOML-loadable facility layout

pub mod allocation;
pub mod config;
pub mod domain;
pub mod error;
pub mod facility;
pub mod payment;
pub mod pricing;

pub use allocation::{AllocationStrategy, NearestSlot, SlotAddress};
pub use config::{FacilityConfig, FloorConfig, GateConfig};
pub use domain::{
    Bill, FuelCategory, Gate, ParkingFloor, ParkingSlot, PaymentMethod, SlotClass, SlotStatus,
    Ticket, Vehicle, VehicleCategory,
};
pub use error::{ConfigError, DomainError, DomainResult};
pub use facility::{CapacitySummary, FloorSummary, ParkingFacility};
pub use payment::{InstantPayment, PaymentProcessor};
pub use pricing::{
    DynamicPricing, FareBreakdown, HourlyRateCard, PerHourPricing, PricingStrategy, RateCard,
    RateTable,
};
