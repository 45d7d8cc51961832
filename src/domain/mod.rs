//! Core domain entities.

pub mod bill;
pub mod floor;
pub mod gate;
pub mod slot;
pub mod ticket;
pub mod vehicle;

pub use bill::{Bill, PaymentMethod};
pub use floor::ParkingFloor;
pub use gate::Gate;
pub use slot::{ParkingSlot, SlotClass, SlotStatus};
pub use ticket::Ticket;
pub use vehicle::{FuelCategory, Vehicle, VehicleCategory};
