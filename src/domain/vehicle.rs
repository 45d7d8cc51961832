//! Vehicle domain entity.

use std::fmt;

/// Vehicle category, sized in capacity units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VehicleCategory {
    Bike,
    Car,
    Auto,
    Bus,
}

impl VehicleCategory {
    /// Capacity units the vehicle consumes when parked.
    pub fn size_units(self) -> u8 {
        match self {
            Self::Bike => 1,
            Self::Car => 2,
            Self::Auto => 2,
            Self::Bus => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bike => "Bike",
            Self::Car => "Car",
            Self::Auto => "Auto",
            Self::Bus => "Bus",
        }
    }
}

impl fmt::Display for VehicleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fuel category, determines whether the vehicle wants a charging slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuelCategory {
    Petrol,
    Electric,
    Hybrid,
}

impl fmt::Display for FuelCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Petrol => write!(f, "Petrol"),
            Self::Electric => write!(f, "Electric"),
            Self::Hybrid => write!(f, "Hybrid"),
        }
    }
}

/// A vehicle identified by its registration number.
///
/// Immutable after creation; the registration number is unique per active
/// stay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    pub id: String,
    pub category: VehicleCategory,
    pub fuel: FuelCategory,
}

impl Vehicle {
    pub fn new(id: impl Into<String>, category: VehicleCategory, fuel: FuelCategory) -> Self {
        Self {
            id: id.into(),
            category,
            fuel,
        }
    }

    /// Electric and hybrid vehicles ask for a charging-capable slot.
    pub fn needs_charging(&self) -> bool {
        matches!(self.fuel, FuelCategory::Electric | FuelCategory::Hybrid)
    }

    pub fn size_units(&self) -> u8 {
        self.category.size_units()
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.id, self.category, self.fuel)
    }
}

// ── Tests ──────────────────────────────────────────────────────
