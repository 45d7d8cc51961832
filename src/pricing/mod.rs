//! Fare computation strategies.
//!
//! A pricing strategy is a pure function of a ticket and the current time;
//! it never touches facility state. Strategies are swappable at the facility
//! level: [`DynamicPricing`] is the standard tiered schedule,
//! [`PerHourPricing`] the flat drop-in alternative.

mod dynamic;
mod per_hour;

pub use dynamic::{DynamicPricing, RateCard};
pub use per_hour::{HourlyRateCard, PerHourPricing};

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::domain::Ticket;

/// Computes a fare from a completed or in-progress stay.
pub trait PricingStrategy: Send + Sync {
    /// Fare for the stay described by `ticket`, ended (or previewed) at
    /// `now`.
    fn price(&self, ticket: &Ticket, now: DateTime<Utc>) -> Decimal {
        self.breakdown(ticket, now).total
    }

    /// Itemized fare for the same stay.
    fn breakdown(&self, ticket: &Ticket, now: DateTime<Utc>) -> FareBreakdown;

    /// Static rate sheet for display.
    fn rate_table(&self) -> RateTable;
}

/// Itemized fare for one stay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FareBreakdown {
    pub billable_hours: i64,
    /// Parking cost after any peak surcharge, before discount.
    pub base_cost: Decimal,
    pub peak_applied: bool,
    pub charging_cost: Decimal,
    pub discount_multiplier: Decimal,
    /// Final amount: discounted, clamped to the minimum charge and rounded
    /// to cents.
    pub total: Decimal,
}

/// Display-only rate sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateTable {
    pub policy: &'static str,
    /// Per-hour base rate by vehicle category.
    pub base_rates: Vec<CategoryRate>,
    /// Per-class multipliers; empty for flat policies.
    pub slot_multipliers: Vec<ClassMultiplier>,
    pub charging: ChargingRate,
    pub peak: Option<PeakWindow>,
    pub discounts: Vec<DiscountTier>,
    pub minimum_charge: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRate {
    pub category: String,
    pub per_hour: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassMultiplier {
    pub class: String,
    pub multiplier: Decimal,
}

/// Charging add-on: billed per hour or per session, depending on policy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChargingRate {
    pub per_hour: Option<Decimal>,
    pub per_session: Option<Decimal>,
}

/// Daily surcharge window, matched against the entry hour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeakWindow {
    pub start_hour: u32,
    pub end_hour: u32,
    pub multiplier: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscountTier {
    pub min_hours: i64,
    pub multiplier: Decimal,
}

/// Billable duration: partial hours round up, minimum one hour.
pub fn billable_hours(ticket: &Ticket, now: DateTime<Utc>) -> i64 {
    let minutes = ticket.minutes_parked(now);
    ((minutes + 59) / 60).max(1)
}

/// Rounds a fare to cents, half-up.
pub(crate) fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        FuelCategory, ParkingSlot, SlotClass, Vehicle, VehicleCategory,
    };
    use chrono::{Duration, TimeZone};

    fn sample_ticket() -> Ticket {
        let vehicle = Vehicle::new("C1", VehicleCategory::Car, FuelCategory::Petrol);
        let slot = ParkingSlot::new(SlotClass::Medium, false, 0, 1);
        let entered_at = Utc.with_ymd_and_hms(2025, 3, 10, 6, 0, 0).unwrap();
        Ticket::issue(vehicle, &slot, "ENTRY_01", entered_at)
    }

    #[test]
    fn partial_hours_round_up() {
        let ticket = sample_ticket();
        assert_eq!(
            billable_hours(&ticket, ticket.entered_at + Duration::minutes(90)),
            2
        );
        assert_eq!(
            billable_hours(&ticket, ticket.entered_at + Duration::minutes(61)),
            2
        );
        assert_eq!(
            billable_hours(&ticket, ticket.entered_at + Duration::minutes(60)),
            1
        );
    }

    #[test]
    fn minimum_one_billable_hour() {
        let ticket = sample_ticket();
        assert_eq!(billable_hours(&ticket, ticket.entered_at), 1);
        assert_eq!(
            billable_hours(&ticket, ticket.entered_at + Duration::seconds(30)),
            1
        );
    }

    #[test]
    fn rounding_is_half_up_at_the_cent() {
        assert_eq!(round_to_cents(Decimal::new(1005, 3)), Decimal::new(101, 2));
        assert_eq!(round_to_cents(Decimal::new(1004, 3)), Decimal::new(100, 2));
    }

    #[test]
    fn rate_table_serializes_for_display() {
        let table = DynamicPricing::new().rate_table();
        let value = serde_json::to_value(&table).unwrap();
        assert_eq!(value["policy"], "dynamic");
        assert_eq!(value["base_rates"].as_array().unwrap().len(), 4);
        assert_eq!(value["peak"]["start_hour"], 9);
        assert_eq!(value["peak"]["end_hour"], 18);
    }
}
