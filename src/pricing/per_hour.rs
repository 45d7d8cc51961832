//! Flat per-hour pricing.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::{
    billable_hours, round_to_cents, CategoryRate, ChargingRate, FareBreakdown, PricingStrategy,
    RateTable,
};
use crate::domain::{Ticket, VehicleCategory};

/// Rates for [`PerHourPricing`].
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyRateCard {
    pub bike_per_hour: Decimal,
    pub car_per_hour: Decimal,
    pub auto_per_hour: Decimal,
    pub bus_per_hour: Decimal,
    /// Flat fee per stay when a charging vehicle occupies a wired slot.
    pub charging_per_session: Decimal,
}

impl Default for HourlyRateCard {
    fn default() -> Self {
        Self {
            bike_per_hour: Decimal::new(200, 2),
            car_per_hour: Decimal::new(400, 2),
            auto_per_hour: Decimal::new(350, 2),
            bus_per_hour: Decimal::new(800, 2),
            charging_per_session: Decimal::new(500, 2),
        }
    }
}

impl HourlyRateCard {
    fn hourly_rate(&self, category: VehicleCategory) -> Decimal {
        match category {
            VehicleCategory::Bike => self.bike_per_hour,
            VehicleCategory::Car => self.car_per_hour,
            VehicleCategory::Auto => self.auto_per_hour,
            VehicleCategory::Bus => self.bus_per_hour,
        }
    }
}

/// Flat hourly schedule: no peak surcharge, no slot-class multiplier, no
/// long-stay discount. Charging is a flat per-session fee.
///
/// Drop-in alternative to [`super::DynamicPricing`] at the facility level.
#[derive(Debug, Clone, Default)]
pub struct PerHourPricing {
    rates: HourlyRateCard,
}

impl PerHourPricing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rates(rates: HourlyRateCard) -> Self {
        Self { rates }
    }

    /// Pre-arrival estimate for a planned stay.
    pub fn estimate_cost(
        &self,
        category: VehicleCategory,
        hours: i64,
        needs_charging: bool,
    ) -> Decimal {
        let hours = hours.max(1);
        let parking = self.rates.hourly_rate(category) * Decimal::from(hours);
        let charging = if needs_charging {
            self.rates.charging_per_session
        } else {
            Decimal::ZERO
        };
        round_to_cents(parking + charging)
    }
}

impl PricingStrategy for PerHourPricing {
    fn breakdown(&self, ticket: &Ticket, now: DateTime<Utc>) -> FareBreakdown {
        let hours = billable_hours(ticket, now);
        let base_cost = self.rates.hourly_rate(ticket.vehicle.category) * Decimal::from(hours);
        let charging_cost = if ticket.charging_in_use() {
            self.rates.charging_per_session
        } else {
            Decimal::ZERO
        };

        FareBreakdown {
            billable_hours: hours,
            base_cost,
            peak_applied: false,
            charging_cost,
            discount_multiplier: Decimal::ONE,
            total: round_to_cents(base_cost + charging_cost),
        }
    }

    fn rate_table(&self) -> RateTable {
        RateTable {
            policy: "per-hour",
            base_rates: [
                VehicleCategory::Bike,
                VehicleCategory::Car,
                VehicleCategory::Auto,
                VehicleCategory::Bus,
            ]
            .iter()
            .map(|&category| CategoryRate {
                category: category.to_string(),
                per_hour: self.rates.hourly_rate(category),
            })
            .collect(),
            slot_multipliers: Vec::new(),
            charging: ChargingRate {
                per_hour: None,
                per_session: Some(self.rates.charging_per_session),
            },
            peak: None,
            discounts: Vec::new(),
            minimum_charge: None,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
