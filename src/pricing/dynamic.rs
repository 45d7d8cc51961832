//! Tiered dynamic pricing.

use chrono::{DateTime, Timelike, Utc};
use rust_decimal::Decimal;

use super::{
    billable_hours, round_to_cents, CategoryRate, ChargingRate, ClassMultiplier, DiscountTier,
    FareBreakdown, PeakWindow, PricingStrategy, RateTable,
};
use crate::domain::{SlotClass, Ticket, VehicleCategory};

/// First and last hour of day carrying the peak surcharge, inclusive.
const PEAK_START_HOUR: u32 = 9;
const PEAK_END_HOUR: u32 = 18;

/// Base rates and add-ons for [`DynamicPricing`].
///
/// Defaults are the facility's standard schedule; operators can supply their
/// own card through [`DynamicPricing::with_rates`].
#[derive(Debug, Clone, PartialEq)]
pub struct RateCard {
    pub bike_per_hour: Decimal,
    pub car_per_hour: Decimal,
    pub auto_per_hour: Decimal,
    pub bus_per_hour: Decimal,
    /// Flat hourly add-on while a charging vehicle occupies a wired slot.
    pub charging_per_hour: Decimal,
    /// Fares never drop below this, discounts included.
    pub minimum_charge: Decimal,
}

impl Default for RateCard {
    fn default() -> Self {
        Self {
            bike_per_hour: Decimal::new(200, 2),
            car_per_hour: Decimal::new(500, 2),
            auto_per_hour: Decimal::new(400, 2),
            bus_per_hour: Decimal::new(1000, 2),
            charging_per_hour: Decimal::new(300, 2),
            minimum_charge: Decimal::ONE,
        }
    }
}

impl RateCard {
    fn base_rate(&self, category: VehicleCategory) -> Decimal {
        match category {
            VehicleCategory::Bike => self.bike_per_hour,
            VehicleCategory::Car => self.car_per_hour,
            VehicleCategory::Auto => self.auto_per_hour,
            VehicleCategory::Bus => self.bus_per_hour,
        }
    }
}

/// Tiered pricing: per-category base rate, slot-class multiplier, peak-entry
/// surcharge, hourly charging add-on and long-stay discounts.
#[derive(Debug, Clone, Default)]
pub struct DynamicPricing {
    rates: RateCard,
}

impl DynamicPricing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses an operator-supplied rate card instead of the standard one.
    pub fn with_rates(rates: RateCard) -> Self {
        Self { rates }
    }

    fn slot_multiplier(class: SlotClass) -> Decimal {
        match class {
            SlotClass::Small => Decimal::ONE,
            SlotClass::Medium => Decimal::new(12, 1),
            SlotClass::Large => Decimal::new(15, 1),
        }
    }

    fn is_peak_hour(hour: u32) -> bool {
        (PEAK_START_HOUR..=PEAK_END_HOUR).contains(&hour)
    }

    fn peak_multiplier() -> Decimal {
        Decimal::new(15, 1)
    }

    fn discount_multiplier(hours: i64) -> Decimal {
        if hours >= 24 {
            Decimal::new(8, 1)
        } else if hours >= 8 {
            Decimal::new(9, 1)
        } else {
            Decimal::ONE
        }
    }
}

impl PricingStrategy for DynamicPricing {
    fn breakdown(&self, ticket: &Ticket, now: DateTime<Utc>) -> FareBreakdown {
        let hours = billable_hours(ticket, now);
        let hours_dec = Decimal::from(hours);

        let mut base_cost = self.rates.base_rate(ticket.vehicle.category)
            * Self::slot_multiplier(ticket.slot_class)
            * hours_dec;

        // Peak status comes from the entry hour alone, never the exit time,
        // even for stays spanning several days.
        let peak_applied = Self::is_peak_hour(ticket.entered_at.hour());
        if peak_applied {
            base_cost *= Self::peak_multiplier();
        }

        // Charging is billed after the surcharge and is never peak-priced.
        let charging_cost = if ticket.charging_in_use() {
            self.rates.charging_per_hour * hours_dec
        } else {
            Decimal::ZERO
        };

        let discount_multiplier = Self::discount_multiplier(hours);
        let total = ((base_cost + charging_cost) * discount_multiplier)
            .max(self.rates.minimum_charge);

        FareBreakdown {
            billable_hours: hours,
            base_cost,
            peak_applied,
            charging_cost,
            discount_multiplier,
            total: round_to_cents(total),
        }
    }

    fn rate_table(&self) -> RateTable {
        RateTable {
            policy: "dynamic",
            base_rates: [
                VehicleCategory::Bike,
                VehicleCategory::Car,
                VehicleCategory::Auto,
                VehicleCategory::Bus,
            ]
            .iter()
            .map(|&category| CategoryRate {
                category: category.to_string(),
                per_hour: self.rates.base_rate(category),
            })
            .collect(),
            slot_multipliers: SlotClass::ALL
                .iter()
                .map(|&class| ClassMultiplier {
                    class: class.to_string(),
                    multiplier: Self::slot_multiplier(class),
                })
                .collect(),
            charging: ChargingRate {
                per_hour: Some(self.rates.charging_per_hour),
                per_session: None,
            },
            peak: Some(PeakWindow {
                start_hour: PEAK_START_HOUR,
                end_hour: PEAK_END_HOUR,
                multiplier: Self::peak_multiplier(),
            }),
            discounts: vec![
                DiscountTier {
                    min_hours: 8,
                    multiplier: Decimal::new(9, 1),
                },
                DiscountTier {
                    min_hours: 24,
                    multiplier: Decimal::new(8, 1),
                },
            ],
            minimum_charge: Some(self.rates.minimum_charge),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FuelCategory, ParkingSlot, Vehicle};
    use chrono::{Duration, TimeZone};

    /// Ticket entered at the given hour of day, with full control over the
    /// slot facts pricing reads.
    fn ticket_at(
        hour: u32,
        category: VehicleCategory,
        fuel: FuelCategory,
        class: SlotClass,
        charging_slot: bool,
    ) -> Ticket {
        let vehicle = Vehicle::new("V1", category, fuel);
        let slot = ParkingSlot::new(class, charging_slot, 0, 1);
        let entered_at = Utc.with_ymd_and_hms(2025, 3, 10, hour, 0, 0).unwrap();
        Ticket::issue(vehicle, &slot, "ENTRY_01", entered_at)
    }

    #[test]
    fn ninety_minute_car_stay_in_medium_slot_off_peak() {
        let pricing = DynamicPricing::new();
        let ticket = ticket_at(
            20,
            VehicleCategory::Car,
            FuelCategory::Petrol,
            SlotClass::Medium,
            false,
        );
        let now = ticket.entered_at + Duration::minutes(90);
        // ceil(90/60) = 2 hours × 5.00 × 1.2
        assert_eq!(pricing.price(&ticket, now), Decimal::new(1200, 2));
    }

    #[test]
    fn twenty_five_hour_bus_stay_gets_long_stay_discount() {
        let pricing = DynamicPricing::new();
        let ticket = ticket_at(
            20,
            VehicleCategory::Bus,
            FuelCategory::Petrol,
            SlotClass::Large,
            false,
        );
        let now = ticket.entered_at + Duration::hours(25);
        // 10.00 × 1.5 × 25 = 375.00, ×0.8 = 300.00
        assert_eq!(pricing.price(&ticket, now), Decimal::new(30000, 2));
    }

    #[test]
    fn peak_entry_applies_surcharge() {
        let pricing = DynamicPricing::new();
        let ticket = ticket_at(
            10,
            VehicleCategory::Car,
            FuelCategory::Petrol,
            SlotClass::Small,
            false,
        );
        let now = ticket.entered_at + Duration::minutes(30);
        // 5.00 × 1.0 × 1h × 1.5
        assert_eq!(pricing.price(&ticket, now), Decimal::new(750, 2));
    }

    #[test]
    fn peak_window_bounds_are_inclusive() {
        for (hour, peak) in [(8, false), (9, true), (18, true), (19, false)] {
            let ticket = ticket_at(
                hour,
                VehicleCategory::Bike,
                FuelCategory::Petrol,
                SlotClass::Small,
                false,
            );
            let breakdown =
                DynamicPricing::new().breakdown(&ticket, ticket.entered_at + Duration::hours(1));
            assert_eq!(breakdown.peak_applied, peak, "hour {}", hour);
        }
    }

    #[test]
    fn peak_status_fixed_at_entry_for_multi_day_stays() {
        let pricing = DynamicPricing::new();
        // Entered off-peak; exits during the next day's peak window.
        let ticket = ticket_at(
            22,
            VehicleCategory::Car,
            FuelCategory::Petrol,
            SlotClass::Small,
            false,
        );
        let now = ticket.entered_at + Duration::hours(14);
        let breakdown = pricing.breakdown(&ticket, now);
        assert!(!breakdown.peak_applied);
        // 5.00 × 14 = 70.00, ×0.9 = 63.00
        assert_eq!(breakdown.total, Decimal::new(6300, 2));
    }

    #[test]
    fn charging_addon_is_not_peak_surcharged() {
        let pricing = DynamicPricing::new();
        let ticket = ticket_at(
            10,
            VehicleCategory::Car,
            FuelCategory::Electric,
            SlotClass::Medium,
            true,
        );
        let now = ticket.entered_at + Duration::hours(2);
        let breakdown = pricing.breakdown(&ticket, now);
        // base: 5.00 × 1.2 × 2 = 12.00, ×1.5 peak = 18.00
        assert_eq!(breakdown.base_cost, Decimal::new(1800, 2));
        // charging: 3.00 × 2, no surcharge
        assert_eq!(breakdown.charging_cost, Decimal::new(600, 2));
        assert_eq!(breakdown.total, Decimal::new(2400, 2));
    }

    #[test]
    fn no_charging_cost_without_charging_hardware() {
        let pricing = DynamicPricing::new();
        // An EV parked in an unwired slot pays no charging add-on.
        let ticket = ticket_at(
            20,
            VehicleCategory::Car,
            FuelCategory::Electric,
            SlotClass::Medium,
            false,
        );
        let breakdown = pricing.breakdown(&ticket, ticket.entered_at + Duration::hours(1));
        assert_eq!(breakdown.charging_cost, Decimal::ZERO);
    }

    #[test]
    fn discount_tiers_at_eight_and_twenty_four_hours() {
        let pricing = DynamicPricing::new();
        let ticket = ticket_at(
            20,
            VehicleCategory::Car,
            FuelCategory::Petrol,
            SlotClass::Small,
            false,
        );
        let cases = [
            (7, Decimal::new(3500, 2)),  // 5.00 × 7, no discount
            (8, Decimal::new(3600, 2)),  // 5.00 × 8 = 40.00 × 0.9
            (23, Decimal::new(10350, 2)), // 5.00 × 23 = 115.00 × 0.9
            (24, Decimal::new(9600, 2)), // 5.00 × 24 = 120.00 × 0.8
        ];
        for (hours, expected) in cases {
            let now = ticket.entered_at + Duration::hours(hours);
            assert_eq!(pricing.price(&ticket, now), expected, "{} hours", hours);
        }
    }

    #[test]
    fn discount_applies_to_charging_too() {
        let pricing = DynamicPricing::new();
        let ticket = ticket_at(
            20,
            VehicleCategory::Car,
            FuelCategory::Electric,
            SlotClass::Small,
            true,
        );
        let now = ticket.entered_at + Duration::hours(8);
        // (5.00 × 8 + 3.00 × 8) × 0.9 = 64.00 × 0.9 = 57.60
        assert_eq!(pricing.price(&ticket, now), Decimal::new(5760, 2));
    }

    #[test]
    fn near_zero_duration_bike_stay_bills_one_hour() {
        let pricing = DynamicPricing::new();
        let ticket = ticket_at(
            20,
            VehicleCategory::Bike,
            FuelCategory::Petrol,
            SlotClass::Small,
            false,
        );
        // 2.00 × 1.0 × 1h — above the 1.00 floor.
        let total = pricing.price(&ticket, ticket.entered_at + Duration::seconds(30));
        assert_eq!(total, Decimal::new(200, 2));
        assert!(total >= Decimal::ONE);
    }

    #[test]
    fn minimum_charge_floor_clamps_cheap_stays() {
        // The standard card never drops below 1.00; a cut-price card does.
        let pricing = DynamicPricing::with_rates(RateCard {
            bike_per_hour: Decimal::new(25, 2),
            ..RateCard::default()
        });
        let ticket = ticket_at(
            20,
            VehicleCategory::Bike,
            FuelCategory::Petrol,
            SlotClass::Small,
            false,
        );
        // 0.25 × 1h = 0.25, clamped to 1.00.
        assert_eq!(
            pricing.price(&ticket, ticket.entered_at + Duration::minutes(10)),
            Decimal::ONE
        );
    }

    #[test]
    fn fares_round_half_up_at_the_cent() {
        let pricing = DynamicPricing::with_rates(RateCard {
            bike_per_hour: Decimal::new(1005, 3), // 1.005 per hour
            ..RateCard::default()
        });
        let ticket = ticket_at(
            20,
            VehicleCategory::Bike,
            FuelCategory::Petrol,
            SlotClass::Small,
            false,
        );
        assert_eq!(
            pricing.price(&ticket, ticket.entered_at + Duration::minutes(10)),
            Decimal::new(101, 2)
        );
    }

    #[test]
    fn rate_table_reflects_card() {
        let table = DynamicPricing::new().rate_table();
        assert_eq!(table.policy, "dynamic");
        assert_eq!(table.base_rates.len(), 4);
        assert_eq!(table.slot_multipliers.len(), 3);
        assert_eq!(table.charging.per_hour, Some(Decimal::new(300, 2)));
        assert_eq!(table.minimum_charge, Some(Decimal::ONE));
        assert_eq!(table.discounts.len(), 2);
    }
}
