//! Pricing engine
//!
//! Pure functions over a [`Tier`] and a [`UsageSelection`]. Nothing here
//! holds state; the same inputs always produce the same outputs.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use super::model::{BillingPeriod, SupportAddOn, Tier, UsageSelection};

/// Total price of `tier` for the selected billing period.
///
/// Monthly selections yield a monthly total and yearly selections an annual
/// total; the two are not normalised to a common unit. Rates are capped at
/// [`MAX_RATE`](super::model::MAX_RATE), so even `u32::MAX` units of every
/// dimension stay in range.
pub fn compute_price(tier: &Tier, usage: &UsageSelection, support: &SupportAddOn) -> Decimal {
    let period = usage.billing_period;

    let mut price = tier.base_price.get(period);
    price += Decimal::from(usage.users) * tier.price_per_user.get(period);
    price += Decimal::from(usage.projects) * tier.price_per_project.get(period);
    price += Decimal::from(usage.storage_units) * tier.price_per_storage_unit.get(period);

    if usage.premium_support {
        price += support.get(period);
    }

    price
}

/// Whole-number percentage saved by paying yearly instead of twelve monthly
/// payments, for the current usage levels.
///
/// Returns 0 when the monthly total is not positive, or when the ratio does
/// not fit in a [`Decimal`] (a vanishingly small monthly total against a
/// large yearly one).
pub fn compute_yearly_savings_percent(
    tier: &Tier,
    usage: &UsageSelection,
    support: &SupportAddOn,
) -> i64 {
    let monthly_usage = usage.with_period(BillingPeriod::Monthly);

    let monthly_total = compute_price(tier, &monthly_usage, support);
    if monthly_total <= Decimal::ZERO {
        return 0;
    }

    let yearly_as_monthly = tier.with_yearly_rates_as_monthly();
    let yearly_equivalent_total = compute_price(&yearly_as_monthly, &monthly_usage, support);

    // Twelve months on both sides cancel out.
    let percent = (monthly_total - yearly_equivalent_total)
        .checked_div(monthly_total)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED));

    percent
        .and_then(|p| {
            p.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_i64()
        })
        .unwrap_or(0)
}

/// Rounds an amount to cents, midpoint away from zero.
pub fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount for display: `$118` for whole amounts, `$120.50` otherwise.
pub fn format_amount(amount: Decimal, symbol: &str) -> String {
    let rounded = round_to_cents(amount);
    if rounded.fract().is_zero() {
        format!("{}{}", symbol, rounded.trunc())
    } else {
        format!("{}{:.2}", symbol, rounded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pricing::catalog::TierCatalog;
    use crate::domain::pricing::model::{default_support_add_on, RateTable, TierRates, MAX_RATE};

    fn catalog() -> TierCatalog {
        TierCatalog::builtin()
    }

    fn tier(name: &str) -> Tier {
        catalog().find(name).cloned().unwrap()
    }

    fn usage(period: BillingPeriod, users: u32, projects: u32, storage: u32, support: bool) -> UsageSelection {
        UsageSelection {
            billing_period: period,
            users,
            projects,
            storage_units: storage,
            premium_support: support,
        }
    }

    #[test]
    fn professional_monthly_default_usage() {
        let price = compute_price(
            &tier("Professional"),
            &UsageSelection::default(),
            &default_support_add_on(),
        );
        // 59 + 5*4 + 3*8 + 10*1.5
        assert_eq!(price, Decimal::from(118));
    }

    #[test]
    fn professional_monthly_with_support() {
        let mut u = UsageSelection::default();
        u.premium_support = true;
        let price = compute_price(&tier("Professional"), &u, &default_support_add_on());
        assert_eq!(price, Decimal::from(167));
    }

    #[test]
    fn starter_yearly_minimum_usage() {
        let u = usage(BillingPeriod::Yearly, 1, 1, 5, false);
        let price = compute_price(&tier("Starter"), &u, &default_support_add_on());
        // 290 + 50 + 100 + 5*20
        assert_eq!(price, Decimal::from(540));
    }

    #[test]
    fn yearly_support_add_on_is_490() {
        let without = usage(BillingPeriod::Yearly, 1, 1, 5, false);
        let with = usage(BillingPeriod::Yearly, 1, 1, 5, true);
        let t = tier("Starter");
        let support = default_support_add_on();
        assert_eq!(
            compute_price(&t, &with, &support) - compute_price(&t, &without, &support),
            Decimal::from(490)
        );
    }

    #[test]
    fn fractional_storage_rate_is_exact() {
        let u = usage(BillingPeriod::Monthly, 1, 1, 5, false);
        let price = compute_price(&tier("Professional"), &u, &default_support_add_on());
        // 59 + 4 + 8 + 7.5
        assert_eq!(price, Decimal::new(785, 1));
    }

    #[test]
    fn price_is_monotonic_in_every_usage_dimension() {
        let support = default_support_add_on();
        for t in catalog().tiers() {
            for period in [BillingPeriod::Monthly, BillingPeriod::Yearly] {
                let base = usage(period, 5, 3, 10, false);
                let p = compute_price(t, &base, &support);

                let more_users = usage(period, 6, 3, 10, false);
                let more_projects = usage(period, 5, 4, 10, false);
                let more_storage = usage(period, 5, 3, 15, false);
                let with_support = usage(period, 5, 3, 10, true);

                assert!(compute_price(t, &more_users, &support) >= p);
                assert!(compute_price(t, &more_projects, &support) >= p);
                assert!(compute_price(t, &more_storage, &support) >= p);
                assert!(compute_price(t, &with_support, &support) >= p);
            }
        }
    }

    #[test]
    fn price_is_deterministic() {
        let t = tier("Enterprise");
        let u = usage(BillingPeriod::Yearly, 42, 17, 385, true);
        let support = default_support_add_on();
        let first = compute_price(&t, &u, &support);
        for _ in 0..10 {
            assert_eq!(compute_price(&t, &u, &support), first);
        }
    }

    #[test]
    fn savings_for_default_usage() {
        let support = default_support_add_on();
        let u = UsageSelection::default();
        // Every built-in tier prices a year at ten months
        for t in catalog().tiers() {
            assert_eq!(compute_yearly_savings_percent(t, &u, &support), 17, "{}", t.name);
        }
    }

    #[test]
    fn savings_are_within_bounds_under_default_usage() {
        let support = default_support_add_on();
        for period in [BillingPeriod::Monthly, BillingPeriod::Yearly] {
            let u = UsageSelection::default().with_period(period);
            for t in catalog().tiers() {
                let pct = compute_yearly_savings_percent(t, &u, &support);
                assert!((0..=100).contains(&pct), "{} -> {}", t.name, pct);
            }
        }
    }

    #[test]
    fn savings_depend_on_current_usage() {
        // Support add-on stays at its monthly price in both totals, diluting the discount
        let mut u = UsageSelection::default();
        u.premium_support = true;
        let pct = compute_yearly_savings_percent(&tier("Professional"), &u, &default_support_add_on());
        // (167 - 147.33) / 167 = 11.78%
        assert_eq!(pct, 12);
    }

    #[test]
    fn savings_ignore_selected_period() {
        let support = default_support_add_on();
        let t = tier("Starter");
        let monthly = UsageSelection::default();
        let yearly = monthly.with_period(BillingPeriod::Yearly);
        assert_eq!(
            compute_yearly_savings_percent(&t, &monthly, &support),
            compute_yearly_savings_percent(&t, &yearly, &support)
        );
    }

    #[test]
    fn zero_monthly_total_yields_zero_savings() {
        let free = Tier::new(
            "Free",
            "",
            TierRates {
                base_price: RateTable::whole(0, 0),
                price_per_user: RateTable::whole(0, 0),
                price_per_project: RateTable::whole(0, 0),
                price_per_storage_unit: RateTable::whole(0, 0),
            },
            vec![],
            vec![],
            false,
        )
        .unwrap();
        let pct = compute_yearly_savings_percent(&free, &UsageSelection::default(), &default_support_add_on());
        assert_eq!(pct, 0);
    }

    #[test]
    fn yearly_more_expensive_gives_negative_savings() {
        let odd = Tier::new(
            "Odd",
            "",
            TierRates {
                base_price: RateTable::whole(10, 240),
                price_per_user: RateTable::whole(0, 0),
                price_per_project: RateTable::whole(0, 0),
                price_per_storage_unit: RateTable::whole(0, 0),
            },
            vec![],
            vec![],
            false,
        )
        .unwrap();
        let pct = compute_yearly_savings_percent(&odd, &UsageSelection::default(), &default_support_add_on());
        assert_eq!(pct, -100);
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        // monthly 8, yearly 92 => (96 - 92) / 96 = 4.1666 -> 4
        // monthly 8, yearly 90 => (96 - 90) / 96 = 6.25 -> 6
        // monthly 16, yearly 183 => (192 - 183) / 192 = 4.6875 -> 5
        let make = |m: u32, y: u32| {
            Tier::new(
                "T",
                "",
                TierRates {
                    base_price: RateTable::whole(m, y),
                    price_per_user: RateTable::whole(0, 0),
                    price_per_project: RateTable::whole(0, 0),
                    price_per_storage_unit: RateTable::whole(0, 0),
                },
                vec![],
                vec![],
                false,
            )
            .unwrap()
        };
        let u = UsageSelection::default();
        let s = default_support_add_on();
        assert_eq!(compute_yearly_savings_percent(&make(8, 92), &u, &s), 4);
        assert_eq!(compute_yearly_savings_percent(&make(8, 90), &u, &s), 6);
        assert_eq!(compute_yearly_savings_percent(&make(16, 183), &u, &s), 5);
        // exact midpoint: monthly 8, yearly 84 => 12.5 -> 13
        assert_eq!(compute_yearly_savings_percent(&make(8, 84), &u, &s), 13);
    }

    fn flat_tier(monthly: Decimal, yearly: Decimal) -> Tier {
        let rate = RateTable::new("rate", monthly, yearly).unwrap();
        Tier::new(
            "Flat",
            "",
            TierRates {
                base_price: rate,
                price_per_user: rate,
                price_per_project: rate,
                price_per_storage_unit: rate,
            },
            vec![],
            vec![],
            false,
        )
        .unwrap()
    }

    #[test]
    fn largest_rates_and_usage_do_not_overflow() {
        let t = flat_tier(MAX_RATE, MAX_RATE);
        let support = RateTable::new("support_add_on", MAX_RATE, MAX_RATE).unwrap();
        let u = usage(BillingPeriod::Yearly, u32::MAX, u32::MAX, u32::MAX, true);

        let price = compute_price(&t, &u, &support);
        // base + support + three dimensions of u32::MAX units
        let units = Decimal::from(3 * u64::from(u32::MAX) + 2);
        assert_eq!(price, MAX_RATE * units);

        let pct = compute_yearly_savings_percent(&t, &u, &support);
        assert!((0..=100).contains(&pct), "{}", pct);
    }

    #[test]
    fn tiny_monthly_total_yields_zero_savings() {
        // (1e-28 - 1e9 / 12) / 1e-28 does not fit in a Decimal
        let t = flat_tier(Decimal::new(1, 28), MAX_RATE);
        let u = usage(BillingPeriod::Monthly, 0, 0, 0, false);
        let pct = compute_yearly_savings_percent(&t, &u, &default_support_add_on());
        assert_eq!(pct, 0);
    }

    #[test]
    fn format_amount_whole_and_fractional() {
        assert_eq!(format_amount(Decimal::from(118), "$"), "$118");
        assert_eq!(format_amount(Decimal::new(1205, 1), "$"), "$120.50");
        assert_eq!(format_amount(Decimal::new(98_335, 3), "$"), "$98.34");
    }

    #[test]
    fn round_to_cents_midpoint() {
        assert_eq!(round_to_cents(Decimal::new(12_345, 3)), Decimal::new(1235, 2));
    }
}
