//! Frequency policy shared by schedule generation and payment reporting.
//!
//! Every frequency-specific constant lives here: the monthly-to-period rate
//! factors, the 4.33 weeks-per-month period count, and the calendar stepping
//! rules. Nothing else in the crate hard-codes these numbers.

use chrono::{Duration, Months, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::decimal::Rate;
use crate::types::PaymentFrequency;

/// average weeks in a month, used to size weekly schedules
const WEEKS_PER_MONTH: Decimal = dec!(4.33);

/// days advanced per weekly period
const WEEKLY_STEP_DAYS: i64 = 7;

/// days advanced per biweekly period; a flat 15-day step, not a calendar
/// half-month
const BIWEEKLY_STEP_DAYS: i64 = 15;

/// ratio converting a monthly rate into a per-period rate
pub fn frequency_factor(frequency: PaymentFrequency) -> Decimal {
    match frequency {
        PaymentFrequency::Monthly => Decimal::ONE,
        PaymentFrequency::Biweekly => dec!(12) / dec!(24),
        PaymentFrequency::Weekly => dec!(12) / dec!(52),
    }
}

/// payment periods per calendar month
pub fn periods_per_month(frequency: PaymentFrequency) -> Decimal {
    match frequency {
        PaymentFrequency::Monthly => Decimal::ONE,
        PaymentFrequency::Biweekly => dec!(2),
        PaymentFrequency::Weekly => WEEKS_PER_MONTH,
    }
}

/// number of installments for a term expressed in months
pub fn period_count(term_months: u32, frequency: PaymentFrequency) -> u32 {
    match frequency {
        PaymentFrequency::Monthly => term_months,
        PaymentFrequency::Biweekly => term_months * 2,
        PaymentFrequency::Weekly => {
            let weeks = Decimal::from(term_months) * WEEKS_PER_MONTH;
            weeks
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_u32()
                .unwrap_or(u32::MAX)
        }
    }
}

/// per-period interest rate derived from the monthly rate
pub fn period_rate(monthly_rate: Rate, frequency: PaymentFrequency) -> Decimal {
    monthly_rate.as_decimal() * frequency_factor(frequency)
}

/// due date for installment `periods` counted from `start`
pub fn advance_date(start: NaiveDate, periods: u32, frequency: PaymentFrequency) -> NaiveDate {
    match frequency {
        PaymentFrequency::Monthly => start
            .checked_add_months(Months::new(periods))
            .unwrap_or(NaiveDate::MAX),
        PaymentFrequency::Weekly => start + Duration::days(WEEKLY_STEP_DAYS * periods as i64),
        PaymentFrequency::Biweekly => start + Duration::days(BIWEEKLY_STEP_DAYS * periods as i64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_frequency_factors() {
        assert_eq!(frequency_factor(PaymentFrequency::Monthly), Decimal::ONE);
        assert_eq!(frequency_factor(PaymentFrequency::Biweekly), dec!(0.5));
        assert_eq!(frequency_factor(PaymentFrequency::Weekly), dec!(12) / dec!(52));
    }

    #[test]
    fn test_period_counts() {
        assert_eq!(period_count(12, PaymentFrequency::Monthly), 12);
        assert_eq!(period_count(12, PaymentFrequency::Biweekly), 24);
        // 3 * 4.33 = 12.99 rounds to 13
        assert_eq!(period_count(3, PaymentFrequency::Weekly), 13);
        // 6 * 4.33 = 25.98 rounds to 26
        assert_eq!(period_count(6, PaymentFrequency::Weekly), 26);
        assert_eq!(period_count(1, PaymentFrequency::Weekly), 4);
    }

    #[test]
    fn test_period_rate_scaling() {
        let monthly = Rate::from_percentage(dec!(5));
        assert_eq!(period_rate(monthly, PaymentFrequency::Monthly), dec!(0.05));
        assert_eq!(period_rate(monthly, PaymentFrequency::Biweekly), dec!(0.025));
        assert_eq!(
            period_rate(monthly, PaymentFrequency::Weekly),
            dec!(0.05) * dec!(12) / dec!(52)
        );
    }

    #[test]
    fn test_monthly_stepping_clamps_month_end() {
        // Jan 31 + 1 month lands on the last day of February
        assert_eq!(
            advance_date(date(2024, 1, 31), 1, PaymentFrequency::Monthly),
            date(2024, 2, 29)
        );
        assert_eq!(
            advance_date(date(2023, 1, 31), 1, PaymentFrequency::Monthly),
            date(2023, 2, 28)
        );
        assert_eq!(
            advance_date(date(2024, 1, 15), 12, PaymentFrequency::Monthly),
            date(2025, 1, 15)
        );
    }

    #[test]
    fn test_weekly_stepping() {
        assert_eq!(
            advance_date(date(2024, 1, 1), 1, PaymentFrequency::Weekly),
            date(2024, 1, 8)
        );
        assert_eq!(
            advance_date(date(2024, 1, 1), 4, PaymentFrequency::Weekly),
            date(2024, 1, 29)
        );
    }

    #[test]
    fn test_biweekly_stepping_is_fifteen_days() {
        assert_eq!(
            advance_date(date(2024, 1, 1), 1, PaymentFrequency::Biweekly),
            date(2024, 1, 16)
        );
        assert_eq!(
            advance_date(date(2024, 1, 1), 2, PaymentFrequency::Biweekly),
            date(2024, 1, 31)
        );
    }
}
