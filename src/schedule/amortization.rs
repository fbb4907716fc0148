use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::Result;
use crate::types::LoanTerms;

use super::period::{advance_date, period_count, period_rate};

/// one row of an amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Installment {
    /// 1-based, contiguous sequence number
    pub number: u32,
    pub due_date: NaiveDate,
    pub payment_amount: Money,
    pub principal_portion: Money,
    pub interest_portion: Money,
    /// outstanding balance after this installment's scheduled principal
    pub remaining_balance: Money,
    pub paid: bool,
}

/// amortization schedule, generated once at origination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub periodic_payment: Money,
    pub total_payable: Money,
    pub total_interest: Money,
    pub installments: Vec<Installment>,
}

impl Schedule {
    /// generate a French (annuity) amortization schedule from loan terms
    ///
    /// Pure and deterministic. The periodic payment is rounded to cents
    /// half-up before the period walk, so every row matches the quoted
    /// payment. A rounding residual on the final balance is clamped to
    /// zero rather than reported as an error.
    pub fn generate(terms: &LoanTerms) -> Result<Self> {
        terms.validate()?;

        let rate = period_rate(terms.monthly_rate, terms.frequency);
        let periods = period_count(terms.term_months, terms.frequency);
        let payment = periodic_payment(terms.principal, rate, periods);

        let mut installments = Vec::with_capacity(periods as usize);
        let mut balance = terms.principal;

        for number in 1..=periods {
            let interest_portion = Money::from_decimal(balance.as_decimal() * rate);
            let principal_portion = payment - interest_portion;
            let remaining_balance = (balance - principal_portion).max(Money::ZERO);

            installments.push(Installment {
                number,
                due_date: advance_date(terms.start_date, number, terms.frequency),
                payment_amount: payment,
                principal_portion,
                interest_portion,
                remaining_balance,
                paid: false,
            });

            balance = remaining_balance;
        }

        let total_payable = payment * Decimal::from(periods);
        let total_interest = total_payable - terms.principal;

        Ok(Self {
            periodic_payment: payment,
            total_payable,
            total_interest,
            installments,
        })
    }

    /// number of installments in the schedule
    pub fn installment_count(&self) -> u32 {
        self.installments.len() as u32
    }

    /// look up an installment by its 1-based number
    pub fn installment(&self, number: u32) -> Option<&Installment> {
        if number == 0 {
            return None;
        }
        self.installments.get((number - 1) as usize)
    }

    pub(crate) fn installment_mut(&mut self, number: u32) -> Option<&mut Installment> {
        if number == 0 {
            return None;
        }
        self.installments.get_mut((number - 1) as usize)
    }

    /// true once every installment's paid flag is set
    pub fn is_fully_paid(&self) -> bool {
        self.installments.iter().all(|i| i.paid)
    }

    /// count of installments still owed
    pub fn unpaid_count(&self) -> u32 {
        self.installments.iter().filter(|i| !i.paid).count() as u32
    }

    /// count of installments already settled
    pub fn paid_count(&self) -> u32 {
        self.installments.iter().filter(|i| i.paid).count() as u32
    }
}

/// fixed annuity payment: P * r * (1+r)^n / ((1+r)^n - 1), rounded to cents
///
/// Falls back to straight-line P / n when the rate is zero, where the
/// annuity denominator vanishes.
fn periodic_payment(principal: Money, rate: Decimal, periods: u32) -> Money {
    if periods == 0 {
        return principal;
    }

    if rate.is_zero() {
        return principal / Decimal::from(periods);
    }

    let base = Decimal::ONE + rate;
    let mut compound = Decimal::ONE;
    for _ in 0..periods {
        compound *= base;
    }

    let denominator = compound - Decimal::ONE;
    if denominator.is_zero() {
        return principal / Decimal::from(periods);
    }

    Money::from_decimal(principal.as_decimal() * rate * compound / denominator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Rate;
    use crate::types::PaymentFrequency;
    use rust_decimal_macros::dec;

    fn monthly_terms(principal: i64, rate_pct: Decimal, months: u32) -> LoanTerms {
        LoanTerms::new(
            Money::from_major(principal),
            Rate::from_percentage(rate_pct),
            months,
            PaymentFrequency::Monthly,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )
    }

    #[test]
    fn test_reference_three_month_loan() {
        // 10,000 at 5% monthly over 3 months
        let schedule = Schedule::generate(&monthly_terms(10_000, dec!(5), 3)).unwrap();

        assert_eq!(schedule.periodic_payment, Money::from_decimal(dec!(3672.09)));
        assert_eq!(schedule.total_payable, Money::from_decimal(dec!(11016.27)));
        assert_eq!(schedule.total_interest, Money::from_decimal(dec!(1016.27)));
        assert_eq!(schedule.installment_count(), 3);

        let first = schedule.installment(1).unwrap();
        assert_eq!(first.interest_portion, Money::from_decimal(dec!(500.00)));
        assert_eq!(first.principal_portion, Money::from_decimal(dec!(3172.09)));
        assert_eq!(first.remaining_balance, Money::from_decimal(dec!(6827.91)));

        // balances strictly decreasing to zero
        let balances: Vec<Money> = schedule
            .installments
            .iter()
            .map(|i| i.remaining_balance)
            .collect();
        assert!(balances.windows(2).all(|w| w[1] < w[0]));
        assert_eq!(balances.last().copied().unwrap(), Money::ZERO);
    }

    #[test]
    fn test_schedule_invariants() {
        let terms = monthly_terms(250_000, dec!(0.75), 360);
        let schedule = Schedule::generate(&terms).unwrap();

        assert_eq!(schedule.installments.len(), 360);

        let mut previous_balance = terms.principal;
        for (idx, installment) in schedule.installments.iter().enumerate() {
            assert_eq!(installment.number as usize, idx + 1);
            assert!(!installment.principal_portion.is_negative());
            assert!(!installment.interest_portion.is_negative());

            // split sums to the quoted payment
            assert_eq!(
                installment.principal_portion + installment.interest_portion,
                installment.payment_amount
            );

            // balance chain, allowing the final clamp
            let expected = (previous_balance - installment.principal_portion).max(Money::ZERO);
            assert_eq!(installment.remaining_balance, expected);
            previous_balance = installment.remaining_balance;
        }

        // final balance within a cent of zero
        assert!(schedule.installments.last().unwrap().remaining_balance <= Money::CENT);
        assert_eq!(
            schedule.total_interest,
            schedule.total_payable - terms.principal
        );
    }

    #[test]
    fn test_zero_rate_straight_line() {
        let schedule = Schedule::generate(&monthly_terms(12_000, dec!(0), 12)).unwrap();

        assert_eq!(schedule.periodic_payment, Money::from_major(1_000));
        assert_eq!(schedule.total_interest, Money::ZERO);

        for installment in &schedule.installments {
            assert_eq!(installment.interest_portion, Money::ZERO);
            assert_eq!(installment.principal_portion, Money::from_major(1_000));
        }
        assert_eq!(
            schedule.installments.last().unwrap().remaining_balance,
            Money::ZERO
        );
    }

    #[test]
    fn test_weekly_schedule_period_count_and_dates() {
        let terms = LoanTerms::new(
            Money::from_major(5_200),
            Rate::from_percentage(dec!(2)),
            3,
            PaymentFrequency::Weekly,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        );
        let schedule = Schedule::generate(&terms).unwrap();

        // 3 months * 4.33 rounds to 13 weekly installments
        assert_eq!(schedule.installment_count(), 13);
        assert_eq!(
            schedule.installment(1).unwrap().due_date,
            NaiveDate::from_ymd_opt(2024, 3, 8).unwrap()
        );
        assert_eq!(
            schedule.installment(2).unwrap().due_date,
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
        );
        // per-period interest rounding drifts a few cents over 13 periods
        assert!(
            schedule.installments.last().unwrap().remaining_balance
                < Money::from_decimal(dec!(0.05))
        );
    }

    #[test]
    fn test_biweekly_schedule_halves_rate_and_doubles_periods() {
        let terms = LoanTerms::new(
            Money::from_major(10_000),
            Rate::from_percentage(dec!(5)),
            3,
            PaymentFrequency::Biweekly,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        );
        let schedule = Schedule::generate(&terms).unwrap();

        assert_eq!(schedule.installment_count(), 6);
        // first period accrues at half the monthly rate
        assert_eq!(
            schedule.installment(1).unwrap().interest_portion,
            Money::from_decimal(dec!(250.00))
        );
        // 15-day stepping
        assert_eq!(
            schedule.installment(1).unwrap().due_date,
            NaiveDate::from_ymd_opt(2024, 1, 16).unwrap()
        );
        assert_eq!(
            schedule.installment(3).unwrap().due_date,
            NaiveDate::from_ymd_opt(2024, 2, 15).unwrap()
        );
    }

    #[test]
    fn test_generation_is_deterministic() {
        let terms = monthly_terms(10_000, dec!(5), 3);
        assert_eq!(
            Schedule::generate(&terms).unwrap(),
            Schedule::generate(&terms).unwrap()
        );
    }

    #[test]
    fn test_invalid_terms_rejected() {
        let mut terms = monthly_terms(10_000, dec!(5), 3);
        terms.principal = Money::ZERO;
        assert!(Schedule::generate(&terms).is_err());

        let mut terms = monthly_terms(10_000, dec!(5), 3);
        terms.term_months = 0;
        assert!(Schedule::generate(&terms).is_err());
    }

    #[test]
    fn test_installment_lookup_bounds() {
        let schedule = Schedule::generate(&monthly_terms(10_000, dec!(5), 3)).unwrap();
        assert!(schedule.installment(0).is_none());
        assert!(schedule.installment(4).is_none());
        assert_eq!(schedule.installment(3).unwrap().number, 3);
    }
}
