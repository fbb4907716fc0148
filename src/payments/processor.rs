use chrono::{DateTime, Utc};
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;
use crate::errors::{LoanError, Result};
use crate::events::Event;
use crate::loan::Loan;
use crate::types::{LoanId, PaymentId, PaymentMethod};

/// immutable record of one payment applied against one installment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub loan_id: LoanId,
    pub installment_number: u32,
    pub amount: Money,
    pub method: PaymentMethod,
    pub timestamp: DateTime<Utc>,
    /// outstanding debt snapshot before the payment, as reported
    pub previous_balance: Money,
    /// the schedule's interest component, authoritative for the split
    pub interest_portion: Money,
    /// whatever remains of the tendered amount after scheduled interest
    pub principal_portion: Money,
    pub resulting_balance: Money,
}

/// applies payments against a loan's schedule
///
/// This is the only place an installment's paid flag is flipped. The
/// interest/principal split always comes from the precomputed schedule,
/// never from a recompute against the tendered amount: partial or extra
/// payments are recorded with whatever split results, and the schedule
/// itself is not rebalanced.
pub struct PaymentProcessor;

impl PaymentProcessor {
    pub fn new() -> Self {
        Self
    }

    /// validate and apply one payment to one installment
    ///
    /// Check order matters: loan status, installment lookup, paid flag,
    /// then amount, so a replayed request on a settled installment reports
    /// the duplicate rather than an amount problem.
    pub fn apply_payment(
        &self,
        loan: &mut Loan,
        installment_number: u32,
        amount: Money,
        method: PaymentMethod,
        time: &SafeTimeProvider,
    ) -> Result<Payment> {
        if !loan.is_active() {
            return Err(LoanError::LoanNotActive {
                status: loan.status,
            });
        }

        let installment = loan
            .schedule
            .installment(installment_number)
            .ok_or(LoanError::InstallmentNotFound {
                number: installment_number,
            })?;

        if installment.paid {
            return Err(LoanError::InstallmentAlreadyPaid {
                number: installment_number,
            });
        }

        if !amount.is_positive() {
            return Err(LoanError::InvalidAmount { amount });
        }

        let interest_portion = installment.interest_portion;
        let previous_balance = installment.remaining_balance + interest_portion;
        let principal_portion = amount - interest_portion;
        let resulting_balance = (installment.remaining_balance - principal_portion).max(Money::ZERO);

        let now = time.now();
        let payment = Payment {
            id: Uuid::new_v4(),
            loan_id: loan.id,
            installment_number,
            amount,
            method,
            timestamp: now,
            previous_balance,
            interest_portion,
            principal_portion,
            resulting_balance,
        };

        loan.events.emit(Event::PaymentReceived {
            loan_id: loan.id,
            payment_id: payment.id,
            installment_number,
            amount,
            interest_portion,
            principal_portion,
            method,
            timestamp: now,
        });

        loan.mark_installment_paid(installment_number, now)?;

        Ok(payment)
    }
}

impl Default for PaymentProcessor {
    fn default() -> Self {
        Self::new()
    }
}
