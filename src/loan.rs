use chrono::{DateTime, Utc};
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{LoanError, Result};
use crate::events::{Event, EventStore};
use crate::schedule::Schedule;
use crate::types::{LoanId, LoanStatus, LoanTerms};

/// loan aggregate: terms, schedule, status, and an audit event trail
///
/// The schedule is generated once at creation and replaced wholesale by
/// `replace_terms`, never patched row by row. Paid flags are flipped only
/// through `mark_installment_paid`, which the payment processor calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loan {
    pub id: LoanId,
    pub terms: LoanTerms,
    pub schedule: Schedule,
    pub status: LoanStatus,
    pub created_at: DateTime<Utc>,
    pub status_changed_at: DateTime<Utc>,
    /// drained by the host after each call, not persisted with the loan
    #[serde(skip, default)]
    pub events: EventStore,
}

impl Loan {
    /// originate a loan: validate terms, attach the schedule, go Active
    pub fn create(terms: LoanTerms, time: &SafeTimeProvider) -> Result<Self> {
        let schedule = Schedule::generate(&terms)?;
        let now = time.now();

        let mut loan = Self {
            id: Uuid::new_v4(),
            terms,
            schedule,
            status: LoanStatus::Active,
            created_at: now,
            status_changed_at: now,
            events: EventStore::new(),
        };

        let first_due_date = loan
            .schedule
            .installment(1)
            .map(|i| i.due_date)
            .unwrap_or(loan.terms.start_date);

        loan.events.emit(Event::LoanCreated {
            loan_id: loan.id,
            principal: loan.terms.principal,
            periodic_payment: loan.schedule.periodic_payment,
            installment_count: loan.schedule.installment_count(),
            first_due_date,
            timestamp: now,
        });

        Ok(loan)
    }

    pub fn is_active(&self) -> bool {
        self.status == LoanStatus::Active
    }

    /// flip one installment's paid flag; transition to Paid once all are set
    ///
    /// Duplicate calls fail with `InstallmentAlreadyPaid` so callers can
    /// detect replayed requests; they are never silent no-ops.
    pub fn mark_installment_paid(&mut self, number: u32, now: DateTime<Utc>) -> Result<()> {
        if !self.is_active() {
            return Err(LoanError::LoanNotActive {
                status: self.status,
            });
        }

        let installment = self
            .schedule
            .installment_mut(number)
            .ok_or(LoanError::InstallmentNotFound { number })?;

        if installment.paid {
            return Err(LoanError::InstallmentAlreadyPaid { number });
        }
        installment.paid = true;

        if self.schedule.is_fully_paid() {
            self.update_status(LoanStatus::Paid, now);
            self.events.emit(Event::LoanPaidOff {
                loan_id: self.id,
                total_payable: self.schedule.total_payable,
                timestamp: now,
            });
        }

        Ok(())
    }

    /// administrative cancellation; paid flags are left untouched
    pub fn cancel(&mut self, time: &SafeTimeProvider) -> Result<()> {
        if !self.is_active() {
            return Err(LoanError::LoanNotActive {
                status: self.status,
            });
        }

        let now = time.now();
        self.update_status(LoanStatus::Cancelled, now);
        self.events.emit(Event::LoanCancelled {
            loan_id: self.id,
            unpaid_installments: self.schedule.unpaid_count(),
            timestamp: now,
        });

        Ok(())
    }

    /// re-originate under new terms, swapping terms and schedule together
    ///
    /// Refused once any installment has been paid; the old schedule stays
    /// in place untouched when the new terms fail validation.
    pub fn replace_terms(&mut self, new_terms: LoanTerms, time: &SafeTimeProvider) -> Result<()> {
        if !self.is_active() {
            return Err(LoanError::LoanNotActive {
                status: self.status,
            });
        }

        let paid_count = self.schedule.paid_count();
        if paid_count > 0 {
            return Err(LoanError::ScheduleLocked { paid_count });
        }

        let new_schedule = Schedule::generate(&new_terms)?;
        self.terms = new_terms;
        self.schedule = new_schedule;

        self.events.emit(Event::ScheduleReplaced {
            loan_id: self.id,
            new_periodic_payment: self.schedule.periodic_payment,
            new_installment_count: self.schedule.installment_count(),
            timestamp: time.now(),
        });

        Ok(())
    }

    fn update_status(&mut self, status: LoanStatus, now: DateTime<Utc>) {
        self.status = status;
        self.status_changed_at = now;
    }

    /// json snapshot of the aggregate, without the event trail
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("JSON error: {}", e))
    }
}
