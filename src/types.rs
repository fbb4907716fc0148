use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};

/// unique identifier for a loan
pub type LoanId = Uuid;

/// unique identifier for a payment
pub type PaymentId = Uuid;

/// loan status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanStatus {
    /// loan performing, schedule attached, payments accepted
    Active,
    /// every installment paid, terminal
    Paid,
    /// administratively cancelled, terminal
    Cancelled,
}

impl LoanStatus {
    /// terminal states accept no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, LoanStatus::Paid | LoanStatus::Cancelled)
    }
}

/// repayment cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentFrequency {
    Weekly,
    Biweekly,
    Monthly,
}

/// how a payment was tendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Cash,
    Check,
    BankTransfer,
    Card,
}

/// loan terms, fixed at origination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    /// monthly rate; converted to a per-period rate by the schedule calculator
    pub monthly_rate: Rate,
    pub term_months: u32,
    pub frequency: PaymentFrequency,
    pub start_date: NaiveDate,
}

impl LoanTerms {
    pub fn new(
        principal: Money,
        monthly_rate: Rate,
        term_months: u32,
        frequency: PaymentFrequency,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            principal,
            monthly_rate,
            term_months,
            frequency,
            start_date,
        }
    }

    /// validate terms before any schedule is generated
    pub fn validate(&self) -> Result<()> {
        if !self.principal.is_positive() {
            return Err(LoanError::InvalidTerms {
                message: format!("principal must be positive, got {}", self.principal),
            });
        }

        if self.monthly_rate.is_negative() {
            return Err(LoanError::InvalidTerms {
                message: format!("rate must not be negative, got {}", self.monthly_rate),
            });
        }

        if self.term_months == 0 {
            return Err(LoanError::InvalidTerms {
                message: "term must be at least one month".to_string(),
            });
        }

        Ok(())
    }
}
