use thiserror::Error;

use crate::decimal::Money;
use crate::types::LoanStatus;

#[derive(Error, Debug)]
pub enum LoanError {
    #[error("invalid loan terms: {message}")]
    InvalidTerms {
        message: String,
    },

    #[error("loan not active: current status is {status:?}")]
    LoanNotActive {
        status: LoanStatus,
    },

    #[error("installment not found: {number}")]
    InstallmentNotFound {
        number: u32,
    },

    #[error("installment already paid: {number}")]
    InstallmentAlreadyPaid {
        number: u32,
    },

    #[error("invalid payment amount: {amount}")]
    InvalidAmount {
        amount: Money,
    },

    #[error("schedule locked: {paid_count} installment(s) already paid")]
    ScheduleLocked {
        paid_count: u32,
    },
}

pub type Result<T> = std::result::Result<T, LoanError>;
