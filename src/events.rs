use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{LoanId, PaymentId, PaymentMethod};

/// all events that can be emitted by a loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    // lifecycle events
    LoanCreated {
        loan_id: LoanId,
        principal: Money,
        periodic_payment: Money,
        installment_count: u32,
        first_due_date: NaiveDate,
        timestamp: DateTime<Utc>,
    },
    LoanPaidOff {
        loan_id: LoanId,
        total_payable: Money,
        timestamp: DateTime<Utc>,
    },
    LoanCancelled {
        loan_id: LoanId,
        unpaid_installments: u32,
        timestamp: DateTime<Utc>,
    },
    ScheduleReplaced {
        loan_id: LoanId,
        new_periodic_payment: Money,
        new_installment_count: u32,
        timestamp: DateTime<Utc>,
    },

    // payment events
    PaymentReceived {
        loan_id: LoanId,
        payment_id: PaymentId,
        installment_number: u32,
        amount: Money,
        interest_portion: Money,
        principal_portion: Money,
        method: PaymentMethod,
        timestamp: DateTime<Utc>,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
