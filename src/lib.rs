pub mod decimal;
pub mod errors;
pub mod events;
pub mod loan;
pub mod payments;
pub mod schedule;
pub mod types;

// re-export key types
pub use decimal::{Money, Rate};
pub use errors::{LoanError, Result};
pub use events::{Event, EventStore};
pub use loan::Loan;
pub use payments::{Payment, PaymentProcessor};
pub use schedule::{Installment, Schedule};
pub use types::{
    LoanId, LoanStatus, LoanTerms, PaymentFrequency, PaymentId, PaymentMethod,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
