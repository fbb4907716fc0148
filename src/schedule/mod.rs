pub mod amortization;
pub mod period;

pub use amortization::{Installment, Schedule};
pub use period::{advance_date, frequency_factor, period_count, period_rate, periods_per_month};
