pub mod processor;

pub use processor::{Payment, PaymentProcessor};
