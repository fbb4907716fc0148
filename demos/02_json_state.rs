/// json state - serialize a loan for persistence and restore it
use loan_servicing_rs::chrono::NaiveDate;
use loan_servicing_rs::{
    Loan, LoanTerms, Money, PaymentFrequency, PaymentMethod, PaymentProcessor, Rate,
    SafeTimeProvider, TimeSource,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::System);

    let terms = LoanTerms::new(
        Money::from_major(2_600),
        Rate::from_percentage(dec!(3)),
        2,
        PaymentFrequency::Biweekly,
        NaiveDate::from_ymd_opt(2024, 6, 1).ok_or("bad date")?,
    );

    let mut loan = Loan::create(terms, &time)?;
    let amount = loan.schedule.periodic_payment;
    PaymentProcessor::new().apply_payment(&mut loan, 1, amount, PaymentMethod::Card, &time)?;

    // the host persists this snapshot after each call; events are not in it
    let snapshot = loan.to_json_pretty();
    println!("{}", snapshot);

    let restored: Loan = serde_json::from_str(&snapshot)?;
    println!(
        "restored loan {} with {} unpaid installment(s)",
        restored.id,
        restored.schedule.unpaid_count()
    );

    Ok(())
}
