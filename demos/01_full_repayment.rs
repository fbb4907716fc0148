/// full repayment - walk a loan from origination to Paid under a test clock
use loan_servicing_rs::chrono::{Duration, NaiveDate, TimeZone, Utc};
use loan_servicing_rs::{
    Loan, LoanStatus, LoanTerms, Money, PaymentFrequency, PaymentMethod, PaymentProcessor, Rate,
    SafeTimeProvider, TimeSource,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    ));
    let control = time.test_control().ok_or("no test control")?;

    let terms = LoanTerms::new(
        Money::from_major(10_000),
        Rate::from_percentage(dec!(5)),
        3,
        PaymentFrequency::Monthly,
        NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("bad date")?,
    );

    let mut loan = Loan::create(terms, &time)?;
    let processor = PaymentProcessor::new();
    let amount = loan.schedule.periodic_payment;

    for number in 1..=loan.schedule.installment_count() {
        control.advance(Duration::days(30));
        let payment =
            processor.apply_payment(&mut loan, number, amount, PaymentMethod::BankTransfer, &time)?;
        println!(
            "{}  installment {}  paid {}  remaining installments: {}",
            payment.timestamp.date_naive(),
            payment.installment_number,
            payment.amount,
            loan.schedule.unpaid_count(),
        );
    }

    assert_eq!(loan.status, LoanStatus::Paid);
    println!("loan status: {:?}", loan.status);

    for event in loan.events.take_events() {
        println!("event: {:?}", event);
    }

    Ok(())
}
